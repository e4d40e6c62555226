use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::analytics::{SortKey, SortOrder};
use crate::ledger::Ledger;
use crate::models::Category;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_date, format_signed, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let rows = app.transaction_rows(ledger);

    if rows.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No transactions yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press a to add an expense, i for income, or use :add",
                theme::dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Transactions (0) ", theme::title_style()));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let arrow = |key: SortKey| {
        if app.sort_key == key {
            app.sort_order.arrow()
        } else {
            ""
        }
    };
    let headers = [
        format!("Date {}", arrow(SortKey::Date)),
        "Description".to_string(),
        "Category".to_string(),
        format!("Amount {}", arrow(SortKey::Amount)),
    ];
    let header = Row::new(
        headers
            .into_iter()
            .map(|h| Cell::from(h).style(theme::header_style())),
    )
    .height(1);

    let table_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let amount_style = if txn.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };

            let style = if i == app.transaction_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format!("  {}", format_date(&txn.date))),
                Cell::from(truncate(&txn.description, 40)),
                Cell::from(Line::from(vec![
                    Span::raw(format!("{} ", Category::icon_for(&txn.category))),
                    Span::styled(
                        truncate(&txn.category, 18),
                        Style::default().fg(theme::hex_color(Category::color_for(&txn.category))),
                    ),
                ])),
                Cell::from(Span::styled(format_signed(txn.kind, txn.amount), amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(16),
        Constraint::Min(20),
        Constraint::Length(22),
        Constraint::Length(16),
    ];

    let order = match app.sort_order {
        SortOrder::Ascending => "ascending",
        SortOrder::Descending => "descending",
    };
    let table = Table::new(table_rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(
                    " Transactions ({}) sorted by {} {order} ",
                    rows.len(),
                    app.sort_key
                ),
                theme::title_style(),
            )),
    );

    f.render_widget(table, area);
}

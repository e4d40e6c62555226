use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::analytics::{budget_overview, budget_status, YearMonth};
use crate::ledger::validate::available_budget_categories;
use crate::ledger::Ledger;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percent, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    if ledger.budgets().is_empty() {
        render_empty(f, area);
        return;
    }

    let statuses = budget_status(ledger.budgets(), ledger.transactions(), app.today);
    let overview = budget_overview(&statuses);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let items: Vec<ListItem> = statuses
        .iter()
        .enumerate()
        .skip(app.budget_scroll)
        .take(chunks[0].height.saturating_sub(2) as usize)
        .map(|(i, status)| {
            let color = theme::budget_color(status);
            let style = if i == app.budget_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let ratio = (status.progress() / Decimal::ONE_HUNDRED)
                .to_f64()
                .unwrap_or(0.0);
            let bar = create_progress_bar(ratio, 20);
            let flag = if status.is_over_budget() {
                format!(" over by {}", format_amount(-status.remaining))
            } else if status.is_near_limit() {
                " near limit".to_string()
            } else {
                format!(" {} left", format_amount(status.remaining))
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} {:<18}", status.icon, truncate(&status.category, 17)),
                    style,
                ),
                Span::styled(
                    format!(
                        "{}/{} ",
                        format_amount(status.spent),
                        format_amount(status.amount)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(bar, Style::default().fg(color)),
                Span::styled(
                    format!(" {}", format_percent(status.percentage)),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(flag, theme::dim_style()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Budgets for {} ", YearMonth::of(app.today).label()),
                theme::title_style(),
            )),
    );
    f.render_widget(list, chunks[0]);

    let unbudgeted = available_budget_categories(ledger.budgets()).len();
    let summary = Line::from(vec![
        Span::styled(" Budgeted ", theme::dim_style()),
        Span::styled(format_amount(overview.budgeted), theme::normal_style()),
        Span::styled("   Spent ", theme::dim_style()),
        Span::styled(format_amount(overview.spent), theme::expense_style()),
        Span::styled("   Remaining ", theme::dim_style()),
        Span::styled(format_amount(overview.remaining), theme::normal_style()),
        Span::styled(
            format!("   {unbudgeted} categories without a budget"),
            theme::dim_style(),
        ),
    ]);
    f.render_widget(
        Paragraph::new(summary).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY)),
        ),
        chunks[1],
    );
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No budgets set", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Press B or use :budget <category> <amount> to set a monthly limit",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Budgets ", theme::title_style())),
    );
    f.render_widget(msg, area);
}

fn create_progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::analytics::{dashboard, Dashboard};
use crate::ledger::Ledger;
use crate::models::Category;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_date, format_percent, format_signed, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let dash = dashboard(ledger.transactions(), ledger.budgets(), app.today);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Summary cards
            Constraint::Min(8),    // Top categories + recent activity
            Constraint::Length(3), // All-time totals
        ])
        .split(area);

    render_summary_cards(f, chunks[0], &dash);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_top_categories(f, middle[0], &dash);
    render_recent(f, middle[1], &dash);

    render_all_time(f, chunks[2], &dash);
}

fn block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}

fn signed_color(amount: Decimal) -> Color {
    if amount >= Decimal::ZERO {
        theme::GREEN
    } else {
        theme::RED
    }
}

fn render_summary_cards(f: &mut Frame, area: Rect, dash: &Dashboard) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let month = dash.month.label();
    let net = dash.month_totals.net();

    render_card(
        f,
        cards[0],
        "Income",
        format_amount(dash.month_totals.income),
        theme::GREEN,
        month.clone(),
    );
    render_card(
        f,
        cards[1],
        "Expenses",
        format_amount(dash.month_totals.expenses),
        theme::RED,
        month.clone(),
    );
    render_card(f, cards[2], "Net", format_amount(net), signed_color(net), month);

    let overview = &dash.budget_overview;
    let (display, color, subtitle) = match overview.used_percentage {
        Some(pct) => (
            format_percent(pct),
            if overview.spent > overview.budgeted {
                theme::RED
            } else {
                theme::ACCENT
            },
            format!(
                "{} of {}",
                format_amount(overview.spent),
                format_amount(overview.budgeted)
            ),
        ),
        None => (
            "No budgets".to_string(),
            theme::TEXT_DIM,
            "Set one with :budget".to_string(),
        ),
    };
    render_card(f, cards[3], "Budget Used", display, color, subtitle);
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    display: String,
    color: Color,
    subtitle: String,
) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(block(title));

    f.render_widget(text, area);
}

fn render_top_categories(f: &mut Frame, area: Rect, dash: &Dashboard) {
    if dash.top_categories.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No expenses this month", theme::dim_style())),
        ])
        .centered()
        .block(block("Top Categories"));
        f.render_widget(msg, area);
        return;
    }

    let lines: Vec<Line> = dash
        .top_categories
        .iter()
        .map(|c| {
            Line::from(vec![
                Span::raw(format!(" {} ", Category::icon_for(&c.category))),
                Span::styled(
                    format!("{:<20}", truncate(&c.category, 19)),
                    Style::default().fg(theme::hex_color(c.color)),
                ),
                Span::styled(format!("{:>12}", format_amount(c.amount)), theme::normal_style()),
                Span::styled(format!("{:>8}", format_percent(c.percentage)), theme::dim_style()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block("Top Categories")), area);
}

fn render_recent(f: &mut Frame, area: Rect, dash: &Dashboard) {
    if dash.recent.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No transactions this month",
                theme::dim_style(),
            )),
            Line::from(Span::styled("Press a to add one", theme::dim_style())),
        ])
        .centered()
        .block(block("Recent Activity"));
        f.render_widget(msg, area);
        return;
    }

    let lines: Vec<Line> = dash
        .recent
        .iter()
        .map(|t| {
            let amount_style = if t.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };
            Line::from(vec![
                Span::raw(format!(" {} ", Category::icon_for(&t.category))),
                Span::styled(format!("{:<22}", truncate(&t.description, 21)), theme::normal_style()),
                Span::styled(format!("{:<14}", format_date(&t.date)), theme::dim_style()),
                Span::styled(format_signed(t.kind, t.amount), amount_style),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block("Recent Activity")), area);
}

fn render_all_time(f: &mut Frame, area: Rect, dash: &Dashboard) {
    let net_worth = dash.all_time.net();
    let line = Line::from(vec![
        Span::styled(" Income ", theme::dim_style()),
        Span::styled(format_amount(dash.all_time.income), theme::income_style()),
        Span::styled("   Expenses ", theme::dim_style()),
        Span::styled(format_amount(dash.all_time.expenses), theme::expense_style()),
        Span::styled("   Net Worth ", theme::dim_style()),
        Span::styled(
            format_amount(net_worth),
            Style::default()
                .fg(signed_color(net_worth))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   {} transactions", dash.transaction_count),
            theme::dim_style(),
        ),
    ]);
    f.render_widget(Paragraph::new(line).block(block("All Time")), area);
}

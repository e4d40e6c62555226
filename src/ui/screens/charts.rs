use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::analytics::{
    budget_status, category_rollup, monthly_rollup, BudgetStatus, MonthlySummary, MONTHLY_WINDOW,
};
use crate::ledger::Ledger;
use crate::ui::theme;
use crate::ui::util::{bar_value, format_amount, format_percent, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, ledger: &Ledger, today: NaiveDate) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    render_monthly(f, top[0], ledger);
    render_categories(f, top[1], ledger);
    render_budgets(f, bottom[0], ledger, today);
    render_net_trend(f, bottom[1], ledger);
}

fn block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(title, theme::title_style()))
}

fn render_empty(f: &mut Frame, area: Rect, title: &str, message: &str) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme::dim_style())),
    ])
    .centered()
    .block(block(format!(" {title} ")));
    f.render_widget(msg, area);
}

fn render_monthly(f: &mut Frame, area: Rect, ledger: &Ledger) {
    let rollup = monthly_rollup(ledger.transactions());
    if rollup.months.is_empty() {
        render_empty(f, area, "Income vs Expenses", "No dated transactions yet");
        return;
    }

    let title = match rollup.undated {
        Some(undated) => format!(
            " Income vs Expenses (last {MONTHLY_WINDOW} months, {} undated) ",
            format_amount(undated.income.saturating_add(undated.expenses))
        ),
        None => format!(" Income vs Expenses (last {MONTHLY_WINDOW} months) "),
    };

    let mut chart = BarChart::default()
        .block(block(title))
        .bar_width(5)
        .bar_gap(1)
        .group_gap(3);

    for month in &rollup.months {
        let bars = [
            Bar::default()
                .value(bar_value(month.income))
                .text_value(String::new())
                .style(theme::income_style()),
            Bar::default()
                .value(bar_value(month.expenses))
                .text_value(String::new())
                .style(theme::expense_style()),
        ];
        let group = BarGroup::default()
            .label(Line::from(Span::styled(month.month.label(), theme::dim_style())))
            .bars(&bars);
        chart = chart.data(group);
    }

    f.render_widget(chart, area);
}

fn render_categories(f: &mut Frame, area: Rect, ledger: &Ledger) {
    let rollup = category_rollup(ledger.transactions());
    if rollup.is_empty() {
        render_empty(f, area, "Spending by Category", "No expenses yet");
        return;
    }

    let bars: Vec<Bar> = rollup
        .iter()
        .map(|c| {
            let color = theme::hex_color(c.color);
            Bar::default()
                .value(bar_value(c.amount))
                .label(Line::from(truncate(&c.category, 14)))
                .text_value(format!(
                    "{} {}",
                    format_amount(c.amount),
                    format_percent(c.percentage)
                ))
                .style(Style::default().fg(color))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block(" Spending by Category (all time) ".to_string()))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}

fn render_budgets(f: &mut Frame, area: Rect, ledger: &Ledger, today: NaiveDate) {
    let statuses = budget_status(ledger.budgets(), ledger.transactions(), today);
    if statuses.is_empty() {
        render_empty(
            f,
            area,
            "Budget vs Actual",
            "No budgets set. Create budgets to see progress.",
        );
        return;
    }

    let mut chart = BarChart::default()
        .block(block(" Budget vs Actual (this month) ".to_string()))
        .bar_width(5)
        .bar_gap(1)
        .group_gap(3);

    for status in &statuses {
        let [budget, spent] = budget_bars(status);
        let bars = [
            Bar::default()
                .value(budget)
                .text_value(String::new())
                .style(Style::default().fg(theme::ACCENT)),
            Bar::default()
                .value(spent)
                .text_value(String::new())
                .style(Style::default().fg(theme::budget_color(status))),
        ];
        let group = BarGroup::default()
            .label(Line::from(vec![
                Span::styled(truncate(&status.category, 10), theme::dim_style()),
                Span::styled(
                    format!(" {}", format_percent(status.percentage)),
                    Style::default().fg(theme::budget_color(status)),
                ),
            ]))
            .bars(&bars);
        chart = chart.data(group);
    }

    f.render_widget(chart, area);
}

/// Bar heights for one budget: the cap, then what was spent against it.
fn budget_bars(status: &BudgetStatus) -> [u64; 2] {
    [bar_value(status.amount), bar_value(status.spent)]
}

fn render_net_trend(f: &mut Frame, area: Rect, ledger: &Ledger) {
    let rollup = monthly_rollup(ledger.transactions());
    if rollup.months.is_empty() {
        render_empty(f, area, "Net Income Trend", "No dated transactions yet");
        return;
    }

    let points = net_points(&rollup.months);
    let [low, high] = net_bounds(&rollup.months);
    let last_x = rollup.months.len().saturating_sub(1) as f64;

    let dataset = Dataset::default()
        .name("Net Income")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme::ACCENT))
        .data(&points);

    let month_labels: Vec<Span> = match (rollup.months.first(), rollup.months.last()) {
        (Some(first), Some(last)) if rollup.months.len() > 1 => vec![
            Span::styled(first.month.label(), theme::dim_style()),
            Span::styled(last.month.label(), theme::dim_style()),
        ],
        (Some(only), _) => vec![Span::styled(only.month.label(), theme::dim_style())],
        _ => Vec::new(),
    };

    let chart = Chart::new(vec![dataset])
        .block(block(" Net Income Trend ".to_string()))
        .x_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([0.0, last_x.max(1.0)])
                .labels(month_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([to_f64(low), to_f64(high)])
                .labels(vec![
                    Span::styled(format_amount(low), theme::dim_style()),
                    Span::styled(format_amount(high), theme::dim_style()),
                ]),
        );

    f.render_widget(chart, area);
}

/// One `(month index, net)` point per month, oldest first.
fn net_points(months: &[MonthlySummary]) -> Vec<(f64, f64)> {
    months
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, to_f64(m.net)))
        .collect()
}

/// Y-axis range covering every net value and zero, never empty.
fn net_bounds(months: &[MonthlySummary]) -> [Decimal; 2] {
    let low = months.iter().map(|m| m.net).fold(Decimal::ZERO, Decimal::min);
    let high = months.iter().map(|m| m.net).fold(Decimal::ZERO, Decimal::max);
    if low == high {
        [low, low.saturating_add(Decimal::ONE)]
    } else {
        [low, high]
    }
}

fn to_f64(val: Decimal) -> f64 {
    val.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
#[path = "charts_tests.rs"]
mod charts_tests;

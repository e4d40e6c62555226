use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::{in_month, percentage, saturating_sum, YearMonth};
use crate::models::{Category, Transaction};

/// Number of entries returned by [`top_categories`].
pub(crate) const TOP_CATEGORY_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategorySummary {
    /// Category name as stored on the transactions.
    pub(crate) category: String,
    pub(crate) amount: Decimal,
    /// Registry color, or the fallback for unknown names.
    pub(crate) color: &'static str,
    /// Share of the rolled-up total, 0–100.
    pub(crate) percentage: Decimal,
}

/// Expense totals per category name across all transactions, largest first.
pub(crate) fn category_rollup(transactions: &[Transaction]) -> Vec<CategorySummary> {
    rollup_expenses(transactions.iter())
}

/// The largest expense categories of the month containing `today`.
pub(crate) fn top_categories(transactions: &[Transaction], today: NaiveDate) -> Vec<CategorySummary> {
    let mut rollup = rollup_expenses(in_month(transactions, YearMonth::of(today)));
    rollup.truncate(TOP_CATEGORY_COUNT);
    rollup
}

fn rollup_expenses<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> Vec<CategorySummary> {
    // Groups stay in first-seen order so the stable sort below breaks ties by it.
    let mut groups: Vec<(&str, Decimal)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for txn in transactions.filter(|t| t.is_expense()) {
        let name = txn.category.as_str();
        match index.get(name) {
            Some(&i) => groups[i].1 = groups[i].1.saturating_add(txn.amount),
            None => {
                index.insert(name, groups.len());
                groups.push((name, txn.amount));
            }
        }
    }

    let total = saturating_sum(groups.iter().map(|(_, amount)| *amount));
    let mut summaries: Vec<CategorySummary> = groups
        .into_iter()
        .map(|(name, amount)| CategorySummary {
            category: name.to_string(),
            amount,
            color: Category::color_for(name),
            percentage: percentage(amount, total),
        })
        .collect();
    summaries.sort_by(|a, b| b.amount.cmp(&a.amount));
    summaries
}

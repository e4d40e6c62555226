use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::{Totals, YearMonth};
use crate::models::Transaction;

/// Number of most recent months kept by [`monthly_rollup`].
pub(crate) const MONTHLY_WINDOW: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthlySummary {
    pub(crate) month: YearMonth,
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
    pub(crate) net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct MonthlyRollup {
    /// Chronologically ascending, at most [`MONTHLY_WINDOW`] entries.
    pub(crate) months: Vec<MonthlySummary>,
    /// Sums of transactions whose date could not be parsed.
    pub(crate) undated: Option<Totals>,
}

/// Group the full history by calendar month, then keep the latest months.
pub(crate) fn monthly_rollup(transactions: &[Transaction]) -> MonthlyRollup {
    let mut by_month: BTreeMap<YearMonth, Totals> = BTreeMap::new();
    let mut undated: Option<Totals> = None;

    for txn in transactions {
        match txn.parsed_date() {
            Some(date) => by_month.entry(YearMonth::of(date)).or_default().add(txn),
            None => undated.get_or_insert_with(Totals::default).add(txn),
        }
    }

    let skip = by_month.len().saturating_sub(MONTHLY_WINDOW);
    let months = by_month
        .into_iter()
        .skip(skip)
        .map(|(month, totals)| MonthlySummary {
            month,
            income: totals.income,
            expenses: totals.expenses,
            net: totals.net(),
        })
        .collect();

    MonthlyRollup { months, undated }
}

//! Derived views over a ledger snapshot.
//!
//! Everything here is a pure function of `(transactions, budgets, today)`
//! and is recomputed from scratch on every render. Nothing reads the clock.

mod budgets;
mod categories;
mod dashboard;
mod listing;
mod monthly;

pub(crate) use budgets::{budget_overview, budget_status, BudgetOverview, BudgetStatus};
pub(crate) use categories::{category_rollup, top_categories, CategorySummary};
pub(crate) use dashboard::{dashboard, Dashboard};
pub(crate) use listing::{sorted_transactions, SortKey, SortOrder};
pub(crate) use monthly::{monthly_rollup, MonthlyRollup, MonthlySummary, MONTHLY_WINDOW};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{Transaction, TransactionType};

/// A calendar month. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct YearMonth {
    pub(crate) year: i32,
    pub(crate) month: u32,
}

impl YearMonth {
    pub(crate) fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub(crate) fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Short label, e.g. "Jan 2024".
    pub(crate) fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| self.to_string())
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Income and expense sums for some set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Totals {
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
}

impl Totals {
    pub(crate) fn of<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut totals = Self::default();
        for txn in transactions {
            totals.add(txn);
        }
        totals
    }

    pub(crate) fn add(&mut self, txn: &Transaction) {
        match txn.kind {
            TransactionType::Income => self.income = self.income.saturating_add(txn.amount),
            TransactionType::Expense => self.expenses = self.expenses.saturating_add(txn.amount),
        }
    }

    pub(crate) fn net(&self) -> Decimal {
        self.income.saturating_sub(self.expenses)
    }
}

/// Transactions dated inside `month`. Unparsable dates never match.
pub(crate) fn in_month(
    transactions: &[Transaction],
    month: YearMonth,
) -> impl Iterator<Item = &Transaction> {
    transactions
        .iter()
        .filter(move |t| t.parsed_date().is_some_and(|d| month.contains(d)))
}

/// `part / whole * 100`, or zero when `whole` is not positive. A quotient
/// too large for `Decimal` saturates instead of overflowing.
pub(crate) fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let saturated = if part.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    };
    part.checked_div(whole)
        .map_or(saturated, |ratio| ratio.saturating_mul(Decimal::ONE_HUNDRED))
}

/// Overflow-free sum. Stored amounts are not bounded by validation once
/// the database has been edited by hand.
pub(crate) fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

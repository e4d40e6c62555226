use chrono::NaiveDate;

use super::{
    budget_overview, budget_status, in_month, top_categories, BudgetOverview, BudgetStatus,
    CategorySummary, Totals, YearMonth,
};
use crate::models::{Budget, Transaction};

/// Number of current-month transactions shown as recent activity.
pub(crate) const RECENT_ACTIVITY_COUNT: usize = 5;

/// Everything the dashboard screen and `summary` command display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Dashboard {
    pub(crate) month: YearMonth,
    pub(crate) month_totals: Totals,
    pub(crate) all_time: Totals,
    pub(crate) transaction_count: usize,
    pub(crate) budgets: Vec<BudgetStatus>,
    pub(crate) budget_overview: BudgetOverview,
    pub(crate) top_categories: Vec<CategorySummary>,
    /// Current-month transactions in ledger order (most recent first).
    pub(crate) recent: Vec<Transaction>,
}

pub(crate) fn dashboard(transactions: &[Transaction], budgets: &[Budget], today: NaiveDate) -> Dashboard {
    let month = YearMonth::of(today);
    let budgets = budget_status(budgets, transactions, today);
    let budget_overview = budget_overview(&budgets);

    Dashboard {
        month,
        month_totals: Totals::of(in_month(transactions, month)),
        all_time: Totals::of(transactions),
        transaction_count: transactions.len(),
        budgets,
        budget_overview,
        top_categories: top_categories(transactions, today),
        recent: in_month(transactions, month)
            .take(RECENT_ACTIVITY_COUNT)
            .cloned()
            .collect(),
    }
}

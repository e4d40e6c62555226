use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::{in_month, percentage, saturating_sum, YearMonth};
use crate::models::{Budget, Transaction, FALLBACK_ICON, UNKNOWN_CATEGORY};

/// Percentage of a budget at which it counts as near its limit.
const NEAR_LIMIT_PERCENT: i64 = 80;

/// One budget compared against the current month's spending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetStatus {
    pub(crate) category_id: String,
    /// Registry name, or "Unknown" for ids missing from the registry.
    pub(crate) category: String,
    pub(crate) icon: &'static str,
    pub(crate) amount: Decimal,
    pub(crate) spent: Decimal,
    /// Negative when over budget.
    pub(crate) remaining: Decimal,
    /// Unclamped; exceeds 100 when over budget, 0 for a zero budget.
    pub(crate) percentage: Decimal,
}

impl BudgetStatus {
    pub(crate) fn is_over_budget(&self) -> bool {
        self.spent > self.amount
    }

    pub(crate) fn is_near_limit(&self) -> bool {
        self.percentage >= Decimal::from(NEAR_LIMIT_PERCENT) && !self.is_over_budget()
    }

    /// Percentage clamped to 100 for progress bars.
    pub(crate) fn progress(&self) -> Decimal {
        self.percentage.min(Decimal::ONE_HUNDRED)
    }
}

/// Compare every budget with expenses in the month containing `today`.
pub(crate) fn budget_status(
    budgets: &[Budget],
    transactions: &[Transaction],
    today: NaiveDate,
) -> Vec<BudgetStatus> {
    let mut spent_by_category: HashMap<&str, Decimal> = HashMap::new();
    for txn in in_month(transactions, YearMonth::of(today)).filter(|t| t.is_expense()) {
        let spent = spent_by_category.entry(txn.category.as_str()).or_default();
        *spent = spent.saturating_add(txn.amount);
    }

    budgets
        .iter()
        .map(|budget| {
            let category = budget.category();
            let name = category.map_or(UNKNOWN_CATEGORY, |c| c.name);
            let spent = spent_by_category.get(name).copied().unwrap_or_default();
            BudgetStatus {
                category_id: budget.category_id.clone(),
                category: name.to_string(),
                icon: category.map_or(FALLBACK_ICON, |c| c.icon),
                amount: budget.amount,
                spent,
                remaining: budget.amount.saturating_sub(spent),
                percentage: percentage(spent, budget.amount),
            }
        })
        .collect()
}

/// Totals across every budget for the dashboard card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct BudgetOverview {
    pub(crate) budgeted: Decimal,
    pub(crate) spent: Decimal,
    pub(crate) remaining: Decimal,
    /// `None` when no budget is set.
    pub(crate) used_percentage: Option<Decimal>,
}

pub(crate) fn budget_overview(statuses: &[BudgetStatus]) -> BudgetOverview {
    let budgeted = saturating_sum(statuses.iter().map(|s| s.amount));
    let spent = saturating_sum(statuses.iter().map(|s| s.spent));
    BudgetOverview {
        budgeted,
        spent,
        remaining: budgeted.saturating_sub(spent),
        used_percentage: (budgeted > Decimal::ZERO).then(|| percentage(spent, budgeted)),
    }
}

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{
    parse_date, Budget, Category, Transaction, TransactionDraft, TransactionType, DATE_FORMAT,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum FieldError {
    #[error("Amount must be a number")]
    AmountNotANumber,
    #[error("Amount must be greater than 0")]
    AmountNotPositive,
    #[error("Amount must be at most $999,999,999.99")]
    AmountTooLarge,
    #[error("Amount can have at most 2 decimal places")]
    AmountTooPrecise,
    #[error("Description is required")]
    DescriptionRequired,
    #[error("Date must be in YYYY-MM-DD format")]
    InvalidDate,
    #[error("Category is required")]
    CategoryRequired,
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("{category} is not an {kind} category")]
    CategoryTypeMismatch {
        category: String,
        kind: TransactionType,
    },
    #[error("Budget already exists for this category")]
    BudgetExists,
}

/// Every field error found in one submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct FormErrors(Vec<FieldError>);

impl FormErrors {
    pub(crate) fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub(crate) fn contains(&self, error: &FieldError) -> bool {
        self.0.contains(error)
    }

    fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for FormErrors {}

// ── Transactions ──────────────────────────────────────────────

/// Raw user input for a transaction, before validation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TransactionForm {
    pub(crate) amount: String,
    pub(crate) description: String,
    pub(crate) date: String,
    pub(crate) category: String,
    pub(crate) kind: TransactionType,
}

impl TransactionForm {
    pub(crate) fn new(kind: TransactionType, today: NaiveDate) -> Self {
        Self {
            amount: String::new(),
            description: String::new(),
            date: today.format(DATE_FORMAT).to_string(),
            category: String::new(),
            kind,
        }
    }

    /// Prefill from an existing transaction for editing.
    pub(crate) fn from_transaction(txn: &Transaction) -> Self {
        Self {
            amount: txn.amount.to_string(),
            description: txn.description.clone(),
            date: txn.date.clone(),
            category: txn.category.clone(),
            kind: txn.kind,
        }
    }

    /// Set one field by name, as typed by the user.
    pub(crate) fn set(&mut self, field: &str, value: &str) -> Result<()> {
        match field.to_lowercase().as_str() {
            "amount" | "amt" => self.amount = value.to_string(),
            "description" | "desc" => self.description = value.to_string(),
            "date" => self.date = value.to_string(),
            "category" | "cat" => self.category = value.to_string(),
            "type" => {
                self.kind = TransactionType::parse(value)
                    .ok_or_else(|| anyhow::anyhow!("Type must be income or expense"))?;
            }
            other => anyhow::bail!(
                "Unknown field: {other} (expected amount, description, date, category or type)"
            ),
        }
        Ok(())
    }

    pub(crate) fn validate(&self) -> Result<TransactionDraft, FormErrors> {
        let mut errors = FormErrors::default();

        let amount = check_amount(&self.amount, &mut errors);

        let description = self.description.trim();
        if description.is_empty() {
            errors.push(FieldError::DescriptionRequired);
        }

        let date = parse_date(&self.date);
        if date.is_none() {
            errors.push(FieldError::InvalidDate);
        }

        let category = match check_category(&self.category, self.kind) {
            Ok(c) => Some(c),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        errors.into_result(|| TransactionDraft {
            amount: amount.unwrap_or_default(),
            description: description.to_string(),
            date: date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            category: category.map(|c| c.name.to_string()).unwrap_or_default(),
            kind: self.kind,
        })
    }
}

// ── Budgets ───────────────────────────────────────────────────

/// Raw user input for a budget. `category` may be an id or a name.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetForm {
    pub(crate) category: String,
    pub(crate) amount: String,
}

impl BudgetForm {
    pub(crate) fn validate(&self, existing: &[Budget]) -> Result<Budget, FormErrors> {
        let mut errors = FormErrors::default();

        let category = check_category(&self.category, TransactionType::Expense);
        let category_id = match &category {
            Ok(c) => c.id.to_string(),
            Err(_) => self.category.trim().to_string(),
        };
        if existing.iter().any(|b| b.category_id == category_id) {
            errors.push(FieldError::BudgetExists);
        } else if let Err(e) = category {
            errors.push(e);
        }

        let amount = check_amount(&self.amount, &mut errors);

        errors.into_result(|| Budget::new(category_id, amount.unwrap_or_default()))
    }
}

/// Expense categories that do not have a budget yet.
pub(crate) fn available_budget_categories(budgets: &[Budget]) -> Vec<&'static Category> {
    Category::list(TransactionType::Expense)
        .into_iter()
        .filter(|c| !budgets.iter().any(|b| b.category_id == c.id))
        .collect()
}

// ── Field checks ──────────────────────────────────────────────

/// Cents are the smallest unit an amount may carry.
const AMOUNT_DECIMAL_PLACES: u32 = 2;

/// Largest accepted amount, $999,999,999.99. Keeps every sum the
/// aggregations take far from `Decimal::MAX`.
fn max_amount() -> Decimal {
    Decimal::new(99_999_999_999, AMOUNT_DECIMAL_PLACES)
}

fn check_amount(raw: &str, errors: &mut FormErrors) -> Option<Decimal> {
    let cleaned = raw.trim().replace(['$', ','], "");
    if cleaned.is_empty() {
        errors.push(FieldError::AmountNotPositive);
        return None;
    }
    match Decimal::from_str(&cleaned) {
        Ok(amount) if amount <= Decimal::ZERO => {
            errors.push(FieldError::AmountNotPositive);
            None
        }
        Ok(amount) if amount > max_amount() => {
            errors.push(FieldError::AmountTooLarge);
            None
        }
        Ok(amount) if amount.normalize().scale() > AMOUNT_DECIMAL_PLACES => {
            errors.push(FieldError::AmountTooPrecise);
            None
        }
        Ok(amount) => Some(amount),
        Err(_) => {
            errors.push(FieldError::AmountNotANumber);
            None
        }
    }
}

fn check_category(raw: &str, kind: TransactionType) -> Result<&'static Category, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::CategoryRequired);
    }
    let category = Category::resolve(raw).ok_or_else(|| FieldError::UnknownCategory(raw.into()))?;
    if category.kind != kind {
        return Err(FieldError::CategoryTypeMismatch {
            category: category.name.to_string(),
            kind,
        });
    }
    Ok(category)
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod validate_tests;

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

fn expense_form(amount: &str, description: &str, category: &str) -> TransactionForm {
    let mut form = TransactionForm::new(TransactionType::Expense, today());
    form.amount = amount.into();
    form.description = description.into();
    form.category = category.into();
    form
}

fn budget_form(category: &str, amount: &str) -> BudgetForm {
    BudgetForm {
        category: category.into(),
        amount: amount.into(),
    }
}

// ── Transaction form ──────────────────────────────────────────

#[test]
fn test_valid_expense() {
    let draft = expense_form("12.50", "Lunch", "Food & Dining")
        .validate()
        .unwrap();
    assert_eq!(draft.amount, dec!(12.50));
    assert_eq!(draft.description, "Lunch");
    assert_eq!(draft.date, "2024-03-10");
    assert_eq!(draft.category, "Food & Dining");
    assert_eq!(draft.kind, TransactionType::Expense);
}

#[test]
fn test_new_form_defaults_to_today() {
    let form = TransactionForm::new(TransactionType::Income, today());
    assert_eq!(form.date, "2024-03-10");
    assert!(form.amount.is_empty());
}

#[test]
fn test_amount_zero_rejected() {
    let errors = expense_form("0", "Lunch", "Food & Dining")
        .validate()
        .unwrap_err();
    assert_eq!(errors.errors(), &[FieldError::AmountNotPositive]);
}

#[test]
fn test_amount_negative_rejected() {
    let errors = expense_form("-5", "Lunch", "Food & Dining")
        .validate()
        .unwrap_err();
    assert!(errors.contains(&FieldError::AmountNotPositive));
}

#[test]
fn test_amount_empty_rejected() {
    let errors = expense_form("  ", "Lunch", "Food & Dining")
        .validate()
        .unwrap_err();
    assert!(errors.contains(&FieldError::AmountNotPositive));
}

#[test]
fn test_amount_not_a_number() {
    let errors = expense_form("twelve", "Lunch", "Food & Dining")
        .validate()
        .unwrap_err();
    assert!(errors.contains(&FieldError::AmountNotANumber));
}

#[test]
fn test_amount_accepts_currency_formatting() {
    let draft = expense_form("$1,234.56", "Rent", "Bills & Utilities")
        .validate()
        .unwrap();
    assert_eq!(draft.amount, dec!(1234.56));
}

#[test]
fn test_amount_above_cap_rejected() {
    let errors = expense_form("79228162514264337593543950335", "Yacht", "Shopping")
        .validate()
        .unwrap_err();
    assert_eq!(errors.errors(), &[FieldError::AmountTooLarge]);

    let draft = expense_form("999999999.99", "House", "Shopping")
        .validate()
        .unwrap();
    assert_eq!(draft.amount, dec!(999999999.99));
    assert!(expense_form("1000000000", "House", "Shopping").validate().is_err());
}

#[test]
fn test_amount_limited_to_cents() {
    let errors = expense_form("0.0000000000000000000000000001", "Dust", "Shopping")
        .validate()
        .unwrap_err();
    assert_eq!(errors.errors(), &[FieldError::AmountTooPrecise]);
    assert!(expense_form("4.505", "Coffee", "Food & Dining").validate().is_err());

    // trailing zeros are not extra precision
    let draft = expense_form("4.500", "Coffee", "Food & Dining")
        .validate()
        .unwrap();
    assert_eq!(draft.amount, dec!(4.5));
}

#[test]
fn test_blank_description_rejected() {
    let errors = expense_form("10", "   ", "Food & Dining")
        .validate()
        .unwrap_err();
    assert_eq!(errors.errors(), &[FieldError::DescriptionRequired]);
}

#[test]
fn test_description_is_trimmed() {
    let draft = expense_form("10", "  Coffee  ", "Food & Dining")
        .validate()
        .unwrap();
    assert_eq!(draft.description, "Coffee");
}

#[test]
fn test_category_required() {
    let errors = expense_form("10", "Lunch", "").validate().unwrap_err();
    assert_eq!(errors.errors(), &[FieldError::CategoryRequired]);
}

#[test]
fn test_category_must_match_type() {
    let errors = expense_form("10", "Paycheck", "Salary")
        .validate()
        .unwrap_err();
    assert_eq!(
        errors.errors(),
        &[FieldError::CategoryTypeMismatch {
            category: "Salary".into(),
            kind: TransactionType::Expense,
        }]
    );
    assert_eq!(errors.to_string(), "Salary is not an expense category");
}

#[test]
fn test_unknown_category() {
    let errors = expense_form("10", "Kibble", "Pets").validate().unwrap_err();
    assert!(errors.contains(&FieldError::UnknownCategory("Pets".into())));
}

#[test]
fn test_category_normalized_to_registry_name() {
    let draft = expense_form("10", "Bus", "transportation")
        .validate()
        .unwrap();
    assert_eq!(draft.category, "Transportation");

    let draft = expense_form("10", "Bus", "5").validate().unwrap();
    assert_eq!(draft.category, "Transportation");
}

#[test]
fn test_invalid_date() {
    let mut form = expense_form("10", "Lunch", "Food & Dining");
    form.date = "03/10/2024".into();
    let errors = form.validate().unwrap_err();
    assert_eq!(errors.errors(), &[FieldError::InvalidDate]);
}

#[test]
fn test_all_errors_collected() {
    let errors = expense_form("", "", "").validate().unwrap_err();
    assert_eq!(errors.errors().len(), 3);
    assert_eq!(
        errors.to_string(),
        "Amount must be greater than 0; Description is required; Category is required"
    );
}

#[test]
fn test_form_from_transaction_revalidates() {
    let txn = Transaction {
        id: "x".into(),
        amount: dec!(99.95),
        description: "Concert".into(),
        date: "2024-02-14".into(),
        category: "Entertainment".into(),
        kind: TransactionType::Expense,
    };
    let draft = TransactionForm::from_transaction(&txn).validate().unwrap();
    assert_eq!(draft, txn.to_draft());
}

#[test]
fn test_set_fields() {
    let mut form = expense_form("10", "Lunch", "Food & Dining");
    form.set("amount", "20").unwrap();
    form.set("desc", "Dinner").unwrap();
    form.set("type", "income").unwrap();
    form.set("category", "Freelance").unwrap();
    let draft = form.validate().unwrap();
    assert_eq!(draft.amount, dec!(20));
    assert_eq!(draft.description, "Dinner");
    assert_eq!(draft.kind, TransactionType::Income);
    assert_eq!(draft.category, "Freelance");
}

#[test]
fn test_set_rejects_unknown_field_and_type() {
    let mut form = expense_form("10", "Lunch", "Food & Dining");
    assert!(form.set("colour", "red").is_err());
    assert!(form.set("type", "transfer").is_err());
    assert_eq!(form.kind, TransactionType::Expense);
}

// ── Budget form ───────────────────────────────────────────────

#[test]
fn test_valid_budget_by_id() {
    let budget = budget_form("4", "500").validate(&[]).unwrap();
    assert_eq!(budget.category_id, "4");
    assert_eq!(budget.amount, dec!(500));
}

#[test]
fn test_valid_budget_by_name() {
    let budget = budget_form("Healthcare", "80").validate(&[]).unwrap();
    assert_eq!(budget.category_id, "9");
}

#[test]
fn test_budget_requires_category() {
    let errors = budget_form("", "100").validate(&[]).unwrap_err();
    assert_eq!(errors.errors(), &[FieldError::CategoryRequired]);
}

#[test]
fn test_budget_rejects_income_category() {
    let errors = budget_form("1", "100").validate(&[]).unwrap_err();
    assert!(matches!(
        errors.errors(),
        [FieldError::CategoryTypeMismatch { .. }]
    ));
}

#[test]
fn test_budget_amount_must_be_positive() {
    let errors = budget_form("4", "0").validate(&[]).unwrap_err();
    assert_eq!(errors.errors(), &[FieldError::AmountNotPositive]);
}

#[test]
fn test_budget_amount_bounds() {
    let errors = budget_form("4", "0.0000000000000000000000000001")
        .validate(&[])
        .unwrap_err();
    assert_eq!(errors.errors(), &[FieldError::AmountTooPrecise]);

    let errors = budget_form("4", "79228162514264337593543950335")
        .validate(&[])
        .unwrap_err();
    assert_eq!(errors.errors(), &[FieldError::AmountTooLarge]);
}

#[test]
fn test_duplicate_budget_rejected() {
    let existing = vec![Budget::new("4".into(), dec!(300))];
    let errors = budget_form("Food & Dining", "500")
        .validate(&existing)
        .unwrap_err();
    assert_eq!(errors.errors(), &[FieldError::BudgetExists]);
    assert_eq!(errors.to_string(), "Budget already exists for this category");
}

#[test]
fn test_available_budget_categories() {
    let existing = vec![
        Budget::new("4".into(), dec!(300)),
        Budget::new("9".into(), dec!(50)),
    ];
    let available = available_budget_categories(&existing);
    assert_eq!(available.len(), 5);
    assert!(available.iter().all(|c| c.kind == TransactionType::Expense));
    assert!(!available.iter().any(|c| c.id == "4" || c.id == "9"));
}

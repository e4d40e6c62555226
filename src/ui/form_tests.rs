#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::form::*;
use crate::db::Database;
use crate::ledger::Ledger;
use crate::models::{Budget, TransactionType};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn ledger() -> Ledger {
    Ledger::load(Database::open_in_memory().unwrap())
}

fn type_str(form: &mut Form, s: &str) {
    for c in s.chars() {
        form.type_char(c);
    }
}

fn focus(form: &mut Form, field: Field) {
    while form.focused() != field {
        form.next_field();
    }
}

#[test]
fn test_new_transaction_defaults() {
    let form = Form::new_transaction(TransactionType::Expense, today());
    assert_eq!(form.title(), "Add Transaction");
    assert_eq!(form.focused(), Field::Type);
    assert_eq!(form.value(Field::Type), "expense");
    assert_eq!(form.value(Field::Date), "2024-06-15");
    assert_eq!(form.value(Field::Category), "");
}

#[test]
fn test_field_navigation_wraps() {
    let mut form = Form::new_transaction(TransactionType::Expense, today());
    form.prev_field();
    assert_eq!(form.focused(), Field::Date);
    form.next_field();
    assert_eq!(form.focused(), Field::Type);
}

#[test]
fn test_typing_only_edits_text_fields() {
    let mut form = Form::new_transaction(TransactionType::Expense, today());
    type_str(&mut form, "abc");
    assert_eq!(form.value(Field::Type), "expense");

    focus(&mut form, Field::Amount);
    type_str(&mut form, "12.55");
    form.backspace();
    assert_eq!(form.value(Field::Amount), "12.5");
}

#[test]
fn test_cycle_category_wraps() {
    let mut form = Form::new_transaction(TransactionType::Income, today());
    focus(&mut form, Field::Category);
    form.cycle(true);
    assert_eq!(form.value(Field::Category), "Salary");
    form.cycle(false);
    assert_eq!(form.value(Field::Category), "Investments");
    form.cycle(true);
    assert_eq!(form.value(Field::Category), "Salary");
}

#[test]
fn test_toggling_type_clears_mismatched_category() {
    let mut form = Form::new_transaction(TransactionType::Expense, today());
    focus(&mut form, Field::Category);
    form.cycle(true);
    assert_eq!(form.value(Field::Category), "Food & Dining");

    focus(&mut form, Field::Type);
    form.cycle(true);
    assert_eq!(form.value(Field::Type), "income");
    assert_eq!(form.value(Field::Category), "");
}

#[test]
fn test_submit_collects_errors_without_writing() {
    let mut ledger = ledger();
    let mut form = Form::new_transaction(TransactionType::Expense, today());
    let result = form.submit(&mut ledger).unwrap();
    assert!(result.is_none());
    assert!(form.errors.contains(&"Amount must be greater than 0".to_string()));
    assert!(form.errors.contains(&"Description is required".to_string()));
    assert!(form.errors.contains(&"Category is required".to_string()));
    assert!(ledger.transactions().is_empty());
}

#[test]
fn test_submit_adds_transaction() {
    let mut ledger = ledger();
    let mut form = Form::new_transaction(TransactionType::Expense, today());
    focus(&mut form, Field::Amount);
    type_str(&mut form, "12.50");
    focus(&mut form, Field::Description);
    type_str(&mut form, "  Lunch ");
    focus(&mut form, Field::Category);
    form.cycle(true);

    let status = form.submit(&mut ledger).unwrap();
    assert_eq!(status.as_deref(), Some("Added: Lunch"));
    let txn = &ledger.transactions()[0];
    assert_eq!(txn.amount, dec!(12.50));
    assert_eq!(txn.category, "Food & Dining");
    assert_eq!(txn.date, "2024-06-15");
}

#[test]
fn test_submit_edit_keeps_id() {
    let mut ledger = ledger();
    let mut add = Form::new_transaction(TransactionType::Income, today());
    focus(&mut add, Field::Amount);
    type_str(&mut add, "100");
    focus(&mut add, Field::Description);
    type_str(&mut add, "Paycheck");
    focus(&mut add, Field::Category);
    add.cycle(true);
    add.submit(&mut ledger).unwrap();
    let id = ledger.transactions()[0].id.clone();

    let mut edit = Form::edit_transaction(&ledger.transactions()[0]);
    assert_eq!(edit.title(), "Edit Transaction");
    assert_eq!(edit.focused(), Field::Amount);
    edit.type_char('0');
    edit.submit(&mut ledger).unwrap();

    assert_eq!(ledger.transactions().len(), 1);
    assert_eq!(ledger.transactions()[0].id, id);
    assert_eq!(ledger.transactions()[0].amount, dec!(1000));
}

#[test]
fn test_budget_form_offers_only_unbudgeted_categories() {
    let mut ledger = ledger();
    ledger.add_budget(Budget::new("4".into(), dec!(300))).unwrap();

    let mut form = Form::new_budget(&ledger);
    assert_eq!(form.focused(), Field::Category);
    form.cycle(true);
    assert_eq!(form.value(Field::Category), "Transportation");
}

#[test]
fn test_budget_form_submit() {
    let mut ledger = ledger();
    let mut form = Form::new_budget(&ledger);
    form.cycle(true);
    form.next_field();
    type_str(&mut form, "250");

    let status = form.submit(&mut ledger).unwrap();
    assert_eq!(status.as_deref(), Some("Budget set: Food & Dining"));
    assert_eq!(ledger.budgets().len(), 1);
    assert_eq!(ledger.budgets()[0].category_id, "4");
}

#[test]
fn test_budget_form_requires_category() {
    let mut ledger = ledger();
    let mut form = Form::new_budget(&ledger);
    form.next_field();
    type_str(&mut form, "250");
    assert!(form.submit(&mut ledger).unwrap().is_none());
    assert_eq!(form.errors, vec!["Category is required".to_string()]);
    assert!(ledger.budgets().is_empty());
}

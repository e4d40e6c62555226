#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::app::{App, InputMode, PendingAction, Screen};
use super::commands::*;
use crate::analytics::{SortKey, SortOrder};
use crate::db::Database;
use crate::ledger::Ledger;

fn setup() -> (App, Ledger) {
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    (App::new(today), Ledger::load(Database::open_in_memory().unwrap()))
}

#[test]
fn test_quick_add_multi_word_category() {
    let (mut app, mut ledger) = setup();
    handle_command(
        "add expense 12.50 food & dining Lunch with Sam",
        &mut app,
        &mut ledger,
    )
    .unwrap();

    let txn = &ledger.transactions()[0];
    assert_eq!(txn.category, "Food & Dining");
    assert_eq!(txn.description, "Lunch with Sam");
    assert_eq!(txn.amount, dec!(12.50));
    assert_eq!(txn.date, "2024-06-15");
    assert_eq!(app.screen, Screen::Transactions);
}

#[test]
fn test_quick_add_reports_every_error() {
    let (mut app, mut ledger) = setup();
    handle_command("add income -5 Groceries", &mut app, &mut ledger).unwrap();
    assert!(ledger.transactions().is_empty());
    assert!(app.status_message.contains("Amount must be greater than 0"));
    assert!(app.status_message.contains("Description is required"));
    assert!(app.status_message.contains("Unknown category"));
}

#[test]
fn test_quick_add_rejects_wrong_type_category() {
    let (mut app, mut ledger) = setup();
    handle_command("add income 100 Shopping refund", &mut app, &mut ledger).unwrap();
    assert!(ledger.transactions().is_empty());
}

#[test]
fn test_add_without_args_opens_form() {
    let (mut app, mut ledger) = setup();
    handle_command("add income", &mut app, &mut ledger).unwrap();
    assert_eq!(app.input_mode, InputMode::Form);
    let form = app.form.as_ref().unwrap();
    assert_eq!(form.title(), "Add Transaction");
    assert_eq!(form.value(super::form::Field::Type), "income");
}

#[test]
fn test_delete_txn_confirm_flow() {
    let (mut app, mut ledger) = setup();
    handle_command("add expense 3 Shopping Socks", &mut app, &mut ledger).unwrap();
    assert_eq!(ledger.transactions().len(), 1);

    handle_command("delete-txn", &mut app, &mut ledger).unwrap();
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(app.confirm_message, "Delete 'Socks'?");

    let action = app.pending_action.take().unwrap();
    assert!(matches!(action, PendingAction::DeleteTransaction { .. }));
    run_pending_action(action, &mut app, &mut ledger).unwrap();
    assert!(ledger.transactions().is_empty());
    assert_eq!(app.status_message, "Deleted: Socks");
}

#[test]
fn test_delete_txn_needs_transactions_screen() {
    let (mut app, mut ledger) = setup();
    handle_command("add expense 3 Shopping Socks", &mut app, &mut ledger).unwrap();
    app.screen = Screen::Dashboard;
    handle_command("delete-txn", &mut app, &mut ledger).unwrap();
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.pending_action.is_none());
}

#[test]
fn test_budget_duplicate_rejected() {
    let (mut app, mut ledger) = setup();
    handle_command("budget Food & Dining 500", &mut app, &mut ledger).unwrap();
    assert_eq!(ledger.budgets().len(), 1);
    assert_eq!(app.screen, Screen::Budgets);
    assert_eq!(app.status_message, "Budget set: Food & Dining = $500.00");

    handle_command("budget food & dining 900", &mut app, &mut ledger).unwrap();
    assert_eq!(ledger.budgets().len(), 1);
    assert_eq!(ledger.budgets()[0].amount, dec!(500));
    assert_eq!(app.status_message, "Budget already exists for this category");
}

#[test]
fn test_budget_status_uses_currency_format() {
    let (mut app, mut ledger) = setup();
    handle_command("budget Bills & Utilities 1234.5", &mut app, &mut ledger).unwrap();
    assert_eq!(app.status_message, "Budget set: Bills & Utilities = $1,234.50");
}

#[test]
fn test_budget_rejects_income_category() {
    let (mut app, mut ledger) = setup();
    handle_command("budget Salary 500", &mut app, &mut ledger).unwrap();
    assert!(ledger.budgets().is_empty());
}

#[test]
fn test_delete_budget_confirm_flow() {
    let (mut app, mut ledger) = setup();
    handle_command("budget Healthcare 80", &mut app, &mut ledger).unwrap();
    handle_command("delete-budget", &mut app, &mut ledger).unwrap();
    assert_eq!(app.confirm_message, "Delete budget for 'Healthcare'?");

    let action = app.pending_action.take().unwrap();
    run_pending_action(action, &mut app, &mut ledger).unwrap();
    assert!(ledger.budgets().is_empty());
}

#[test]
fn test_sort_command() {
    let (mut app, mut ledger) = setup();
    handle_command("sort amount asc", &mut app, &mut ledger).unwrap();
    assert_eq!(app.sort_key, SortKey::Amount);
    assert_eq!(app.sort_order, SortOrder::Ascending);

    handle_command("sort", &mut app, &mut ledger).unwrap();
    assert_eq!(app.sort_order, SortOrder::Descending);

    handle_command("sort size", &mut app, &mut ledger).unwrap();
    assert_eq!(app.sort_key, SortKey::Amount);
}

#[test]
fn test_unknown_command_suggests() {
    let (mut app, mut ledger) = setup();
    handle_command("budgt", &mut app, &mut ledger).unwrap();
    assert!(app.status_message.starts_with("Unknown command: :budgt"));
}

#[test]
fn test_navigation_commands() {
    let (mut app, mut ledger) = setup();
    handle_command("charts", &mut app, &mut ledger).unwrap();
    assert_eq!(app.screen, Screen::Charts);
    handle_command("b", &mut app, &mut ledger).unwrap();
    assert_eq!(app.screen, Screen::Budgets);
    handle_command("q", &mut app, &mut ledger).unwrap();
    assert!(!app.running);
}

#[test]
fn test_export_command_writes_file() {
    let (mut app, mut ledger) = setup();
    handle_command("add income 100 Salary June", &mut app, &mut ledger).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    handle_command(
        &format!("export {}", path.display()),
        &mut app,
        &mut ledger,
    )
    .unwrap();
    assert!(path.exists());
    assert!(app.status_message.starts_with("Exported 1 transactions"));
}

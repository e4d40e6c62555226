#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::TransactionType;
use rust_decimal_macros::dec;

fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: "t2".into(),
            amount: dec!(42.99),
            description: "Groceries".into(),
            date: "2024-01-15".into(),
            category: "Food & Dining".into(),
            kind: TransactionType::Expense,
        },
        Transaction {
            id: "t1".into(),
            amount: dec!(3000.00),
            description: "Salary Deposit".into(),
            date: "2024-01-01".into(),
            category: "Salary".into(),
            kind: TransactionType::Income,
        },
    ]
}

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_schema_version_recorded() {
    let db = Database::open_in_memory().unwrap();
    let version: i32 = db
        .conn
        .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}

#[test]
fn test_migrate_is_idempotent() {
    let mut db = Database::open_in_memory().unwrap();
    db.put("k", "v").unwrap();
    db.migrate().unwrap();
    assert_eq!(db.get("k").unwrap().as_deref(), Some("v"));
}

// ── Key-value access ──────────────────────────────────────────

#[test]
fn test_get_missing_key() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get("nothing").unwrap().is_none());
}

#[test]
fn test_put_overwrites() {
    let db = Database::open_in_memory().unwrap();
    db.put("k", "first").unwrap();
    db.put("k", "second").unwrap();
    assert_eq!(db.get("k").unwrap().as_deref(), Some("second"));

    let rows: i64 = db
        .conn
        .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn test_put_many_writes_every_key() {
    let mut db = Database::open_in_memory().unwrap();
    db.put_many(&[("a", "1".into()), ("b", "2".into())]).unwrap();
    assert_eq!(db.get("a").unwrap().as_deref(), Some("1"));
    assert_eq!(db.get("b").unwrap().as_deref(), Some("2"));
}

// ── Record collections ────────────────────────────────────────

#[test]
fn test_load_missing_collection_is_empty() {
    let db = Database::open_in_memory().unwrap();
    let txns: Vec<Transaction> = db.load_records(TRANSACTIONS_KEY);
    assert!(txns.is_empty());
}

#[test]
fn test_save_and_load_transactions() {
    let db = Database::open_in_memory().unwrap();
    let txns = sample_transactions();
    db.save_records(TRANSACTIONS_KEY, &txns).unwrap();

    let loaded: Vec<Transaction> = db.load_records(TRANSACTIONS_KEY);
    assert_eq!(loaded, txns);
}

#[test]
fn test_save_preserves_order() {
    let db = Database::open_in_memory().unwrap();
    db.save_records(TRANSACTIONS_KEY, &sample_transactions())
        .unwrap();
    let loaded: Vec<Transaction> = db.load_records(TRANSACTIONS_KEY);
    let ids: Vec<&str> = loaded.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t2", "t1"]);
}

#[test]
fn test_corrupt_collection_loads_empty() {
    let db = Database::open_in_memory().unwrap();
    db.put(TRANSACTIONS_KEY, "{not json").unwrap();
    let loaded: Vec<Transaction> = db.load_records(TRANSACTIONS_KEY);
    assert!(loaded.is_empty());
}

#[test]
fn test_wrong_shape_loads_empty() {
    let db = Database::open_in_memory().unwrap();
    db.put(BUDGETS_KEY, r#"{"categoryId":"4"}"#).unwrap();
    let loaded: Vec<Budget> = db.load_records(BUDGETS_KEY);
    assert!(loaded.is_empty());
}

#[test]
fn test_reads_legacy_numeric_json() {
    let db = Database::open_in_memory().unwrap();
    db.put(
        BUDGETS_KEY,
        r#"[{"categoryId":"4","amount":500,"spent":0},{"categoryId":"5","amount":120.5,"spent":0}]"#,
    )
    .unwrap();
    let loaded: Vec<Budget> = db.load_records(BUDGETS_KEY);
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].amount, dec!(500));
    assert_eq!(loaded[1].amount, dec!(120.5));
}

#[test]
fn test_collections_are_independent() {
    let db = Database::open_in_memory().unwrap();
    db.save_records(TRANSACTIONS_KEY, &sample_transactions())
        .unwrap();
    let budgets: Vec<Budget> = db.load_records(BUDGETS_KEY);
    assert!(budgets.is_empty());
}

#[test]
fn test_save_all() {
    let mut db = Database::open_in_memory().unwrap();
    let txns = sample_transactions();
    let budgets = vec![Budget::new("4".into(), dec!(300))];
    db.save_all(&txns, &budgets).unwrap();

    let loaded_txns: Vec<Transaction> = db.load_records(TRANSACTIONS_KEY);
    let loaded_budgets: Vec<Budget> = db.load_records(BUDGETS_KEY);
    assert_eq!(loaded_txns, txns);
    assert_eq!(loaded_budgets, budgets);
}

#[test]
fn test_file_database_persists_between_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fintrack.db");

    {
        let db = Database::open(&path).unwrap();
        db.save_records(TRANSACTIONS_KEY, &sample_transactions())
            .unwrap();
    }

    let db = Database::open(&path).unwrap();
    let loaded: Vec<Transaction> = db.load_records(TRANSACTIONS_KEY);
    assert_eq!(loaded.len(), 2);
}

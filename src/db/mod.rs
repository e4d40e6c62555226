mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

use crate::models::{Budget, Transaction};

/// Logical key of the transaction collection.
pub(crate) const TRANSACTIONS_KEY: &str = "transactions";
/// Logical key of the budget collection.
pub(crate) const BUDGETS_KEY: &str = "budgets";

/// Key-value store holding each record collection as one JSON document.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(db)
    }

    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        // Check if schema_version table exists
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            tracing::info!(from = current, to = schema::CURRENT_VERSION, "migrated schema");
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Raw key-value access ──────────────────────────────────

    pub(crate) fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM records WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?)
    }

    pub(crate) fn put(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Write several keys in one SQLite transaction: all or nothing.
    pub(crate) fn put_many(&mut self, entries: &[(&str, String)]) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        for (key, value) in entries {
            tx.execute(
                "INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    // ── Record collections ────────────────────────────────────

    /// Load a collection. Missing, unreadable or corrupt data yields an
    /// empty collection.
    pub(crate) fn load_records<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key, error = %e, "could not read records, starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(key, error = %e, "stored records are corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Overwrite a whole collection.
    pub(crate) fn save_records<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let json = serde_json::to_string(records)
            .with_context(|| format!("Failed to serialize {key}"))?;
        self.put(key, &json)
            .with_context(|| format!("Failed to save {key}"))?;
        tracing::debug!(key, count = records.len(), "saved records");
        Ok(())
    }

    /// Overwrite both collections atomically.
    pub(crate) fn save_all(&mut self, transactions: &[Transaction], budgets: &[Budget]) -> Result<()> {
        let entries = [
            (
                TRANSACTIONS_KEY,
                serde_json::to_string(transactions).context("Failed to serialize transactions")?,
            ),
            (
                BUDGETS_KEY,
                serde_json::to_string(budgets).context("Failed to serialize budgets")?,
            ),
        ];
        self.put_many(&entries).context("Failed to save records")?;
        tracing::debug!(
            transactions = transactions.len(),
            budgets = budgets.len(),
            "saved all records"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests;

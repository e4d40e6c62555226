use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::analytics::{in_month, YearMonth};
use crate::models::{Transaction, TransactionType};

#[derive(Serialize)]
struct ExportRow<'a> {
    id: &'a str,
    date: &'a str,
    #[serde(rename = "type")]
    kind: TransactionType,
    category: &'a str,
    description: &'a str,
    amount: Decimal,
}

impl<'a> From<&'a Transaction> for ExportRow<'a> {
    fn from(txn: &'a Transaction) -> Self {
        Self {
            id: &txn.id,
            date: &txn.date,
            kind: txn.kind,
            category: &txn.category,
            description: &txn.description,
            amount: txn.amount,
        }
    }
}

/// Write transactions as CSV in ledger order, optionally limited to one
/// month. Returns the number of rows written.
pub(crate) fn write_csv<W: Write>(
    out: W,
    transactions: &[Transaction],
    month: Option<YearMonth>,
) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(out);

    let rows: Vec<&Transaction> = match month {
        Some(m) => in_month(transactions, m).collect(),
        None => transactions.iter().collect(),
    };

    for txn in &rows {
        writer
            .serialize(ExportRow::from(*txn))
            .context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV output")?;
    Ok(rows.len())
}

pub(crate) fn export_to_path(
    path: &Path,
    transactions: &[Transaction],
    month: Option<YearMonth>,
) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let count = write_csv(file, transactions, month)?;
    tracing::info!(path = %path.display(), count, "exported transactions");
    Ok(count)
}

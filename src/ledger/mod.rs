mod id;
pub(crate) mod validate;

use anyhow::Result;
use rust_decimal::Decimal;

use crate::db::{Database, BUDGETS_KEY, TRANSACTIONS_KEY};
use crate::models::{Budget, Transaction, TransactionDraft};

/// In-memory record store. Every effective mutation is written through to
/// the database before returning.
pub(crate) struct Ledger {
    db: Database,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
}

impl Ledger {
    pub(crate) fn load(db: Database) -> Self {
        let transactions: Vec<Transaction> = db.load_records(TRANSACTIONS_KEY);
        let budgets: Vec<Budget> = db.load_records(BUDGETS_KEY);
        tracing::info!(
            transactions = transactions.len(),
            budgets = budgets.len(),
            "loaded ledger"
        );
        Self {
            db,
            transactions,
            budgets,
        }
    }

    /// Most recent first.
    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub(crate) fn find_transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub(crate) fn find_budget(&self, category_id: &str) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.category_id == category_id)
    }

    // ── Transactions ──────────────────────────────────────────

    /// Prepend a new transaction and return its generated id.
    pub(crate) fn add_transaction(&mut self, draft: TransactionDraft) -> Result<String> {
        let id = id::generate_id(chrono::Utc::now());
        self.transactions
            .insert(0, Transaction::from_draft(id.clone(), draft));
        self.save_transactions()?;
        tracing::info!(id = %id, "added transaction");
        Ok(id)
    }

    /// Replace the transaction with `id`, keeping the id. Returns `false`
    /// and writes nothing when no such transaction exists.
    pub(crate) fn update_transaction(&mut self, id: &str, draft: TransactionDraft) -> Result<bool> {
        let Some(slot) = self.transactions.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        *slot = Transaction::from_draft(id.to_string(), draft);
        self.save_transactions()?;
        tracing::info!(id, "updated transaction");
        Ok(true)
    }

    pub(crate) fn delete_transaction(&mut self, id: &str) -> Result<bool> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() == before {
            return Ok(false);
        }
        self.save_transactions()?;
        tracing::info!(id, "deleted transaction");
        Ok(true)
    }

    // ── Budgets ───────────────────────────────────────────────

    /// Append a budget. Duplicate categories are the caller's concern;
    /// see [`validate::BudgetForm`].
    pub(crate) fn add_budget(&mut self, budget: Budget) -> Result<()> {
        tracing::info!(category_id = %budget.category_id, amount = %budget.amount, "added budget");
        self.budgets.push(budget);
        self.save_budgets()
    }

    pub(crate) fn update_budget(&mut self, category_id: &str, amount: Decimal) -> Result<bool> {
        let Some(budget) = self
            .budgets
            .iter_mut()
            .find(|b| b.category_id == category_id)
        else {
            return Ok(false);
        };
        budget.amount = amount;
        self.save_budgets()?;
        tracing::info!(category_id, amount = %amount, "updated budget");
        Ok(true)
    }

    pub(crate) fn delete_budget(&mut self, category_id: &str) -> Result<bool> {
        let before = self.budgets.len();
        self.budgets.retain(|b| b.category_id != category_id);
        if self.budgets.len() == before {
            return Ok(false);
        }
        self.save_budgets()?;
        tracing::info!(category_id, "deleted budget");
        Ok(true)
    }

    // ── Persistence ───────────────────────────────────────────

    /// Write both collections in a single atomic step.
    pub(crate) fn save_all(&mut self) -> Result<()> {
        self.db.save_all(&self.transactions, &self.budgets)
    }

    fn save_transactions(&self) -> Result<()> {
        self.db.save_records(TRANSACTIONS_KEY, &self.transactions)
    }

    fn save_budgets(&self) -> Result<()> {
        self.db.save_records(BUDGETS_KEY, &self.budgets)
    }
}

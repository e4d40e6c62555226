use chrono::NaiveDate;

use super::form::Form;
use super::util::clamp_cursor;
use crate::analytics::{sorted_transactions, SortKey, SortOrder};
use crate::ledger::Ledger;
use crate::models::{Budget, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Budgets,
    Charts,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Transactions,
            Self::Budgets,
            Self::Charts,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Budgets => write!(f, "Budgets"),
            Self::Charts => write!(f, "Charts"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Form,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Form => write!(f, "FORM"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: String, description: String },
    DeleteBudget { category_id: String, name: String },
}

/// View state only. Records live in the [`Ledger`] and every derived figure
/// is recomputed from it at render time.
pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) today: NaiveDate,

    // Transactions
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,
    pub(crate) sort_key: SortKey,
    pub(crate) sort_order: SortOrder,

    // Budgets
    pub(crate) budget_index: usize,
    pub(crate) budget_scroll: usize,

    pub(crate) form: Option<Form>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(today: NaiveDate) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            today,

            transaction_index: 0,
            transaction_scroll: 0,
            sort_key: SortKey::Date,
            sort_order: SortOrder::Descending,

            budget_index: 0,
            budget_scroll: 0,

            form: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Transactions in the order the list view shows them.
    pub(crate) fn transaction_rows<'a>(&self, ledger: &'a Ledger) -> Vec<&'a Transaction> {
        sorted_transactions(ledger.transactions(), self.sort_key, self.sort_order)
    }

    pub(crate) fn selected_transaction<'a>(&self, ledger: &'a Ledger) -> Option<&'a Transaction> {
        self.transaction_rows(ledger)
            .get(self.transaction_index)
            .copied()
    }

    pub(crate) fn selected_budget<'a>(&self, ledger: &'a Ledger) -> Option<&'a Budget> {
        ledger.budgets().get(self.budget_index)
    }

    /// Rows visible in a bordered table with a header line.
    pub(crate) fn page(&self) -> usize {
        self.visible_rows.saturating_sub(1).max(1)
    }

    /// Keep cursors inside their lists after a delete.
    pub(crate) fn clamp_selections(&mut self, ledger: &Ledger) {
        clamp_cursor(
            &mut self.transaction_index,
            &mut self.transaction_scroll,
            ledger.transactions().len(),
        );
        clamp_cursor(
            &mut self.budget_index,
            &mut self.budget_scroll,
            ledger.budgets().len(),
        );
    }

    pub(crate) fn open_form(&mut self, form: Form) {
        self.form = Some(form);
        self.input_mode = InputMode::Form;
    }

    pub(crate) fn close_form(&mut self) {
        self.form = None;
        self.input_mode = InputMode::Normal;
    }

    pub(crate) fn confirm(&mut self, message: String, action: PendingAction) {
        self.confirm_message = message;
        self.pending_action = Some(action);
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

use anyhow::Result;
use chrono::NaiveDate;

use crate::ledger::validate::{available_budget_categories, BudgetForm, TransactionForm};
use crate::ledger::Ledger;
use crate::models::{Category, Transaction, TransactionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Type,
    Amount,
    Description,
    Category,
    Date,
}

const TRANSACTION_FIELDS: &[Field] = &[
    Field::Type,
    Field::Amount,
    Field::Description,
    Field::Category,
    Field::Date,
];
const BUDGET_FIELDS: &[Field] = &[Field::Category, Field::Amount];

impl Field {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Type => "Type",
            Self::Amount => "Amount",
            Self::Description => "Description",
            Self::Category => "Category",
            Self::Date => "Date",
        }
    }

    /// Choice fields are cycled with left/right instead of typed into.
    pub(crate) fn is_choice(self) -> bool {
        matches!(self, Self::Type | Self::Category)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FormInput {
    Transaction {
        /// Id of the transaction being edited, `None` when adding.
        editing: Option<String>,
        input: TransactionForm,
    },
    Budget(BudgetForm),
}

/// Modal form state. Validation errors from the last submit are kept so
/// the overlay can show them under the fields.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Form {
    pub(crate) input: FormInput,
    pub(crate) focus: usize,
    pub(crate) errors: Vec<String>,
    choices: Vec<&'static Category>,
}

impl Form {
    pub(crate) fn new_transaction(kind: TransactionType, today: NaiveDate) -> Self {
        Self {
            input: FormInput::Transaction {
                editing: None,
                input: TransactionForm::new(kind, today),
            },
            focus: 0,
            errors: Vec::new(),
            choices: Category::list(kind),
        }
    }

    pub(crate) fn edit_transaction(txn: &Transaction) -> Self {
        Self {
            input: FormInput::Transaction {
                editing: Some(txn.id.clone()),
                input: TransactionForm::from_transaction(txn),
            },
            focus: 1,
            errors: Vec::new(),
            choices: Category::list(txn.kind),
        }
    }

    pub(crate) fn new_budget(ledger: &Ledger) -> Self {
        Self {
            input: FormInput::Budget(BudgetForm {
                category: String::new(),
                amount: String::new(),
            }),
            focus: 0,
            errors: Vec::new(),
            choices: available_budget_categories(ledger.budgets()),
        }
    }

    pub(crate) fn title(&self) -> &'static str {
        match &self.input {
            FormInput::Transaction { editing: Some(_), .. } => "Edit Transaction",
            FormInput::Transaction { editing: None, .. } => "Add Transaction",
            FormInput::Budget(_) => "Add Budget",
        }
    }

    pub(crate) fn fields(&self) -> &'static [Field] {
        match self.input {
            FormInput::Transaction { .. } => TRANSACTION_FIELDS,
            FormInput::Budget(_) => BUDGET_FIELDS,
        }
    }

    pub(crate) fn focused(&self) -> Field {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub(crate) fn value(&self, field: Field) -> &str {
        match (&self.input, field) {
            (FormInput::Transaction { input, .. }, Field::Type) => input.kind.as_str(),
            (FormInput::Transaction { input, .. }, Field::Amount) => &input.amount,
            (FormInput::Transaction { input, .. }, Field::Description) => &input.description,
            (FormInput::Transaction { input, .. }, Field::Category) => &input.category,
            (FormInput::Transaction { input, .. }, Field::Date) => &input.date,
            (FormInput::Budget(input), Field::Amount) => &input.amount,
            (FormInput::Budget(input), Field::Category) => &input.category,
            (FormInput::Budget(_), _) => "",
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match (&mut self.input, field) {
            (FormInput::Transaction { input, .. }, Field::Amount) => Some(&mut input.amount),
            (FormInput::Transaction { input, .. }, Field::Description) => {
                Some(&mut input.description)
            }
            (FormInput::Transaction { input, .. }, Field::Date) => Some(&mut input.date),
            (FormInput::Budget(input), Field::Amount) => Some(&mut input.amount),
            _ => None,
        }
    }

    pub(crate) fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields().len();
    }

    pub(crate) fn prev_field(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    pub(crate) fn type_char(&mut self, c: char) {
        let field = self.focused();
        if let Some(text) = self.text_mut(field) {
            text.push(c);
        }
    }

    pub(crate) fn backspace(&mut self) {
        let field = self.focused();
        if let Some(text) = self.text_mut(field) {
            text.pop();
        }
    }

    /// Step a choice field forwards or backwards through its options.
    pub(crate) fn cycle(&mut self, forward: bool) {
        match self.focused() {
            Field::Type => self.toggle_kind(),
            Field::Category => self.cycle_category(forward),
            _ => {}
        }
    }

    fn toggle_kind(&mut self) {
        if let FormInput::Transaction { input, .. } = &mut self.input {
            input.kind = match input.kind {
                TransactionType::Income => TransactionType::Expense,
                TransactionType::Expense => TransactionType::Income,
            };
            self.choices = Category::list(input.kind);
            if !self.choices.iter().any(|c| c.name == input.category) {
                input.category.clear();
            }
        }
    }

    fn cycle_category(&mut self, forward: bool) {
        if self.choices.is_empty() {
            return;
        }
        let len = self.choices.len();
        let current = match &self.input {
            FormInput::Transaction { input, .. } => &input.category,
            FormInput::Budget(input) => &input.category,
        };
        let next = match self.choices.iter().position(|c| c.name == current.as_str()) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        let name = self.choices[next].name.to_string();
        match &mut self.input {
            FormInput::Transaction { input, .. } => input.category = name,
            FormInput::Budget(input) => input.category = name,
        }
    }

    /// Validate and apply the form. Returns a status message on success;
    /// on validation failure the errors are stored and `None` is returned.
    pub(crate) fn submit(&mut self, ledger: &mut Ledger) -> Result<Option<String>> {
        match &self.input {
            FormInput::Transaction { editing, input } => {
                let draft = match input.validate() {
                    Ok(draft) => draft,
                    Err(errors) => {
                        self.errors = errors.errors().iter().map(|e| e.to_string()).collect();
                        return Ok(None);
                    }
                };
                let description = draft.description.clone();
                match editing {
                    Some(id) => {
                        if ledger.update_transaction(id, draft)? {
                            Ok(Some(format!("Updated: {description}")))
                        } else {
                            Ok(Some("Transaction no longer exists".into()))
                        }
                    }
                    None => {
                        ledger.add_transaction(draft)?;
                        Ok(Some(format!("Added: {description}")))
                    }
                }
            }
            FormInput::Budget(input) => match input.validate(ledger.budgets()) {
                Ok(budget) => {
                    let label = budget
                        .category()
                        .map_or_else(|| budget.category_id.clone(), |c| c.name.to_string());
                    ledger.add_budget(budget)?;
                    Ok(Some(format!("Budget set: {label}")))
                }
                Err(errors) => {
                    self.errors = errors.errors().iter().map(|e| e.to_string()).collect();
                    Ok(None)
                }
            },
        }
    }
}

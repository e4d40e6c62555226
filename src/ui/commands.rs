use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, PendingAction, Screen};
use super::form::Form;
use super::util::format_amount;
use crate::analytics::{SortKey, SortOrder};
use crate::ledger::validate::{BudgetForm, TransactionForm};
use crate::ledger::Ledger;
use crate::models::{Category, TransactionType};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Ledger) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Fintrack", cmd_quit, r);
    register_command!("quit", "Quit Fintrack", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("c", "Go to Charts", cmd_charts, r);
    register_command!("charts", "Go to Charts", cmd_charts, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add transaction (e.g. :add expense 12.50 Food & Dining Lunch)",
        cmd_add,
        r
    );
    register_command!("a", "Add transaction", cmd_add, r);
    register_command!("edit", "Edit selected transaction", cmd_edit, r);
    register_command!("e", "Edit selected transaction", cmd_edit, r);
    register_command!(
        "delete-txn",
        "Delete selected transaction",
        cmd_delete_txn,
        r
    );
    register_command!(
        "budget",
        "Set budget (e.g. :budget Food & Dining 500)",
        cmd_budget,
        r
    );
    register_command!(
        "delete-budget",
        "Delete selected budget",
        cmd_delete_budget,
        r
    );
    register_command!(
        "sort",
        "Sort transactions (e.g. :sort amount asc)",
        cmd_sort,
        r
    );
    register_command!(
        "export",
        "Export transactions to CSV (e.g. :export ~/fintrack.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, ledger)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Carry out a confirmed action.
pub(crate) fn run_pending_action(
    action: PendingAction,
    app: &mut App,
    ledger: &mut Ledger,
) -> anyhow::Result<()> {
    match action {
        PendingAction::DeleteTransaction { id, description } => {
            if ledger.delete_transaction(&id)? {
                app.set_status(format!("Deleted: {description}"));
            } else {
                app.set_status("Transaction no longer exists");
            }
        }
        PendingAction::DeleteBudget { category_id, name } => {
            if ledger.delete_budget(&category_id)? {
                app.set_status(format!("Deleted budget: {name}"));
            } else {
                app.set_status("Budget no longer exists");
            }
        }
    }
    app.clamp_selections(ledger);
    Ok(())
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    Ok(())
}

fn cmd_charts(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Charts;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let mut words = args.splitn(2, ' ');
    let kind_word = words.next().unwrap_or("");
    let rest = words.next().unwrap_or("").trim();

    let kind = if kind_word.is_empty() {
        TransactionType::Expense
    } else {
        match TransactionType::parse(kind_word) {
            Some(kind) => kind,
            None => {
                app.set_status("Usage: :add [income|expense] <amount> <category> <description>");
                return Ok(());
            }
        }
    };

    if rest.is_empty() {
        app.open_form(Form::new_transaction(kind, app.today));
        return Ok(());
    }

    let form = quick_form(kind, rest, app);
    match form.validate() {
        Ok(draft) => {
            let description = draft.description.clone();
            ledger.add_transaction(draft)?;
            app.screen = Screen::Transactions;
            app.set_status(format!("Added: {description}"));
        }
        Err(errors) => app.set_status(errors.to_string()),
    }
    Ok(())
}

/// `<amount> <category> <description>`, where the category is matched as
/// the longest known name at the start of the remaining text.
fn quick_form(kind: TransactionType, args: &str, app: &App) -> TransactionForm {
    let mut form = TransactionForm::new(kind, app.today);
    let mut parts = args.splitn(2, ' ');
    form.amount = parts.next().unwrap_or("").to_string();
    let rest = parts.next().unwrap_or("").trim();

    match Category::split_leading(rest, Some(kind)) {
        Some((category, description)) => {
            form.category = category.name.to_string();
            form.description = description.to_string();
        }
        None => {
            let mut words = rest.splitn(2, ' ');
            form.category = words.next().unwrap_or("").to_string();
            form.description = words.next().unwrap_or("").to_string();
        }
    }
    form
}

fn cmd_edit(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions {
        app.set_status("Navigate to Transactions and select one first");
        return Ok(());
    }
    match app.selected_transaction(ledger) {
        Some(txn) => {
            let form = Form::edit_transaction(txn);
            app.open_form(form);
        }
        None => app.set_status("No transaction selected"),
    }
    Ok(())
}

fn cmd_delete_txn(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions {
        app.set_status("Navigate to Transactions and select one first");
        return Ok(());
    }

    if let Some(txn) = app.selected_transaction(ledger) {
        let action = PendingAction::DeleteTransaction {
            id: txn.id.clone(),
            description: txn.description.clone(),
        };
        app.confirm(format!("Delete '{}'?", txn.description), action);
    } else {
        app.set_status("No transactions to delete");
    }

    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if args.is_empty() {
        app.open_form(Form::new_budget(ledger));
        return Ok(());
    }

    // Last token is the amount, everything before is the category
    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :budget <category> <amount>");
        return Ok(());
    }

    let form = BudgetForm {
        category: parts[1].to_string(),
        amount: parts[0].to_string(),
    };
    match form.validate(ledger.budgets()) {
        Ok(budget) => {
            let name = budget
                .category()
                .map_or_else(|| budget.category_id.clone(), |c| c.name.to_string());
            let amount = budget.amount;
            ledger.add_budget(budget)?;
            app.screen = Screen::Budgets;
            app.set_status(format!("Budget set: {name} = {}", format_amount(amount)));
        }
        Err(errors) => app.set_status(errors.to_string()),
    }
    Ok(())
}

fn cmd_delete_budget(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if app.screen != Screen::Budgets {
        app.set_status("Navigate to Budgets and select one first");
        return Ok(());
    }

    if let Some(budget) = app.selected_budget(ledger) {
        let name = budget
            .category()
            .map_or(crate::models::UNKNOWN_CATEGORY, |c| c.name)
            .to_string();
        let action = PendingAction::DeleteBudget {
            category_id: budget.category_id.clone(),
            name: name.clone(),
        };
        app.confirm(format!("Delete budget for '{name}'?"), action);
    } else {
        app.set_status("No budgets to delete");
    }

    Ok(())
}

fn cmd_sort(args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    let mut words = args.split_whitespace();
    match words.next() {
        None => app.sort_order = app.sort_order.toggled(),
        Some(word) => match SortKey::parse(word) {
            Some(key) => {
                app.sort_key = key;
                app.sort_order = match words.next() {
                    Some("asc") => SortOrder::Ascending,
                    Some("desc") | None => SortOrder::Descending,
                    Some(other) => {
                        app.set_status(format!("Unknown sort order: {other} (asc or desc)"));
                        return Ok(());
                    }
                };
            }
            None => {
                app.set_status("Usage: :sort [date|amount] [asc|desc]");
                return Ok(());
            }
        },
    }
    app.screen = Screen::Transactions;
    app.set_status(format!(
        "Sorted by {} {}",
        app.sort_key,
        app.sort_order.arrow()
    ));
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/fintrack-export.csv")
    } else {
        crate::run::shellexpand(args)
    };

    let count = crate::export::export_to_path(
        std::path::Path::new(&path),
        ledger.transactions(),
        None,
    )?;
    if count == 0 {
        app.set_status("No transactions to export");
    } else {
        app.set_status(format!("Exported {count} transactions to {path}"));
    }
    Ok(())
}

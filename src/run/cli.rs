use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;

use crate::analytics::{
    dashboard, monthly_rollup, sorted_transactions, SortKey, SortOrder, YearMonth,
};
use crate::ledger::validate::{available_budget_categories, BudgetForm, TransactionForm};
use crate::ledger::Ledger;
use crate::models::{Category, TransactionType, UNKNOWN_CATEGORY};
use crate::ui::util::{format_amount, format_date, format_percent, format_signed, truncate};

pub(crate) fn as_cli(args: &[String], ledger: &mut Ledger, today: NaiveDate) -> Result<()> {
    match args[1].as_str() {
        "add" => cli_add(&args[2..], ledger, today),
        "edit" => cli_edit(&args[2..], ledger),
        "delete" | "rm" => cli_delete(&args[2..], ledger),
        "list" | "ls" => cli_list(&args[2..], ledger),
        "summary" | "s" => cli_summary(ledger, today),
        "monthly" => cli_monthly(ledger),
        "categories" => cli_categories(&args[2..]),
        "budgets" => cli_budgets(ledger, today),
        "budget" => cli_budget(&args[2..], ledger),
        "export" => cli_export(&args[2..], ledger, today),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("fintrack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Fintrack - local-only personal finance tracker");
    println!();
    println!("Usage: fintrack [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                  Launch interactive TUI");
    println!("  add <income|expense> <amount> <category> <description>");
    println!("    --date <YYYY-MM-DD>                   Transaction date (default: today)");
    println!("  edit <id> [--amount X] [--description X] [--category X] [--date X] [--type X]");
    println!("  delete <id>                             Delete a transaction");
    println!("  list                                    List transactions");
    println!("    --sort <date|amount> --asc --limit N");
    println!("  summary                                 Current month dashboard");
    println!("  monthly                                 Income and expenses for the last 6 months");
    println!("  categories [income|expense]             List categories");
    println!("  budgets                                 Budgets against this month's spending");
    println!("  budget set <category> <amount>          Add a monthly budget");
    println!("  budget update <category> <amount>       Change an existing budget");
    println!("  budget rm <category>                    Remove a budget");
    println!("  export [path]                           Export transactions to CSV");
    println!("    --month <YYYY-MM>                     Only one month");
    println!("  --help, -h                              Show this help");
    println!("  --version, -V                           Show version");
}

// ── Argument helpers ─────────────────────────────────────────

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Arguments with `--flag value` pairs and bare `--flag` switches removed.
fn positional(args: &[String], valued_flags: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if valued_flags.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            out.push(arg.clone());
        }
    }
    out
}

fn parse_month(raw: &str) -> Result<YearMonth> {
    let date = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        .with_context(|| format!("Invalid month: {raw} (expected YYYY-MM)"))?;
    Ok(YearMonth::of(date))
}

// ── Transactions ─────────────────────────────────────────────

fn cli_add(args: &[String], ledger: &mut Ledger, today: NaiveDate) -> Result<()> {
    let words = positional(args, &["--date"]);
    if words.len() < 3 {
        anyhow::bail!("Usage: fintrack add <income|expense> <amount> <category> <description>");
    }

    let kind = TransactionType::parse(&words[0])
        .ok_or_else(|| anyhow::anyhow!("Type must be income or expense, got '{}'", words[0]))?;
    let mut form = TransactionForm::new(kind, today);
    form.amount = words[1].clone();
    if let Some(date) = flag_value(args, "--date") {
        form.date = date.to_string();
    }

    let rest = words[2..].join(" ");
    match Category::split_leading(&rest, Some(kind)) {
        Some((category, description)) => {
            form.category = category.name.to_string();
            form.description = description.to_string();
        }
        None => {
            form.category = words[2].clone();
            form.description = words[3..].join(" ");
        }
    }

    let draft = form.validate()?;
    let summary = format!(
        "{} {} {}",
        draft.description,
        format_signed(draft.kind, draft.amount),
        draft.category
    );
    let id = ledger.add_transaction(draft)?;
    println!("Added {id}: {summary}");
    Ok(())
}

fn cli_edit(args: &[String], ledger: &mut Ledger) -> Result<()> {
    const FIELDS: [&str; 5] = ["amount", "description", "category", "date", "type"];

    let id = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .ok_or_else(|| anyhow::anyhow!("Usage: fintrack edit <id> [--field value]..."))?;
    let txn = ledger
        .find_transaction(id)
        .ok_or_else(|| anyhow::anyhow!("Transaction not found: {id}"))?;

    let mut form = TransactionForm::from_transaction(txn);
    let mut changed = 0;
    for field in FIELDS {
        if let Some(value) = flag_value(args, &format!("--{field}")) {
            form.set(field, value)?;
            changed += 1;
        }
    }
    if changed == 0 {
        anyhow::bail!("Nothing to change. Use --amount, --description, --category, --date or --type");
    }

    let draft = form.validate()?;
    ledger.update_transaction(id, draft)?;
    println!("Updated {id}");
    Ok(())
}

fn cli_delete(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let id = args
        .first()
        .ok_or_else(|| anyhow::anyhow!("Usage: fintrack delete <id>"))?;
    if ledger.delete_transaction(id)? {
        println!("Deleted {id}");
    } else {
        println!("No transaction with id {id}");
    }
    Ok(())
}

fn cli_list(args: &[String], ledger: &Ledger) -> Result<()> {
    let key = match flag_value(args, "--sort") {
        Some(raw) => SortKey::parse(raw)
            .ok_or_else(|| anyhow::anyhow!("Unknown sort key: {raw} (date or amount)"))?,
        None => SortKey::Date,
    };
    let order = if args.iter().any(|a| a == "--asc") {
        SortOrder::Ascending
    } else {
        SortOrder::Descending
    };
    let limit = match flag_value(args, "--limit") {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("Invalid limit: {raw}"))?,
        None => usize::MAX,
    };

    let rows = sorted_transactions(ledger.transactions(), key, order);
    if rows.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!(
        "{:<20} {:<14} {:<28} {:<20} {:>14}",
        "ID", "Date", "Description", "Category", "Amount"
    );
    println!("{}", "─".repeat(100));
    for txn in rows.iter().take(limit) {
        println!(
            "{:<20} {:<14} {:<28} {:<20} {:>14}",
            txn.id,
            format_date(&txn.date),
            truncate(&txn.description, 28),
            truncate(&txn.category, 20),
            format_signed(txn.kind, txn.amount),
        );
    }
    Ok(())
}

// ── Reports ──────────────────────────────────────────────────

fn cli_summary(ledger: &Ledger, today: NaiveDate) -> Result<()> {
    let dash = dashboard(ledger.transactions(), ledger.budgets(), today);

    println!("Fintrack - {}", dash.month.label());
    println!("{}", "─".repeat(40));
    println!("  Income:     {}", format_amount(dash.month_totals.income));
    println!("  Expenses:   {}", format_amount(dash.month_totals.expenses));
    println!("  Net:        {}", format_amount(dash.month_totals.net()));
    println!("  Net Worth:  {}", format_amount(dash.all_time.net()));
    println!("  Total Txns: {}", dash.transaction_count);

    let overview = &dash.budget_overview;
    match overview.used_percentage {
        Some(pct) => println!(
            "  Budgets:    {} of {} ({})",
            format_amount(overview.spent),
            format_amount(overview.budgeted),
            format_percent(pct)
        ),
        None => println!("  Budgets:    none"),
    }

    if !dash.top_categories.is_empty() {
        println!();
        println!("Top Categories:");
        for c in &dash.top_categories {
            println!(
                "  {} {:<22} {:>12} {:>7}",
                Category::icon_for(&c.category),
                c.category,
                format_amount(c.amount),
                format_percent(c.percentage)
            );
        }
    }

    if !dash.recent.is_empty() {
        println!();
        println!("Recent Activity:");
        for t in &dash.recent {
            println!(
                "  {:<14} {:<28} {:>14}",
                format_date(&t.date),
                truncate(&t.description, 28),
                format_signed(t.kind, t.amount)
            );
        }
    }

    Ok(())
}

fn cli_monthly(ledger: &Ledger) -> Result<()> {
    let rollup = monthly_rollup(ledger.transactions());
    if rollup.months.is_empty() && rollup.undated.is_none() {
        println!("No transactions");
        return Ok(());
    }

    println!("{:<10} {:>14} {:>14} {:>14}", "Month", "Income", "Expenses", "Net");
    println!("{}", "─".repeat(55));
    for m in &rollup.months {
        println!(
            "{:<10} {:>14} {:>14} {:>14}",
            m.month.label(),
            format_amount(m.income),
            format_amount(m.expenses),
            format_amount(m.net)
        );
    }
    if let Some(undated) = rollup.undated {
        println!(
            "{:<10} {:>14} {:>14} {:>14}",
            "Undated",
            format_amount(undated.income),
            format_amount(undated.expenses),
            format_amount(undated.net())
        );
    }
    Ok(())
}

fn cli_categories(args: &[String]) -> Result<()> {
    let kinds: Vec<TransactionType> = match args.first() {
        Some(raw) => vec![TransactionType::parse(raw)
            .ok_or_else(|| anyhow::anyhow!("Type must be income or expense, got '{raw}'"))?],
        None => TransactionType::all().to_vec(),
    };

    println!("{:<4} {:<3} {:<20} {:<8} Color", "ID", "", "Name", "Type");
    println!("{}", "─".repeat(48));
    for c in Category::all().iter().filter(|c| kinds.contains(&c.kind)) {
        println!(
            "{:<4} {:<3} {:<20} {:<8} {}",
            c.id, c.icon, c.name, c.kind, c.color
        );
    }
    Ok(())
}

// ── Budgets ──────────────────────────────────────────────────

fn cli_budgets(ledger: &Ledger, today: NaiveDate) -> Result<()> {
    let dash = dashboard(ledger.transactions(), ledger.budgets(), today);
    if dash.budgets.is_empty() {
        println!("No budgets. Add one with: fintrack budget set <category> <amount>");
    } else {
        println!("Budgets for {}", dash.month.label());
        println!(
            "{:<3} {:<20} {:>12} {:>12} {:>12} {:>8}",
            "", "Category", "Spent", "Budget", "Remaining", "Used"
        );
        println!("{}", "─".repeat(72));
        for s in &dash.budgets {
            let flag = if s.is_over_budget() {
                "  OVER"
            } else if s.is_near_limit() {
                "  near limit"
            } else {
                ""
            };
            println!(
                "{:<3} {:<20} {:>12} {:>12} {:>12} {:>8}{flag}",
                s.icon,
                s.category,
                format_amount(s.spent),
                format_amount(s.amount),
                format_amount(s.remaining),
                format_percent(s.percentage),
            );
        }
    }

    let available = available_budget_categories(ledger.budgets());
    if !available.is_empty() {
        let names: Vec<&str> = available.iter().map(|c| c.name).collect();
        println!();
        println!("Without a budget: {}", names.join(", "));
    }
    Ok(())
}

fn cli_budget(args: &[String], ledger: &mut Ledger) -> Result<()> {
    const USAGE: &str = "Usage: fintrack budget <set|update|rm> <category> [amount]";

    let action = args.first().map(String::as_str).unwrap_or("");
    let rest = args.get(1..).unwrap_or_default();
    match action {
        "set" => {
            let (category, amount) = split_amount(rest).ok_or_else(|| anyhow::anyhow!(USAGE))?;
            let form = BudgetForm {
                category,
                amount: amount.to_string(),
            };
            let budget = form.validate(ledger.budgets())?;
            let name = budget.category().map_or(UNKNOWN_CATEGORY, |c| c.name);
            let amount = budget.amount;
            ledger.add_budget(budget)?;
            println!("Budget set: {name} = {}", format_amount(amount));
        }
        "update" => {
            let (category, amount) = split_amount(rest).ok_or_else(|| anyhow::anyhow!(USAGE))?;
            let category = resolve_budget_category(&category)?;
            if ledger.find_budget(category.id).is_none() {
                anyhow::bail!(
                    "No budget for {}. Add one with: fintrack budget set {} <amount>",
                    category.name,
                    category.name
                );
            }
            let amount = BudgetForm {
                category: category.id.to_string(),
                amount: amount.to_string(),
            }
            .validate(&[])?
            .amount;
            ledger.update_budget(category.id, amount)?;
            println!("Budget updated: {} = {}", category.name, format_amount(amount));
        }
        "rm" | "delete" => {
            if rest.is_empty() {
                anyhow::bail!(USAGE);
            }
            let category = resolve_budget_category(&rest.join(" "))?;
            if ledger.delete_budget(category.id)? {
                println!("Deleted budget: {}", category.name);
            } else {
                println!("No budget for {}", category.name);
            }
        }
        _ => anyhow::bail!(USAGE),
    }
    Ok(())
}

/// Last word is the amount, everything before it the category.
fn split_amount(args: &[String]) -> Option<(String, &str)> {
    let (amount, category) = args.split_last()?;
    if category.is_empty() {
        return None;
    }
    Some((category.join(" "), amount.as_str()))
}

fn resolve_budget_category(raw: &str) -> Result<&'static Category> {
    Category::resolve(raw)
        .filter(|c| c.kind == TransactionType::Expense)
        .ok_or_else(|| anyhow::anyhow!("Unknown expense category: {raw}"))
}

// ── Export ───────────────────────────────────────────────────

fn cli_export(args: &[String], ledger: &Ledger, today: NaiveDate) -> Result<()> {
    let month = flag_value(args, "--month").map(parse_month).transpose()?;

    let output_path = positional(args, &["--month"])
        .first()
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            let suffix = month.map_or_else(|| today.format("%Y-%m-%d").to_string(), |m| m.to_string());
            format!("{home}/fintrack-export-{suffix}.csv")
        });

    let count = crate::export::export_to_path(Path::new(&output_path), ledger.transactions(), month)?;
    if count == 0 {
        println!("No transactions to export");
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;

//! Transaction and category command implementations

use anyhow::Result;
use poupa_core::aggregate::filter_transactions;
use poupa_core::models::TransactionType;
use poupa_core::{CategoryLookup, EngineConfig, Snapshot, TransactionFilter};
use serde_json::json;

use super::{format_amount, print_json, truncate};

pub fn cmd_transactions(
    snapshot: &Snapshot,
    config: &EngineConfig,
    filter: &TransactionFilter,
    limit: usize,
    json: bool,
) -> Result<()> {
    let transactions = filter_transactions(&snapshot.transactions, filter);
    let shown = &transactions[..transactions.len().min(limit)];

    if json {
        return print_json(&shown);
    }

    if shown.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    let lookup = CategoryLookup::new(&snapshot.categories, &config.fallback_category);

    println!();
    println!("📝 Transactions ({} of {})", shown.len(), transactions.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in shown {
        let amount_str = match tx.tx_type {
            TransactionType::Expense => format!("\x1b[31m-{}\x1b[0m", format_amount(tx.amount)),
            TransactionType::Income => format!("\x1b[32m+{}\x1b[0m", format_amount(tx.amount)),
        };

        println!(
            "   {} │ {:>22} │ {:15} │ {}",
            tx.date,
            amount_str,
            truncate(lookup.name(&tx.category_id), 15),
            truncate(&tx.description, 40)
        );
    }

    Ok(())
}

pub fn cmd_categories(snapshot: &Snapshot, config: &EngineConfig, json: bool) -> Result<()> {
    if snapshot.categories.is_empty() {
        if json {
            return print_json(&json!({ "defaults": config.default_categories }));
        }

        println!("No categories yet. New users start with:");
        for category in &config.default_categories {
            println!("   {:20} {}", category.name, category.kind);
        }
        return Ok(());
    }

    if json {
        return print_json(&snapshot.categories);
    }

    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────────────────────────────────────");
    for category in &snapshot.categories {
        let marker = if config.is_essential(&category.name) {
            " (essential)"
        } else {
            ""
        };
        println!("   {:20} {:8}{}", category.name, category.kind.as_str(), marker);
    }

    Ok(())
}

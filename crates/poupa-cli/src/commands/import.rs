//! CSV export and import preview

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use poupa_core::export::{export_rows, parse_csv, write_csv};
use poupa_core::Snapshot;
use serde_json::json;

use super::{format_amount, print_json, truncate};

/// Write all transactions as CSV to `output`, or to stdout
pub fn cmd_export(snapshot: &Snapshot, output: Option<&Path>) -> Result<()> {
    let rows = export_rows(&snapshot.transactions, &snapshot.categories);

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_csv(&rows, file)?;
            eprintln!("✅ Exported {} transactions to {}", rows.len(), path.display());
        }
        None => {
            write_csv(&rows, io::stdout().lock())?;
        }
    }

    Ok(())
}

/// Read a CSV and show the transactions it would create
pub fn cmd_import(snapshot: &Snapshot, file: &Path, json: bool) -> Result<()> {
    let reader = File::open(file)
        .map(BufReader::new)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    let outcome = parse_csv(reader, &snapshot.categories)
        .with_context(|| format!("Failed to read CSV from {}", file.display()))?;

    if json {
        let rows: Vec<_> = outcome
            .rows
            .iter()
            .map(|row| {
                json!({
                    "date": row.date,
                    "description": row.description,
                    "amount": row.amount,
                    "type": row.tx_type,
                    "categoryId": row.category_id,
                })
            })
            .collect();
        return print_json(&json!({ "rows": rows, "skipped": outcome.skipped }));
    }

    println!();
    println!("📥 Import preview: {}", file.display());
    println!("   ─────────────────────────────────────────────────────────────");

    for row in &outcome.rows {
        println!(
            "   {} │ {:8} │ {:>12} │ {}",
            row.date,
            row.tx_type.as_str(),
            format_amount(row.amount),
            truncate(&row.description, 40)
        );
    }

    println!();
    println!("   {} rows readable", outcome.rows.len());
    if outcome.skipped > 0 {
        println!("   ⚠️  {} rows skipped (missing date, amount or type)", outcome.skipped);
    }

    Ok(())
}

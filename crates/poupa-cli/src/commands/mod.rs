//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config/snapshot loading, month and date parsing)
//! - `goals` - Savings goal commands (goals, project, planned)
//! - `import` - CSV export and import preview
//! - `reports` - Dashboard and annual report
//! - `transactions` - Transaction list and categories

pub mod core;
pub mod goals;
pub mod import;
pub mod reports;
pub mod transactions;

// Re-export command functions for main.rs
pub use core::*;
pub use goals::*;
pub use import::*;
pub use reports::*;
pub use transactions::*;

/// Truncate a string to a maximum length (in characters), adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a money amount with two decimals and thousands separators
pub fn format_amount(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, dec_part)
}

/// Print a value as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

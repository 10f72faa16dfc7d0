//! Shared utilities for commands
//!
//! This module contains:
//! - `load_config` / `load_snapshot` - Open the engine config and data dump
//! - `resolve_month` / `resolve_year` - Defaults for dashboard and report
//! - `build_filter` - Transaction list filter from CLI strings

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use poupa_core::models::TransactionType;
use poupa_core::reports::default_report_year;
use poupa_core::{DataProvider, EngineConfig, JsonFileProvider, MonthKey, Snapshot, TransactionFilter};

/// Load the engine config (explicit path, data dir override, or built-in)
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    EngineConfig::load(path).context("Failed to load engine config")
}

/// Load the data dump, optionally narrowed to one user
pub fn load_snapshot(path: &Path, user: Option<&str>) -> Result<Snapshot> {
    JsonFileProvider::new(path)
        .snapshot(user)
        .with_context(|| format!("Failed to load data from {}", path.display()))
}

/// The current calendar month in local time
pub fn current_month() -> MonthKey {
    MonthKey::from_date(Local::now().date_naive())
}

/// Parse a YYYY-MM month, defaulting to the current month
pub fn resolve_month(month: Option<&str>) -> Result<MonthKey> {
    match month {
        Some(m) => parse_month(m),
        None => Ok(current_month()),
    }
}

pub fn parse_month(month: &str) -> Result<MonthKey> {
    month
        .parse()
        .with_context(|| format!("Invalid month '{}' (use YYYY-MM)", month))
}

pub fn parse_date(date: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid --{} date format (use YYYY-MM-DD)", flag))
}

/// The requested year, else the current year if it has data, else the
/// newest year with data
pub fn resolve_year(snapshot: &Snapshot, year: Option<i32>) -> i32 {
    year.unwrap_or_else(|| default_report_year(snapshot, Local::now().year()))
}

/// Build a transaction filter from command line values
pub fn build_filter(
    from: Option<&str>,
    to: Option<&str>,
    tx_type: Option<&str>,
    category_id: Option<String>,
    search: Option<String>,
) -> Result<TransactionFilter> {
    let tx_type = tx_type
        .map(|t| t.parse::<TransactionType>())
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(TransactionFilter {
        from: from.map(|d| parse_date(d, "from")).transpose()?,
        to: to.map(|d| parse_date(d, "to")).transpose()?,
        tx_type,
        category_id,
        search,
    })
}

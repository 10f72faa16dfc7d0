//! Dashboard and annual report views
//!
//! Thin composition of the aggregation and metrics functions into the two
//! screens the app shows. Both take an explicit snapshot and config and
//! return plain data; formatting is left to the caller.

use serde::{Deserialize, Serialize};

use crate::aggregate::{
    aggregate, available_years, monthly_balance, totals, trailing_months, Aggregation,
    CategoryLookup, TypeFilter, Window,
};
use crate::config::EngineConfig;
use crate::metrics::{
    essential_vs_discretionary, peak_month, savings_rate, top_expense_categories, total_saved,
};
use crate::models::{ExpenseSplit, MonthBucket, MonthlyBalance, Totals};
use crate::month::MonthKey;
use crate::snapshot::Snapshot;

/// Savings recorded for the dashboard's month
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthSavings {
    pub deposited: f64,
    pub planned: f64,
}

/// Dashboard for one selected month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub month: MonthKey,
    pub totals: Totals,
    pub savings: MonthSavings,
    /// Expense totals by category for the selected month, first-seen order
    pub expenses_by_category: Vec<MonthBucket>,
    /// Trailing months ending at the window end, oldest first
    pub monthly_balance: Vec<MonthlyBalance>,
}

/// Build the dashboard for `month`, with the balance chart covering the
/// configured number of months up to `window_end` (usually the current
/// month)
pub fn dashboard(
    snapshot: &Snapshot,
    config: &EngineConfig,
    month: MonthKey,
    window_end: MonthKey,
) -> Dashboard {
    let lookup = CategoryLookup::new(&snapshot.categories, &config.fallback_category);
    let window = Window::Month(month);

    // First entry recorded for the month, whichever goal it belongs to
    let savings = snapshot
        .saving_entries
        .iter()
        .find(|e| e.month_key == month)
        .map(|e| MonthSavings {
            deposited: e.deposited_amount,
            planned: e.planned_amount,
        })
        .unwrap_or_default();

    let expenses = aggregate(
        &snapshot.transactions,
        &lookup,
        &window,
        TypeFilter::EXPENSE,
    );

    Dashboard {
        month,
        totals: totals(&snapshot.transactions, &window),
        savings,
        expenses_by_category: expenses.by_category,
        monthly_balance: monthly_balance(
            &snapshot.transactions,
            &trailing_months(window_end, config.dashboard_months),
        ),
    }
}

/// Suggestion lines shown under the annual report
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    /// Category with the largest expense total
    pub top_category: Option<String>,
    /// Month with the largest expense total
    pub peak_month: Option<String>,
}

/// Annual financial health report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualReport {
    pub year: i32,
    /// Years that have transactions, newest first
    pub available_years: Vec<i32>,
    /// Expense buckets for the year
    pub expenses: Aggregation,
    pub top_categories: Vec<MonthBucket>,
    pub total_income: f64,
    pub total_expense: f64,
    pub total_saved: f64,
    pub savings_rate: f64,
    pub split: ExpenseSplit,
    pub insights: Insights,
}

/// Build the annual report for `year`
pub fn annual_report(snapshot: &Snapshot, config: &EngineConfig, year: i32) -> AnnualReport {
    let lookup = CategoryLookup::new(&snapshot.categories, &config.fallback_category);
    let window = Window::Year(year);

    let expenses = aggregate(
        &snapshot.transactions,
        &lookup,
        &window,
        TypeFilter::EXPENSE,
    );
    let year_totals = totals(&snapshot.transactions, &window);
    let saved = total_saved(&snapshot.saving_entries, &window);
    let top = top_expense_categories(&expenses.by_category, config.top_categories);
    let split = essential_vs_discretionary(
        &snapshot.transactions,
        &lookup,
        &window,
        &config.essential_categories,
    );

    let insights = Insights {
        top_category: top.first().map(|b| b.key.clone()),
        peak_month: peak_month(&expenses.by_month).map(|b| b.key.clone()),
    };

    AnnualReport {
        year,
        available_years: available_years(&snapshot.transactions),
        top_categories: top,
        total_income: year_totals.income,
        total_expense: year_totals.expense,
        total_saved: saved,
        savings_rate: savings_rate(saved, year_totals.income),
        split,
        insights,
        expenses,
    }
}

/// The year a report should open on: `preferred` if it has data, else the
/// newest year with data, else `preferred`
pub fn default_report_year(snapshot: &Snapshot, preferred: i32) -> i32 {
    let years = available_years(&snapshot.transactions);
    if years.is_empty() || years.contains(&preferred) {
        preferred
    } else {
        years[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryKind, SavingEntry, Transaction, TransactionType};
    use chrono::NaiveDate;

    fn snapshot() -> Snapshot {
        let category = |id: &str, name: &str, kind| Category {
            id: id.to_string(),
            user_id: "u1".to_string(),
            name: name.to_string(),
            kind,
        };
        let tx = |id: &str, d: &str, tx_type, amount: f64, cat: &str| Transaction {
            id: id.to_string(),
            user_id: "u1".to_string(),
            tx_type,
            amount,
            date: NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(),
            category_id: cat.to_string(),
            description: String::new(),
            payment_method: None,
            recurring: None,
        };
        let entry = |id: &str, month: &str, planned: f64, deposited: f64| SavingEntry {
            id: id.to_string(),
            goal_id: "g1".to_string(),
            user_id: "u1".to_string(),
            month_key: month.parse().unwrap(),
            planned_amount: planned,
            deposited_amount: deposited,
        };

        use TransactionType::{Expense, Income};
        Snapshot {
            categories: vec![
                category("home", "Moradia", CategoryKind::Expense),
                category("fun", "Lazer", CategoryKind::Expense),
                category("pay", "Salario", CategoryKind::Income),
            ],
            transactions: vec![
                tx("1", "2024-01-10", Income, 4000.0, "pay"),
                tx("2", "2024-01-15", Expense, 1500.0, "home"),
                tx("3", "2024-02-03", Expense, 200.0, "fun"),
                tx("4", "2024-02-15", Income, 4000.0, "pay"),
                tx("5", "2024-02-20", Expense, 1500.0, "home"),
                tx("6", "2024-02-21", Expense, 80.0, "old"),
                tx("7", "2023-11-02", Expense, 999.0, "fun"),
            ],
            saving_entries: vec![
                entry("e1", "2024-01", 500.0, 400.0),
                entry("e2", "2024-02", 600.0, 600.0),
                entry("e3", "2023-12", 100.0, 100.0),
            ],
            saving_goals: vec![],
        }
    }

    #[test]
    fn test_annual_report() {
        let report = annual_report(&snapshot(), &EngineConfig::default(), 2024);

        assert_eq!(report.available_years, vec![2024, 2023]);
        assert_eq!(report.total_income, 8000.0);
        assert_eq!(report.total_expense, 3280.0);
        assert_eq!(report.total_saved, 1000.0);
        assert!((report.savings_rate - 12.5).abs() < 1e-9);
        assert_eq!(report.split.essential, 3000.0);
        assert_eq!(report.split.discretionary, 280.0);
        assert_eq!(report.top_categories[0], MonthBucket::new("Moradia", 3000.0));
        assert_eq!(report.top_categories[2], MonthBucket::new("Other", 80.0));
        assert_eq!(report.insights.top_category.as_deref(), Some("Moradia"));
        assert_eq!(report.insights.peak_month.as_deref(), Some("2024-02"));
        assert!((report.expenses.month_total() - report.total_expense).abs() < 1e-9);
        assert!((report.split.total() - report.total_expense).abs() < 1e-9);
    }

    #[test]
    fn test_annual_report_empty_year() {
        let report = annual_report(&snapshot(), &EngineConfig::default(), 2020);
        assert!(report.expenses.by_month.is_empty());
        assert!(report.top_categories.is_empty());
        assert_eq!(report.savings_rate, 0.0);
        assert_eq!(report.insights, Insights::default());
    }

    #[test]
    fn test_dashboard() {
        let month: MonthKey = "2024-02".parse().unwrap();
        let dash = dashboard(&snapshot(), &EngineConfig::default(), month, month);

        assert_eq!(dash.totals.income, 4000.0);
        assert_eq!(dash.totals.expense, 1780.0);
        assert_eq!(dash.totals.balance, 2220.0);
        assert_eq!(dash.savings.deposited, 600.0);
        assert_eq!(dash.savings.planned, 600.0);
        assert_eq!(dash.expenses_by_category.len(), 3);
        assert_eq!(dash.monthly_balance.len(), 6);
        assert_eq!(dash.monthly_balance[0].month_key.to_string(), "2023-09");
        assert_eq!(dash.monthly_balance[4].balance, 2500.0);
        assert_eq!(dash.monthly_balance[5].balance, 2220.0);
    }

    #[test]
    fn test_dashboard_month_without_data() {
        let month: MonthKey = "2025-06".parse().unwrap();
        let dash = dashboard(&snapshot(), &EngineConfig::default(), month, month);
        assert_eq!(dash.totals, Totals::default());
        assert_eq!(dash.savings, MonthSavings::default());
        assert!(dash.expenses_by_category.is_empty());
    }

    #[test]
    fn test_default_report_year() {
        let snap = snapshot();
        assert_eq!(default_report_year(&snap, 2023), 2023);
        assert_eq!(default_report_year(&snap, 2026), 2024);
        assert_eq!(default_report_year(&Snapshot::default(), 2026), 2026);
    }
}

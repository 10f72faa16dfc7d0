//! Report command implementations

use anyhow::Result;
use poupa_core::{annual_report, dashboard, EngineConfig, MonthKey, Snapshot};

use super::{format_amount, print_json, truncate};

pub fn cmd_dashboard(
    snapshot: &Snapshot,
    config: &EngineConfig,
    month: MonthKey,
    window_end: MonthKey,
    json: bool,
) -> Result<()> {
    let dash = dashboard(snapshot, config, month, window_end);

    if json {
        return print_json(&dash);
    }

    println!();
    println!("📊 Dashboard - {}", dash.month);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Income:   {:>12}", format_amount(dash.totals.income));
    println!("   Expenses: {:>12}", format_amount(dash.totals.expense));
    println!("   Balance:  {:>12}", format_amount(dash.totals.balance));
    println!(
        "   Saved:    {:>12} (planned {})",
        format_amount(dash.savings.deposited),
        format_amount(dash.savings.planned)
    );

    println!();
    println!("   Expenses by category");
    if dash.expenses_by_category.is_empty() {
        println!("   No expenses this month.");
    } else {
        println!("   {:25} │ {:>12}", "Category", "Amount");
        println!("   ──────────────────────────┼──────────────");
        for bucket in &dash.expenses_by_category {
            println!(
                "   {:25} │ {:>12}",
                truncate(&bucket.key, 25),
                format_amount(bucket.total)
            );
        }
    }

    println!();
    println!("   Last {} months", dash.monthly_balance.len());
    println!(
        "   {:8} │ {:>12} │ {:>12} │ {:>12}",
        "Month", "Income", "Expenses", "Balance"
    );
    println!("   ─────────┼──────────────┼──────────────┼──────────────");
    for row in &dash.monthly_balance {
        println!(
            "   {:8} │ {:>12} │ {:>12} │ {:>12}",
            row.month_key.to_string(),
            format_amount(row.income),
            format_amount(row.expense),
            format_amount(row.balance)
        );
    }

    Ok(())
}

pub fn cmd_report(snapshot: &Snapshot, config: &EngineConfig, year: i32, json: bool) -> Result<()> {
    let report = annual_report(snapshot, config, year);

    if json {
        return print_json(&report);
    }

    println!();
    println!("🩺 Financial Health - {}", report.year);
    if !report.available_years.is_empty() {
        let years: Vec<String> = report.available_years.iter().map(|y| y.to_string()).collect();
        println!("   Years with data: {}", years.join(", "));
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if report.expenses.by_month.is_empty() && report.total_income == 0.0 {
        println!("   No transactions found for {}.", report.year);
        return Ok(());
    }

    println!("   Income:        {:>12}", format_amount(report.total_income));
    println!("   Expenses:      {:>12}", format_amount(report.total_expense));
    println!("   Saved:         {:>12}", format_amount(report.total_saved));
    println!("   Savings rate:  {:>11.1}%", report.savings_rate);
    println!("   Essential:     {:>12}", format_amount(report.split.essential));
    println!("   Discretionary: {:>12}", format_amount(report.split.discretionary));

    println!();
    println!("   {:8} │ {:>12}", "Month", "Expenses");
    println!("   ─────────┼──────────────");
    for bucket in &report.expenses.by_month {
        println!("   {:8} │ {:>12}", bucket.key, format_amount(bucket.total));
    }

    if !report.top_categories.is_empty() {
        println!();
        println!("   Top categories");
        println!("   {:25} │ {:>12}", "Category", "Amount");
        println!("   ──────────────────────────┼──────────────");
        for bucket in &report.top_categories {
            println!(
                "   {:25} │ {:>12}",
                truncate(&bucket.key, 25),
                format_amount(bucket.total)
            );
        }
    }

    let insights = &report.insights;
    if insights.top_category.is_some() || insights.peak_month.is_some() {
        println!();
        println!("💡 Insights");
        if let Some(ref category) = insights.top_category {
            println!("   Most spent on {}: look for cuts there first.", category);
        }
        if let Some(ref month) = insights.peak_month {
            println!("   {} had the highest expenses of the year.", month);
        }
    }

    Ok(())
}

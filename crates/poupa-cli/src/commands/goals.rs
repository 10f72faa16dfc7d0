//! Savings goal command implementations

use anyhow::Result;
use poupa_core::projection::planned_for_month;
use poupa_core::reconcile::{reconcile_all, reconcile_with_horizon};
use poupa_core::{EngineConfig, Snapshot};
use serde_json::json;

use super::{format_amount, parse_month, print_json, truncate};

pub fn cmd_goals(snapshot: &Snapshot, config: &EngineConfig, json: bool) -> Result<()> {
    let reports = reconcile_all(
        &snapshot.saving_goals,
        &snapshot.saving_entries,
        config.horizon_months,
    );

    if json {
        return print_json(&reports);
    }

    if reports.is_empty() {
        println!("No savings goals found.");
        return Ok(());
    }

    println!();
    println!("🎯 Savings Goals");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:20} │ {:>12} │ {:>12} │ {:>12} │ {:>6}",
        "Goal", "Planned", "Saved", "Difference", "%"
    );
    println!("   ─────────────────────┼──────────────┼──────────────┼──────────────┼────────");

    for report in &reports {
        let p = &report.progress;
        println!(
            "   {:20} │ {:>12} │ {:>12} │ {:>12} │ {:>5.1}%",
            truncate(&report.goal_name, 20),
            format_amount(p.planned_total),
            format_amount(p.saved_total),
            format_amount(p.difference),
            p.progress_pct
        );
    }

    Ok(())
}

pub fn cmd_project(
    snapshot: &Snapshot,
    config: &EngineConfig,
    goal: &str,
    json: bool,
) -> Result<()> {
    let goal = snapshot.find_goal(goal)?;
    let rec = reconcile_with_horizon(goal, &snapshot.saving_entries, config.horizon_months);

    if json {
        return print_json(&json!({
            "goal": goal,
            "progress": rec.progress,
            "perMonth": rec.per_month,
        }));
    }

    println!();
    println!("📈 {} ({} months from {})", goal.name, config.horizon_months, goal.start_month());
    println!(
        "   Start: {}  Increase: {}/month  Interest: {}{}",
        format_amount(goal.initial_amount),
        format_amount(goal.monthly_increase),
        goal.interest_mode,
        goal.interest_value
            .map(|v| format!(" ({})", v))
            .unwrap_or_default()
    );
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {:8} │ {:>12} │ {:>12}", "Month", "Planned", "Deposited");
    println!("   ─────────┼──────────────┼──────────────");

    for point in &rec.per_month {
        println!(
            "   {:8} │ {:>12} │ {:>12}",
            point.month_key.to_string(),
            format_amount(point.planned),
            format_amount(point.deposited)
        );
    }

    let p = &rec.progress;
    println!("   ─────────┴──────────────┴──────────────");
    println!(
        "   Recorded plan: {}  Saved: {}  Progress: {:.1}%",
        format_amount(p.planned_total),
        format_amount(p.saved_total),
        p.progress_pct
    );

    Ok(())
}

pub fn cmd_planned(
    snapshot: &Snapshot,
    config: &EngineConfig,
    goal: &str,
    month: &str,
    json: bool,
) -> Result<()> {
    let goal = snapshot.find_goal(goal)?;
    let month = parse_month(month)?;
    let planned = planned_for_month(goal, month, config.horizon_months);

    if json {
        return print_json(&json!({
            "goalId": goal.id,
            "monthKey": month,
            "planned": planned,
        }));
    }

    println!("{}: planned {} for {}", goal.name, format_amount(planned), month);
    Ok(())
}

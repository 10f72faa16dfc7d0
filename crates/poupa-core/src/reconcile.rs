//! Goal progress: projection vs recorded deposits
//!
//! Totals are taken from the entries as stored. An entry's `planned_amount`
//! is whatever the plan said when the deposit was recorded; if the goal was
//! edited afterwards the totals keep the old value and are not recomputed
//! from the current projection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{GoalProgress, PlanVsActual, SavingEntry, SavingGoal};
use crate::month::MonthKey;
use crate::projection::{project_with_horizon, DEFAULT_HORIZON_MONTHS};

/// Full reconciliation of one goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub progress: GoalProgress,
    /// One point per projected month, deposited 0 where nothing was recorded
    pub per_month: Vec<PlanVsActual>,
}

/// Reconciliation plus goal identity and its entries, for goal listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalReport {
    pub goal_id: String,
    pub goal_name: String,
    pub progress: GoalProgress,
    pub per_month: Vec<PlanVsActual>,
    /// The goal's entries, ascending by month
    pub entries: Vec<SavingEntry>,
}

/// Reconcile a goal against entries over the default horizon.
///
/// Entries belonging to other goals are ignored.
pub fn reconcile(goal: &SavingGoal, entries: &[SavingEntry]) -> Reconciliation {
    reconcile_with_horizon(goal, entries, DEFAULT_HORIZON_MONTHS)
}

pub fn reconcile_with_horizon(
    goal: &SavingGoal,
    entries: &[SavingEntry],
    horizon_months: u32,
) -> Reconciliation {
    let own: Vec<&SavingEntry> = entries.iter().filter(|e| e.goal_id == goal.id).collect();

    let planned_total: f64 = own.iter().map(|e| e.planned_amount).sum();
    let saved_total: f64 = own.iter().map(|e| e.deposited_amount).sum();

    let mut deposited_by_month: HashMap<MonthKey, f64> = HashMap::new();
    for entry in &own {
        *deposited_by_month.entry(entry.month_key).or_insert(0.0) += entry.deposited_amount;
    }

    let per_month = project_with_horizon(goal, horizon_months)
        .into_iter()
        .map(|point| PlanVsActual {
            month_key: point.month_key,
            planned: point.planned,
            deposited: deposited_by_month
                .get(&point.month_key)
                .copied()
                .unwrap_or(0.0),
        })
        .collect();

    Reconciliation {
        progress: progress(planned_total, saved_total),
        per_month,
    }
}

/// Progress metrics from planned and saved totals
pub fn progress(planned_total: f64, saved_total: f64) -> GoalProgress {
    let denom = if planned_total > 0.0 { planned_total } else { 1.0 };
    let pct = (saved_total / denom * 100.0).clamp(0.0, 100.0);

    GoalProgress {
        planned_total,
        saved_total,
        difference: planned_total - saved_total,
        progress_pct: pct,
    }
}

/// Reconcile every goal, in the order given
pub fn reconcile_all(
    goals: &[SavingGoal],
    entries: &[SavingEntry],
    horizon_months: u32,
) -> Vec<GoalReport> {
    goals
        .iter()
        .map(|goal| {
            let rec = reconcile_with_horizon(goal, entries, horizon_months);
            let mut own: Vec<SavingEntry> = entries
                .iter()
                .filter(|e| e.goal_id == goal.id)
                .cloned()
                .collect();
            own.sort_by_key(|e| e.month_key);

            GoalReport {
                goal_id: goal.id.clone(),
                goal_name: goal.name.clone(),
                progress: rec.progress,
                per_month: rec.per_month,
                entries: own,
            }
        })
        .collect()
}

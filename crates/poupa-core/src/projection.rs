//! Savings goal projection
//!
//! A goal's plan for month `i` (counting from its start month) is
//! `initial_amount + monthly_increase * i`, adjusted once by the goal's
//! interest model. There is no compounding: each month is computed from
//! its own base.
//!
//! The horizon is fixed (12 months by default) and does not look at the
//! goal's `mode`, `target_value` or `duration_months`.

use crate::models::{InterestMode, ProjectionPoint, SavingGoal};
use crate::month::MonthKey;

/// Months covered by a projection unless configured otherwise
pub const DEFAULT_HORIZON_MONTHS: u32 = 12;

/// Project a goal over the default 12-month horizon
pub fn project(goal: &SavingGoal) -> Vec<ProjectionPoint> {
    project_with_horizon(goal, DEFAULT_HORIZON_MONTHS)
}

/// Project a goal over `horizon_months` consecutive calendar months,
/// starting at the goal's start month.
///
/// The series ends early if it would run past 9999-12.
pub fn project_with_horizon(goal: &SavingGoal, horizon_months: u32) -> Vec<ProjectionPoint> {
    let start = goal.start_month();
    (0..horizon_months)
        .map_while(|index| {
            let month_key = start.checked_add_months(i32::try_from(index).ok()?)?;
            Some(ProjectionPoint {
                month_key,
                planned: planned_at(goal, index),
            })
        })
        .collect()
}

/// Planned amount for the `index`-th month of a goal
pub fn planned_at(goal: &SavingGoal, index: u32) -> f64 {
    let base = goal.initial_amount + goal.monthly_increase * f64::from(index);
    let interest = goal.interest_value.unwrap_or(0.0);
    match goal.interest_mode {
        InterestMode::None => base,
        InterestMode::Percent => base + base * interest / 100.0,
        InterestMode::Fixed => base + interest,
    }
}

/// The planned amount a new deposit entry for `month` should record.
///
/// Returns 0 when the month falls outside the goal's projection.
pub fn planned_for_month(goal: &SavingGoal, month: MonthKey, horizon_months: u32) -> f64 {
    project_with_horizon(goal, horizon_months)
        .into_iter()
        .find(|point| point.month_key == month)
        .map(|point| point.planned)
        .unwrap_or(0.0)
}

//! Domain models for Poupa
//!
//! Input records mirror the app's local database rows (camelCase on the
//! wire) so a JSON dump deserializes directly. Derived types are produced
//! by the engine and never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::month::MonthKey;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!(
                "Unknown transaction type: {} (valid: income, expense)",
                s
            )),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    /// Always positive; the direction is carried by `tx_type`
    pub amount: f64,
    pub date: NaiveDate,
    pub category_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<bool>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.tx_type == TransactionType::Expense
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

/// Which transaction types a category applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Expense,
    Income,
    Both,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
            Self::Both => "both",
        }
    }
}

impl std::str::FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            "both" => Ok(Self::Both),
            _ => Err(format!("Unknown category kind: {}", s)),
        }
    }
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-defined transaction category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub kind: CategoryKind,
}

/// How the user framed a savings goal (presentation metadata only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SavingGoalMode {
    TargetValue,
    DurationMonths,
}

impl SavingGoalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TargetValue => "targetValue",
            Self::DurationMonths => "durationMonths",
        }
    }
}

impl std::fmt::Display for SavingGoalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Interest model applied to each month of a goal's plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestMode {
    /// Plan is the base amount
    None,
    /// Base amount plus `interest_value` percent of it
    Percent,
    /// Base amount plus a flat `interest_value`
    Fixed,
}

impl InterestMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Percent => "percent",
            Self::Fixed => "fixed",
        }
    }
}

impl std::str::FromStr for InterestMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "percent" => Ok(Self::Percent),
            "fixed" => Ok(Self::Fixed),
            _ => Err(format!(
                "Unknown interest mode: {} (valid: none, percent, fixed)",
                s
            )),
        }
    }
}

impl std::fmt::Display for InterestMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A savings goal definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingGoal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    /// Only the month is meaningful. The goal form stores `YYYY-MM`; full
    /// dates are accepted too.
    #[serde(deserialize_with = "deserialize_start_date")]
    pub start_date: NaiveDate,
    pub initial_amount: f64,
    pub monthly_increase: f64,
    pub mode: SavingGoalMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_months: Option<u32>,
    pub interest_mode: InterestMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_value: Option<f64>,
}

impl SavingGoal {
    /// The month the projection starts at
    pub fn start_month(&self) -> MonthKey {
        MonthKey::from_date(self.start_date)
    }
}

/// Parse a goal start date given as `YYYY-MM-DD` or `YYYY-MM` (first day)
pub fn parse_start_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| raw.parse::<MonthKey>().ok().map(|m| m.first_day()))
}

fn deserialize_start_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_start_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid start date '{}' (expected YYYY-MM or YYYY-MM-DD)",
            raw
        ))
    })
}

/// A recorded deposit against a goal for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingEntry {
    pub id: String,
    pub goal_id: String,
    pub user_id: String,
    pub month_key: MonthKey,
    /// Planned value stored when the entry was recorded
    pub planned_amount: f64,
    pub deposited_amount: f64,
}

// ========== Derived Models ==========

/// A keyed total (month key or category name)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub key: String,
    pub total: f64,
}

impl MonthBucket {
    pub fn new(key: impl Into<String>, total: f64) -> Self {
        Self {
            key: key.into(),
            total,
        }
    }
}

/// One month of a goal's planned trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub month_key: MonthKey,
    pub planned: f64,
}

/// Planned-vs-saved totals for a goal
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub planned_total: f64,
    pub saved_total: f64,
    pub difference: f64,
    /// Always within `0..=100`
    pub progress_pct: f64,
}

/// Projected plan next to what was actually deposited for one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanVsActual {
    pub month_key: MonthKey,
    pub planned: f64,
    pub deposited: f64,
}

/// Income, expense and their difference over some window
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// Income/expense totals for one month of the dashboard window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBalance {
    pub month_key: MonthKey,
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// Expense total split by the essential category set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpenseSplit {
    pub essential: f64,
    pub discretionary: f64,
}

impl ExpenseSplit {
    pub fn total(&self) -> f64 {
        self.essential + self.discretionary
    }
}

//! Input snapshots and the data provider seam
//!
//! The engine never reaches into storage. Callers fetch everything they need
//! for a user into a [`Snapshot`] and pass slices of it to the engine
//! functions; re-running after a data change means taking a new snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{Category, SavingEntry, SavingGoal, Transaction};

/// A consistent set of records, typically all rows for one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub saving_goals: Vec<SavingGoal>,
    #[serde(default)]
    pub saving_entries: Vec<SavingEntry>,
}

impl Snapshot {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a JSON dump from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let snapshot = Self::from_json_str(&content)?;
        info!(
            "Loaded snapshot from {}: {} transactions, {} categories, {} goals, {} entries",
            path.display(),
            snapshot.transactions.len(),
            snapshot.categories.len(),
            snapshot.saving_goals.len(),
            snapshot.saving_entries.len()
        );
        Ok(snapshot)
    }

    /// Records belonging to one user
    pub fn for_user(&self, user_id: &str) -> Self {
        Self {
            transactions: self
                .transactions
                .iter()
                .filter(|t| t.user_id == user_id)
                .cloned()
                .collect(),
            categories: self
                .categories
                .iter()
                .filter(|c| c.user_id == user_id)
                .cloned()
                .collect(),
            saving_goals: self
                .saving_goals
                .iter()
                .filter(|g| g.user_id == user_id)
                .cloned()
                .collect(),
            saving_entries: self
                .saving_entries
                .iter()
                .filter(|e| e.user_id == user_id)
                .cloned()
                .collect(),
        }
    }

    /// Look up a goal by id, falling back to a case-insensitive name match
    pub fn find_goal(&self, id_or_name: &str) -> Result<&SavingGoal> {
        self.saving_goals
            .iter()
            .find(|g| g.id == id_or_name)
            .or_else(|| {
                self.saving_goals
                    .iter()
                    .find(|g| g.name.eq_ignore_ascii_case(id_or_name))
            })
            .ok_or_else(|| Error::NotFound(format!("Savings goal '{}'", id_or_name)))
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
            && self.categories.is_empty()
            && self.saving_goals.is_empty()
            && self.saving_entries.is_empty()
    }
}

/// Source of snapshots (the storage collaborator)
pub trait DataProvider {
    /// All records, or only those of `user_id` when given
    fn snapshot(&self, user_id: Option<&str>) -> Result<Snapshot>;
}

impl DataProvider for Snapshot {
    fn snapshot(&self, user_id: Option<&str>) -> Result<Snapshot> {
        Ok(match user_id {
            Some(id) => self.for_user(id),
            None => self.clone(),
        })
    }
}

/// Reads a JSON dump of the app database on each call
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataProvider for JsonFileProvider {
    fn snapshot(&self, user_id: Option<&str>) -> Result<Snapshot> {
        Snapshot::load(&self.path)?.snapshot(user_id)
    }
}

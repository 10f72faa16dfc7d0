//! Poupa Core Library
//!
//! Projection and aggregation engine for the Poupa personal finance tracker:
//! - Savings goal projection over a fixed horizon
//! - Reconciliation of goal plans against recorded deposits
//! - Transaction aggregation by month and category within a window
//! - Derived indicators (savings rate, essential split, top categories, peak month)
//! - Dashboard and annual report composition
//! - Tabular CSV export/import of transactions
//!
//! All computation is synchronous and pure over borrowed snapshots. Storage
//! stays outside; data comes in through [`snapshot::DataProvider`].

pub mod aggregate;
pub mod config;
pub mod error;
pub mod export;
pub mod metrics;
pub mod models;
pub mod month;
pub mod projection;
pub mod reconcile;
pub mod reports;
pub mod snapshot;

pub use aggregate::{aggregate, Aggregation, CategoryLookup, TransactionFilter, TypeFilter, Window};
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use month::MonthKey;
pub use projection::project;
pub use reconcile::{reconcile, GoalReport, Reconciliation};
pub use reports::{annual_report, dashboard, AnnualReport, Dashboard};
pub use snapshot::{DataProvider, JsonFileProvider, Snapshot};

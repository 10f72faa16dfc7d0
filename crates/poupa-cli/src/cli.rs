//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Poupa - Income, expense and savings goal reports
#[derive(Parser)]
#[command(name = "poupa")]
#[command(about = "Personal finance projections and reports from an app data snapshot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Snapshot file (JSON dump of the app database)
    #[arg(long, default_value = "poupa.json", global = true)]
    pub data: PathBuf,

    /// Only use records belonging to this user id
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Engine config file (defaults to the data dir override, then built-in)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List savings goals with their progress
    Goals,

    /// Show a goal's 12-month plan next to recorded deposits
    Project {
        /// Goal id or name
        goal: String,
    },

    /// Planned amount a new deposit for a month should record
    Planned {
        /// Goal id or name
        goal: String,

        /// Month (YYYY-MM)
        month: String,
    },

    /// Monthly dashboard (totals, savings, categories, balance window)
    Dashboard {
        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Annual financial health report
    Report {
        /// Year to report on (defaults to the current year, or the newest year with data)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// List transactions, newest first
    Transactions {
        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<String>,

        /// Transaction type: income, expense
        #[arg(short = 't', long = "type")]
        tx_type: Option<String>,

        /// Category id
        #[arg(short, long)]
        category: Option<String>,

        /// Search text in descriptions
        #[arg(short, long)]
        search: Option<String>,

        /// Maximum number of rows
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Export transactions to CSV (date,description,amount,type,category)
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Read a CSV in the export format and preview the transactions it holds
    Import {
        /// CSV file to read
        file: PathBuf,
    },

    /// List categories (or the defaults a new user gets)
    Categories,
}

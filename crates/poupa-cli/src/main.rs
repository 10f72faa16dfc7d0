//! Poupa CLI - Personal finance projections and reports
//!
//! Usage:
//!   poupa --data dump.json goals              Savings goals with progress
//!   poupa --data dump.json project Reserva    Goal plan vs deposits
//!   poupa --data dump.json dashboard          Current month dashboard
//!   poupa --data dump.json report --year 2024 Annual report
//!   poupa --data dump.json export -o tx.csv   CSV export

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let snapshot = commands::load_snapshot(&cli.data, cli.user.as_deref())?;
    let json = cli.json;

    match cli.command {
        Commands::Goals => commands::cmd_goals(&snapshot, &config, json),
        Commands::Project { goal } => commands::cmd_project(&snapshot, &config, &goal, json),
        Commands::Planned { goal, month } => {
            commands::cmd_planned(&snapshot, &config, &goal, &month, json)
        }
        Commands::Dashboard { month } => {
            let month = commands::resolve_month(month.as_deref())?;
            commands::cmd_dashboard(&snapshot, &config, month, commands::current_month(), json)
        }
        Commands::Report { year } => {
            let year = commands::resolve_year(&snapshot, year);
            commands::cmd_report(&snapshot, &config, year, json)
        }
        Commands::Transactions {
            from,
            to,
            tx_type,
            category,
            search,
            limit,
        } => {
            let filter = commands::build_filter(
                from.as_deref(),
                to.as_deref(),
                tx_type.as_deref(),
                category,
                search,
            )?;
            commands::cmd_transactions(&snapshot, &config, &filter, limit, json)
        }
        Commands::Export { output } => commands::cmd_export(&snapshot, output.as_deref()),
        Commands::Import { file } => commands::cmd_import(&snapshot, &file, json),
        Commands::Categories => commands::cmd_categories(&snapshot, &config, json),
    }
}

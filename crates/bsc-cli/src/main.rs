//! BSC CLI - Back-office dashboard analytics
//!
//! Usage:
//!   bsc import --invoices inv.csv --expenses exp.csv   Build a snapshot
//!   bsc dashboard                                      Summary, insights, health
//!   bsc settle --invoice inv-1 --amount 250            Record a payment
//!   bsc serve --port 3000                              Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
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
        .with(fmt::layer().with_target(false).compact())
        .init();

    let today = commands::resolve_today(cli.today.as_deref())?;
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Dashboard => {
            let snapshot = commands::load_snapshot(&cli.data, cli.demo, today)?;
            commands::cmd_dashboard(&snapshot, today, &config, cli.json)
        }
        Commands::Insights => {
            let snapshot = commands::load_snapshot(&cli.data, cli.demo, today)?;
            commands::cmd_insights(&snapshot, today, &config, cli.json)
        }
        Commands::Health => {
            let snapshot = commands::load_snapshot(&cli.data, cli.demo, today)?;
            commands::cmd_health(&snapshot, today, &config, cli.json)
        }
        Commands::Summary => {
            let snapshot = commands::load_snapshot(&cli.data, cli.demo, today)?;
            commands::cmd_summary(&snapshot, cli.json)
        }
        Commands::Import {
            invoices,
            expenses,
            business_name,
            currency,
            out,
        } => {
            let out = out.unwrap_or_else(|| cli.data.clone());
            commands::cmd_import(&invoices, &expenses, &business_name, &currency, &out)
                .map(|_| ())
        }
        Commands::Settle {
            invoice,
            amount,
            date,
            method,
            reference,
            notes,
        } => {
            if cli.demo {
                anyhow::bail!("--demo data is not saved; settle against a snapshot file");
            }
            let payment_date = match date.as_deref() {
                Some(d) => commands::parse_date_arg(d, "--date")?,
                None => today,
            };
            let payment = bsc_core::Payment {
                invoice_id: invoice,
                amount,
                payment_date,
                method,
                reference,
                notes,
            };
            commands::cmd_settle(&cli.data, payment, cli.json).map(|_| ())
        }
        Commands::Serve {
            port,
            host,
            static_dir,
        } => {
            let snapshot = commands::load_optional_snapshot(&cli.data, cli.demo, today)?;
            commands::cmd_serve(snapshot, config, &host, port, static_dir.as_deref()).await
        }
    }
}

//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// BSC - Back-office dashboard analytics
#[derive(Parser)]
#[command(name = "bsc")]
#[command(about = "Invoice and expense analytics for small businesses", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Snapshot file (JSON)
    #[arg(long, default_value = "bsc.json", global = true)]
    pub data: PathBuf,

    /// Use built-in demo data instead of the snapshot file
    #[arg(long, global = true)]
    pub demo: bool,

    /// Reference date (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Analytics config (TOML) overriding the defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show summary, insights and financial health together
    Dashboard,

    /// Show dashboard insights
    Insights,

    /// Show the monthly financial health chart with projection
    Health,

    /// Show headline totals
    Summary,

    /// Build a snapshot from invoice and expense CSV files
    Import {
        /// Invoice CSV (id,invoice_number,customer,status,total_amount,issue_date,due_date)
        #[arg(long)]
        invoices: PathBuf,

        /// Expense CSV (id,description,amount,category,date)
        #[arg(long)]
        expenses: PathBuf,

        /// Business name for the snapshot
        #[arg(long, default_value = "My Business")]
        business_name: String,

        /// Business currency code
        #[arg(long, default_value = "USD")]
        currency: String,

        /// Output path (defaults to --data)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Record a payment against an invoice
    Settle {
        /// Invoice id
        #[arg(short, long)]
        invoice: String,

        /// Amount paid
        #[arg(short, long)]
        amount: f64,

        /// Payment date (YYYY-MM-DD, defaults to the reference date)
        #[arg(long)]
        date: Option<String>,

        /// Payment method
        #[arg(long, default_value = "Transfer")]
        method: String,

        /// External reference (cheque number, transfer id)
        #[arg(long)]
        reference: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory of static UI files to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

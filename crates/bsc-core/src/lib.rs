//! BSC Core Library
//!
//! Shared functionality for the bsc back-office analytics tool:
//! - Invoice, expense and payment models
//! - Financial health chart with a one-month projection
//! - Rule-based dashboard insights
//! - Payment settlement
//! - JSON snapshots and CSV import

pub mod analytics;
pub mod config;
pub mod currency;
pub mod error;
pub mod import;
pub mod models;
pub mod settlement;
pub mod snapshot;
pub mod validate;

pub use analytics::{
    compute_financial_health, compute_financial_health_with, generate_insights,
    generate_insights_with, summarize, Dashboard, InsightEngine, InsightRule,
};
pub use config::AnalyticsConfig;
pub use currency::format_money;
pub use error::{Error, Result};
pub use models::{
    Business, DashboardSummary, Expense, FinancialHealthPoint, Insight, InsightAction, InsightKind,
    Invoice, InvoiceStatus, Payment, Settlement,
};
pub use settlement::settle_payment;
pub use snapshot::Snapshot;

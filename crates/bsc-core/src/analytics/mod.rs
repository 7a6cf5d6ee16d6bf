//! Financial analytics for the dashboard
//!
//! Two pure computations over records the caller has already fetched:
//!
//! - **Financial health** - trailing-window monthly revenue/expense/profit
//!   with one projected month
//! - **Insights** - a short, ordered list of advisory messages produced by
//!   independent rules
//!
//! plus the headline summary and a bundle that combines all three.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bsc_core::analytics::{compute_financial_health, generate_insights};
//!
//! let chart = compute_financial_health(&invoices, &expenses, today)?;
//! let insights = generate_insights(&invoices, &expenses, "USD", today)?;
//! ```

pub mod dashboard;
pub mod engine;
pub mod health;
pub mod rules;
pub mod summary;

pub use dashboard::Dashboard;
pub use engine::{
    generate_insights, generate_insights_with, AnalysisContext, InsightEngine, InsightRule,
};
pub use health::{compute_financial_health, compute_financial_health_with, MonthKey};
pub use rules::{ExpenseConcentrationRule, OutstandingReceivablesRule, PaymentTermsRule};
pub use summary::summarize;

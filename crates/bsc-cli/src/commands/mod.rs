//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (snapshot loading, reference date, config)
//! - `import` - Build a snapshot from CSV files
//! - `reports` - Dashboard, insights, health and summary output
//! - `serve` - Web server command
//! - `settle` - Record a payment against an invoice

pub mod core;
pub mod import;
pub mod reports;
pub mod serve;
pub mod settle;

// Re-export command functions for main.rs
pub use core::*;
pub use import::*;
pub use reports::*;
pub use serve::*;
pub use settle::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

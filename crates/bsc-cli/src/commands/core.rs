//! Shared utilities for commands
//!
//! This module contains:
//! - `load_snapshot` - Read the snapshot file or build demo data
//! - `resolve_today` - Reference date from `--today` or the local clock
//! - `load_config` - Analytics thresholds

use std::path::Path;

use anyhow::{Context, Result};
use bsc_core::{AnalyticsConfig, Snapshot};
use chrono::NaiveDate;

/// Load the snapshot, or demo data when `--demo` is set
pub fn load_snapshot(data: &Path, demo: bool, today: NaiveDate) -> Result<Snapshot> {
    if demo {
        return Ok(Snapshot::demo(today));
    }

    if !data.exists() {
        anyhow::bail!(
            "No snapshot at {}. Run `bsc import` first or pass --demo",
            data.display()
        );
    }

    Snapshot::load(data).with_context(|| format!("Failed to load snapshot {}", data.display()))
}

/// Like `load_snapshot`, but a missing file is not an error
pub fn load_optional_snapshot(
    data: &Path,
    demo: bool,
    today: NaiveDate,
) -> Result<Option<Snapshot>> {
    if !demo && !data.exists() {
        return Ok(None);
    }
    load_snapshot(data, demo, today).map(Some)
}

/// Parse a YYYY-MM-DD command-line date
pub fn parse_date_arg(value: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid {} date format (use YYYY-MM-DD)", flag))
}

/// The reference date: `--today` if given, else the local date
pub fn resolve_today(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(value) => parse_date_arg(value, "--today"),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    let config = AnalyticsConfig::load(path).context("Failed to load analytics config")?;
    config.validate().context("Invalid analytics config")?;
    Ok(config)
}

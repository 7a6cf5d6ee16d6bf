//! Analytics configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/bsc/config/analytics.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analytics.toml");

/// Longest trailing window or projection lookback accepted, in months
pub const MAX_WINDOW_MONTHS: u32 = 120;

/// Parameters for the health chart and the insight rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Calendar months in the trailing window, including the current month
    pub window_months: u32,
    /// Most recent real months averaged for the projection
    pub forecast_lookback: u32,
    /// Multiplier applied to average revenue for the projected month
    pub revenue_growth: f64,
    /// Multiplier applied to average expenses for the projected month
    pub expense_growth: f64,
    /// Rounded percentage a single category must exceed to be called out
    pub concentration_threshold_pct: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            window_months: 6,
            forecast_lookback: 3,
            revenue_growth: 1.10,
            expense_growth: 1.05,
            concentration_threshold_pct: 30,
        }
    }
}

impl AnalyticsConfig {
    /// Load from an explicit path, the data-dir override, or the embedded defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                Error::InvalidData(format!(
                    "Failed to read config {}: {}",
                    path.display(),
                    e
                ))
            })?,
            None => match default_config_path() {
                Some(default_path) if default_path.exists() => {
                    tracing::debug!(path = %default_path.display(), "Using config override");
                    fs::read_to_string(&default_path)
                        .map_err(|e| Error::InvalidData(format!("Failed to read config: {}", e)))?
                }
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        parse_config(&content)
    }

    /// Reject values that would make the analytics meaningless
    pub fn validate(&self) -> Result<()> {
        for (name, months) in [
            ("window_months", self.window_months),
            ("forecast_lookback", self.forecast_lookback),
        ] {
            if months == 0 || months > MAX_WINDOW_MONTHS {
                return Err(Error::InvalidData(format!(
                    "{} must be between 1 and {} months, got {}",
                    name, MAX_WINDOW_MONTHS, months
                )));
            }
        }
        for (name, value) in [
            ("revenue_growth", self.revenue_growth),
            ("expense_growth", self.expense_growth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidData(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if self.concentration_threshold_pct > 100 {
            return Err(Error::InvalidData(
                "concentration_threshold_pct must be between 0 and 100".into(),
            ));
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("bsc").join("config").join("analytics.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    health: Option<RawHealth>,
    insights: Option<RawInsights>,
}

#[derive(Debug, Deserialize)]
struct RawHealth {
    window_months: Option<u32>,
    forecast_lookback: Option<u32>,
    revenue_growth: Option<f64>,
    expense_growth: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    concentration_threshold_pct: Option<u32>,
}

/// Parse config from TOML content, filling gaps from the defaults
fn parse_config(content: &str) -> Result<AnalyticsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::InvalidData(format!("Invalid config TOML: {}", e)))?;

    let mut config = AnalyticsConfig::default();

    if let Some(health) = raw.health {
        if let Some(window) = health.window_months {
            config.window_months = window;
        }
        if let Some(lookback) = health.forecast_lookback {
            config.forecast_lookback = lookback;
        }
        if let Some(growth) = health.revenue_growth {
            config.revenue_growth = growth;
        }
        if let Some(growth) = health.expense_growth {
            config.expense_growth = growth;
        }
    }

    if let Some(insights) = raw.insights {
        if let Some(threshold) = insights.concentration_threshold_pct {
            config.concentration_threshold_pct = threshold;
        }
    }

    config.validate()?;
    Ok(config)
}

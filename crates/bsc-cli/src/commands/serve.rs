//! Server command implementation

use std::path::Path;

use anyhow::{anyhow, Result};
use bsc_core::{AnalyticsConfig, Snapshot};

pub async fn cmd_serve(
    snapshot: Option<Snapshot>,
    analytics: AnalyticsConfig,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
) -> Result<()> {
    let static_dir = static_dir_str(static_dir)?;

    println!("🚀 Starting BSC web server...");
    match &snapshot {
        Some(s) => println!("   Business: {} ({})", s.business.name, s.business.currency),
        None => println!("   Business: none loaded (POST endpoints only)"),
    }
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir);
    }

    let config = bsc_server::ServerConfig::from_env();
    if !config.allowed_origins.is_empty() {
        println!(
            "   🌐 CORS origins: {} ({})",
            config.allowed_origins.join(", "),
            bsc_server::ALLOWED_ORIGINS_ENV
        );
    }
    println!();
    println!("   Press Ctrl+C to stop");

    bsc_server::serve_with_config(snapshot, analytics, host, port, static_dir, config).await
}

/// The static directory as UTF-8, which the file server requires
pub fn static_dir_str(dir: Option<&Path>) -> Result<Option<&str>> {
    dir.map(|p| {
        p.to_str()
            .ok_or_else(|| anyhow!("Static directory {} is not valid UTF-8", p.display()))
    })
    .transpose()
}

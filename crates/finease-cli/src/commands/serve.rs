//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use finease_core::Settings;
use finease_server::ServerConfig;

use super::open_db;

pub async fn cmd_serve(
    settings: &Settings,
    host: Option<&str>,
    port: Option<u16>,
    static_dir: Option<&Path>,
) -> Result<()> {
    let host = host.unwrap_or(settings.server.host.as_str());
    let port = port.unwrap_or(settings.server.port);

    println!("🚀 Starting FinEase web server...");
    println!("   Database: {}", settings.database.path.display());
    println!("   Artifacts: {}", settings.artifacts.dir.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if !settings.server.allowed_origins.is_empty() {
        println!(
            "   🌐 CORS origins: {}",
            settings.server.allowed_origins.join(", ")
        );
    }

    let db = open_db(&settings.database.path)?;

    let config = ServerConfig {
        allowed_origins: settings.server.allowed_origins.clone(),
        currency_symbol: Some(settings.report.currency_symbol.clone()),
    };

    let static_dir_str = match static_dir {
        Some(dir) => Some(
            dir.to_str()
                .with_context(|| format!("Static dir is not valid UTF-8: {}", dir.display()))?,
        ),
        None => None,
    };

    finease_server::serve(
        db,
        &settings.artifact_paths(),
        host,
        port,
        static_dir_str,
        config,
    )
    .await
}

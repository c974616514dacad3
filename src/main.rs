use anyhow::Result;
use pantry_receipt::{config, server};
use tracing::info;

/// Validates a log level, or a filter directive such as `info,tower_http=debug`
fn validate_log_level(level: &str) -> Result<()> {
    let valid = if level.contains(['=', ',']) {
        tracing_subscriber::EnvFilter::try_new(level).is_ok()
    } else {
        level
            .parse::<tracing_subscriber::filter::LevelFilter>()
            .is_ok()
    };

    if !valid {
        anyhow::bail!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            level
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // RUST_LOG overrides the configured level
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_level))
        .json()
        .init();

    info!("Starting pantry receipt API with log level: {}", log_level);
    info!("Configuration loaded successfully");

    server::run(config).await?;

    Ok(())
}

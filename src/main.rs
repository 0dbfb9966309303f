use anyhow::{Context, Result};
use qa_relay::{config, server};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// `RUST_LOG` wins over the configured level and may carry full directives.
fn log_filter(configured_level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level: LevelFilter = configured_level.parse().map_err(|_| {
        anyhow::anyhow!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            configured_level
        )
    })?;
    Ok(EnvFilter::default().add_directive(level.into()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logging is configured from the file, so it cannot report its own load failure.
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let filter = match log_filter(&config.server.logs.level) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!(
        host = %config.server.host,
        port = config.server.port,
        "Starting QA relay server"
    );

    server::run(config)
        .await
        .context("QA relay server terminated")?;

    Ok(())
}

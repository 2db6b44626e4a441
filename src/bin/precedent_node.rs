//! Headless web search node reading workflow state from stdin.
//!
//! Each stdin line is a JSON workflow state; each stdout line is the
//! matching JSON state update. All tracing output goes to stderr so
//! that stdout remains a clean JSON protocol channel.
//!
//! The config file path is taken from `PRECEDENT_CONFIG`, falling back to
//! `~/.config/precedent-retrieval/config.toml`. The operator credential
//! and endpoint URLs come from `OPEN_API_USER_ID`, `OPEN_API_SEARCH_URL`
//! and `OPEN_API_SERVICE_URL`.

use std::path::PathBuf;

use precedent_retrieval::{AppConfig, run_node_host};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("precedent_retrieval=info,law_search=info")
            }),
        )
        .init();

    let config_path = std::env::var_os("PRECEDENT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(AppConfig::default_config_path);
    let app_config = AppConfig::load_or_default(&config_path)?;
    let search_config = app_config.search_config().map_err(|e| {
        tracing::error!(error = %e, "precedent-node cannot start");
        anyhow::anyhow!("invalid search configuration: {e}")
    })?;

    tracing::info!(display = search_config.display, "precedent-node starting");

    run_node_host(
        &search_config,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "precedent-node exited with error");
        anyhow::anyhow!("precedent-node failed: {e}")
    })?;

    tracing::info!("precedent-node shut down cleanly");
    Ok(())
}

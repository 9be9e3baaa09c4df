//! dc-admin - terminal console for the digital-community admin backend.

mod config;
mod console;
mod pages;
mod pane;
mod playground_view;
mod runner;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dc_admin_client::{ApiService, Transport, TransportConfig};
use dc_admin_state::AuthStore;

use crate::config::ConsoleConfig;

#[derive(Debug, Parser)]
#[command(name = "dc-admin", version, about = "Terminal console for the digital-community admin backend")]
struct Cli {
    /// Backend base URL; overrides the config file.
    #[arg(long)]
    base_url: Option<String>,

    /// Config file path (default: <config_dir>/dc-admin/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Rows per page for table resources.
    #[arg(long)]
    page_size: Option<u32>,

    /// Keep the session token in memory only.
    #[arg(long)]
    no_persist_token: bool,

    /// Append logs to this file. The TUI owns the terminal, so logging
    /// never goes to stdout.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(file)
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config_path = cli.config.clone().or_else(ConsoleConfig::default_path);
    let mut config = match &config_path {
        Some(path) => ConsoleConfig::load(path)?,
        None => ConsoleConfig::default(),
    };
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }

    let auth = if cli.no_persist_token {
        Arc::new(AuthStore::in_memory())
    } else {
        match AuthStore::default_token_path() {
            Some(path) => Arc::new(AuthStore::with_persistence(path)),
            None => Arc::new(AuthStore::in_memory()),
        }
    };

    let transport_config = TransportConfig {
        base_url: config.base_url.clone(),
        timeout: Duration::from_secs(config.timeout_secs),
    };
    let transport = Transport::new(&transport_config, auth)
        .with_context(|| format!("connecting to {}", config.base_url))?;
    let service = ApiService::new(transport);

    tracing::info!(base_url = %config.base_url, "starting admin console");
    console::run_console(service, config.page_size).await
}

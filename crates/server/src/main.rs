mod host;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use system_capabilities::{InventoryService, ServiceConfig};
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "DISK_INVENTORY_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "inventory.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    init_tracing(&config.log_level)?;

    info!(failure_mode = ?config.failure_mode, "starting disk inventory host");
    let service = Arc::new(InventoryService::new(&config));

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        result = host::serve(service, stdin, stdout) => {
            result.context("host loop failed")?;
            info!("input closed, host exiting");
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("shutdown signal received, stopping host");
        }
    }

    info!("host shutdown complete");
    Ok(())
}

fn load_config() -> anyhow::Result<ServiceConfig> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        let path = PathBuf::from(path);
        return ServiceConfig::from_file(&path)
            .with_context(|| format!("failed to load config from {}", path.display()));
    }

    let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        return ServiceConfig::from_file(&default_path)
            .context("failed to load config from inventory.toml");
    }

    Ok(ServiceConfig::default())
}

fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    // stdout 承载应答，日志只能写到 stderr。
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

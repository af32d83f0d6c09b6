//! Time-clock HTTP server.
//!
//! Reads the configuration named by `TIMECLOCK_CONFIG` (default
//! `config/timeclock.yaml`, built-in defaults when the file is absent) and
//! serves the punch and report API.

use std::env;

use tracing::info;
use tracing_subscriber::EnvFilter;

use timeclock_engine::api::{AppState, create_router};
use timeclock_engine::config::ConfigLoader;

const CONFIG_ENV: &str = "TIMECLOCK_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/timeclock.yaml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let loader = ConfigLoader::load_or_default(&config_path)?;
    let config = loader.config();

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    info!(
        config = %config_path,
        employees = config.employees.len(),
        standard_workday_minutes = config.standard_workday_minutes,
        utc_offset_minutes = config.utc_offset_minutes,
        "Configuration loaded"
    );

    let state = AppState::from_config(&loader);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.server.bind_address.as_str()).await?;
    info!(address = %config.server.bind_address, "Time clock listening");
    axum::serve(listener, router).await?;

    Ok(())
}

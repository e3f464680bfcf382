//! Serves the calculation preview API.
//!
//! The configuration path is read from `PAYSPLIT_CONFIG` and defaults to
//! `./config/payroll.yaml`. Log filtering follows `RUST_LOG`.

use std::env;

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use paysplit_engine::api::{AppState, create_router};
use paysplit_engine::config::ConfigLoader;
use paysplit_engine::error::{PayrollError, PayrollResult};

const DEFAULT_CONFIG_PATH: &str = "./config/payroll.yaml";

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run().await {
        error!(error = %err, "Pay split engine stopped");
        std::process::exit(1);
    }
}

async fn run() -> PayrollResult<()> {
    let config_path = env::var("PAYSPLIT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let loader = ConfigLoader::load(&config_path)?;
    let address = loader.bind_address()?;

    info!(
        config = %config_path,
        bank_cap_policy = %loader.bank_cap_policy(),
        payroll_server = %loader.server().base_url,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(address).await.map_err(|e| PayrollError::Io {
        path: address.to_string(),
        message: e.to_string(),
    })?;
    info!(address = %address, "Listening");

    axum::serve(listener, create_router(AppState::new(loader)))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .map_err(|e| PayrollError::Io {
            path: address.to_string(),
            message: e.to_string(),
        })
}

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

mod api;
mod config;
mod dashboard;
mod monitor;

use api::AdminApiClient;
use config::Config;
use dashboard::AppState;
use monitor::{ActionDispatcher, Monitor, PollScheduler};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    // Build the backend client
    let client = AdminApiClient::new(
        &config.backend_api_url,
        config.admin_api_token.clone(),
        config.request_timeout_secs,
    )?;
    info!("Monitoring backend at {}", config.backend_api_url);

    let monitor = Monitor::new(Arc::new(client));
    let dispatcher = ActionDispatcher::new(monitor.clone());

    // Start polling: one fetch immediately, then one per fixed interval
    let mut scheduler = PollScheduler::new(monitor.clone());
    scheduler.start();

    // Serve the console page
    let app = dashboard::router(AppState {
        monitor,
        dispatcher,
    });
    let addr: SocketAddr = config.console_addr.parse()?;
    info!("Console listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    // Teardown: no further state mutation once the scheduler is stopped
    scheduler.stop();
    Ok(())
}

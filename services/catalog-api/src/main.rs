//! Catalog API Server
//!
//! Serves the climate parameter catalog over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use catalog_api::state::AppState;
use climate_catalog::CatalogConfig;

/// Catalog API Server
#[derive(Parser, Debug)]
#[command(name = "catalog-api")]
#[command(about = "Read-only HTTP API for the climate parameter catalog")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8090", env = "CATALOG_API_LISTEN")]
    listen: String,

    /// Catalog YAML file to serve instead of the built-in catalog
    #[arg(long, env = "CLIMATE_CATALOG_FILE")]
    catalog: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Starting catalog API server");

    let config = CatalogConfig::with_file(args.catalog.clone());
    let state = Arc::new(AppState::new(&config)?);

    info!(
        source = %config.source,
        datasets = state.registry.list_datasets().len(),
        parameters = state.registry.parameter_count(),
        "Catalog loaded"
    );

    let app = catalog_api::router(state, prometheus_handle);

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;

    info!("Catalog API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}

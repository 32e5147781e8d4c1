//! Catalog API Service Library
//!
//! Read-only HTTP endpoints over the climate parameter registry.

pub mod error;
pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use state::AppState;

/// Build the application router.
pub fn router(state: Arc<AppState>, prometheus: PrometheusHandle) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        .route("/coverage", get(handlers::datasets::coverage_handler))
        .route("/datasets", get(handlers::datasets::list_datasets_handler))
        .route(
            "/datasets/:dataset",
            get(handlers::datasets::get_dataset_handler),
        )
        .route(
            "/datasets/:dataset/fields",
            get(handlers::datasets::fields_handler),
        )
        .route(
            "/datasets/:dataset/parameters",
            get(handlers::parameters::list_parameters_handler),
        )
        .route(
            "/datasets/:dataset/parameters/:parameter",
            get(handlers::parameters::lookup_handler),
        )
        .route(
            "/datasets/:dataset/parameters/:parameter/convert",
            get(handlers::parameters::convert_handler),
        )
        .layer(Extension(state))
        .layer(Extension(prometheus))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

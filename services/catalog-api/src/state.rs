//! Application state for the catalog API.

use anyhow::{Context, Result};
use climate_catalog::{CatalogConfig, Registry};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    /// Parameter registry, immutable for the lifetime of the process.
    pub registry: Arc<Registry>,
}

impl AppState {
    /// Load the registry from the configured catalog source.
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let registry = config
            .load()
            .with_context(|| format!("Failed to load catalog from {}", config.source))?;

        Ok(Self::with_registry(registry))
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}

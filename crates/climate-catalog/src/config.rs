//! Catalog source configuration.

use crate::error::Result;
use crate::registry::Registry;
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::{error, info};

/// Environment variable naming a catalog file to load instead of the built-in catalog.
pub const CATALOG_FILE_ENV: &str = "CLIMATE_CATALOG_FILE";

/// Where the registry contents come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogSource {
    /// Catalog compiled into the crate.
    #[default]
    Builtin,
    /// YAML catalog file.
    File(PathBuf),
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Builtin => f.write_str("builtin"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pub source: CatalogSource,
}

impl CatalogConfig {
    /// Read configuration from the environment.
    pub fn from_env() -> Self {
        let source = match env::var(CATALOG_FILE_ENV) {
            Ok(path) if !path.trim().is_empty() => CatalogSource::File(PathBuf::from(path)),
            _ => CatalogSource::Builtin,
        };
        Self { source }
    }

    /// Use an explicit catalog file, or the built-in catalog when `None`.
    pub fn with_file(path: Option<PathBuf>) -> Self {
        Self {
            source: path.map(CatalogSource::File).unwrap_or_default(),
        }
    }

    /// Build the registry from the configured source.
    pub fn load(&self) -> Result<Registry> {
        info!(source = %self.source, "Loading parameter catalog");
        match &self.source {
            CatalogSource::Builtin => Ok(Registry::builtin()),
            CatalogSource::File(path) => Registry::load_from_file(path),
        }
    }

    /// Build the registry, falling back to the built-in catalog if the
    /// configured source cannot be loaded.
    pub fn load_or_builtin(&self) -> Registry {
        match self.load() {
            Ok(registry) => registry,
            Err(e) => {
                error!(
                    source = %self.source,
                    error = %e,
                    "Failed to load configured catalog, falling back to built-in catalog"
                );
                Registry::builtin()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_file() {
        assert_eq!(CatalogConfig::with_file(None).source, CatalogSource::Builtin);
        assert_eq!(
            CatalogConfig::with_file(Some(PathBuf::from("/tmp/catalog.yaml"))).source,
            CatalogSource::File(PathBuf::from("/tmp/catalog.yaml"))
        );
    }

    #[test]
    fn test_builtin_load() {
        let registry = CatalogConfig::default().load().unwrap();
        assert_eq!(registry.list_datasets().len(), 3);
    }

    #[test]
    fn test_missing_file_fails() {
        let config = CatalogConfig::with_file(Some(PathBuf::from("/nonexistent/catalog.yaml")));
        assert!(config.load().is_err());
    }

    #[test]
    fn test_unloadable_file_falls_back_to_builtin() {
        let config = CatalogConfig::with_file(Some(PathBuf::from("/nonexistent/catalog.yaml")));
        let registry = config.load_or_builtin();

        assert_eq!(registry.list_datasets().len(), 3);
        assert!(registry.lookup("climate_summary", "sunshine_duration").is_ok());
    }

    #[test]
    fn test_invalid_file_falls_back_to_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"datasets: []").unwrap();

        let config = CatalogConfig::with_file(Some(file.path().to_path_buf()));
        assert!(config.load().is_err());
        assert_eq!(config.load_or_builtin().parameter_count(), 23);
    }
}

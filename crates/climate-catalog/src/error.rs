//! Error types for the climate catalog.

use thiserror::Error;

/// Errors that can occur while building or querying the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("Parameter not found: {parameter} (dataset {dataset})")]
    ParameterNotFound { dataset: String, parameter: String },

    #[error("No conversion rule registered for unit pair '{origin}' -> '{si}'")]
    ConversionUndefined { origin: String, si: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CatalogError {
    /// True for unknown datasets and unknown parameters.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::DatasetNotFound(_) | CatalogError::ParameterNotFound { .. }
        )
    }

    /// HTTP status code used when the error is surfaced through the API.
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::DatasetNotFound(_) | CatalogError::ParameterNotFound { .. } => 404,
            CatalogError::InvalidArgument(_) => 400,
            CatalogError::ConversionUndefined { .. } => 422,
            CatalogError::InvalidCatalog(_) | CatalogError::Io(_) | CatalogError::Yaml(_) => 500,
        }
    }

    /// Short machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::DatasetNotFound(_) => "DatasetNotFound",
            CatalogError::ParameterNotFound { .. } => "ParameterNotFound",
            CatalogError::ConversionUndefined { .. } => "ConversionUndefined",
            CatalogError::InvalidArgument(_) => "InvalidArgument",
            CatalogError::InvalidCatalog(_) => "InvalidCatalog",
            CatalogError::Io(_) => "Io",
            CatalogError::Yaml(_) => "Yaml",
        }
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kinds() {
        assert!(CatalogError::DatasetNotFound("x".to_string()).is_not_found());
        assert!(CatalogError::ParameterNotFound {
            dataset: "climate_summary".to_string(),
            parameter: "x".to_string(),
        }
        .is_not_found());
        assert!(!CatalogError::InvalidCatalog("x".to_string()).is_not_found());
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(CatalogError::DatasetNotFound("x".to_string()).status_code(), 404);
        assert_eq!(
            CatalogError::ConversionUndefined {
                origin: "in".to_string(),
                si: "m".to_string(),
            }
            .status_code(),
            422
        );
        assert_eq!(CatalogError::InvalidCatalog("x".to_string()).status_code(), 500);
        assert_eq!(CatalogError::InvalidArgument("x".to_string()).status_code(), 400);
    }

    #[test]
    fn test_invalid_argument_code() {
        let err = CatalogError::InvalidArgument("Unknown resolution: yearly".to_string());
        assert_eq!(err.code(), "InvalidArgument");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_error_messages() {
        let err = CatalogError::ParameterNotFound {
            dataset: "weather_phenomena".to_string(),
            parameter: "count_weather_type_snow".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("count_weather_type_snow"));
        assert!(msg.contains("weather_phenomena"));
    }
}

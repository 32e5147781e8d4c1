//! Parameter registry for DWD annual climate observation datasets.
//!
//! Serves the metadata of each (dataset, parameter) pair (origin name,
//! origin unit, SI unit, value constraint, description) and converts origin
//! values into SI units.
//!
//! ```
//! use climate_catalog::Registry;
//!
//! let registry = Registry::builtin();
//! let meta = registry.lookup("climate_summary", "sunshine_duration").unwrap();
//! assert_eq!(meta.si_unit, "s");
//! assert_eq!(registry.convert("climate_summary", "sunshine_duration", 1.0).unwrap(), 3600.0);
//! ```

pub mod annual;
pub mod config;
pub mod constraint;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod parameter;
pub mod registry;
pub mod units;

pub use config::{CatalogConfig, CatalogSource, CATALOG_FILE_ENV};
pub use constraint::Constraint;
pub use dataset::{DatasetInfo, Resolution};
pub use error::{CatalogError, Result};
pub use loader::CatalogFile;
pub use parameter::{Language, Metadata};
pub use registry::{Coverage, FieldDescription, Registry, RegistryBuilder};
pub use units::{Conversion, ConversionRule, ConversionTable};

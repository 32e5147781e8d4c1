//! YAML catalog files.
//!
//! A catalog file replaces the built-in catalog wholesale. It lists the
//! datasets with their parameters and may add conversion rules on top of
//! the defaults:
//!
//! ```yaml
//! conversions:
//!   - { origin: "in", si: "m", scale: 0.0254 }
//! datasets:
//!   - name: climate_summary
//!     origin_name: kl
//!     resolution: annual
//!     url: https://opendata.dwd.de/climate_environment/CDC/observations_germany/climate/annual/kl/
//!     parameters:
//!       - name: sunshine_duration
//!         origin_name: ja_sd_s
//!         origin_unit: h
//!         si_unit: s
//!         description: annual sum of sunshine duration
//!         constraint: "≥0"
//! ```

use crate::constraint::Constraint;
use crate::dataset::{DatasetInfo, Resolution};
use crate::error::{CatalogError, Result};
use crate::parameter::Metadata;
use crate::registry::Registry;
use crate::units::{ConversionRule, ConversionTable};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, error};

/// Top-level layout of a catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conversions: Vec<ConversionRule>,
    pub datasets: Vec<DatasetDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDefinition {
    pub name: String,
    pub origin_name: String,
    pub resolution: Resolution,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_file: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,
    pub origin_name: String,
    pub origin_unit: String,
    pub si_unit: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_de: Option<String>,
    #[serde(default, skip_serializing_if = "Constraint::is_unbounded")]
    pub constraint: Constraint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl CatalogFile {
    /// Build a registry from the file contents.
    pub fn into_registry(self) -> Result<Registry> {
        if self.datasets.is_empty() {
            return Err(CatalogError::InvalidCatalog(
                "Catalog defines no datasets".to_string(),
            ));
        }

        let mut conversions = ConversionTable::with_defaults();
        for rule in &self.conversions {
            if rule.conversion.scale == 0.0 || !rule.conversion.scale.is_finite() {
                return Err(CatalogError::InvalidCatalog(format!(
                    "Conversion '{}' -> '{}' has invalid scale {}",
                    rule.origin, rule.si, rule.conversion.scale
                )));
            }
            if !rule.conversion.offset.is_finite() {
                return Err(CatalogError::InvalidCatalog(format!(
                    "Conversion '{}' -> '{}' has invalid offset {}",
                    rule.origin, rule.si, rule.conversion.offset
                )));
            }
            conversions.register(&rule.origin, &rule.si, rule.conversion);
        }

        let mut builder = Registry::builder(conversions);
        for ds in self.datasets {
            let mut info = DatasetInfo::new(ds.name, ds.origin_name, ds.resolution, ds.url);
            info.description_file = ds.description_file;

            let parameters = ds
                .parameters
                .into_iter()
                .map(|p| Metadata {
                    dataset: info.name.clone(),
                    name: p.name,
                    origin_name: p.origin_name,
                    origin_unit: p.origin_unit,
                    si_unit: p.si_unit,
                    description: p.description,
                    description_de: p.description_de,
                    constraint: p.constraint,
                    reference: p.reference,
                })
                .collect();

            builder.add_dataset(info, parameters)?;
        }

        Ok(builder.build())
    }

    /// Describe an existing registry in file form.
    pub fn from_registry(registry: &Registry) -> Self {
        let datasets = registry
            .list_datasets()
            .into_iter()
            .map(|info| {
                let parameters = registry
                    .list_parameters(&info.name)
                    .unwrap_or_default()
                    .iter()
                    .map(|p| ParameterDefinition {
                        name: p.name.clone(),
                        origin_name: p.origin_name.clone(),
                        origin_unit: p.origin_unit.clone(),
                        si_unit: p.si_unit.clone(),
                        description: p.description.clone(),
                        description_de: p.description_de.clone(),
                        constraint: p.constraint,
                        // Inherited from the dataset when omitted
                        reference: p
                            .reference
                            .clone()
                            .filter(|r| info.description_file.as_ref() != Some(r)),
                    })
                    .collect();

                DatasetDefinition {
                    name: info.name.clone(),
                    origin_name: info.origin_name.clone(),
                    resolution: info.resolution,
                    url: info.url.clone(),
                    description_file: info.description_file.clone(),
                    parameters,
                }
            })
            .collect();

        Self {
            conversions: registry.conversions().rules().to_vec(),
            datasets,
        }
    }
}

impl Registry {
    /// Build a registry from catalog YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Registry> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        file.into_registry()
    }

    /// Build a registry from a catalog file on disk.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid YAML, or describes an
    /// inconsistent catalog (duplicate names, unknown unit pairs, bad
    /// constraints).
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Registry> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            error!(path = ?path, error = %e, "Cannot read catalog file");
            e
        })?;

        let registry = Self::from_yaml_str(&contents).map_err(|e| {
            error!(path = ?path, error = %e, "Invalid catalog file");
            e
        })?;

        debug!(
            path = ?path,
            datasets = registry.list_datasets().len(),
            "Loaded catalog file"
        );
        Ok(registry)
    }

    /// Serialize the registry in catalog file form.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&CatalogFile::from_registry(self))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
conversions:
  - { origin: "in", si: "m", scale: 0.0254 }
datasets:
  - name: snow
    origin_name: snow_origin
    resolution: annual
    url: https://example.org/snow/
    description_file: https://example.org/snow.pdf
    parameters:
      - name: snow_depth_max
        origin_name: sd_mx
        origin_unit: in
        si_unit: m
        description: maximum snow depth
        constraint: "≥0"
      - name: temperature_air_mean_200
        origin_name: tt
        origin_unit: °C
        si_unit: K
"#;

    #[test]
    fn test_from_yaml() {
        let registry = Registry::from_yaml_str(SAMPLE).unwrap();

        let meta = registry.lookup("snow", "snow_depth_max").unwrap();
        assert_eq!(meta.constraint, Constraint::NON_NEGATIVE);
        assert_eq!(meta.reference.as_deref(), Some("https://example.org/snow.pdf"));

        let tt = registry.lookup("snow", "tt").unwrap();
        assert!(tt.constraint.is_unbounded());
        assert_eq!(tt.description, "");

        let v = registry.convert("snow", "snow_depth_max", 10.0).unwrap();
        assert!((v - 0.254).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_unit_pair_rejected() {
        let yaml = SAMPLE.replace("  - { origin: \"in\", si: \"m\", scale: 0.0254 }\n", "");
        let yaml = yaml.replace("conversions:\n", "");
        let err = Registry::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCatalog(_)));
    }

    #[test]
    fn test_bad_constraint_rejected() {
        let yaml = SAMPLE.replace("\"≥0\"", "\"between 0 and 1\"");
        assert!(Registry::from_yaml_str(&yaml).is_err());
    }

    #[test]
    fn test_bad_resolution_rejected() {
        let yaml = SAMPLE.replace("resolution: annual", "resolution: yearly");
        assert!(Registry::from_yaml_str(&yaml).is_err());
    }

    #[test]
    fn test_zero_scale_rejected() {
        let yaml = SAMPLE.replace("scale: 0.0254", "scale: 0");
        assert!(Registry::from_yaml_str(&yaml).is_err());
    }

    #[test]
    fn test_non_finite_offset_rejected() {
        let yaml = SAMPLE.replace("scale: 0.0254", "scale: 0.0254, offset: .nan");
        let err = Registry::from_yaml_str(&yaml).unwrap_err();
        assert!(err.to_string().contains("invalid offset"));

        let yaml = SAMPLE.replace("scale: 0.0254", "scale: 0.0254, offset: .inf");
        assert!(Registry::from_yaml_str(&yaml).is_err());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(Registry::from_yaml_str("datasets: []").is_err());
    }

    #[test]
    fn test_malformed_yaml() {
        let err = Registry::from_yaml_str("datasets: [unterminated").unwrap_err();
        assert!(matches!(err, CatalogError::Yaml(_)));
    }

    #[test]
    fn test_export_omits_inherited_reference() {
        let registry = Registry::builtin();
        let file = CatalogFile::from_registry(&registry);

        assert_eq!(file.datasets.len(), 3);
        assert!(file.datasets[0].parameters.iter().all(|p| p.reference.is_none()));
        assert!(file.datasets[0].description_file.is_some());
    }
}

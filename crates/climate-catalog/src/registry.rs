//! In-memory parameter registry.
//!
//! Maps (dataset, parameter) pairs to their metadata and converts origin
//! values into SI units using the registry's conversion table. A registry is
//! immutable once built; replacing the catalog means building a new one.

use crate::config::CatalogConfig;
use crate::dataset::{DatasetInfo, Resolution};
use crate::error::{CatalogError, Result};
use crate::parameter::{Language, Metadata};
use crate::units::{Conversion, ConversionTable};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

static GLOBAL: Lazy<Registry> = Lazy::new(|| CatalogConfig::from_env().load_or_builtin());

/// Coverage view: resolution -> dataset -> parameter names.
pub type Coverage = BTreeMap<Resolution, BTreeMap<String, Vec<String>>>;

/// A parameter description in a single language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescription {
    pub name: String,
    pub origin_name: String,
    pub origin_unit: String,
    pub description: String,
}

#[derive(Debug, Clone)]
struct DatasetEntry {
    info: DatasetInfo,
    parameters: Vec<Metadata>,
    /// Lowercased canonical and origin names -> index into `parameters`.
    index: HashMap<String, usize>,
}

impl DatasetEntry {
    fn find(&self, parameter: &str) -> Option<&Metadata> {
        self.index
            .get(&parameter.to_lowercase())
            .map(|&i| &self.parameters[i])
    }
}

/// Read-only lookup structure over datasets and their parameters.
#[derive(Debug, Clone)]
pub struct Registry {
    conversions: ConversionTable,
    datasets: Vec<DatasetEntry>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Start building a registry that converts with `conversions`.
    pub fn builder(conversions: ConversionTable) -> RegistryBuilder {
        RegistryBuilder {
            registry: Registry {
                conversions,
                datasets: Vec::new(),
                index: HashMap::new(),
            },
        }
    }

    /// Registry holding the compiled-in annual catalog.
    pub fn builtin() -> Registry {
        crate::annual::annual_registry().expect("built-in annual catalog is consistent")
    }

    /// Process-wide registry, built on first use.
    ///
    /// Loads the catalog file named by `CLIMATE_CATALOG_FILE` if set,
    /// otherwise the built-in catalog.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    fn entry(&self, dataset: &str) -> Result<&DatasetEntry> {
        self.index
            .get(&dataset.to_lowercase())
            .map(|&i| &self.datasets[i])
            .ok_or_else(|| CatalogError::DatasetNotFound(dataset.to_string()))
    }

    /// Metadata of a parameter, addressed by canonical or origin name.
    pub fn lookup(&self, dataset: &str, parameter: &str) -> Result<&Metadata> {
        self.entry(dataset)?
            .find(parameter)
            .ok_or_else(|| CatalogError::ParameterNotFound {
                dataset: dataset.to_string(),
                parameter: parameter.to_string(),
            })
    }

    /// All parameters of a dataset in declaration order.
    pub fn list_parameters(&self, dataset: &str) -> Result<&[Metadata]> {
        Ok(&self.entry(dataset)?.parameters)
    }

    /// All datasets in declaration order.
    pub fn list_datasets(&self) -> Vec<&DatasetInfo> {
        self.datasets.iter().map(|d| &d.info).collect()
    }

    pub fn get_dataset(&self, dataset: &str) -> Result<&DatasetInfo> {
        Ok(&self.entry(dataset)?.info)
    }

    /// Datasets published at a given resolution.
    pub fn datasets_for(&self, resolution: Resolution) -> Vec<&DatasetInfo> {
        self.datasets
            .iter()
            .map(|d| &d.info)
            .filter(|info| info.resolution == resolution)
            .collect()
    }

    pub fn conversions(&self) -> &ConversionTable {
        &self.conversions
    }

    /// The conversion implied by a parameter's unit pair.
    pub fn conversion_for(&self, meta: &Metadata) -> Result<Conversion> {
        let (origin, si) = meta.unit_pair();
        self.conversions
            .get(origin, si)
            .ok_or_else(|| CatalogError::ConversionUndefined {
                origin: origin.to_string(),
                si: si.to_string(),
            })
    }

    /// Convert an origin value of a parameter into its SI unit.
    pub fn convert(&self, dataset: &str, parameter: &str, origin_value: f64) -> Result<f64> {
        let meta = self.lookup(dataset, parameter)?;
        self.convert_metadata(meta, origin_value)
    }

    pub fn convert_metadata(&self, meta: &Metadata, origin_value: f64) -> Result<f64> {
        Ok(self.conversion_for(meta)?.apply(origin_value))
    }

    /// Whether an origin value satisfies the parameter's constraint.
    pub fn check(&self, dataset: &str, parameter: &str, origin_value: f64) -> Result<bool> {
        Ok(self.lookup(dataset, parameter)?.is_valid(origin_value))
    }

    /// Convert a series of origin values.
    ///
    /// Values violating the parameter's constraint become NaN.
    pub fn convert_series(
        &self,
        dataset: &str,
        parameter: &str,
        values: &[f64],
    ) -> Result<Vec<f64>> {
        let meta = self.lookup(dataset, parameter)?;
        let conversion = self.conversion_for(meta)?;

        let mut masked = 0usize;
        let converted = values
            .iter()
            .map(|&v| {
                if meta.is_valid(v) {
                    conversion.apply(v)
                } else {
                    masked += 1;
                    f64::NAN
                }
            })
            .collect();

        if masked > 0 {
            debug!(
                dataset = %meta.dataset,
                parameter = %meta.name,
                masked,
                total = values.len(),
                "Masked values violating constraint"
            );
        }

        Ok(converted)
    }

    /// Parameter names per dataset, grouped by resolution.
    pub fn coverage(&self) -> Coverage {
        let mut coverage = Coverage::new();
        for entry in &self.datasets {
            coverage.entry(entry.info.resolution).or_default().insert(
                entry.info.name.clone(),
                entry.parameters.iter().map(|p| p.name.clone()).collect(),
            );
        }
        coverage
    }

    /// Coverage restricted to some datasets and/or one resolution.
    ///
    /// Unknown dataset names fail with `DatasetNotFound`.
    pub fn coverage_filtered(
        &self,
        datasets: Option<&[&str]>,
        resolution: Option<Resolution>,
    ) -> Result<Coverage> {
        let selected: Vec<&DatasetEntry> = match datasets {
            Some(names) => names
                .iter()
                .map(|name| self.entry(name))
                .collect::<Result<_>>()?,
            None => self.datasets.iter().collect(),
        };

        let mut coverage = Coverage::new();
        for entry in selected
            .into_iter()
            .filter(|e| resolution.map_or(true, |r| e.info.resolution == r))
        {
            coverage.entry(entry.info.resolution).or_default().insert(
                entry.info.name.clone(),
                entry.parameters.iter().map(|p| p.name.clone()).collect(),
            );
        }
        Ok(coverage)
    }

    /// Parameter descriptions of a dataset in the requested language.
    pub fn describe(&self, dataset: &str, language: Language) -> Result<Vec<FieldDescription>> {
        Ok(self
            .list_parameters(dataset)?
            .iter()
            .map(|p| FieldDescription {
                name: p.name.clone(),
                origin_name: p.origin_name.clone(),
                origin_unit: p.origin_unit.clone(),
                description: p.description_in(language).to_string(),
            })
            .collect())
    }

    /// Total number of parameters across all datasets.
    pub fn parameter_count(&self) -> usize {
        self.datasets.iter().map(|d| d.parameters.len()).sum()
    }
}

/// Validating builder for [`Registry`].
#[derive(Debug)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    /// Add a dataset and its parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCatalog` if the dataset name is empty or already
    /// registered, a parameter name or origin name repeats within the
    /// dataset, or a parameter's unit pair has no conversion rule.
    pub fn add_dataset(
        &mut self,
        info: DatasetInfo,
        parameters: Vec<Metadata>,
    ) -> Result<&mut Self> {
        let key = info.name.to_lowercase();
        if key.trim().is_empty() {
            return Err(CatalogError::InvalidCatalog(
                "Dataset with empty name".to_string(),
            ));
        }
        if self.registry.index.contains_key(&key) {
            return Err(CatalogError::InvalidCatalog(format!(
                "Duplicate dataset: {}",
                info.name
            )));
        }

        let mut entry = DatasetEntry {
            info,
            parameters: Vec::with_capacity(parameters.len()),
            index: HashMap::new(),
        };

        for mut meta in parameters {
            if meta.name.trim().is_empty() {
                return Err(CatalogError::InvalidCatalog(format!(
                    "Parameter with empty name in dataset {}",
                    entry.info.name
                )));
            }

            meta.dataset = entry.info.name.clone();
            if meta.reference.is_none() {
                meta.reference = entry.info.description_file.clone();
            }

            let (origin, si) = meta.unit_pair();
            if !self.registry.conversions.contains(origin, si) {
                return Err(CatalogError::InvalidCatalog(format!(
                    "Parameter {}/{} has no conversion rule for '{}' -> '{}'",
                    entry.info.name, meta.name, origin, si
                )));
            }

            let position = entry.parameters.len();
            let name_key = meta.name.to_lowercase();
            let origin_key = meta.origin_name.to_lowercase();
            let mut keys = vec![name_key];
            if origin_key != keys[0] {
                keys.push(origin_key);
            }
            for k in keys {
                if entry.index.insert(k.clone(), position).is_some() {
                    return Err(CatalogError::InvalidCatalog(format!(
                        "Duplicate parameter '{}' in dataset {}",
                        k, entry.info.name
                    )));
                }
            }
            entry.parameters.push(meta);
        }

        debug!(
            dataset = %entry.info.name,
            resolution = %entry.info.resolution,
            parameters = entry.parameters.len(),
            "Registered dataset"
        );

        self.registry.index.insert(key, self.registry.datasets.len());
        self.registry.datasets.push(entry);
        Ok(self)
    }

    pub fn build(self) -> Registry {
        info!(
            datasets = self.registry.datasets.len(),
            parameters = self.registry.parameter_count(),
            "Built parameter registry"
        );
        self.registry
    }
}

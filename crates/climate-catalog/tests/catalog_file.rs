//! Loading catalog files from disk.

use climate_catalog::{CatalogConfig, CatalogError, Registry};
use std::io::Write;
use tempfile::NamedTempFile;

const CATALOG: &str = r#"
datasets:
  - name: climate_summary
    origin_name: kl
    resolution: monthly
    url: https://opendata.dwd.de/climate_environment/CDC/observations_germany/climate/monthly/kl/
    parameters:
      - name: sunshine_duration
        origin_name: mo_sd_s
        origin_unit: h
        si_unit: s
        description: monthly sum of sunshine duration
        description_de: Monatssumme der Sonnenscheindauer
        constraint: "≥0"
"#;

fn write_catalog(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_catalog(CATALOG);
    let registry = Registry::load_from_file(file.path()).unwrap();

    let meta = registry.lookup("climate_summary", "mo_sd_s").unwrap();
    assert_eq!(meta.name, "sunshine_duration");
    assert_eq!(
        registry.convert("climate_summary", "sunshine_duration", 2.0).unwrap(),
        7200.0
    );
}

#[test]
fn test_config_loads_file() {
    let file = write_catalog(CATALOG);
    let config = CatalogConfig::with_file(Some(file.path().to_path_buf()));
    let registry = config.load().unwrap();

    // The file replaces the built-in catalog entirely
    assert_eq!(registry.list_datasets().len(), 1);
    assert!(registry.lookup("weather_phenomena", "ja_nebel").is_err());
}

#[test]
fn test_missing_file() {
    let err = Registry::load_from_file("/nonexistent/catalog.yaml").unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
}

#[test]
fn test_duplicate_parameter_in_file() {
    let duplicated = format!(
        "{}{}",
        CATALOG,
        r#"      - name: sunshine_duration
        origin_name: mo_sd_s_2
        origin_unit: h
        si_unit: s
"#
    );
    let file = write_catalog(&duplicated);
    let err = Registry::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidCatalog(_)));
}

#[test]
fn test_exported_file_loads() {
    let yaml = Registry::builtin().to_yaml().unwrap();
    let file = write_catalog(&yaml);
    let registry = Registry::load_from_file(file.path()).unwrap();

    assert_eq!(registry.parameter_count(), 23);
}

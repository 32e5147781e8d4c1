//! Console formatting of catalog records.

use climate_catalog::{DatasetInfo, FieldDescription, Metadata};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use serde::Serialize;

/// One converted value.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConvertedValue {
    pub origin_value: f64,
    /// NaN (null in JSON) when the value was masked.
    pub si_value: f64,
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).apply_modifier(UTF8_ROUND_CORNERS);
    table
}

pub fn format_datasets(datasets: &[&DatasetInfo]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Dataset", "Origin", "Resolution", "URL"]);

    for ds in datasets {
        table.add_row(vec![
            ds.name.clone(),
            ds.origin_name.clone(),
            ds.resolution.to_string(),
            ds.url.clone(),
        ]);
    }

    table.to_string()
}

pub fn format_parameters(parameters: &[Metadata]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Parameter",
        "Origin",
        "Origin unit",
        "SI unit",
        "Constraint",
        "Description",
    ]);

    for p in parameters {
        table.add_row(vec![
            p.name.clone(),
            p.origin_name.clone(),
            p.origin_unit.clone(),
            p.si_unit.clone(),
            p.constraint.to_string(),
            p.description.clone(),
        ]);
    }

    table.to_string()
}

pub fn format_metadata(meta: &Metadata) -> String {
    let mut table = new_table();
    table.set_header(vec![format!("{}/{}", meta.dataset, meta.name)]);

    table.add_row(vec!["Origin name:", &meta.origin_name]);
    table.add_row(vec!["Origin unit:", &meta.origin_unit]);
    table.add_row(vec!["SI unit:", &meta.si_unit]);
    table.add_row(vec!["Constraint:", &meta.constraint.to_string()]);
    table.add_row(vec!["Description:", &meta.description]);
    if let Some(de) = &meta.description_de {
        table.add_row(vec!["Beschreibung:", de]);
    }
    if let Some(reference) = &meta.reference {
        table.add_row(vec!["Reference:", reference]);
    }

    table.to_string()
}

pub fn format_conversions(meta: &Metadata, values: &[ConvertedValue]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        format!("{} [{}]", meta.name, meta.origin_unit),
        format!("{} [{}]", meta.name, meta.si_unit),
    ]);

    for v in values {
        let si = if v.si_value.is_nan() {
            "masked".to_string()
        } else {
            format!("{}", v.si_value)
        };
        table.add_row(vec![format!("{}", v.origin_value), si]);
    }

    table.to_string()
}

pub fn format_fields(fields: &[FieldDescription]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Parameter", "Origin", "Unit", "Description"]);

    for f in fields {
        table.add_row(vec![
            f.name.clone(),
            f.origin_name.clone(),
            f.origin_unit.clone(),
            f.description.clone(),
        ]);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use climate_catalog::Registry;

    #[test]
    fn test_format_parameters_lists_every_parameter() {
        let registry = Registry::builtin();
        let params = registry.list_parameters("weather_phenomena").unwrap();
        let out = format_parameters(params);

        for p in params {
            assert!(out.contains(&p.name));
        }
        assert!(out.contains("≥0"));
    }

    #[test]
    fn test_format_metadata() {
        let registry = Registry::builtin();
        let meta = registry.lookup("climate_summary", "sunshine_duration").unwrap();
        let out = format_metadata(meta);

        assert!(out.contains("climate_summary/sunshine_duration"));
        assert!(out.contains("ja_sd_s"));
        assert!(out.contains("Jahressumme der Sonnenscheindauer"));
    }

    #[test]
    fn test_format_conversions_marks_masked_values() {
        let registry = Registry::builtin();
        let meta = registry.lookup("climate_summary", "sunshine_duration").unwrap();
        let out = format_conversions(
            meta,
            &[
                ConvertedValue {
                    origin_value: 1.0,
                    si_value: 3600.0,
                },
                ConvertedValue {
                    origin_value: -1.0,
                    si_value: f64::NAN,
                },
            ],
        );

        assert!(out.contains("3600"));
        assert!(out.contains("masked"));
        assert!(out.contains("sunshine_duration [h]"));
    }

    #[test]
    fn test_masked_value_serializes_as_null() {
        let json = serde_json::to_value(ConvertedValue {
            origin_value: 9.0,
            si_value: f64::NAN,
        })
        .unwrap();
        assert!(json["si_value"].is_null());
    }
}

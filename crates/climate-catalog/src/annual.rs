//! Built-in catalog of the DWD annual observation datasets.
//!
//! Mirrors the parameter tables of the provider's `annual` directory:
//! climate summary (`kl`), additional precipitation (`more_precip`) and
//! weather phenomena counts.

use crate::constraint::Constraint;
use crate::dataset::{DatasetInfo, Resolution};
use crate::error::Result;
use crate::parameter::Metadata;
use crate::registry::{Registry, RegistryBuilder};
use crate::units::ConversionTable;

const BASE_URL: &str = "https://opendata.dwd.de/climate_environment/CDC/observations_germany/climate/annual";

/// One row of a parameter table.
struct Row {
    name: &'static str,
    origin_name: &'static str,
    origin_unit: &'static str,
    si_unit: &'static str,
    description: &'static str,
    description_de: &'static str,
    constraint: Constraint,
}

const fn row(
    name: &'static str,
    origin_name: &'static str,
    origin_unit: &'static str,
    si_unit: &'static str,
    description: &'static str,
    description_de: &'static str,
    constraint: Constraint,
) -> Row {
    Row {
        name,
        origin_name,
        origin_unit,
        si_unit,
        description,
        description_de,
        constraint,
    }
}

const CLOUD_COVER: Constraint = Constraint {
    min: Some(0.0),
    max: Some(8.0),
};
const NON_NEG: Constraint = Constraint::NON_NEGATIVE;
const NONE: Constraint = Constraint::NONE;

#[rustfmt::skip]
const CLIMATE_SUMMARY: &[Row] = &[
    row("cloud_cover_total", "ja_n", "1/8", "%",
        "annual mean of cloud cover",
        "Jahresmittel des Bedeckungsgrades", CLOUD_COVER),
    row("temperature_air_mean_200", "ja_tt", "°C", "K",
        "annual mean of daily temperature means in 2 m",
        "Jahresmittel der Tagesmittel der Lufttemperatur in 2m Hoehe", NONE),
    row("temperature_air_max_200_mean", "ja_tx", "°C", "K",
        "annual mean of daily temperature maxima in 2 m",
        "Jahresmittel der Tagesmaxima der Lufttemperatur in 2m Hoehe", NONE),
    row("temperature_air_min_200_mean", "ja_tn", "°C", "K",
        "annual mean of daily temperature minima in 2 m",
        "Jahresmittel der Tagesminima der Lufttemperatur in 2m Hoehe", NONE),
    row("sunshine_duration", "ja_sd_s", "h", "s",
        "annual sum of sunshine duration",
        "Jahressumme der Sonnenscheindauer", NON_NEG),
    row("wind_force_beaufort", "ja_fk", "Bft", "-",
        "annual mean of daily wind force",
        "Jahresmittel der Windstaerke", NON_NEG),
    row("temperature_air_max_200", "ja_mx_tx", "°C", "K",
        "absolute maximum of daily temperature maxima in 2 m",
        "absolutes Maximum der Tagesmaxima der Lufttemperatur in 2m Hoehe", NONE),
    row("wind_gust_max", "ja_mx_fx", "m/s", "m/s",
        "annual maximum of daily wind gust maxima",
        "Jahresmaximum der taeglichen Windspitzen", NON_NEG),
    row("temperature_air_min_200", "ja_mx_tn", "°C", "K",
        "absolute minimum of daily temperature minima in 2 m",
        "absolutes Minimum der Tagesminima der Lufttemperatur in 2m Hoehe", NONE),
    row("precipitation_height", "ja_rr", "mm", "kg/m²",
        "annual sum of precipitation height",
        "Jahressumme der Niederschlagshoehe", NON_NEG),
    row("precipitation_height_max", "ja_mx_rs", "mm", "kg/m²",
        "annual maximum of daily precipitation height",
        "Jahresmaximum der taeglichen Niederschlagshoehe", NON_NEG),
];

#[rustfmt::skip]
const PRECIPITATION_MORE: &[Row] = &[
    row("snow_depth_new", "ja_nsh", "cm", "m",
        "annual sum of daily fresh snow depth",
        "Jahressumme der taeglichen Neuschneehoehe", NON_NEG),
    row("precipitation_height", "ja_rr", "mm", "kg/m²",
        "annual sum of precipitation height",
        "Jahressumme der Niederschlagshoehe", NON_NEG),
    row("snow_depth", "ja_sh_s", "cm", "m",
        "annual sum of daily snow depth",
        "Jahressumme der taeglichen Schneehoehe", NON_NEG),
    row("precipitation_height_max", "ja_mx_rs", "mm", "kg/m²",
        "annual maximum of daily precipitation height",
        "Jahresmaximum der taeglichen Niederschlagshoehe", NON_NEG),
];

#[rustfmt::skip]
const WEATHER_PHENOMENA: &[Row] = &[
    row("count_weather_type_fog", "ja_nebel", "-", "-",
        "count of days with fog",
        "Anzahl der Tage mit Nebel", NON_NEG),
    row("count_weather_type_thunder", "ja_gewitter", "-", "-",
        "count of days with thunder",
        "Anzahl der Tage mit Gewitter", NON_NEG),
    row("count_weather_type_storm_strong_wind", "ja_sturm_6", "-", "-",
        "count of days with storm (wind force of at least 6 Bft)",
        "Anzahl der Tage mit Sturm (mind. Windstaerke 6 Bft)", NON_NEG),
    row("count_weather_type_storm_stormier_wind", "ja_sturm_8", "-", "-",
        "count of days with storm (wind force of at least 8 Bft)",
        "Anzahl der Tage mit Sturm (mind. Windstaerke 8 Bft)", NON_NEG),
    row("count_weather_type_dew", "ja_tau", "-", "-",
        "count of days with dew",
        "Anzahl der Tage mit Tau", NON_NEG),
    row("count_weather_type_glaze", "ja_glatteis", "-", "-",
        "count of days with glaze",
        "Anzahl der Tage mit Glatteis", NON_NEG),
    row("count_weather_type_ripe", "ja_reif", "-", "-",
        "count of days with hoar frost",
        "Anzahl der Tage mit Reif", NON_NEG),
    row("count_weather_type_hail", "ja_hagel", "-", "-",
        "count of days with hail",
        "Anzahl der Tage mit Hagel", NON_NEG),
];

fn dataset(name: &str, origin_name: &str) -> DatasetInfo {
    DatasetInfo::new(
        name,
        origin_name,
        Resolution::Annual,
        format!("{}/{}/", BASE_URL, origin_name),
    )
    .with_description_file(format!(
        "{}/{}/DESCRIPTION_obsgermany_climate_annual_{}_en.pdf",
        BASE_URL, origin_name, origin_name
    ))
}

fn parameters(dataset: &str, rows: &[Row]) -> Vec<Metadata> {
    rows.iter()
        .map(|r| Metadata {
            dataset: dataset.to_string(),
            name: r.name.to_string(),
            origin_name: r.origin_name.to_string(),
            origin_unit: r.origin_unit.to_string(),
            si_unit: r.si_unit.to_string(),
            description: r.description.to_string(),
            description_de: Some(r.description_de.to_string()),
            constraint: r.constraint,
            reference: None,
        })
        .collect()
}

/// Add the annual datasets to a builder.
pub fn register_annual(builder: &mut RegistryBuilder) -> Result<()> {
    for (name, origin_name, rows) in [
        ("climate_summary", "kl", CLIMATE_SUMMARY),
        ("precipitation_more", "more_precip", PRECIPITATION_MORE),
        ("weather_phenomena", "weather_phenomena", WEATHER_PHENOMENA),
    ] {
        builder.add_dataset(dataset(name, origin_name), parameters(name, rows))?;
    }
    Ok(())
}

/// Build a registry holding only the annual datasets.
pub fn annual_registry() -> Result<Registry> {
    let mut builder = Registry::builder(ConversionTable::with_defaults());
    register_annual(&mut builder)?;
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annual_registry_builds() {
        let registry = annual_registry().unwrap();
        assert_eq!(registry.list_datasets().len(), 3);
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(CLIMATE_SUMMARY.len(), 11);
        assert_eq!(PRECIPITATION_MORE.len(), 4);
        assert_eq!(WEATHER_PHENOMENA.len(), 8);
    }

    #[test]
    fn test_dataset_urls() {
        let ds = dataset("climate_summary", "kl");
        assert!(ds.url.ends_with("/annual/kl/"));
        assert!(ds
            .description_file
            .as_deref()
            .unwrap()
            .ends_with("DESCRIPTION_obsgermany_climate_annual_kl_en.pdf"));
    }
}

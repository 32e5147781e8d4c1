//! Dataset descriptions and temporal resolutions.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Temporal resolution of a DWD observation dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Resolution {
    Minute1,
    Minute10,
    Hourly,
    Subdaily,
    Daily,
    Monthly,
    Annual,
}

impl Resolution {
    pub const ALL: [Resolution; 7] = [
        Resolution::Minute1,
        Resolution::Minute10,
        Resolution::Hourly,
        Resolution::Subdaily,
        Resolution::Daily,
        Resolution::Monthly,
        Resolution::Annual,
    ];

    /// Name as used in DWD directory paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Minute1 => "1_minute",
            Resolution::Minute10 => "10_minutes",
            Resolution::Hourly => "hourly",
            Resolution::Subdaily => "subdaily",
            Resolution::Daily => "daily",
            Resolution::Monthly => "monthly",
            Resolution::Annual => "annual",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1_minute" | "minute_1" => Ok(Resolution::Minute1),
            "10_minutes" | "minute_10" => Ok(Resolution::Minute10),
            "hourly" => Ok(Resolution::Hourly),
            "subdaily" => Ok(Resolution::Subdaily),
            "daily" => Ok(Resolution::Daily),
            "monthly" => Ok(Resolution::Monthly),
            "annual" => Ok(Resolution::Annual),
            other => Err(CatalogError::InvalidArgument(format!(
                "Unknown resolution: {}",
                other
            ))),
        }
    }
}

impl TryFrom<String> for Resolution {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Resolution> for String {
    fn from(r: Resolution) -> Self {
        r.as_str().to_string()
    }
}

/// A named collection of parameters published by the data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Canonical name (e.g., "climate_summary").
    pub name: String,
    /// Name used by the provider (e.g., "kl").
    pub origin_name: String,
    pub resolution: Resolution,
    /// Directory the provider publishes the data files in.
    pub url: String,
    /// Provider's dataset description document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_file: Option<String>,
}

impl DatasetInfo {
    pub fn new(
        name: impl Into<String>,
        origin_name: impl Into<String>,
        resolution: Resolution,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            origin_name: origin_name.into(),
            resolution,
            url: url.into(),
            description_file: None,
        }
    }

    pub fn with_description_file(mut self, url: impl Into<String>) -> Self {
        self.description_file = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_parse() {
        assert_eq!("annual".parse::<Resolution>().unwrap(), Resolution::Annual);
        assert_eq!("ANNUAL".parse::<Resolution>().unwrap(), Resolution::Annual);
        assert_eq!("10_minutes".parse::<Resolution>().unwrap(), Resolution::Minute10);
        assert!(matches!(
            "yearly".parse::<Resolution>(),
            Err(CatalogError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_resolution_names_roundtrip() {
        for r in Resolution::ALL {
            assert_eq!(r.to_string().parse::<Resolution>().unwrap(), r);
        }
    }

    #[test]
    fn test_dataset_json() {
        let ds = DatasetInfo::new("climate_summary", "kl", Resolution::Annual, "https://example.org/kl/");
        let json = serde_json::to_value(&ds).unwrap();

        assert_eq!(json["resolution"], "annual");
        assert_eq!(json["origin_name"], "kl");
        assert!(json.get("description_file").is_none());
    }
}

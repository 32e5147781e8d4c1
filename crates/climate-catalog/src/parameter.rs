//! Parameter metadata records.

use crate::constraint::Constraint;
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language of parameter descriptions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::En => f.write_str("en"),
            Language::De => f.write_str("de"),
        }
    }
}

impl FromStr for Language {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "de" => Ok(Language::De),
            other => Err(CatalogError::InvalidArgument(format!(
                "Unsupported language: {} (expected 'en' or 'de')",
                other
            ))),
        }
    }
}

/// Metadata of a single parameter within a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Dataset this parameter belongs to.
    pub dataset: String,
    /// Canonical name (e.g., "temperature_air_mean_200").
    pub name: String,
    /// Column name used by the provider (e.g., "ja_tt").
    pub origin_name: String,
    pub origin_unit: String,
    pub si_unit: String,
    /// English description.
    pub description: String,
    /// Description as published by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_de: Option<String>,
    pub constraint: Constraint,
    /// Documentation the parameter is defined in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Metadata {
    /// The (origin unit, SI unit) pair that selects the conversion rule.
    pub fn unit_pair(&self) -> (&str, &str) {
        (&self.origin_unit, &self.si_unit)
    }

    /// Description in the requested language, falling back to English.
    pub fn description_in(&self, language: Language) -> &str {
        match language {
            Language::De => self.description_de.as_deref().unwrap_or(&self.description),
            Language::En => &self.description,
        }
    }

    /// Whether an origin value satisfies the documented constraint.
    pub fn is_valid(&self, value: f64) -> bool {
        self.constraint.contains(value)
    }
}

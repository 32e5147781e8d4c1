//! Documented valid-value ranges of parameters.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inclusive bounds on observed values, in the parameter's origin unit.
///
/// Rendered the way the DWD tables print them: `≥0`, `≤100`, `≥0 and ≤8`.
/// An unbounded constraint renders as an empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Constraint {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Constraint {
    /// No bounds.
    pub const NONE: Constraint = Constraint {
        min: None,
        max: None,
    };

    /// Non-negative values (`≥0`), the bound of every count and sum.
    pub const NON_NEGATIVE: Constraint = Constraint {
        min: Some(0.0),
        max: None,
    };

    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Check whether a value satisfies the bounds.
    ///
    /// NaN fails any constraint that has a bound.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        if self.is_unbounded() {
            return true;
        }
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) => write!(f, "≥{} and ≤{}", min, max),
            (Some(min), None) => write!(f, "≥{}", min),
            (None, Some(max)) => write!(f, "≤{}", max),
            (None, None) => Ok(()),
        }
    }
}

impl FromStr for Constraint {
    type Err = CatalogError;

    /// Parse `≥0`, `≥0 and ≤8`, `>=0, <=8` or an empty string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut constraint = Constraint::NONE;

        let parts = s
            .split(',')
            .flat_map(|p| p.split(" and "))
            .map(str::trim)
            .filter(|p| !p.is_empty());

        for part in parts {
            let (is_min, rest) = if let Some(rest) = part.strip_prefix('≥') {
                (true, rest)
            } else if let Some(rest) = part.strip_prefix(">=") {
                (true, rest)
            } else if let Some(rest) = part.strip_prefix('≤') {
                (false, rest)
            } else if let Some(rest) = part.strip_prefix("<=") {
                (false, rest)
            } else {
                return Err(CatalogError::InvalidCatalog(format!(
                    "Invalid constraint '{}': expected a bound like '≥0' or '≤8'",
                    s
                )));
            };

            let bound: f64 = rest.trim().parse().map_err(|_| {
                CatalogError::InvalidCatalog(format!("Invalid bound '{}' in constraint '{}'", rest, s))
            })?;
            if !bound.is_finite() {
                return Err(CatalogError::InvalidCatalog(format!(
                    "Non-finite bound '{}' in constraint '{}'",
                    rest.trim(),
                    s
                )));
            }

            let slot = if is_min {
                &mut constraint.min
            } else {
                &mut constraint.max
            };
            if slot.is_some() {
                return Err(CatalogError::InvalidCatalog(format!(
                    "Constraint '{}' sets the same bound twice",
                    s
                )));
            }
            *slot = Some(bound);
        }

        if let (Some(min), Some(max)) = (constraint.min, constraint.max) {
            if min > max {
                return Err(CatalogError::InvalidCatalog(format!(
                    "Constraint '{}' has lower bound above upper bound",
                    s
                )));
            }
        }

        Ok(constraint)
    }
}

impl TryFrom<String> for Constraint {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Constraint> for String {
    fn from(c: Constraint) -> Self {
        c.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Constraint::NON_NEGATIVE.to_string(), "≥0");
        assert_eq!(Constraint::between(0.0, 8.0).to_string(), "≥0 and ≤8");
        assert_eq!(Constraint::at_most(100.0).to_string(), "≤100");
        assert_eq!(Constraint::NONE.to_string(), "");
        assert_eq!(Constraint::at_least(-0.5).to_string(), "≥-0.5");
    }

    #[test]
    fn test_parse() {
        assert_eq!("≥0".parse::<Constraint>().unwrap(), Constraint::NON_NEGATIVE);
        assert_eq!(
            "≥0 and ≤8".parse::<Constraint>().unwrap(),
            Constraint::between(0.0, 8.0)
        );
        assert_eq!(
            ">=0, <=8".parse::<Constraint>().unwrap(),
            Constraint::between(0.0, 8.0)
        );
        assert_eq!("".parse::<Constraint>().unwrap(), Constraint::NONE);
        assert_eq!("  ".parse::<Constraint>().unwrap(), Constraint::NONE);
    }

    #[test]
    fn test_parse_display_agree() {
        for c in [
            Constraint::NONE,
            Constraint::NON_NEGATIVE,
            Constraint::between(0.0, 8.0),
            Constraint::at_most(12.5),
        ] {
            assert_eq!(c.to_string().parse::<Constraint>().unwrap(), c);
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!("0..8".parse::<Constraint>().is_err());
        assert!("≥abc".parse::<Constraint>().is_err());
        assert!("≥0 and ≥1".parse::<Constraint>().is_err());
        assert!("≥8 and ≤0".parse::<Constraint>().is_err());
        assert!("≥NaN".parse::<Constraint>().is_err());
        assert!("≤inf".parse::<Constraint>().is_err());
        assert!(">=-inf and <=8".parse::<Constraint>().is_err());
    }

    #[test]
    fn test_contains() {
        let c = Constraint::between(0.0, 8.0);
        assert!(c.contains(0.0));
        assert!(c.contains(8.0));
        assert!(!c.contains(-0.1));
        assert!(!c.contains(8.1));
        assert!(!c.contains(f64::NAN));

        assert!(Constraint::NON_NEGATIVE.contains(1e9));
        assert!(Constraint::NONE.contains(-999.0));
    }
}

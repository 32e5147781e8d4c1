//! Unit conversion rules between origin units and SI units.
//!
//! A conversion is a fixed linear mapping `si = origin * scale + offset`,
//! looked up by the (origin unit, SI unit) pair of a parameter. Equal unit
//! strings always convert with the identity rule.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Linear scale/offset applied to an origin value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub scale: f64,
    #[serde(default)]
    pub offset: f64,
}

impl Conversion {
    pub const IDENTITY: Conversion = Conversion {
        scale: 1.0,
        offset: 0.0,
    };

    pub fn new(scale: f64, offset: f64) -> Self {
        Self { scale, offset }
    }

    pub fn scale(scale: f64) -> Self {
        Self { scale, offset: 0.0 }
    }

    /// Convert a value given in the origin unit.
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        value * self.scale + self.offset
    }

    /// Convert an SI value back into the origin unit.
    #[inline]
    pub fn invert(&self, value: f64) -> f64 {
        (value - self.offset) / self.scale
    }
}

/// A registered rule as it appears in catalog files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRule {
    pub origin: String,
    pub si: String,
    #[serde(flatten)]
    pub conversion: Conversion,
}

/// Lookup table from (origin unit, SI unit) to a conversion.
#[derive(Debug, Clone, Default)]
pub struct ConversionTable {
    rules: Vec<ConversionRule>,
    index: HashMap<(String, String), usize>,
}

impl ConversionTable {
    /// Create an empty table. Only identity conversions resolve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the rules needed by the DWD observation catalogs.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.register("h", "s", Conversion::scale(3600.0));
        table.register("min", "s", Conversion::scale(60.0));
        table.register("cm", "m", Conversion::scale(0.01));
        table.register("km", "m", Conversion::scale(1000.0));
        table.register("mm", "kg/m²", Conversion::IDENTITY);
        table.register("°C", "K", Conversion::new(1.0, 273.15));
        table.register("1/8", "%", Conversion::scale(12.5));
        table.register("hPa", "Pa", Conversion::scale(100.0));
        table.register("kJ/m²", "J/m²", Conversion::scale(1000.0));
        table.register("J/cm²", "J/m²", Conversion::scale(10_000.0));
        // Beaufort force is kept as a dimensionless class number.
        table.register("Bft", "-", Conversion::IDENTITY);
        table
    }

    /// Register (or replace) the rule for a unit pair.
    pub fn register(&mut self, origin: &str, si: &str, conversion: Conversion) {
        let key = (origin.trim().to_string(), si.trim().to_string());
        match self.index.get(&key) {
            Some(&i) => self.rules[i].conversion = conversion,
            None => {
                self.index.insert(key.clone(), self.rules.len());
                self.rules.push(ConversionRule {
                    origin: key.0,
                    si: key.1,
                    conversion,
                });
            }
        }
    }

    /// Find the conversion for a unit pair.
    ///
    /// Equal units resolve to the identity even without a registered rule.
    pub fn get(&self, origin: &str, si: &str) -> Option<Conversion> {
        let origin = origin.trim();
        let si = si.trim();
        self.index
            .get(&(origin.to_string(), si.to_string()))
            .map(|&i| self.rules[i].conversion)
            .or_else(|| (origin == si).then_some(Conversion::IDENTITY))
    }

    /// Whether a conversion exists for the unit pair.
    pub fn contains(&self, origin: &str, si: &str) -> bool {
        self.get(origin, si).is_some()
    }

    /// Convert a value from `origin` into `si`.
    pub fn convert(&self, origin: &str, si: &str, value: f64) -> Result<f64> {
        self.get(origin, si)
            .map(|c| c.apply(value))
            .ok_or_else(|| CatalogError::ConversionUndefined {
                origin: origin.to_string(),
                si: si.to_string(),
            })
    }

    /// Registered rules in registration order.
    pub fn rules(&self) -> &[ConversionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_default_rules() {
        let table = ConversionTable::with_defaults();

        assert_close(table.convert("h", "s", 1.0).unwrap(), 3600.0);
        assert_close(table.convert("cm", "m", 250.0).unwrap(), 2.5);
        assert_close(table.convert("°C", "K", 0.0).unwrap(), 273.15);
        assert_close(table.convert("°C", "K", -10.0).unwrap(), 263.15);
        assert_close(table.convert("1/8", "%", 8.0).unwrap(), 100.0);
        assert_close(table.convert("mm", "kg/m²", 712.4).unwrap(), 712.4);
    }

    #[test]
    fn test_identity_for_equal_units() {
        let table = ConversionTable::new();

        assert_eq!(table.get("m/s", "m/s"), Some(Conversion::IDENTITY));
        assert_eq!(table.get("-", "-"), Some(Conversion::IDENTITY));
        assert_close(table.convert("-", "-", 17.0).unwrap(), 17.0);
    }

    #[test]
    fn test_undefined_pair() {
        let table = ConversionTable::with_defaults();

        let err = table.convert("in", "m", 1.0).unwrap_err();
        assert!(matches!(err, CatalogError::ConversionUndefined { .. }));
        // Rules are directional
        assert!(table.get("s", "h").is_none());
    }

    #[test]
    fn test_register_replaces_existing_rule() {
        let mut table = ConversionTable::with_defaults();
        let before = table.len();

        table.register("h", "s", Conversion::scale(60.0));
        assert_eq!(table.len(), before);
        assert_close(table.convert("h", "s", 2.0).unwrap(), 120.0);

        table.register("in", "m", Conversion::scale(0.0254));
        assert_eq!(table.len(), before + 1);
        assert_eq!(table.rules().last().unwrap().origin, "in");
    }

    #[test]
    fn test_invert() {
        let c = Conversion::new(1.0, 273.15);
        assert_close(c.invert(c.apply(12.3)), 12.3);

        let c = Conversion::scale(3600.0);
        assert_close(c.invert(7200.0), 2.0);
    }

    #[test]
    fn test_conversion_is_linear() {
        let table = ConversionTable::with_defaults();
        for rule in table.rules() {
            let c = rule.conversion;
            let a = c.apply(3.0);
            let b = c.apply(5.0);
            // f(a + b) - f(0) == (f(a) - f(0)) + (f(b) - f(0))
            assert_close(c.apply(8.0) - c.apply(0.0), (a - c.apply(0.0)) + (b - c.apply(0.0)));
            assert_eq!(c.apply(3.0).to_bits(), a.to_bits());
        }
    }
}

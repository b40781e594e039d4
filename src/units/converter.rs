//! Unit conversion functions
//!
//! Every conversion goes through milliliters. Inputs are not validated:
//! negative values and NaN/infinity pass straight through the arithmetic.

use super::volume::{scale_to_ml, VolUnit};

/// Convert a quantity in the given unit to milliliters
pub fn to_ml(value: f64, unit: VolUnit) -> f64 {
    value * scale_to_ml(unit)
}

/// Convert a quantity in the given unit to US gallons
pub fn to_gal(value: f64, unit: VolUnit) -> f64 {
    to_ml(value, unit) / scale_to_ml(VolUnit::Gallon)
}

/// Convert a quantity between any two volume units
pub fn convert(value: f64, from: VolUnit, to: VolUnit) -> f64 {
    to_ml(value, from) / scale_to_ml(to)
}

//! Unit types and conversion constants
//!
//! Volume and dosage unit tags used by feed charts, plus the fixed
//! milliliter scale factors every conversion goes through.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Volume Conversion Constants (to milliliters)
// ============================================================================

/// Milliliters per milliliter
pub const ML_PER_ML: f64 = 1.0;
/// Milliliters per liter
pub const ML_PER_LITER: f64 = 1000.0;
/// Milliliters per fluid ounce (US)
pub const ML_PER_FL_OZ: f64 = 29.5735;
/// Milliliters per gallon (US)
pub const ML_PER_GALLON: f64 = 3785.41;

/// Unit parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("Unknown volume unit '{0}' (expected one of: mL, L, fl oz, gal)")]
    UnknownVolumeUnit(String),

    #[error("Unknown nutrient unit '{0}' (expected one of: mL, g)")]
    UnknownNutrientUnit(String),
}

/// Unit of a volume quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolUnit {
    #[serde(rename = "mL")]
    Milliliter,
    #[serde(rename = "L")]
    Liter,
    #[serde(rename = "fl oz")]
    FluidOunce,
    #[serde(rename = "gal")]
    Gallon,
}

impl VolUnit {
    /// Every supported volume unit, smallest first
    pub const ALL: [VolUnit; 4] = [
        VolUnit::Milliliter,
        VolUnit::FluidOunce,
        VolUnit::Liter,
        VolUnit::Gallon,
    ];

    /// The display tag for this unit, identical to its serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            VolUnit::Milliliter => "mL",
            VolUnit::Liter => "L",
            VolUnit::FluidOunce => "fl oz",
            VolUnit::Gallon => "gal",
        }
    }
}

impl fmt::Display for VolUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VolUnit {
    type Err = UnitError;

    /// Accepts the canonical tags and common spellings, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.trim() {
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Ok(VolUnit::Milliliter)
            }
            "l" | "liter" | "liters" | "litre" | "litres" => Ok(VolUnit::Liter),
            "fl oz" | "floz" | "fl. oz" | "fluid ounce" | "fluid ounces" => {
                Ok(VolUnit::FluidOunce)
            }
            "gal" | "gallon" | "gallons" => Ok(VolUnit::Gallon),
            _ => Err(UnitError::UnknownVolumeUnit(s.to_string())),
        }
    }
}

/// Whether a nutrient is dosed by volume or by mass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NutrientUnit {
    #[serde(rename = "mL")]
    Milliliter,
    #[serde(rename = "g")]
    Gram,
}

impl NutrientUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientUnit::Milliliter => "mL",
            NutrientUnit::Gram => "g",
        }
    }
}

impl fmt::Display for NutrientUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NutrientUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.trim() {
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Ok(NutrientUnit::Milliliter)
            }
            "g" | "gram" | "grams" => Ok(NutrientUnit::Gram),
            _ => Err(UnitError::UnknownNutrientUnit(s.to_string())),
        }
    }
}

/// Milliliters in one `unit`
pub fn scale_to_ml(unit: VolUnit) -> f64 {
    match unit {
        VolUnit::Milliliter => ML_PER_ML,
        VolUnit::Liter => ML_PER_LITER,
        VolUnit::FluidOunce => ML_PER_FL_OZ,
        VolUnit::Gallon => ML_PER_GALLON,
    }
}

//! Nutrient model
//!
//! A nutrient product as listed on a feed chart, optionally with its
//! guaranteed analysis (the chemicals it contains and their percentages).

use serde::{Deserialize, Serialize};

use super::chart::ChartError;
use crate::units::NutrientUnit;

/// One constituent of a nutrient product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chemical {
    pub name: String,
    pub abbr: String,
    /// Percentage by weight or volume. Percentages across a nutrient are
    /// not required to sum to 100.
    pub pcnt: f64,
}

/// A nutrient product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrient {
    pub name: String,
    pub unit: NutrientUnit,
    /// Display hint, passed through untouched
    pub color: String,
    /// Constituent chemicals; empty for chart-only nutrient listings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nutrients: Vec<Chemical>,
}

/// An ordered list of nutrients with their compositions
pub type NutrientTable = Vec<Nutrient>;

/// Amount of a single chemical contained in a nutrient dose
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChemicalDose {
    pub name: String,
    pub abbr: String,
    pub pcnt: f64,
    /// Amount in the nutrient's own unit
    pub amount: f64,
}

impl Nutrient {
    pub fn new(name: impl Into<String>, unit: NutrientUnit, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit,
            color: color.into(),
            nutrients: Vec::new(),
        }
    }

    /// Add a constituent chemical
    pub fn with_chemical(mut self, name: impl Into<String>, abbr: impl Into<String>, pcnt: f64) -> Self {
        self.nutrients.push(Chemical {
            name: name.into(),
            abbr: abbr.into(),
            pcnt,
        });
        self
    }

    /// Sum of all constituent percentages
    pub fn total_percent(&self) -> f64 {
        self.nutrients.iter().map(|c| c.pcnt).sum()
    }

    /// Break a dose of this nutrient down into its chemicals.
    ///
    /// Rejects negative and non-finite amounts, like reservoir volumes in
    /// [`Chart::doses`](super::Chart::doses).
    pub fn composition(&self, amount: f64) -> Result<Vec<ChemicalDose>, ChartError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ChartError::InvalidAmount(amount));
        }

        Ok(self
            .nutrients
            .iter()
            .map(|c| ChemicalDose {
                name: c.name.clone(),
                abbr: c.abbr.clone(),
                pcnt: c.pcnt,
                amount: amount * c.pcnt / 100.0,
            })
            .collect())
    }
}

/// Find a nutrient by exact name
pub fn find_nutrient<'a>(table: &'a [Nutrient], name: &str) -> Option<&'a Nutrient> {
    table.iter().find(|n| n.name == name)
}

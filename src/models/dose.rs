//! Dose calculation
//!
//! Feed chart amounts are per US gallon of reservoir water. A dose sheet
//! scales one stage's amounts to an actual reservoir volume.

use std::collections::BTreeSet;

use serde::Serialize;

use super::chart::{Chart, ChartError};
use crate::units::{to_gal, NutrientUnit, VolUnit};

/// Total amount of one nutrient for a reservoir
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dose {
    pub nutrient: String,
    /// Amount per gallon as written in the chart
    pub per_gallon: f64,
    /// Amount for the whole reservoir
    pub amount: f64,
    /// None when the chart doses a nutrient it does not list
    pub unit: Option<NutrientUnit>,
    pub color: Option<String>,
}

/// Doses for one stage of one schedule at a given reservoir volume
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoseSheet {
    pub chart: String,
    pub schedule: String,
    pub stage: String,
    pub volume: f64,
    pub volume_unit: VolUnit,
    pub gallons: f64,
    pub doses: Vec<Dose>,
}

impl Chart {
    /// Scale a stage's per-gallon amounts to a reservoir of `volume` `unit`s.
    ///
    /// Doses follow the chart's nutrient order; stage entries for unlisted
    /// nutrients come last, by name. A nutrient listed twice is dosed once,
    /// using its first listing.
    pub fn doses(
        &self,
        schedule: &str,
        stage: &str,
        volume: f64,
        unit: VolUnit,
    ) -> Result<DoseSheet, ChartError> {
        if !volume.is_finite() || volume < 0.0 {
            return Err(ChartError::InvalidVolume(volume));
        }

        let amounts = self.stage(schedule, stage)?;
        let gallons = to_gal(volume, unit);

        let mut seen = BTreeSet::new();
        let listed = self.nutrients.iter().filter_map(|nutrient| {
            if !seen.insert(nutrient.name.as_str()) {
                return None;
            }
            amounts.get(&nutrient.name).map(|&per_gallon| Dose {
                nutrient: nutrient.name.clone(),
                per_gallon,
                amount: per_gallon * gallons,
                unit: Some(nutrient.unit),
                color: Some(nutrient.color.clone()),
            })
        });

        let unlisted = amounts
            .iter()
            .filter(|(name, _)| self.nutrient(name).is_none())
            .map(|(name, &per_gallon)| {
                tracing::warn!(
                    "Chart '{}' doses unlisted nutrient '{}' in {}/{}",
                    self.name,
                    name,
                    schedule,
                    stage
                );
                Dose {
                    nutrient: name.clone(),
                    per_gallon,
                    amount: per_gallon * gallons,
                    unit: None,
                    color: None,
                }
            });

        let mut doses: Vec<Dose> = listed.collect();
        doses.extend(unlisted);

        Ok(DoseSheet {
            chart: self.name.clone(),
            schedule: schedule.to_string(),
            stage: stage.to_string(),
            volume,
            volume_unit: unit,
            gallons,
            doses,
        })
    }
}

impl DoseSheet {
    pub fn dose(&self, nutrient: &str) -> Option<&Dose> {
        self.doses.iter().find(|d| d.nutrient == nutrient)
    }
}

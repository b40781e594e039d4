//! Data models
//!
//! Feed charts, nutrients and the doses derived from them.

mod chart;
mod dose;
mod nutrient;

pub use chart::{
    Chart, ChartError, FeedChart, FeedSchedule, GrowthStage, IntegrityReport, StageReference,
};
pub use dose::{Dose, DoseSheet};
pub use nutrient::{find_nutrient, Chemical, ChemicalDose, Nutrient, NutrientTable};

#[cfg(test)]
pub(crate) use chart::tests::{sample_chart, SAMPLE_CHART};

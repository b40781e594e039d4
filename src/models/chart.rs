//! Feed chart model
//!
//! A chart is a named feeding plan: the nutrients it uses and a nested
//! schedule -> stage -> nutrient -> amount table. Nutrients are referenced
//! by name only, so a chart can mention a nutrient it never lists (and the
//! reverse). Those gaps are reported by [`Chart::integrity_report`], not
//! rejected.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::nutrient::Nutrient;

/// Dosage amount per nutrient name within one growth stage
pub type GrowthStage = BTreeMap<String, f64>;
/// Growth stages of one schedule, keyed by stage name
pub type FeedSchedule = BTreeMap<String, GrowthStage>;
/// Schedules of one chart, keyed by schedule name
pub type FeedChart = BTreeMap<String, FeedSchedule>;

/// Chart lookup and dosing errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("Chart '{chart}' has no schedule named '{schedule}'")]
    ScheduleNotFound { chart: String, schedule: String },

    #[error("Schedule '{schedule}' in chart '{chart}' has no stage named '{stage}'")]
    StageNotFound {
        chart: String,
        schedule: String,
        stage: String,
    },

    #[error("Reservoir volume must be a finite, non-negative number (got {0})")]
    InvalidVolume(f64),

    #[error("Dose amount must be a finite, non-negative number (got {0})")]
    InvalidAmount(f64),
}

/// Root aggregate describing a named feeding plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub name: String,
    pub nutrients: Vec<Nutrient>,
    pub charts: FeedChart,
}

/// A nutrient key used inside a stage that the chart does not list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReference {
    pub schedule: String,
    pub stage: String,
    pub nutrient: String,
}

/// Referential gaps between a chart's nutrient list and its feed table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntegrityReport {
    /// Stage entries naming a nutrient missing from `nutrients`
    pub unknown_nutrients: Vec<StageReference>,
    /// Listed nutrients that no stage doses
    pub unused_nutrients: Vec<String>,
    /// Nutrient names listed more than once
    pub duplicate_nutrients: Vec<String>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.unknown_nutrients.is_empty()
            && self.unused_nutrients.is_empty()
            && self.duplicate_nutrients.is_empty()
    }
}

impl Chart {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nutrients: Vec::new(),
            charts: FeedChart::new(),
        }
    }

    /// Find a listed nutrient by name
    pub fn nutrient(&self, name: &str) -> Option<&Nutrient> {
        self.nutrients.iter().find(|n| n.name == name)
    }

    pub fn schedule_names(&self) -> Vec<&str> {
        self.charts.keys().map(String::as_str).collect()
    }

    pub fn schedule(&self, schedule: &str) -> Result<&FeedSchedule, ChartError> {
        self.charts
            .get(schedule)
            .ok_or_else(|| ChartError::ScheduleNotFound {
                chart: self.name.clone(),
                schedule: schedule.to_string(),
            })
    }

    pub fn stage(&self, schedule: &str, stage: &str) -> Result<&GrowthStage, ChartError> {
        self.schedule(schedule)?
            .get(stage)
            .ok_or_else(|| ChartError::StageNotFound {
                chart: self.name.clone(),
                schedule: schedule.to_string(),
                stage: stage.to_string(),
            })
    }

    /// Total number of stages across all schedules
    pub fn stage_count(&self) -> usize {
        self.charts.values().map(|s| s.len()).sum()
    }

    /// Compare the nutrient list against every nutrient key in the feed table
    pub fn integrity_report(&self) -> IntegrityReport {
        let mut listed = BTreeSet::new();
        let mut duplicates = BTreeSet::new();
        for nutrient in &self.nutrients {
            if !listed.insert(nutrient.name.as_str()) {
                duplicates.insert(nutrient.name.clone());
            }
        }

        let mut used = BTreeSet::new();
        let mut unknown = Vec::new();
        for (schedule_name, schedule) in &self.charts {
            for (stage_name, stage) in schedule {
                for nutrient_name in stage.keys() {
                    used.insert(nutrient_name.as_str());
                    if !listed.contains(nutrient_name.as_str()) {
                        unknown.push(StageReference {
                            schedule: schedule_name.clone(),
                            stage: stage_name.clone(),
                            nutrient: nutrient_name.clone(),
                        });
                    }
                }
            }
        }

        let unused = listed
            .difference(&used)
            .map(|name| name.to_string())
            .collect();

        IntegrityReport {
            unknown_nutrients: unknown,
            unused_nutrients: unused,
            duplicate_nutrients: duplicates.into_iter().collect(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::units::NutrientUnit;

    pub(crate) const SAMPLE_CHART: &str = r##"{
        "name": "Flora Series",
        "nutrients": [
            {"name": "FloraMicro", "unit": "mL", "color": "#8e24aa"},
            {"name": "FloraGro", "unit": "mL", "color": "#43a047"},
            {"name": "FloraBloom", "unit": "mL", "color": "#e53935"}
        ],
        "charts": {
            "Medium": {
                "Seedling": {"FloraMicro": 1.25, "FloraGro": 1.25, "FloraBloom": 1.25},
                "Vegetative": {"FloraMicro": 5.0, "FloraGro": 5.0, "FloraBloom": 2.5}
            },
            "Aggressive": {
                "Vegetative": {"FloraMicro": 7.5, "FloraGro": 10.0, "FloraBloom": 2.5}
            }
        }
    }"##;

    pub(crate) fn sample_chart() -> Chart {
        serde_json::from_str(SAMPLE_CHART).unwrap()
    }

    #[test]
    fn test_deserialize_chart() {
        let chart = sample_chart();
        assert_eq!(chart.name, "Flora Series");
        assert_eq!(chart.nutrients.len(), 3);
        assert_eq!(chart.nutrients[1].unit, NutrientUnit::Milliliter);
        assert_eq!(chart.schedule_names(), vec!["Aggressive", "Medium"]);
        assert_eq!(chart.stage_count(), 3);
    }

    #[test]
    fn test_nutrient_order_preserved() {
        let chart = sample_chart();
        let names: Vec<&str> = chart.nutrients.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["FloraMicro", "FloraGro", "FloraBloom"]);
    }

    #[test]
    fn test_stage_lookup() {
        let chart = sample_chart();
        let stage = chart.stage("Medium", "Vegetative").unwrap();
        assert_eq!(stage.get("FloraBloom"), Some(&2.5));
    }

    #[test]
    fn test_missing_schedule() {
        let chart = sample_chart();
        assert_eq!(
            chart.stage("Light", "Seedling"),
            Err(ChartError::ScheduleNotFound {
                chart: "Flora Series".to_string(),
                schedule: "Light".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_stage() {
        let chart = sample_chart();
        assert!(matches!(
            chart.stage("Aggressive", "Seedling"),
            Err(ChartError::StageNotFound { .. })
        ));
    }

    #[test]
    fn test_integrity_report_clean() {
        assert!(sample_chart().integrity_report().is_clean());
    }

    #[test]
    fn test_integrity_report_gaps() {
        let mut chart = sample_chart();
        chart
            .nutrients
            .push(Nutrient::new("CALiMAGic", NutrientUnit::Milliliter, "#ffb300"));
        chart
            .nutrients
            .push(Nutrient::new("FloraGro", NutrientUnit::Milliliter, "#43a047"));
        chart
            .charts
            .get_mut("Medium")
            .unwrap()
            .get_mut("Seedling")
            .unwrap()
            .insert("Rapid Start".to_string(), 0.5);

        let report = chart.integrity_report();
        assert!(!report.is_clean());
        assert_eq!(
            report.unknown_nutrients,
            vec![StageReference {
                schedule: "Medium".to_string(),
                stage: "Seedling".to_string(),
                nutrient: "Rapid Start".to_string(),
            }]
        );
        assert_eq!(report.unused_nutrients, vec!["CALiMAGic".to_string()]);
        assert_eq!(report.duplicate_nutrients, vec!["FloraGro".to_string()]);
    }

    #[test]
    fn test_chart_with_gaps_still_deserializes() {
        let json = r#"{
            "name": "Sparse",
            "nutrients": [],
            "charts": {"Only": {"Stage": {"Mystery": 3.0}}}
        }"#;
        let chart: Chart = serde_json::from_str(json).unwrap();
        assert_eq!(chart.integrity_report().unknown_nutrients.len(), 1);
    }
}

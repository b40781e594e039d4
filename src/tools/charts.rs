//! Feed Chart Tools
//!
//! Lookups, dose sheets and integrity checks against the loaded chart library.

use serde::Serialize;

use crate::library::ChartLibrary;
use crate::models::{Chart, ChemicalDose, DoseSheet, IntegrityReport};
use crate::units::NutrientUnit;

use super::conversion::parse_vol_unit;

/// Schedule summary for listing
#[derive(Debug, Serialize)]
pub struct ScheduleSummary {
    pub name: String,
    pub stages: Vec<String>,
}

/// Chart summary for listing
#[derive(Debug, Serialize)]
pub struct ChartSummary {
    pub name: String,
    pub nutrients: Vec<String>,
    pub schedules: Vec<ScheduleSummary>,
}

/// Response for list_charts
#[derive(Debug, Serialize)]
pub struct ListChartsResponse {
    pub charts: Vec<ChartSummary>,
    pub total: usize,
}

/// Response for check_chart
#[derive(Debug, Serialize)]
pub struct CheckChartResponse {
    pub chart: String,
    pub clean: bool,
    pub report: IntegrityReport,
}

/// Response for get_nutrient_composition
#[derive(Debug, Serialize)]
pub struct NutrientCompositionResponse {
    pub nutrient: String,
    pub unit: NutrientUnit,
    pub amount: f64,
    pub total_percent: f64,
    pub chemicals: Vec<ChemicalDose>,
}

fn find_chart<'a>(library: &'a ChartLibrary, name: &str) -> Result<&'a Chart, String> {
    library
        .chart(name)
        .ok_or_else(|| format!("Chart '{}' not found", name))
}

/// List all charts with their schedules and stages
pub fn list_charts(library: &ChartLibrary) -> ListChartsResponse {
    let charts: Vec<ChartSummary> = library
        .charts()
        .map(|chart| ChartSummary {
            name: chart.name.clone(),
            nutrients: chart.nutrients.iter().map(|n| n.name.clone()).collect(),
            schedules: chart
                .charts
                .iter()
                .map(|(name, schedule)| ScheduleSummary {
                    name: name.clone(),
                    stages: schedule.keys().cloned().collect(),
                })
                .collect(),
        })
        .collect();

    ListChartsResponse {
        total: charts.len(),
        charts,
    }
}

/// Get a full chart by name
pub fn get_chart(library: &ChartLibrary, name: &str) -> Result<Chart, String> {
    find_chart(library, name).cloned()
}

/// Scale one stage of a chart to a reservoir volume
pub fn calculate_doses(
    library: &ChartLibrary,
    chart: &str,
    schedule: &str,
    stage: &str,
    volume: f64,
    volume_unit: &str,
) -> Result<DoseSheet, String> {
    let unit = parse_vol_unit(volume_unit)?;
    find_chart(library, chart)?
        .doses(schedule, stage, volume, unit)
        .map_err(|e| e.to_string())
}

/// Report referential gaps in a chart
pub fn check_chart(library: &ChartLibrary, name: &str) -> Result<CheckChartResponse, String> {
    let chart = find_chart(library, name)?;
    let report = chart.integrity_report();
    Ok(CheckChartResponse {
        chart: chart.name.clone(),
        clean: report.is_clean(),
        report,
    })
}

/// Break a nutrient dose down into its constituent chemicals
pub fn get_nutrient_composition(
    library: &ChartLibrary,
    nutrient: &str,
    amount: f64,
) -> Result<NutrientCompositionResponse, String> {
    let found = library
        .nutrient(nutrient)
        .ok_or_else(|| format!("No composition known for nutrient '{}'", nutrient))?;

    let chemicals = found.composition(amount).map_err(|e| e.to_string())?;

    Ok(NutrientCompositionResponse {
        nutrient: found.name.clone(),
        unit: found.unit,
        amount,
        total_percent: found.total_percent(),
        chemicals,
    })
}

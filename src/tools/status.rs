//! Feed Chart Status Tool
//!
//! Runtime status of the service plus usage instructions for assistants.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::library::ChartLibrary;

/// Feed chart usage instructions for AI assistants
pub const FEEDING_INSTRUCTIONS: &str = r#"
# Feed Chart Instructions

## Units

Volumes accept exactly these tags: `mL`, `L`, `fl oz`, `gal`.
Common spellings (`ml`, `liters`, `gallon`) are also understood.
Nutrients are dosed either by volume (`mL`) or by mass (`g`).

## Chart amounts are per gallon

Every amount in a feed chart is per US gallon (3785.41 mL) of reservoir water.
Never multiply chart amounts by liters directly. Use `calculate_doses`.

## Workflow

1. `list_charts` to see charts, their schedules and stages
2. `calculate_doses` with chart, schedule, stage and reservoir volume + unit
3. `get_nutrient_composition` to see what a dose delivers chemically
4. `check_chart` if a dose is missing a unit or color (the chart doses a
   nutrient it does not list)

## Conversions

`convert_volume` converts any volume to every unit. One gallon is 128 fl oz.
"#;

/// Runtime status of the feed chart service
#[derive(Debug, Clone, Serialize)]
pub struct FeedChartStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    pub data_dir: String,
    pub chart_count: usize,
    pub nutrient_count: usize,

    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    data_dir: PathBuf,
}

impl StatusTracker {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            data_dir,
        }
    }

    pub fn get_status(&self, library: &ChartLibrary) -> FeedChartStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        FeedChartStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            data_dir: self.data_dir.display().to_string(),
            chart_count: library.chart_count(),
            nutrient_count: library.nutrients().len(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_counts_library() {
        let tracker = StatusTracker::new(PathBuf::from("data"));
        let status = tracker.get_status(&ChartLibrary::new());
        assert_eq!(status.chart_count, 0);
        assert_eq!(status.nutrient_count, 0);
        assert_eq!(status.data_dir, "data");
        assert_eq!(status.process_id, std::process::id());
    }
}

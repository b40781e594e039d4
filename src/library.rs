//! Chart library
//!
//! Read-only registry of charts and nutrient tables loaded from a data
//! directory laid out as:
//!
//! ```text
//! <dir>/charts/*.json      one Chart per file
//! <dir>/nutrients/*.json   one NutrientTable per file
//! ```
//!
//! Missing subdirectories are treated as empty.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{find_nutrient, Chart, Nutrient, NutrientTable};

pub const CHARTS_DIR: &str = "charts";
pub const NUTRIENTS_DIR: &str = "nutrients";

/// Library loading errors
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("I/O error for '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON from '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Chart '{name}' in '{}' is already defined", .path.display())]
    DuplicateChart { name: String, path: PathBuf },
}

/// Result type for library operations
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Charts keyed by name, plus every known nutrient composition
#[derive(Debug, Clone, Default)]
pub struct ChartLibrary {
    charts: BTreeMap<String, Chart>,
    nutrients: NutrientTable,
}

impl ChartLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every chart and nutrient table under `dir`
    pub fn load<P: AsRef<Path>>(dir: P) -> LibraryResult<Self> {
        let dir = dir.as_ref();
        let mut library = Self::new();

        for path in json_files(&dir.join(CHARTS_DIR))? {
            let chart: Chart = read_json(&path)?;
            library.insert_chart(chart).map_err(|name| LibraryError::DuplicateChart {
                name,
                path: path.clone(),
            })?;
        }

        for path in json_files(&dir.join(NUTRIENTS_DIR))? {
            let table: NutrientTable = read_json(&path)?;
            tracing::debug!("Loaded {} nutrients from {}", table.len(), path.display());
            library.extend_nutrients(table);
        }

        tracing::info!(
            "Loaded {} charts and {} nutrient compositions from {}",
            library.charts.len(),
            library.nutrients.len(),
            dir.display()
        );
        Ok(library)
    }

    /// Add a chart, returning its name back if one with that name exists
    pub fn insert_chart(&mut self, chart: Chart) -> Result<(), String> {
        if self.charts.contains_key(&chart.name) {
            return Err(chart.name);
        }

        let report = chart.integrity_report();
        if !report.is_clean() {
            tracing::warn!(
                "Chart '{}' has integrity gaps: {} unknown, {} unused, {} duplicate nutrients",
                chart.name,
                report.unknown_nutrients.len(),
                report.unused_nutrients.len(),
                report.duplicate_nutrients.len()
            );
        }

        self.charts.insert(chart.name.clone(), chart);
        Ok(())
    }

    /// Append nutrient compositions; the first definition of a name wins
    pub fn extend_nutrients(&mut self, table: NutrientTable) {
        for nutrient in table {
            if find_nutrient(&self.nutrients, &nutrient.name).is_some() {
                tracing::warn!("Ignoring duplicate nutrient composition '{}'", nutrient.name);
                continue;
            }
            self.nutrients.push(nutrient);
        }
    }

    pub fn chart(&self, name: &str) -> Option<&Chart> {
        self.charts.get(name)
    }

    pub fn charts(&self) -> impl Iterator<Item = &Chart> {
        self.charts.values()
    }

    pub fn chart_count(&self) -> usize {
        self.charts.len()
    }

    pub fn nutrient(&self, name: &str) -> Option<&Nutrient> {
        find_nutrient(&self.nutrients, name)
    }

    pub fn nutrients(&self) -> &[Nutrient] {
        &self.nutrients
    }
}

/// JSON files directly inside `dir`, sorted by path
fn json_files(dir: &Path) -> LibraryResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        tracing::debug!("No directory at {}, skipping", dir.display());
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|source| LibraryError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LibraryError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> LibraryResult<T> {
    let contents = fs::read_to_string(path).map_err(|source| LibraryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| LibraryError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SAMPLE_CHART;

    const SAMPLE_TABLE: &str = r#"[
        {"name": "FloraGro", "unit": "mL", "color": "green",
         "nutrients": [{"name": "Total Nitrogen", "abbr": "N", "pcnt": 2.0}]},
        {"name": "Epsom Salt", "unit": "g", "color": "white",
         "nutrients": [{"name": "Magnesium", "abbr": "Mg", "pcnt": 9.8}]}
    ]"#;

    /// Fresh scratch directory under the system temp dir
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "feedchart-test-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write(dir: &Path, sub: &str, file: &str, contents: &str) {
        let sub_dir = dir.join(sub);
        fs::create_dir_all(&sub_dir).unwrap();
        fs::write(sub_dir.join(file), contents).unwrap();
    }

    #[test]
    fn test_load_charts_and_nutrients() {
        let dir = scratch_dir("load");
        write(&dir, CHARTS_DIR, "flora.json", SAMPLE_CHART);
        write(&dir, CHARTS_DIR, "notes.txt", "not a chart");
        write(&dir, NUTRIENTS_DIR, "table.json", SAMPLE_TABLE);

        let library = ChartLibrary::load(&dir).unwrap();
        assert_eq!(library.chart_count(), 1);
        assert!(library.chart("Flora Series").is_some());
        assert_eq!(library.nutrients().len(), 2);
        assert_eq!(library.nutrient("Epsom Salt").unwrap().nutrients[0].abbr, "Mg");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_directories_are_empty() {
        let dir = scratch_dir("empty");
        let library = ChartLibrary::load(&dir).unwrap();
        assert_eq!(library.chart_count(), 0);
        assert!(library.nutrients().is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_duplicate_chart_rejected() {
        let dir = scratch_dir("duplicate");
        write(&dir, CHARTS_DIR, "a.json", SAMPLE_CHART);
        write(&dir, CHARTS_DIR, "b.json", SAMPLE_CHART);

        let err = ChartLibrary::load(&dir).unwrap_err();
        match err {
            LibraryError::DuplicateChart { name, path } => {
                assert_eq!(name, "Flora Series");
                assert!(path.ends_with("b.json"));
            }
            other => panic!("unexpected error: {}", other),
        }
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_invalid_json_reports_path() {
        let dir = scratch_dir("invalid");
        write(&dir, CHARTS_DIR, "broken.json", r#"{"name": "Broken", "nutrients": ["#);

        let err = ChartLibrary::load(&dir).unwrap_err();
        assert!(matches!(err, LibraryError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unknown_unit_in_file_is_json_error() {
        let dir = scratch_dir("unit");
        write(
            &dir,
            NUTRIENTS_DIR,
            "bad.json",
            r#"[{"name": "X", "unit": "oz", "color": "red"}]"#,
        );
        assert!(matches!(
            ChartLibrary::load(&dir),
            Err(LibraryError::Json { .. })
        ));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_first_nutrient_definition_wins() {
        let mut library = ChartLibrary::new();
        library.extend_nutrients(serde_json::from_str(SAMPLE_TABLE).unwrap());
        let mut again: NutrientTable = serde_json::from_str(SAMPLE_TABLE).unwrap();
        again[0].color = "blue".to_string();
        library.extend_nutrients(again);

        assert_eq!(library.nutrients().len(), 2);
        assert_eq!(library.nutrient("FloraGro").unwrap().color, "green");
    }

    #[test]
    fn test_bundled_data_loads_clean() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let library = ChartLibrary::load(dir).unwrap();
        assert_eq!(library.chart_count(), 2);
        for chart in library.charts() {
            assert!(chart.integrity_report().is_clean(), "{} has gaps", chart.name);
            for nutrient in &chart.nutrients {
                assert!(library.nutrient(&nutrient.name).is_some(), "no composition for {}", nutrient.name);
            }
        }
    }
}

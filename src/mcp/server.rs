//! Feed Chart MCP Server Implementation
//!
//! Exposes the chart library and unit converter as MCP tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::library::ChartLibrary;
use crate::tools::charts;
use crate::tools::conversion;
use crate::tools::status::StatusTracker;

/// Feed Chart MCP Service
#[derive(Clone)]
pub struct FeedChartService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    library: Arc<ChartLibrary>,
    tool_router: ToolRouter<FeedChartService>,
}

impl FeedChartService {
    pub fn new(data_dir: PathBuf, library: ChartLibrary) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(data_dir))),
            library: Arc::new(library),
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertVolumeParams {
    /// Volume to convert
    pub value: f64,
    /// Unit of the value: mL, L, fl oz or gal
    pub unit: String,
    /// Optional target unit: mL, L, fl oz or gal
    pub to: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ChartNameParams {
    /// Chart name, exactly as listed by list_charts
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateDosesParams {
    /// Chart name
    pub chart: String,
    /// Schedule name within the chart
    pub schedule: String,
    /// Growth stage name within the schedule
    pub stage: String,
    /// Reservoir volume
    pub volume: f64,
    /// Unit of the reservoir volume (default gal)
    #[serde(default = "default_volume_unit")]
    pub volume_unit: String,
}

fn default_volume_unit() -> String { "gal".to_string() }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NutrientCompositionParams {
    /// Nutrient product name
    pub nutrient: String,
    /// Dose amount in the nutrient's own unit (mL or g)
    pub amount: f64,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl FeedChartService {
    // --- Status ---

    #[tool(description = "Get the current status of the feed chart service including build info, loaded chart counts, and process information")]
    async fn feedchart_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.library);
        to_json(&status)
    }

    #[tool(description = "Get instructions for working with feed charts. Call this before calculating doses for the first time.")]
    fn feeding_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::FEEDING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(FEEDING_INSTRUCTIONS)]))
    }

    // --- Conversion ---

    #[tool(description = "Convert a volume between mL, L, fl oz and gal. Returns milliliters, gallons, the requested target unit, and every supported unit.")]
    fn convert_volume(&self, Parameters(p): Parameters<ConvertVolumeParams>) -> Result<CallToolResult, McpError> {
        let result = conversion::convert_volume(p.value, &p.unit, p.to.as_deref())
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    // --- Charts ---

    #[tool(description = "List all loaded feed charts with their nutrients, schedules and growth stages")]
    fn list_charts(&self) -> Result<CallToolResult, McpError> {
        to_json(&charts::list_charts(&self.library))
    }

    #[tool(description = "Get a full feed chart by name, including every per-gallon amount")]
    fn get_chart(&self, Parameters(p): Parameters<ChartNameParams>) -> Result<CallToolResult, McpError> {
        let chart = charts::get_chart(&self.library, &p.name)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&chart)
    }

    #[tool(description = "Calculate nutrient doses for one growth stage scaled to a reservoir volume. Chart amounts are per gallon.")]
    fn calculate_doses(&self, Parameters(p): Parameters<CalculateDosesParams>) -> Result<CallToolResult, McpError> {
        let result = charts::calculate_doses(&self.library, &p.chart, &p.schedule, &p.stage, p.volume, &p.volume_unit)
            .map_err(|e| McpError::invalid_params(e, None))?;
        tracing::info!(
            "Calculated {} doses for {}/{}/{} at {} {}",
            result.doses.len(),
            p.chart,
            p.schedule,
            p.stage,
            p.volume,
            result.volume_unit
        );
        to_json(&result)
    }

    #[tool(description = "Check a chart for nutrients dosed but not listed, listed but never dosed, or listed twice")]
    fn check_chart(&self, Parameters(p): Parameters<ChartNameParams>) -> Result<CallToolResult, McpError> {
        let result = charts::check_chart(&self.library, &p.name)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Break a nutrient dose down into the chemicals it contains, using the loaded nutrient tables")]
    fn get_nutrient_composition(&self, Parameters(p): Parameters<NutrientCompositionParams>) -> Result<CallToolResult, McpError> {
        let result = charts::get_nutrient_composition(&self.library, &p.nutrient, p.amount)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for FeedChartService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "feedchart".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Feed Chart Manager".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Feed Chart Manager - hydroponic nutrient feed charts. \
                 Call feeding_instructions first. Chart amounts are per US gallon. \
                 Charts: list_charts, get_chart, check_chart. \
                 Dosing: calculate_doses, get_nutrient_composition. \
                 Units: convert_volume (mL, L, fl oz, gal). \
                 Status: feedchart_status."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;

    use crate::models::sample_chart;

    fn service() -> FeedChartService {
        let mut library = ChartLibrary::new();
        library.insert_chart(sample_chart()).unwrap();
        FeedChartService::new(PathBuf::from("data"), library)
    }

    fn chart_params(name: &str) -> Parameters<ChartNameParams> {
        Parameters(ChartNameParams { name: name.to_string() })
    }

    #[test]
    fn test_get_chart_found() {
        assert!(service().get_chart(chart_params("Flora Series")).is_ok());
    }

    #[test]
    fn test_lookup_failures_are_invalid_params() {
        let svc = service();

        let err = svc.get_chart(chart_params("Lucas Formula")).unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("Lucas Formula"));

        let err = svc.check_chart(chart_params("Lucas Formula")).unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

        let err = svc
            .calculate_doses(Parameters(CalculateDosesParams {
                chart: "Flora Series".to_string(),
                schedule: "Medium".to_string(),
                stage: "Flowering".to_string(),
                volume: 1.0,
                volume_unit: default_volume_unit(),
            }))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }
}

//! MCP tool implementations

pub mod charts;
pub mod conversion;
pub mod status;

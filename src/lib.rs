//! Feed Chart Manager Library
//!
//! Hydroponic nutrient feed charts, volume unit conversion and dose calculation.

pub mod build_info;
pub mod library;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod units;

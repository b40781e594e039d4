//! Build metadata
//!
//! `build.rs` stamps each compile with a build number and UTC timestamp;
//! both fall back to placeholders when the crate is built without it.

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const UNKNOWN_TIMESTAMP: &str = "unknown";

/// Monotonic build counter from `build_number.txt`
pub const BUILD_NUMBER: u64 = match option_env!("FEEDCHART_BUILD_NUMBER") {
    Some(raw) => digits_to_u64(raw),
    None => 0,
};

pub const BUILD_TIMESTAMP: &str = match option_env!("FEEDCHART_BUILD_TIMESTAMP") {
    Some(raw) => raw,
    None => UNKNOWN_TIMESTAMP,
};

/// Decimal digits to u64; anything else (including empty input) is build 0
const fn digits_to_u64(raw: &str) -> u64 {
    let digits = raw.as_bytes();
    if digits.is_empty() {
        return 0;
    }
    let mut value: u64 = 0;
    let mut i = 0;
    while i < digits.len() {
        if !digits[i].is_ascii_digit() {
            return 0;
        }
        value = value * 10 + (digits[i] - b'0') as u64;
        i += 1;
    }
    value
}

/// Version and build stamp reported by `feedchart_status`
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
        }
    }

    /// True when `build.rs` ran and stamped this binary
    pub fn is_stamped(&self) -> bool {
        self.build_timestamp != UNKNOWN_TIMESTAMP
    }

    /// One-line identifier, e.g. `feedchart 1.0.0 (build 12, 2026-10-16T09:00:00Z)`
    pub fn summary(&self) -> String {
        format!(
            "{} {} (build {}, {})",
            self.name, self.version, self.build_number, self.build_timestamp
        )
    }
}

/// Startup banner on stderr; stdout belongs to the MCP transport
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("Feed Chart Manager :: {}", info.summary());
    if !info.is_stamped() {
        eprintln!("  (unstamped build: build.rs metadata missing)");
    }
}

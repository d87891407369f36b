//! F5 BIG-IP parsers. BIG-IP is queried over iControl REST rather than CLI.

mod analytics;

pub use analytics::AnalyticsIpLayerGenerateReport;

use crate::parser::PlatformParsers;

/// Platform name for BIG-IP.
pub const PLATFORM_NAME: &str = "bigip";

/// Create the BIG-IP parser set.
pub fn platform() -> PlatformParsers {
    PlatformParsers::new(PLATFORM_NAME).with_rest(AnalyticsIpLayerGenerateReport)
}

//! `/mgmt/tm/analytics/ip-layer/generate-report`.

use crate::parser::{RestParser, passthrough};

/// The IP-layer analytics report, returned as the device sent it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsIpLayerGenerateReport;

impl RestParser for AnalyticsIpLayerGenerateReport {
    fn path(&self) -> &str {
        "/mgmt/tm/analytics/ip-layer/generate-report"
    }

    fn parse(&self, document: serde_json::Value) -> serde_json::Value {
        passthrough(document)
    }
}

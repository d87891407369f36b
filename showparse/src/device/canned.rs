//! Replay device backed by captured outputs.

use indexmap::IndexMap;
use log::debug;

use super::Device;
use crate::error::{DeviceError, Result};

/// A [`Device`] that answers from previously captured output.
///
/// Useful for parsing saved show-command output, and for tests. Every
/// command and REST path asked of it is recorded in [`history`](Self::history).
#[derive(Debug, Clone, Default)]
pub struct CannedDevice {
    outputs: IndexMap<String, String>,
    documents: IndexMap<String, serde_json::Value>,
    history: Vec<String>,
}

impl CannedDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` with `output`.
    pub fn with_output(mut self, command: impl Into<String>, output: impl Into<String>) -> Self {
        self.outputs.insert(command.into(), output.into());
        self
    }

    /// Answer a REST GET of `path` with `document`.
    pub fn with_document(mut self, path: impl Into<String>, document: serde_json::Value) -> Self {
        self.documents.insert(path.into(), document);
        self
    }

    /// Commands and paths requested so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Device for CannedDevice {
    async fn execute(&mut self, command: &str) -> Result<String> {
        debug!("canned execute: {}", command);
        self.history.push(command.to_string());
        self.outputs.get(command).cloned().ok_or_else(|| {
            DeviceError::CommandFailed {
                command: command.to_string(),
                message: "no captured output".to_string(),
            }
            .into()
        })
    }

    async fn get(&mut self, path: &str) -> Result<serde_json::Value> {
        debug!("canned get: {}", path);
        self.history.push(path.to_string());
        self.documents.get(path).cloned().ok_or_else(|| {
            DeviceError::RestFailed {
                path: path.to_string(),
                message: "no captured document".to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[tokio::test]
    async fn test_execute_known_command() {
        let mut device = CannedDevice::new().with_output("show users", "vty0 ...");
        assert_eq!(device.execute("show users").await.unwrap(), "vty0 ...");
        assert_eq!(device.history(), ["show users"]);
    }

    #[tokio::test]
    async fn test_execute_unknown_command() {
        let mut device = CannedDevice::new();
        let err = device.execute("show clock").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Device(DeviceError::CommandFailed { ref command, .. }) if command == "show clock"
        ));
    }

    #[test]
    fn test_get_document() {
        let mut device =
            CannedDevice::new().with_document("/mgmt/tm/sys", serde_json::json!({"kind": "tm"}));
        let doc = tokio_test::block_on(device.get("/mgmt/tm/sys")).unwrap();
        assert_eq!(doc["kind"], "tm");
    }
}

//! Command execution seam.
//!
//! Parsers never talk to a device themselves. A [`Device`] runs the command
//! (over SSH, HTTP, a lab replay, ...) and hands back raw output; transport,
//! authentication and retries all live behind this trait.

mod canned;

pub use canned::CannedDevice;

use std::future::Future;

use crate::error::{DeviceError, Result};

/// Something that can run show commands and REST queries.
///
/// # Example
///
/// Wrapping an existing CLI client:
///
/// ```rust
/// use showparse::device::Device;
/// use showparse::Result;
///
/// struct Lab {
///     output: String,
/// }
///
/// impl Device for Lab {
///     async fn execute(&mut self, _command: &str) -> Result<String> {
///         Ok(self.output.clone())
///     }
/// }
/// ```
pub trait Device: Send {
    /// Run a CLI command and return its textual output.
    fn execute(&mut self, command: &str) -> impl Future<Output = Result<String>> + Send;

    /// Issue a REST GET and return the decoded JSON body.
    ///
    /// Devices without a REST interface keep the default, which fails with
    /// [`DeviceError::RestUnsupported`].
    fn get(&mut self, path: &str) -> impl Future<Output = Result<serde_json::Value>> + Send {
        let path = path.to_string();
        async move { Err(DeviceError::RestUnsupported { path }.into()) }
    }
}

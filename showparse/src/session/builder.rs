//! Builder for parse sessions.

use std::sync::Arc;

use super::{ParseSession, ValidationMode};
use crate::device::Device;
use crate::error::{ParserError, Result};
use crate::parser::{AbstractParser, ParserRegistry, PlatformParsers};

/// Builder for constructing a [`ParseSession`].
///
/// # Example
///
/// ```rust
/// use showparse::device::CannedDevice;
/// use showparse::session::{SessionBuilder, ValidationMode};
///
/// # async fn example() -> Result<(), showparse::Error> {
/// let device = CannedDevice::new().with_output("show users", "vty0  admin  ssh  0  00:00:01  10.0.0.1");
/// let mut session = SessionBuilder::new(device)
///     .os("iosxr")
///     .validation(ValidationMode::Warn)
///     .build()?;
///
/// let users = session.parse("show users").await?;
/// assert!(users.contains_key("vty0"));
/// # Ok(())
/// # }
/// ```
pub struct SessionBuilder<D> {
    device: D,
    os: Option<String>,
    custom_platform: Option<PlatformParsers>,
    validation: ValidationMode,
    abstract_parser: Option<Arc<dyn AbstractParser>>,
}

impl<D: Device> SessionBuilder<D> {
    /// Create a new session builder around a device.
    pub fn new(device: D) -> Self {
        Self {
            device,
            os: None,
            custom_platform: None,
            validation: ValidationMode::default(),
            abstract_parser: None,
        }
    }

    /// Set the platform name (e.g., "iosxr", "nxos").
    pub fn os(mut self, os: impl Into<String>) -> Self {
        self.os = Some(os.into());
        self
    }

    /// Use a custom parser set instead of one from the global registry.
    pub fn custom_platform(mut self, platform: PlatformParsers) -> Self {
        self.custom_platform = Some(platform);
        self
    }

    /// Set how schema violations are handled (default: strict).
    pub fn validation(mut self, mode: ValidationMode) -> Self {
        self.validation = mode;
        self
    }

    /// Set the parser used for delegated commands.
    pub fn abstract_parser(mut self, parser: impl AbstractParser + 'static) -> Self {
        self.abstract_parser = Some(Arc::new(parser));
        self
    }

    /// Build the session.
    ///
    /// The platform's parsers are copied out of the registry here, so later
    /// registrations do not affect an existing session.
    pub fn build(self) -> Result<ParseSession<D>> {
        let platform = if let Some(custom) = self.custom_platform {
            custom
        } else if let Some(os) = self.os {
            ParserRegistry::global()
                .read()
                .map_err(|_| ParserError::InvalidConfig {
                    message: "Failed to acquire registry lock".to_string(),
                })?
                .platform(&os)
                .ok_or_else(|| ParserError::UnknownPlatform { os: os.clone() })?
                .clone()
        } else {
            return Err(ParserError::InvalidConfig {
                message: "Platform must be specified".to_string(),
            }
            .into());
        };

        Ok(ParseSession {
            device: self.device,
            platform,
            validation: self.validation,
            abstract_parser: self.abstract_parser,
        })
    }
}

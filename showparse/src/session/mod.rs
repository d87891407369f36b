//! Parse sessions: run a command on a device, parse it, validate the result.
//!
//! A [`ParseSession`] ties a [`Device`] to one platform's parsers. Commands
//! are looked up by their exact command line; parameterized variants such as
//! `show evpn evi mac <mac>` are run by passing the parser directly to
//! [`ParseSession::run`].

mod builder;

pub use builder::SessionBuilder;

use std::sync::Arc;

use log::{debug, warn};

use crate::device::Device;
use crate::error::{ParserError, Result};
use crate::parser::{AbstractParser, CliParser, DelegatedParser, PlatformParsers, Registered, RestParser};
use crate::record::Record;
use crate::schema::Schema;

/// What to do when a parsed record does not match its parser's schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Fail with [`SchemaError`](crate::error::SchemaError).
    #[default]
    Strict,
    /// Log the violation and return the record anyway.
    Warn,
    /// Do not validate.
    Skip,
}

/// A device plus the parsers for its platform.
pub struct ParseSession<D> {
    device: D,
    platform: PlatformParsers,
    validation: ValidationMode,
    abstract_parser: Option<Arc<dyn AbstractParser>>,
}

impl<D: Device> ParseSession<D> {
    /// Start building a session around `device`.
    pub fn builder(device: D) -> SessionBuilder<D> {
        SessionBuilder::new(device)
    }

    /// Platform name of this session.
    pub fn os(&self) -> &str {
        &self.platform.name
    }

    pub fn validation(&self) -> ValidationMode {
        self.validation
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Consume the session and return the device.
    pub fn into_device(self) -> D {
        self.device
    }

    fn lookup(&self, command: &str) -> Result<Registered> {
        self.platform.get(command).cloned().ok_or_else(|| {
            ParserError::UnknownCommand {
                os: self.platform.name.clone(),
                command: command.to_string(),
            }
            .into()
        })
    }

    /// Run a registered command on the device and parse its output.
    pub async fn parse(&mut self, command: &str) -> Result<Record> {
        match self.lookup(command)? {
            Registered::Cli(parser) => self.run(parser.as_ref()).await,
            Registered::Delegated(parser) => self.delegate(parser.as_ref()).await,
        }
    }

    /// Parse already captured output of a registered command.
    pub fn parse_output(&self, command: &str, output: &str) -> Result<Record> {
        match self.lookup(command)? {
            Registered::Cli(parser) => self.run_with_output(parser.as_ref(), output),
            Registered::Delegated(parser) => {
                let command = parser.command();
                self.invoke_abstract(&command, output)
            }
        }
    }

    /// Run `parser`'s command on the device and parse its output.
    pub async fn run(&mut self, parser: &dyn CliParser) -> Result<Record> {
        let command = parser.command();
        debug!("running '{}' on {}", command, self.platform.name);
        let output = self.device.execute(&command).await?;
        self.run_with_output(parser, &output)
    }

    /// Parse captured output with `parser` and validate the result.
    pub fn run_with_output(&self, parser: &dyn CliParser, output: &str) -> Result<Record> {
        let record = parser.parse(output);
        self.check(&parser.command(), parser.schema(), record)
    }

    /// Run a delegated command and hand its output to the abstract parser.
    ///
    /// Fails before touching the device if no abstract parser is configured.
    pub async fn delegate(&mut self, parser: &dyn DelegatedParser) -> Result<Record> {
        let command = parser.command();
        if self.abstract_parser.is_none() {
            return Err(ParserError::NoAbstractParser {
                command: command.into_owned(),
            }
            .into());
        }
        debug!("running delegated '{}' on {}", command, self.platform.name);
        let output = self.device.execute(&command).await?;
        self.invoke_abstract(&command, &output)
    }

    fn invoke_abstract(&self, command: &str, output: &str) -> Result<Record> {
        let parser = self
            .abstract_parser
            .as_ref()
            .ok_or_else(|| ParserError::NoAbstractParser {
                command: command.to_string(),
            })?;
        parser.invoke(command, output)
    }

    /// Fetch a REST document and post-process it with `parser`.
    pub async fn rest(&mut self, parser: &dyn RestParser) -> Result<serde_json::Value> {
        debug!("GET {} on {}", parser.path(), self.platform.name);
        let document = self.device.get(parser.path()).await?;
        Ok(parser.parse(document))
    }

    /// Fetch a REST path using the parser registered for it.
    pub async fn rest_path(&mut self, path: &str) -> Result<serde_json::Value> {
        let parser = self.platform.get_rest(path).cloned().ok_or_else(|| {
            ParserError::UnknownCommand {
                os: self.platform.name.clone(),
                command: path.to_string(),
            }
        })?;
        self.rest(parser.as_ref()).await
    }

    fn check(&self, command: &str, schema: Option<&Schema>, record: Record) -> Result<Record> {
        let Some(schema) = schema else {
            return Ok(record);
        };
        match self.validation {
            ValidationMode::Skip => Ok(record),
            ValidationMode::Strict => {
                schema.validate_record(&record)?;
                Ok(record)
            }
            ValidationMode::Warn => {
                if let Err(e) = schema.validate_record(&record) {
                    warn!("'{}' output does not match its schema: {}", command, e);
                }
                Ok(record)
            }
        }
    }
}

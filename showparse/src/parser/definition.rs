//! The set of parsers one platform provides.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::{CliParser, DelegatedParser, RestParser};

/// A command parser as stored in the registry.
#[derive(Clone)]
pub enum Registered {
    Cli(Arc<dyn CliParser>),
    Delegated(Arc<dyn DelegatedParser>),
}

impl Registered {
    pub fn command(&self) -> Cow<'_, str> {
        match self {
            Registered::Cli(parser) => parser.command(),
            Registered::Delegated(parser) => parser.command(),
        }
    }
}

impl fmt::Debug for Registered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Registered::Cli(parser) => f.debug_tuple("Cli").field(&parser.command()).finish(),
            Registered::Delegated(parser) => {
                f.debug_tuple("Delegated").field(&parser.command()).finish()
            }
        }
    }
}

/// Parsers for one platform, keyed by command line or REST path.
///
/// Built with the `with_*` methods; a later parser for the same command
/// replaces an earlier one. The [`ParserRegistry`](super::ParserRegistry)
/// is where duplicates are rejected.
#[derive(Clone)]
pub struct PlatformParsers {
    /// Platform name (e.g., "iosxr", "nxos").
    pub name: String,

    /// Command parsers, in registration order.
    pub commands: IndexMap<String, Registered>,

    /// REST parsers keyed by request path.
    pub rest: IndexMap<String, Arc<dyn RestParser>>,
}

impl PlatformParsers {
    /// Create an empty parser set for a platform.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: IndexMap::new(),
            rest: IndexMap::new(),
        }
    }

    /// Add a CLI parser.
    pub fn with_cli(mut self, parser: impl CliParser + 'static) -> Self {
        let parser: Arc<dyn CliParser> = Arc::new(parser);
        let command = parser.command().into_owned();
        self.commands.insert(command, Registered::Cli(parser));
        self
    }

    /// Add a delegated parser.
    pub fn with_delegated(mut self, parser: impl DelegatedParser + 'static) -> Self {
        let parser: Arc<dyn DelegatedParser> = Arc::new(parser);
        let command = parser.command().into_owned();
        self.commands.insert(command, Registered::Delegated(parser));
        self
    }

    /// Add a REST parser.
    pub fn with_rest(mut self, parser: impl RestParser + 'static) -> Self {
        let parser: Arc<dyn RestParser> = Arc::new(parser);
        let path = parser.path().to_string();
        self.rest.insert(path, parser);
        self
    }

    /// Get the parser for a command line.
    pub fn get(&self, command: &str) -> Option<&Registered> {
        self.commands.get(command)
    }

    /// Get the parser for a REST path.
    pub fn get_rest(&self, path: &str) -> Option<&Arc<dyn RestParser>> {
        self.rest.get(path)
    }
}

impl fmt::Debug for PlatformParsers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformParsers")
            .field("name", &self.name)
            .field("commands", &self.commands)
            .field("rest", &self.rest.keys().collect::<Vec<_>>())
            .finish()
    }
}

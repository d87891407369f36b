//! Global parser registry for looking up parsers by platform and command.

use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use super::definition::{PlatformParsers, Registered};
use super::vendors;
use super::{CliParser, DelegatedParser, RestParser};
use crate::error::{ParserError, Result};

/// Global parser registry.
static REGISTRY: Lazy<RwLock<ParserRegistry>> = Lazy::new(|| {
    let mut registry = ParserRegistry::new();
    registry.register_builtin_parsers();
    RwLock::new(registry)
});

/// Registry of parsers, keyed by platform and then by command or REST path.
#[derive(Debug, Default)]
pub struct ParserRegistry {
    platforms: IndexMap<String, PlatformParsers>,
}

impl ParserRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            platforms: IndexMap::new(),
        }
    }

    /// Create a registry holding only the built-in parsers.
    pub fn with_builtin_parsers() -> Self {
        let mut registry = Self::new();
        registry.register_builtin_parsers();
        registry
    }

    /// Get the global registry.
    pub fn global() -> &'static RwLock<ParserRegistry> {
        &REGISTRY
    }

    fn register_builtin_parsers(&mut self) {
        for platform in [
            vendors::iosxr::platform(),
            vendors::nxos::platform(),
            vendors::bigip::platform(),
        ] {
            self.platforms.insert(platform.name.clone(), platform);
        }
    }

    fn platform_mut(&mut self, os: &str) -> &mut PlatformParsers {
        self.platforms
            .entry(os.to_string())
            .or_insert_with(|| PlatformParsers::new(os))
    }

    fn insert(&mut self, os: &str, parser: Registered) -> Result<()> {
        let command = parser.command().into_owned();
        let platform = self.platform_mut(os);
        if platform.commands.contains_key(&command) {
            return Err(ParserError::AlreadyRegistered {
                os: os.to_string(),
                command,
            }
            .into());
        }
        platform.commands.insert(command, parser);
        Ok(())
    }

    /// Register a CLI parser for a platform, creating the platform if needed.
    pub fn register(&mut self, os: &str, parser: impl CliParser + 'static) -> Result<()> {
        self.insert(os, Registered::Cli(Arc::new(parser)))
    }

    /// Register a delegated parser for a platform.
    pub fn register_delegated(
        &mut self,
        os: &str,
        parser: impl DelegatedParser + 'static,
    ) -> Result<()> {
        self.insert(os, Registered::Delegated(Arc::new(parser)))
    }

    /// Register a REST parser for a platform.
    pub fn register_rest(&mut self, os: &str, parser: impl RestParser + 'static) -> Result<()> {
        let path = parser.path().to_string();
        let platform = self.platform_mut(os);
        if platform.rest.contains_key(&path) {
            return Err(ParserError::AlreadyRegistered {
                os: os.to_string(),
                command: path,
            }
            .into());
        }
        platform.rest.insert(path, Arc::new(parser));
        Ok(())
    }

    /// Get every parser registered for a platform.
    pub fn platform(&self, os: &str) -> Option<&PlatformParsers> {
        self.platforms.get(os)
    }

    /// Get the parser for a command on a platform.
    pub fn get(&self, os: &str, command: &str) -> Option<&Registered> {
        self.platforms.get(os)?.get(command)
    }

    /// Get the parser for a REST path on a platform.
    pub fn get_rest(&self, os: &str, path: &str) -> Option<&Arc<dyn RestParser>> {
        self.platforms.get(os)?.get_rest(path)
    }

    /// Look up a command parser, failing with the reason it is missing.
    pub fn lookup(&self, os: &str, command: &str) -> Result<Registered> {
        let platform = self
            .platforms
            .get(os)
            .ok_or_else(|| ParserError::UnknownPlatform { os: os.to_string() })?;
        platform.get(command).cloned().ok_or_else(|| {
            ParserError::UnknownCommand {
                os: os.to_string(),
                command: command.to_string(),
            }
            .into()
        })
    }

    /// Check if a platform has any parsers.
    pub fn contains_platform(&self, os: &str) -> bool {
        self.platforms.contains_key(os)
    }

    /// Check if a command has a parser on a platform.
    pub fn contains(&self, os: &str, command: &str) -> bool {
        self.get(os, command).is_some()
    }

    /// List registered platform names.
    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.platforms.keys().map(String::as_str)
    }

    /// List the commands registered for a platform.
    pub fn commands(&self, os: &str) -> impl Iterator<Item = &str> {
        self.platforms
            .get(os)
            .into_iter()
            .flat_map(|p| p.commands.keys().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::error::Error;
    use crate::record::Record;

    struct ShowClock;

    impl CliParser for ShowClock {
        fn command(&self) -> Cow<'_, str> {
            Cow::Borrowed("show clock")
        }

        fn parse(&self, output: &str) -> Record {
            let mut record = Record::new();
            record.insert("clock", output.trim());
            record
        }
    }

    #[test]
    fn test_builtin_platforms() {
        let registry = ParserRegistry::with_builtin_parsers();
        assert_eq!(registry.platforms().collect::<Vec<_>>(), ["iosxr", "nxos", "bigip"]);
        assert!(registry.contains("iosxr", "show users"));
        assert!(registry.contains("iosxr", "show evpn ethernet-segment private"));
        assert!(registry.contains("nxos", "show ip interface brief | include Vlan"));
        assert!(!registry.contains("nxos", "show users"));
        assert!(
            registry
                .get_rest("bigip", "/mgmt/tm/analytics/ip-layer/generate-report")
                .is_some()
        );
    }

    #[test]
    fn test_every_builtin_rule_table_compiles() {
        // Parsing forces each lazily built rule table.
        let registry = ParserRegistry::with_builtin_parsers();
        for os in registry.platforms() {
            for command in registry.commands(os) {
                if let Some(Registered::Cli(parser)) = registry.get(os, command) {
                    parser.parse("");
                    if let Some(schema) = parser.schema() {
                        let _ = schema.validate_record(&Record::new());
                    }
                }
            }
        }
    }

    #[test]
    fn test_register_custom_parser() {
        let mut registry = ParserRegistry::new();
        registry.register("ios", ShowClock).unwrap();
        assert!(registry.contains_platform("ios"));

        let Registered::Cli(parser) = registry.lookup("ios", "show clock").unwrap() else {
            panic!("expected a CLI parser");
        };
        assert_eq!(
            parser.parse(" 12:00:00 UTC\n").get("clock").and_then(|v| v.as_str()),
            Some("12:00:00 UTC")
        );
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = ParserRegistry::with_builtin_parsers();
        let result = registry.register("iosxr", crate::parser::vendors::iosxr::ShowUsers);
        assert!(matches!(
            result,
            Err(Error::Parser(ParserError::AlreadyRegistered { .. }))
        ));

        let result = registry.register_rest(
            "bigip",
            crate::parser::vendors::bigip::AnalyticsIpLayerGenerateReport,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_lookup_errors() {
        let registry = ParserRegistry::with_builtin_parsers();
        assert!(matches!(
            registry.lookup("junos", "show version"),
            Err(Error::Parser(ParserError::UnknownPlatform { .. }))
        ));
        assert!(matches!(
            registry.lookup("nxos", "show version"),
            Err(Error::Parser(ParserError::UnknownCommand { .. }))
        ));
    }

    #[test]
    fn test_global_registry() {
        let registry = ParserRegistry::global().read().unwrap();
        assert!(registry.contains_platform("nxos"));
    }
}

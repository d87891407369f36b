//! Parser traits and the per-platform parser registry.
//!
//! A parser pairs a command with the rule table that understands its output.
//! Three shapes exist:
//!
//! - [`CliParser`]: runs a rule table over textual output.
//! - [`DelegatedParser`]: only names a command; the output is handed to an
//!   [`AbstractParser`] supplied by the caller.
//! - [`RestParser`]: post-processes a JSON document from a REST endpoint.

mod definition;
mod registry;
pub mod vendors;

pub use definition::{PlatformParsers, Registered};
pub use registry::ParserRegistry;

use std::borrow::Cow;

use crate::error::Result;
use crate::record::Record;
use crate::schema::Schema;

/// A parser for the textual output of one show command.
pub trait CliParser: Send + Sync {
    /// The exact command line this parser issues.
    fn command(&self) -> Cow<'_, str>;

    /// Shape the parsed record is expected to have.
    fn schema(&self) -> Option<&Schema> {
        None
    }

    /// Turn raw output into a record. Never fails; unrecognized lines are
    /// skipped.
    fn parse(&self, output: &str) -> Record;
}

/// A command whose output is parsed by an external [`AbstractParser`].
pub trait DelegatedParser: Send + Sync {
    fn command(&self) -> Cow<'_, str>;
}

/// Generic, caller-provided parser used for [`DelegatedParser`] commands.
///
/// The record it returns is passed through unchanged.
pub trait AbstractParser: Send + Sync {
    fn invoke(&self, command: &str, output: &str) -> Result<Record>;
}

/// A parser for a REST endpoint returning JSON.
pub trait RestParser: Send + Sync {
    /// Request path, e.g. `/mgmt/tm/sys/version`.
    fn path(&self) -> &str;

    fn parse(&self, document: serde_json::Value) -> serde_json::Value;
}

/// Return `document` unchanged, or an empty object when it is empty or falsy
/// (`null`, `false`, `0`, `""`, `[]`, `{}`).
pub fn passthrough(document: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    let empty = match &document {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    };
    if empty {
        Value::Object(serde_json::Map::new())
    } else {
        document
    }
}

//! Declared record shapes and the validator that checks them.
//!
//! Schemas are declared next to each parser but never consulted during
//! extraction. The session validates a finished record against its parser's
//! schema, so rule handlers stay free of shape checks.
//!
//! ```rust
//! use showparse::schema::{MapSchema, Schema};
//!
//! let schema: Schema = MapSchema::new()
//!     .any_key(
//!         MapSchema::new()
//!             .required("user", Schema::string())
//!             .optional("location", Schema::string()),
//!     )
//!     .into();
//! # let _ = schema;
//! ```

use std::fmt;

use crate::error::SchemaError;
use crate::record::{Record, Value};

/// Type of a leaf value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafType {
    Str,
    Int,
    Bool,
    Ip,
    Mac,
}

impl LeafType {
    fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (LeafType::Str, Value::Str(_))
                | (LeafType::Int, Value::Int(_) | Value::UInt(_))
                | (LeafType::Bool, Value::Bool(_))
                | (LeafType::Ip, Value::Ip(_))
                | (LeafType::Mac, Value::Mac(_))
        )
    }
}

impl fmt::Display for LeafType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LeafType::Str => "str",
            LeafType::Int => "int",
            LeafType::Bool => "bool",
            LeafType::Ip => "ip",
            LeafType::Mac => "mac",
        };
        f.write_str(name)
    }
}

/// Declared shape of a value.
#[derive(Debug, Clone)]
pub enum Schema {
    /// A leaf of the given type.
    Leaf(LeafType),
    /// A map with declared keys.
    Map(MapSchema),
    /// A list whose items all match the inner schema.
    List(Box<Schema>),
    /// Any one of the alternatives.
    Either(Vec<Schema>),
    /// Anything at all.
    Any,
}

impl Schema {
    pub fn string() -> Self {
        Schema::Leaf(LeafType::Str)
    }

    pub fn int() -> Self {
        Schema::Leaf(LeafType::Int)
    }

    pub fn bool() -> Self {
        Schema::Leaf(LeafType::Bool)
    }

    pub fn ip() -> Self {
        Schema::Leaf(LeafType::Ip)
    }

    pub fn mac() -> Self {
        Schema::Leaf(LeafType::Mac)
    }

    pub fn list(item: impl Into<Schema>) -> Self {
        Schema::List(Box::new(item.into()))
    }

    pub fn either(alternatives: impl IntoIterator<Item = Schema>) -> Self {
        Schema::Either(alternatives.into_iter().collect())
    }

    /// Validate a value against this schema.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaError> {
        self.check(value, "")
    }

    /// Validate a whole record. The schema must be a map schema.
    pub fn validate_record(&self, record: &Record) -> Result<(), SchemaError> {
        match self {
            Schema::Map(map) => map.check(record, ""),
            Schema::Any => Ok(()),
            other => Err(SchemaError::TypeMismatch {
                path: String::new(),
                expected: other.describe(),
                found: "map".to_string(),
            }),
        }
    }

    fn check(&self, value: &Value, path: &str) -> Result<(), SchemaError> {
        match (self, value) {
            (Schema::Any, _) => Ok(()),
            (Schema::Leaf(leaf), v) if leaf.accepts(v) => Ok(()),
            (Schema::Map(map), Value::Map(record)) => map.check(record, path),
            (Schema::List(item), Value::List(values)) => {
                for (i, v) in values.iter().enumerate() {
                    item.check(v, &join(path, &i.to_string()))?;
                }
                Ok(())
            }
            (Schema::Either(alternatives), v) => {
                if alternatives.iter().any(|s| s.check(v, path).is_ok()) {
                    Ok(())
                } else {
                    Err(self.mismatch(v, path))
                }
            }
            (_, v) => Err(self.mismatch(v, path)),
        }
    }

    fn mismatch(&self, value: &Value, path: &str) -> SchemaError {
        SchemaError::TypeMismatch {
            path: path.to_string(),
            expected: self.describe(),
            found: value.type_name().to_string(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Schema::Leaf(leaf) => leaf.to_string(),
            Schema::Map(_) => "map".to_string(),
            Schema::List(item) => format!("list of {}", item.describe()),
            Schema::Either(alternatives) => alternatives
                .iter()
                .map(Schema::describe)
                .collect::<Vec<_>>()
                .join(" or "),
            Schema::Any => "any".to_string(),
        }
    }
}

impl From<MapSchema> for Schema {
    fn from(map: MapSchema) -> Self {
        Schema::Map(map)
    }
}

impl From<LeafType> for Schema {
    fn from(leaf: LeafType) -> Self {
        Schema::Leaf(leaf)
    }
}

#[derive(Debug, Clone)]
enum KeySpec {
    Required(String),
    Optional(String),
    Any,
}

/// Schema for a map: named keys plus an optional catch-all for arbitrary keys.
///
/// Named keys take precedence over the catch-all. Keys matching neither are
/// rejected.
#[derive(Debug, Clone, Default)]
pub struct MapSchema {
    fields: Vec<(KeySpec, Schema)>,
}

impl MapSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a key that must be present.
    pub fn required(mut self, key: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.fields.push((KeySpec::Required(key.into()), schema.into()));
        self
    }

    /// Declare a key that may be present.
    pub fn optional(mut self, key: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.fields.push((KeySpec::Optional(key.into()), schema.into()));
        self
    }

    /// Accept any number of other keys whose values match `schema`.
    pub fn any_key(mut self, schema: impl Into<Schema>) -> Self {
        self.fields.push((KeySpec::Any, schema.into()));
        self
    }

    fn named(&self, key: &str) -> Option<&Schema> {
        self.fields.iter().find_map(|(spec, schema)| match spec {
            KeySpec::Required(k) | KeySpec::Optional(k) if k == key => Some(schema),
            _ => None,
        })
    }

    fn wildcard(&self) -> Option<&Schema> {
        self.fields.iter().find_map(|(spec, schema)| match spec {
            KeySpec::Any => Some(schema),
            _ => None,
        })
    }

    fn check(&self, record: &Record, path: &str) -> Result<(), SchemaError> {
        for (spec, _) in &self.fields {
            if let KeySpec::Required(key) = spec {
                if !record.contains_key(key) {
                    return Err(SchemaError::MissingKey {
                        path: path.to_string(),
                        key: key.clone(),
                    });
                }
            }
        }

        for (key, value) in record.iter() {
            let schema = self.named(key).or_else(|| self.wildcard()).ok_or_else(|| {
                SchemaError::UnexpectedKey {
                    path: path.to_string(),
                    key: key.to_string(),
                }
            })?;
            schema.check(value, &join(path, key))?;
        }
        Ok(())
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

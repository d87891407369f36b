//! Nested result record built by the extractor.

use std::fmt;
use std::net::IpAddr;

use indexmap::IndexMap;
use serde::Serialize;

use super::mac::MacAddress;

/// A leaf or nested value in a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    /// Unsigned values past `i64::MAX`, such as 64-bit interface counters.
    UInt(u64),
    Str(String),
    Ip(IpAddr),
    Mac(MacAddress),
    List(Vec<Value>),
    Map(Record),
}

impl Value {
    /// Short type name used in schema errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::UInt(_) => "int",
            Value::Str(_) => "str",
            Value::Ip(_) => "ip",
            Value::Mac(_) => "mac",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Any non-negative integer, signed or unsigned.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int(n) => u64::try_from(*n).ok(),
            Value::UInt(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Record> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Value::UInt(n), Value::Int)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<IpAddr> for Value {
    fn from(ip: IpAddr) -> Self {
        Value::Ip(ip)
    }
}

impl From<MacAddress> for Value {
    fn from(mac: MacAddress) -> Self {
        Value::Mac(mac)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Map(record)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Ip(ip) => write!(f, "{ip}"),
            Value::Mac(mac) => write!(f, "{mac}"),
            Value::List(_) | Value::Map(_) => match serde_json::to_string(self) {
                Ok(json) => write!(f, "{json}"),
                Err(_) => Err(fmt::Error),
            },
        }
    }
}

/// Insertion-ordered mapping from keys to values.
///
/// Records only grow while a parser runs. Nested maps are created on demand
/// by [`Record::map_mut`], so a rule can write `interface.Eth1/1.mtu`
/// without first checking which levels exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, Value>);

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Insert a value, returning the previous one if the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Insert only when there is a value; absent optional fields stay absent.
    pub fn insert_some(&mut self, key: impl Into<String>, value: Option<Value>) {
        if let Some(value) = value {
            self.0.insert(key.into(), value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Follow a key path through nested maps.
    pub fn get_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&Value> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for key in parents {
            current = current.get(key.as_ref())?.as_map()?;
        }
        current.get(last.as_ref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Get the nested map at `path`, creating empty maps along the way.
    ///
    /// A non-map value sitting on the path is replaced by a map; rules never
    /// store leaves and sections under the same key, so this only happens on
    /// malformed rule tables.
    pub fn map_mut<S: AsRef<str>>(&mut self, path: &[S]) -> &mut Record {
        let mut current = self;
        for key in path {
            let key = key.as_ref();
            let slot = current
                .0
                .entry(key.to_string())
                .or_insert_with(|| Value::Map(Record::new()));
            if !matches!(slot, Value::Map(_)) {
                *slot = Value::Map(Record::new());
            }
            current = match slot {
                Value::Map(map) => map,
                _ => unreachable!("slot was just made a map"),
            };
        }
        current
    }

    /// Get the list stored under `key`, creating it if absent.
    pub fn list_mut(&mut self, key: &str) -> &mut Vec<Value> {
        let slot = self
            .0
            .entry(key.to_string())
            .or_insert_with(|| Value::List(Vec::new()));
        if !matches!(slot, Value::List(_)) {
            *slot = Value::List(Vec::new());
        }
        match slot {
            Value::List(list) => list,
            _ => unreachable!("slot was just made a list"),
        }
    }

    /// Append `suffix` to the string leaf at `path`.
    ///
    /// Returns `false` (and changes nothing) when the path does not lead to a
    /// string.
    pub fn append_str<S: AsRef<str>>(&mut self, path: &[S], suffix: &str) -> bool {
        let Some((last, parents)) = path.split_last() else {
            return false;
        };
        let mut current = self;
        for key in parents {
            current = match current.0.get_mut(key.as_ref()) {
                Some(Value::Map(map)) => map,
                _ => return false,
            };
        }
        match current.0.get_mut(last.as_ref()) {
            Some(Value::Str(s)) => {
                s.push_str(suffix);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render the record as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_mut_creates_levels() {
        let mut record = Record::new();
        record
            .map_mut(&["interface", "Ethernet2/1"])
            .insert("mtu", 1500i64);

        assert_eq!(
            record.get_path(&["interface", "Ethernet2/1", "mtu"]),
            Some(&Value::Int(1500))
        );
    }

    #[test]
    fn test_map_mut_reuses_existing() {
        let mut record = Record::new();
        record.map_mut(&["a"]).insert("x", 1i64);
        record.map_mut(&["a"]).insert("y", 2i64);

        let a = record.get("a").and_then(Value::as_map).unwrap();
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_append_str() {
        let mut record = Record::new();
        record.map_mut(&["interface", "Vlan10"]).insert("ip_address", "10.1.1.1");

        assert!(record.append_str(&["interface", "Vlan10", "ip_address"], "(secondary)"));
        assert_eq!(
            record
                .get_path(&["interface", "Vlan10", "ip_address"])
                .and_then(Value::as_str),
            Some("10.1.1.1(secondary)")
        );
    }

    #[test]
    fn test_append_str_missing_path() {
        let mut record = Record::new();
        record.insert("count", 3i64);

        assert!(!record.append_str(&["nope", "ip_address"], "(x)"));
        assert!(!record.append_str(&["count"], "(x)"));
        let empty: [&str; 0] = [];
        assert!(!record.append_str(&empty, "(x)"));
        assert_eq!(record.get("count"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_list_mut() {
        let mut record = Record::new();
        record.list_mut("entries").push(Value::Int(1));
        record.list_mut("entries").push(Value::Int(2));
        assert_eq!(record.get("entries").and_then(Value::as_list).map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_serializes_in_insertion_order() {
        let mut record = Record::new();
        record.insert("zeta", true);
        record.insert("alpha", "x");
        record.insert("ip", "10.0.0.1".parse::<IpAddr>().unwrap());

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"zeta":true,"alpha":"x","ip":"10.0.0.1"}"#);
    }
}

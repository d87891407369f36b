//! Field coercions applied to captured text.
//!
//! Every coercion falls back to the trimmed raw string when the text does not
//! parse. A malformed field never aborts a parse; the schema check that runs
//! after extraction decides whether the fallback is acceptable.

use std::net::IpAddr;

use log::debug;
use regex::Captures;

use crate::record::{MacAddress, Value};

/// Try `parse` on the trimmed text, wrapping success with `wrap` and keeping
/// the raw string on failure.
pub fn try_coerce<T>(
    raw: &str,
    parse: impl FnOnce(&str) -> Option<T>,
    wrap: impl FnOnce(T) -> Value,
) -> Value {
    let raw = raw.trim();
    match parse(raw) {
        Some(parsed) => wrap(parsed),
        None => {
            debug!("coercion failed for '{}', keeping raw text", raw);
            Value::Str(raw.to_string())
        }
    }
}

/// Trimmed string.
pub fn text(raw: &str) -> Value {
    Value::Str(raw.trim().to_string())
}

/// Integer, or the raw text. Values too large for `i64` become
/// [`Value::UInt`].
pub fn int_or_raw(raw: &str) -> Value {
    try_coerce(
        raw,
        |s| match s.parse::<i64>() {
            Ok(n) => Some(Value::Int(n)),
            Err(_) => s.parse::<u64>().ok().map(Value::UInt),
        },
        |v| v,
    )
}

/// IP address, or the raw text (`Local`, `N/A`, ...).
pub fn ip_or_raw(raw: &str) -> Value {
    try_coerce(raw, |s| s.parse::<IpAddr>().ok(), Value::Ip)
}

/// MAC address, or the raw text.
pub fn mac_or_raw(raw: &str) -> Value {
    try_coerce(raw, |s| s.parse::<MacAddress>().ok(), Value::Mac)
}

/// Named capture groups of one matched line.
///
/// Accessors return `None` when the group did not participate in the match,
/// so optional columns translate directly into omitted keys.
#[derive(Debug)]
pub struct Fields<'c, 'h> {
    caps: &'c Captures<'h>,
}

impl<'c, 'h> Fields<'c, 'h> {
    pub fn new(caps: &'c Captures<'h>) -> Self {
        Self { caps }
    }

    /// Raw captured text, trimmed.
    pub fn raw(&self, name: &str) -> Option<&'h str> {
        self.caps.name(name).map(|m| m.as_str().trim())
    }

    /// Whether a group participated in the match.
    pub fn has(&self, name: &str) -> bool {
        self.caps.name(name).is_some()
    }

    pub fn text(&self, name: &str) -> Option<Value> {
        self.raw(name).map(text)
    }

    pub fn int(&self, name: &str) -> Option<Value> {
        self.raw(name).map(int_or_raw)
    }

    pub fn ip(&self, name: &str) -> Option<Value> {
        self.raw(name).map(ip_or_raw)
    }

    pub fn mac(&self, name: &str) -> Option<Value> {
        self.raw(name).map(mac_or_raw)
    }
}

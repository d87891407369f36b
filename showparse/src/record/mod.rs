//! Result record data model.
//!
//! Parsers produce a [`Record`]: an insertion-ordered map whose leaves are
//! strings, integers, booleans, IP addresses or MAC addresses.

mod mac;
mod value;

pub use mac::{MacAddress, ParseMacError};
pub use value::{Record, Value};

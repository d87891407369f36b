//! Line classifier and field extractor.
//!
//! Every text parser in this crate is a [`RuleSet`]: an ordered table of
//! `(pattern, handler)` rules plus a per-parse context type. The set walks the
//! output line by line, hands the first matching rule the captured fields, and
//! returns the accumulated [`Record`](crate::record::Record).
//!
//! ```rust
//! use showparse::extract::RuleSet;
//!
//! #[derive(Default)]
//! struct Ctx;
//!
//! let rules: RuleSet<Ctx> = RuleSet::builder()
//!     .skip("header", r"^Name\s+Value$")
//!     .rule("row", r"^(?P<name>\S+)\s+(?P<value>\S+)$", |f, _, rec| {
//!         if let (Some(name), Some(value)) = (f.raw("name"), f.int("value")) {
//!             rec.insert(name, value);
//!         }
//!     })
//!     .build()
//!     .unwrap();
//!
//! let record = rules.extract("Name   Value\nmtu    1500\n");
//! assert_eq!(record.get("mtu").and_then(|v| v.as_int()), Some(1500));
//! ```

pub mod coerce;
pub mod patterns;
mod rule;

pub use coerce::{Fields, int_or_raw, ip_or_raw, mac_or_raw, text, try_coerce};
pub use rule::{Apply, Guard, Rule, RuleSet, RuleSetBuilder};

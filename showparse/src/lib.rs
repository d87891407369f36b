//! # showparse
//!
//! Structured parsers for network device show-command output.
//!
//! Each parser is an ordered table of line rules. Output is read line by line,
//! the first matching rule writes its captured fields into a [`Record`], and
//! lines that match nothing are skipped. Captured text is coerced to integers,
//! IP addresses or MAC addresses when it parses as one and kept as a string
//! otherwise, so an unexpected value never aborts a parse.
//!
//! ## Features
//!
//! - IOS-XR `show users` and `show evpn evi mac` (current and legacy layouts)
//! - NX-OS `show interface`, `show interface brief`, `show interface switchport`
//!   and `show ip interface brief`
//! - BIG-IP REST passthrough parsers
//! - Schema validation kept separate from extraction
//! - A global registry for adding parsers for other platforms
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use showparse::device::CannedDevice;
//! use showparse::SessionBuilder;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), showparse::Error> {
//!     let output = std::fs::read_to_string("show_users.txt").unwrap_or_default();
//!     let device = CannedDevice::new().with_output("show users", output);
//!
//!     let mut session = SessionBuilder::new(device).os("iosxr").build()?;
//!     let users = session.parse("show users").await?;
//!     println!("{}", users.to_json());
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod error;
pub mod extract;
pub mod parser;
pub mod record;
pub mod schema;
pub mod session;

// Re-export main types for convenience
pub use device::{CannedDevice, Device};
pub use error::{Error, Result};
pub use parser::{
    AbstractParser, CliParser, DelegatedParser, ParserRegistry, PlatformParsers, Registered,
    RestParser,
};
pub use record::{MacAddress, Record, Value};
pub use schema::{MapSchema, Schema};
pub use session::{ParseSession, SessionBuilder, ValidationMode};

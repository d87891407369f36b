//! Vendor-specific parsers, one module per platform.

pub mod bigip;
pub mod iosxr;
pub mod nxos;

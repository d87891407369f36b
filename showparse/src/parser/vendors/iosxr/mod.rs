//! Cisco IOS-XR parsers.

mod evpn;
mod users;

pub use evpn::{ShowEvpnEthernetSegment, ShowEvpnEvi, ShowEvpnEviDetail, ShowEvpnEviMac};
pub use users::ShowUsers;

use crate::parser::PlatformParsers;

/// Platform name for IOS-XR.
pub const PLATFORM_NAME: &str = "iosxr";

/// Create the IOS-XR parser set.
pub fn platform() -> PlatformParsers {
    PlatformParsers::new(PLATFORM_NAME)
        .with_cli(ShowUsers)
        .with_cli(ShowEvpnEviMac::new())
        .with_delegated(ShowEvpnEvi)
        .with_delegated(ShowEvpnEviDetail)
        .with_delegated(ShowEvpnEthernetSegment::default())
        .with_delegated(ShowEvpnEthernetSegment::detail())
        .with_delegated(ShowEvpnEthernetSegment::private())
}

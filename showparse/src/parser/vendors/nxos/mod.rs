//! Cisco NX-OS parsers.

mod interface;
mod interface_brief;
mod ip_interface_brief;
mod switchport;

pub use interface::ShowInterface;
pub use interface_brief::ShowInterfaceBrief;
pub use ip_interface_brief::ShowIpInterfaceBrief;
pub use switchport::ShowInterfaceSwitchport;

use crate::parser::PlatformParsers;

/// Platform name for NX-OS.
pub const PLATFORM_NAME: &str = "nxos";

/// Create the NX-OS parser set.
pub fn platform() -> PlatformParsers {
    PlatformParsers::new(PLATFORM_NAME)
        .with_cli(ShowIpInterfaceBrief::new())
        .with_cli(ShowIpInterfaceBrief::vlan_only())
        .with_cli(ShowInterfaceSwitchport)
        .with_cli(ShowInterfaceBrief)
        .with_cli(ShowInterface)
}

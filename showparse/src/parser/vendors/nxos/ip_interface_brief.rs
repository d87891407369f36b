//! NX-OS `show ip interface brief`.
//!
//! ```text
//! Interface            IP Address      Interface Status
//! Vlan10               10.1.10.1       protocol-up/link-up/admin-up
//!                      (secondary)
//! Ethernet1/1          10.0.0.1        protocol-down/link-down/admin-up
//! ```
//!
//! VLAN interfaces nest under `vlan_id.<n>`. A parenthesized line on its own
//! is an annotation for the address of the row above it.

use std::borrow::Cow;

use once_cell::sync::Lazy;

use crate::extract::{Fields, RuleSet};
use crate::parser::CliParser;
use crate::record::Record;
use crate::schema::{MapSchema, Schema};

#[derive(Debug, Default)]
struct Ctx {
    /// Path of the `ip_address` leaf written by the last row.
    last_address: Option<Vec<String>>,
}

static RULES: Lazy<RuleSet<Ctx>> = Lazy::new(|| {
    RuleSet::<Ctx>::builder()
        .skip("header", r"^\s*Interface +IP Address +Interface Status$")
        .rule(
            "row",
            r"^\s*(?P<interface>[a-zA-Z0-9/.\-]+) +(?P<ip_address>[a-z0-9.]+) +(?P<interface_status>[a-z\-/]+)$",
            row,
        )
        .rule(
            "address_suffix",
            r"^\s*(?P<suffix>\([a-z0-9]+\))$",
            |f, ctx, rec| {
                let (Some(path), Some(suffix)) = (ctx.last_address.as_ref(), f.raw("suffix")) else {
                    return;
                };
                rec.append_str(path, suffix);
            },
        )
        .build()
        .expect("show ip interface brief rules compile")
});

static SCHEMA: Lazy<Schema> = Lazy::new(|| {
    let address = || {
        MapSchema::new()
            .required("ip_address", Schema::string())
            .required("interface_status", Schema::string())
            .optional("ipaddress_extension", Schema::string())
    };
    MapSchema::new()
        .required(
            "interface",
            MapSchema::new().any_key(
                MapSchema::new()
                    .optional("vlan_id", MapSchema::new().any_key(address()))
                    .optional("ip_address", Schema::string())
                    .optional("interface_status", Schema::string())
                    .optional("ipaddress_extension", Schema::string()),
            ),
        )
        .into()
});

/// Decimal VLAN number embedded in a `VlanN` interface name.
fn vlan_number(interface: &str) -> Option<String> {
    let start = interface.find(|c: char| c.is_ascii_digit())?;
    let digits: String = interface[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse::<u32>().ok().map(|n| n.to_string())
}

fn row(f: &Fields<'_, '_>, ctx: &mut Ctx, rec: &mut Record) {
    let Some(interface) = f.raw("interface") else {
        return;
    };

    let mut path = vec!["interface".to_string(), interface.to_string()];
    if interface.contains("Vlan") {
        if let Some(vlan) = vlan_number(interface) {
            path.push("vlan_id".to_string());
            path.push(vlan);
        }
    }

    let entry = rec.map_mut(&path);
    entry.insert_some("ip_address", f.text("ip_address"));
    entry.insert_some("interface_status", f.text("interface_status"));

    path.push("ip_address".to_string());
    ctx.last_address = Some(path);
}

/// Parser for `show ip interface brief`, optionally filtered to VLAN interfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowIpInterfaceBrief {
    vlan_only: bool,
}

impl ShowIpInterfaceBrief {
    pub fn new() -> Self {
        Self::default()
    }

    /// `show ip interface brief | include Vlan`.
    pub fn vlan_only() -> Self {
        Self { vlan_only: true }
    }
}

impl CliParser for ShowIpInterfaceBrief {
    fn command(&self) -> Cow<'_, str> {
        if self.vlan_only {
            Cow::Borrowed("show ip interface brief | include Vlan")
        } else {
            Cow::Borrowed("show ip interface brief")
        }
    }

    fn schema(&self) -> Option<&Schema> {
        Some(&*SCHEMA)
    }

    fn parse(&self, output: &str) -> Record {
        RULES.extract(output)
    }
}

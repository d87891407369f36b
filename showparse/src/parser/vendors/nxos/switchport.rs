//! NX-OS `show interface switchport`.
//!
//! ```text
//! Name: Ethernet1/1
//!   Switchport: Enabled
//!   Operational Mode: trunk
//!   Access Mode VLAN: 1 (default)
//!   Trunking Native Mode VLAN: 1 (default)
//!   Administrative private-vlan trunk native VLAN: none
//! ```
//!
//! The administrative mode is what is configured on the port; the
//! operational mode is what is actually running. VLANs are recorded under the
//! operational mode, and only for trunk and access ports.

use std::borrow::Cow;

use once_cell::sync::Lazy;

use crate::extract::{Fields, RuleSet};
use crate::parser::CliParser;
use crate::record::Record;
use crate::schema::{MapSchema, Schema};

#[derive(Debug, Default)]
struct Ctx {
    interface: Option<String>,
    operational_mode: Option<String>,
    admin_mode: Option<String>,
}

impl Ctx {
    fn in_interface(&self) -> bool {
        self.interface.is_some()
    }
}

fn is_switching(mode: &str) -> bool {
    mode.contains("trunk") || mode.contains("access")
}

static RULES: Lazy<RuleSet<Ctx>> = Lazy::new(|| {
    RuleSet::<Ctx>::builder()
        .rule(
            "name",
            r"^\s*Name:\s*(?P<interface>[a-zA-Z0-9/\-]+)$",
            |f, ctx, rec| {
                let Some(interface) = f.raw("interface") else {
                    return;
                };
                rec.map_mut(&["interface", interface]);
                *ctx = Ctx {
                    interface: Some(interface.to_string()),
                    ..Ctx::default()
                };
            },
        )
        .rule_when(
            "administrative_mode",
            r"^\s*Administrative Mode:\s*(?P<mode>.+)$",
            Ctx::in_interface,
            |f, ctx, _| ctx.admin_mode = f.raw("mode").map(str::to_string),
        )
        .rule_when(
            "operational_mode",
            r"^\s*Operational Mode:\s*(?P<mode>[a-z\s\-]+)$",
            Ctx::in_interface,
            operational_mode,
        )
        .rule_when(
            "trunk_native_vlan",
            r"^\s*Trunking Native Mode VLAN:\s*(?P<vlan>[0-9]+)(?: \([a-zA-Z]+\))*$",
            Ctx::in_interface,
            |f, ctx, rec| add_vlan(f, ctx, rec),
        )
        .rule_when(
            "access_vlan",
            r"^\s*Access Mode VLAN:\s*(?P<vlan>[a-z0-9]+)(?: \([a-zA-Z]+\))*$",
            Ctx::in_interface,
            |f, ctx, rec| add_vlan(f, ctx, rec),
        )
        .rule_when(
            "private_vlan_trunk_native",
            r"^\s*Administrative private-vlan trunk native VLAN:\s*(?P<vlan>[0-9]+)$",
            Ctx::in_interface,
            |f, ctx, rec| {
                // Gate on the configured mode when the device reports one.
                let mode = ctx.admin_mode.as_deref().or(ctx.operational_mode.as_deref());
                if mode.is_some_and(is_switching) {
                    add_vlan(f, ctx, rec);
                }
            },
        )
        .rule_when(
            "operational_trunk_encapsulation",
            r"^\s*Operational Trunking Encapsulation:\s*(?P<encapsulation>\S+)$",
            Ctx::in_interface,
            |f, ctx, rec| {
                if let Some(interface) = ctx.interface.as_deref() {
                    rec.map_mut(&["interface", interface])
                        .insert_some("operational_trunking_encapsulation", f.text("encapsulation"));
                }
            },
        )
        .build()
        .expect("show interface switchport rules compile")
});

static SCHEMA: Lazy<Schema> = Lazy::new(|| {
    let vlans = MapSchema::new()
        .any_key(MapSchema::new().optional("admin_trunking_encapsulation", Schema::string()));
    MapSchema::new()
        .required(
            "interface",
            MapSchema::new().any_key(
                MapSchema::new()
                    .optional(
                        "switchport_mode",
                        MapSchema::new().any_key(MapSchema::new().optional("vlan_id", vlans)),
                    )
                    .optional("operational_trunking_encapsulation", Schema::string()),
            ),
        )
        .into()
});

fn operational_mode(f: &Fields<'_, '_>, ctx: &mut Ctx, rec: &mut Record) {
    let (Some(interface), Some(mode)) = (ctx.interface.as_deref(), f.raw("mode")) else {
        return;
    };
    if is_switching(mode) {
        rec.map_mut(&["interface", interface, "switchport_mode", mode]);
    }
    ctx.operational_mode = Some(mode.to_string());
}

fn add_vlan(f: &Fields<'_, '_>, ctx: &Ctx, rec: &mut Record) {
    let (Some(interface), Some(mode), Some(vlan)) = (
        ctx.interface.as_deref(),
        ctx.operational_mode.as_deref(),
        f.raw("vlan"),
    ) else {
        return;
    };
    if is_switching(mode) {
        rec.map_mut(&["interface", interface, "switchport_mode", mode, "vlan_id", vlan]);
    }
}

/// Parser for `show interface switchport`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowInterfaceSwitchport;

impl CliParser for ShowInterfaceSwitchport {
    fn command(&self) -> Cow<'_, str> {
        Cow::Borrowed("show interface switchport")
    }

    fn schema(&self) -> Option<&Schema> {
        Some(&*SCHEMA)
    }

    fn parse(&self, output: &str) -> Record {
        RULES.extract(output)
    }
}

//! NX-OS `show interface brief`.
//!
//! The output is up to four tables, each introduced by its own header:
//!
//! ```text
//! Port   VRF          Status IP Address                              Speed    MTU
//! mgmt0  --           up     172.25.143.76                           1000     1500
//!
//! Ethernet      VLAN    Type Mode   Status  Reason                   Speed     Port
//! Eth1/1        1       eth  routed up      none                       10G(D) --
//!
//! Port-channel VLAN    Type Mode   Status  Reason                    Speed   Protocol
//! Po8          1       eth  access down    No operational members      auto(I)  lacp
//!
//! Interface     Status     Description
//! Lo0           up         --
//! ```
//!
//! Ethernet and port-channel rows share a shape, so every row rule is tied to
//! the table whose header was seen last.

use std::borrow::Cow;

use once_cell::sync::Lazy;

use crate::extract::{Fields, RuleSet};
use crate::parser::CliParser;
use crate::record::Record;
use crate::schema::{MapSchema, Schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Table {
    Port,
    Ethernet,
    PortChannel,
    Loopback,
}

impl Table {
    fn key(self) -> &'static str {
        match self {
            Table::Port => "port",
            Table::Ethernet => "ethernet",
            Table::PortChannel => "port_channel",
            Table::Loopback => "loopback",
        }
    }
}

#[derive(Debug, Default)]
struct Ctx {
    table: Option<Table>,
}

impl Ctx {
    fn in_port(&self) -> bool {
        self.table == Some(Table::Port)
    }

    fn in_ethernet(&self) -> bool {
        self.table == Some(Table::Ethernet)
    }

    fn in_port_channel(&self) -> bool {
        self.table == Some(Table::PortChannel)
    }

    fn in_loopback(&self) -> bool {
        self.table == Some(Table::Loopback)
    }

    fn enter(&mut self, table: Table, rec: &mut Record) {
        rec.map_mut(&["interface", table.key()]);
        self.table = Some(table);
    }
}

static RULES: Lazy<RuleSet<Ctx>> = Lazy::new(|| {
    RuleSet::<Ctx>::builder()
        .rule(
            "port_header",
            r"^\s*Port +VRF +Status +IP Address +Speed +MTU$",
            |_, ctx, rec| ctx.enter(Table::Port, rec),
        )
        .rule(
            "ethernet_header",
            r"^\s*Ethernet +VLAN +Type +Mode +Status +Reason +Speed +Port$",
            |_, ctx, rec| ctx.enter(Table::Ethernet, rec),
        )
        .rule(
            "port_channel_header",
            r"^\s*Port-channel +VLAN +Type +Mode +Status +Reason +Speed +Protocol$",
            |_, ctx, rec| ctx.enter(Table::PortChannel, rec),
        )
        .rule(
            "loopback_header",
            r"^\s*Interface +Status +Description$",
            |_, ctx, rec| ctx.enter(Table::Loopback, rec),
        )
        .rule_when(
            "port",
            r"^\s*(?P<interface>[a-zA-Z0-9]+) +(?P<vrf>[a-zA-Z0-9\-]+) +(?P<status>[a-zA-Z]+) +(?P<ip_address>[0-9.]+) +(?P<speed>[0-9]+) +(?P<mtu>[0-9]+)$",
            Ctx::in_port,
            |f, _, rec| row(f, Table::Port, &["vrf", "status", "ip_address", "speed", "mtu"], rec),
        )
        .rule_when(
            "ethernet",
            r"^\s*(?P<interface>[a-zA-Z0-9/]+) +(?P<vlan>[a-zA-Z0-9\-]+) +(?P<type>[a-zA-Z]+) +(?P<mode>[a-z]+) +(?P<status>[a-z]+) +(?P<reason>[a-zA-Z\s]+) +(?P<speed>[0-9a-zA-Z()\s]+) +(?P<port_ch>[0-9\-]+)$",
            Ctx::in_ethernet,
            |f, _, rec| {
                row(
                    f,
                    Table::Ethernet,
                    &["vlan", "type", "mode", "status", "reason", "speed", "port_ch"],
                    rec,
                )
            },
        )
        .rule_when(
            "port_channel",
            r"^\s*(?P<interface>[a-zA-Z0-9/]+) +(?P<vlan>[a-zA-Z0-9\-]+) +(?P<type>[a-zA-Z]+) +(?P<mode>[a-z]+) +(?P<status>[a-z]+) +(?P<reason>[a-zA-Z\s]+) +(?P<speed>[0-9a-zA-Z()\s]+) +(?P<protocol>[a-zA-Z0-9\-]+)$",
            Ctx::in_port_channel,
            |f, _, rec| {
                row(
                    f,
                    Table::PortChannel,
                    &["vlan", "type", "mode", "status", "reason", "speed", "protocol"],
                    rec,
                )
            },
        )
        .rule_when(
            "loopback",
            r"^\s*(?P<interface>[a-zA-Z0-9/]+) +(?P<status>[a-z]+) +(?P<description>[a-zA-Z\s\-]+)$",
            Ctx::in_loopback,
            |f, _, rec| row(f, Table::Loopback, &["status", "description"], rec),
        )
        .build()
        .expect("show interface brief rules compile")
});

static SCHEMA: Lazy<Schema> = Lazy::new(|| {
    let strings = |required: &[&str], optional: &[&str]| {
        let map = required
            .iter()
            .fold(MapSchema::new(), |m, k| m.required(*k, Schema::string()));
        let map = optional
            .iter()
            .fold(map, |m, k| m.optional(*k, Schema::string()));
        MapSchema::new().any_key(map)
    };
    MapSchema::new()
        .required(
            "interface",
            MapSchema::new()
                .required(
                    "ethernet",
                    strings(
                        &["vlan", "type", "mode", "status", "speed", "reason", "port_ch"],
                        &[],
                    ),
                )
                .optional(
                    "port",
                    strings(&[], &["vrf", "status", "ip_address", "speed", "mtu"]),
                )
                .optional(
                    "port_channel",
                    strings(
                        &[],
                        &["vlan", "type", "mode", "status", "speed", "reason", "protocol"],
                    ),
                )
                .optional("loopback", strings(&[], &["status", "description"])),
        )
        .into()
});

/// Write the named string columns of one row under `interface.<table>.<name>`.
fn row(f: &Fields<'_, '_>, table: Table, columns: &[&str], rec: &mut Record) {
    let Some(interface) = f.raw("interface") else {
        return;
    };
    let entry = rec.map_mut(&["interface", table.key(), interface]);
    for column in columns {
        entry.insert_some(*column, f.text(column));
    }
}

/// Parser for `show interface brief`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowInterfaceBrief;

impl CliParser for ShowInterfaceBrief {
    fn command(&self) -> Cow<'_, str> {
        Cow::Borrowed("show interface brief")
    }

    fn schema(&self) -> Option<&Schema> {
        Some(&*SCHEMA)
    }

    fn parse(&self, output: &str) -> Record {
        RULES.extract(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Value;
    use pretty_assertions::assert_eq;

    const OUTPUT: &str = "
--------------------------------------------------------------------------------
Port   VRF          Status IP Address                              Speed    MTU
--------------------------------------------------------------------------------
mgmt0  --           up     172.25.143.76                           1000     1500

--------------------------------------------------------------------------------
Ethernet      VLAN    Type Mode   Status  Reason                   Speed     Port
Interface                                                                    Ch #
--------------------------------------------------------------------------------
Eth1/1        1       eth  routed up      none                       10G(D) --
Eth1/3        1       eth  access down    Administratively down      auto(D) 10

--------------------------------------------------------------------------------
Port-channel VLAN    Type Mode   Status  Reason                    Speed   Protocol
Interface
--------------------------------------------------------------------------------
Po8          1       eth  access down    No operational members      auto(I)  lacp

---------------------------------------------------------------------------
Interface     Status     Description
---------------------------------------------------------------------------
Lo0           up         --
";

    fn leaf<'a>(record: &'a Record, path: &[&str]) -> Option<&'a str> {
        record.get_path(path).and_then(Value::as_str)
    }

    #[test]
    fn test_port_table() {
        let record = ShowInterfaceBrief.parse(OUTPUT);
        let mgmt: Record = [
            ("vrf", "--"),
            ("status", "up"),
            ("ip_address", "172.25.143.76"),
            ("speed", "1000"),
            ("mtu", "1500"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            record.get_path(&["interface", "port", "mgmt0"]),
            Some(&Value::Map(mgmt))
        );
    }

    #[test]
    fn test_ethernet_rows_are_trimmed() {
        let record = ShowInterfaceBrief.parse(OUTPUT);
        let path = |field| ["interface", "ethernet", "Eth1/3", field];
        assert_eq!(leaf(&record, &path("reason")), Some("Administratively down"));
        assert_eq!(leaf(&record, &path("speed")), Some("auto(D)"));
        assert_eq!(leaf(&record, &path("port_ch")), Some("10"));
        assert_eq!(
            leaf(&record, &["interface", "ethernet", "Eth1/1", "port_ch"]),
            Some("--")
        );
    }

    #[test]
    fn test_rows_stay_in_their_table() {
        let record = ShowInterfaceBrief.parse(OUTPUT);
        assert_eq!(
            leaf(&record, &["interface", "port_channel", "Po8", "protocol"]),
            Some("lacp")
        );
        assert_eq!(
            leaf(&record, &["interface", "port_channel", "Po8", "reason"]),
            Some("No operational members")
        );
        assert!(record.get_path(&["interface", "ethernet", "Po8"]).is_none());
        assert_eq!(
            leaf(&record, &["interface", "loopback", "Lo0", "description"]),
            Some("--")
        );
    }

    #[test]
    fn test_rows_before_any_header_are_ignored() {
        let record = ShowInterfaceBrief
            .parse("Eth1/1        1       eth  routed up      none                       10G(D) --");
        assert!(record.is_empty());
    }

    #[test]
    fn test_header_alone_creates_table() {
        let record = ShowInterfaceBrief
            .parse("Ethernet      VLAN    Type Mode   Status  Reason                   Speed     Port");
        let ethernet = record
            .get_path(&["interface", "ethernet"])
            .and_then(Value::as_map)
            .unwrap();
        assert!(ethernet.is_empty());
    }

    #[test]
    fn test_schema() {
        let record = ShowInterfaceBrief.parse(OUTPUT);
        assert_eq!(ShowInterfaceBrief.schema().unwrap().validate_record(&record), Ok(()));
    }
}

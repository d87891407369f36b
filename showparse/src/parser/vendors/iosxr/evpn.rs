//! IOS-XR `show evpn ...` parsers.
//!
//! `show evpn evi mac` is parsed here. The EVI and ethernet-segment tables
//! are handed to the abstract parser.

use std::borrow::Cow;

use once_cell::sync::Lazy;

use crate::extract::patterns::{IP, LABEL, MAC};
use crate::extract::{Fields, RuleSet};
use crate::parser::{CliParser, DelegatedParser};
use crate::record::{Record, Value};
use crate::schema::{MapSchema, Schema};

static MAC_RULES: Lazy<RuleSet<()>> = Lazy::new(|| {
    RuleSet::<()>::builder()
        .skip("header", r"^(?:EVI\s+)?MAC address\s+")
        .skip("ruler", r"^[- ]+$")
        // 65535      02e5.7847.6000 ::                                       Local                                   0
        // 1          0000.0000.0001 ::                                       No remote pathlist
        .rule(
            "entry",
            &format!(
                r"^(?P<evi>[0-9]+) +(?P<mac>{mac}) +(?P<ip>{ip})(?: +No remote pathlist| +(?P<next_hop>\S+) +(?P<label>{label}))$",
                mac = &*MAC,
                ip = &*IP,
                label = LABEL,
            ),
            entry,
        )
        // Older releases: MAC, next hop, label, then the EVI as "vpn-id".
        // 7777.7777.0002 N/A                                     24005    7
        .rule(
            "legacy_entry",
            &format!(
                r"^(?P<mac>{mac}) +(?P<next_hop>\S+) +(?P<label>{label}) +(?P<evi>[0-9]+)$",
                mac = &*MAC,
                label = LABEL,
            ),
            entry,
        )
        .build()
        .expect("show evpn evi mac rules compile")
});

static MAC_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    let address = || Schema::either([Schema::ip(), Schema::string()]);
    MapSchema::new()
        .required(
            "entries",
            Schema::list(
                MapSchema::new()
                    .required("evi", Schema::int())
                    .required("mac", Schema::either([Schema::mac(), Schema::string()]))
                    .optional("ip", address())
                    .optional("next_hop", address())
                    .optional("label", Schema::either([Schema::int(), Schema::string()])),
            ),
        )
        .into()
});

fn entry(f: &Fields<'_, '_>, _: &mut (), rec: &mut Record) {
    let mut entry = Record::new();
    entry.insert_some("evi", f.int("evi"));
    entry.insert_some("mac", f.mac("mac"));
    entry.insert_some("ip", f.ip("ip"));
    entry.insert_some("next_hop", f.ip("next_hop"));
    entry.insert_some("label", f.int("label"));
    rec.list_mut("entries").push(Value::Map(entry));
}

/// Parser for `show evpn evi mac [<mac>]`.
///
/// Produces `{"entries": [...]}` with one entry per table row, in output
/// order. Both the current and the older column layouts are understood.
#[derive(Debug, Clone, Default)]
pub struct ShowEvpnEviMac {
    mac: Option<String>,
}

impl ShowEvpnEviMac {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the command to a single MAC address.
    pub fn for_mac(mac: impl Into<String>) -> Self {
        Self {
            mac: Some(mac.into()),
        }
    }
}

impl CliParser for ShowEvpnEviMac {
    fn command(&self) -> Cow<'_, str> {
        match &self.mac {
            Some(mac) => Cow::Owned(format!("show evpn evi mac {mac}")),
            None => Cow::Borrowed("show evpn evi mac"),
        }
    }

    fn schema(&self) -> Option<&Schema> {
        Some(&*MAC_SCHEMA)
    }

    fn parse(&self, output: &str) -> Record {
        let mut record = MAC_RULES.extract(output);
        // An empty table still reports an empty entry list.
        record.list_mut("entries");
        record
    }
}

/// `show evpn evi`, handed to the abstract parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowEvpnEvi;

impl DelegatedParser for ShowEvpnEvi {
    fn command(&self) -> Cow<'_, str> {
        Cow::Borrowed("show evpn evi")
    }
}

/// `show evpn evi detail`, handed to the abstract parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowEvpnEviDetail;

impl DelegatedParser for ShowEvpnEviDetail {
    fn command(&self) -> Cow<'_, str> {
        Cow::Borrowed("show evpn evi detail")
    }
}

/// `show evpn ethernet-segment [detail | private]`, handed to the abstract
/// parser. `private` takes precedence when both are set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowEvpnEthernetSegment {
    pub detail: bool,
    pub private: bool,
}

impl ShowEvpnEthernetSegment {
    pub fn detail() -> Self {
        Self {
            detail: true,
            private: false,
        }
    }

    pub fn private() -> Self {
        Self {
            detail: false,
            private: true,
        }
    }
}

impl DelegatedParser for ShowEvpnEthernetSegment {
    fn command(&self) -> Cow<'_, str> {
        if self.private {
            Cow::Borrowed("show evpn ethernet-segment private")
        } else if self.detail {
            Cow::Borrowed("show evpn ethernet-segment detail")
        } else {
            Cow::Borrowed("show evpn ethernet-segment")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MacAddress;
    use pretty_assertions::assert_eq;

    const OUTPUT: &str = "
EVI        MAC address    IP address                               Nexthop                                 Label
---------- -------------- ---------------------------------------- --------------------------------------- --------
65535      02e5.7847.6000 ::                                       Local                                   0
1          0000.0000.0001 ::                                       No remote pathlist
7          7777.7777.0002 10.1.1.2                                 10.0.0.3                                IPv4-explicit-null
";

    const LEGACY_OUTPUT: &str = "
MAC address    Nexthop                                 Label    vpn-id
-------------- --------------------------------------- -------- --------
7777.7777.0002 N/A                                     24005    7
7777.7777.0003 10.0.0.3                                24006    7
";

    fn entries(record: &Record) -> Vec<&Record> {
        record
            .get("entries")
            .and_then(Value::as_list)
            .unwrap()
            .iter()
            .filter_map(Value::as_map)
            .collect()
    }

    #[test]
    fn test_local_entry() {
        let record = ShowEvpnEviMac::new().parse(
            "65535      02e5.7847.6000 ::                                       Local                                   0",
        );
        let entries = entries(&record);
        assert_eq!(entries.len(), 1);

        let expected: Record = [
            ("evi", Value::Int(65535)),
            ("mac", Value::Mac(MacAddress::new([0x02, 0xe5, 0x78, 0x47, 0x60, 0x00]))),
            ("ip", Value::Ip("::".parse().unwrap())),
            ("next_hop", Value::Str("Local".into())),
            ("label", Value::Int(0)),
        ]
        .into_iter()
        .collect();
        assert_eq!(entries[0], &expected);
    }

    #[test]
    fn test_table() {
        let record = ShowEvpnEviMac::new().parse(OUTPUT);
        let entries = entries(&record);
        assert_eq!(entries.len(), 3);

        let no_path = entries[1];
        assert_eq!(no_path.get("evi"), Some(&Value::Int(1)));
        assert!(no_path.get("next_hop").is_none());
        assert!(no_path.get("label").is_none());

        let remote = entries[2];
        assert_eq!(remote.get("next_hop"), Some(&Value::Ip("10.0.0.3".parse().unwrap())));
        assert_eq!(remote.get("label"), Some(&Value::Str("IPv4-explicit-null".into())));
    }

    #[test]
    fn test_legacy_table() {
        let record = ShowEvpnEviMac::new().parse(LEGACY_OUTPUT);
        let entries = entries(&record);
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].get("evi"), Some(&Value::Int(7)));
        assert_eq!(entries[0].get("next_hop"), Some(&Value::Str("N/A".into())));
        assert_eq!(entries[0].get("label"), Some(&Value::Int(24005)));
        assert!(entries[0].get("ip").is_none());
        assert_eq!(
            entries[1].get("next_hop"),
            Some(&Value::Ip("10.0.0.3".parse().unwrap()))
        );
    }

    #[test]
    fn test_both_layouts_share_keys() {
        let current = ShowEvpnEviMac::new()
            .parse("7          7777.7777.0002 10.1.1.2      10.0.0.3      24005");
        let legacy = ShowEvpnEviMac::new().parse("7777.7777.0002 10.0.0.3      24005    7");

        let current = entries(&current)[0].clone();
        let legacy = entries(&legacy)[0].clone();
        for key in legacy.keys() {
            assert_eq!(current.get(key), legacy.get(key), "key {key}");
        }
        assert_eq!(current.len(), legacy.len() + 1);
        assert!(current.contains_key("ip"));
    }

    #[test]
    fn test_schema() {
        let parser = ShowEvpnEviMac::new();
        let record = parser.parse(OUTPUT);
        assert_eq!(parser.schema().unwrap().validate_record(&record), Ok(()));
        assert_eq!(
            parser.schema().unwrap().validate_record(&parser.parse("")),
            Ok(())
        );
    }

    #[test]
    fn test_commands() {
        assert_eq!(ShowEvpnEviMac::new().command(), "show evpn evi mac");
        assert_eq!(
            ShowEvpnEviMac::for_mac("02e5.7847.6000").command(),
            "show evpn evi mac 02e5.7847.6000"
        );
        assert_eq!(ShowEvpnEvi.command(), "show evpn evi");
        assert_eq!(ShowEvpnEviDetail.command(), "show evpn evi detail");
        assert_eq!(ShowEvpnEthernetSegment::default().command(), "show evpn ethernet-segment");
        assert_eq!(
            ShowEvpnEthernetSegment::detail().command(),
            "show evpn ethernet-segment detail"
        );
        let both = ShowEvpnEthernetSegment {
            detail: true,
            private: true,
        };
        assert_eq!(both.command(), "show evpn ethernet-segment private");
    }
}

//! NX-OS `show interface`.
//!
//! Each interface block starts with `<name> is up|down` and every following
//! line is attributed to that interface until the next block starts.
//! Counter blocks are split by bare `RX` and `TX` lines; the unicast line has
//! the same shape in both, so the last marker decides where it lands.

use std::borrow::Cow;

use once_cell::sync::Lazy;

use crate::extract::{Fields, RuleSet};
use crate::parser::CliParser;
use crate::record::Record;
use crate::schema::{MapSchema, Schema};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Direction {
    #[default]
    In,
    Out,
}

impl Direction {
    fn prefix(self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

#[derive(Debug, Default)]
struct Ctx {
    interface: Option<String>,
    direction: Direction,
}

impl Ctx {
    fn in_interface(&self) -> bool {
        self.interface.is_some()
    }
}

const INTERFACE: &str = r"^\s*(?P<interface>[a-zA-Z0-9/.\-]+) *is";
const LINK_STATE: &str = r"(?: *\((?P<link_state>[a-zA-Z\s]+)\))?$";

static RULES: Lazy<RuleSet<Ctx>> = Lazy::new(|| {
    RuleSet::<Ctx>::builder()
        // Ethernet2/1.10 is down (Administratively down)
        .rule(
            "interface_down",
            &format!("{INTERFACE} *down{LINK_STATE}"),
            |f, ctx, rec| start_interface(f, ctx, rec, false),
        )
        .rule(
            "interface_up",
            &format!("{INTERFACE} *up{LINK_STATE}"),
            |f, ctx, rec| start_interface(f, ctx, rec, true),
        )
        // admin state is down, Dedicated Interface, [parent interface is Ethernet2/1]
        .rule_when(
            "admin_state_parent",
            r"^\s*admin *state *is *(?P<oper_status>[a-z]+),? *Dedicated *Interface, *\[parent *interface *is *(?P<parent_interface>[a-zA-Z0-9/.\-]+)\]$",
            Ctx::in_interface,
            |f, ctx, rec| strings(f, ctx, rec, &["oper_status", "parent_interface"]),
        )
        .rule_when(
            "admin_state",
            r"^\s*admin *state *is *(?P<oper_status>[a-z]+),?(?: *Dedicated *Interface)?$",
            Ctx::in_interface,
            |f, ctx, rec| strings(f, ctx, rec, &["oper_status"]),
        )
        // Hardware: Ethernet, address: 5254.00c9.d26e (bia 5254.00c9.d26e)
        .rule_when(
            "hardware",
            r"^\s*Hardware: *(?P<types>[a-zA-Z0-9/\s]+), *address: *(?P<mac_address>[a-z0-9.]+) *\(bia *(?P<phys_address>[a-z0-9.]+)\)$",
            Ctx::in_interface,
            |f, ctx, rec| strings(f, ctx, rec, &["types", "mac_address", "phys_address"]),
        )
        .rule_when(
            "description",
            r"^\s*Description: *(?P<description>\S.*)$",
            Ctx::in_interface,
            |f, ctx, rec| strings(f, ctx, rec, &["description"]),
        )
        // Internet Address is 10.4.4.4/24 secondary tag 10
        // prefix_length is stored without the slash ("24", not "/24").
        .rule_when(
            "internet_address",
            r"^\s*Internet *Address *is *(?P<ipv4>[0-9.]+)/(?P<prefix_length>[0-9]+)(?: *(?P<secondary>secondary))?(?: *tag *(?P<route_tag>[0-9]+))?$",
            Ctx::in_interface,
            internet_address,
        )
        // MTU 1600 bytes, BW 768 Kbit, DLY 3330 usec
        .rule_when(
            "mtu",
            r"^\s*MTU *(?P<mtu>[0-9]+) *bytes, *BW *(?P<bandwidth>[0-9]+) *Kbit, *DLY *(?P<delay>[0-9]+) *usec$",
            Ctx::in_interface,
            |f, ctx, rec| ints(f, ctx, rec, &["mtu", "bandwidth", "delay"]),
        )
        .rule_when(
            "load",
            r"^\s*reliability *(?P<reliability>[0-9/]+), *txload *(?P<txload>[0-9/]+), *rxload *(?P<rxload>[0-9/]+)$",
            Ctx::in_interface,
            |f, ctx, rec| strings(f, ctx, rec, &["reliability", "txload", "rxload"]),
        )
        // Encapsulation 802.1Q Virtual LAN, Vlan ID 10, medium is broadcast
        .rule_when(
            "encapsulation_vlan",
            r"^\s*Encapsulation *(?P<encapsulation>[a-zA-Z0-9.\s]+), *(?i:vlan) *ID *(?P<first_dot1q>[0-9]+), *medium *is *(?P<medium>[a-zA-Z0-9]+)$",
            Ctx::in_interface,
            encapsulation,
        )
        // Encapsulation ARPA, medium is broadcast
        .rule_when(
            "encapsulation",
            r"^\s*Encapsulation *(?P<encapsulation>[a-zA-Z0-9.\s]+), *medium *is *(?P<medium>[a-zA-Z0-9]+)$",
            Ctx::in_interface,
            encapsulation,
        )
        .rule_when(
            "port_mode",
            r"^\s*Port *mode *is *(?P<port_mode>[a-z]+)$",
            Ctx::in_interface,
            |f, ctx, rec| strings(f, ctx, rec, &["port_mode"]),
        )
        // full-duplex, 1000 Mb/s, media type is 1G
        .rule_when(
            "duplex",
            r"^\s*(?P<duplex_mode>[a-z\-]+), *(?P<port_speed>[0-9]+) *Mb/s(?:,.*)?$",
            Ctx::in_interface,
            |f, ctx, rec| strings(f, ctx, rec, &["duplex_mode", "port_speed"]),
        )
        .rule_when(
            "beacon",
            r"^\s*Beacon *is *turned *(?P<beacon>[a-z]+)$",
            Ctx::in_interface,
            |f, ctx, rec| strings(f, ctx, rec, &["beacon"]),
        )
        .rule_when(
            "auto_negotiate_off",
            r"^\s*Auto-Negotiation *is *turned *off$",
            Ctx::in_interface,
            |_, ctx, rec| flag(ctx, rec, "auto_negotiate", false),
        )
        .rule_when(
            "auto_negotiate_on",
            r"^\s*Auto-Negotiation *is *turned *on$",
            Ctx::in_interface,
            |_, ctx, rec| flag(ctx, rec, "auto_negotiate", true),
        )
        .rule_when(
            "flow_control_off_off",
            r"^\s*Input *flow-control *is *off, *output *flow-control *is *off$",
            Ctx::in_interface,
            |_, ctx, rec| flow_control(ctx, rec, false, false),
        )
        .rule_when(
            "flow_control_off_on",
            r"^\s*Input *flow-control *is *off, *output *flow-control *is *on$",
            Ctx::in_interface,
            |_, ctx, rec| flow_control(ctx, rec, false, true),
        )
        .rule_when(
            "flow_control_on_off",
            r"^\s*Input *flow-control *is *on, *output *flow-control *is *off$",
            Ctx::in_interface,
            |_, ctx, rec| flow_control(ctx, rec, true, false),
        )
        .rule_when(
            "flow_control_on_on",
            r"^\s*Input *flow-control *is *on, *output *flow-control *is *on$",
            Ctx::in_interface,
            |_, ctx, rec| flow_control(ctx, rec, true, true),
        )
        .rule_when(
            "auto_mdix",
            r"^\s*Auto-mdix *is *turned *(?P<auto_mdix>[a-z]+)$",
            Ctx::in_interface,
            |f, ctx, rec| strings(f, ctx, rec, &["auto_mdix"]),
        )
        .rule_when(
            "switchport_monitor",
            r"^\s*Switchport *monitor *is *(?P<switchport_monitor>[a-z]+)$",
            Ctx::in_interface,
            |f, ctx, rec| strings(f, ctx, rec, &["switchport_monitor"]),
        )
        .rule_when(
            "ethertype",
            r"^\s*Ether[tT]ype *is *(?P<ethertype>[a-z0-9]+)$",
            Ctx::in_interface,
            |f, ctx, rec| strings(f, ctx, rec, &["ethertype"]),
        )
        // EEE (efficient-ethernet) : n/a
        .rule_when(
            "efficient_ethernet",
            r"^\s*EEE *\(efficient-ethernet\) *: *(?P<efficient_ethernet>[A-Za-z/]+)$",
            Ctx::in_interface,
            |f, ctx, rec| strings(f, ctx, rec, &["efficient_ethernet"]),
        )
        .rule_when(
            "last_link_flapped",
            r"^\s*Last *link *flapped *(?P<last_linked_flapped>[0-9a-z:]+)$",
            Ctx::in_interface,
            |f, ctx, rec| strings(f, ctx, rec, &["last_linked_flapped"]),
        )
        // Last clearing of "show interface" counters never
        .rule_when(
            "last_clearing",
            r#"^\s*Last *clearing *of *"show *interface" *counters *(?P<last_clearing>[a-z0-9:]+)$"#,
            Ctx::in_interface,
            |f, ctx, rec| strings(f, ctx, rec, &["last_clearing"]),
        )
        .rule_when(
            "interface_resets",
            r"^\s*(?P<interface_reset>[0-9]+) *interface *resets$",
            Ctx::in_interface,
            |f, ctx, rec| ints(f, ctx, rec, &["interface_reset"]),
        )
        .rule_when("rx", r"^\s*RX$", Ctx::in_interface, |_, ctx, _| {
            ctx.direction = Direction::In
        })
        .rule_when("tx", r"^\s*TX$", Ctx::in_interface, |_, ctx, _| {
            ctx.direction = Direction::Out
        })
        // 1 minute input rate 0 bits/sec, 0 packets/sec
        .rule_when(
            "input_rate",
            r"^\s*(?P<load_interval>[0-9#]+) *(?:minutes?|seconds?) *input *rate *(?P<in_rate>[0-9]+) *bits/sec, *(?P<in_rate_pkts>[0-9]+) *packets/sec$",
            Ctx::in_interface,
            |f, ctx, rec| rate(f, ctx, rec, &["load_interval", "in_rate", "in_rate_pkts"]),
        )
        .rule_when(
            "output_rate",
            r"^\s*(?P<load_interval>[0-9#]+) *(?:minutes?|seconds?) *output *rate *(?P<out_rate>[0-9]+) *bits/sec, *(?P<out_rate_pkts>[0-9]+) *packets/sec$",
            Ctx::in_interface,
            |f, ctx, rec| rate(f, ctx, rec, &["load_interval", "out_rate", "out_rate_pkts"]),
        )
        // input rate 0 bps, 0 pps; output rate 0 bps, 0 pps
        .rule_when(
            "bps_rate",
            r"^\s*input *rate *(?P<in_rate_bps>[0-9]+) *bps, *(?P<in_rate_pps>[0-9]+) *pps; *output *rate *(?P<out_rate_bps>[0-9]+) *bps, *(?P<out_rate_pps>[0-9]+) *pps$",
            Ctx::in_interface,
            |f, ctx, rec| {
                rate(f, ctx, rec, &["in_rate_bps", "in_rate_pps", "out_rate_bps", "out_rate_pps"])
            },
        )
        // 0 unicast packets  0 multicast packets  0 broadcast packets
        .rule_when(
            "casts",
            r"^\s*(?P<unicast_pkts>[0-9]+) +unicast +packets +(?P<multicast_pkts>[0-9]+) +multicast +packets +(?P<broadcast_pkts>[0-9]+) +broadcast +packets$",
            Ctx::in_interface,
            casts,
        )
        .rule_when(
            "input_packets",
            r"^\s*(?P<in_pkts>[0-9]+) +input +packets +(?P<in_bytes>[0-9]+) +bytes$",
            Ctx::in_interface,
            |f, ctx, rec| counters(f, ctx, rec, &["in_pkts", "in_bytes"]),
        )
        .rule_when(
            "input_jumbo",
            r"^\s*(?P<in_jumbo_packets>[0-9]+) +jumbo +packets *(?P<in_storm_suppression_packets>[0-9]+) *storm *suppression *packets$",
            Ctx::in_interface,
            |f, ctx, rec| {
                counters(f, ctx, rec, &["in_jumbo_packets", "in_storm_suppression_packets"])
            },
        )
        // 0 runts  0 giants  0 CRC/FCS  0 no buffer
        .rule_when(
            "runts",
            r"^\s*(?P<in_runts>[0-9]+) *runts *(?P<in_giant>[0-9]+) *giants *(?P<in_crc_errors>[0-9]+) *CRC/FCS *(?P<in_no_buffer>[0-9]+) *no *buffer$",
            Ctx::in_interface,
            |f, ctx, rec| {
                counters(f, ctx, rec, &["in_runts", "in_giant", "in_crc_errors", "in_no_buffer"])
            },
        )
        .rule_when(
            "input_errors",
            r"^\s*(?P<in_error>[0-9]+) *input *error *(?P<in_short_frame>[0-9]+) *short *frame *(?P<in_overrun>[0-9]+) *overrun *(?P<in_underrun>[0-9]+) *underrun *(?P<in_ignored>[0-9]+) *ignored$",
            Ctx::in_interface,
            |f, ctx, rec| {
                counters(
                    f,
                    ctx,
                    rec,
                    &["in_error", "in_short_frame", "in_overrun", "in_underrun", "in_ignored"],
                )
            },
        )
        .rule_when(
            "input_drops",
            r"^\s*(?P<in_watchdog>[0-9]+) *watchdog *(?P<in_bad_etype_drop>[0-9]+) *bad *etype *drop *(?P<in_bad_proto_drop>[0-9]+) *bad *proto *drop *(?P<in_if_down_drop>[0-9]+) *if *down *drop$",
            Ctx::in_interface,
            |f, ctx, rec| {
                counters(
                    f,
                    ctx,
                    rec,
                    &["in_watchdog", "in_bad_etype_drop", "in_bad_proto_drop", "in_if_down_drop"],
                )
            },
        )
        .rule_when(
            "input_discard",
            r"^\s*(?P<in_with_dribble>[0-9]+) *input *with *dribble *(?P<in_discard>[0-9]+) *input *discard$",
            Ctx::in_interface,
            |f, ctx, rec| counters(f, ctx, rec, &["in_with_dribble", "in_discard"]),
        )
        .rule_when(
            "rx_pause",
            r"^\s*(?P<in_mac_pause_frames>[0-9]+) *Rx *pause$",
            Ctx::in_interface,
            |f, ctx, rec| counters(f, ctx, rec, &["in_mac_pause_frames"]),
        )
        .rule_when(
            "output_packets",
            r"^\s*(?P<out_pkts>[0-9]+) *output *packets *(?P<out_bytes>[0-9]+) *bytes$",
            Ctx::in_interface,
            |f, ctx, rec| counters(f, ctx, rec, &["out_pkts", "out_bytes"]),
        )
        .rule_when(
            "output_jumbo",
            r"^\s*(?P<out_jumbo_packets>[0-9]+) *jumbo *packets$",
            Ctx::in_interface,
            |f, ctx, rec| counters(f, ctx, rec, &["out_jumbo_packets"]),
        )
        // 0 output error  0 collision  0 deferred  0 late collision
        .rule_when(
            "output_errors",
            r"^\s*(?P<out_error>[0-9]+) *output *error *(?P<out_collision>[0-9]+) *collision *(?P<out_deferred>[0-9]+) *deferred *(?P<out_late_collision>[0-9]+) *late *collision$",
            Ctx::in_interface,
            |f, ctx, rec| {
                counters(
                    f,
                    ctx,
                    rec,
                    &["out_error", "out_collision", "out_deferred", "out_late_collision"],
                )
            },
        )
        .rule_when(
            "output_carrier",
            r"^\s*(?P<out_lost_carrier>[0-9]+) *lost *carrier *(?P<out_no_carrier>[0-9]+) *no *carrier *(?P<out_babble>[0-9]+) *babble *(?P<out_discard>[0-9]+) *output *discard$",
            Ctx::in_interface,
            |f, ctx, rec| {
                counters(
                    f,
                    ctx,
                    rec,
                    &["out_lost_carrier", "out_no_carrier", "out_babble", "out_discard"],
                )
            },
        )
        .rule_when(
            "tx_pause",
            r"^\s*(?P<out_mac_pause_frames>[0-9]+) *Tx *pause$",
            Ctx::in_interface,
            |f, ctx, rec| counters(f, ctx, rec, &["out_mac_pause_frames"]),
        )
        .build()
        .expect("show interface rules compile")
});

const COUNTERS: &[&str] = &[
    "in_unicast_pkts",
    "in_multicast_pkts",
    "in_broadcast_pkts",
    "in_discards",
    "in_crc_errors",
    "in_oversize_frames",
    "in_pkts",
    "in_mac_pause_frames",
    "in_jumbo_packets",
    "in_storm_suppression_packets",
    "in_runts",
    "in_giant",
    "in_overrun",
    "in_underrun",
    "in_ignored",
    "in_watchdog",
    "in_bad_etype_drop",
    "in_bad_proto_drop",
    "in_if_down_drop",
    "in_with_dribble",
    "in_discard",
    "in_bytes",
    "in_error",
    "in_short_frame",
    "in_no_buffer",
    "out_pkts",
    "out_unicast_pkts",
    "out_multicast_pkts",
    "out_broadcast_pkts",
    "out_discard",
    "out_bytes",
    "out_jumbo_packets",
    "out_error",
    "out_collision",
    "out_deferred",
    "out_late_collision",
    "out_lost_carrier",
    "out_no_carrier",
    "out_babble",
    "out_mac_pause_frames",
];

const RATES: &[&str] = &[
    "load_interval",
    "in_rate",
    "in_rate_pkts",
    "out_rate",
    "out_rate_pkts",
    "in_rate_bps",
    "in_rate_pps",
    "out_rate_bps",
    "out_rate_pps",
];

static SCHEMA: Lazy<Schema> = Lazy::new(|| {
    let rate = RATES
        .iter()
        .fold(MapSchema::new(), |m, k| {
            m.optional(*k, Schema::either([Schema::int(), Schema::string()]))
        });
    let counters = COUNTERS
        .iter()
        .fold(MapSchema::new().optional("rate", rate), |m, k| {
            m.optional(*k, Schema::int())
        });

    let interface = MapSchema::new()
        .optional("description", Schema::string())
        .required("types", Schema::string())
        .optional("parent_interface", Schema::string())
        .required("oper_status", Schema::string())
        .optional("link_state", Schema::string())
        .required("phys_address", Schema::string())
        .optional("port_speed", Schema::string())
        .required("mtu", Schema::int())
        .required("enabled", Schema::bool())
        .required("mac_address", Schema::string())
        .optional("auto_negotiate", Schema::bool())
        .optional("duplex_mode", Schema::string())
        .required("port_mode", Schema::string())
        .optional("auto_mdix", Schema::string())
        .optional("switchport_monitor", Schema::string())
        .optional("efficient_ethernet", Schema::string())
        .optional("last_linked_flapped", Schema::string())
        .optional("last_clearing", Schema::string())
        .optional("interface_reset", Schema::int())
        .optional("ethertype", Schema::string())
        .optional("beacon", Schema::string())
        .optional("medium", Schema::string())
        .required("reliability", Schema::string())
        .required("txload", Schema::string())
        .required("rxload", Schema::string())
        .required("delay", Schema::int())
        .optional(
            "flow_control",
            MapSchema::new()
                .optional("flow_control_receive", Schema::bool())
                .optional("flow_control_send", Schema::bool()),
        )
        .required("bandwidth", Schema::int())
        .optional("counters", counters)
        .optional(
            "encapsulations",
            MapSchema::new()
                .optional("encapsulation", Schema::string())
                .optional("first_dot1q", Schema::string())
                .optional("native_vlan", Schema::int()),
        )
        .optional(
            "ipv4",
            MapSchema::new().any_key(
                MapSchema::new()
                    .optional("ipv4", Schema::either([Schema::ip(), Schema::string()]))
                    .optional("prefix_length", Schema::string())
                    .optional("secondary", Schema::bool())
                    .optional("route_tag", Schema::int()),
            ),
        );

    MapSchema::new()
        .required("interface", MapSchema::new().any_key(interface))
        .into()
});

fn start_interface(f: &Fields<'_, '_>, ctx: &mut Ctx, rec: &mut Record, enabled: bool) {
    let Some(interface) = f.raw("interface") else {
        return;
    };
    let entry = rec.map_mut(&["interface", interface]);
    entry.insert("enabled", enabled);
    entry.insert_some("link_state", f.text("link_state"));
    *ctx = Ctx {
        interface: Some(interface.to_string()),
        ..Ctx::default()
    };
}

/// The map at `interface.<current>` followed by `path`.
fn current<'r>(ctx: &Ctx, rec: &'r mut Record, path: &[&str]) -> Option<&'r mut Record> {
    let interface = ctx.interface.as_deref()?;
    let mut full = vec!["interface", interface];
    full.extend_from_slice(path);
    Some(rec.map_mut(&full))
}

fn strings(f: &Fields<'_, '_>, ctx: &mut Ctx, rec: &mut Record, keys: &[&str]) {
    if let Some(entry) = current(ctx, rec, &[]) {
        for key in keys {
            entry.insert_some(*key, f.text(key));
        }
    }
}

fn ints(f: &Fields<'_, '_>, ctx: &mut Ctx, rec: &mut Record, keys: &[&str]) {
    if let Some(entry) = current(ctx, rec, &[]) {
        for key in keys {
            entry.insert_some(*key, f.int(key));
        }
    }
}

fn flag(ctx: &mut Ctx, rec: &mut Record, key: &str, value: bool) {
    if let Some(entry) = current(ctx, rec, &[]) {
        entry.insert(key, value);
    }
}

fn flow_control(ctx: &mut Ctx, rec: &mut Record, receive: bool, send: bool) {
    if let Some(entry) = current(ctx, rec, &["flow_control"]) {
        entry.insert("flow_control_receive", receive);
        entry.insert("flow_control_send", send);
    }
}

/// Addresses are keyed by `<ip>/<len>`; a repeated address keeps its first entry.
fn internet_address(f: &Fields<'_, '_>, ctx: &mut Ctx, rec: &mut Record) {
    let (Some(ip), Some(len)) = (f.raw("ipv4"), f.raw("prefix_length")) else {
        return;
    };
    let key = format!("{ip}/{len}");
    let Some(ipv4) = current(ctx, rec, &["ipv4"]) else {
        return;
    };
    if ipv4.contains_key(&key) {
        return;
    }
    let address = ipv4.map_mut(&[key.as_str()]);
    address.insert_some("ipv4", f.ip("ipv4"));
    address.insert_some("prefix_length", f.text("prefix_length"));
    address.insert("secondary", f.has("secondary"));
    address.insert_some("route_tag", f.int("route_tag"));
}

fn encapsulation(f: &Fields<'_, '_>, ctx: &mut Ctx, rec: &mut Record) {
    if let Some(entry) = current(ctx, rec, &[]) {
        entry.insert_some("medium", f.text("medium"));
    }
    if let Some(encapsulations) = current(ctx, rec, &["encapsulations"]) {
        if let Some(kind) = f.raw("encapsulation") {
            encapsulations.insert("encapsulation", kind.replace("802.1Q Virtual LAN", "dot1q"));
        }
        encapsulations.insert_some("first_dot1q", f.text("first_dot1q"));
    }
}

/// Rate lines repeat once per load interval; only the first interval is kept.
fn rate(f: &Fields<'_, '_>, ctx: &mut Ctx, rec: &mut Record, keys: &[&str]) {
    if let Some(rate) = current(ctx, rec, &["counters", "rate"]) {
        for key in keys {
            if !rate.contains_key(key) {
                rate.insert_some(*key, f.int(key));
            }
        }
    }
}

fn counters(f: &Fields<'_, '_>, ctx: &mut Ctx, rec: &mut Record, keys: &[&str]) {
    if let Some(counters) = current(ctx, rec, &["counters"]) {
        for key in keys {
            counters.insert_some(*key, f.int(key));
        }
    }
}

fn casts(f: &Fields<'_, '_>, ctx: &mut Ctx, rec: &mut Record) {
    let prefix = ctx.direction.prefix();
    if let Some(counters) = current(ctx, rec, &["counters"]) {
        for cast in ["unicast_pkts", "multicast_pkts", "broadcast_pkts"] {
            counters.insert_some(format!("{prefix}_{cast}"), f.int(cast));
        }
    }
}

/// Parser for `show interface`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowInterface;

impl CliParser for ShowInterface {
    fn command(&self) -> Cow<'_, str> {
        Cow::Borrowed("show interface")
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

    const OUTPUT: &str = r#"
Ethernet2/1 is up
admin state is up, Dedicated Interface
  Hardware: Ethernet, address: aaaa.bbbb.cccc (bia 5254.003b.4aca)
  Description: to core-1 Eth1/1
  Internet Address is 10.4.4.4/24 secondary tag 10
  MTU 1600 bytes, BW 768 Kbit, DLY 3330 usec
  reliability 255/255, txload 1/255, rxload 1/255
  Encapsulation ARPA, medium is broadcast
  Port mode is routed
  full-duplex, 1000 Mb/s
  Beacon is turned off
  Auto-Negotiation is turned off
  Input flow-control is off, output flow-control is on
  Auto-mdix is turned off
  Switchport monitor is off
  EtherType is 0x8100
  EEE (efficient-ethernet) : n/a
  Last link flapped 00:07:28
  Last clearing of "show interface" counters never
  1 interface resets
  Load-Interval #1: 0 seconds
    0 seconds input rate 0 bits/sec, 0 packets/sec
    0 seconds output rate 24 bits/sec, 0 packets/sec
    input rate 0 bps, 0 pps; output rate 0 bps, 0 pps
  Load-Interval #2: 0 seconds
    0 seconds input rate 7 bits/sec, 0 packets/sec
    0 seconds output rate 9 bits/sec, 0 packets/sec
    input rate 7 bps, 0 pps; output rate 9 bps, 0 pps
  RX
    2 unicast packets  3 multicast packets  4 broadcast packets
    9 input packets  900 bytes
    0 jumbo packets  0 storm suppression packets
    0 runts  0 giants  0 CRC/FCS  0 no buffer
    0 input error  0 short frame  0 overrun   0 underrun  0 ignored
    0 watchdog  0 bad etype drop  0 bad proto drop  0 if down drop
    0 input with dribble  0 input discard
    0 Rx pause
  TX
    5 unicast packets  6 multicast packets  7 broadcast packets
    18 output packets  1800 bytes
    1 jumbo packets
    0 output error  0 collision  0 deferred  0 late collision
    0 lost carrier  0 no carrier  0 babble  0 output discard
    0 Tx pause
Ethernet2/1.10 is down (Administratively down)
admin state is down, Dedicated Interface, [parent interface is Ethernet2/1]
  Hardware: Ethernet, address: 5254.003b.4af8 (bia 5254.003b.4aca)
  MTU 1600 bytes, BW 768 Kbit, DLY 10 usec
  reliability 255/255, txload 1/255, rxload 1/255
  Encapsulation 802.1Q Virtual LAN, Vlan ID 10, medium is broadcast
  Port mode is routed
  Auto-Negotiation is turned on
"#;

    fn interface<'a>(record: &'a Record, name: &str) -> &'a Record {
        record
            .get_path(&["interface", name])
            .and_then(Value::as_map)
            .unwrap()
    }

    #[test]
    fn test_header_and_state() {
        let record = ShowInterface.parse(OUTPUT);
        let up = interface(&record, "Ethernet2/1");
        assert_eq!(up.get("enabled"), Some(&Value::Bool(true)));
        assert!(up.get("link_state").is_none());
        assert_eq!(up.get("oper_status"), Some(&Value::Str("up".into())));

        let down = interface(&record, "Ethernet2/1.10");
        assert_eq!(down.get("enabled"), Some(&Value::Bool(false)));
        assert_eq!(
            down.get("link_state"),
            Some(&Value::Str("Administratively down".into()))
        );
        assert_eq!(down.get("oper_status"), Some(&Value::Str("down".into())));
        assert_eq!(
            down.get("parent_interface"),
            Some(&Value::Str("Ethernet2/1".into()))
        );
    }

    #[test]
    fn test_scalar_fields() {
        let record = ShowInterface.parse(OUTPUT);
        let eth = interface(&record, "Ethernet2/1");
        assert_eq!(eth.get("mtu"), Some(&Value::Int(1600)));
        assert_eq!(eth.get("bandwidth"), Some(&Value::Int(768)));
        assert_eq!(eth.get("delay"), Some(&Value::Int(3330)));
        assert_eq!(eth.get("description"), Some(&Value::Str("to core-1 Eth1/1".into())));
        assert_eq!(eth.get("mac_address"), Some(&Value::Str("aaaa.bbbb.cccc".into())));
        assert_eq!(eth.get("port_speed"), Some(&Value::Str("1000".into())));
        assert_eq!(eth.get("ethertype"), Some(&Value::Str("0x8100".into())));
        assert_eq!(eth.get("last_clearing"), Some(&Value::Str("never".into())));
        assert_eq!(eth.get("interface_reset"), Some(&Value::Int(1)));
        assert_eq!(eth.get("medium"), Some(&Value::Str("broadcast".into())));
    }

    #[test]
    fn test_on_off_literals() {
        let record = ShowInterface.parse(OUTPUT);
        let eth = interface(&record, "Ethernet2/1");
        assert_eq!(eth.get("auto_negotiate"), Some(&Value::Bool(false)));
        assert_eq!(
            eth.get_path(&["flow_control", "flow_control_receive"]),
            Some(&Value::Bool(false))
        );
        assert_eq!(
            eth.get_path(&["flow_control", "flow_control_send"]),
            Some(&Value::Bool(true))
        );
        assert_eq!(
            interface(&record, "Ethernet2/1.10").get("auto_negotiate"),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn test_secondary_address() {
        let record = ShowInterface.parse(OUTPUT);
        let address: Record = [
            ("ipv4", Value::Ip("10.4.4.4".parse().unwrap())),
            ("prefix_length", Value::Str("24".into())),
            ("secondary", Value::Bool(true)),
            ("route_tag", Value::Int(10)),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            interface(&record, "Ethernet2/1").get_path(&["ipv4", "10.4.4.4/24"]),
            Some(&Value::Map(address))
        );
    }

    #[test]
    fn test_primary_address() {
        let record = ShowInterface.parse("mgmt0 is up\n  Internet Address is 192.168.1.5/24\n");
        let address = interface(&record, "mgmt0");
        assert_eq!(
            address.get_path(&["ipv4", "192.168.1.5/24", "secondary"]),
            Some(&Value::Bool(false))
        );
        assert!(address.get_path(&["ipv4", "192.168.1.5/24", "route_tag"]).is_none());
    }

    #[test]
    fn test_primary_and_secondary_addresses() {
        let record = ShowInterface.parse(
            "Vlan10 is up
  Internet Address is 10.1.1.1/24 tag 5
  Internet Address is 10.2.2.2/24 secondary
",
        );
        let vlan = interface(&record, "Vlan10");
        assert_eq!(
            vlan.get_path(&["ipv4", "10.1.1.1/24", "ipv4"]),
            Some(&Value::Ip("10.1.1.1".parse().unwrap()))
        );
        assert_eq!(
            vlan.get_path(&["ipv4", "10.1.1.1/24", "secondary"]),
            Some(&Value::Bool(false))
        );
        assert_eq!(
            vlan.get_path(&["ipv4", "10.1.1.1/24", "route_tag"]),
            Some(&Value::Int(5))
        );
        assert_eq!(
            vlan.get_path(&["ipv4", "10.2.2.2/24", "secondary"]),
            Some(&Value::Bool(true))
        );
        assert!(vlan.get_path(&["ipv4", "10.2.2.2/24", "route_tag"]).is_none());
    }

    #[test]
    fn test_repeated_lines_keep_first_values() {
        let once = "Vlan10 is up
  Internet Address is 10.1.1.1/24 tag 5
  Load-Interval #1: 30 seconds
    30 seconds input rate 100 bits/sec, 1 packets/sec
";
        let twice = format!(
            "{once}  Internet Address is 10.1.1.1/24 tag 7
  Load-Interval #2: 300 seconds
    300 seconds input rate 900 bits/sec, 9 packets/sec
"
        );
        assert_eq!(ShowInterface.parse(&twice), ShowInterface.parse(once));
    }

    #[test]
    fn test_dot1q_encapsulation() {
        let record = ShowInterface.parse(OUTPUT);
        let sub = interface(&record, "Ethernet2/1.10");
        assert_eq!(
            sub.get_path(&["encapsulations", "encapsulation"]),
            Some(&Value::Str("dot1q".into()))
        );
        assert_eq!(
            sub.get_path(&["encapsulations", "first_dot1q"]),
            Some(&Value::Str("10".into()))
        );
        assert_eq!(
            interface(&record, "Ethernet2/1").get_path(&["encapsulations", "encapsulation"]),
            Some(&Value::Str("ARPA".into()))
        );
    }

    #[test]
    fn test_unicast_direction_follows_markers() {
        let record = ShowInterface.parse(OUTPUT);
        let counters = interface(&record, "Ethernet2/1")
            .get("counters")
            .and_then(Value::as_map)
            .unwrap();
        assert_eq!(counters.get("in_unicast_pkts"), Some(&Value::Int(2)));
        assert_eq!(counters.get("in_broadcast_pkts"), Some(&Value::Int(4)));
        assert_eq!(counters.get("out_unicast_pkts"), Some(&Value::Int(5)));
        assert_eq!(counters.get("out_multicast_pkts"), Some(&Value::Int(6)));
        assert_eq!(counters.get("out_jumbo_packets"), Some(&Value::Int(1)));
        assert_eq!(counters.get("in_jumbo_packets"), Some(&Value::Int(0)));
        assert_eq!(counters.get("out_bytes"), Some(&Value::Int(1800)));
    }

    #[test]
    fn test_unicast_defaults_to_input() {
        let record = ShowInterface.parse(
            "Ethernet1/1 is up\n    1 unicast packets  2 multicast packets  3 broadcast packets\n",
        );
        let eth = interface(&record, "Ethernet1/1");
        assert_eq!(
            eth.get_path(&["counters", "in_unicast_pkts"]),
            Some(&Value::Int(1))
        );
    }

    #[test]
    fn test_first_load_interval_kept() {
        let record = ShowInterface.parse(OUTPUT);
        let rate = interface(&record, "Ethernet2/1")
            .get_path(&["counters", "rate"])
            .and_then(Value::as_map)
            .unwrap();
        assert_eq!(rate.get("in_rate"), Some(&Value::Int(0)));
        assert_eq!(rate.get("out_rate"), Some(&Value::Int(24)));
        assert_eq!(rate.get("out_rate_bps"), Some(&Value::Int(0)));
        assert_eq!(rate.get("load_interval"), Some(&Value::Int(0)));
    }

    #[test]
    fn test_counters_past_i64_validate() {
        let output = OUTPUT.replace(
            "9 input packets  900 bytes",
            "9 input packets  18446744073709551000 bytes",
        );
        let record = ShowInterface.parse(&output);
        assert_eq!(
            interface(&record, "Ethernet2/1").get_path(&["counters", "in_bytes"]),
            Some(&Value::UInt(18_446_744_073_709_551_000))
        );
        assert_eq!(ShowInterface.schema().unwrap().validate_record(&record), Ok(()));
    }

    #[test]
    fn test_lines_before_header_ignored() {
        assert!(ShowInterface.parse("  MTU 1500 bytes, BW 1000 Kbit, DLY 10 usec\n").is_empty());
    }

    #[test]
    fn test_schema() {
        let record = ShowInterface.parse(OUTPUT);
        assert_eq!(ShowInterface.schema().unwrap().validate_record(&record), Ok(()));
    }
}

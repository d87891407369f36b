//! IOS-XR `show users`.
//!
//! ```text
//!    Line            User                 Service  Conns   Idle        Location
//!    con0/0/CPU0     pyats                hardware     0  00:12:36
//!    vty0            pyats                ssh          0  00:11:45     10.0.0.53
//! *  vty3            cisco                ssh          0  00:00:00     10.0.0.56
//! ```
//!
//! One entry per line id. A leading `*` marks the session running the command.

use std::borrow::Cow;

use once_cell::sync::Lazy;

use crate::extract::{Fields, RuleSet};
use crate::parser::CliParser;
use crate::record::Record;
use crate::schema::{MapSchema, Schema};

static RULES: Lazy<RuleSet<()>> = Lazy::new(|| {
    RuleSet::<()>::builder()
        .skip("header", r"^Line\s+User\s+Service.*?$")
        .rule(
            "current_console",
            r"^\*\s+(?P<line>con\S+)\s+(?P<user>\S+)\s+(?P<service>\S+)\s+(?P<conns>\d+)\s+(?P<idle>\S+)$",
            |f, _, rec| user(f, true, rec),
        )
        .rule(
            "current_remote",
            r"^\*\s+(?P<line>\S+)\s+(?P<user>\S+)\s+(?P<service>\S+)\s+(?P<conns>\S+)\s+(?P<idle>\S+)\s+(?P<location>\S+)$",
            |f, _, rec| user(f, true, rec),
        )
        .rule(
            "console",
            r"^(?P<line>con\S+)\s+(?P<user>\S+)\s+(?P<service>\S+)\s+(?P<conns>\d+)\s+(?P<idle>\S+)$",
            |f, _, rec| user(f, false, rec),
        )
        .rule(
            "remote",
            r"^(?P<line>\S+)\s+(?P<user>\S+)\s+(?P<service>\S+)\s+(?P<conns>\S+)\s+(?P<idle>\S+)\s+(?P<location>\S+)$",
            |f, _, rec| user(f, false, rec),
        )
        .trim_start()
        .build()
        .expect("show users rules compile")
});

static SCHEMA: Lazy<Schema> = Lazy::new(|| {
    MapSchema::new()
        .any_key(
            MapSchema::new()
                .required("current_user", Schema::bool())
                .required("user", Schema::string())
                .required("service", Schema::string())
                .required("conns", Schema::int())
                .required("idle", Schema::string())
                .optional("location", Schema::string()),
        )
        .into()
});

fn user(f: &Fields<'_, '_>, current: bool, rec: &mut Record) {
    let Some(line) = f.raw("line") else {
        return;
    };
    let entry = rec.map_mut(&[line]);
    entry.insert("current_user", current);
    entry.insert_some("user", f.text("user"));
    entry.insert_some("service", f.text("service"));
    entry.insert_some("conns", f.int("conns"));
    entry.insert_some("idle", f.text("idle"));
    entry.insert_some("location", f.text("location"));
}

/// Parser for `show users`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowUsers;

impl CliParser for ShowUsers {
    fn command(&self) -> Cow<'_, str> {
        Cow::Borrowed("show users")
    }

    fn schema(&self) -> Option<&Schema> {
        Some(&*SCHEMA)
    }

    fn parse(&self, output: &str) -> Record {
        RULES.extract(output)
    }
}

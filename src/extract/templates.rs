//! Built-in FTOS templates
//!
//! A small line-rule engine covering the six FTOS reports. Each template
//! walks the output line by line, fills a record from the rules that match
//! and emits it at the template's record boundary. Every record carries all
//! of the template's fields; fields that never matched are empty strings.

use regex::Regex;
use std::sync::OnceLock;

use super::{FlatRecord, RecordExtractor, Template};
use crate::models::ExtractError;

/// Extractor backed by the built-in FTOS line rules
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateExtractor;

impl TemplateExtractor {
    pub fn new() -> Self {
        TemplateExtractor
    }
}

impl RecordExtractor for TemplateExtractor {
    fn extract(&self, template: Template, raw: &str) -> Result<Vec<FlatRecord>, ExtractError> {
        let records = match template {
            Template::EnvironmentStackUnit => environment_stack_unit(raw),
            Template::ProcessesCpuSummary => processes_cpu_summary(raw),
            Template::Memory => memory(raw),
            Template::Interfaces => interfaces(raw),
            Template::LldpNeighborsDetail => lldp_neighbors_detail(raw),
            Template::MacAddressTable => mac_address_table(raw),
        };
        log::debug!("{}: extracted {} record(s)", template, records.len());
        Ok(records)
    }
}

/// Compile a built-in rule once
fn rule(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("built-in template rule is valid"))
}

/// A record with every field of a template set to empty
fn blank_record(fields: &[&str]) -> FlatRecord {
    fields
        .iter()
        .map(|field| (field.to_string(), String::new()))
        .collect()
}

/// Build a record from a row regex whose groups follow `fields` in order
fn record_from_captures(fields: &[&str], caps: &regex::Captures<'_>) -> FlatRecord {
    fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let value = caps.get(idx + 1).map(|m| m.as_str().trim()).unwrap_or("");
            (field.to_string(), value.to_string())
        })
        .collect()
}

const ENVIRONMENT_FIELDS: &[&str] = &["unit", "status", "temperature", "volt_status", "temp_status"];

/// ```text
/// Unit  Status         Temp    Voltage     TempStatus
/// * 0   online         45C     ok          2
/// ```
fn environment_stack_unit(raw: &str) -> Vec<FlatRecord> {
    static ROW: OnceLock<Regex> = OnceLock::new();
    let row = rule(
        &ROW,
        r"^\s*\*?\s*(\d+)\s+(\S+)\s+(\d+(?:\.\d+)?)C?\s+(\S+)\s+(\d+)\s*$",
    );

    raw.lines()
        .filter_map(|line| row.captures(line))
        .map(|caps| record_from_captures(ENVIRONMENT_FIELDS, &caps))
        .collect()
}

const CPU_FIELDS: &[&str] = &["unit", "ofive", "omin", "ofivemin"];

/// ```text
/// CPU utilization        5Sec      1Min      5Min
/// UNIT0                   3%        2%        2%
/// ```
fn processes_cpu_summary(raw: &str) -> Vec<FlatRecord> {
    static ROW: OnceLock<Regex> = OnceLock::new();
    let row = rule(
        &ROW,
        r"(?i)^\s*unit\s*(\d+)\s+(\d+(?:\.\d+)?)%\s+(\d+(?:\.\d+)?)%\s+(\d+(?:\.\d+)?)%",
    );

    raw.lines()
        .filter_map(|line| row.captures(line))
        .map(|caps| record_from_captures(CPU_FIELDS, &caps))
        .collect()
}

const MEMORY_FIELDS: &[&str] = &["unit", "total", "used", "free"];

/// ```text
/// Statistics On Unit 0 Processor
/// ===========================
///               Total(b)     Used(b)     Free(b)     Lowest(b)    Largest(b)
///               2147483648   391335936   1756147712  1755795456   1754992640
/// ```
fn memory(raw: &str) -> Vec<FlatRecord> {
    static UNIT: OnceLock<Regex> = OnceLock::new();
    static ROW: OnceLock<Regex> = OnceLock::new();
    let unit_rule = rule(&UNIT, r"(?i)^\s*Statistics On Unit\s+(\d+)");
    let row = rule(&ROW, r"^\s*(?:[A-Za-z]\S*\s+)?(\d+)\s+(\d+)\s+(\d+)(?:\s+\d+)*\s*$");

    let mut unit = String::new();
    let mut records = Vec::new();

    for line in raw.lines() {
        if let Some(caps) = unit_rule.captures(line) {
            unit = caps[1].to_string();
        } else if let Some(caps) = row.captures(line) {
            let mut record = blank_record(MEMORY_FIELDS);
            record.insert("unit".to_string(), unit.clone());
            record.insert("total".to_string(), caps[1].to_string());
            record.insert("used".to_string(), caps[2].to_string());
            record.insert("free".to_string(), caps[3].to_string());
            records.push(record);
        }
    }

    records
}

const INTERFACE_FIELDS: &[&str] = &[
    "iface_name",
    "admin_status",
    "oper_status",
    "description",
    "mac_address",
    "line_speed",
    "last_flapped",
];

/// One block per interface, opened by `<name> is <admin>, line protocol is <oper>`
fn interfaces(raw: &str) -> Vec<FlatRecord> {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    static DESCRIPTION: OnceLock<Regex> = OnceLock::new();
    static HARDWARE: OnceLock<Regex> = OnceLock::new();
    static SPEED: OnceLock<Regex> = OnceLock::new();
    static FLAPPED: OnceLock<Regex> = OnceLock::new();

    let header = rule(
        &HEADER,
        r"^(\S+(?:\s\S+)?)\s+is\s+(\w+),\s+line protocol is\s+(\w+)",
    );
    let description = rule(&DESCRIPTION, r"^Description:\s*(.*)$");
    let hardware = rule(&HARDWARE, r"^Hardware is .*?,\s*address is\s+(\S+)");
    let speed = rule(&SPEED, r"^LineSpeed\s+(\d+\s+[A-Za-z]+)");
    let flapped = rule(
        &FLAPPED,
        r"^Time since last interface status change:\s*(.*?)\s*$",
    );

    let mut records = Vec::new();
    let mut current: Option<FlatRecord> = None;

    for line in raw.lines() {
        if let Some(caps) = header.captures(line) {
            records.extend(current.take());
            let mut record = blank_record(INTERFACE_FIELDS);
            record.insert("iface_name".to_string(), caps[1].trim().to_string());
            record.insert("admin_status".to_string(), caps[2].to_string());
            record.insert("oper_status".to_string(), caps[3].to_string());
            current = Some(record);
            continue;
        }

        let Some(record) = current.as_mut() else {
            continue;
        };

        if let Some(caps) = description.captures(line) {
            record.insert("description".to_string(), caps[1].trim().to_string());
        } else if let Some(caps) = hardware.captures(line) {
            record.insert("mac_address".to_string(), caps[1].to_string());
        } else if let Some(caps) = speed.captures(line) {
            record.insert("line_speed".to_string(), caps[1].to_string());
        } else if let Some(caps) = flapped.captures(line) {
            record.insert("last_flapped".to_string(), caps[1].to_string());
        }
    }

    records.extend(current);
    records
}

const LLDP_FIELDS: &[&str] = &[
    "local_interface",
    "remote_chassis_id",
    "remote_port",
    "remote_port_description",
    "remote_system_name",
    "remote_system_description",
    "remote_system_capab",
    "remote_system_enable_capab",
];

/// Single-value LLDP detail lines and the field each one fills
const LLDP_VALUE_RULES: &[(&str, &str)] = &[
    ("remote_chassis_id", r"^\s*Remote Chassis ID:\s*(.*?)\s*$"),
    ("remote_port", r"^\s*Remote Port ID:\s*(.*?)\s*$"),
    ("remote_port_description", r"^\s*Remote Port Description:\s*(.*?)\s*$"),
    ("remote_system_name", r"^\s*Remote System Name:\s*(.*?)\s*$"),
    ("remote_system_capab", r"^\s*Existing System Capabilities:\s*(.*?)\s*$"),
    ("remote_system_enable_capab", r"^\s*Enabled System Capabilities:\s*(.*?)\s*$"),
];

/// Accumulates LLDP neighbor blocks into records
struct LldpBuilder {
    local_interface: String,
    current: Option<FlatRecord>,
    records: Vec<FlatRecord>,
}

impl LldpBuilder {
    fn new() -> Self {
        Self {
            local_interface: String::new(),
            current: None,
            records: Vec::new(),
        }
    }

    fn flush(&mut self) {
        self.records.extend(self.current.take());
    }

    fn start_neighbor(&mut self) {
        self.flush();
        let mut record = blank_record(LLDP_FIELDS);
        record.insert("local_interface".to_string(), self.local_interface.clone());
        self.current = Some(record);
    }

    fn set(&mut self, field: &str, value: &str) {
        if self.current.is_none() {
            self.start_neighbor();
        }
        if let Some(record) = self.current.as_mut() {
            record.insert(field.to_string(), value.to_string());
        }
    }

    fn has(&self, field: &str) -> bool {
        self.current
            .as_ref()
            .map_or(false, |record| record.contains_key(field))
    }

    fn finish(mut self) -> Vec<FlatRecord> {
        self.flush();
        self.records
    }
}

/// One block per neighbor under a `Local Interface <name> has <n> neighbor(s)` header.
/// A system description wrapped onto a second line lands in
/// `remote_system_description2`.
fn lldp_neighbors_detail(raw: &str) -> Vec<FlatRecord> {
    static LOCAL: OnceLock<Regex> = OnceLock::new();
    static SUBTYPE: OnceLock<Regex> = OnceLock::new();
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    static DESCRIPTION: OnceLock<Regex> = OnceLock::new();
    static VALUES: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();

    let local = rule(&LOCAL, r"^\s*Local Interface\s+(.+?)\s+has\s+\d+\s+neighbors?");
    let subtype = rule(&SUBTYPE, r"^\s*Remote Chassis ID Subtype:");
    let separator = rule(&SEPARATOR, r"^\s*(?:-{5,}|={5,})\s*$");
    let description = rule(&DESCRIPTION, r"^\s*Remote System Desc:\s*(.*?)\s*$");
    let values = VALUES.get_or_init(|| {
        LLDP_VALUE_RULES
            .iter()
            .map(|(field, pattern)| {
                (*field, Regex::new(pattern).expect("built-in template rule is valid"))
            })
            .collect()
    });

    let mut builder = LldpBuilder::new();
    // Set on the line right after "Remote System Desc"
    let mut after_description = false;

    for line in raw.lines() {
        let continuation_allowed = after_description;
        after_description = false;

        if let Some(caps) = local.captures(line) {
            builder.flush();
            builder.local_interface = caps[1].to_string();
        } else if subtype.is_match(line) {
            builder.start_neighbor();
        } else if separator.is_match(line) {
            builder.flush();
        } else if let Some(caps) = description.captures(line) {
            builder.set("remote_system_description", &caps[1]);
            after_description = true;
        } else if let Some((field, caps)) = values
            .iter()
            .find_map(|(field, re)| re.captures(line).map(|caps| (*field, caps)))
        {
            builder.set(field, &caps[1]);
        } else if continuation_allowed
            && !line.trim().is_empty()
            && !builder.has("remote_system_description2")
        {
            builder.set("remote_system_description2", line.trim());
        }
    }

    builder.finish()
}

const MAC_FIELDS: &[&str] = &["vlan", "mac", "static", "interface", "active"];

/// ```text
/// VlanId     Mac Address           Type          Interface        State
///  1         00:01:e8:8b:2a:3c     Dynamic       Te 0/1           Active
/// ```
fn mac_address_table(raw: &str) -> Vec<FlatRecord> {
    static ROW: OnceLock<Regex> = OnceLock::new();
    let row = rule(
        &ROW,
        r"^\s*(\d+)\s+([0-9A-Fa-f]{2}(?::[0-9A-Fa-f]{2}){5}|[0-9A-Fa-f]{4}\.[0-9A-Fa-f]{4}\.[0-9A-Fa-f]{4})\s+(\S+)\s+(\S+(?:\s\S+)?)\s+(\S+)\s*$",
    );

    raw.lines()
        .filter_map(|line| row.captures(line))
        .map(|caps| record_from_captures(MAC_FIELDS, &caps))
        .collect()
}

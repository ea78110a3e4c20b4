//! Data models module
//!
//! Defines the normalized device state produced by every poll:
//! - Facts: inventory and identity of the switch
//! - Interface: per-port status, speed and flap time
//! - Environment: temperature, power, CPU and memory readings
//! - LldpNeighborDetail / LldpNeighbor: discovered neighbors per local port
//! - MacEntry: forwarding table rows
//! - DeviceSnapshot: all of the above from one poll
//!
//! Also defines the error taxonomy shared by channels, extractors and mappers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    CANDIDATE_NOT_IMPLEMENTED, DEFAULT_VENDOR, NOT_AVAILABLE, NOT_AVAILABLE_F64, UNKNOWN,
};

/// Interfaces keyed by canonical name
pub type Interfaces = BTreeMap<String, Interface>;

/// LLDP neighbor details keyed by canonical local interface name
pub type LldpNeighborsDetail = BTreeMap<String, Vec<LldpNeighborDetail>>;

/// LLDP neighbor summaries keyed by canonical local interface name
pub type LldpNeighbors = BTreeMap<String, Vec<LldpNeighbor>>;

/// Identity and inventory facts for a device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facts {
    /// Seconds since boot, or -1 when the device did not report it
    pub uptime: i64,
    pub vendor: String,
    pub os_version: String,
    pub serial_number: String,
    pub model: String,
    pub hostname: String,
    /// Mirrors hostname; no domain suffix is resolved
    pub fqdn: String,
    /// Canonical names of every interface, sorted
    pub interface_list: Vec<String>,
}

impl Default for Facts {
    fn default() -> Self {
        Self {
            uptime: NOT_AVAILABLE,
            vendor: DEFAULT_VENDOR.to_string(),
            os_version: UNKNOWN.to_string(),
            serial_number: UNKNOWN.to_string(),
            model: UNKNOWN.to_string(),
            hostname: UNKNOWN.to_string(),
            fqdn: UNKNOWN.to_string(),
            interface_list: Vec::new(),
        }
    }
}

/// State of a single interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    /// Administratively up
    pub is_enabled: bool,
    /// Line protocol up
    pub is_up: bool,
    pub description: String,
    pub mac_address: String,
    /// Seconds since the last status change
    pub last_flapped: u64,
    /// Line speed in Mbit/s
    pub speed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    /// Degrees Celsius
    pub temperature: f64,
    pub is_alert: bool,
    pub is_critical: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerReading {
    pub status: bool,
    /// Always -1.0; not reported by the stack-unit environment command
    pub capacity: f64,
    /// Always -1.0; not reported by the stack-unit environment command
    pub output: f64,
}

impl PowerReading {
    pub fn with_status(status: bool) -> Self {
        Self {
            status,
            capacity: NOT_AVAILABLE_F64,
            output: NOT_AVAILABLE_F64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuReading {
    /// One-minute average utilization in percent
    #[serde(rename = "%usage")]
    pub usage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanReading {
    pub status: bool,
}

/// Memory totals summed over every stack unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryTotals {
    /// Bytes
    pub available_ram: u64,
    /// Bytes
    pub used_ram: u64,
}

/// Environmental readings keyed by "Unit <n>"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// FTOS does not expose fan state through the commands polled here
    pub fans: BTreeMap<String, FanReading>,
    pub temperature: BTreeMap<String, TemperatureReading>,
    pub power: BTreeMap<String, PowerReading>,
    pub cpu: BTreeMap<String, CpuReading>,
    pub memory: MemoryTotals,
}

/// Everything known about one LLDP neighbor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LldpNeighborDetail {
    /// Always empty; FTOS does not report the parent of a member port
    pub parent_interface: String,
    pub remote_chassis_id: String,
    pub remote_port: String,
    pub remote_port_description: String,
    pub remote_system_name: String,
    pub remote_system_description: String,
    pub remote_system_capab: Vec<String>,
    pub remote_system_enable_capab: Vec<String>,
}

/// Hostname and port of an LLDP neighbor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LldpNeighbor {
    pub hostname: String,
    pub port: String,
}

impl From<&LldpNeighborDetail> for LldpNeighbor {
    fn from(detail: &LldpNeighborDetail) -> Self {
        Self {
            hostname: detail.remote_system_name.clone(),
            port: detail.remote_port_description.clone(),
        }
    }
}

/// One row of the MAC address table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacEntry {
    pub mac: String,
    /// Canonical interface name
    pub interface: String,
    pub vlan: u16,
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(rename = "active")]
    pub is_active: bool,
    /// Always -1; not tracked by FTOS
    pub moves: i64,
    /// Always -1; not tracked by FTOS
    pub last_move: i64,
}

/// Which configurations to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigRetrieve {
    All,
    Running,
    Startup,
}

impl ConfigRetrieve {
    pub fn includes_running(self) -> bool {
        matches!(self, ConfigRetrieve::All | ConfigRetrieve::Running)
    }

    pub fn includes_startup(self) -> bool {
        matches!(self, ConfigRetrieve::All | ConfigRetrieve::Startup)
    }
}

/// Device configurations as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub running: String,
    pub startup: String,
    pub candidate: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            running: String::new(),
            startup: String::new(),
            candidate: CANDIDATE_NOT_IMPLEMENTED.to_string(),
        }
    }
}

/// Complete state collected in a single poll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    /// RFC 3339 timestamp of when collection finished
    pub collected_at: String,
    pub facts: Facts,
    pub interfaces: Interfaces,
    pub environment: Environment,
    pub lldp_neighbors: LldpNeighbors,
    pub mac_address_table: Vec<MacEntry>,
}

/// The result of one report, serialized as the bare report object
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Facts(Facts),
    Interfaces(Interfaces),
    Environment(Environment),
    LldpNeighbors(LldpNeighbors),
    LldpNeighborsDetail(LldpNeighborsDetail),
    MacAddressTable(Vec<MacEntry>),
    Config(DeviceConfig),
    Snapshot(DeviceSnapshot),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Report::Facts(_) => ReportKind::Facts,
            Report::Interfaces(_) => ReportKind::Interfaces,
            Report::Environment(_) => ReportKind::Environment,
            Report::LldpNeighbors(_) => ReportKind::LldpNeighbors,
            Report::LldpNeighborsDetail(_) => ReportKind::LldpNeighborsDetail,
            Report::MacAddressTable(_) => ReportKind::MacAddressTable,
            Report::Config(_) => ReportKind::Config,
            Report::Snapshot(_) => ReportKind::Snapshot,
        }
    }
}

/// The reports a driver can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReportKind {
    Facts,
    Interfaces,
    Environment,
    LldpNeighbors,
    LldpNeighborsDetail,
    MacAddressTable,
    Config,
    Snapshot,
}

impl ReportKind {
    /// Every report, in the order the CLI lists them
    pub const ALL: [ReportKind; 8] = [
        ReportKind::Facts,
        ReportKind::Interfaces,
        ReportKind::Environment,
        ReportKind::LldpNeighbors,
        ReportKind::LldpNeighborsDetail,
        ReportKind::MacAddressTable,
        ReportKind::Config,
        ReportKind::Snapshot,
    ];

    /// Name used on the command line and as the JSON key
    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Facts => "facts",
            ReportKind::Interfaces => "interfaces",
            ReportKind::Environment => "environment",
            ReportKind::LldpNeighbors => "lldp",
            ReportKind::LldpNeighborsDetail => "lldp-detail",
            ReportKind::MacAddressTable => "mac-table",
            ReportKind::Config => "config",
            ReportKind::Snapshot => "snapshot",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown report '{}'", s))
    }
}

/// Failures of the command channel
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The connection is gone or the transport program failed
    #[error("transport failed while running '{command}': {reason}")]
    Transport { command: String, reason: String },
    #[error("I/O error while running '{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// The device answered, but refused every candidate command
    #[error("device rejected '{command}': {output}")]
    Rejected { command: String, output: String },
}

/// Failures of the record extractor itself (not of individual fields)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("template {template} failed: {reason}")]
    Template { template: String, reason: String },
}

/// A field that is present but does not fit its expected grammar
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("field '{field}' has malformed value {value:?}: {reason}")]
    Malformed {
        field: String,
        value: String,
        reason: String,
    },
    #[error("field '{field}' uses unsupported unit {unit:?} in {value:?}")]
    UnsupportedUnit {
        field: String,
        value: String,
        unit: String,
    },
    #[error("{template} record does not match its schema: {reason}")]
    Schema { template: String, reason: String },
}

impl NormalizeError {
    pub fn malformed(field: &str, value: &str, reason: impl Into<String>) -> Self {
        NormalizeError::Malformed {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the polling API
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Channel(#[from] ChannelError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    /// One or more records could not be normalized
    #[error("{report} report rejected {} record(s): {}", .errors.len(), first_error(.errors))]
    Rejected {
        report: ReportKind,
        errors: Vec<NormalizeError>,
    },
}

fn first_error(errors: &[NormalizeError]) -> String {
    match errors {
        [] => String::new(),
        [only] => only.to_string(),
        [first, ..] => format!("{} (and {} more)", first, errors.len() - 1),
    }
}

//! Typed schemas for extracted records
//!
//! Each template's flat records are decoded into a row struct before any
//! mapper looks at them. Fields a mapper depends on are required; the rest
//! default to empty. Fields a template emits but no row declares are ignored.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{FlatRecord, Template};
use crate::models::NormalizeError;

/// `show environment stack-unit`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnvironmentRow {
    pub unit: String,
    pub temperature: String,
    pub volt_status: String,
    pub temp_status: String,
}

/// `show processes cpu summary`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CpuRow {
    pub unit: String,
    /// One-minute utilization
    pub omin: String,
}

/// `show memory`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryRow {
    pub total: String,
    pub used: String,
}

/// `show interfaces`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InterfaceRow {
    pub iface_name: String,
    #[serde(default)]
    pub admin_status: String,
    #[serde(default)]
    pub oper_status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mac_address: String,
    #[serde(default)]
    pub line_speed: String,
    #[serde(default)]
    pub last_flapped: String,
}

/// `show lldp neighbors detail`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LldpRow {
    pub local_interface: String,
    #[serde(default)]
    pub remote_chassis_id: String,
    #[serde(default)]
    pub remote_port: String,
    #[serde(default)]
    pub remote_port_description: String,
    #[serde(default)]
    pub remote_system_name: String,
    #[serde(default)]
    pub remote_system_description: String,
    /// Second half of a description the device wrapped onto another line
    #[serde(default)]
    pub remote_system_description2: Option<String>,
    #[serde(default)]
    pub remote_system_capab: String,
    #[serde(default)]
    pub remote_system_enable_capab: String,
}

/// `show mac-address-table`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MacRow {
    pub vlan: String,
    pub mac: String,
    #[serde(rename = "static")]
    pub kind: String,
    pub interface: String,
    #[serde(rename = "active")]
    pub state: String,
}

/// Decode a flat record into the row type of `template`
pub fn decode<T: DeserializeOwned>(
    template: Template,
    record: &FlatRecord,
) -> Result<T, NormalizeError> {
    let schema_error = |e: serde_json::Error| NormalizeError::Schema {
        template: template.name().to_string(),
        reason: e.to_string(),
    };

    let value = serde_json::to_value(record).map_err(schema_error)?;
    serde_json::from_value(value).map_err(schema_error)
}

//! LLDP neighbors mapper
//!
//! Handles:
//! - Grouping neighbor details under their canonical local interface
//! - Joining system descriptions the device wrapped onto a second line
//! - Splitting capability lists
//! - Deriving the hostname/port summary from the details

use super::Mapped;
use crate::extract::schema::{decode, LldpRow};
use crate::extract::{FlatRecord, Template};
use crate::models::{LldpNeighbor, LldpNeighborDetail, LldpNeighbors, LldpNeighborsDetail, NormalizeError};
use crate::normalize::canonical_interface_name;

/// `"Repeater Bridge, Router"` becomes `["Repeater", "Bridge", "Router"]`
fn split_capabilities(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn map_row(row: LldpRow) -> Result<(String, LldpNeighborDetail), NormalizeError> {
    let local = canonical_interface_name(row.local_interface.trim());
    if local.is_empty() {
        return Err(NormalizeError::malformed(
            "local_interface",
            &row.local_interface,
            "neighbor is not attached to a local interface",
        ));
    }

    let description = match row.remote_system_description2.as_deref() {
        Some(rest) if !rest.trim().is_empty() => {
            format!("{} {}", row.remote_system_description, rest.trim())
                .trim()
                .to_string()
        }
        _ => row.remote_system_description.trim().to_string(),
    };

    let detail = LldpNeighborDetail {
        parent_interface: String::new(),
        remote_chassis_id: row.remote_chassis_id,
        remote_port: row.remote_port,
        remote_port_description: row.remote_port_description,
        remote_system_name: row.remote_system_name,
        remote_system_description: description,
        remote_system_capab: split_capabilities(&row.remote_system_capab),
        remote_system_enable_capab: split_capabilities(&row.remote_system_enable_capab),
    };

    Ok((local, detail))
}

/// Map `show lldp neighbors detail` records, grouped by local interface in
/// the order the device listed the neighbors
pub fn map_lldp_neighbors_detail(records: &[FlatRecord]) -> Mapped<LldpNeighborsDetail> {
    let mut mapped = Mapped::new(LldpNeighborsDetail::new());

    for record in records {
        match decode::<LldpRow>(Template::LldpNeighborsDetail, record).and_then(map_row) {
            Ok((local, detail)) => mapped.value.entry(local).or_default().push(detail),
            Err(error) => mapped.reject(error),
        }
    }

    mapped
}

/// Reduce neighbor details to hostname and port
pub fn lldp_neighbors_summary(details: &LldpNeighborsDetail) -> LldpNeighbors {
    details
        .iter()
        .map(|(local, neighbors)| {
            (
                local.clone(),
                neighbors.iter().map(LldpNeighbor::from).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbor(local: &str, name: &str, desc: &str, desc2: Option<&str>) -> FlatRecord {
        let mut record: FlatRecord = [
            ("local_interface", local),
            ("remote_chassis_id", "00:01:e8:8b:2a:3c"),
            ("remote_port", "TenGigabitEthernet 0/48"),
            ("remote_port_description", "uplink"),
            ("remote_system_name", name),
            ("remote_system_description", desc),
            ("remote_system_capab", "Repeater Bridge, Router"),
            ("remote_system_enable_capab", ""),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        if let Some(rest) = desc2 {
            record.insert("remote_system_description2".to_string(), rest.to_string());
        }
        record
    }

    #[test]
    fn test_continuation_line_is_joined() {
        let records = vec![neighbor(
            "Te 0/1",
            "spine1",
            "Dell Real Time Operating System Software.",
            Some("  Operating System Version: 2.0. "),
        )];

        let mapped = map_lldp_neighbors_detail(&records);
        assert!(mapped.is_clean());

        let details = &mapped.value["TenGigabitEthernet0/1"];
        assert_eq!(details.len(), 1);
        assert_eq!(
            details[0].remote_system_description,
            "Dell Real Time Operating System Software. Operating System Version: 2.0."
        );
        assert_eq!(details[0].parent_interface, "");
        assert_eq!(details[0].remote_port, "TenGigabitEthernet 0/48");
        assert_eq!(
            details[0].remote_system_capab,
            vec!["Repeater", "Bridge", "Router"]
        );
        assert!(details[0].remote_system_enable_capab.is_empty());
    }

    #[test]
    fn test_description_without_continuation_is_kept() {
        let mapped = map_lldp_neighbors_detail(&[neighbor("Te 0/1", "spine1", "Dell OS", None)]);
        assert_eq!(
            mapped.value["TenGigabitEthernet0/1"][0].remote_system_description,
            "Dell OS"
        );
    }

    #[test]
    fn test_neighbors_group_under_local_interface_in_order() {
        let records = vec![
            neighbor("Te 0/1", "spine1", "", None),
            neighbor("TenGigabitEthernet 0/1", "spine2", "", None),
            neighbor("Fo 0/48", "leaf1", "", None),
        ];

        let mapped = map_lldp_neighbors_detail(&records);
        assert_eq!(mapped.value.len(), 2);

        let names: Vec<&str> = mapped.value["TenGigabitEthernet0/1"]
            .iter()
            .map(|d| d.remote_system_name.as_str())
            .collect();
        assert_eq!(names, vec!["spine1", "spine2"]);
        assert!(mapped.value.contains_key("FortyGigabitEthernet0/48"));
    }

    #[test]
    fn test_neighbor_without_local_interface_is_rejected() {
        let mapped = map_lldp_neighbors_detail(&[
            neighbor("", "orphan", "", None),
            neighbor("Te 0/2", "spine1", "", None),
        ]);

        assert_eq!(mapped.rejected.len(), 1);
        assert_eq!(mapped.value.len(), 1);
    }

    #[test]
    fn test_summary_keeps_hostname_and_port_description() {
        let mapped = map_lldp_neighbors_detail(&[neighbor("Te 0/1", "spine1", "", None)]);
        let summary = lldp_neighbors_summary(&mapped.value);

        assert_eq!(
            summary["TenGigabitEthernet0/1"],
            vec![LldpNeighbor {
                hostname: "spine1".to_string(),
                port: "uplink".to_string(),
            }]
        );
    }
}

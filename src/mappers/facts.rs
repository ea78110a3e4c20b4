//! Facts mapper
//!
//! Reads `show system stack-unit` text directly; the inventory lines are
//! `Label   : value` pairs and need no template.

use crate::models::Facts;
use crate::normalize::{parse_duration, DurationForm};

/// Facts fields recognised in the system report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FactField {
    Uptime,
    Vendor,
    OsVersion,
    SerialNumber,
    Model,
}

/// Which fact a line of `show system` carries, if any
fn classify(line: &str) -> Option<FactField> {
    if line.starts_with("Up Time") {
        Some(FactField::Uptime)
    } else if line.starts_with("Mfg By") {
        Some(FactField::Vendor)
    } else if line.contains(" OS Version") {
        // "Dell Networking OS Version : 9.10(0.1)"
        Some(FactField::OsVersion)
    } else if line.starts_with("Serial Number") {
        Some(FactField::SerialNumber)
    } else if line.starts_with("Product Name") {
        Some(FactField::Model)
    } else {
        None
    }
}

/// Text between the first and second `": "` separators
fn field_value(line: &str) -> Option<&str> {
    line.split(": ")
        .nth(1)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Hostname from the first `hostname` line of a running configuration
pub fn hostname_from_config(running_config: &str) -> Option<String> {
    running_config
        .lines()
        .find_map(|line| line.strip_prefix("hostname "))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Build facts from the system report, the running configuration and the
/// interface names already collected. Anything missing keeps its default.
pub fn map_facts<I>(show_system: &str, running_config: &str, interface_names: I) -> Facts
where
    I: IntoIterator<Item = String>,
{
    let mut facts = Facts::default();
    let mut uptime = None;
    let mut vendor = None;
    let mut os_version = None;
    let mut serial_number = None;
    let mut model = None;

    for line in show_system.lines() {
        let Some(field) = classify(line) else {
            continue;
        };
        let Some(value) = field_value(line) else {
            continue;
        };

        // First occurrence of each field wins; later stack units repeat them
        let slot = match field {
            FactField::Uptime => &mut uptime,
            FactField::Vendor => &mut vendor,
            FactField::OsVersion => &mut os_version,
            FactField::SerialNumber => &mut serial_number,
            FactField::Model => &mut model,
        };
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }

    if let Some(text) = uptime {
        let seconds = parse_duration(&text, DurationForm::Long);
        facts.uptime = i64::try_from(seconds).unwrap_or(i64::MAX);
    }
    if let Some(value) = vendor {
        facts.vendor = value;
    }
    if let Some(value) = os_version {
        facts.os_version = value;
    }
    if let Some(value) = serial_number {
        facts.serial_number = value;
    }
    if let Some(value) = model {
        facts.model = value;
    }

    if let Some(hostname) = hostname_from_config(running_config) {
        facts.fqdn = hostname.clone();
        facts.hostname = hostname;
    }

    let mut interface_list: Vec<String> = interface_names.into_iter().collect();
    interface_list.sort();
    interface_list.dedup();
    facts.interface_list = interface_list;

    facts
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOW_SYSTEM: &str = "\
-- Unit 0 --
Unit Type           : Management Unit
Status              : online
Up Time             : 32 wk, 6 day, 10 hr, 39 min
Dell Networking OS Version : 9.10(0.1)
Jumbo Capable       : yes

-- Unit 0 --
Product Name        : S4810
Mfg By              : DELL
Serial Number       : HADL123456789
Part Number         : 7590009601
";

    const RUNNING_CONFIG: &str = "\
Current Configuration ...
!
hostname leaf1
!
interface TenGigabitEthernet 0/0
";

    #[test]
    fn test_all_fields_present() {
        let facts = map_facts(
            SHOW_SYSTEM,
            RUNNING_CONFIG,
            vec!["TenGigabitEthernet0/1".to_string(), "TenGigabitEthernet0/0".to_string()],
        );

        assert_eq!(facts.uptime, 19_910_340);
        assert_eq!(facts.vendor, "DELL");
        assert_eq!(facts.os_version, "9.10(0.1)");
        assert_eq!(facts.serial_number, "HADL123456789");
        assert_eq!(facts.model, "S4810");
        assert_eq!(facts.hostname, "leaf1");
        assert_eq!(facts.fqdn, "leaf1");
        assert_eq!(
            facts.interface_list,
            vec!["TenGigabitEthernet0/0", "TenGigabitEthernet0/1"]
        );
    }

    #[test]
    fn test_missing_serial_number_keeps_sentinel_only_for_that_field() {
        let without_serial: String = SHOW_SYSTEM
            .lines()
            .filter(|line| !line.starts_with("Serial Number"))
            .map(|line| format!("{}\n", line))
            .collect();

        let facts = map_facts(&without_serial, RUNNING_CONFIG, Vec::new());

        assert_eq!(facts.serial_number, "Unknown");
        assert_eq!(facts.model, "S4810");
        assert_eq!(facts.vendor, "DELL");
        assert_eq!(facts.uptime, 19_910_340);
        assert_eq!(facts.hostname, "leaf1");
    }

    #[test]
    fn test_empty_inputs_give_defaults() {
        let facts = map_facts("", "", Vec::new());
        assert_eq!(facts, Facts::default());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let text = "Serial Number : FIRST\nSerial Number : SECOND\n";
        let facts = map_facts(text, "", Vec::new());
        assert_eq!(facts.serial_number, "FIRST");
    }

    #[test]
    fn test_line_without_separator_is_absent() {
        let facts = map_facts("Product Name S4810\nSerial Number       : \n", "", Vec::new());
        assert_eq!(facts.model, "Unknown");
        assert_eq!(facts.serial_number, "Unknown");
    }

    #[test]
    fn test_interface_list_is_sorted_and_unique() {
        let facts = map_facts(
            "",
            "",
            vec!["Vlan1".to_string(), "Port-channel1".to_string(), "Vlan1".to_string()],
        );
        assert_eq!(facts.interface_list, vec!["Port-channel1", "Vlan1"]);
    }

    #[test]
    fn test_hostname_only_from_line_start() {
        let config = "! hostname is set below\n hostname indented\nhostname core-1\r\nhostname other\n";
        assert_eq!(hostname_from_config(config), Some("core-1".to_string()));
        assert_eq!(hostname_from_config("no hostname here\n"), None);
    }
}

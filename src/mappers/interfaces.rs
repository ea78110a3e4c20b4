//! Interfaces mapper

use super::Mapped;
use crate::extract::schema::{decode, InterfaceRow};
use crate::extract::{FlatRecord, Template};
use crate::models::{Interface, Interfaces, NormalizeError};
use crate::normalize::{canonical_interface_name, is_up, parse_duration, parse_speed, DurationForm};

/// Normalize one `show interfaces` row. `Ok(None)` means the row names no
/// interface (headers and blank rows the extractor let through).
fn map_row(row: InterfaceRow) -> Result<Option<(String, Interface)>, NormalizeError> {
    if row.iface_name.trim().is_empty() {
        return Ok(None);
    }

    // Ports without a negotiated speed report none
    let speed = if row.line_speed.trim().is_empty() {
        0
    } else {
        parse_speed(&row.line_speed)?
    };

    let interface = Interface {
        is_enabled: is_up(&row.admin_status),
        is_up: is_up(&row.oper_status),
        description: row.description,
        mac_address: row.mac_address,
        last_flapped: parse_duration(&row.last_flapped, DurationForm::Long),
        speed,
    };

    Ok(Some((canonical_interface_name(&row.iface_name), interface)))
}

/// Map `show interfaces` records, keyed by canonical name.
///
/// When two records canonicalize to the same name the later one wins.
pub fn map_interfaces(records: &[FlatRecord]) -> Mapped<Interfaces> {
    let mut mapped = Mapped::new(Interfaces::new());

    for record in records {
        let result = decode::<InterfaceRow>(Template::Interfaces, record).and_then(map_row);
        match result {
            Ok(Some((name, interface))) => {
                mapped.value.insert(name, interface);
            }
            Ok(None) => {}
            Err(error) => mapped.reject(error),
        }
    }

    mapped
}

//! MAC address table mapper

use super::Mapped;
use crate::constants::NOT_AVAILABLE;
use crate::extract::schema::{decode, MacRow};
use crate::extract::{FlatRecord, Template};
use crate::models::{MacEntry, NormalizeError};
use crate::normalize::canonical_interface_name;

fn map_row(row: MacRow) -> Result<MacEntry, NormalizeError> {
    let vlan = row
        .vlan
        .trim()
        .parse::<u16>()
        .map_err(|e| NormalizeError::malformed("vlan", &row.vlan, e.to_string()))?;

    Ok(MacEntry {
        mac: row.mac,
        interface: canonical_interface_name(row.interface.trim()),
        vlan,
        is_static: row.kind.trim() == "Static",
        is_active: row.state.trim() == "Active",
        moves: NOT_AVAILABLE,
        last_move: NOT_AVAILABLE,
    })
}

/// Map `show mac-address-table` records in device order
pub fn map_mac_address_table(records: &[FlatRecord]) -> Mapped<Vec<MacEntry>> {
    let mut mapped = Mapped::new(Vec::with_capacity(records.len()));

    for record in records {
        match decode::<MacRow>(Template::MacAddressTable, record).and_then(map_row) {
            Ok(entry) => mapped.value.push(entry),
            Err(error) => mapped.reject(error),
        }
    }

    mapped
}

//! Canonical interface naming
//!
//! FTOS abbreviates interface names differently depending on the command
//! (`Te 0/1` in LLDP and MAC tables, `TenGigabitEthernet 0/1` in
//! `show interfaces`). Every report keys interfaces by the same long form so
//! the results can be joined.

/// Known interface type spellings and their long form.
/// Every long form also maps to itself so canonicalization is idempotent.
const INTERFACE_TYPES: &[(&str, &str)] = &[
    // 1G
    ("GigabitEthernet", "GigabitEthernet"),
    ("Gi", "GigabitEthernet"),
    ("Gig", "GigabitEthernet"),
    ("GE", "GigabitEthernet"),
    // 100M
    ("FastEthernet", "FastEthernet"),
    ("Fa", "FastEthernet"),
    ("Fas", "FastEthernet"),
    ("FE", "FastEthernet"),
    // 10G
    ("TenGigabitEthernet", "TenGigabitEthernet"),
    ("Te", "TenGigabitEthernet"),
    ("TenGig", "TenGigabitEthernet"),
    ("TenGigE", "TenGigabitEthernet"),
    ("TE", "TenGigabitEthernet"),
    // 25G
    ("TwentyFiveGigE", "TwentyFiveGigE"),
    ("twentyFiveGigE", "TwentyFiveGigE"),
    ("Tf", "TwentyFiveGigE"),
    // 40G
    ("FortyGigabitEthernet", "FortyGigabitEthernet"),
    ("Fo", "FortyGigabitEthernet"),
    ("fortyGigE", "FortyGigabitEthernet"),
    ("FortyGigE", "FortyGigabitEthernet"),
    // 100G
    ("HundredGigE", "HundredGigE"),
    ("hundredGigE", "HundredGigE"),
    ("Hu", "HundredGigE"),
    // Generic Ethernet
    ("Ethernet", "Ethernet"),
    ("Eth", "Ethernet"),
    ("Et", "Ethernet"),
    // Management
    ("ManagementEthernet", "ManagementEthernet"),
    ("Ma", "ManagementEthernet"),
    ("Mgmt", "ManagementEthernet"),
    ("mgmt", "ManagementEthernet"),
    // Logical
    ("Port-channel", "Port-channel"),
    ("Po", "Port-channel"),
    ("Vlan", "Vlan"),
    ("Vl", "Vlan"),
    ("Loopback", "Loopback"),
    ("Lo", "Loopback"),
    ("Tunnel", "Tunnel"),
    ("Tu", "Tunnel"),
    ("Null", "Null"),
    ("Nu", "Null"),
];

/// Characters that make up the numbering after an interface type
const NUMBERING_CHARS: &[char] = &['/', '.', ' ', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Split `Te 0/1` into (`Te`, `0/1`)
fn split_interface(raw: &str) -> (&str, &str) {
    let head = raw.trim_end_matches(NUMBERING_CHARS);
    let tail = raw[head.len()..].trim_start();
    (head, tail)
}

fn long_form(head: &str) -> Option<&'static str> {
    INTERFACE_TYPES
        .iter()
        .find(|(spelling, _)| *spelling == head)
        .map(|(_, long)| *long)
}

/// Map an abbreviated interface name to its long form, keeping the numbering.
///
/// `Te 0/1` and `TenGigabitEthernet 0/1` both become `TenGigabitEthernet0/1`.
/// Names with an unknown type are returned unchanged.
pub fn canonical_interface_name(raw: &str) -> String {
    let (head, tail) = split_interface(raw);
    match long_form(head) {
        Some(long) => format!("{}{}", long, tail),
        None => raw.to_string(),
    }
}

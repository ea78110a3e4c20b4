//! Output formatting module
//!
//! Handles:
//! - Human-readable tables per report
//! - JSON output: one report prints its own object, several print an object
//!   keyed by report name
//! - Duration and sentinel rendering for people

use anyhow::Result;
use serde_json::{Map, Value};

use crate::models::{
    DeviceConfig, DeviceSnapshot, Environment, Facts, Interfaces, LldpNeighbors,
    LldpNeighborsDetail, MacEntry, Report,
};

/// Column-aligned text table
struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn render(&self, out: &mut String) {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.len()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        push_line(out, &header, &widths);
        for row in &self.rows {
            push_line(out, row, &widths);
        }
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    out.push_str("  ");
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// `93784` becomes `1d 2h 3m 4s`
pub fn format_duration(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = seconds % 86_400 / 3_600;
    let minutes = seconds % 3_600 / 60;
    let secs = seconds % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if secs > 0 || parts.is_empty() {
        parts.push(format!("{}s", secs));
    }
    parts.join(" ")
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "yes" } else { "no" };
    text.to_string()
}

fn up_down(flag: bool) -> String {
    let text = if flag { "up" } else { "down" };
    text.to_string()
}

fn or_dash(text: &str) -> String {
    if text.is_empty() {
        "-".to_string()
    } else {
        text.to_string()
    }
}

fn render_facts(facts: &Facts, out: &mut String) {
    let uptime = u64::try_from(facts.uptime)
        .map(format_duration)
        .unwrap_or_else(|_| "unknown".to_string());

    out.push_str("Facts:\n");
    for (label, value) in [
        ("Hostname", facts.hostname.as_str()),
        ("FQDN", facts.fqdn.as_str()),
        ("Vendor", facts.vendor.as_str()),
        ("Model", facts.model.as_str()),
        ("Serial number", facts.serial_number.as_str()),
        ("OS version", facts.os_version.as_str()),
        ("Uptime", uptime.as_str()),
    ] {
        out.push_str(&format!("  {:<15}{}\n", format!("{}:", label), value));
    }
    out.push_str(&format!("  {:<15}{}\n", "Interfaces:", facts.interface_list.len()));
}

fn render_interfaces(interfaces: &Interfaces, out: &mut String) {
    if interfaces.is_empty() {
        out.push_str("No interfaces found.\n");
        return;
    }

    out.push_str(&format!("Interfaces ({}):\n", interfaces.len()));
    let mut table = Table::new(&["INTERFACE", "ADMIN", "OPER", "SPEED", "LAST FLAP", "MAC", "DESCRIPTION"]);
    for (name, interface) in interfaces {
        table.row(vec![
            name.clone(),
            up_down(interface.is_enabled),
            up_down(interface.is_up),
            if interface.speed == 0 {
                "-".to_string()
            } else {
                format!("{} Mb/s", interface.speed)
            },
            format_duration(interface.last_flapped),
            or_dash(&interface.mac_address),
            or_dash(&interface.description),
        ]);
    }
    table.render(out);
}

fn render_environment(env: &Environment, out: &mut String) {
    out.push_str("Environment:\n");

    if !env.temperature.is_empty() {
        let mut table = Table::new(&["UNIT", "TEMP (C)", "ALERT", "CRITICAL", "POWER"]);
        for (unit, reading) in &env.temperature {
            let power = env
                .power
                .get(unit)
                .map(|p| if p.status { "ok" } else { "fail" }.to_string())
                .unwrap_or_else(|| "-".to_string());
            table.row(vec![
                unit.clone(),
                format!("{:.1}", reading.temperature),
                yes_no(reading.is_alert),
                yes_no(reading.is_critical),
                power,
            ]);
        }
        table.render(out);
    }

    if !env.cpu.is_empty() {
        let mut table = Table::new(&["UNIT", "CPU 1MIN"]);
        for (unit, reading) in &env.cpu {
            table.row(vec![unit.clone(), format!("{:.0}%", reading.usage)]);
        }
        table.render(out);
    }

    out.push_str(&format!(
        "  Memory: {} of {} bytes used\n",
        env.memory.used_ram, env.memory.available_ram
    ));
}

fn render_lldp(neighbors: &LldpNeighbors, out: &mut String) {
    if neighbors.is_empty() {
        out.push_str("No LLDP neighbors found.\n");
        return;
    }

    out.push_str("LLDP neighbors:\n");
    let mut table = Table::new(&["LOCAL INTERFACE", "NEIGHBOR", "PORT"]);
    for (local, list) in neighbors {
        for neighbor in list {
            table.row(vec![
                local.clone(),
                or_dash(&neighbor.hostname),
                or_dash(&neighbor.port),
            ]);
        }
    }
    table.render(out);
}

fn render_lldp_detail(details: &LldpNeighborsDetail, out: &mut String) {
    if details.is_empty() {
        out.push_str("No LLDP neighbors found.\n");
        return;
    }

    out.push_str("LLDP neighbor details:\n");
    for (local, list) in details {
        for detail in list {
            out.push_str(&format!("  {}:\n", local));
            for (label, value) in [
                ("System name", detail.remote_system_name.as_str()),
                ("Chassis ID", detail.remote_chassis_id.as_str()),
                ("Port ID", detail.remote_port.as_str()),
                ("Port description", detail.remote_port_description.as_str()),
                ("Description", detail.remote_system_description.as_str()),
            ] {
                out.push_str(&format!("    {:<18}{}\n", format!("{}:", label), or_dash(value)));
            }
            out.push_str(&format!(
                "    {:<18}{}\n",
                "Capabilities:",
                or_dash(&detail.remote_system_capab.join(", "))
            ));
            out.push_str(&format!(
                "    {:<18}{}\n",
                "Enabled:",
                or_dash(&detail.remote_system_enable_capab.join(", "))
            ));
        }
    }
}

fn render_mac_table(entries: &[MacEntry], out: &mut String) {
    if entries.is_empty() {
        out.push_str("No MAC address entries found.\n");
        return;
    }

    out.push_str(&format!("MAC address table ({} entries):\n", entries.len()));
    let mut table = Table::new(&["VLAN", "MAC", "INTERFACE", "TYPE", "STATE"]);
    for entry in entries {
        table.row(vec![
            entry.vlan.to_string(),
            entry.mac.clone(),
            entry.interface.clone(),
            if entry.is_static { "static" } else { "dynamic" }.to_string(),
            if entry.is_active { "active" } else { "inactive" }.to_string(),
        ]);
    }
    table.render(out);
}

fn render_config(config: &DeviceConfig, out: &mut String) {
    for (label, text) in [("Running", &config.running), ("Startup", &config.startup)] {
        if text.is_empty() {
            continue;
        }
        out.push_str(&format!("{} configuration:\n", label));
        out.push_str(text.trim_end());
        out.push('\n');
    }
}

fn render_snapshot(snapshot: &DeviceSnapshot, out: &mut String) {
    out.push_str(&format!("Snapshot collected at {}\n\n", snapshot.collected_at));
    render_facts(&snapshot.facts, out);
    out.push('\n');
    render_interfaces(&snapshot.interfaces, out);
    out.push('\n');
    render_environment(&snapshot.environment, out);
    out.push('\n');
    render_lldp(&snapshot.lldp_neighbors, out);
    out.push('\n');
    render_mac_table(&snapshot.mac_address_table, out);
}

/// Format reports as human-readable text, separated by blank lines
pub fn format_human(reports: &[Report]) -> String {
    let mut out = String::new();
    for (idx, report) in reports.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        match report {
            Report::Facts(facts) => render_facts(facts, &mut out),
            Report::Interfaces(interfaces) => render_interfaces(interfaces, &mut out),
            Report::Environment(env) => render_environment(env, &mut out),
            Report::LldpNeighbors(neighbors) => render_lldp(neighbors, &mut out),
            Report::LldpNeighborsDetail(details) => render_lldp_detail(details, &mut out),
            Report::MacAddressTable(entries) => render_mac_table(entries, &mut out),
            Report::Config(config) => render_config(config, &mut out),
            Report::Snapshot(snapshot) => render_snapshot(snapshot, &mut out),
        }
    }
    out
}

/// Format reports as pretty-printed JSON
pub fn format_json(reports: &[Report]) -> Result<String> {
    if let [only] = reports {
        return Ok(serde_json::to_string_pretty(only)?);
    }

    let mut object = Map::new();
    for report in reports {
        object.insert(report.kind().to_string(), serde_json::to_value(report)?);
    }
    Ok(serde_json::to_string_pretty(&Value::Object(object))?)
}

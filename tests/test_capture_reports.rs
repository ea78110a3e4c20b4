//! End-to-end runs of the binary against captured FTOS output

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const LEAF1: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/leaf1");
const MALFORMED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/malformed");

/// ftosnap with an empty home so no user config file is picked up
fn ftosnap(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ftosnap").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("RUST_LOG");
    cmd
}

fn run_json(args: &[&str]) -> Value {
    let home = TempDir::new().unwrap();
    let output = ftosnap(&home).args(args).output().unwrap();
    assert!(
        output.status.success(),
        "ftosnap failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_facts_json() {
    let facts = run_json(&["-c", LEAF1, "--json", "facts"]);

    assert_eq!(facts["hostname"], "leaf1");
    assert_eq!(facts["fqdn"], "leaf1");
    assert_eq!(facts["vendor"], "DELL");
    assert_eq!(facts["model"], "S4810");
    assert_eq!(facts["serial_number"], "HADL134K20098");
    assert_eq!(facts["os_version"], "9.10(0.1)");
    assert_eq!(facts["uptime"], 19_910_340);
    assert_eq!(
        facts["interface_list"],
        serde_json::json!([
            "FortyGigabitEthernet0/48",
            "ManagementEthernet0/0",
            "TenGigabitEthernet0/0",
            "TenGigabitEthernet0/1",
            "Vlan1"
        ])
    );
}

#[test]
fn test_interfaces_json() {
    let interfaces = run_json(&["--captures", LEAF1, "-j", "interfaces"]);

    let te0 = &interfaces["TenGigabitEthernet0/0"];
    assert_eq!(te0["is_enabled"], true);
    assert_eq!(te0["is_up"], true);
    assert_eq!(te0["speed"], 10_000);
    assert_eq!(te0["description"], "uplink to spine1");
    assert_eq!(te0["mac_address"], "00:01:e8:8b:2a:01");
    assert_eq!(te0["last_flapped"], 5 * 86_400 + 4 * 3_600 + 12 * 60);

    assert_eq!(interfaces["FortyGigabitEthernet0/48"]["speed"], 40_000);
    assert_eq!(interfaces["TenGigabitEthernet0/1"]["is_up"], false);
    assert_eq!(interfaces["TenGigabitEthernet0/1"]["speed"], 0);
    assert_eq!(interfaces["Vlan1"]["mac_address"], "");
}

#[test]
fn test_environment_json() {
    let env = run_json(&["-c", LEAF1, "-j", "environment"]);

    assert_eq!(env["temperature"]["Unit 0"]["temperature"], 45.0);
    assert_eq!(env["temperature"]["Unit 0"]["is_alert"], false);
    assert_eq!(env["power"]["Unit 0"]["status"], true);
    assert_eq!(env["power"]["Unit 0"]["capacity"], -1.0);
    assert_eq!(env["cpu"]["Unit 0"]["%usage"], 2.0);
    assert_eq!(env["memory"]["available_ram"], 2_147_483_648u64);
    assert_eq!(env["memory"]["used_ram"], 391_335_936u64);
    assert_eq!(env["fans"], serde_json::json!({}));
}

#[test]
fn test_lldp_detail_joins_wrapped_description() {
    let details = run_json(&["-c", LEAF1, "-j", "lldp-detail"]);

    let spine1 = &details["TenGigabitEthernet0/0"][0];
    assert_eq!(spine1["remote_system_name"], "spine1");
    assert_eq!(spine1["remote_chassis_id"], "00:01:e8:44:10:00");
    assert_eq!(spine1["remote_port"], "TenGigabitEthernet 0/48");
    assert_eq!(
        spine1["remote_system_description"],
        "Dell Real Time Operating System Software. Dell Operating System Version: 2.0. \
         Dell Application Software Version: 9.10(0.1)"
    );
    assert_eq!(
        spine1["remote_system_capab"],
        serde_json::json!(["Repeater", "Bridge", "Router"])
    );
    assert!(spine1.get("remote_system_description2").is_none());

    let spine2 = &details["FortyGigabitEthernet0/48"][0];
    assert_eq!(spine2["remote_system_enable_capab"], serde_json::json!(["Router"]));
}

#[test]
fn test_lldp_detail_for_one_interface() {
    let details = run_json(&["-c", LEAF1, "-j", "-i", "Te 0/0", "lldp-detail"]);

    let object = details.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert!(object.contains_key("TenGigabitEthernet0/0"));
}

#[test]
fn test_blank_interface_filter_lists_every_port() {
    let details = run_json(&["-c", LEAF1, "-j", "-i", "", "lldp-detail"]);

    let object = details.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert!(object.contains_key("FortyGigabitEthernet0/48"));
}

#[test]
fn test_facts_without_running_config() {
    let captures = TempDir::new().unwrap();
    for name in ["show_system_stack-unit_0.txt", "show_interfaces.txt"] {
        std::fs::copy(
            std::path::Path::new(LEAF1).join(name),
            captures.path().join(name),
        )
        .unwrap();
    }

    let home = TempDir::new().unwrap();
    let output = ftosnap(&home)
        .arg("-c")
        .arg(captures.path())
        .args(["-j", "facts"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let facts: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(facts["hostname"], "Unknown");
    assert_eq!(facts["fqdn"], "Unknown");
    assert_eq!(facts["serial_number"], "HADL134K20098");
    assert_eq!(facts["uptime"], 19_910_340);
    assert!(String::from_utf8_lossy(&output.stderr).contains("running configuration unavailable"));
}

#[test]
fn test_several_reports_are_keyed_by_name() {
    let reports = run_json(&["-c", LEAF1, "-j", "lldp", "mac-table"]);

    assert_eq!(reports["lldp"]["TenGigabitEthernet0/0"][0]["hostname"], "spine1");
    assert_eq!(reports["lldp"]["TenGigabitEthernet0/0"][0]["port"], "to-leaf1");

    let macs = reports["mac-table"].as_array().unwrap();
    assert_eq!(macs.len(), 3);
    assert_eq!(macs[2]["interface"], "Port-channel1");
    assert_eq!(macs[2]["vlan"], 100);
    assert_eq!(macs[2]["static"], true);
    assert_eq!(macs[2]["active"], false);
    assert_eq!(macs[2]["moves"], -1);
}

#[test]
fn test_snapshot_is_the_default_report() {
    let snapshot = run_json(&["-c", LEAF1, "-j"]);

    assert!(snapshot["collected_at"].is_string());
    assert_eq!(snapshot["facts"]["hostname"], "leaf1");
    assert!(snapshot["interfaces"].is_object());
    assert!(snapshot["environment"].is_object());
    assert!(snapshot["lldp_neighbors"].is_object());
    assert!(snapshot["mac_address_table"].is_array());
}

#[test]
fn test_config_report() {
    let config = run_json(&["-c", LEAF1, "-j", "config"]);

    assert!(config["running"].as_str().unwrap().contains("hostname leaf1"));
    assert!(config["startup"].as_str().unwrap().contains("hostname leaf1"));
    assert_eq!(config["candidate"], "Not implemented for FTOS");
}

#[test]
fn test_human_output() {
    let home = TempDir::new().unwrap();
    ftosnap(&home)
        .args(["-c", LEAF1, "facts", "interfaces"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Facts:"))
        .stdout(predicate::str::contains("Hostname:      leaf1"))
        .stdout(predicate::str::contains("Uptime:        230d 10h 39m"))
        .stdout(predicate::str::contains("Interfaces (5):"))
        .stdout(predicate::str::contains("TenGigabitEthernet0/0"))
        .stdout(predicate::str::contains("10000 Mb/s"));
}

#[test]
fn test_missing_command_source_is_explained() {
    let home = TempDir::new().unwrap();
    ftosnap(&home)
        .arg("facts")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No command source configured"))
        .stderr(predicate::str::contains("--captures"));
}

#[test]
fn test_missing_capture_dir_fails() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("no-such-dir");
    ftosnap(&home)
        .args(["-c", missing.to_str().unwrap(), "facts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Capture directory does not exist"));
}

#[test]
fn test_rejected_command_names_report() {
    let home = TempDir::new().unwrap();
    // The malformed capture set has no environment output
    ftosnap(&home)
        .args(["-c", MALFORMED, "environment"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to collect environment report"))
        .stderr(predicate::str::contains("% Invalid input"));
}

#[test]
fn test_strict_mode_fails_on_malformed_record() {
    let home = TempDir::new().unwrap();
    ftosnap(&home)
        .args(["-c", MALFORMED, "mac-table"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mac-table report rejected 1 record(s)"))
        .stderr(predicate::str::contains("vlan"));
}

#[test]
fn test_lenient_mode_keeps_good_records() {
    let home = TempDir::new().unwrap();
    let output = ftosnap(&home)
        .args(["-c", MALFORMED, "--lenient", "-j", "mac-table"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let macs: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(macs.as_array().unwrap().len(), 1);
    assert!(String::from_utf8_lossy(&output.stderr).contains("skipping record"));
}

#[test]
fn test_quiet_mode_hides_lenient_warnings() {
    let home = TempDir::new().unwrap();
    ftosnap(&home)
        .args(["-c", MALFORMED, "--lenient", "-q", "mac-table"])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping record").not());
}

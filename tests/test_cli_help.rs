use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_includes_required_options() {
    let mut cmd = Command::cargo_bin("ftosnap").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("REPORT"))
        .stdout(predicate::str::contains("--captures"))
        .stdout(predicate::str::contains("--exec"))
        .stdout(predicate::str::contains("--interface"))
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("--quiet"))
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--lenient"))
        .stdout(predicate::str::contains("--version"))
        .stdout(predicate::str::contains("--help"));
}

#[test]
fn test_help_lists_report_names() {
    let output = Command::cargo_bin("ftosnap")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    for name in [
        "facts",
        "interfaces",
        "environment",
        "lldp",
        "lldp-detail",
        "mac-table",
        "config",
        "snapshot",
    ] {
        assert!(stdout.contains(name), "help does not mention {}", name);
    }
}

#[test]
fn test_unknown_report_fails_with_usage() {
    let mut cmd = Command::cargo_bin("ftosnap").unwrap();
    cmd.arg("fans");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'fans'"));
}

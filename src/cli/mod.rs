//! CLI argument parsing and validation module
//!
//! Handles command-line interface using clap, including:
//! - Report selection (positional, defaults to a full snapshot)
//! - Command source options (capture directory or transport program)
//! - Output format selection (human/JSON) and lenient record handling
//! - Verbosity and quiet modes
//! - Help and version commands

use anyhow::{anyhow, Result};
use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::models::ReportKind;

/// Parsed command-line options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    /// Reports in the order requested, without repeats
    pub reports: Vec<ReportKind>,
    pub captures: Option<PathBuf>,
    /// Transport program and its arguments
    pub exec: Option<Vec<String>>,
    pub interface: Option<String>,
    pub config_path: Option<PathBuf>,
    pub json_output: bool,
    pub quiet_mode: bool,
    pub verbose: bool,
    pub lenient: bool,
}

fn version() -> &'static str {
    concat!(env!("FTOSNAP_BUILD_VERSION"), " (", env!("GIT_HASH"), ")")
}

/// Build the clap command definition
pub fn build_command() -> Command {
    let report_names = ReportKind::ALL.map(ReportKind::as_str);

    Command::new("ftosnap")
        .version(version())
        .about("Collect normalized state from Dell FTOS switches")
        .long_about(
            "Runs FTOS show commands through a capture directory or a transport program \
             (such as ssh) and prints facts, interfaces, environment, LLDP neighbors and \
             the MAC address table as tables or JSON.",
        )
        .arg(
            Arg::new("report")
                .value_name("REPORT")
                .help("Report to collect (default: snapshot)")
                .value_parser(
                    PossibleValuesParser::new(report_names)
                        .try_map(|name| name.parse::<ReportKind>()),
                )
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("captures")
                .short('c')
                .long("captures")
                .value_name("DIR")
                .help("Directory of captured command output, one <command>.txt per command")
                .value_parser(value_parser!(PathBuf))
                .conflicts_with("exec"),
        )
        .arg(
            Arg::new("exec")
                .short('x')
                .long("exec")
                .value_name("PROGRAM")
                .help("Transport program run once per command, e.g. \"ssh -T admin@switch1\""),
        )
        .arg(
            Arg::new("interface")
                .short('i')
                .long("interface")
                .value_name("NAME")
                .help("Only show LLDP neighbor details for this local interface"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Configuration file (default: <config dir>/ftosnap/config.toml)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("json")
                .short('j')
                .long("json")
                .help("Output in JSON format")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log each command sent and the records extracted")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("lenient")
                .long("lenient")
                .help("Skip malformed records with a warning instead of failing the report")
                .action(ArgAction::SetTrue),
        )
}

/// Parse command line arguments and return options
pub fn parse_args() -> Result<CliOptions> {
    options_from_matches(&build_command().get_matches())
}

/// Parse an explicit argument list (the first item is the program name)
pub fn parse_from<I, T>(args: I) -> Result<CliOptions>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command().try_get_matches_from(args)?;
    options_from_matches(&matches)
}

fn options_from_matches(matches: &ArgMatches) -> Result<CliOptions> {
    let mut reports = Vec::new();
    if let Some(kinds) = matches.get_many::<ReportKind>("report") {
        for kind in kinds {
            if !reports.contains(kind) {
                reports.push(*kind);
            }
        }
    }
    if reports.is_empty() {
        reports.push(ReportKind::Snapshot);
    }

    let captures = matches.get_one::<PathBuf>("captures").cloned();
    if let Some(dir) = &captures {
        validate_capture_dir(dir)?;
    }

    let exec = match matches.get_one::<String>("exec") {
        Some(line) => {
            let argv: Vec<String> = line.split_whitespace().map(str::to_string).collect();
            if argv.is_empty() {
                return Err(anyhow!("--exec needs a program to run"));
            }
            Some(argv)
        }
        None => None,
    };

    Ok(CliOptions {
        reports,
        captures,
        exec,
        interface: matches.get_one::<String>("interface").cloned(),
        config_path: matches.get_one::<PathBuf>("config").cloned(),
        json_output: matches.get_flag("json"),
        quiet_mode: matches.get_flag("quiet"),
        verbose: matches.get_flag("verbose"),
        lenient: matches.get_flag("lenient"),
    })
}

/// A capture directory must exist before any command is attempted
pub fn validate_capture_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Err(anyhow!("Capture directory does not exist: {}", dir.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_to_snapshot() {
        let options = parse_from(["ftosnap"]).unwrap();
        assert_eq!(options.reports, vec![ReportKind::Snapshot]);
        assert!(!options.json_output);
        assert!(!options.lenient);
        assert_eq!(options.captures, None);
        assert_eq!(options.exec, None);
    }

    #[test]
    fn test_reports_keep_order_without_repeats() {
        let options = parse_from(["ftosnap", "mac-table", "facts", "mac-table"]).unwrap();
        assert_eq!(
            options.reports,
            vec![ReportKind::MacAddressTable, ReportKind::Facts]
        );
    }

    #[test]
    fn test_unknown_report_is_rejected() {
        assert!(parse_from(["ftosnap", "fans"]).is_err());
    }

    #[test]
    fn test_exec_is_split_into_argv() {
        let options = parse_from(["ftosnap", "-x", "ssh -T admin@switch1", "interfaces"]).unwrap();
        assert_eq!(
            options.exec,
            Some(vec!["ssh".to_string(), "-T".to_string(), "admin@switch1".to_string()])
        );
        assert_eq!(options.reports, vec![ReportKind::Interfaces]);
    }

    #[test]
    fn test_blank_exec_is_rejected() {
        assert!(parse_from(["ftosnap", "--exec", "   "]).is_err());
    }

    #[test]
    fn test_captures_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        assert!(parse_from(["ftosnap".into(), "-c".into(), missing.into_os_string()]).is_err());

        let options =
            parse_from(["ftosnap".into(), "-c".into(), dir.path().as_os_str().to_owned()]).unwrap();
        assert_eq!(options.captures.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_captures_and_exec_conflict() {
        let dir = TempDir::new().unwrap();
        let result = parse_from([
            OsString::from("ftosnap"),
            OsString::from("-c"),
            dir.path().as_os_str().to_owned(),
            OsString::from("-x"),
            OsString::from("ssh switch"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        assert!(parse_from(["ftosnap", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_flags() {
        let options = parse_from([
            "ftosnap", "--json", "--lenient", "-v", "-i", "Te 0/1", "lldp-detail",
        ])
        .unwrap();
        assert!(options.json_output);
        assert!(options.lenient);
        assert!(options.verbose);
        assert_eq!(options.interface.as_deref(), Some("Te 0/1"));
    }
}

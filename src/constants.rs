//! Global constants for ftosnap
//!
//! Centralized location for unit conversions, sentinels and the default
//! FTOS command set

/// Seconds per unit used when flattening device-reported durations.
/// Years are 365 days; leap years are not accounted for.
pub const MINUTE_SECONDS: u64 = 60;
pub const HOUR_SECONDS: u64 = 60 * MINUTE_SECONDS;
pub const DAY_SECONDS: u64 = 24 * HOUR_SECONDS;
pub const WEEK_SECONDS: u64 = 7 * DAY_SECONDS;
pub const YEAR_SECONDS: u64 = 365 * DAY_SECONDS;

/// Marker FTOS prints when it does not understand a command
pub const INVALID_COMMAND_MARKER: &str = "% Invalid";

/// Full line returned by the capture channel for commands it has no output for
pub const INVALID_COMMAND_RESPONSE: &str = "% Invalid input detected at '^' marker.";

/// Placeholder for string facts the device did not report
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for numeric facts and counters the device does not report
pub const NOT_AVAILABLE: i64 = -1;

/// Placeholder for power readings the device does not report
pub const NOT_AVAILABLE_F64: f64 = -1.0;

/// Vendor reported when the system inventory omits "Mfg By"
pub const DEFAULT_VENDOR: &str = "Dell EMC";

/// FTOS has no candidate configuration
pub const CANDIDATE_NOT_IMPLEMENTED: &str = "Not implemented for FTOS";

/// TempStatus code FTOS uses for a unit within its thermal envelope
pub const TEMP_STATUS_NORMAL: &str = "2";

/// Default command candidates, tried in order
pub const DEFAULT_FACTS_COMMANDS: &[&str] = &["show system stack-unit 0"];
pub const DEFAULT_INTERFACES_COMMANDS: &[&str] = &["show interfaces"];
pub const DEFAULT_ENVIRONMENT_COMMANDS: &[&str] = &["show environment stack-unit"];
pub const DEFAULT_CPU_COMMANDS: &[&str] = &["show processes cpu summary"];
pub const DEFAULT_MEMORY_COMMANDS: &[&str] = &["show memory"];
pub const DEFAULT_LLDP_DETAIL_COMMANDS: &[&str] = &["show lldp neighbors detail"];
pub const DEFAULT_MAC_TABLE_COMMANDS: &[&str] = &["show mac-address-table"];
pub const DEFAULT_RUNNING_CONFIG_COMMANDS: &[&str] = &["show running-config"];
pub const DEFAULT_STARTUP_CONFIG_COMMANDS: &[&str] = &["show startup-config"];

/// Per-interface LLDP detail; `{}` is replaced by the interface name
pub const LLDP_INTERFACE_DETAIL_COMMAND: &str = "show lldp neighbors interface {} detail";

/// Configuration directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "ftosnap";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

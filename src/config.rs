//! Configuration file management
//!
//! Handles TOML configuration parsing, validation and the default location.
//! Every section is optional; command-line flags override what the file says.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CPU_COMMANDS, DEFAULT_ENVIRONMENT_COMMANDS,
    DEFAULT_FACTS_COMMANDS, DEFAULT_INTERFACES_COMMANDS, DEFAULT_LLDP_DETAIL_COMMANDS,
    DEFAULT_MAC_TABLE_COMMANDS, DEFAULT_MEMORY_COMMANDS, DEFAULT_RUNNING_CONFIG_COMMANDS,
    DEFAULT_STARTUP_CONFIG_COMMANDS,
};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FtosnapConfig {
    pub connection: ConnectionSettings,
    pub commands: CommandSet,
    pub output: OutputSettings,
}

/// Where command output comes from. At most one source may be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectionSettings {
    /// Directory of captured command output
    pub captures: Option<PathBuf>,
    /// Transport program and its arguments; each command is appended
    pub program: Option<Vec<String>>,
}

/// Candidate commands per report, tried in order until the device accepts one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommandSet {
    pub facts: Vec<String>,
    pub interfaces: Vec<String>,
    pub environment: Vec<String>,
    pub cpu: Vec<String>,
    pub memory: Vec<String>,
    pub lldp_detail: Vec<String>,
    pub mac_address_table: Vec<String>,
    pub running_config: Vec<String>,
    pub startup_config: Vec<String>,
}

fn owned(commands: &[&str]) -> Vec<String> {
    commands.iter().map(|c| c.to_string()).collect()
}

impl Default for CommandSet {
    fn default() -> Self {
        Self {
            facts: owned(DEFAULT_FACTS_COMMANDS),
            interfaces: owned(DEFAULT_INTERFACES_COMMANDS),
            environment: owned(DEFAULT_ENVIRONMENT_COMMANDS),
            cpu: owned(DEFAULT_CPU_COMMANDS),
            memory: owned(DEFAULT_MEMORY_COMMANDS),
            lldp_detail: owned(DEFAULT_LLDP_DETAIL_COMMANDS),
            mac_address_table: owned(DEFAULT_MAC_TABLE_COMMANDS),
            running_config: owned(DEFAULT_RUNNING_CONFIG_COMMANDS),
            startup_config: owned(DEFAULT_STARTUP_CONFIG_COMMANDS),
        }
    }
}

impl CommandSet {
    fn lists(&self) -> [(&'static str, &Vec<String>); 9] {
        [
            ("facts", &self.facts),
            ("interfaces", &self.interfaces),
            ("environment", &self.environment),
            ("cpu", &self.cpu),
            ("memory", &self.memory),
            ("lldp_detail", &self.lldp_detail),
            ("mac_address_table", &self.mac_address_table),
            ("running_config", &self.running_config),
            ("startup_config", &self.startup_config),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    pub format: OutputFormat,
    /// Skip malformed records instead of failing the report
    pub lenient: bool,
}

/// `<config dir>/ftosnap/config.toml`, when the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl FtosnapConfig {
    /// Load and validate configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: FtosnapConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    /// Load an explicit file, or the default file when it exists, or defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => {
                log::debug!("using config file {}", path.display());
                Self::load_from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let connection = &self.connection;
        if connection.captures.is_some() && connection.program.is_some() {
            bail!("connection.captures and connection.program are mutually exclusive");
        }
        if let Some(program) = &connection.program {
            if program.is_empty() || program[0].trim().is_empty() {
                bail!("connection.program must name a program");
            }
        }

        for (name, candidates) in self.commands.lists() {
            if candidates.is_empty() {
                bail!("commands.{} must list at least one command", name);
            }
            if candidates.iter().any(|c| c.trim().is_empty()) {
                bail!("commands.{} contains an empty command", name);
            }
        }

        Ok(())
    }
}

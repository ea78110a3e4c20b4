//! Record extraction module
//!
//! Handles:
//! - The `RecordExtractor` seam between raw command output and mappers
//! - The closed set of FTOS report templates
//! - Typed per-template schemas for the flat records (see [`schema`])
//! - A built-in line-rule extractor for FTOS output (see [`templates`])

use std::collections::BTreeMap;
use std::fmt;

use crate::models::ExtractError;

pub mod schema;
pub mod templates;

pub use templates::TemplateExtractor;

/// One logical row of command output: field name to raw string value
pub type FlatRecord = BTreeMap<String, String>;

/// Templates understood by a record extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    EnvironmentStackUnit,
    ProcessesCpuSummary,
    Memory,
    Interfaces,
    LldpNeighborsDetail,
    MacAddressTable,
}

impl Template {
    pub const ALL: [Template; 6] = [
        Template::EnvironmentStackUnit,
        Template::ProcessesCpuSummary,
        Template::Memory,
        Template::Interfaces,
        Template::LldpNeighborsDetail,
        Template::MacAddressTable,
    ];

    /// Conventional template name, as used by TextFSM template libraries
    pub fn name(self) -> &'static str {
        match self {
            Template::EnvironmentStackUnit => "show_environment_stack-unit",
            Template::ProcessesCpuSummary => "show_processes_cpu_summary",
            Template::Memory => "show_memory",
            Template::Interfaces => "show_interfaces",
            Template::LldpNeighborsDetail => "show_lldp_neighbors_detail",
            Template::MacAddressTable => "show_mac-address-table",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Turns raw command output into an ordered sequence of flat records
pub trait RecordExtractor {
    fn extract(&self, template: Template, raw: &str) -> Result<Vec<FlatRecord>, ExtractError>;
}

impl<F> RecordExtractor for F
where
    F: Fn(Template, &str) -> Result<Vec<FlatRecord>, ExtractError>,
{
    fn extract(&self, template: Template, raw: &str) -> Result<Vec<FlatRecord>, ExtractError> {
        self(template, raw)
    }
}

//! Record mappers
//!
//! One pure function per report turns extracted records (or raw text, for
//! facts) into normalized models. A record that fails normalization is set
//! aside with its error; its siblings are still mapped. The caller decides
//! whether set-aside records fail the whole report.

pub mod environment;
pub mod facts;
pub mod interfaces;
pub mod lldp;
pub mod mac_table;

pub use environment::map_environment;
pub use facts::map_facts;
pub use interfaces::map_interfaces;
pub use lldp::{lldp_neighbors_summary, map_lldp_neighbors_detail};
pub use mac_table::map_mac_address_table;

use crate::models::{DriverError, NormalizeError, ReportKind};

/// Output of a mapper together with the records it had to reject
#[derive(Debug, Clone, PartialEq)]
pub struct Mapped<T> {
    pub value: T,
    pub rejected: Vec<NormalizeError>,
}

impl<T> Mapped<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            rejected: Vec::new(),
        }
    }

    /// Record a rejected record
    pub fn reject(&mut self, error: NormalizeError) {
        self.rejected.push(error);
    }

    /// True when every record was mapped
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Fail the report if any record was rejected
    pub fn strict(self, report: ReportKind) -> Result<T, DriverError> {
        if self.rejected.is_empty() {
            Ok(self.value)
        } else {
            Err(DriverError::Rejected {
                report,
                errors: self.rejected,
            })
        }
    }

    /// Keep the well-formed records and log the rejected ones
    pub fn lenient(self, report: ReportKind) -> T {
        for error in &self.rejected {
            log::warn!("{}: skipping record: {}", report, error);
        }
        self.value
    }

    /// Apply strict or lenient handling
    pub fn finish(self, report: ReportKind, strict: bool) -> Result<T, DriverError> {
        if strict {
            self.strict(report)
        } else {
            Ok(self.lenient(report))
        }
    }
}

//! ftosnap - Dell FTOS show-command normalization library
//!
//! This library turns the text output of FTOS show commands into typed
//! device snapshots: facts, interfaces, environment, LLDP neighbors and the
//! MAC address table. Commands reach the device through a `CommandChannel`;
//! raw text becomes records through a `RecordExtractor`.

#![forbid(unsafe_code)]

pub mod channel;
pub mod cli;
pub mod config;
pub mod constants;
pub mod driver;
pub mod extract;
pub mod logging;
pub mod mappers;
pub mod models;
pub mod normalize;
pub mod output;

pub use channel::{CaptureChannel, CommandChannel, ProcessChannel};
pub use driver::FtosDriver;
pub use extract::{RecordExtractor, Template, TemplateExtractor};
pub use models::{DeviceSnapshot, DriverError, Report, ReportKind};

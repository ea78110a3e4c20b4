//! Snapshot assembler
//!
//! `FtosDriver` sends commands through a `CommandChannel`, turns the output
//! into records with a `RecordExtractor` and hands the records to the
//! mappers. Every operation runs its commands one after another; nothing is
//! cached between calls.

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::channel::CommandChannel;
use crate::config::CommandSet;
use crate::constants::LLDP_INTERFACE_DETAIL_COMMAND;
use crate::extract::{FlatRecord, RecordExtractor, Template};
use crate::mappers::{
    lldp_neighbors_summary, map_environment, map_facts, map_interfaces, map_lldp_neighbors_detail,
    map_mac_address_table,
};
use crate::models::{
    ChannelError, ConfigRetrieve, DeviceConfig, DeviceSnapshot, DriverError, Environment, Facts, Interfaces,
    LldpNeighbors, LldpNeighborsDetail, MacEntry, Report, ReportKind,
};

/// Driver for Dell FTOS switches
pub struct FtosDriver<C, E> {
    channel: C,
    extractor: E,
    commands: CommandSet,
    strict: bool,
}

impl<C: CommandChannel, E: RecordExtractor> FtosDriver<C, E> {
    /// Driver with the default command set, in strict mode
    pub fn new(channel: C, extractor: E) -> Self {
        Self {
            channel,
            extractor,
            commands: CommandSet::default(),
            strict: true,
        }
    }

    pub fn with_commands(mut self, commands: CommandSet) -> Self {
        self.commands = commands;
        self
    }

    /// In lenient mode malformed records are logged and skipped instead of
    /// failing the whole report
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.strict = !lenient;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn into_channel(self) -> C {
        self.channel
    }

    fn run(&mut self, candidates: &[String]) -> Result<String, DriverError> {
        Ok(self.channel.execute_first_valid(candidates)?)
    }

    fn records(&mut self, template: Template, candidates: &[String]) -> Result<Vec<FlatRecord>, DriverError> {
        let raw = self.run(candidates)?;
        Ok(self.extractor.extract(template, &raw)?)
    }

    pub fn get_interfaces(&mut self) -> Result<Interfaces, DriverError> {
        let candidates = self.commands.interfaces.clone();
        let records = self.records(Template::Interfaces, &candidates)?;
        map_interfaces(&records).finish(ReportKind::Interfaces, self.strict)
    }

    /// Text of an optional fetch. A refused command leaves the dependent
    /// fields at their defaults; transport failures still propagate.
    fn optional_text(&mut self, candidates: &[String], what: &str) -> Result<String, DriverError> {
        match self.channel.execute_first_valid(candidates) {
            Ok(text) => Ok(text),
            Err(ChannelError::Rejected { command, output }) => {
                log::warn!("{} unavailable, device rejected '{}': {}", what, command, output);
                Ok(String::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn system_text(&mut self) -> Result<String, DriverError> {
        let candidates = self.commands.facts.clone();
        self.optional_text(&candidates, "system inventory")
    }

    fn facts_from(&mut self, show_system: &str, interfaces: &Interfaces) -> Result<Facts, DriverError> {
        let candidates = self.commands.running_config.clone();
        let running_config = self.optional_text(&candidates, "running configuration")?;
        Ok(map_facts(show_system, &running_config, interfaces.keys().cloned()))
    }

    /// Inventory facts. Also fetches the interfaces and the running
    /// configuration, which supply the interface list and hostname.
    pub fn get_facts(&mut self) -> Result<Facts, DriverError> {
        let show_system = self.system_text()?;
        let interfaces = self.get_interfaces()?;
        self.facts_from(&show_system, &interfaces)
    }

    pub fn get_environment(&mut self) -> Result<Environment, DriverError> {
        let commands = self.commands.clone();
        let sensors = self.records(Template::EnvironmentStackUnit, &commands.environment)?;
        let cpu = self.records(Template::ProcessesCpuSummary, &commands.cpu)?;
        let memory = self.records(Template::Memory, &commands.memory)?;
        map_environment(&sensors, &cpu, &memory).finish(ReportKind::Environment, self.strict)
    }

    fn lldp_detail(&mut self, report: ReportKind, interface: Option<&str>) -> Result<LldpNeighborsDetail, DriverError> {
        let interface = interface.map(str::trim).filter(|name| !name.is_empty());
        let candidates = match interface {
            Some(name) => vec![LLDP_INTERFACE_DETAIL_COMMAND.replace("{}", name)],
            None => self.commands.lldp_detail.clone(),
        };
        let records = self.records(Template::LldpNeighborsDetail, &candidates)?;
        map_lldp_neighbors_detail(&records).finish(report, self.strict)
    }

    /// Neighbor details, for every port or only `interface`
    pub fn get_lldp_neighbors_detail(&mut self, interface: Option<&str>) -> Result<LldpNeighborsDetail, DriverError> {
        self.lldp_detail(ReportKind::LldpNeighborsDetail, interface)
    }

    pub fn get_lldp_neighbors(&mut self) -> Result<LldpNeighbors, DriverError> {
        let details = self.lldp_detail(ReportKind::LldpNeighbors, None)?;
        Ok(lldp_neighbors_summary(&details))
    }

    pub fn get_mac_address_table(&mut self) -> Result<Vec<MacEntry>, DriverError> {
        let candidates = self.commands.mac_address_table.clone();
        let records = self.records(Template::MacAddressTable, &candidates)?;
        map_mac_address_table(&records).finish(ReportKind::MacAddressTable, self.strict)
    }

    /// Running and/or startup configuration text. FTOS has no candidate
    /// configuration.
    pub fn get_config(&mut self, retrieve: ConfigRetrieve) -> Result<DeviceConfig, DriverError> {
        let mut config = DeviceConfig::default();
        if retrieve.includes_running() {
            let candidates = self.commands.running_config.clone();
            config.running = self.run(&candidates)?;
        }
        if retrieve.includes_startup() {
            let candidates = self.commands.startup_config.clone();
            config.startup = self.run(&candidates)?;
        }
        Ok(config)
    }

    /// Run one report by kind. `interface` narrows the LLDP detail report and
    /// is ignored by the others.
    pub fn report(&mut self, kind: ReportKind, interface: Option<&str>) -> Result<Report, DriverError> {
        log::debug!("collecting {} report", kind);
        Ok(match kind {
            ReportKind::Facts => Report::Facts(self.get_facts()?),
            ReportKind::Interfaces => Report::Interfaces(self.get_interfaces()?),
            ReportKind::Environment => Report::Environment(self.get_environment()?),
            ReportKind::LldpNeighbors => Report::LldpNeighbors(self.get_lldp_neighbors()?),
            ReportKind::LldpNeighborsDetail => {
                Report::LldpNeighborsDetail(self.get_lldp_neighbors_detail(interface)?)
            }
            ReportKind::MacAddressTable => Report::MacAddressTable(self.get_mac_address_table()?),
            ReportKind::Config => Report::Config(self.get_config(ConfigRetrieve::All)?),
            ReportKind::Snapshot => Report::Snapshot(self.snapshot()?),
        })
    }

    /// Collect facts, interfaces, environment, LLDP neighbors and the MAC
    /// table in one pass. Interfaces are fetched once and shared with facts.
    pub fn snapshot(&mut self) -> Result<DeviceSnapshot, DriverError> {
        let interfaces = self.get_interfaces()?;
        let show_system = self.system_text()?;
        let facts = self.facts_from(&show_system, &interfaces)?;
        let environment = self.get_environment()?;
        let lldp_neighbors = self.get_lldp_neighbors()?;
        let mac_address_table = self.get_mac_address_table()?;

        log::info!(
            "snapshot of {} complete: {} interfaces, {} LLDP ports, {} MAC entries",
            facts.hostname,
            interfaces.len(),
            lldp_neighbors.len(),
            mac_address_table.len()
        );

        Ok(DeviceSnapshot {
            collected_at: timestamp_now(),
            facts,
            interfaces,
            environment,
            lldp_neighbors,
            mac_address_table,
        })
    }
}

fn timestamp_now() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

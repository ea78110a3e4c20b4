//! Environment mapper
//!
//! Merges three reports into one snapshot:
//! - `show environment stack-unit`: temperature and power per unit
//! - `show processes cpu summary`: one-minute CPU usage per unit
//! - `show memory`: memory totals, summed across units

use super::Mapped;
use crate::constants::TEMP_STATUS_NORMAL;
use crate::extract::schema::{decode, CpuRow, EnvironmentRow, MemoryRow};
use crate::extract::{FlatRecord, Template};
use crate::models::{CpuReading, Environment, NormalizeError, PowerReading, TemperatureReading};

/// `"0"` becomes `"Unit 0"`
fn unit_name(raw: &str) -> Result<String, NormalizeError> {
    raw.trim()
        .parse::<u32>()
        .map(|unit| format!("Unit {}", unit))
        .map_err(|e| NormalizeError::malformed("unit", raw, e.to_string()))
}

fn parse_reading(field: &str, raw: &str) -> Result<f64, NormalizeError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| NormalizeError::malformed(field, raw, e.to_string()))?;
    if !value.is_finite() {
        return Err(NormalizeError::malformed(field, raw, "not a finite number"));
    }
    Ok(value)
}

fn parse_bytes(field: &str, raw: &str) -> Result<u64, NormalizeError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| NormalizeError::malformed(field, raw, e.to_string()))
}

fn map_sensor(row: EnvironmentRow) -> Result<(String, TemperatureReading, PowerReading), NormalizeError> {
    let name = unit_name(&row.unit)?;
    let temperature = parse_reading("temperature", &row.temperature)?;
    let abnormal = row.temp_status.trim() != TEMP_STATUS_NORMAL;

    Ok((
        name,
        TemperatureReading {
            temperature,
            is_alert: abnormal,
            is_critical: abnormal,
        },
        PowerReading::with_status(row.volt_status.trim() == "ok"),
    ))
}

fn map_cpu(row: CpuRow) -> Result<(String, CpuReading), NormalizeError> {
    let name = unit_name(&row.unit)?;
    let usage = parse_reading("omin", &row.omin)?;
    Ok((name, CpuReading { usage }))
}

fn map_memory(row: MemoryRow) -> Result<(u64, u64), NormalizeError> {
    Ok((parse_bytes("total", &row.total)?, parse_bytes("used", &row.used)?))
}

/// Map the three environment reports into one snapshot
pub fn map_environment(
    sensors: &[FlatRecord],
    cpu: &[FlatRecord],
    memory: &[FlatRecord],
) -> Mapped<Environment> {
    let mut mapped = Mapped::new(Environment::default());

    for record in sensors {
        match decode::<EnvironmentRow>(Template::EnvironmentStackUnit, record).and_then(map_sensor) {
            Ok((name, temperature, power)) => {
                mapped.value.temperature.insert(name.clone(), temperature);
                mapped.value.power.insert(name, power);
            }
            Err(error) => mapped.reject(error),
        }
    }

    for record in cpu {
        match decode::<CpuRow>(Template::ProcessesCpuSummary, record).and_then(map_cpu) {
            Ok((name, reading)) => {
                mapped.value.cpu.insert(name, reading);
            }
            Err(error) => mapped.reject(error),
        }
    }

    for record in memory {
        match decode::<MemoryRow>(Template::Memory, record).and_then(map_memory) {
            Ok((total, used)) => {
                let totals = &mut mapped.value.memory;
                totals.available_ram = totals.available_ram.saturating_add(total);
                totals.used_ram = totals.used_ram.saturating_add(used);
            }
            Err(error) => mapped.reject(error),
        }
    }

    mapped
}

//! Name and unit normalization
//!
//! Handles:
//! - Elapsed-time strings in both FTOS grammars (see [`duration`])
//! - Canonical interface names (see [`interface`])
//! - Line speed tokens converted to Mbit/s
//! - Status tokens converted to booleans

pub mod duration;
pub mod interface;

pub use duration::{parse_duration, DurationForm};
pub use interface::canonical_interface_name;

use crate::models::NormalizeError;

const LINE_SPEED_FIELD: &str = "line_speed";

/// Convert `"<n> Mbit"` or `"<n> Gbit"` into Mbit/s
pub fn parse_speed(raw: &str) -> Result<u64, NormalizeError> {
    let mut tokens = raw.split_whitespace();
    let (value, unit) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(value), Some(unit), None) => (value, unit),
        (None, _, _) => {
            return Err(NormalizeError::malformed(LINE_SPEED_FIELD, raw, "empty speed"))
        }
        (Some(_), None, _) => {
            return Err(NormalizeError::malformed(LINE_SPEED_FIELD, raw, "missing unit"))
        }
        (Some(_), Some(_), Some(_)) => {
            return Err(NormalizeError::malformed(
                LINE_SPEED_FIELD,
                raw,
                "expected '<number> <unit>'",
            ))
        }
    };

    let multiplier = match unit {
        "Mbit" => 1,
        "Gbit" => 1000,
        other => {
            return Err(NormalizeError::UnsupportedUnit {
                field: LINE_SPEED_FIELD.to_string(),
                value: raw.to_string(),
                unit: other.to_string(),
            })
        }
    };

    let number = value
        .parse::<u64>()
        .map_err(|e| NormalizeError::malformed(LINE_SPEED_FIELD, raw, e.to_string()))?;

    number
        .checked_mul(multiplier)
        .ok_or_else(|| NormalizeError::malformed(LINE_SPEED_FIELD, raw, "speed overflows"))
}

/// Admin/oper status tokens are up exactly when they read "up"
pub fn is_up(status: &str) -> bool {
    status == "up"
}

//! Elapsed-time parsing for FTOS reports
//!
//! FTOS prints durations in two grammars:
//! - long form, used by `show system`: `32 week(s), 6 day(s), 10 hour(s), 39 minute(s)`
//!   or abbreviated `32 wk, 6 day, 10 hr, 39 min`
//! - short form, used in interface and LLDP counters: `hh:mm:ss` until a day
//!   has passed, then compact tokens such as `1d22h23m` or `20w4d21h`
//!
//! Both collapse to whole seconds. Anything unrecognized counts as zero.

use regex::Regex;
use std::sync::OnceLock;

use crate::constants::{DAY_SECONDS, HOUR_SECONDS, MINUTE_SECONDS, WEEK_SECONDS, YEAR_SECONDS};

/// Which grammar a duration string is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationForm {
    Long,
    Short,
}

/// Duration broken into the units FTOS prints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DurationParts {
    years: u64,
    weeks: u64,
    days: u64,
    hours: u64,
    minutes: u64,
    seconds: u64,
}

impl DurationParts {
    fn total_seconds(&self) -> u64 {
        [
            (self.years, YEAR_SECONDS),
            (self.weeks, WEEK_SECONDS),
            (self.days, DAY_SECONDS),
            (self.hours, HOUR_SECONDS),
            (self.minutes, MINUTE_SECONDS),
            (self.seconds, 1),
        ]
        .iter()
        .fold(0u64, |total, (count, unit)| {
            total.saturating_add(count.saturating_mul(*unit))
        })
    }
}

/// Parse a device-formatted duration into seconds
pub fn parse_duration(text: &str, form: DurationForm) -> u64 {
    let text = text.trim();
    let parts = match form {
        DurationForm::Long => parse_long(text),
        DurationForm::Short => parse_short(text),
    };
    parts.total_seconds()
}

/// `32 week(s), 6 day(s), 10 hour(s), 39 minute(s)`
fn parse_long(text: &str) -> DurationParts {
    let mut parts = DurationParts::default();

    for clause in text.split(", ") {
        // A clause with an unreadable count contributes nothing
        let count = clause
            .split_whitespace()
            .next()
            .and_then(|token| token.parse::<u64>().ok())
            .unwrap_or(0);

        if clause.contains("year") {
            parts.years = count;
        } else if clause.contains("week") || clause.contains("wk") {
            parts.weeks = count;
        } else if clause.contains("day") {
            parts.days = count;
        } else if clause.contains("hour") || clause.contains("hr") {
            parts.hours = count;
        } else if clause.contains("min") {
            parts.minutes = count;
        }
    }

    parts
}

fn clock_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+):(\d+):(\d+)$").expect("clock pattern is valid"))
}

fn compact_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:(\d+)y)?(?:(\d+)w)?(?:(\d+)d)?(?:(\d+)h)?(?:(\d+)m)?")
            .expect("compact duration pattern is valid")
    })
}

/// `01:02:03` or `1y20w4d21h3m`
fn parse_short(text: &str) -> DurationParts {
    let number = |caps: &regex::Captures<'_>, idx: usize| -> u64 {
        caps.get(idx)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };

    if let Some(caps) = clock_pattern().captures(text) {
        return DurationParts {
            hours: number(&caps, 1),
            minutes: number(&caps, 2),
            seconds: number(&caps, 3),
            ..DurationParts::default()
        };
    }

    match compact_pattern().captures(text) {
        Some(caps) => DurationParts {
            years: number(&caps, 1),
            weeks: number(&caps, 2),
            days: number(&caps, 3),
            hours: number(&caps, 4),
            minutes: number(&caps, 5),
            seconds: 0,
        },
        None => DurationParts::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_form_full_unit_names() {
        let seconds = parse_duration(
            "32 week(s), 6 day(s), 10 hour(s), 39 minute(s)",
            DurationForm::Long,
        );
        assert_eq!(seconds, 32 * 604_800 + 6 * 86_400 + 10 * 3_600 + 39 * 60);
        assert_eq!(seconds, 19_910_340);
    }

    #[test]
    fn test_long_form_abbreviated_units() {
        assert_eq!(
            parse_duration("32 wk, 6 day, 10 hr, 39 min", DurationForm::Long),
            19_910_340
        );
    }

    #[test]
    fn test_long_form_any_order_and_subset() {
        assert_eq!(
            parse_duration("39 minute(s), 1 year(s)", DurationForm::Long),
            31_536_000 + 39 * 60
        );
        assert_eq!(parse_duration("2 day(s)", DurationForm::Long), 172_800);
    }

    #[test]
    fn test_long_form_uses_365_day_years() {
        assert_eq!(parse_duration("1 year(s)", DurationForm::Long), 365 * 86_400);
    }

    #[test]
    fn test_long_form_surrounding_whitespace() {
        assert_eq!(parse_duration("  5 minute(s)\r\n", DurationForm::Long), 300);
    }

    #[test]
    fn test_long_form_unreadable_count_contributes_zero() {
        assert_eq!(
            parse_duration("many week(s), 3 hour(s)", DurationForm::Long),
            3 * 3_600
        );
    }

    #[test]
    fn test_short_form_compact_tokens() {
        assert_eq!(parse_duration("1d22h23m", DurationForm::Short), 165_180);
        assert_eq!(
            parse_duration("20w4d21h", DurationForm::Short),
            20 * 604_800 + 4 * 86_400 + 21 * 3_600
        );
        assert_eq!(
            parse_duration("1y2w", DurationForm::Short),
            31_536_000 + 2 * 604_800
        );
    }

    #[test]
    fn test_short_form_clock() {
        assert_eq!(parse_duration("01:02:03", DurationForm::Short), 3_723);
        assert_eq!(parse_duration("00:00:59", DurationForm::Short), 59);
    }

    #[test]
    fn test_empty_and_unrecognized_input_is_zero() {
        for form in [DurationForm::Long, DurationForm::Short] {
            assert_eq!(parse_duration("", form), 0);
            assert_eq!(parse_duration("   ", form), 0);
            assert_eq!(parse_duration("never", form), 0);
        }
        // Clock syntax is meaningless in long form
        assert_eq!(parse_duration("01:02:03", DurationForm::Long), 0);
    }

    #[test]
    fn test_huge_counts_saturate() {
        assert_eq!(
            parse_duration("99999999999999999 year(s)", DurationForm::Long),
            u64::MAX
        );
    }
}

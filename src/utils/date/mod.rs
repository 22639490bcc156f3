// Date utility functions

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;

/// Parses an RFC 3339 timestamp. The offset is mandatory so the instant is
/// unambiguous regardless of the host's local zone.
pub fn parse_target_instant(value: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value.trim())
        .with_context(|| format!("invalid event timestamp '{value}' (expected RFC 3339 with offset)"))
}

/// Formats `instant` in the named IANA zone, or in its own offset when no
/// zone is given or the name is unknown.
pub fn format_in_zone(instant: DateTime<FixedOffset>, zone: Option<&str>) -> String {
    const FORMAT: &str = "%a %d %b %Y %H:%M %Z";

    match zone.map(str::parse::<Tz>) {
        Some(Ok(tz)) => instant.with_timezone(&tz).format(FORMAT).to_string(),
        Some(Err(err)) => {
            log::warn!("Unknown display timezone: {err}");
            instant.format(FORMAT).to_string()
        }
        None => instant.format(FORMAT).to_string(),
    }
}

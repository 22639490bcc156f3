// Settings module
// Countdown configuration loaded from countdown.toml

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Longest event span accepted, one leap year.
pub const MAX_EVENT_DURATION_HOURS: u32 = 366 * 24;

/// Width cutoff and the ring radius used at or below it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakpointSettings {
    pub max_width: u32,
    pub radius: f64,
}

/// How the terminal host prints each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownSettings {
    /// Event start as RFC 3339 with a fixed UTC offset
    pub target: String,
    pub event_duration_hours: u32,
    pub tick_interval_ms: u64,
    /// Ascending by `max_width`
    pub breakpoints: Vec<BreakpointSettings>,
    pub default_radius: f64,
    pub event_title: String,
    pub live_message: String,
    pub ended_message: String,
    /// IANA zone used when printing the target, e.g. "Asia/Kolkata"
    pub display_timezone: Option<String>,
    pub viewport_width: u32,
    pub notifications: bool,
    pub output: OutputFormat,
}

impl Default for CountdownSettings {
    fn default() -> Self {
        Self {
            target: "2025-09-13T08:00:00+05:30".to_string(),
            event_duration_hours: 12,
            tick_interval_ms: 1000,
            breakpoints: vec![
                BreakpointSettings {
                    max_width: 480,
                    radius: 34.0,
                },
                BreakpointSettings {
                    max_width: 768,
                    radius: 44.0,
                },
            ],
            default_radius: 54.0,
            event_title: "Community Day".to_string(),
            live_message: "The event is happening now!".to_string(),
            ended_message: "Thank you for joining!".to_string(),
            display_timezone: None,
            viewport_width: 1280,
            notifications: true,
            output: OutputFormat::Text,
        }
    }
}

impl CountdownSettings {
    pub fn validate(&self) -> Result<()> {
        if self.event_duration_hours == 0 {
            bail!("event_duration_hours must be greater than zero");
        }
        if self.event_duration_hours > MAX_EVENT_DURATION_HOURS {
            bail!(
                "event_duration_hours must be at most {} (got {})",
                MAX_EVENT_DURATION_HOURS,
                self.event_duration_hours
            );
        }
        if self.tick_interval_ms == 0 {
            bail!("tick_interval_ms must be greater than zero");
        }
        if !(self.default_radius.is_finite() && self.default_radius > 0.0) {
            bail!("default_radius must be a positive number");
        }
        if self.breakpoints.is_empty() {
            bail!("at least one breakpoint is required");
        }
        for bp in &self.breakpoints {
            if !(bp.radius.is_finite() && bp.radius > 0.0) {
                bail!("breakpoint at {}px has a non-positive radius", bp.max_width);
            }
        }
        if self
            .breakpoints
            .windows(2)
            .any(|pair| pair[0].max_width >= pair[1].max_width)
        {
            bail!("breakpoints must be strictly ascending by max_width");
        }
        Ok(())
    }
}

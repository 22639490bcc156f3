//! Terminal page for the countdown binary.
//!
//! Buffers the slot writes of one tick and prints them as a single line on
//! `flush`, either as text or as a JSON object per line.

use std::io::Write;

use serde::Serialize;

use crate::models::countdown::{LifecycleState, TimeUnit};
use crate::models::settings::OutputFormat;
use crate::services::countdown::{CountdownError, RenderTarget, RingStroke, Slot};

const HEARTBEAT: [char; 2] = ['●', '○'];

#[derive(Debug, Clone, Default, Serialize)]
struct TerminalFrame {
    days: String,
    hours: String,
    minutes: String,
    seconds: String,
    /// Fill of each ring in percent, days to seconds
    progress: [u8; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    state: Option<LifecycleState>,
}

/// One-off announcement printed between frames.
#[derive(Debug, Serialize)]
struct TerminalEvent<'a> {
    event: &'static str,
    title: &'a str,
}

pub struct TerminalRenderTarget<W: Write> {
    out: W,
    format: OutputFormat,
    title: String,
    frame: TerminalFrame,
    beat: usize,
}

impl<W: Write> TerminalRenderTarget<W> {
    pub fn new(out: W, format: OutputFormat, title: impl Into<String>) -> Self {
        Self {
            out,
            format,
            title: title.into(),
            frame: TerminalFrame::default(),
            beat: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn text_line(&self) -> String {
        let f = &self.frame;
        match (&f.message, f.state) {
            (Some(message), Some(state)) if state.is_terminal() => {
                format!("{}  {}", self.title, message)
            }
            _ => format!(
                "{}  {}d {}h {}m {}s {}",
                self.title,
                f.days,
                f.hours,
                f.minutes,
                f.seconds,
                HEARTBEAT[self.beat % HEARTBEAT.len()]
            ),
        }
    }

    fn emit(&mut self, line: &str) -> Result<(), CountdownError> {
        writeln!(self.out, "{line}")
            .and_then(|_| self.out.flush())
            .map_err(|e| CountdownError::TransientRender(format!("terminal write failed: {e}")))
    }
}

fn unit_index(unit: TimeUnit) -> usize {
    match unit {
        TimeUnit::Days => 0,
        TimeUnit::Hours => 1,
        TimeUnit::Minutes => 2,
        TimeUnit::Seconds => 3,
    }
}

impl<W: Write> RenderTarget for TerminalRenderTarget<W> {
    fn has_slot(&self, _slot: Slot) -> bool {
        true
    }

    fn set_text(&mut self, unit: TimeUnit, text: &str) -> Result<(), CountdownError> {
        let field = match unit {
            TimeUnit::Days => &mut self.frame.days,
            TimeUnit::Hours => &mut self.frame.hours,
            TimeUnit::Minutes => &mut self.frame.minutes,
            TimeUnit::Seconds => &mut self.frame.seconds,
        };
        text.clone_into(field);
        Ok(())
    }

    fn set_progress(&mut self, unit: TimeUnit, stroke: RingStroke) -> Result<(), CountdownError> {
        if stroke.dash_array <= 0.0 {
            return Err(CountdownError::TransientRender(format!(
                "ring {} has no circumference",
                unit.name()
            )));
        }
        let filled = 1.0 - stroke.dash_offset / stroke.dash_array;
        self.frame.progress[unit_index(unit)] = (filled.clamp(0.0, 1.0) * 100.0).round() as u8;
        Ok(())
    }

    fn set_message(&mut self, message: &str) -> Result<(), CountdownError> {
        self.frame.message = Some(message.to_string());
        Ok(())
    }

    fn set_container_state(&mut self, state: LifecycleState) -> Result<(), CountdownError> {
        self.frame.state = Some(state);
        Ok(())
    }

    fn pulse(&mut self, _unit: TimeUnit) {
        self.beat = self.beat.wrapping_add(1);
    }

    fn celebrate(&mut self) {
        let banner = match self.format {
            OutputFormat::Text => format!("*** {} is live! ***", self.title),
            OutputFormat::Json => {
                let event = TerminalEvent {
                    event: "live",
                    title: &self.title,
                };
                match serde_json::to_string(&event) {
                    Ok(line) => line,
                    Err(err) => {
                        log::warn!("Could not encode live event: {err}");
                        return;
                    }
                }
            }
        };
        if let Err(err) = self.emit(&banner) {
            log::warn!("{err}");
        }
    }

    fn flush(&mut self) -> Result<(), CountdownError> {
        let line = match self.format {
            OutputFormat::Text => self.text_line(),
            OutputFormat::Json => serde_json::to_string(&self.frame)
                .map_err(|e| CountdownError::FatalInternal(format!("frame encoding failed: {e}")))?,
        };
        self.emit(&line)
    }
}

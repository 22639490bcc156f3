//! Output slots the countdown writes into.
//!
//! The embedding page owns the slots; the controller only writes to them.
//! Any slot may be missing, in which case writes report
//! [`CountdownError::MissingRenderTarget`] and the controller skips them.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::CountdownError;
use super::layout::RingStroke;
use crate::models::countdown::{LifecycleState, TimeUnit};

/// Identifies one output slot on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Text(TimeUnit),
    Progress(TimeUnit),
    Message,
    Container,
}

impl Slot {
    /// Every slot a full countdown block provides.
    pub fn all() -> Vec<Slot> {
        let mut slots = Vec::with_capacity(10);
        slots.extend(TimeUnit::ALL.iter().map(|unit| Slot::Text(*unit)));
        slots.extend(TimeUnit::ALL.iter().map(|unit| Slot::Progress(*unit)));
        slots.push(Slot::Message);
        slots.push(Slot::Container);
        slots
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Text(unit) => write!(f, "{}", unit.name()),
            Slot::Progress(unit) => write!(f, "{}-progress", unit.name()),
            Slot::Message => write!(f, "countdown-message"),
            Slot::Container => write!(f, "countdown"),
        }
    }
}

pub trait RenderTarget {
    fn has_slot(&self, slot: Slot) -> bool;

    fn set_text(&mut self, unit: TimeUnit, text: &str) -> Result<(), CountdownError>;

    fn set_progress(&mut self, unit: TimeUnit, stroke: RingStroke) -> Result<(), CountdownError>;

    fn set_message(&mut self, message: &str) -> Result<(), CountdownError>;

    fn set_container_state(&mut self, state: LifecycleState) -> Result<(), CountdownError>;

    /// Heartbeat on a field, once per pending tick.
    fn pulse(&mut self, _unit: TimeUnit) {}

    /// Called once when the event goes live.
    fn celebrate(&mut self) {}

    /// Called after a tick has written all of its fields.
    fn flush(&mut self) -> Result<(), CountdownError> {
        Ok(())
    }
}

/// Last values written to a [`MemoryRenderTarget`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub days: Option<String>,
    pub hours: Option<String>,
    pub minutes: Option<String>,
    pub seconds: Option<String>,
    pub progress: HashMap<TimeUnit, RingStroke>,
    pub message: Option<String>,
    pub container_class: Option<String>,
}

impl RenderSnapshot {
    pub fn text(&self, unit: TimeUnit) -> Option<&str> {
        match unit {
            TimeUnit::Days => self.days.as_deref(),
            TimeUnit::Hours => self.hours.as_deref(),
            TimeUnit::Minutes => self.minutes.as_deref(),
            TimeUnit::Seconds => self.seconds.as_deref(),
        }
    }

    fn text_mut(&mut self, unit: TimeUnit) -> &mut Option<String> {
        match unit {
            TimeUnit::Days => &mut self.days,
            TimeUnit::Hours => &mut self.hours,
            TimeUnit::Minutes => &mut self.minutes,
            TimeUnit::Seconds => &mut self.seconds,
        }
    }
}

/// In-memory page with a configurable set of slots.
#[derive(Debug, Clone)]
pub struct MemoryRenderTarget {
    slots: HashSet<Slot>,
    snapshot: RenderSnapshot,
    pulses: u64,
    celebrations: u64,
    flushes: u64,
}

impl Default for MemoryRenderTarget {
    fn default() -> Self {
        Self::full()
    }
}

impl MemoryRenderTarget {
    /// Page with every countdown slot present.
    pub fn full() -> Self {
        Self::with_slots(Slot::all())
    }

    pub fn with_slots(slots: impl IntoIterator<Item = Slot>) -> Self {
        Self {
            slots: slots.into_iter().collect(),
            snapshot: RenderSnapshot::default(),
            pulses: 0,
            celebrations: 0,
            flushes: 0,
        }
    }

    /// Page variant without a countdown block.
    pub fn empty() -> Self {
        Self::with_slots(std::iter::empty())
    }

    pub fn without(mut self, slot: Slot) -> Self {
        self.slots.remove(&slot);
        self
    }

    pub fn snapshot(&self) -> &RenderSnapshot {
        &self.snapshot
    }

    pub fn pulses(&self) -> u64 {
        self.pulses
    }

    pub fn celebrations(&self) -> u64 {
        self.celebrations
    }

    pub fn flushes(&self) -> u64 {
        self.flushes
    }

    fn require(&self, slot: Slot) -> Result<(), CountdownError> {
        if self.slots.contains(&slot) {
            Ok(())
        } else {
            Err(CountdownError::MissingRenderTarget(slot))
        }
    }
}

impl RenderTarget for MemoryRenderTarget {
    fn has_slot(&self, slot: Slot) -> bool {
        self.slots.contains(&slot)
    }

    fn set_text(&mut self, unit: TimeUnit, text: &str) -> Result<(), CountdownError> {
        self.require(Slot::Text(unit))?;
        *self.snapshot.text_mut(unit) = Some(text.to_string());
        Ok(())
    }

    fn set_progress(&mut self, unit: TimeUnit, stroke: RingStroke) -> Result<(), CountdownError> {
        self.require(Slot::Progress(unit))?;
        self.snapshot.progress.insert(unit, stroke);
        Ok(())
    }

    fn set_message(&mut self, message: &str) -> Result<(), CountdownError> {
        self.require(Slot::Message)?;
        self.snapshot.message = Some(message.to_string());
        Ok(())
    }

    fn set_container_state(&mut self, state: LifecycleState) -> Result<(), CountdownError> {
        self.require(Slot::Container)?;
        self.snapshot.container_class = state.css_class().map(str::to_string);
        Ok(())
    }

    fn pulse(&mut self, unit: TimeUnit) {
        if self.slots.contains(&Slot::Text(unit)) {
            self.pulses += 1;
        }
    }

    fn celebrate(&mut self) {
        self.celebrations += 1;
    }

    fn flush(&mut self) -> Result<(), CountdownError> {
        self.flushes += 1;
        Ok(())
    }
}

use anyhow::Result;
use notify_rust::{Notification, Timeout};

use crate::models::countdown::LifecycleState;
use crate::services::countdown::Transition;

/// Service for displaying desktop notifications on lifecycle changes
pub struct NotificationService {
    enabled: bool,
}

impl NotificationService {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Announces a transition. Errors are logged and swallowed; a missing
    /// notification daemon must not stop the countdown.
    pub fn notify_transition(&self, event_title: &str, transition: Transition, message: &str) {
        let Some(urgency) = NotificationUrgency::for_state(transition.to) else {
            return;
        };
        if let Err(err) = self.show(event_title, message, urgency) {
            log::warn!("Failed to show lifecycle notification: {err:#}");
        }
    }

    fn show(&self, event_title: &str, message: &str, urgency: NotificationUrgency) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let timeout = match urgency {
            NotificationUrgency::Normal => Timeout::Milliseconds(5000),
            NotificationUrgency::Critical => Timeout::Milliseconds(10000),
        };

        Notification::new()
            .summary(event_title)
            .body(message)
            .timeout(timeout)
            .show()
            .map_err(|e| anyhow::anyhow!("Failed to show notification: {}", e))?;

        Ok(())
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Notification urgency level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationUrgency {
    Normal,
    Critical,
}

impl NotificationUrgency {
    /// Going live is the one that matters; the end is informational.
    pub fn for_state(state: LifecycleState) -> Option<Self> {
        match state {
            LifecycleState::Pending => None,
            LifecycleState::Live => Some(Self::Critical),
            LifecycleState::Ended => Some(Self::Normal),
        }
    }
}

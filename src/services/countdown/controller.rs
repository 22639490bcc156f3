use anyhow::Result;
use chrono::{DateTime, Duration, FixedOffset};

use super::clock::Clock;
use super::error::CountdownError;
use super::layout::{progress_ratio, reset_stroke, stroke_for, ResponsiveLayout};
use super::render::{RenderTarget, Slot};
use super::scheduler::{Scheduler, TimerHandle, TimerId};
use crate::models::countdown::{
    format_unit, LifecycleState, RemainingDuration, TargetInstant, TimeUnit,
};
use crate::models::settings::CountdownSettings;
use crate::utils::date::parse_target_instant;

/// Fixed parameters of one countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct CountdownConfig {
    pub target: TargetInstant,
    pub event_duration: Duration,
    pub tick_interval: std::time::Duration,
    pub live_message: String,
    pub ended_message: String,
    pub layout: ResponsiveLayout,
}

impl CountdownConfig {
    pub fn new(target: DateTime<FixedOffset>, event_duration: Duration) -> Self {
        let defaults = CountdownSettings::default();
        Self {
            target: TargetInstant::new(target),
            event_duration,
            tick_interval: std::time::Duration::from_millis(defaults.tick_interval_ms),
            live_message: defaults.live_message,
            ended_message: defaults.ended_message,
            layout: ResponsiveLayout::default(),
        }
    }

    pub fn from_settings(settings: &CountdownSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            target: TargetInstant::new(parse_target_instant(&settings.target)?),
            event_duration: Duration::hours(i64::from(settings.event_duration_hours)),
            tick_interval: std::time::Duration::from_millis(settings.tick_interval_ms),
            live_message: settings.live_message.clone(),
            ended_message: settings.ended_message.clone(),
            layout: ResponsiveLayout::from_settings(settings),
        })
    }

    fn message_for(&self, state: LifecycleState) -> Option<&str> {
        match state {
            LifecycleState::Pending => None,
            LifecycleState::Live => Some(&self.live_message),
            LifecycleState::Ended => Some(&self.ended_message),
        }
    }
}

/// Result of one tick, for hosts that care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Controller has no countdown block or was destroyed
    Inert,
    Rendered(LifecycleState),
    /// A transient failure cut the tick short; the next tick retries
    Degraded(LifecycleState),
    /// A fatal failure destroyed the controller during this tick
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: LifecycleState,
    pub to: LifecycleState,
}

/// Drives one countdown block: computes time left, writes it to the page
/// and walks the Pending -> Live -> Ended lifecycle.
pub struct CountdownController<C: Clock, R: RenderTarget> {
    config: CountdownConfig,
    clock: C,
    render: R,
    state: LifecycleState,
    remaining: RemainingDuration,
    circumference: f64,
    bucket: usize,
    timer: Option<TimerHandle>,
    inert: bool,
    celebrated: bool,
    pending_transition: Option<Transition>,
}

impl<C: Clock, R: RenderTarget> CountdownController<C, R> {
    pub fn new(config: CountdownConfig, clock: C, render: R, viewport_width: u32) -> Self {
        let bucket = config.layout.bucket_for(viewport_width);
        let circumference = config.layout.circumference_for(viewport_width);
        let inert = !render.has_slot(Slot::Text(TimeUnit::Days));

        let mut controller = Self {
            config,
            clock,
            render,
            state: LifecycleState::Pending,
            remaining: RemainingDuration::zero(),
            circumference,
            bucket,
            timer: None,
            inert,
            celebrated: false,
            pending_transition: None,
        };

        if controller.inert {
            log::debug!("No countdown block on this page; controller stays inert");
        } else {
            let result = controller.reset_rings();
            controller.guard(result);
        }
        controller
    }

    /// Ticks once immediately, then registers the periodic timer.
    /// Returns the timer id, or `None` if the controller is inert.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) -> Option<TimerId> {
        if self.inert {
            return None;
        }
        if let Some(timer) = &self.timer {
            return Some(timer.id());
        }

        self.tick();
        if self.inert {
            return None;
        }

        let handle = scheduler.every(self.config.tick_interval);
        let id = handle.id();
        self.timer = Some(handle);
        log::info!(
            "Countdown started towards {} (timer {:?})",
            self.config.target.at(),
            id
        );
        Some(id)
    }

    /// Recomputes and re-renders. Never returns an error to the caller.
    pub fn tick(&mut self) -> TickOutcome {
        if self.inert {
            return TickOutcome::Inert;
        }
        let result = self.render_tick();
        self.guard(result)
    }

    /// Applies a viewport width change. Returns true if the ring size changed.
    pub fn on_resize(&mut self, viewport_width: u32) -> bool {
        if self.inert {
            return false;
        }
        let bucket = self.config.layout.bucket_for(viewport_width);
        if bucket == self.bucket {
            return false;
        }

        self.bucket = bucket;
        self.circumference = self.config.layout.circumference_for(viewport_width);
        log::debug!(
            "Viewport {}px: ring circumference now {:.2}",
            viewport_width,
            self.circumference
        );

        let result = self.reset_rings().and_then(|_| {
            if self.state == LifecycleState::Pending && !self.remaining.is_zero() {
                let remaining = self.remaining;
                self.update_rings(&remaining)
            } else if self.state.is_terminal() {
                self.update_rings(&RemainingDuration::zero())
            } else {
                Ok(())
            }
        });
        self.guard(result);
        true
    }

    /// Cancels the timer and makes every later tick a no-op. Idempotent.
    pub fn destroy(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        if !self.inert {
            log::info!("Countdown controller destroyed");
            self.inert = true;
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn remaining(&self) -> RemainingDuration {
        self.remaining
    }

    pub fn is_inert(&self) -> bool {
        self.inert
    }

    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(TimerHandle::is_active)
    }

    pub fn timer_id(&self) -> Option<TimerId> {
        self.timer.as_ref().map(TimerHandle::id)
    }

    pub fn circumference(&self) -> f64 {
        self.circumference
    }

    pub fn config(&self) -> &CountdownConfig {
        &self.config
    }

    pub fn render_target(&self) -> &R {
        &self.render
    }

    pub fn render_target_mut(&mut self) -> &mut R {
        &mut self.render
    }

    /// Tears the controller down and hands back the clock and page slots.
    pub fn into_parts(mut self) -> (C, R) {
        self.destroy();
        let Self { clock, render, .. } = self;
        (clock, render)
    }

    /// The most recent lifecycle transition not yet collected by the host.
    pub fn take_transition(&mut self) -> Option<Transition> {
        self.pending_transition.take()
    }

    fn render_tick(&mut self) -> Result<(), CountdownError> {
        let now = self.clock.now()?;
        let target = self.config.target;
        let delta = target.timestamp_millis() - now.timestamp_millis();

        let observed = LifecycleState::at(&target.at(), self.config.event_duration, &now);
        let next = self.state.advance(observed);
        if next != self.state {
            log::info!("Countdown lifecycle {:?} -> {:?}", self.state, next);
            self.pending_transition = Some(Transition {
                from: self.state,
                to: next,
            });
            self.state = next;
        }

        if self.state == LifecycleState::Pending && delta > 0 {
            self.remaining = RemainingDuration::from_millis(delta);
            let remaining = self.remaining;
            self.write_fields(&remaining)?;
            self.render.pulse(TimeUnit::Seconds);
            self.update_rings(&remaining)?;
        } else {
            self.render_terminal()?;
        }

        self.write(|render| render.flush())
    }

    fn render_terminal(&mut self) -> Result<(), CountdownError> {
        self.remaining = RemainingDuration::zero();

        if self.state == LifecycleState::Live && !self.celebrated {
            self.celebrated = true;
            self.render.celebrate();
        }

        let state = self.state;
        if let Some(message) = self.config.message_for(state).map(str::to_string) {
            self.write(|render| render.set_message(&message))?;
        }
        self.write(|render| render.set_container_state(state))?;
        self.write_fields(&RemainingDuration::zero())?;
        self.update_rings(&RemainingDuration::zero())
    }

    fn write_fields(&mut self, remaining: &RemainingDuration) -> Result<(), CountdownError> {
        for unit in TimeUnit::ALL {
            let text = format_unit(remaining.get(unit));
            self.write(|render| render.set_text(unit, &text))?;
        }
        Ok(())
    }

    fn update_rings(&mut self, remaining: &RemainingDuration) -> Result<(), CountdownError> {
        let circumference = self.circumference;
        for unit in TimeUnit::ALL {
            let stroke = stroke_for(circumference, progress_ratio(unit, remaining.get(unit)));
            self.write(|render| render.set_progress(unit, stroke))?;
        }
        Ok(())
    }

    fn reset_rings(&mut self) -> Result<(), CountdownError> {
        let stroke = reset_stroke(self.circumference);
        for unit in TimeUnit::ALL {
            self.write(|render| render.set_progress(unit, stroke))?;
        }
        Ok(())
    }

    /// Runs one slot write, treating an absent slot as a skipped write.
    fn write<F>(&mut self, op: F) -> Result<(), CountdownError>
    where
        F: FnOnce(&mut R) -> Result<(), CountdownError>,
    {
        match op(&mut self.render) {
            Err(CountdownError::MissingRenderTarget(slot)) => {
                log::trace!("Skipping write to absent slot {slot}");
                Ok(())
            }
            other => other,
        }
    }

    /// The single error boundary for everything the host calls into.
    fn guard(&mut self, result: Result<(), CountdownError>) -> TickOutcome {
        match result {
            Ok(()) => TickOutcome::Rendered(self.state),
            Err(CountdownError::MissingRenderTarget(slot)) => {
                log::debug!("Render slot {slot} missing");
                TickOutcome::Rendered(self.state)
            }
            Err(err @ CountdownError::TransientRender(_)) => {
                log::warn!("Countdown tick failed, retrying next tick: {err}");
                TickOutcome::Degraded(self.state)
            }
            Err(err @ CountdownError::FatalInternal(_)) => {
                log::error!("Countdown stopped after fatal error: {err}");
                self.destroy();
                TickOutcome::Destroyed
            }
        }
    }
}

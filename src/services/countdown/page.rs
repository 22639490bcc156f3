//! Host-side glue that owns the countdown controller.
//!
//! The page is the one place that creates, restarts and tears down the
//! controller. It reacts to resize and visibility notifications and
//! dispatches scheduler ticks to whichever controller owns the timer.

use std::time::Instant;

use super::clock::Clock;
use super::controller::{CountdownConfig, CountdownController, TickOutcome, Transition};
use super::render::RenderTarget;
use super::scheduler::IntervalScheduler;

pub struct CountdownPage<C: Clock + Clone, R: RenderTarget> {
    config: CountdownConfig,
    clock: C,
    scheduler: IntervalScheduler,
    controller: Option<CountdownController<C, R>>,
    /// Page slots while no controller is alive (hidden page)
    parked: Option<R>,
    viewport_width: u32,
    initialized: bool,
    hidden: bool,
}

impl<C: Clock + Clone, R: RenderTarget> CountdownPage<C, R> {
    pub fn new(config: CountdownConfig, clock: C, render: R, viewport_width: u32) -> Self {
        Self {
            config,
            clock,
            scheduler: IntervalScheduler::default(),
            controller: None,
            parked: Some(render),
            viewport_width,
            initialized: false,
            hidden: false,
        }
    }

    /// Builds and starts the controller. Later calls are no-ops and return false.
    pub fn init(&mut self, now: Instant) -> bool {
        if self.initialized {
            log::debug!("Countdown page already initialised");
            return false;
        }
        self.initialized = true;
        if !self.hidden {
            self.spawn_controller(now);
        }
        true
    }

    pub fn on_resize(&mut self, viewport_width: u32) {
        self.viewport_width = viewport_width;
        if let Some(controller) = self.controller.as_mut() {
            controller.on_resize(viewport_width);
        }
    }

    /// Hidden pages drop their controller; showing the page again builds a
    /// fresh one with its own timer.
    pub fn on_visibility_change(&mut self, hidden: bool, now: Instant) {
        if hidden == self.hidden {
            return;
        }
        self.hidden = hidden;
        if !self.initialized {
            return;
        }

        if hidden {
            log::debug!("Page hidden; stopping countdown");
            self.park_controller();
        } else {
            log::debug!("Page visible; restarting countdown");
            self.spawn_controller(now);
        }
    }

    /// Ticks the controller if its timer is due. Ticks never overlap.
    pub fn run_due(&mut self, now: Instant) -> Vec<TickOutcome> {
        let due = self.scheduler.due(now);
        let Some(controller) = self.controller.as_mut() else {
            return Vec::new();
        };
        let Some(own_timer) = controller.timer_id() else {
            return Vec::new();
        };

        due.into_iter()
            .filter(|id| *id == own_timer)
            .map(|_| controller.tick())
            .collect()
    }

    pub fn next_deadline(&mut self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Destroys the live controller. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        self.park_controller();
    }

    pub fn take_transition(&mut self) -> Option<Transition> {
        self.controller
            .as_mut()
            .and_then(CountdownController::take_transition)
    }

    pub fn controller(&self) -> Option<&CountdownController<C, R>> {
        self.controller.as_ref()
    }

    pub fn render_target(&self) -> Option<&R> {
        self.controller
            .as_ref()
            .map(CountdownController::render_target)
            .or(self.parked.as_ref())
    }

    /// Shuts the page down and returns its slots.
    pub fn into_render_target(mut self) -> Option<R> {
        self.park_controller();
        self.parked.take()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn spawn_controller(&mut self, now: Instant) {
        let Some(render) = self.parked.take() else {
            return;
        };
        self.scheduler.set_origin(now);
        let mut controller = CountdownController::new(
            self.config.clone(),
            self.clock.clone(),
            render,
            self.viewport_width,
        );
        controller.start(&mut self.scheduler);
        self.controller = Some(controller);
    }

    fn park_controller(&mut self) {
        if let Some(controller) = self.controller.take() {
            let (_, render) = controller.into_parts();
            self.parked = Some(render);
        }
    }
}

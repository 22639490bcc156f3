use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use super::error::CountdownError;

/// Wall-clock source for the countdown.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    fn now(&self) -> Result<DateTime<Utc>, CountdownError>;
}

/// Reads the system wall clock. Drift or resync mid-countdown is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<DateTime<Utc>, CountdownError> {
        Ok(Utc::now())
    }
}

/// A clock the host moves by hand. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        if let Ok(mut now) = self.now.lock() {
            *now = at;
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Result<DateTime<Utc>, CountdownError> {
        self.now
            .lock()
            .map(|now| *now)
            .map_err(|_| CountdownError::TransientRender("manual clock lock poisoned".into()))
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Result<DateTime<Utc>, CountdownError> {
        (**self).now()
    }
}

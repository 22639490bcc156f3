// Test fixtures - reusable test data
// Provides consistent targets, clocks and pages across test files

#![allow(dead_code)]

use chrono::{DateTime, Duration, FixedOffset, Utc};
use event_countdown::services::countdown::{
    CountdownConfig, CountdownPage, ManualClock, MemoryRenderTarget,
};

/// Sample instants for testing
pub mod dates {
    use super::*;

    /// Event start: Sep 20, 2025 at 08:00 IST
    pub fn event_start() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-09-20T08:00:00+05:30").unwrap()
    }

    /// Two days before the event start
    pub fn two_days_before() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-09-18T08:00:00+05:30").unwrap()
    }

    pub fn at_offset(offset: Duration) -> DateTime<Utc> {
        (event_start() + offset).with_timezone(&Utc)
    }
}

/// A twelve-hour event starting at [`dates::event_start`]
pub fn twelve_hour_config() -> CountdownConfig {
    CountdownConfig::new(dates::event_start(), Duration::hours(12))
}

/// Page with every slot, clock set `offset` from the event start.
pub fn page_at(offset: Duration) -> (CountdownPage<ManualClock, MemoryRenderTarget>, ManualClock) {
    let clock = ManualClock::new(dates::at_offset(offset));
    let page = CountdownPage::new(
        twelve_hour_config(),
        clock.clone(),
        MemoryRenderTarget::full(),
        1280,
    );
    (page, clock)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_dates_are_consistent() {
        let delta = dates::event_start() - dates::two_days_before();
        assert_eq!(delta, Duration::days(2));
        assert_eq!(dates::at_offset(Duration::zero()), dates::event_start());
    }
}

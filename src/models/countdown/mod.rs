use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};

/// One of the four fields shown by the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 4] = [
        TimeUnit::Days,
        TimeUnit::Hours,
        TimeUnit::Minutes,
        TimeUnit::Seconds,
    ];

    /// Size of one unit in milliseconds.
    pub const fn millis(self) -> i64 {
        match self {
            TimeUnit::Days => 86_400_000,
            TimeUnit::Hours => 3_600_000,
            TimeUnit::Minutes => 60_000,
            TimeUnit::Seconds => 1_000,
        }
    }

    /// Denominator used by the progress ring for this unit.
    ///
    /// Days use a fixed 365-day "year", which is a decorative approximation
    /// rather than a calendar calculation.
    pub const fn progress_max(self) -> u64 {
        match self {
            TimeUnit::Days => 365,
            TimeUnit::Hours => 24,
            TimeUnit::Minutes => 60,
            TimeUnit::Seconds => 60,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TimeUnit::Days => "days",
            TimeUnit::Hours => "hours",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Seconds => "seconds",
        }
    }
}

/// Time left until the target instant, split into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemainingDuration {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl RemainingDuration {
    pub const fn zero() -> Self {
        Self {
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    /// Decomposes a millisecond delta. Each unit is taken from the remainder
    /// of the previous one; sub-second remainders are dropped.
    pub fn from_millis(delta_ms: i64) -> Self {
        if delta_ms <= 0 {
            return Self::zero();
        }

        let days = delta_ms / TimeUnit::Days.millis();
        let rest = delta_ms % TimeUnit::Days.millis();
        let hours = rest / TimeUnit::Hours.millis();
        let rest = rest % TimeUnit::Hours.millis();
        let minutes = rest / TimeUnit::Minutes.millis();
        let rest = rest % TimeUnit::Minutes.millis();
        let seconds = rest / TimeUnit::Seconds.millis();

        Self {
            days: days as u64,
            hours: hours as u8,
            minutes: minutes as u8,
            seconds: seconds as u8,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    pub fn get(&self, unit: TimeUnit) -> u64 {
        match unit {
            TimeUnit::Days => self.days,
            TimeUnit::Hours => u64::from(self.hours),
            TimeUnit::Minutes => u64::from(self.minutes),
            TimeUnit::Seconds => u64::from(self.seconds),
        }
    }

    /// Total whole seconds represented, used for ordering comparisons.
    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400
            + u64::from(self.hours) * 3_600
            + u64::from(self.minutes) * 60
            + u64::from(self.seconds)
    }
}

/// Where the countdown stands relative to the event.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LifecycleState {
    /// Target instant still in the future
    #[default]
    Pending,
    /// Event has started and its configured span has not elapsed
    Live,
    /// Event span is over
    Ended,
}

impl LifecycleState {
    /// State for `now` given the event start and how long it runs.
    ///
    /// An end instant past chrono's representable range never arrives, so
    /// such an event stays Live once started.
    pub fn at<Tz: TimeZone, Tz2: TimeZone>(
        target: &DateTime<Tz>,
        event_duration: Duration,
        now: &DateTime<Tz2>,
    ) -> Self {
        let target = target.with_timezone(&chrono::Utc);
        let now = now.with_timezone(&chrono::Utc);
        if now < target {
            return Self::Pending;
        }
        match target.checked_add_signed(event_duration) {
            Some(end) if now >= end => Self::Ended,
            _ => Self::Live,
        }
    }

    /// Keeps whichever state is further along. States never move backwards.
    pub fn advance(self, next: Self) -> Self {
        self.max(next)
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Class flag the page puts on the countdown container.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Pending => None,
            Self::Live => Some("event-started"),
            Self::Ended => Some("event-ended"),
        }
    }
}

/// The event start, fixed once the countdown is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetInstant(DateTime<FixedOffset>);

impl TargetInstant {
    pub fn new(at: DateTime<FixedOffset>) -> Self {
        Self(at)
    }

    pub fn at(&self) -> DateTime<FixedOffset> {
        self.0
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }
}

impl From<DateTime<FixedOffset>> for TargetInstant {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::new(value)
    }
}

/// Zero-pads a unit value to at least two characters.
pub fn format_unit(value: u64) -> String {
    format!("{value:02}")
}

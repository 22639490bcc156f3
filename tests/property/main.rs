// Property-based tests for countdown arithmetic and lifecycle
// Exercises the controller with random clock positions

use chrono::{DateTime, Duration, FixedOffset, Utc};
use event_countdown::models::countdown::{LifecycleState, RemainingDuration, TimeUnit};
use event_countdown::services::countdown::layout::{circumference, progress_ratio, stroke_for};
use event_countdown::services::countdown::{
    CountdownConfig, CountdownController, ManualClock, MemoryRenderTarget,
};
use proptest::prelude::*;

fn start() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2025-09-20T08:00:00+05:30").unwrap()
}

fn controller_at(
    offset_ms: i64,
) -> (CountdownController<ManualClock, MemoryRenderTarget>, ManualClock) {
    let clock = ManualClock::new((start() + Duration::milliseconds(offset_ms)).with_timezone(&Utc));
    let config = CountdownConfig::new(start(), Duration::hours(12));
    let controller = CountdownController::new(config, clock.clone(), MemoryRenderTarget::full(), 1280);
    (controller, clock)
}

const TWELVE_HOURS_MS: i64 = 12 * 3_600_000;

proptest! {
    /// Property: fields stay within their unit range and recompose to the delta
    #[test]
    fn prop_decomposition_recomposes(delta in 1i64..(5_000i64 * 86_400_000)) {
        let r = RemainingDuration::from_millis(delta);
        prop_assert!(r.hours < 24);
        prop_assert!(r.minutes < 60);
        prop_assert!(r.seconds < 60);
        prop_assert_eq!(r.total_seconds() as i64, delta / 1_000);
    }

    /// Property: before the target the state is Pending and time left strictly shrinks
    #[test]
    fn prop_pending_counts_down(
        before_ms in 2_000i64..(400i64 * 86_400_000),
        step_ms in 1_000i64..60_000,
    ) {
        let (mut controller, clock) = controller_at(-before_ms);
        controller.tick();
        prop_assert_eq!(controller.state(), LifecycleState::Pending);
        let first = controller.remaining();

        clock.advance(Duration::milliseconds(step_ms.min(before_ms - 1)));
        controller.tick();
        prop_assert_eq!(controller.state(), LifecycleState::Pending);
        prop_assert!(controller.remaining().total_seconds() < first.total_seconds());
    }

    /// Property: inside the event span the state is Live
    #[test]
    fn prop_live_during_event(after_ms in 0i64..TWELVE_HOURS_MS) {
        let (mut controller, _clock) = controller_at(after_ms);
        controller.tick();
        prop_assert_eq!(controller.state(), LifecycleState::Live);
        prop_assert!(controller.remaining().is_zero());
    }

    /// Property: once Ended, no later or earlier clock reading changes the state
    #[test]
    fn prop_ended_is_final(
        after_ms in TWELVE_HOURS_MS..(TWELVE_HOURS_MS * 100),
        jumps in proptest::collection::vec(-(TWELVE_HOURS_MS * 200)..(TWELVE_HOURS_MS * 200), 1..8),
    ) {
        let (mut controller, clock) = controller_at(after_ms);
        controller.tick();
        prop_assert_eq!(controller.state(), LifecycleState::Ended);

        for jump in jumps {
            clock.advance(Duration::milliseconds(jump));
            controller.tick();
            prop_assert_eq!(controller.state(), LifecycleState::Ended);
        }
    }

    /// Property: ring offsets never leave [0, circumference]
    #[test]
    fn prop_ring_offset_in_bounds(value in 0u64..100_000, radius in 1.0f64..200.0) {
        let c = circumference(radius);
        for unit in TimeUnit::ALL {
            let stroke = stroke_for(c, progress_ratio(unit, value));
            prop_assert!(stroke.dash_offset >= 0.0);
            prop_assert!(stroke.dash_offset <= c);
        }
    }
}

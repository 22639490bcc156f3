// Unit tests for lifecycle state boundaries

use chrono::{DateTime, Duration, FixedOffset};
use event_countdown::models::countdown::LifecycleState;
use test_case::test_case;

fn start() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2025-09-20T08:00:00+05:30").unwrap()
}

#[test_case(-Duration::days(2), LifecycleState::Pending; "two days before")]
#[test_case(-Duration::seconds(1), LifecycleState::Pending; "one second before")]
#[test_case(Duration::zero(), LifecycleState::Live; "at start")]
#[test_case(Duration::hours(1), LifecycleState::Live; "one hour in")]
#[test_case(Duration::hours(12) - Duration::milliseconds(1), LifecycleState::Live; "last millisecond")]
#[test_case(Duration::hours(12), LifecycleState::Ended; "at end")]
#[test_case(Duration::hours(13), LifecycleState::Ended; "thirteen hours in")]
fn test_state_for_twelve_hour_event(offset: Duration, expected: LifecycleState) {
    let now = start() + offset;
    assert_eq!(
        LifecycleState::at(&start(), Duration::hours(12), &now),
        expected
    );
}

#[test]
fn test_states_are_ordered() {
    assert!(LifecycleState::Pending < LifecycleState::Live);
    assert!(LifecycleState::Live < LifecycleState::Ended);
    assert!(!LifecycleState::Pending.is_terminal());
    assert!(LifecycleState::Ended.is_terminal());
}

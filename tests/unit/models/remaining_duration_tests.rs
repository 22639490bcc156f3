// Unit tests for RemainingDuration decomposition and unit formatting

use event_countdown::models::countdown::{format_unit, RemainingDuration, TimeUnit};
use test_case::test_case;

const SECOND: i64 = 1_000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

#[test_case(172_800_000, (2, 0, 0, 0); "exactly two days")]
#[test_case(DAY - SECOND, (0, 23, 59, 59); "one second short of a day")]
#[test_case(HOUR + 30 * MINUTE + 5 * SECOND + 250, (0, 1, 30, 5); "sub second remainder dropped")]
#[test_case(400 * DAY + 3 * HOUR, (400, 3, 0, 0); "days are unbounded")]
#[test_case(0, (0, 0, 0, 0); "zero")]
#[test_case(-HOUR, (0, 0, 0, 0); "past target")]
fn test_from_millis(delta: i64, expected: (u64, u8, u8, u8)) {
    let remaining = RemainingDuration::from_millis(delta);
    assert_eq!(
        (remaining.days, remaining.hours, remaining.minutes, remaining.seconds),
        expected
    );
}

#[test_case(0, "00"; "zero")]
#[test_case(3, "03"; "single digit")]
#[test_case(9, "09"; "largest single digit")]
#[test_case(10, "10"; "two digits")]
#[test_case(42, "42"; "unchanged")]
#[test_case(365, "365"; "three digits")]
fn test_format_unit(value: u64, expected: &str) {
    assert_eq!(format_unit(value), expected);
}

#[test]
fn test_get_matches_fields() {
    let remaining = RemainingDuration::from_millis(3 * DAY + 4 * HOUR + 5 * MINUTE + 6 * SECOND);
    let values: Vec<u64> = TimeUnit::ALL.iter().map(|unit| remaining.get(*unit)).collect();
    assert_eq!(values, vec![3, 4, 5, 6]);
    assert_eq!(remaining.total_seconds(), 3 * 86_400 + 4 * 3_600 + 5 * 60 + 6);
}

//! Business-day arithmetic for workflow deadlines.
//!
//! A business day is Monday through Friday. No holiday calendar is applied.
//! The time-of-day component of the input is carried through unchanged.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Weekday};

/// Business days a jury has to evaluate a submission.
pub const EVALUATION_WINDOW_DAYS: u32 = 15;

/// Business days students have to answer an observation. Not wired into any
/// transition: no enforcement policy exists for it.
pub const CORRECTION_WINDOW_DAYS: u32 = 30;

/// Largest window accepted for configured deadlines (about ten years of
/// weekdays).
pub const MAX_WINDOW_DAYS: u32 = 2_610;

/// A date-like value that can move one calendar day forward.
pub trait NextDay: Sized {
    /// The same instant one day later, or `None` past the supported range.
    fn next_day(self) -> Option<Self>;
}

impl NextDay for NaiveDate {
    fn next_day(self) -> Option<Self> {
        self.succ_opt()
    }
}

impl NextDay for NaiveDateTime {
    fn next_day(self) -> Option<Self> {
        self.checked_add_signed(TimeDelta::days(1))
    }
}

impl<Tz: TimeZone> NextDay for DateTime<Tz> {
    fn next_day(self) -> Option<Self> {
        self.checked_add_signed(TimeDelta::days(1))
    }
}

#[must_use]
pub fn is_business_day<T: Datelike>(date: &T) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Walk forward one calendar day at a time, skipping weekends, until `n`
/// business days have been counted.
///
/// `add_business_days(d, 0) == Some(d)`, even when `d` falls on a weekend.
/// Returns `None` when the walk runs past the last representable date.
#[must_use]
pub fn add_business_days<T>(start: T, n: u32) -> Option<T>
where
    T: Datelike + NextDay,
{
    let mut cursor = start;
    let mut counted = 0;
    while counted < n {
        cursor = cursor.next_day()?;
        if is_business_day(&cursor) {
            counted += 1;
        }
    }
    Some(cursor)
}

/// Count business days strictly after `start` up to and including `end`.
///
/// Returns 0 when `end` is not after `start`.
#[must_use]
pub fn business_days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    start
        .iter_days()
        .skip(1)
        .take_while(|d| *d <= end)
        .filter(is_business_day)
        .fold(0, |acc, _| acc + 1)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDateTime, TimeZone, Utc};
    use rstest::rstest;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    // 2026-10-16 is a Friday.
    #[rstest]
    #[case("2026-10-16", 0, "2026-10-16")]
    #[case("2026-10-16", 1, "2026-10-19")]
    #[case("2026-10-12", 4, "2026-10-16")]
    #[case("2026-10-12", 5, "2026-10-19")]
    #[case("2026-10-17", 1, "2026-10-19")]
    #[case("2026-10-18", 0, "2026-10-18")]
    #[case("2026-10-16", 15, "2026-11-06")]
    fn adds_business_days(#[case] start: &str, #[case] n: u32, #[case] expected: &str) {
        assert_eq!(add_business_days(date(start), n), Some(date(expected)));
    }

    #[test]
    fn result_is_never_a_weekend() {
        let start = date("2026-01-01");
        for offset in 0..14 {
            let from = start + TimeDelta::days(offset);
            for n in 1..=30 {
                let landed = add_business_days(from, n).unwrap();
                assert!(is_business_day(&landed), "{from} + {n} landed on {landed}");
            }
        }
    }

    #[test]
    fn preserves_time_of_day() {
        let friday = Utc.with_ymd_and_hms(2026, 10, 16, 17, 45, 12).unwrap();
        let monday = add_business_days(friday, 1);
        assert_eq!(monday, Some(Utc.with_ymd_and_hms(2026, 10, 19, 17, 45, 12).unwrap()));

        let naive =
            NaiveDateTime::parse_from_str("2026-10-16 08:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(add_business_days(naive, 1).unwrap().time(), naive.time());
    }

    #[rstest]
    #[case("2026-10-16", "2026-10-16", 0)]
    #[case("2026-10-16", "2026-10-19", 1)]
    #[case("2026-10-16", "2026-10-18", 0)]
    #[case("2026-10-12", "2026-10-16", 4)]
    #[case("2026-10-12", "2026-10-26", 10)]
    #[case("2026-10-19", "2026-10-16", 0)]
    fn counts_business_days_between(#[case] start: &str, #[case] end: &str, #[case] n: u32) {
        assert_eq!(business_days_between(date(start), date(end)), n);
    }

    #[test]
    fn between_inverts_add_from_business_day() {
        let start = date("2026-03-02");
        for n in 0..40 {
            let end = add_business_days(start, n).unwrap();
            assert_eq!(business_days_between(start, end), n);
        }
    }

    #[test]
    fn stops_at_end_of_calendar() {
        let near_max = NaiveDate::MAX - TimeDelta::days(3);
        assert_eq!(add_business_days(near_max, 10), None);
        assert_eq!(add_business_days(NaiveDate::MAX, 0), Some(NaiveDate::MAX));

        let last_instant = DateTime::<Utc>::MAX_UTC - TimeDelta::hours(1);
        assert_eq!(add_business_days(last_instant, 5), None);
    }
}

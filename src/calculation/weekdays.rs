//! Weekday detection and counting.
//!
//! Leave days are only consumed on Monday through Friday. Weekends never
//! consume benefit days in this model, regardless of the adjacent-workday
//! rule that applies to real weekend claims.

use chrono::{Datelike, NaiveDate, Weekday};

/// Returns true for Monday through Friday.
///
/// # Example
///
/// ```
/// use parental_leave_engine::calculation::is_weekday;
/// use chrono::NaiveDate;
///
/// // 2026-01-17 is a Saturday
/// assert!(!is_weekday(NaiveDate::from_ymd_opt(2026, 1, 17).unwrap()));
/// // 2026-01-12 is a Monday
/// assert!(is_weekday(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()));
/// ```
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts weekdays in the half-open range `[start, end)`.
///
/// Returns zero when `end` is not after `start`.
///
/// # Example
///
/// ```
/// use parental_leave_engine::calculation::count_weekdays;
/// use chrono::NaiveDate;
///
/// // Wednesday to the following Wednesday
/// let start = NaiveDate::from_ymd_opt(2026, 11, 4).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 11, 11).unwrap();
/// assert_eq!(count_weekdays(start, end), 5);
/// ```
pub fn count_weekdays(start: NaiveDate, end: NaiveDate) -> u32 {
    if end <= start {
        return 0;
    }

    let total_days = (end - start).num_days();
    let full_weeks = total_days / 7;
    let mut count = full_weeks * 5;

    // Walk the partial week that remains after the full weeks
    let tail_start = start + chrono::Duration::days(full_weeks * 7);
    count += tail_start
        .iter_days()
        .take_while(|d| *d < end)
        .filter(|d| is_weekday(*d))
        .count() as i64;

    count as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn naive_count(start: NaiveDate, end: NaiveDate) -> u32 {
        start
            .iter_days()
            .take_while(|d| *d < end)
            .filter(|d| is_weekday(*d))
            .count() as u32
    }

    #[test]
    fn test_weekend_days_detected() {
        assert!(!is_weekday(date(2026, 10, 24))); // Saturday
        assert!(!is_weekday(date(2026, 10, 25))); // Sunday
        assert!(is_weekday(date(2026, 10, 23))); // Friday
    }

    #[test]
    fn test_single_day_ranges() {
        assert_eq!(count_weekdays(date(2026, 10, 19), date(2026, 10, 20)), 1);
        assert_eq!(count_weekdays(date(2026, 10, 24), date(2026, 10, 25)), 0);
    }

    #[test]
    fn test_end_is_exclusive() {
        // Monday to Friday, Friday excluded
        assert_eq!(count_weekdays(date(2026, 10, 19), date(2026, 10, 23)), 4);
    }

    #[test]
    fn test_empty_and_inverted_ranges() {
        assert_eq!(count_weekdays(date(2026, 10, 19), date(2026, 10, 19)), 0);
        assert_eq!(count_weekdays(date(2026, 10, 26), date(2026, 10, 19)), 0);
    }

    #[test]
    fn test_weekend_only_range() {
        assert_eq!(count_weekdays(date(2026, 10, 24), date(2026, 10, 26)), 0);
    }

    #[test]
    fn test_matches_day_by_day_count_over_long_ranges() {
        let start = date(2026, 1, 1);
        for len in [0, 1, 6, 7, 8, 30, 31, 59, 365, 366, 1000] {
            let end = start + chrono::Duration::days(len);
            assert_eq!(count_weekdays(start, end), naive_count(start, end), "len {}", len);
        }
    }

    #[test]
    fn test_full_year_2026() {
        assert_eq!(count_weekdays(date(2026, 1, 1), date(2027, 1, 1)), 261);
    }
}

//! Deadline calculation.
//!
//! Pure date arithmetic from a child's birth date. Deadlines are whole
//! calendar months after the birth date; a birth on the 31st lands on the
//! last day of shorter months.

use chrono::{Months, NaiveDate};

use crate::config::RuleConstants;
use crate::models::{Child, DeadlineInfo, DeadlineKind, Family};

/// Days under which an upcoming birth is urgent.
const BIRTH_URGENT_DAYS: u32 = 30;
/// Days under which the save limit is urgent.
const SAVE_LIMIT_URGENT_DAYS: u32 = 180;
/// Days under which the absolute expiry is urgent.
const ALL_DAYS_URGENT_DAYS: u32 = 365;
/// Days under which the double-days expiry is urgent.
const DOUBLE_DAYS_URGENT_DAYS: u32 = 90;

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// The date from which only a capped number of days may remain saved.
pub fn save_limit_date(birth_date: NaiveDate, rules: &RuleConstants) -> NaiveDate {
    add_months(birth_date, rules.deadlines.save_limit_age_years * 12)
}

/// The date every remaining day is forfeited.
pub fn all_days_expiry_date(birth_date: NaiveDate, rules: &RuleConstants) -> NaiveDate {
    add_months(birth_date, rules.deadlines.all_days_expiry_age_years * 12)
}

/// The last date double days can be used.
pub fn double_days_expiry_date(birth_date: NaiveDate, rules: &RuleConstants) -> NaiveDate {
    add_months(birth_date, rules.double_days.max_child_age_months)
}

/// Whole days from `today` to `date`, floored at zero.
///
/// # Example
///
/// ```
/// use parental_leave_engine::calculation::days_until;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
/// assert_eq!(days_until(NaiveDate::from_ymd_opt(2026, 10, 29).unwrap(), today), 10);
/// assert_eq!(days_until(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(), today), 0);
/// ```
pub fn days_until(date: NaiveDate, today: NaiveDate) -> u32 {
    (date - today).num_days().max(0) as u32
}

fn deadline(kind: DeadlineKind, date: NaiveDate, urgent_under: u32, today: NaiveDate) -> DeadlineInfo {
    let days = days_until(date, today);
    let has_passed = date < today;
    DeadlineInfo {
        kind,
        description: kind.description().to_string(),
        date,
        days_until: days,
        has_passed,
        is_urgent: !has_passed && days < urgent_under,
    }
}

/// Builds the deadline of the given kind for a child.
pub fn deadline_for_child(
    child: &Child,
    kind: DeadlineKind,
    rules: &RuleConstants,
    today: NaiveDate,
) -> DeadlineInfo {
    let birth = child.birth_date;
    match kind {
        DeadlineKind::ExpectedBirth => deadline(kind, birth, BIRTH_URGENT_DAYS, today),
        DeadlineKind::DoubleDaysExpiry => deadline(
            kind,
            double_days_expiry_date(birth, rules),
            DOUBLE_DAYS_URGENT_DAYS,
            today,
        ),
        DeadlineKind::SaveLimit => deadline(
            kind,
            save_limit_date(birth, rules),
            SAVE_LIMIT_URGENT_DAYS,
            today,
        ),
        DeadlineKind::AllDaysExpiry => deadline(
            kind,
            all_days_expiry_date(birth, rules),
            ALL_DAYS_URGENT_DAYS,
            today,
        ),
    }
}

/// The single deadline a dashboard should show for the family.
///
/// An unborn child's due date comes first. Otherwise the save limit is
/// shown while it is still ahead, then the absolute expiry. Returns `None`
/// without children or once every deadline has passed.
pub fn next_deadline(family: &Family, rules: &RuleConstants, today: NaiveDate) -> Option<DeadlineInfo> {
    let child = family.first_child()?;

    if !child.is_born && child.birth_date > today {
        return Some(deadline_for_child(child, DeadlineKind::ExpectedBirth, rules, today));
    }

    let save_limit = deadline_for_child(child, DeadlineKind::SaveLimit, rules, today);
    let all_days = deadline_for_child(child, DeadlineKind::AllDaysExpiry, rules, today);

    if save_limit.days_until > 0 && save_limit.days_until < all_days.days_until {
        return Some(save_limit);
    }
    if all_days.days_until > 0 {
        return Some(all_days);
    }
    None
}

/// Every deadline for a child, ordered by date.
///
/// The expected birth is only included while the child is unborn.
pub fn all_deadlines(child: &Child, rules: &RuleConstants, today: NaiveDate) -> Vec<DeadlineInfo> {
    let mut kinds = Vec::with_capacity(4);
    if !child.is_born {
        kinds.push(DeadlineKind::ExpectedBirth);
    }
    kinds.extend([
        DeadlineKind::DoubleDaysExpiry,
        DeadlineKind::SaveLimit,
        DeadlineKind::AllDaysExpiry,
    ]);

    let mut deadlines: Vec<DeadlineInfo> = kinds
        .into_iter()
        .map(|kind| deadline_for_child(child, kind, rules, today))
        .collect();
    deadlines.sort_by_key(|d| d.date);
    deadlines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Multiplicity, Parent, ParentRole};
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rules() -> RuleConstants {
        RuleConstants::embedded().unwrap()
    }

    fn family_with_child(child: Child) -> Family {
        let parent = Parent::new("Anna", ParentRole::First, Decimal::from(35_000)).unwrap();
        Family::new(vec![parent], vec![child]).unwrap()
    }

    #[test]
    fn test_deadline_dates() {
        let rules = rules();
        let birth = date(2025, 3, 15);

        assert_eq!(save_limit_date(birth, &rules), date(2029, 3, 15));
        assert_eq!(all_days_expiry_date(birth, &rules), date(2037, 3, 15));
        assert_eq!(double_days_expiry_date(birth, &rules), date(2026, 6, 15));
    }

    #[test]
    fn test_leap_day_birth_clamps_to_month_end() {
        let rules = rules();
        assert_eq!(save_limit_date(date(2024, 2, 29), &rules), date(2028, 2, 29));
        assert_eq!(all_days_expiry_date(date(2024, 2, 29), &rules), date(2036, 2, 29));
        assert_eq!(double_days_expiry_date(date(2024, 2, 29), &rules), date(2025, 5, 29));
        assert_eq!(double_days_expiry_date(date(2025, 1, 31), &rules), date(2026, 4, 30));
    }

    #[test]
    fn test_days_until_never_negative() {
        let today = date(2026, 10, 19);
        assert_eq!(days_until(date(2026, 10, 19), today), 0);
        assert_eq!(days_until(date(2020, 1, 1), today), 0);
        assert_eq!(days_until(date(2026, 10, 20), today), 1);
    }

    #[test]
    fn test_unborn_child_birth_is_next_deadline() {
        let today = date(2026, 10, 19);
        let family = family_with_child(Child::new(date(2026, 11, 5), false, Multiplicity::Twins));

        let next = next_deadline(&family, &rules(), today).unwrap();
        assert_eq!(next.kind, DeadlineKind::ExpectedBirth);
        assert_eq!(next.days_until, 17);
        assert!(next.is_urgent);
    }

    #[test]
    fn test_save_limit_preferred_while_ahead() {
        let today = date(2026, 10, 19);
        let family = family_with_child(Child::new(date(2023, 1, 10), true, Multiplicity::Single));

        let next = next_deadline(&family, &rules(), today).unwrap();
        assert_eq!(next.kind, DeadlineKind::SaveLimit);
        assert_eq!(next.date, date(2027, 1, 10));
        // 83 days away, under the 180-day threshold
        assert!(next.is_urgent);
    }

    #[test]
    fn test_save_limit_not_urgent_far_out() {
        let today = date(2026, 10, 19);
        let family = family_with_child(Child::new(date(2026, 5, 1), true, Multiplicity::Single));

        let next = next_deadline(&family, &rules(), today).unwrap();
        assert_eq!(next.kind, DeadlineKind::SaveLimit);
        assert!(!next.is_urgent);
    }

    #[test]
    fn test_all_days_expiry_after_save_limit_passed() {
        let today = date(2026, 10, 19);
        let family = family_with_child(Child::new(date(2020, 6, 1), true, Multiplicity::Single));

        let next = next_deadline(&family, &rules(), today).unwrap();
        assert_eq!(next.kind, DeadlineKind::AllDaysExpiry);
        assert_eq!(next.date, date(2032, 6, 1));
        assert!(!next.is_urgent);
    }

    #[test]
    fn test_no_deadline_once_everything_expired() {
        let today = date(2026, 10, 19);
        let family = family_with_child(Child::new(date(2010, 6, 1), true, Multiplicity::Single));
        assert!(next_deadline(&family, &rules(), today).is_none());
    }

    #[test]
    fn test_no_deadline_without_children() {
        let parent = Parent::new("Anna", ParentRole::First, Decimal::from(35_000)).unwrap();
        let family = Family::new(vec![parent], vec![]).unwrap();
        assert!(next_deadline(&family, &rules(), date(2026, 10, 19)).is_none());
    }

    #[test]
    fn test_all_deadlines_ordered() {
        let today = date(2026, 10, 19);
        let child = Child::new(date(2027, 2, 1), false, Multiplicity::Single);

        let deadlines = all_deadlines(&child, &rules(), today);
        let kinds: Vec<DeadlineKind> = deadlines.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DeadlineKind::ExpectedBirth,
                DeadlineKind::DoubleDaysExpiry,
                DeadlineKind::SaveLimit,
                DeadlineKind::AllDaysExpiry,
            ]
        );
        assert!(deadlines.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_passed_deadlines_are_flagged() {
        let today = date(2026, 10, 19);
        let child = Child::new(date(2024, 1, 1), true, Multiplicity::Single);

        let deadlines = all_deadlines(&child, &rules(), today);
        assert_eq!(deadlines.len(), 3);

        let double_days = &deadlines[0];
        assert_eq!(double_days.kind, DeadlineKind::DoubleDaysExpiry);
        assert!(double_days.has_passed);
        assert_eq!(double_days.days_until, 0);
        assert!(!double_days.is_urgent);
    }
}

//! Day balance calculation.
//!
//! Computes totals, used and remaining föräldrapenning days per tier and
//! per parent from the days each parent has actually taken.
//!
//! The compensation tier of historical days is not used here. Taken days
//! are assumed to consume sjukpenningnivå days first, household-wide, and
//! only then lägstanivå days. Every remaining figure is floored at zero.

use crate::config::RuleConstants;
use crate::models::{DaySummary, Family, Multiplicity, Parent, ParentDayBalance, ParentRole};

/// Reserved days a parent has consumed: taken days up to the reservation.
pub fn reserved_used(days_taken: u32, rules: &RuleConstants) -> u32 {
    days_taken.min(rules.days.reserved_per_parent)
}

/// Days a parent has taken beyond their reservation, drawn from the shared pool.
pub fn excess_over_reserved(days_taken: u32, rules: &RuleConstants) -> u32 {
    days_taken.saturating_sub(rules.days.reserved_per_parent)
}

fn parent_balance(role: ParentRole, parent: Option<&Parent>, rules: &RuleConstants) -> ParentDayBalance {
    let days_taken = parent.map_or(0, Parent::parental_leave_days_taken);
    let used = reserved_used(days_taken, rules);
    ParentDayBalance {
        role,
        days_taken,
        reserved_used: used,
        reserved_remaining: rules.days.reserved_per_parent.saturating_sub(used),
    }
}

/// Computes the day balance for a family.
///
/// The earliest-born child decides the multiplicity; a family without
/// children is treated as expecting a single child.
///
/// # Example
///
/// ```
/// use parental_leave_engine::calculation::calculate_days;
/// use parental_leave_engine::config::RuleConstants;
/// use parental_leave_engine::models::{Family, Parent, ParentRole};
/// use rust_decimal::Decimal;
///
/// let rules = RuleConstants::embedded().unwrap();
/// let parent = Parent::new("Anna", ParentRole::First, Decimal::from(35_000)).unwrap();
/// let family = Family::new(vec![parent], vec![]).unwrap();
///
/// let days = calculate_days(&family, &rules);
/// assert_eq!(days.remaining_total, 480);
/// assert_eq!(days.shared_remaining, 300);
/// ```
pub fn calculate_days(family: &Family, rules: &RuleConstants) -> DaySummary {
    let multiplicity = family
        .first_child()
        .map_or(Multiplicity::Single, |c| c.multiplicity);

    let total_days = rules.total_days(multiplicity);
    let tier1_total = rules.tier1_total(multiplicity);
    let basic_total = rules.days.basic_level;

    let parent1 = parent_balance(ParentRole::First, family.parent1(), rules);
    let parent2 = parent_balance(ParentRole::Second, family.parent2(), rules);
    let taken = parent1.days_taken + parent2.days_taken;

    let tier1_taken = taken.min(tier1_total);
    let basic_taken = taken.saturating_sub(tier1_total);

    let shared_remaining = rules
        .days
        .shared
        .saturating_sub(excess_over_reserved(parent1.days_taken, rules))
        .saturating_sub(excess_over_reserved(parent2.days_taken, rules));

    DaySummary {
        total_days,
        tier1_total,
        basic_total,
        days_taken_total: taken,
        remaining_total: total_days.saturating_sub(taken),
        remaining_tier1: tier1_total.saturating_sub(tier1_taken),
        remaining_basic: basic_total.saturating_sub(basic_taken),
        parent1,
        parent2,
        shared_remaining,
    }
}

/// VAB days a parent has left in the given calendar year.
pub fn vab_days_remaining(parent: &Parent, year: i32, rules: &RuleConstants) -> u32 {
    rules
        .vab
        .days_per_child_per_year
        .saturating_sub(parent.vab_days_in_year(year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Child, LeaveDayType, PayLevel};
    use chrono::{Duration, NaiveDate};
    use rust_decimal::Decimal;

    fn rules() -> RuleConstants {
        RuleConstants::embedded().unwrap()
    }

    fn parent_with_days(role: ParentRole, taken: u32) -> Parent {
        let mut parent = Parent::new("Test", role, Decimal::from(30_000)).unwrap();
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        for i in 0..taken {
            parent.log_day(
                start + Duration::days(i as i64),
                LeaveDayType::ParentalLeave,
                PayLevel::SgiLevel,
                false,
            );
        }
        parent
    }

    fn family(p1_taken: u32, p2_taken: u32, multiplicity: Multiplicity) -> Family {
        let child = Child::new(
            NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            true,
            multiplicity,
        );
        Family::new(
            vec![
                parent_with_days(ParentRole::First, p1_taken),
                parent_with_days(ParentRole::Second, p2_taken),
            ],
            vec![child],
        )
        .unwrap()
    }

    #[test]
    fn test_fresh_family_has_full_balance() {
        let days = calculate_days(&family(0, 0, Multiplicity::Single), &rules());

        assert_eq!(days.total_days, 480);
        assert_eq!(days.tier1_total, 390);
        assert_eq!(days.basic_total, 90);
        assert_eq!(days.remaining_total, 480);
        assert_eq!(days.remaining_tier1, 390);
        assert_eq!(days.remaining_basic, 90);
        assert_eq!(days.parent1.reserved_remaining, 90);
        assert_eq!(days.parent2.reserved_remaining, 90);
        assert_eq!(days.shared_remaining, 300);
    }

    #[test]
    fn test_twin_bonus_extends_tier1() {
        let days = calculate_days(&family(0, 0, Multiplicity::Twins), &rules());
        assert_eq!(days.total_days, 660);
        assert_eq!(days.tier1_total, 570);
        assert_eq!(days.basic_total, 90);
    }

    #[test]
    fn test_triplet_bonus() {
        let days = calculate_days(&family(0, 0, Multiplicity::TripletsOrMore), &rules());
        assert_eq!(days.total_days, 840);
        assert_eq!(days.tier1_total, 750);
    }

    #[test]
    fn test_reserved_days_consumed_first() {
        let days = calculate_days(&family(60, 120, Multiplicity::Single), &rules());

        assert_eq!(days.parent1.reserved_used, 60);
        assert_eq!(days.parent1.reserved_remaining, 30);
        assert_eq!(days.parent2.reserved_used, 90);
        assert_eq!(days.parent2.reserved_remaining, 0);
        // Only the second parent's 30 excess days come from the shared pool
        assert_eq!(days.shared_remaining, 270);
        assert_eq!(days.remaining_total, 300);
        assert_eq!(days.remaining_tier1, 210);
    }

    #[test]
    fn test_tier1_consumed_before_basic_household_wide() {
        let days = calculate_days(&family(200, 210, Multiplicity::Single), &rules());

        assert_eq!(days.days_taken_total, 410);
        assert_eq!(days.remaining_tier1, 0);
        assert_eq!(days.remaining_basic, 70);
        assert_eq!(days.remaining_total, 70);
        assert_eq!(days.remaining_tier1 + days.remaining_basic, days.remaining_total);
    }

    #[test]
    fn test_overdrawn_balance_floors_at_zero() {
        let days = calculate_days(&family(300, 250, Multiplicity::Single), &rules());

        assert_eq!(days.remaining_total, 0);
        assert_eq!(days.remaining_tier1, 0);
        assert_eq!(days.remaining_basic, 0);
        assert_eq!(days.shared_remaining, 0);
    }

    #[test]
    fn test_only_actual_parental_leave_days_count() {
        let mut fam = family(10, 0, Multiplicity::Single);
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let p1 = fam.parent_mut(ParentRole::First).unwrap();
        p1.log_day(date, LeaveDayType::ParentalLeave, PayLevel::SgiLevel, true);
        p1.log_day(date, LeaveDayType::ChildSickCare, PayLevel::SgiLevel, false);
        p1.log_day(date, LeaveDayType::Unpaid, PayLevel::NoCompensation, false);

        let days = calculate_days(&fam, &rules());
        assert_eq!(days.parent1.days_taken, 10);
    }

    #[test]
    fn test_single_parent_family() {
        let parent = parent_with_days(ParentRole::First, 100);
        let fam = Family::new(vec![parent], vec![]).unwrap();

        let days = calculate_days(&fam, &rules());
        assert_eq!(days.parent2.days_taken, 0);
        assert_eq!(days.parent2.reserved_remaining, 90);
        assert_eq!(days.shared_remaining, 290);
        assert_eq!(days.remaining_total, 380);
    }

    #[test]
    fn test_reserved_invariant_holds() {
        let rules = rules();
        for taken in [0, 1, 45, 89, 90, 91, 200, 500] {
            let days = calculate_days(&family(taken, taken / 2, Multiplicity::Single), &rules);
            for balance in [&days.parent1, &days.parent2] {
                assert_eq!(
                    balance.reserved_used + balance.reserved_remaining,
                    rules.days.reserved_per_parent
                );
            }
        }
    }

    #[test]
    fn test_vab_days_remaining() {
        let rules = rules();
        let mut parent = Parent::new("Anna", ParentRole::First, Decimal::from(30_000)).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        for _ in 0..5 {
            parent.log_day(date, LeaveDayType::ChildSickCare, PayLevel::SgiLevel, false);
        }

        assert_eq!(vab_days_remaining(&parent, 2026, &rules), 115);
        assert_eq!(vab_days_remaining(&parent, 2027, &rules), 120);
    }
}

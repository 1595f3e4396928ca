//! Scenario projection and plan summaries.
//!
//! Both functions are pure over (scenario, family, rules, today). The
//! projection walks calendar months from the start of the current month;
//! the summary aggregates day consumption per tier and derives warnings.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculation::compensation::daily_rate_for;
use crate::calculation::deadlines::{days_until, save_limit_date};
use crate::config::RuleConstants;
use crate::models::{
    Family, LeaveBlock, MonthProjection, Multiplicity, Parent, ParentConsumption, ParentRole,
    PayLevel, PlanSummary, PlanWarning, Scenario, WarningCode,
};

/// Months projected when the caller does not ask for a horizon.
pub const DEFAULT_HORIZON_MONTHS: u32 = 48;

/// Longest horizon the HTTP surface accepts.
pub const MAX_HORIZON_MONTHS: u32 = 48;

/// Save-limit warnings only fire inside this many days.
const SAVE_LIMIT_WARNING_DAYS: u32 = 365;
/// Save-limit warnings become urgent inside this many days.
const SAVE_LIMIT_URGENT_DAYS: u32 = 180;

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_offset(start: NaiveDate, offset: u32) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(offset))
}

/// Income for one parent in the month `[month, month_end)`.
///
/// The first of the parent's blocks (by start date) that touches the
/// month decides the income; an absent parent earns nothing.
fn parent_month(
    parent: Option<&Parent>,
    blocks: &[&LeaveBlock],
    month: NaiveDate,
    month_end: NaiveDate,
    rules: &RuleConstants,
) -> (bool, Decimal) {
    let Some(parent) = parent else {
        return (false, Decimal::ZERO);
    };

    match blocks.iter().find(|b| b.intersects(month, month_end)) {
        Some(block) => {
            let daily = daily_rate_for(block.pay_level, parent.monthly_gross_income, rules);
            let income = daily
                * Decimal::from(rules.compensation.days_in_month)
                * block.fraction.as_decimal();
            (true, income)
        }
        None => (false, parent.monthly_gross_income),
    }
}

/// Projects household income month by month.
///
/// A parent with a block touching the month is paid `daily rate x 30 x
/// fraction` at the block's tier for the whole month; otherwise they earn
/// their full salary. Partial months are not prorated.
///
/// # Arguments
///
/// * `scenario` - The plan to project
/// * `family` - Parents and their incomes
/// * `rules` - Rule table for the year
/// * `today` - Any date in the first projected month
/// * `horizon_months` - Number of months to project
///
/// # Returns
///
/// One [`MonthProjection`] per month, starting with the current month.
pub fn project_months(
    scenario: &Scenario,
    family: &Family,
    rules: &RuleConstants,
    today: NaiveDate,
    horizon_months: u32,
) -> Vec<MonthProjection> {
    let start = first_of_month(today);
    let parent1 = family.parent1();
    let parent2 = family.parent2();
    let blocks1 = scenario.blocks_for(ParentRole::First);
    let blocks2 = scenario.blocks_for(ParentRole::Second);

    debug!(
        scenario_id = %scenario.id,
        from = %start,
        horizon_months,
        "Projecting scenario"
    );

    (0..horizon_months)
        .map_while(|offset| {
            let month = month_offset(start, offset)?;
            let month_end = month_offset(start, offset + 1)?;

            let (parent1_on_leave, parent1_income) =
                parent_month(parent1, &blocks1, month, month_end, rules);
            let (parent2_on_leave, parent2_income) =
                parent_month(parent2, &blocks2, month, month_end, rules);

            Some(MonthProjection {
                month,
                parent1_on_leave,
                parent2_on_leave,
                parent1_income,
                parent2_income,
                household_income: parent1_income.saturating_add(parent2_income),
            })
        })
        .collect()
}

fn planned_consumption(scenario: &Scenario, role: ParentRole, historical_days: u32) -> ParentConsumption {
    let mut consumption = ParentConsumption {
        historical_days: Decimal::from(historical_days),
        ..ParentConsumption::default()
    };
    for block in scenario.blocks.iter().filter(|b| b.parent == role) {
        match block.pay_level {
            PayLevel::SgiLevel => consumption.tier1_days += block.days_consumed(),
            PayLevel::BasicLevel => consumption.tier3_days += block.days_consumed(),
            PayLevel::NoCompensation => {}
        }
    }
    consumption
}

fn parent_name(family: &Family, role: ParentRole) -> String {
    family
        .parent(role)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| role.to_string())
}

struct WarningInputs<'a> {
    family: &'a Family,
    rules: &'a RuleConstants,
    today: NaiveDate,
    multiplicity: Multiplicity,
    days_remaining: Decimal,
    parent1: &'a ParentConsumption,
    parent2: &'a ParentConsumption,
}

fn plan_warnings(inputs: &WarningInputs<'_>) -> Vec<PlanWarning> {
    let WarningInputs {
        family,
        rules,
        today,
        multiplicity,
        days_remaining,
        parent1,
        parent2,
    } = *inputs;
    let mut warnings = Vec::new();

    if days_remaining < Decimal::ZERO {
        warnings.push(PlanWarning {
            code: WarningCode::OverAllocated,
            message: format!(
                "The plan uses {} more days than are available",
                (-days_remaining).normalize()
            ),
            is_urgent: true,
        });
    }

    let tier1_total = Decimal::from(rules.tier1_total(multiplicity));
    let tier1_planned = parent1.tier1_days + parent2.tier1_days;
    let historical = parent1.historical_days + parent2.historical_days;
    if tier1_planned + historical > tier1_total {
        warnings.push(PlanWarning {
            code: WarningCode::Tier1OverAllocated,
            message: format!(
                "More sjukpenningnivå days planned than the {} available",
                tier1_total
            ),
            is_urgent: true,
        });
    }

    if family.parent1().is_some() && family.parent2().is_some() {
        let reserved = Decimal::from(rules.days.reserved_per_parent);
        let others_share = Decimal::from(rules.total_days(multiplicity)) - reserved * Decimal::TWO;
        let consumption = |role| match role {
            ParentRole::First => parent1,
            ParentRole::Second => parent2,
        };
        for role in [ParentRole::First, ParentRole::Second] {
            let (own, other) = (consumption(role), consumption(role.other()));
            if own.total() < reserved && other.total() > others_share {
                warnings.push(PlanWarning {
                    code: WarningCode::ReservedDaysUnused,
                    message: format!(
                        "{} still has reserved days to use",
                        parent_name(family, role)
                    ),
                    is_urgent: false,
                });
            }
        }
    }

    if let Some(child) = family.first_child() {
        let limit = save_limit_date(child.birth_date, rules);
        let days_left = days_until(limit, today);
        let saveable = Decimal::from(rules.max_days_saveable(multiplicity));
        if limit > today && days_left < SAVE_LIMIT_WARNING_DAYS && days_remaining > saveable {
            warnings.push(PlanWarning {
                code: WarningCode::SaveLimitApproaching,
                message: format!(
                    "Use days before {}; at most {} days can be saved after that",
                    limit, saveable
                ),
                is_urgent: days_left < SAVE_LIMIT_URGENT_DAYS,
            });
        }
    }

    warnings
}

/// Summarizes a plan: days per tier and parent, income over the leave
/// months, and warnings.
///
/// Historical days are counted as sjukpenningnivå days up to the tier
/// total and as lägstanivå days beyond it. Unlike the day balance,
/// `days_remaining` is not floored and goes negative for an
/// over-allocated plan.
///
/// # Example
///
/// ```
/// use parental_leave_engine::calculation::summarize;
/// use parental_leave_engine::config::RuleConstants;
/// use parental_leave_engine::models::{Family, Parent, ParentRole, Scenario};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rules = RuleConstants::embedded().unwrap();
/// let parent = Parent::new("Anna", ParentRole::First, Decimal::from(35_000)).unwrap();
/// let family = Family::new(vec![parent], vec![]).unwrap();
/// let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
///
/// let summary = summarize(&Scenario::new("Plan 1"), &family, &rules, today);
/// assert_eq!(summary.total_days_used, Decimal::ZERO);
/// assert!(summary.warnings.is_empty());
/// ```
pub fn summarize(
    scenario: &Scenario,
    family: &Family,
    rules: &RuleConstants,
    today: NaiveDate,
) -> PlanSummary {
    let multiplicity = family
        .first_child()
        .map_or(Multiplicity::Single, |c| c.multiplicity);
    let total_allocated = rules.total_days(multiplicity);
    let tier1_total = Decimal::from(rules.tier1_total(multiplicity));

    let historical = |role| family.parent(role).map_or(0, Parent::parental_leave_days_taken);
    let parent1 = planned_consumption(scenario, ParentRole::First, historical(ParentRole::First));
    let parent2 = planned_consumption(scenario, ParentRole::Second, historical(ParentRole::Second));

    let historical_total = parent1.historical_days + parent2.historical_days;
    let historical_tier1 = historical_total.min(tier1_total);
    let historical_tier3 = historical_total - historical_tier1;

    let total_days_used = parent1.total() + parent2.total();
    let days_remaining = Decimal::from(total_allocated) - total_days_used;

    let projections = project_months(scenario, family, rules, today, DEFAULT_HORIZON_MONTHS);
    let leave_months: Vec<&MonthProjection> = projections
        .iter()
        .filter(|m| m.parent1_on_leave || m.parent2_on_leave)
        .collect();
    let leave_month_count = leave_months.len() as u32;

    let household_working = family
        .parents
        .iter()
        .map(|p| p.monthly_gross_income)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let total_income_on_leave = leave_months
        .iter()
        .map(|m| m.household_income)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let total_income_working = household_working.saturating_mul(Decimal::from(leave_month_count));
    let avg_monthly_household_income = if leave_month_count == 0 {
        Decimal::ZERO
    } else {
        total_income_on_leave / Decimal::from(leave_month_count)
    };

    let warnings = plan_warnings(&WarningInputs {
        family,
        rules,
        today,
        multiplicity,
        days_remaining,
        parent1: &parent1,
        parent2: &parent2,
    });

    debug!(
        scenario_id = %scenario.id,
        blocks = scenario.blocks.len(),
        days_used = %total_days_used,
        days_remaining = %days_remaining,
        leave_months = leave_month_count,
        warnings = warnings.len(),
        "Summarized scenario"
    );
    for warning in warnings.iter().filter(|w| w.is_urgent) {
        warn!(
            scenario_id = %scenario.id,
            code = ?warning.code,
            "{}",
            warning.message
        );
    }

    PlanSummary {
        total_allocated_days: total_allocated,
        total_days_used,
        days_remaining,
        tier1_days_used: parent1.tier1_days + parent2.tier1_days + historical_tier1,
        tier3_days_used: parent1.tier3_days + parent2.tier3_days + historical_tier3,
        parent1,
        parent2,
        leave_month_count,
        avg_monthly_household_income,
        total_income_on_leave,
        total_income_working,
        cost_of_leave: total_income_working.saturating_sub(total_income_on_leave),
        warnings,
    }
}

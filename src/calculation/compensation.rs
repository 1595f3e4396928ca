//! Compensation calculations.
//!
//! Converts a monthly gross income into daily and monthly benefit figures.
//! All functions are total over non-negative incomes, however large. A
//! negative income is floored to zero at the cap step rather than rejected
//! here; rejecting it is the job of
//! [`Parent::validate`](crate::models::Parent::validate). Sums saturate
//! instead of overflowing.

use rust_decimal::Decimal;

use crate::config::RuleConstants;
use crate::models::{Family, IncomeSummary, Parent, ParentIncome, PayLevel};

/// `annual x karens x rate / days_in_year`.
///
/// The two factors are multiplied into the annual income before the
/// division so that no intermediate value is rounded.
fn daily_from_annual(annual: Decimal, rules: &RuleConstants) -> Decimal {
    let comp = &rules.compensation;
    (annual * comp.karens_factor * comp.rate_factor) / Decimal::from(comp.days_in_year)
}

fn daily_payment_with_cap(monthly_income: Decimal, cap: Decimal, rules: &RuleConstants) -> Decimal {
    let yearly = monthly_income
        .max(Decimal::ZERO)
        .saturating_mul(Decimal::from(12));
    daily_from_annual(yearly.min(cap), rules)
}

/// Daily föräldrapenning at sjukpenningnivå (tier 1).
///
/// # Example
///
/// ```
/// use parental_leave_engine::calculation::daily_tier1_payment;
/// use parental_leave_engine::config::RuleConstants;
/// use rust_decimal::Decimal;
///
/// let rules = RuleConstants::embedded().unwrap();
/// let daily = daily_tier1_payment(Decimal::from(35_000), &rules);
/// assert_eq!(daily.round_dp(2), Decimal::new(89293, 2));
/// ```
pub fn daily_tier1_payment(monthly_income: Decimal, rules: &RuleConstants) -> Decimal {
    daily_payment_with_cap(monthly_income, rules.sgi_cap(), rules)
}

/// Daily VAB payment.
///
/// Same formula as [`daily_tier1_payment`] but with the lower VAB cap.
pub fn daily_vab_payment(monthly_income: Decimal, rules: &RuleConstants) -> Decimal {
    daily_payment_with_cap(monthly_income, rules.vab_cap(), rules)
}

/// Monthly föräldrapenning at sjukpenningnivå.
///
/// Uses the fixed month length from the rule table (30 days), not the
/// length of any calendar month.
pub fn monthly_on_leave(monthly_income: Decimal, rules: &RuleConstants) -> Decimal {
    daily_tier1_payment(monthly_income, rules) * Decimal::from(rules.compensation.days_in_month)
}

/// Illustrative monthly pay if the employer pays `top_up_percent` of salary.
///
/// This does not blend in the benefit; it is a standalone what-if figure.
pub fn monthly_with_employer_top_up(monthly_income: Decimal, top_up_percent: u32) -> Decimal {
    (monthly_income / Decimal::ONE_HUNDRED).saturating_mul(Decimal::from(top_up_percent))
}

/// Share of the salary kept on leave, in percent. Zero for zero income.
pub fn leave_income_percentage(monthly_income: Decimal, rules: &RuleConstants) -> Decimal {
    if monthly_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    monthly_on_leave(monthly_income, rules) / monthly_income * Decimal::ONE_HUNDRED
}

/// Highest possible daily föräldrapenning.
///
/// Equal to `daily_tier1_payment` for any income at or above the cap.
pub fn max_daily_tier1(rules: &RuleConstants) -> Decimal {
    daily_from_annual(rules.sgi_cap(), rules)
}

/// Highest possible daily VAB payment.
pub fn max_daily_vab(rules: &RuleConstants) -> Decimal {
    daily_from_annual(rules.vab_cap(), rules)
}

/// Daily payment for a block or day at the given tier.
pub fn daily_rate_for(pay_level: PayLevel, monthly_income: Decimal, rules: &RuleConstants) -> Decimal {
    match pay_level {
        PayLevel::SgiLevel => daily_tier1_payment(monthly_income, rules),
        PayLevel::BasicLevel => rules.compensation.basic_level_daily,
        PayLevel::NoCompensation => Decimal::ZERO,
    }
}

fn parent_income(parent: &Parent, rules: &RuleConstants) -> ParentIncome {
    let income = parent.monthly_gross_income;
    ParentIncome {
        role: parent.role,
        monthly_gross_income: income,
        daily_tier1: daily_tier1_payment(income, rules),
        daily_vab: daily_vab_payment(income, rules),
        monthly_on_leave: monthly_on_leave(income, rules),
        leave_income_percentage: leave_income_percentage(income, rules),
        monthly_with_top_up: parent
            .employer_top_up
            .map(|t| monthly_with_employer_top_up(income, t.percentage)),
        top_up_months: parent.employer_top_up.map(|t| t.months),
    }
}

/// Income figures for each parent and the household.
///
/// A missing parent contributes nothing to the household figures.
pub fn calculate_income(family: &Family, rules: &RuleConstants) -> IncomeSummary {
    let parent1 = family.parent1().map(|p| parent_income(p, rules));
    let parent2 = family.parent2().map(|p| parent_income(p, rules));

    let working: Decimal = [&parent1, &parent2]
        .iter()
        .filter_map(|p| p.as_ref())
        .map(|p| p.monthly_gross_income)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let both_on_leave: Decimal = [&parent1, &parent2]
        .iter()
        .filter_map(|p| p.as_ref())
        .map(|p| p.monthly_on_leave)
        .fold(Decimal::ZERO, Decimal::saturating_add);

    IncomeSummary {
        parent1,
        parent2,
        household_monthly_working: working,
        household_monthly_both_on_leave: both_on_leave,
        monthly_difference: working.saturating_sub(both_on_leave),
    }
}

//! Output types produced by the calculators.
//!
//! These structures capture everything the engine reports back to a UI or
//! to the advisory component: day balances, income figures, deadlines,
//! monthly projections and plan summaries with warnings. Amounts are exact
//! decimals; rounding happens only when formatting for display.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ParentRole;

/// One parent's share of the day balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentDayBalance {
    /// Which parent.
    pub role: ParentRole,
    /// Föräldrapenning days actually taken.
    pub days_taken: u32,
    /// Reserved days consumed, capped at the per-parent reservation.
    pub reserved_used: u32,
    /// Reserved days still available.
    pub reserved_remaining: u32,
}

/// Totals and remaining days for a family.
///
/// # Example
///
/// ```
/// use parental_leave_engine::models::DaySummary;
///
/// fn is_consistent(s: &DaySummary) -> bool {
///     s.remaining_tier1 + s.remaining_basic == s.remaining_total
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    /// All benefit days for the child, including any multiple-birth bonus.
    pub total_days: u32,
    /// Days at sjukpenningnivå, including any multiple-birth bonus.
    pub tier1_total: u32,
    /// Days at lägstanivå.
    pub basic_total: u32,
    /// Days taken by both parents together.
    pub days_taken_total: u32,
    /// Days remaining across both tiers.
    pub remaining_total: u32,
    /// Sjukpenningnivå days remaining.
    pub remaining_tier1: u32,
    /// Lägstanivå days remaining.
    pub remaining_basic: u32,
    /// First parent's balance.
    pub parent1: ParentDayBalance,
    /// Second parent's balance.
    pub parent2: ParentDayBalance,
    /// Freely distributable days remaining.
    pub shared_remaining: u32,
}

/// Income figures for one parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentIncome {
    /// Which parent.
    pub role: ParentRole,
    /// Monthly gross salary.
    pub monthly_gross_income: Decimal,
    /// Daily föräldrapenning at sjukpenningnivå.
    pub daily_tier1: Decimal,
    /// Daily VAB payment (lower cap).
    pub daily_vab: Decimal,
    /// Monthly föräldrapenning at sjukpenningnivå.
    pub monthly_on_leave: Decimal,
    /// Share of the salary kept on leave, in percent.
    pub leave_income_percentage: Decimal,
    /// Illustrative monthly figure if the employer pays its top-up.
    pub monthly_with_top_up: Option<Decimal>,
    /// Months the top-up is paid for.
    pub top_up_months: Option<u32>,
}

/// Income figures for the household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeSummary {
    /// First parent's figures.
    pub parent1: Option<ParentIncome>,
    /// Second parent's figures.
    pub parent2: Option<ParentIncome>,
    /// Household income when both work.
    pub household_monthly_working: Decimal,
    /// Household income when both are on leave at sjukpenningnivå.
    pub household_monthly_both_on_leave: Decimal,
    /// How much less the household has per month with both on leave.
    pub monthly_difference: Decimal,
}

/// The kind of a calendar deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineKind {
    /// The expected birth of a child not yet born.
    ExpectedBirth,
    /// The last day double days can be used.
    DoubleDaysExpiry,
    /// The save limit, after which only a capped number of days may remain.
    SaveLimit,
    /// The age at which every remaining day is forfeited.
    AllDaysExpiry,
}

impl DeadlineKind {
    /// Short description shown next to the date.
    pub fn description(self) -> &'static str {
        match self {
            DeadlineKind::ExpectedBirth => "Expected birth",
            DeadlineKind::DoubleDaysExpiry => "Double days expire",
            DeadlineKind::SaveLimit => "Save limit: unused days above the cap are forfeited",
            DeadlineKind::AllDaysExpiry => "All remaining days expire",
        }
    }
}

/// A dated deadline with its distance from today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineInfo {
    /// What the deadline is.
    pub kind: DeadlineKind,
    /// Human-readable description.
    pub description: String,
    /// The deadline date.
    pub date: NaiveDate,
    /// Whole days from today, floored at zero.
    pub days_until: u32,
    /// True when the date is before today.
    pub has_passed: bool,
    /// True when the deadline is close enough to act on.
    pub is_urgent: bool,
}

/// Projected income for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthProjection {
    /// First day of the month.
    pub month: NaiveDate,
    /// Whether the first parent has a block in this month.
    pub parent1_on_leave: bool,
    /// Whether the second parent has a block in this month.
    pub parent2_on_leave: bool,
    /// First parent's income for the month.
    pub parent1_income: Decimal,
    /// Second parent's income for the month.
    pub parent2_income: Decimal,
    /// Sum of both parents' income.
    pub household_income: Decimal,
}

/// Days one parent's blocks consume, by tier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParentConsumption {
    /// Sjukpenningnivå days planned.
    pub tier1_days: Decimal,
    /// Lägstanivå days planned.
    pub tier3_days: Decimal,
    /// Föräldrapenning days already taken.
    pub historical_days: Decimal,
}

impl ParentConsumption {
    /// Planned days across both tiers.
    pub fn planned(&self) -> Decimal {
        self.tier1_days + self.tier3_days
    }

    /// Planned plus already taken.
    pub fn total(&self) -> Decimal {
        self.planned() + self.historical_days
    }
}

/// Identifies the rule a plan warning comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    /// The plan uses more days than exist.
    OverAllocated,
    /// The plan uses more sjukpenningnivå days than exist.
    Tier1OverAllocated,
    /// One parent leaves reserved days unused while the other takes the rest.
    ReservedDaysUnused,
    /// Too many days remain with the save limit approaching.
    SaveLimitApproaching,
}

/// A warning attached to a plan summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanWarning {
    /// Which rule fired.
    pub code: WarningCode,
    /// Human-readable description.
    pub message: String,
    /// Urgent warnings need action; the rest are advice.
    pub is_urgent: bool,
}

/// Aggregated outcome of a leave plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Days available for the child.
    pub total_allocated_days: u32,
    /// Planned plus already taken days.
    pub total_days_used: Decimal,
    /// Allocated minus used. Negative when the plan is over-allocated.
    pub days_remaining: Decimal,
    /// Sjukpenningnivå days used, planned and historical.
    pub tier1_days_used: Decimal,
    /// Lägstanivå days used, planned and historical.
    pub tier3_days_used: Decimal,
    /// First parent's consumption.
    pub parent1: ParentConsumption,
    /// Second parent's consumption.
    pub parent2: ParentConsumption,
    /// Months in the projection where at least one parent is on leave.
    pub leave_month_count: u32,
    /// Average household income over those months.
    pub avg_monthly_household_income: Decimal,
    /// Household income over those months.
    pub total_income_on_leave: Decimal,
    /// What the household would have earned working over those months.
    pub total_income_working: Decimal,
    /// Working income minus on-leave income.
    pub cost_of_leave: Decimal,
    /// Warnings, in rule order.
    pub warnings: Vec<PlanWarning>,
}

impl PlanSummary {
    /// True when any warning is urgent.
    pub fn has_urgent_warnings(&self) -> bool {
        self.warnings.iter().any(|w| w.is_urgent)
    }

    /// True when a warning with the given code fired.
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

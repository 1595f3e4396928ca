//! Rule constant types.
//!
//! This module contains the strongly-typed rule table that is deserialized
//! from a YAML file per rule-year. Consumers treat a loaded table as frozen
//! input and never mutate it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Multiplicity;

/// Factors and flat rates used to turn an income into a daily payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationRules {
    /// Reduction applied to the annual income before the rate (0.97).
    pub karens_factor: Decimal,
    /// Replacement rate at sjukpenningnivå (0.80).
    pub rate_factor: Decimal,
    /// Flat daily rate at lägstanivå (tier 3).
    pub basic_level_daily: Decimal,
    /// Flat daily rate at grundnivå for parents without qualifying SGI (tier 2).
    pub minimum_level_daily: Decimal,
    /// Divisor turning an annual figure into a daily one.
    pub days_in_year: u32,
    /// Fixed month length used for monthly figures. Not the calendar length.
    pub days_in_month: u32,
}

/// Day allocations per child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAllocation {
    /// Total benefit days per child.
    pub total_per_child: u32,
    /// Days paid at sjukpenningnivå.
    pub sgi_level: u32,
    /// Days paid at lägstanivå.
    pub basic_level: u32,
    /// Days reserved for each parent, not transferable.
    pub reserved_per_parent: u32,
    /// Days freely distributable between parents.
    pub shared: u32,
    /// Flat bonus for twins, added to the SGI-level tier.
    pub twin_bonus: u32,
    /// Flat bonus for triplets or more, added to the SGI-level tier.
    pub triplet_bonus: u32,
    /// SGI-level days that must be taken before lägstanivå days can be used.
    pub min_sgi_days_before_basic: u32,
    /// Days transferable to someone who is not a parent.
    pub max_days_to_non_parent: u32,
    /// Same, for a sole custodian.
    pub max_days_to_non_parent_sole_custodian: u32,
}

/// Double days: both parents drawing benefit on the same day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoubleDayRules {
    /// Number of double days available.
    pub count: u32,
    /// Age in months after which double days can no longer be used.
    pub max_child_age_months: u32,
}

/// Age-based deadlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadlineRules {
    /// Age at which the save limit applies.
    pub save_limit_age_years: u32,
    /// Days that may remain unused past the save limit.
    pub max_days_saveable_after_save_limit: u32,
    /// Same, for twins or more.
    pub max_days_saveable_after_save_limit_multiples: u32,
    /// Age at which every remaining day is forfeited.
    pub all_days_expiry_age_years: u32,
    /// How far back an application may reach.
    pub retroactive_application_days: u32,
}

/// Child-sick-care (VAB) rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VabRules {
    /// Annual VAB day cap per child.
    pub days_per_child_per_year: u32,
    /// Minimum child age in months.
    pub min_age_months: u32,
    /// Maximum child age in years.
    pub max_age_years: u32,
    /// Maximum age for seriously ill children.
    pub serious_illness_max_age_years: u32,
}

/// The complete rule table for one rule-year.
///
/// # Example
///
/// ```
/// use parental_leave_engine::config::RuleConstants;
/// use parental_leave_engine::models::Multiplicity;
///
/// let rules = RuleConstants::embedded().unwrap();
/// assert_eq!(rules.year, 2026);
/// assert_eq!(rules.total_days(Multiplicity::Twins), 660);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConstants {
    /// The rule-year this table applies from.
    pub year: i32,
    /// Prisbasbelopp.
    pub base_amount: Decimal,
    /// SGI cap for föräldrapenning, as a multiple of the base amount.
    pub sgi_cap_multiplier: Decimal,
    /// SGI cap for VAB, as a multiple of the base amount. Lower than the above.
    pub vab_cap_multiplier: Decimal,
    /// Compensation factors and flat rates.
    pub compensation: CompensationRules,
    /// Day allocations.
    pub days: DayAllocation,
    /// Double day rules.
    pub double_days: DoubleDayRules,
    /// Deadline ages.
    pub deadlines: DeadlineRules,
    /// VAB rules.
    pub vab: VabRules,
    /// Allowed fractions of a day that a block may draw.
    pub part_time_levels: Vec<Decimal>,
    /// Date the adjacent-workday weekend rule took effect.
    pub weekend_rule_effective: NaiveDate,
}

impl RuleConstants {
    /// Annual income cap for föräldrapenning.
    pub fn sgi_cap(&self) -> Decimal {
        self.base_amount * self.sgi_cap_multiplier
    }

    /// Annual income cap for VAB.
    pub fn vab_cap(&self) -> Decimal {
        self.base_amount * self.vab_cap_multiplier
    }

    /// Föräldrapenning cap expressed as a monthly income.
    pub fn sgi_cap_monthly(&self) -> Decimal {
        self.sgi_cap() / Decimal::from(12)
    }

    /// VAB cap expressed as a monthly income.
    pub fn vab_cap_monthly(&self) -> Decimal {
        self.vab_cap() / Decimal::from(12)
    }

    /// Extra days granted for a multiple birth.
    pub fn multiplicity_bonus(&self, multiplicity: Multiplicity) -> u32 {
        match multiplicity {
            Multiplicity::Single => 0,
            Multiplicity::Twins => self.days.twin_bonus,
            Multiplicity::TripletsOrMore => self.days.triplet_bonus,
        }
    }

    /// Total benefit days for a child of the given multiplicity.
    pub fn total_days(&self, multiplicity: Multiplicity) -> u32 {
        self.days.total_per_child + self.multiplicity_bonus(multiplicity)
    }

    /// SGI-level days for a child of the given multiplicity.
    ///
    /// The multiplicity bonus extends this tier, not the basic tier.
    pub fn tier1_total(&self, multiplicity: Multiplicity) -> u32 {
        self.days.sgi_level + self.multiplicity_bonus(multiplicity)
    }

    /// Days that may remain unused once the save limit has passed.
    pub fn max_days_saveable(&self, multiplicity: Multiplicity) -> u32 {
        match multiplicity {
            Multiplicity::Single => self.deadlines.max_days_saveable_after_save_limit,
            Multiplicity::Twins | Multiplicity::TripletsOrMore => {
                self.deadlines.max_days_saveable_after_save_limit_multiples
            }
        }
    }
}

//! Parent model and related types.
//!
//! A parent carries the income facts used by the compensation calculator
//! and owns the leave days they have logged.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::is_weekday;
use crate::error::{EngineError, EngineResult};

use super::{LeaveDayRecord, LeaveDayType, PayLevel};

/// The ordinal role of a parent in the family.
///
/// Roles only affect display and ordering; entitlement math treats both
/// parents symmetrically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentRole {
    /// Förälder 1.
    First,
    /// Förälder 2.
    Second,
}

impl ParentRole {
    /// Returns the other role.
    pub fn other(self) -> Self {
        match self {
            ParentRole::First => ParentRole::Second,
            ParentRole::Second => ParentRole::First,
        }
    }
}

impl std::fmt::Display for ParentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParentRole::First => write!(f, "Förälder 1"),
            ParentRole::Second => write!(f, "Förälder 2"),
        }
    }
}

/// Highest monthly gross income accepted, in kronor.
pub const MAX_MONTHLY_INCOME: u32 = 100_000_000;

/// Salary top-up paid by an employer during parental leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerTopUp {
    /// Share of the gross salary paid, in percent (typically 80-100).
    pub percentage: u32,
    /// How many months the top-up is paid for.
    pub months: u32,
}

/// A parent in the family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parent {
    /// Unique identifier for the parent.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// First or second parent.
    pub role: ParentRole,
    /// Monthly gross income in kronor.
    pub monthly_gross_income: Decimal,
    /// Optional employer top-up.
    #[serde(default)]
    pub employer_top_up: Option<EmployerTopUp>,
    /// Logged leave days.
    #[serde(default)]
    pub leave_days: Vec<LeaveDayRecord>,
}

impl Parent {
    /// Creates a parent with no logged days.
    ///
    /// Returns `InvalidParent` if the income is negative or above
    /// [`MAX_MONTHLY_INCOME`].
    ///
    /// # Example
    ///
    /// ```
    /// use parental_leave_engine::models::{Parent, ParentRole};
    /// use rust_decimal::Decimal;
    ///
    /// let parent = Parent::new("Anna", ParentRole::First, Decimal::from(35_000)).unwrap();
    /// assert_eq!(parent.parental_leave_days_taken(), 0);
    /// assert!(Parent::new("Bo", ParentRole::Second, Decimal::from(-1)).is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        role: ParentRole,
        monthly_gross_income: Decimal,
    ) -> EngineResult<Self> {
        let parent = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role,
            monthly_gross_income,
            employer_top_up: None,
            leave_days: Vec::new(),
        };
        parent.validate()?;
        Ok(parent)
    }

    /// Attaches an employer top-up.
    pub fn with_top_up(mut self, percentage: u32, months: u32) -> EngineResult<Self> {
        self.employer_top_up = Some(EmployerTopUp { percentage, months });
        self.validate()?;
        Ok(self)
    }

    /// Checks the record for values the engine cannot work with.
    pub fn validate(&self) -> EngineResult<()> {
        if self.monthly_gross_income < Decimal::ZERO {
            return Err(EngineError::InvalidParent {
                field: "monthly_gross_income".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if self.monthly_gross_income > Decimal::from(MAX_MONTHLY_INCOME) {
            return Err(EngineError::InvalidParent {
                field: "monthly_gross_income".to_string(),
                message: format!(
                    "{} is above the limit of {} kr",
                    self.monthly_gross_income, MAX_MONTHLY_INCOME
                ),
            });
        }

        if let Some(top_up) = self.employer_top_up {
            if top_up.percentage > 100 {
                return Err(EngineError::InvalidParent {
                    field: "employer_top_up.percentage".to_string(),
                    message: format!("{} is above 100", top_up.percentage),
                });
            }
        }

        Ok(())
    }

    /// Logs a day and returns a reference to the stored record.
    pub fn log_day(
        &mut self,
        date: NaiveDate,
        leave_type: LeaveDayType,
        pay_level: PayLevel,
        is_planned: bool,
    ) -> &LeaveDayRecord {
        self.leave_days
            .push(LeaveDayRecord::new(date, leave_type, pay_level, is_planned));
        &self.leave_days[self.leave_days.len() - 1]
    }

    /// Deletes a logged day. Returns the removed record, if it existed.
    pub fn remove_day(&mut self, id: Uuid) -> Option<LeaveDayRecord> {
        let index = self.leave_days.iter().position(|d| d.id == id)?;
        Some(self.leave_days.remove(index))
    }

    /// Seeds actual föräldrapenning days for days already taken before
    /// the family started tracking.
    ///
    /// Days are placed on weekdays walking backwards from `today`, never
    /// before `birth_date`. Returns how many days were seeded, which is
    /// less than `count` when the window runs out of weekdays.
    pub fn seed_taken_days(&mut self, count: u32, birth_date: NaiveDate, today: NaiveDate) -> u32 {
        let mut seeded = 0;
        let mut date = today;

        while seeded < count && date >= birth_date {
            if is_weekday(date) {
                self.leave_days.push(LeaveDayRecord::new(
                    date,
                    LeaveDayType::ParentalLeave,
                    PayLevel::SgiLevel,
                    false,
                ));
                seeded += 1;
            }
            match date.pred_opt() {
                Some(previous) => date = previous,
                None => break,
            }
        }

        seeded
    }

    /// Number of days actually taken, of any type.
    pub fn days_taken(&self) -> u32 {
        self.count_days(|d| !d.is_planned)
    }

    /// Number of planned days, of any type.
    pub fn days_planned(&self) -> u32 {
        self.count_days(|d| d.is_planned)
    }

    /// Number of föräldrapenning days actually taken.
    pub fn parental_leave_days_taken(&self) -> u32 {
        self.count_days(LeaveDayRecord::is_taken_parental_leave)
    }

    /// Number of VAB days actually taken.
    pub fn vab_days_taken(&self) -> u32 {
        self.count_days(|d| !d.is_planned && d.leave_type == LeaveDayType::ChildSickCare)
    }

    /// Number of VAB days actually taken in the given calendar year.
    pub fn vab_days_in_year(&self, year: i32) -> u32 {
        self.count_days(|d| {
            !d.is_planned && d.leave_type == LeaveDayType::ChildSickCare && d.date.year() == year
        })
    }

    fn count_days(&self, predicate: impl Fn(&LeaveDayRecord) -> bool) -> u32 {
        self.leave_days.iter().filter(|d| predicate(d)).count() as u32
    }
}

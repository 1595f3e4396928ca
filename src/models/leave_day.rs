//! Logged leave days and their classification enums.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of leave a day was taken as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveDayType {
    /// Föräldrapenning.
    ParentalLeave,
    /// Vård av barn (VAB), child-sick-care.
    ChildSickCare,
    /// Leave without benefit.
    Unpaid,
}

/// The compensation tier a day or block is paid at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayLevel {
    /// Sjukpenningnivå, income-proportional and capped (tier 1).
    SgiLevel,
    /// Lägstanivå, flat daily rate (tier 3).
    BasicLevel,
    /// No compensation.
    #[serde(rename = "none")]
    NoCompensation,
}

/// A single logged or planned day of leave.
///
/// Records are immutable once created; the only lifecycle operation after
/// creation is deletion from the owning parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveDayRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The calendar date of the leave day.
    pub date: NaiveDate,
    /// What kind of leave the day was.
    pub leave_type: LeaveDayType,
    /// The tier the day was paid at.
    pub pay_level: PayLevel,
    /// True for a planned day, false for one actually taken.
    pub is_planned: bool,
}

impl LeaveDayRecord {
    /// Creates a new record with a fresh identifier.
    pub fn new(date: NaiveDate, leave_type: LeaveDayType, pay_level: PayLevel, is_planned: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            leave_type,
            pay_level,
            is_planned,
        }
    }

    /// Returns true for a föräldrapenning day that has actually been taken.
    pub fn is_taken_parental_leave(&self) -> bool {
        !self.is_planned && self.leave_type == LeaveDayType::ParentalLeave
    }
}

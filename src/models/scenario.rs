//! Leave plans: scenarios and the leave blocks they own.
//!
//! A scenario is a named plan holding blocks of leave for each parent.
//! Blocks use half-open date ranges `[start_date, end_date)`.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::calculation::count_weekdays;
use crate::error::{EngineError, EngineResult};

use super::{ParentRole, PayLevel};

/// A fraction outside the supported part-time levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported leave fraction {0}; expected one of 1, 0.75, 0.5, 0.25, 0.125")]
pub struct UnsupportedFraction(pub Decimal);

/// The share of a full day a leave block draws.
///
/// The inverse of how much the parent works on those days: a parent
/// working 75% draws a quarter day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub enum LeaveFraction {
    /// Whole day.
    Full,
    /// Three quarters.
    ThreeQuarters,
    /// Half day.
    Half,
    /// Quarter day.
    Quarter,
    /// One eighth.
    Eighth,
}

impl LeaveFraction {
    /// All supported fractions, largest first.
    pub const ALL: [LeaveFraction; 5] = [
        LeaveFraction::Full,
        LeaveFraction::ThreeQuarters,
        LeaveFraction::Half,
        LeaveFraction::Quarter,
        LeaveFraction::Eighth,
    ];

    /// The fraction as an exact decimal.
    pub fn as_decimal(self) -> Decimal {
        match self {
            LeaveFraction::Full => Decimal::ONE,
            LeaveFraction::ThreeQuarters => Decimal::new(75, 2),
            LeaveFraction::Half => Decimal::new(5, 1),
            LeaveFraction::Quarter => Decimal::new(25, 2),
            LeaveFraction::Eighth => Decimal::new(125, 3),
        }
    }

    /// Display form used in the planner, e.g. "12,5%".
    pub fn percentage_display(self) -> &'static str {
        match self {
            LeaveFraction::Full => "100%",
            LeaveFraction::ThreeQuarters => "75%",
            LeaveFraction::Half => "50%",
            LeaveFraction::Quarter => "25%",
            LeaveFraction::Eighth => "12,5%",
        }
    }
}

impl TryFrom<Decimal> for LeaveFraction {
    type Error = UnsupportedFraction;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_decimal() == value)
            .ok_or(UnsupportedFraction(value))
    }
}

impl From<LeaveFraction> for Decimal {
    fn from(fraction: LeaveFraction) -> Self {
        fraction.as_decimal()
    }
}

/// A continuous period of leave for one parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBlock {
    /// Unique identifier for the block.
    pub id: Uuid,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// First day after the leave (exclusive).
    pub end_date: NaiveDate,
    /// Which parent takes the leave.
    pub parent: ParentRole,
    /// The compensation tier drawn.
    pub pay_level: PayLevel,
    /// Share of each day drawn.
    pub fraction: LeaveFraction,
}

impl LeaveBlock {
    /// Creates a validated block.
    ///
    /// # Example
    ///
    /// ```
    /// use parental_leave_engine::models::{LeaveBlock, LeaveFraction, ParentRole, PayLevel};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// // Monday 2026-11-02 up to (not including) Monday 2026-11-09
    /// let block = LeaveBlock::new(
    ///     NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 11, 9).unwrap(),
    ///     ParentRole::First,
    ///     PayLevel::SgiLevel,
    ///     LeaveFraction::Full,
    /// ).unwrap();
    /// assert_eq!(block.weekday_count(), 5);
    /// assert_eq!(block.days_consumed(), Decimal::from(5));
    /// ```
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        parent: ParentRole,
        pay_level: PayLevel,
        fraction: LeaveFraction,
    ) -> EngineResult<Self> {
        let block = Self {
            id: Uuid::new_v4(),
            start_date,
            end_date,
            parent,
            pay_level,
            fraction,
        };
        block.validate()?;
        Ok(block)
    }

    /// Rejects blocks whose end is not after their start.
    pub fn validate(&self) -> EngineResult<()> {
        if self.end_date <= self.start_date {
            return Err(EngineError::InvalidLeaveBlock {
                block_id: self.id,
                message: format!(
                    "end date {} must be after start date {}",
                    self.end_date, self.start_date
                ),
            });
        }
        Ok(())
    }

    /// Calendar days in the block.
    pub fn calendar_days(&self) -> u32 {
        (self.end_date - self.start_date).num_days().max(0) as u32
    }

    /// Monday to Friday days in the block.
    pub fn weekday_count(&self) -> u32 {
        count_weekdays(self.start_date, self.end_date)
    }

    /// Benefit days consumed: weekdays times the fraction drawn.
    pub fn days_consumed(&self) -> Decimal {
        Decimal::from(self.weekday_count()) * self.fraction.as_decimal()
    }

    /// Whole months spanned, at least one. Used for display.
    pub fn months_span(&self) -> u32 {
        let mut months = (self.end_date.year() - self.start_date.year()) * 12
            + self.end_date.month() as i32
            - self.start_date.month() as i32;
        if self.end_date.day() < self.start_date.day() {
            months -= 1;
        }
        months.max(1) as u32
    }

    /// True when the block shares at least one day with `[from, until)`.
    pub fn intersects(&self, from: NaiveDate, until: NaiveDate) -> bool {
        self.start_date < until && self.end_date > from
    }

    /// True when two blocks share at least one day.
    pub fn overlaps(&self, other: &LeaveBlock) -> bool {
        self.intersects(other.start_date, other.end_date)
    }
}

/// A named leave plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique identifier for the scenario.
    pub id: Uuid,
    /// Display name, e.g. "Plan 1".
    pub name: String,
    /// The leave blocks, in insertion order.
    #[serde(default)]
    pub blocks: Vec<LeaveBlock>,
}

impl Scenario {
    /// Creates an empty scenario.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            blocks: Vec::new(),
        }
    }

    /// Adds a block after validating it.
    ///
    /// Blocks for the same parent may not overlap. Blocks for different
    /// parents may, since both parents can be on leave at once.
    pub fn add_block(&mut self, block: LeaveBlock) -> EngineResult<()> {
        block.validate()?;

        if let Some(existing) = self
            .blocks
            .iter()
            .find(|b| b.parent == block.parent && b.overlaps(&block))
        {
            return Err(EngineError::InvalidLeaveBlock {
                block_id: block.id,
                message: format!(
                    "overlaps block {} ({} to {}) for the same parent",
                    existing.id, existing.start_date, existing.end_date
                ),
            });
        }

        self.blocks.push(block);
        Ok(())
    }

    /// Removes a block. Returns the removed block, if it existed.
    pub fn remove_block(&mut self, id: Uuid) -> Option<LeaveBlock> {
        let index = self.blocks.iter().position(|b| b.id == id)?;
        Some(self.blocks.remove(index))
    }

    /// Validates every block and the no-overlap rule.
    pub fn validate(&self) -> EngineResult<()> {
        let mut checked = Scenario::new(self.name.clone());
        for block in &self.blocks {
            checked.add_block(block.clone())?;
        }
        Ok(())
    }

    /// All blocks sorted by start date.
    pub fn sorted_blocks(&self) -> Vec<&LeaveBlock> {
        let mut blocks: Vec<&LeaveBlock> = self.blocks.iter().collect();
        blocks.sort_by_key(|b| b.start_date);
        blocks
    }

    /// One parent's blocks sorted by start date.
    pub fn blocks_for(&self, parent: ParentRole) -> Vec<&LeaveBlock> {
        let mut blocks: Vec<&LeaveBlock> =
            self.blocks.iter().filter(|b| b.parent == parent).collect();
        blocks.sort_by_key(|b| b.start_date);
        blocks
    }
}

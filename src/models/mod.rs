//! Core data models for the parental leave engine.
//!
//! Input snapshots (family, parents, children, logged days, scenarios) and
//! the output types the calculators produce.

mod child;
mod family;
mod leave_day;
mod parent;
mod scenario;
mod summaries;

pub use child::{Child, Multiplicity};
pub use family::{Family, KnowledgeLevel, MAX_SCENARIOS, PlanningPriority};
pub use leave_day::{LeaveDayRecord, LeaveDayType, PayLevel};
pub use parent::{EmployerTopUp, MAX_MONTHLY_INCOME, Parent, ParentRole};
pub use scenario::{LeaveBlock, LeaveFraction, Scenario, UnsupportedFraction};
pub use summaries::{
    DaySummary, DeadlineInfo, DeadlineKind, IncomeSummary, MonthProjection, ParentConsumption,
    ParentDayBalance, ParentIncome, PlanSummary, PlanWarning, WarningCode,
};

//! Calculation logic for the parental leave engine.
//!
//! This module contains the pure calculators: weekday counting, daily and
//! monthly compensation, day balances, deadlines, scenario projection and
//! plan summaries, plus Swedish display formatting and the facts handed to
//! the advisory component. None of them read the clock; date-relative
//! functions take `today` explicitly.

mod advisory;
mod compensation;
mod day_balance;
mod deadlines;
mod formatting;
mod scenario_projection;
mod weekdays;

pub use advisory::{AdvisoryFacts, AdvisoryTopic, Nudge, build_advisory_facts};
pub use compensation::{
    calculate_income, daily_rate_for, daily_tier1_payment, daily_vab_payment,
    leave_income_percentage, max_daily_tier1, max_daily_vab, monthly_on_leave,
    monthly_with_employer_top_up,
};
pub use day_balance::{calculate_days, excess_over_reserved, reserved_used, vab_days_remaining};
pub use deadlines::{
    all_days_expiry_date, all_deadlines, days_until, deadline_for_child, double_days_expiry_date,
    next_deadline, save_limit_date,
};
pub use formatting::{format_currency, format_days_until};
pub use scenario_projection::{
    DEFAULT_HORIZON_MONTHS, MAX_HORIZON_MONTHS, project_months, summarize,
};
pub use weekdays::{count_weekdays, is_weekday};

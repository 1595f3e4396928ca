//! Rule constants and their loading.
//!
//! Every numeric policy parameter (caps, factors, day allocations, deadline
//! ages) lives in a YAML table per rule-year. Tables are loaded once and
//! passed into the calculation functions as frozen input.
//!
//! # Example
//!
//! ```no_run
//! use parental_leave_engine::config::RulesLoader;
//!
//! let loader = RulesLoader::load("./config/rules").unwrap();
//! println!("Rule year: {}", loader.latest().unwrap().year);
//! ```

mod loader;
mod types;

pub use loader::RulesLoader;
pub use types::{
    CompensationRules, DayAllocation, DeadlineRules, DoubleDayRules, RuleConstants, VabRules,
};

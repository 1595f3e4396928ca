//! Error types for the parental leave engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Errors are raised at the boundary (loading rules, constructing or
//! validating family snapshots). The calculation functions themselves are
//! total and never fail on well-formed input.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the parental leave engine.
///
/// # Example
///
/// ```
/// use parental_leave_engine::error::EngineError;
///
/// let error = EngineError::RulesNotFound { year: 2019 };
/// assert_eq!(error.to_string(), "No rule table effective for year 2019");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A rule table parsed but its numbers are inconsistent.
    #[error("Invalid rule table for {year}: {message}")]
    InvalidRules {
        /// The rule-year of the table.
        year: i32,
        /// Which invariant was violated.
        message: String,
    },

    /// No rule table is effective for the requested year.
    #[error("No rule table effective for year {year}")]
    RulesNotFound {
        /// The requested rule-year.
        year: i32,
    },

    /// A leave block was malformed or conflicts with another block.
    #[error("Invalid leave block '{block_id}': {message}")]
    InvalidLeaveBlock {
        /// The ID of the offending block.
        block_id: Uuid,
        /// A description of what made the block invalid.
        message: String,
    },

    /// A parent record was invalid.
    #[error("Invalid parent field '{field}': {message}")]
    InvalidParent {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A child record was invalid.
    #[error("Invalid child field '{field}': {message}")]
    InvalidChild {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The family already holds the maximum number of scenarios.
    #[error("Scenario limit reached: a family may hold at most {limit} scenarios")]
    ScenarioLimitReached {
        /// The maximum number of scenarios.
        limit: usize,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

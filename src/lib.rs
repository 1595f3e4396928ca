//! Parental Leave Engine for Swedish föräldrapenning
//!
//! This crate computes day balances, daily and monthly compensation,
//! deadlines and month-by-month leave plan projections from a family
//! snapshot and a versioned table of rule constants. An axum router
//! exposes the same calculations over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

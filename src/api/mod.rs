//! HTTP API module for the parental leave engine.
//!
//! This module exposes the calculators as JSON endpoints. Each request
//! carries a full family snapshot; the server keeps no per-family state.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ChildRequest, FamilyRequest, LeaveBlockRequest, LeaveDayRequest, ParentRequest,
    PlanningRequest, ScenarioRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, BlockOverview, DaysResponse, DeadlinesResponse,
    ProjectionResponse, VabBalance,
};
pub use state::AppState;

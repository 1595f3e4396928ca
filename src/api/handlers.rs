//! HTTP request handlers for the parental leave engine API.
//!
//! Every endpoint takes a [`PlanningRequest`], resolves the rule table and
//! the calculation date, converts the snapshot into validated domain types
//! and runs one calculator. Calculations are synchronous and pure; the
//! handlers only add request parsing, logging and error mapping.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    DEFAULT_HORIZON_MONTHS, MAX_HORIZON_MONTHS, all_deadlines, build_advisory_facts,
    calculate_days, calculate_income, next_deadline, project_months, summarize,
    vab_days_remaining,
};
use crate::config::RuleConstants;
use crate::models::{Family, Scenario};

use super::request::{PlanningRequest, ScenarioRequest};
use super::response::{
    ApiError, ApiErrorResponse, BlockOverview, DaysResponse, DeadlinesResponse,
    ProjectionResponse, VabBalance,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/days", post(days_handler))
        .route("/income", post(income_handler))
        .route("/deadlines", post(deadlines_handler))
        .route("/scenario/projection", post(projection_handler))
        .route("/scenario/summary", post(summary_handler))
        .route("/advisory", post(advisory_handler))
        .with_state(state)
}

type Payload = Result<Json<PlanningRequest>, JsonRejection>;

/// A request converted into domain types, with its rule table resolved.
struct PlanningContext<'a> {
    family: Family,
    scenario: Option<Scenario>,
    rules: &'a RuleConstants,
    today: NaiveDate,
    horizon_months: u32,
}

impl PlanningContext<'_> {
    fn scenario(&self) -> Result<&Scenario, ApiErrorResponse> {
        self.scenario
            .as_ref()
            .ok_or_else(|| ApiErrorResponse::bad_request(ApiError::missing_field("scenario")))
    }
}

fn prepare(state: &AppState, request: PlanningRequest) -> Result<PlanningContext<'_>, ApiErrorResponse> {
    let today = request.as_of.unwrap_or_else(|| Local::now().date_naive());
    let rule_year = request.rule_year.unwrap_or_else(|| today.year());
    let rules = state.rules().rules_for_year(rule_year)?;

    let family = request.family.into_family(rules, today)?;
    let scenario = request
        .scenario
        .map(ScenarioRequest::into_scenario)
        .transpose()?;
    let horizon_months = request
        .horizon_months
        .unwrap_or(DEFAULT_HORIZON_MONTHS)
        .min(MAX_HORIZON_MONTHS);

    Ok(PlanningContext {
        family,
        scenario,
        rules,
        today,
        horizon_months,
    })
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Parses, prepares and runs one calculation, logging under a fresh
/// correlation ID.
fn run<T, F>(state: &AppState, payload: Payload, endpoint: &'static str, calculate: F) -> Response
where
    T: Serialize,
    F: FnOnce(&PlanningContext<'_>) -> Result<T, ApiErrorResponse>,
{
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, endpoint, "Processing request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_error(rejection, correlation_id),
            );
        }
    };

    let start_time = Instant::now();
    match prepare(state, request).and_then(|ctx| calculate(&ctx)) {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                endpoint,
                duration_us = start_time.elapsed().as_micros(),
                "Request completed successfully"
            );
            json_response(StatusCode::OK, body)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                endpoint,
                code = %err.error.code,
                error = %err.error.message,
                "Request failed"
            );
            json_response(err.status, err.error)
        }
    }
}

/// Handler for POST /days: the day balance and per-parent VAB balance.
async fn days_handler(State(state): State<AppState>, payload: Payload) -> Response {
    run(&state, payload, "days", |ctx| {
        let vab = ctx
            .family
            .parents
            .iter()
            .map(|p| VabBalance {
                role: p.role,
                days_remaining: vab_days_remaining(p, ctx.today.year(), ctx.rules),
            })
            .collect();
        Ok(DaysResponse {
            balance: calculate_days(&ctx.family, ctx.rules),
            vab,
        })
    })
}

/// Handler for POST /income.
async fn income_handler(State(state): State<AppState>, payload: Payload) -> Response {
    run(&state, payload, "income", |ctx| {
        Ok(calculate_income(&ctx.family, ctx.rules))
    })
}

/// Handler for POST /deadlines.
async fn deadlines_handler(State(state): State<AppState>, payload: Payload) -> Response {
    run(&state, payload, "deadlines", |ctx| {
        let all = ctx
            .family
            .first_child()
            .map(|child| all_deadlines(child, ctx.rules, ctx.today))
            .unwrap_or_default();
        Ok(DeadlinesResponse {
            next: next_deadline(&ctx.family, ctx.rules, ctx.today),
            all,
        })
    })
}

/// Handler for POST /scenario/projection.
async fn projection_handler(State(state): State<AppState>, payload: Payload) -> Response {
    run(&state, payload, "scenario/projection", |ctx| {
        let scenario = ctx.scenario()?;
        Ok(ProjectionResponse {
            months: project_months(
                scenario,
                &ctx.family,
                ctx.rules,
                ctx.today,
                ctx.horizon_months,
            ),
            blocks: scenario
                .sorted_blocks()
                .into_iter()
                .map(BlockOverview::from)
                .collect(),
        })
    })
}

/// Handler for POST /scenario/summary.
async fn summary_handler(State(state): State<AppState>, payload: Payload) -> Response {
    run(&state, payload, "scenario/summary", |ctx| {
        Ok(summarize(ctx.scenario()?, &ctx.family, ctx.rules, ctx.today))
    })
}

/// Handler for POST /advisory.
async fn advisory_handler(State(state): State<AppState>, payload: Payload) -> Response {
    run(&state, payload, "advisory", |ctx| {
        Ok(build_advisory_facts(&ctx.family, ctx.rules, ctx.today))
    })
}

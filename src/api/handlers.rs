//! HTTP request handlers for the salary engine API.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{CalculationContext, calculate_pay_statement};
use crate::error::{EngineError, EngineResult};
use crate::models::YearMonth;

use super::request::CalculationRequest;
use super::response::{AnnualPlanResponse, ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/employees/:no/annual-plan", get(annual_plan_handler))
        .with_state(state)
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Runs store-backed work on tokio's blocking pool.
///
/// Store lookups are synchronous and may wait on a connection lock or disk.
async fn run_blocking<T, F>(state: AppState, work: F) -> EngineResult<T>
where
    T: Send + 'static,
    F: FnOnce(&AppState) -> EngineResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || work(&state))
        .await
        .map_err(|err| EngineError::CalculationError {
            message: format!("calculation task failed: {}", err),
        })?
}

fn json_rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
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

/// Handler for POST /calculate.
///
/// Calculates the pay statement for one employee and month.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = json_rejection_error(rejection, correlation_id);
            return error_response(ApiErrorResponse::bad_request(error));
        }
    };

    let year_month = match YearMonth::from_yyyymm(request.year_month) {
        Ok(ym) => ym,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                year_month = request.year_month,
                "Invalid year-month"
            );
            return error_response(err.into());
        }
    };

    let employee_no = request.employee_no;
    let result = run_blocking(state, move |state| {
        let ctx =
            CalculationContext::load(state.store(), employee_no, state.clock(), state.rules())?;
        calculate_pay_statement(&ctx, year_month)
    })
    .await;

    match result {
        Ok(statement) => {
            info!(
                correlation_id = %correlation_id,
                calculation_id = %statement.calculation_id,
                employee_no = statement.employee_no,
                year_month = %year_month,
                take_home = statement.take_home,
                duration_us = statement.audit_trace.duration_us,
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(statement),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_no = request.employee_no,
                error = %err,
                "Calculation failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /employees/{no}/annual-plan.
async fn annual_plan_handler(
    State(state): State<AppState>,
    employee_no: Result<Path<u32>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let employee_no = match employee_no {
        Ok(Path(no)) => no,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid employee number"
            );
            return error_response(ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            )));
        }
    };
    info!(correlation_id = %correlation_id, employee_no, "Processing annual plan request");

    let result = run_blocking(state, move |state| {
        let ctx =
            CalculationContext::load(state.store(), employee_no, state.clock(), state.rules())?;
        Ok(AnnualPlanResponse {
            employee_no,
            capability_rank: ctx.capability().rank.clone(),
            annual_total_salary_plan: ctx.annual_total_salary_plan()?,
        })
    })
    .await;

    match result {
        Ok(body) => {
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(body),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_no,
                error = %err,
                "Annual plan failed"
            );
            error_response(err.into())
        }
    }
}

//! HTTP API for the salary engine.
//!
//! Exposes the monthly pay statement and the annual salary plan over REST.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{AnnualPlanResponse, ApiError, ApiErrorResponse};
pub use state::{AppState, SharedStore};

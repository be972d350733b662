pub mod balance;
pub mod categories;
pub mod expenses;
pub mod export;
pub mod health;
pub mod income;
pub mod rules;

use std::fmt::Display;

use axum::http::StatusCode;
use tracing::warn;

use crate::schemas::{api_error, ApiError};

/// Turns an extractor rejection (bad JSON body, bad path id) into a 400 `{error}` body.
pub(crate) fn rejected(rejection: impl Display) -> ApiError {
    warn!("Rejected request: {}", rejection);
    api_error(StatusCode::BAD_REQUEST, rejection.to_string())
}

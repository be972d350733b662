use crate::handlers::rejected;
use crate::ledger::income::{self, IncomeFields};
use crate::schemas::{bad_request, internal_error, ApiError, AppState, MessageResponse};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDateTime;
use model::entities::income as income_entity;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating or replacing an income entry
#[derive(Debug, Deserialize, ToSchema)]
pub struct IncomeRequest {
    pub description: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    /// Calendar date, usually `YYYY-MM-DD`
    pub date: String,
}

impl From<IncomeRequest> for IncomeFields {
    fn from(request: IncomeRequest) -> Self {
        Self {
            description: request.description,
            amount: request.amount,
            date: request.date,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncomeResponse {
    pub id: i32,
    pub description: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub date: String,
    /// Server-assigned creation time (UTC)
    pub created_at: NaiveDateTime,
}

impl From<income_entity::Model> for IncomeResponse {
    fn from(model: income_entity::Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            amount: model.amount,
            date: model.date,
            created_at: model.created_at,
        }
    }
}

/// List income, newest date first
#[utoipa::path(
    get,
    path = "/api/income",
    tag = "income",
    responses(
        (status = 200, description = "Income retrieved successfully", body = Vec<IncomeResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_income(State(state): State<AppState>) -> Result<Json<Vec<IncomeResponse>>, ApiError> {
    trace!("Entering get_income function");

    match income::list_income(&state.db).await {
        Ok(entries) => {
            debug!("Returning {} income entries", entries.len());
            Ok(Json(entries.into_iter().map(IncomeResponse::from).collect()))
        }
        Err(e) => {
            error!("Failed to list income: {}", e);
            Err(internal_error(e))
        }
    }
}

/// Record a new income entry
#[utoipa::path(
    post,
    path = "/api/income",
    tag = "income",
    request_body = IncomeRequest,
    responses(
        (status = 201, description = "Income created successfully", body = IncomeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_income(
    State(state): State<AppState>,
    payload: Result<Json<IncomeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IncomeResponse>), ApiError> {
    trace!("Entering create_income function");
    let Json(request) = payload.map_err(rejected)?;

    match income::create_income(&state.db, request.into()).await {
        Ok(model) => {
            info!("Income created with ID: {}", model.id);
            Ok((StatusCode::CREATED, Json(IncomeResponse::from(model))))
        }
        Err(e) => {
            error!("Failed to create income: {}", e);
            Err(bad_request(e))
        }
    }
}

/// Replace description, amount and date of an income entry
#[utoipa::path(
    put,
    path = "/api/income/{id}",
    tag = "income",
    params(
        ("id" = i32, Path, description = "Income ID")
    ),
    request_body = IncomeRequest,
    responses(
        (status = 200, description = "Income updated successfully", body = IncomeResponse),
        (status = 400, description = "Invalid request or income not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_income(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<IncomeRequest>, JsonRejection>,
) -> Result<Json<IncomeResponse>, ApiError> {
    trace!("Entering update_income function");
    let Path(id) = id.map_err(rejected)?;
    let Json(request) = payload.map_err(rejected)?;

    match income::update_income(&state.db, id, request.into()).await {
        Ok(model) => {
            info!("Income {} updated", model.id);
            Ok(Json(IncomeResponse::from(model)))
        }
        Err(e) => {
            warn!("Failed to update income {}: {}", id, e);
            Err(bad_request(e))
        }
    }
}

/// Delete an income entry
#[utoipa::path(
    delete,
    path = "/api/income/{id}",
    tag = "income",
    params(
        ("id" = i32, Path, description = "Income ID")
    ),
    responses(
        (status = 200, description = "Income deleted", body = MessageResponse),
        (status = 400, description = "Invalid id or income not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_income(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    trace!("Entering delete_income function");
    let Path(id) = id.map_err(rejected)?;

    match income::delete_income(&state.db, id).await {
        Ok(()) => Ok(Json(MessageResponse {
            message: "Ingreso eliminado correctamente".to_string(),
        })),
        Err(e) => {
            warn!("Failed to delete income {}: {}", id, e);
            Err(bad_request(e))
        }
    }
}

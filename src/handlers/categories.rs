use crate::handlers::rejected;
use crate::ledger::categories::{self, NewCategory};
use crate::schemas::{bad_request, internal_error, ApiError, AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use model::entities::category;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace};
use utoipa::ToSchema;

/// Request structure for creating a new category
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    /// Display name
    pub name: String,
    /// Display color as a hex code, e.g. `#3498db`
    pub color: String,
}

/// Response structure for category operations
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub color: String,
}

impl From<category::Model> for CategoryResponse {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            color: model.color,
        }
    }
}

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "Categories retrieved successfully", body = Vec<CategoryResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    trace!("Entering get_categories function");

    match categories::list_categories(&state.db).await {
        Ok(models) => {
            debug!("Returning {} categories", models.len());
            Ok(Json(models.into_iter().map(CategoryResponse::from).collect()))
        }
        Err(e) => {
            error!("Failed to list categories: {}", e);
            Err(internal_error(e))
        }
    }
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Category created successfully", body = CategoryResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<Json<CategoryResponse>, ApiError> {
    trace!("Entering create_category function");
    let Json(request) = payload.map_err(rejected)?;

    let new_category = NewCategory {
        name: request.name,
        color: request.color,
    };
    match categories::create_category(&state.db, new_category).await {
        Ok(model) => {
            info!("Category '{}' created with ID: {}", model.name, model.id);
            Ok(Json(CategoryResponse::from(model)))
        }
        Err(e) => {
            error!("Failed to create category: {}", e);
            Err(bad_request(e))
        }
    }
}

use crate::handlers::rejected;
use crate::ledger::rules::{self, NewRule};
use crate::schemas::{bad_request, internal_error, ApiError, AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use model::entities::rule;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace};
use utoipa::ToSchema;

/// Request structure for creating a new keyword rule
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRuleRequest {
    /// Case-insensitive substring looked up in expense descriptions
    pub contains_text: String,
    /// Category assigned when the text matches
    pub category_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RuleResponse {
    pub id: i32,
    pub contains_text: String,
    pub category_id: i32,
}

impl From<rule::Model> for RuleResponse {
    fn from(model: rule::Model) -> Self {
        Self {
            id: model.id,
            contains_text: model.contains_text,
            category_id: model.category_id,
        }
    }
}

/// List all rules in scan order
#[utoipa::path(
    get,
    path = "/rules",
    tag = "rules",
    responses(
        (status = 200, description = "Rules retrieved successfully", body = Vec<RuleResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_rules(State(state): State<AppState>) -> Result<Json<Vec<RuleResponse>>, ApiError> {
    trace!("Entering get_rules function");

    match rules::list_rules(&state.db).await {
        Ok(models) => {
            debug!("Returning {} rules", models.len());
            Ok(Json(models.into_iter().map(RuleResponse::from).collect()))
        }
        Err(e) => {
            error!("Failed to list rules: {}", e);
            Err(internal_error(e))
        }
    }
}

/// Create a new rule. It is appended to the end of the scan order.
#[utoipa::path(
    post,
    path = "/rules",
    tag = "rules",
    request_body = CreateRuleRequest,
    responses(
        (status = 200, description = "Rule created successfully", body = RuleResponse),
        (status = 400, description = "Invalid request or unknown category", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_rule(
    State(state): State<AppState>,
    payload: Result<Json<CreateRuleRequest>, JsonRejection>,
) -> Result<Json<RuleResponse>, ApiError> {
    trace!("Entering create_rule function");
    let Json(request) = payload.map_err(rejected)?;

    let new_rule = NewRule {
        contains_text: request.contains_text,
        category_id: request.category_id,
    };
    match rules::create_rule(&state.db, new_rule).await {
        Ok(model) => {
            info!(
                "Rule '{}' -> category {} created with ID: {}",
                model.contains_text, model.category_id, model.id
            );
            Ok(Json(RuleResponse::from(model)))
        }
        Err(e) => {
            error!("Failed to create rule: {}", e);
            Err(bad_request(e))
        }
    }
}

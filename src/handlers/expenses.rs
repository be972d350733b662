use crate::handlers::rejected;
use crate::ledger::expenses::{self, NewExpense};
use crate::schemas::{bad_request, internal_error, ApiError, AppState, MessageResponse};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::Json,
};
use compute::{aggregate, CategoryBucket, CategoryKey, UNCATEGORIZED_COLOR, UNCATEGORIZED_NAME};
use model::entities::expense::{self, ExpenseWithCategory};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace};
use utoipa::ToSchema;

/// Request body for a new expense
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub description: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    /// Calendar date, usually `YYYY-MM-DD`
    pub date: String,
    /// Explicit category. When omitted or null the keyword rules pick one.
    pub category_id: Option<i32>,
}

/// Stored expense as returned by the create endpoint
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedExpenseResponse {
    pub id: i32,
    pub description: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub date: String,
    /// Resolved category, null when no rule matched
    pub category_id: Option<i32>,
}

impl From<expense::Model> for CreatedExpenseResponse {
    fn from(model: expense::Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            amount: model.amount,
            date: model.date,
            category_id: model.category_id,
        }
    }
}

/// Expense joined with its category
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    pub id: i32,
    pub description: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub date: String,
    pub category_id: Option<i32>,
    /// `Sin categorizar` for uncategorized expenses
    pub category_name: String,
    /// `#cccccc` for uncategorized expenses
    pub category_color: String,
}

impl From<ExpenseWithCategory> for ExpenseResponse {
    fn from(row: ExpenseWithCategory) -> Self {
        Self {
            id: row.id,
            description: row.description,
            amount: row.amount,
            date: row.date,
            category_id: row.category_id,
            category_name: row
                .category_name
                .unwrap_or_else(|| UNCATEGORIZED_NAME.to_string()),
            category_color: row
                .category_color
                .unwrap_or_else(|| UNCATEGORIZED_COLOR.to_string()),
        }
    }
}

/// Expenses of one category, or of the uncategorized bucket
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryBucketResponse {
    /// Category id, or `"sin-categoria"` for the uncategorized bucket
    #[schema(value_type = Object)]
    pub id: CategoryKey,
    pub name: String,
    pub color: String,
    #[schema(value_type = f64)]
    pub total: Decimal,
    pub expenses: Vec<ExpenseResponse>,
}

impl From<CategoryBucket> for CategoryBucketResponse {
    fn from(bucket: CategoryBucket) -> Self {
        Self {
            id: bucket.key,
            name: bucket.name,
            color: bucket.color,
            total: bucket.total,
            expenses: bucket.expenses.into_iter().map(ExpenseResponse::from).collect(),
        }
    }
}

/// All expenses with their total and per-category breakdown
#[derive(Debug, Serialize, ToSchema)]
pub struct ExpenseListResponse {
    /// Newest date first
    pub expenses: Vec<ExpenseResponse>,
    #[schema(value_type = f64)]
    pub total: Decimal,
    /// Buckets in the order their first expense appears in `expenses`
    pub categories: Vec<CategoryBucketResponse>,
}

/// List expenses with totals by category
#[utoipa::path(
    get,
    path = "/expenses",
    tag = "expenses",
    responses(
        (status = 200, description = "Expenses retrieved successfully", body = ExpenseListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_expenses(
    State(state): State<AppState>,
) -> Result<Json<ExpenseListResponse>, ApiError> {
    trace!("Entering get_expenses function");

    let rows = match expenses::list_expenses(&state.db).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Failed to list expenses: {}", e);
            return Err(internal_error(e));
        }
    };

    let summary = aggregate(&rows);
    debug!(
        "Returning {} expenses in {} categories, total {}",
        rows.len(),
        summary.categories.len(),
        summary.total
    );

    Ok(Json(ExpenseListResponse {
        expenses: rows.into_iter().map(ExpenseResponse::from).collect(),
        total: summary.total,
        categories: summary
            .categories
            .into_iter()
            .map(CategoryBucketResponse::from)
            .collect(),
    }))
}

/// Create an expense, categorizing it by keyword rules unless a category is given
#[utoipa::path(
    post,
    path = "/expenses",
    tag = "expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 200, description = "Expense created successfully", body = CreatedExpenseResponse),
        (status = 400, description = "Invalid request or unknown category", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_expense(
    State(state): State<AppState>,
    payload: Result<Json<CreateExpenseRequest>, JsonRejection>,
) -> Result<Json<CreatedExpenseResponse>, ApiError> {
    trace!("Entering create_expense function");
    let Json(request) = payload.map_err(rejected)?;

    let new_expense = NewExpense {
        description: request.description,
        amount: request.amount,
        date: request.date,
        category_id: request.category_id,
    };
    match expenses::create_expense(&state.db, new_expense).await {
        Ok(model) => {
            info!("Expense created with ID: {}", model.id);
            Ok(Json(CreatedExpenseResponse::from(model)))
        }
        Err(e) => {
            error!("Failed to create expense: {}", e);
            Err(bad_request(e))
        }
    }
}

/// Delete an expense. Unknown ids are reported as deleted too.
#[utoipa::path(
    delete,
    path = "/expenses/{id}",
    tag = "expenses",
    params(
        ("id" = i32, Path, description = "Expense ID")
    ),
    responses(
        (status = 200, description = "Expense deleted", body = MessageResponse),
        (status = 400, description = "Invalid id or store error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_expense(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    trace!("Entering delete_expense function");
    let Path(id) = id.map_err(rejected)?;

    match expenses::delete_expense(&state.db, id).await {
        Ok(rows) => {
            debug!("Delete of expense {} removed {} rows", id, rows);
            Ok(Json(MessageResponse {
                message: "Gasto eliminado correctamente".to_string(),
            }))
        }
        Err(e) => {
            error!("Failed to delete expense {}: {}", id, e);
            Err(bad_request(e))
        }
    }
}

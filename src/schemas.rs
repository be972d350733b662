use axum::{http::StatusCode, response::Json};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::handlers::{
    balance::BalanceResponse,
    categories::{CategoryResponse, CreateCategoryRequest},
    expenses::{
        CategoryBucketResponse, CreateExpenseRequest, CreatedExpenseResponse, ExpenseListResponse,
        ExpenseResponse,
    },
    income::{IncomeRequest, IncomeResponse},
    rules::{CreateRuleRequest, RuleResponse},
};
use crate::ledger::LedgerError;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
}

/// Error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Confirmation returned by delete endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub fn bad_request(error: LedgerError) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, error.to_string())
}

pub fn internal_error(error: LedgerError) -> ApiError {
    api_error(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::root,
        crate::handlers::health::health_check,
        crate::handlers::expenses::get_expenses,
        crate::handlers::expenses::create_expense,
        crate::handlers::expenses::delete_expense,
        crate::handlers::categories::get_categories,
        crate::handlers::categories::create_category,
        crate::handlers::rules::get_rules,
        crate::handlers::rules::create_rule,
        crate::handlers::income::get_income,
        crate::handlers::income::create_income,
        crate::handlers::income::update_income,
        crate::handlers::income::delete_income,
        crate::handlers::balance::get_balance,
        crate::handlers::export::export_excel,
    ),
    components(
        schemas(
            ErrorResponse,
            MessageResponse,
            HealthResponse,
            ExpenseResponse,
            ExpenseListResponse,
            CategoryBucketResponse,
            CreateExpenseRequest,
            CreatedExpenseResponse,
            CategoryResponse,
            CreateCategoryRequest,
            RuleResponse,
            CreateRuleRequest,
            IncomeRequest,
            IncomeResponse,
            BalanceResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "expenses", description = "Expense ledger with automatic categorization"),
        (name = "categories", description = "Expense categories"),
        (name = "rules", description = "Keyword rules used to categorize new expenses"),
        (name = "income", description = "Income ledger"),
        (name = "balance", description = "Income and expense totals"),
        (name = "export", description = "Spreadsheet export"),
    ),
    info(
        title = "Gastos API",
        description = "Personal expense and income tracker with keyword-based categorization",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;

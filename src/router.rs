use crate::handlers::{
    balance::get_balance,
    categories::{create_category, get_categories},
    expenses::{create_expense, delete_expense, get_expenses},
    export::export_excel,
    health::{health_check, root},
    income::{create_income, delete_income, get_income, update_income},
    rules::{create_rule, get_rules},
};
use crate::schemas::{api_error, ApiDoc, ApiError, AppState};
use axum::{
    http::StatusCode,
    routing::{delete, get, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

async fn not_found() -> ApiError {
    api_error(StatusCode::NOT_FOUND, "Endpoint no encontrado")
}

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        // Expenses
        .route("/expenses", get(get_expenses).post(create_expense))
        .route("/expenses/:id", delete(delete_expense))
        // Categories and rules
        .route("/categories", get(get_categories).post(create_category))
        .route("/rules", get(get_rules).post(create_rule))
        // Spreadsheet export
        .route("/export/excel", get(export_excel))
        // Income and balance
        .route("/api/income", get(get_income).post(create_income))
        .route("/api/income/:id", put(update_income).delete(delete_income))
        .route("/api/balance", get(get_balance))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

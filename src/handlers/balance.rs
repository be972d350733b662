use crate::ledger::LedgerError;
use crate::schemas::{internal_error, ApiError, AppState};
use axum::{extract::State, response::Json};
use compute::{balance, Totals};
use rust_decimal::Decimal;
use sea_orm::TransactionTrait;
use serde::Serialize;
use tracing::{debug, error, instrument, trace};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    #[schema(value_type = f64)]
    pub total_income: Decimal,
    #[schema(value_type = f64)]
    pub total_expenses: Decimal,
    /// Total income minus total expenses
    #[schema(value_type = f64)]
    pub balance: Decimal,
}

impl From<Totals> for BalanceResponse {
    fn from(totals: Totals) -> Self {
        Self {
            total_income: totals.total_income,
            total_expenses: totals.total_expenses,
            balance: totals.balance(),
        }
    }
}

/// Read both totals in one transaction so the pair is consistent.
async fn read_totals(state: &AppState) -> Result<Totals, LedgerError> {
    let txn = state.db.begin().await?;
    let totals = balance::totals(&txn).await?;
    txn.commit().await?;
    Ok(totals)
}

/// Income and expense totals with the resulting balance
#[utoipa::path(
    get,
    path = "/api/balance",
    tag = "balance",
    responses(
        (status = 200, description = "Balance computed successfully", body = BalanceResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_balance(State(state): State<AppState>) -> Result<Json<BalanceResponse>, ApiError> {
    trace!("Entering get_balance function");

    match read_totals(&state).await {
        Ok(totals) => {
            debug!("Balance: {}", totals.balance());
            Ok(Json(BalanceResponse::from(totals)))
        }
        Err(e) => {
            error!("Failed to compute balance: {}", e);
            Err(internal_error(e))
        }
    }
}

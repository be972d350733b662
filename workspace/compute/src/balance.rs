use model::entities::{expense, income};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{ConnectionTrait, EntityTrait, QuerySelect};
use tracing::{debug, instrument};

use crate::error::Result;

/// Income and expense totals read from the store at one point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Totals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
}

impl Totals {
    /// Total income minus total expenses.
    pub fn balance(&self) -> Decimal {
        self.total_income - self.total_expenses
    }
}

/// Sum of all income amounts, zero when there is none.
pub async fn total_income<C: ConnectionTrait>(db: &C) -> Result<Decimal> {
    sum_amount::<income::Entity, C>(db, income::Column::Amount).await
}

/// Sum of all expense amounts, zero when there is none.
pub async fn total_expenses<C: ConnectionTrait>(db: &C) -> Result<Decimal> {
    sum_amount::<expense::Entity, C>(db, expense::Column::Amount).await
}

/// Reads both totals with two SUM queries on `db`.
///
/// The queries are independent; pass a transaction to get a consistent pair.
#[instrument(skip(db))]
pub async fn totals<C: ConnectionTrait>(db: &C) -> Result<Totals> {
    let totals = Totals {
        total_income: total_income(db).await?,
        total_expenses: total_expenses(db).await?,
    };
    debug!(
        "Totals: income {}, expenses {}, balance {}",
        totals.total_income,
        totals.total_expenses,
        totals.balance()
    );
    Ok(totals)
}

async fn sum_amount<E, C>(db: &C, column: E::Column) -> Result<Decimal>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let total: Option<Option<Decimal>> = E::find()
        .select_only()
        .column_as(Expr::col(column).sum(), "total")
        .into_tuple()
        .one(db)
        .await?;

    Ok(total.flatten().unwrap_or(Decimal::ZERO))
}

use compute::categorize;
use model::entities::expense::{self, ExpenseWithCategory};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set, TransactionTrait};
use tracing::{debug, info, instrument, trace};

use super::{categories::ensure_category_exists, rules::list_rules, Result};

/// Input for a new expense
#[derive(Clone, Debug)]
pub struct NewExpense {
    pub description: String,
    pub amount: Decimal,
    pub date: String,
    /// When absent the category is chosen by the keyword rules.
    pub category_id: Option<i32>,
}

/// Lists all expenses joined with their category, newest date first.
pub async fn list_expenses<C: ConnectionTrait>(db: &C) -> Result<Vec<ExpenseWithCategory>> {
    let expenses = expense::Entity::find_with_category(db).await?;
    debug!("Retrieved {} expenses", expenses.len());
    Ok(expenses)
}

/// Stores a new expense, categorizing it with the current rules.
///
/// Reading the rules, resolving the category and inserting the row happen in one
/// transaction, so a rule committed concurrently is either fully seen or not at all.
#[instrument(skip(db))]
pub async fn create_expense<C: TransactionTrait>(
    db: &C,
    new_expense: NewExpense,
) -> Result<expense::Model> {
    let txn = db.begin().await?;

    let rules = list_rules(&txn).await?;
    let category_id = categorize(&new_expense.description, new_expense.category_id, &rules);
    trace!("Resolved category {:?} for '{}'", category_id, new_expense.description);

    if let Some(id) = category_id {
        ensure_category_exists(&txn, id).await?;
    }

    let model = expense::ActiveModel {
        description: Set(new_expense.description),
        amount: Set(new_expense.amount),
        date: Set(new_expense.date),
        category_id: Set(category_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!(
        "Expense created with ID: {}, category: {:?}",
        model.id, model.category_id
    );
    Ok(model)
}

/// Deletes an expense by id.
///
/// Deleting an id that does not exist is not an error; the number of removed rows is
/// returned so callers can tell the cases apart.
#[instrument(skip(db))]
pub async fn delete_expense<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64> {
    let result = expense::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        debug!("Expense {} did not exist, nothing deleted", id);
    } else {
        info!("Expense {} deleted", id);
    }
    Ok(result.rows_affected)
}

use chrono::Utc;
use model::entities::income;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};
use tracing::{debug, info, instrument, warn};

use super::{LedgerError, Result};

/// Full set of client-editable income fields, used for both create and update.
#[derive(Clone, Debug)]
pub struct IncomeFields {
    pub description: String,
    pub amount: Decimal,
    pub date: String,
}

/// Lists all income, newest date first. Entries sharing a date keep their insertion order.
pub async fn list_income<C: ConnectionTrait>(db: &C) -> Result<Vec<income::Model>> {
    let entries = income::Entity::find()
        .order_by_desc(income::Column::Date)
        .order_by_asc(income::Column::Id)
        .all(db)
        .await?;
    debug!("Retrieved {} income entries", entries.len());
    Ok(entries)
}

#[instrument(skip(db))]
pub async fn create_income<C: ConnectionTrait>(db: &C, fields: IncomeFields) -> Result<income::Model> {
    let model = income::ActiveModel {
        description: Set(fields.description),
        amount: Set(fields.amount),
        date: Set(fields.date),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Income created with ID: {}", model.id);
    Ok(model)
}

/// Replaces description, amount and date of an existing entry.
#[instrument(skip(db))]
pub async fn update_income<C: ConnectionTrait>(
    db: &C,
    id: i32,
    fields: IncomeFields,
) -> Result<income::Model> {
    let existing = match income::Entity::find_by_id(id).one(db).await? {
        Some(entry) => entry,
        None => {
            warn!("Income {} not found for update", id);
            return Err(LedgerError::IncomeNotFound);
        }
    };

    let mut active: income::ActiveModel = existing.into();
    active.description = Set(fields.description);
    active.amount = Set(fields.amount);
    active.date = Set(fields.date);

    let updated = active.update(db).await?;
    info!("Income {} updated", id);
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_income<C: ConnectionTrait>(db: &C, id: i32) -> Result<()> {
    let result = income::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        warn!("Income {} not found for deletion", id);
        return Err(LedgerError::IncomeNotFound);
    }
    info!("Income {} deleted", id);
    Ok(())
}

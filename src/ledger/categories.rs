use model::entities::category;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};
use tracing::{debug, info, instrument, warn};

use super::{LedgerError, Result};

/// Input for a new category
#[derive(Clone, Debug)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
}

/// Lists all categories by id.
pub async fn list_categories<C: ConnectionTrait>(db: &C) -> Result<Vec<category::Model>> {
    let categories = category::Entity::find()
        .order_by_asc(category::Column::Id)
        .all(db)
        .await?;
    debug!("Retrieved {} categories", categories.len());
    Ok(categories)
}

#[instrument(skip(db))]
pub async fn create_category<C: ConnectionTrait>(
    db: &C,
    new_category: NewCategory,
) -> Result<category::Model> {
    let model = category::ActiveModel {
        name: Set(new_category.name),
        color: Set(new_category.color),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Category created with ID: {}, name: {}", model.id, model.name);
    Ok(model)
}

/// Fails with [`LedgerError::CategoryNotFound`] unless a category with `id` exists.
pub async fn ensure_category_exists<C: ConnectionTrait>(db: &C, id: i32) -> Result<()> {
    match category::Entity::find_by_id(id).one(db).await? {
        Some(_) => Ok(()),
        None => {
            warn!("Category {} not found", id);
            Err(LedgerError::CategoryNotFound(id))
        }
    }
}

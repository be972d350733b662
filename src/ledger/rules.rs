use model::entities::rule;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set, TransactionTrait};
use tracing::{debug, info, instrument};

use super::{categories::ensure_category_exists, Result};

/// Input for a new keyword rule
#[derive(Clone, Debug)]
pub struct NewRule {
    pub contains_text: String,
    pub category_id: i32,
}

/// Lists all rules in scan order (ascending id, i.e. insertion order).
pub async fn list_rules<C: ConnectionTrait>(db: &C) -> Result<Vec<rule::Model>> {
    let rules = rule::Entity::find()
        .order_by_asc(rule::Column::Id)
        .all(db)
        .await?;
    debug!("Retrieved {} rules", rules.len());
    Ok(rules)
}

/// Appends a rule to the end of the scan order. The target category must exist.
#[instrument(skip(db))]
pub async fn create_rule<C: TransactionTrait>(db: &C, new_rule: NewRule) -> Result<rule::Model> {
    let txn = db.begin().await?;

    ensure_category_exists(&txn, new_rule.category_id).await?;
    let model = rule::ActiveModel {
        contains_text: Set(new_rule.contains_text),
        category_id: Set(new_rule.category_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!(
        "Rule created with ID: {}, '{}' -> category {}",
        model.id, model.contains_text, model.category_id
    );
    Ok(model)
}

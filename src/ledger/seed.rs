use std::collections::HashSet;

use compute::KeywordRule;
use model::entities::{category, rule};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QuerySelect, Set,
    TransactionTrait,
};
use tracing::{debug, info, instrument, warn};

use super::Result;

/// Default categories as `(name, color)`, inserted with ids 1..=7 in this order.
pub const DEFAULT_CATEGORIES: [(&str, &str); 7] = [
    ("Transporte", "#3498db"),
    ("Comida", "#2ecc71"),
    ("Compras", "#9b59b6"),
    ("Entretenimiento", "#f1c40f"),
    ("Servicios", "#e67e22"),
    ("Salud", "#e74c3c"),
    ("Otros", "#95a5a6"),
];

/// Default keyword rules as `(containsText, categoryId)` in scan order.
/// "Otros" (7) has no default rules.
pub const DEFAULT_RULES: [(&str, i32); 39] = [
    // Transporte
    ("uber", 1),
    ("taxi", 1),
    ("metro", 1),
    ("bus", 1),
    ("transporte", 1),
    ("gasolina", 1),
    // Comida
    ("restaurante", 2),
    ("comida", 2),
    ("almuerzo", 2),
    ("cena", 2),
    ("desayuno", 2),
    ("mcdonald", 2),
    ("hamburguesa", 2),
    ("pizza", 2),
    // Compras
    ("ropa", 3),
    ("zapato", 3),
    ("tienda", 3),
    ("compra", 3),
    ("mercado", 3),
    ("supermercado", 3),
    // Entretenimiento
    ("cine", 4),
    ("película", 4),
    ("netflix", 4),
    ("spotify", 4),
    ("juego", 4),
    // Servicios
    ("luz", 5),
    ("agua", 5),
    ("gas", 5),
    ("teléfono", 5),
    ("internet", 5),
    ("netflix", 5),
    ("spotify", 5),
    ("suscripción", 5),
    // Salud
    ("farmacia", 6),
    ("médico", 6),
    ("hospital", 6),
    ("fisioterapeuta", 6),
    ("óptica", 6),
    ("lentes", 6),
];

/// Rows inserted by [`seed_defaults`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub rules: usize,
}

/// Seeds default categories and rules into empty tables.
///
/// Each table is checked on its own: a non-empty table is left untouched, so running
/// this repeatedly never duplicates rows.
#[instrument(skip(db))]
pub async fn seed_defaults<C: TransactionTrait>(db: &C) -> Result<SeedReport> {
    let txn = db.begin().await?;
    let categories = seed_categories(&txn).await?;
    txn.commit().await?;

    let txn = db.begin().await?;
    let rules = seed_rules(&txn).await?;
    txn.commit().await?;

    let report = SeedReport { categories, rules };
    info!(
        "Default seeding inserted {} categories and {} rules",
        report.categories, report.rules
    );
    Ok(report)
}

/// Inserts the default categories if the table is empty. Returns the number inserted.
pub async fn seed_categories<C: ConnectionTrait>(db: &C) -> Result<usize> {
    let existing = category::Entity::find().count(db).await?;
    if existing > 0 {
        debug!("Categories table has {} rows, skipping default categories", existing);
        return Ok(0);
    }

    info!("Initializing default categories");
    for (id, (name, color)) in (1..).zip(DEFAULT_CATEGORIES) {
        category::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            color: Set(color.to_string()),
        }
        .insert(db)
        .await?;
    }
    Ok(DEFAULT_CATEGORIES.len())
}

/// Inserts the default rules if the table is empty. Returns the number inserted.
///
/// Rules pointing at a category id that does not exist are skipped.
pub async fn seed_rules<C: ConnectionTrait>(db: &C) -> Result<usize> {
    let existing = rule::Entity::find().count(db).await?;
    if existing > 0 {
        debug!("Rules table has {} rows, skipping default rules", existing);
        return Ok(0);
    }

    let category_ids: HashSet<i32> = category::Entity::find()
        .select_only()
        .column(category::Column::Id)
        .into_tuple::<i32>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    info!("Initializing default rules");
    let mut inserted = 0;
    for default_rule in DEFAULT_RULES {
        if !category_ids.contains(&default_rule.category_id()) {
            warn!(
                "Skipping default rule '{}': category {} does not exist",
                default_rule.pattern(),
                default_rule.category_id()
            );
            continue;
        }

        rule::ActiveModel {
            contains_text: Set(default_rule.pattern().to_string()),
            category_id: Set(default_rule.category_id()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        inserted += 1;
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::categories::{create_category, list_categories, NewCategory};
    use crate::ledger::rules::list_rules;
    use crate::test_utils::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_seeds_categories_in_documented_order() {
        let db = setup_test_db().await;

        let report = seed_defaults(&db).await.unwrap();
        assert_eq!(report, SeedReport { categories: 7, rules: 39 });

        let categories = list_categories(&db).await.unwrap();
        let seeded: Vec<(i32, &str, &str)> = categories
            .iter()
            .map(|c| (c.id, c.name.as_str(), c.color.as_str()))
            .collect();
        assert_eq!(
            seeded,
            vec![
                (1, "Transporte", "#3498db"),
                (2, "Comida", "#2ecc71"),
                (3, "Compras", "#9b59b6"),
                (4, "Entretenimiento", "#f1c40f"),
                (5, "Servicios", "#e67e22"),
                (6, "Salud", "#e74c3c"),
                (7, "Otros", "#95a5a6"),
            ]
        );
    }

    #[tokio::test]
    async fn test_rules_keep_source_order_and_skip_otros() {
        let db = setup_test_db().await;
        seed_defaults(&db).await.unwrap();

        let rules = list_rules(&db).await.unwrap();
        assert_eq!(rules.len(), DEFAULT_RULES.len());
        assert_eq!(rules[0].contains_text, "uber");
        assert_eq!(rules[38].contains_text, "lentes");
        assert!(rules.iter().all(|r| (1..=6).contains(&r.category_id)));
        for (stored, (text, category_id)) in rules.iter().zip(DEFAULT_RULES) {
            assert_eq!(stored.contains_text, text);
            assert_eq!(stored.category_id, category_id);
        }
    }

    #[test]
    fn test_default_rules_per_category() {
        let per_category: Vec<usize> = (1..=7)
            .map(|id| DEFAULT_RULES.iter().filter(|(_, category)| *category == id).count())
            .collect();

        assert_eq!(per_category, vec![6, 8, 6, 5, 8, 6, 0]);
        assert_eq!(DEFAULT_RULES.len(), 39);
    }

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let db = setup_test_db().await;

        seed_defaults(&db).await.unwrap();
        let second = seed_defaults(&db).await.unwrap();

        assert_eq!(second, SeedReport::default());
        assert_eq!(list_categories(&db).await.unwrap().len(), 7);
        assert_eq!(list_rules(&db).await.unwrap().len(), 39);
    }

    #[tokio::test]
    async fn test_existing_categories_are_not_overwritten() {
        let db = setup_test_db().await;
        create_category(
            &db,
            NewCategory {
                name: "Viajes".to_string(),
                color: "#000000".to_string(),
            },
        )
        .await
        .unwrap();

        let report = seed_defaults(&db).await.unwrap();

        // Only category 1 exists, so only the Transporte rules can be seeded
        assert_eq!(report.categories, 0);
        assert_eq!(report.rules, 6);
        let categories = list_categories(&db).await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Viajes");
        assert!(list_rules(&db).await.unwrap().iter().all(|r| r.category_id == 1));
    }

    #[tokio::test]
    async fn test_categories_present_rules_absent() {
        let db = setup_test_db().await;
        seed_categories(&db).await.unwrap();

        let report = seed_defaults(&db).await.unwrap();

        assert_eq!(report, SeedReport { categories: 0, rules: 39 });
    }
}

use std::collections::HashMap;
use std::fmt;

use model::entities::expense::ExpenseWithCategory;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use tracing::{debug, instrument};

/// Wire identifier of the uncategorized bucket.
pub const UNCATEGORIZED_KEY: &str = "sin-categoria";
/// Display name used for expenses without a (known) category.
pub const UNCATEGORIZED_NAME: &str = "Sin categorizar";
/// Display color used for expenses without a (known) category.
pub const UNCATEGORIZED_COLOR: &str = "#cccccc";

/// Key of an aggregation bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    Known(i32),
    Uncategorized,
}

impl From<Option<i32>> for CategoryKey {
    fn from(category_id: Option<i32>) -> Self {
        match category_id {
            Some(id) => CategoryKey::Known(id),
            None => CategoryKey::Uncategorized,
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKey::Known(id) => write!(f, "{}", id),
            CategoryKey::Uncategorized => f.write_str(UNCATEGORIZED_KEY),
        }
    }
}

/// Known keys serialize as the bare integer id, the uncategorized key as `"sin-categoria"`.
impl Serialize for CategoryKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CategoryKey::Known(id) => serializer.serialize_i32(*id),
            CategoryKey::Uncategorized => serializer.serialize_str(UNCATEGORIZED_KEY),
        }
    }
}

/// A group of expenses sharing a category.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryBucket {
    pub key: CategoryKey,
    pub name: String,
    pub color: String,
    /// Sum of the member amounts.
    pub total: Decimal,
    /// Members in their original order.
    pub expenses: Vec<ExpenseWithCategory>,
}

impl CategoryBucket {
    fn open(key: CategoryKey, expense: &ExpenseWithCategory) -> Self {
        Self {
            key,
            name: expense
                .category_name
                .clone()
                .unwrap_or_else(|| UNCATEGORIZED_NAME.to_string()),
            color: expense
                .category_color
                .clone()
                .unwrap_or_else(|| UNCATEGORIZED_COLOR.to_string()),
            total: Decimal::ZERO,
            expenses: Vec::new(),
        }
    }
}

/// Total of a list of expenses plus its per-category breakdown.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ExpenseSummary {
    pub total: Decimal,
    /// Buckets in the order their first expense was seen.
    pub categories: Vec<CategoryBucket>,
}

/// Groups `expenses` by category.
///
/// Expenses with a category id are keyed by it, the rest fall into the uncategorized
/// bucket. A bucket takes its name and color from the first expense that opens it.
#[instrument(skip(expenses), fields(num_expenses = expenses.len()))]
pub fn aggregate(expenses: &[ExpenseWithCategory]) -> ExpenseSummary {
    let mut summary = ExpenseSummary::default();
    let mut index: HashMap<CategoryKey, usize> = HashMap::new();

    for expense in expenses {
        let key = CategoryKey::from(expense.category_id);
        let position = *index.entry(key).or_insert_with(|| {
            summary.categories.push(CategoryBucket::open(key, expense));
            summary.categories.len() - 1
        });

        let bucket = &mut summary.categories[position];
        bucket.total += expense.amount;
        bucket.expenses.push(expense.clone());
        summary.total += expense.amount;
    }

    debug!(
        "Aggregated {} expenses into {} buckets, total {}",
        expenses.len(),
        summary.categories.len(),
        summary.total
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: i32, amount: Decimal, category: Option<(i32, &str, &str)>) -> ExpenseWithCategory {
        ExpenseWithCategory {
            id,
            description: format!("expense {}", id),
            amount,
            date: "2024-01-01".to_string(),
            category_id: category.map(|(id, _, _)| id),
            category_name: category.map(|(_, name, _)| name.to_string()),
            category_color: category.map(|(_, _, color)| color.to_string()),
        }
    }

    const TRANSPORT: (i32, &str, &str) = (1, "Transporte", "#3498db");
    const FOOD: (i32, &str, &str) = (2, "Comida", "#2ecc71");

    #[test]
    fn test_known_and_uncategorized_buckets() {
        let expenses = vec![
            expense(1, Decimal::new(10, 0), Some(TRANSPORT)),
            expense(2, Decimal::new(5, 0), None),
        ];

        let summary = aggregate(&expenses);

        assert_eq!(summary.total, Decimal::new(15, 0));
        assert_eq!(summary.categories.len(), 2);

        let transport = &summary.categories[0];
        assert_eq!(transport.key, CategoryKey::Known(1));
        assert_eq!(transport.name, "Transporte");
        assert_eq!(transport.color, "#3498db");
        assert_eq!(transport.total, Decimal::new(10, 0));

        let uncategorized = &summary.categories[1];
        assert_eq!(uncategorized.key, CategoryKey::Uncategorized);
        assert_eq!(uncategorized.name, UNCATEGORIZED_NAME);
        assert_eq!(uncategorized.color, UNCATEGORIZED_COLOR);
        assert_eq!(uncategorized.total, Decimal::new(5, 0));
    }

    #[test]
    fn test_empty_list() {
        let summary = aggregate(&[]);

        assert_eq!(summary.total, Decimal::ZERO);
        assert!(summary.categories.is_empty());
    }

    #[test]
    fn test_buckets_follow_first_seen_order() {
        let expenses = vec![
            expense(1, Decimal::new(3, 0), None),
            expense(2, Decimal::new(4, 0), Some(FOOD)),
            expense(3, Decimal::new(5, 0), Some(TRANSPORT)),
            expense(4, Decimal::new(6, 0), Some(FOOD)),
        ];

        let summary = aggregate(&expenses);
        let keys: Vec<CategoryKey> = summary.categories.iter().map(|b| b.key).collect();

        assert_eq!(
            keys,
            vec![
                CategoryKey::Uncategorized,
                CategoryKey::Known(2),
                CategoryKey::Known(1)
            ]
        );
    }

    #[test]
    fn test_members_keep_original_order() {
        let expenses = vec![
            expense(7, Decimal::new(1, 0), Some(FOOD)),
            expense(3, Decimal::new(2, 0), Some(TRANSPORT)),
            expense(5, Decimal::new(3, 0), Some(FOOD)),
        ];

        let summary = aggregate(&expenses);
        let food_ids: Vec<i32> = summary.categories[0].expenses.iter().map(|e| e.id).collect();

        assert_eq!(food_ids, vec![7, 5]);
        assert_eq!(summary.categories[0].total, Decimal::new(4, 0));
    }

    #[test]
    fn test_every_expense_in_exactly_one_bucket_and_totals_add_up() {
        let expenses = vec![
            expense(1, Decimal::new(1050, 2), Some(FOOD)),
            expense(2, Decimal::new(275, 2), None),
            expense(3, Decimal::new(1999, 2), Some(TRANSPORT)),
            expense(4, Decimal::new(1, 2), Some(FOOD)),
            expense(5, Decimal::new(0, 0), None),
        ];

        let summary = aggregate(&expenses);

        let bucket_sum: Decimal = summary.categories.iter().map(|b| b.total).sum();
        assert_eq!(bucket_sum, summary.total);
        assert_eq!(summary.total, Decimal::new(3325, 2));

        let mut seen: Vec<i32> = summary
            .categories
            .iter()
            .flat_map(|b| b.expenses.iter().map(|e| e.id))
            .collect();
        seen.sort();
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_dangling_category_keeps_its_own_bucket() {
        // The category row is gone, so the join produced no name or color
        let orphan = ExpenseWithCategory {
            category_name: None,
            category_color: None,
            ..expense(1, Decimal::new(8, 0), Some((99, "", "")))
        };

        let summary = aggregate(&[orphan, expense(2, Decimal::new(2, 0), None)]);

        assert_eq!(summary.categories.len(), 2);
        assert_eq!(summary.categories[0].key, CategoryKey::Known(99));
        assert_eq!(summary.categories[0].name, UNCATEGORIZED_NAME);
        assert_eq!(summary.categories[1].key, CategoryKey::Uncategorized);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(CategoryKey::Known(3).to_string(), "3");
        assert_eq!(CategoryKey::Uncategorized.to_string(), "sin-categoria");
        assert_eq!(CategoryKey::from(None), CategoryKey::Uncategorized);
        assert_eq!(CategoryKey::from(Some(4)), CategoryKey::Known(4));
    }
}

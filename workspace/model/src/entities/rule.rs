use sea_orm::entity::prelude::*;

use super::category;

/// A keyword rule used to auto-categorize new expenses.
///
/// Rules are scanned in ascending `id` order (insertion order) and the first one whose
/// `contains_text` occurs in an expense description, ignoring case, wins. Duplicate or
/// overlapping patterns are allowed.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "rules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "containsText")]
    pub contains_text: String,
    #[sea_orm(column_name = "categoryId")]
    pub category_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "category::Entity",
        from = "Column::CategoryId",
        to = "category::Column::Id"
    )]
    Category,
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{FromQueryResult, JoinType, QueryOrder, QuerySelect};

use super::category;

/// A single expense. Expenses are created and deleted, never updated.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub description: String,
    /// Expected to be non-negative, not enforced.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    /// Calendar date as entered by the client (usually `YYYY-MM-DD`).
    pub date: String,
    /// `None` when no explicit category was given and no rule matched.
    #[sea_orm(column_name = "categoryId")]
    pub category_id: Option<i32>,
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

/// An expense joined with the name and color of its category.
/// Both category fields are `None` when the expense is uncategorized.
#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct ExpenseWithCategory {
    pub id: i32,
    pub description: String,
    pub amount: Decimal,
    pub date: String,
    pub category_id: Option<i32>,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
}

impl Entity {
    /// Lists every expense left-joined with its category, newest date first.
    /// Expenses sharing a date keep their insertion order.
    pub async fn find_with_category<C>(db: &C) -> Result<Vec<ExpenseWithCategory>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .select_only()
            .column(Column::Id)
            .column(Column::Description)
            .column(Column::Amount)
            .column(Column::Date)
            .column_as(Column::CategoryId, "category_id")
            .column_as(category::Column::Name, "category_name")
            .column_as(category::Column::Color, "category_color")
            .join(JoinType::LeftJoin, Relation::Category.def())
            .order_by_desc(Column::Date)
            .order_by_asc(Column::Id)
            .into_model::<ExpenseWithCategory>()
            .all(db)
            .await
    }
}

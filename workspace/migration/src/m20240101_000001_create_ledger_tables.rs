use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create categories table
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk_auto(Categories::Id))
                    .col(string(Categories::Name))
                    .col(string(Categories::Color))
                    .to_owned(),
            )
            .await?;

        // Create expenses table
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(pk_auto(Expenses::Id))
                    .col(string(Expenses::Description))
                    .col(decimal(Expenses::Amount).decimal_len(16, 4))
                    .col(string(Expenses::Date))
                    .col(integer_null(Expenses::CategoryId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expense_category")
                            .from(Expenses::Table, Expenses::CategoryId)
                            .to(Categories::Table, Categories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create rules table
        manager
            .create_table(
                Table::create()
                    .table(Rules::Table)
                    .if_not_exists()
                    .col(pk_auto(Rules::Id))
                    .col(string(Rules::ContainsText))
                    .col(integer(Rules::CategoryId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rule_category")
                            .from(Rules::Table, Rules::CategoryId)
                            .to(Categories::Table, Categories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create income table
        manager
            .create_table(
                Table::create()
                    .table(Income::Table)
                    .if_not_exists()
                    .col(pk_auto(Income::Id))
                    .col(string(Income::Description))
                    .col(decimal(Income::Amount).decimal_len(16, 4))
                    .col(string(Income::Date))
                    .col(date_time(Income::CreatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order of creation
        manager
            .drop_table(Table::drop().table(Income::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Rules::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Color,
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    Description,
    Amount,
    Date,
    #[sea_orm(iden = "categoryId")]
    CategoryId,
}

#[derive(DeriveIden)]
enum Rules {
    Table,
    Id,
    #[sea_orm(iden = "containsText")]
    ContainsText,
    #[sea_orm(iden = "categoryId")]
    CategoryId,
}

#[derive(DeriveIden)]
enum Income {
    Table,
    Id,
    Description,
    Amount,
    Date,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
}

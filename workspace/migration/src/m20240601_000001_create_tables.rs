use model::entities::category::Category;
use sea_orm::{ActiveEnum, DbBackend};
use sea_orm_migration::{prelude::*, schema::*};

/// Accepted shape of `users.email`.
pub const EMAIL_PATTERN: &str = "^[A-Za-z0-9._+%-]+@[A-Za-z0-9.-]+[.][A-Za-z]+$";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(text(Users::Name))
                    .col(text(Users::Email).check(email_check(manager.get_database_backend())))
                    .to_owned(),
            )
            .await?;

        // Create transactions table
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(pk_auto(Transactions::Id))
                    .col(integer(Transactions::UserId))
                    .col(text(Transactions::Merchant))
                    .col(text_null(Transactions::Description))
                    .col(
                        timestamp_with_time_zone(Transactions::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(text_null(Transactions::Date))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_user")
                            .from(Transactions::Table, Transactions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create purchases table
        let categories = Category::ALL.iter().map(|category| category.to_value());
        manager
            .create_table(
                Table::create()
                    .table(Purchases::Table)
                    .if_not_exists()
                    .col(pk_auto(Purchases::Id))
                    .col(integer(Purchases::TransactionId))
                    .col(text(Purchases::Item))
                    .col(integer(Purchases::Price).check(Expr::col(Purchases::Price).gte(0)))
                    .col(text_null(Purchases::WarrantyDate))
                    .col(text_null(Purchases::ReturnDate))
                    .col(
                        text(Purchases::Category)
                            .default(Category::Other.to_value())
                            .check(Expr::col(Purchases::Category).is_in(categories)),
                    )
                    .col(
                        integer(Purchases::Quantity)
                            .default(1)
                            .check(Expr::col(Purchases::Quantity).gte(1)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchases_transaction")
                            .from(Purchases::Table, Purchases::TransactionId)
                            .to(Transactions::Table, Transactions::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create receipts table
        manager
            .create_table(
                Table::create()
                    .table(Receipts::Table)
                    .if_not_exists()
                    .col(pk_auto(Receipts::Id))
                    .col(integer_null(Receipts::TransactionId))
                    .col(text(Receipts::Url))
                    .col(text(Receipts::ParsedData))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_receipts_transaction")
                            .from(Receipts::Table, Receipts::TransactionId)
                            .to(Transactions::Table, Transactions::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create budgets table, one amount column per category
        let mut budgets = Table::create();
        budgets
            .table(Budgets::Table)
            .if_not_exists()
            .col(pk_auto(Budgets::Id))
            .col(integer(Budgets::UserId));
        for category in Category::ALL {
            let column = Alias::new(category.budget_column());
            budgets.col(
                integer(column.clone())
                    .default(0)
                    .check(Expr::col(column).gte(0)),
            );
        }
        budgets.foreign_key(
            ForeignKey::create()
                .name("fk_budgets_user")
                .from(Budgets::Table, Budgets::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        );
        manager.create_table(budgets.to_owned()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(manager).await
    }
}

/// Drop the five tables, children before parents. Missing tables are skipped.
pub(crate) async fn drop_tables(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .drop_table(Table::drop().table(Budgets::Table).if_exists().to_owned())
        .await?;
    manager
        .drop_table(Table::drop().table(Receipts::Table).if_exists().to_owned())
        .await?;
    manager
        .drop_table(Table::drop().table(Purchases::Table).if_exists().to_owned())
        .await?;
    manager
        .drop_table(Table::drop().table(Transactions::Table).if_exists().to_owned())
        .await?;
    manager
        .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
        .await?;
    Ok(())
}

/// Postgres matches case-insensitively with `~*`. Other backends rely on a
/// `REGEXP` operator, which SQLite connections must register.
fn email_check(backend: DbBackend) -> SimpleExpr {
    let operator = match backend {
        DbBackend::Postgres => "~*",
        _ => "REGEXP",
    };
    Expr::cust(format!("email {operator} '{EMAIL_PATTERN}'"))
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    UserId,
    Merchant,
    Description,
    CreatedAt,
    Date,
}

#[derive(DeriveIden)]
enum Purchases {
    Table,
    Id,
    TransactionId,
    Item,
    Price,
    WarrantyDate,
    ReturnDate,
    Category,
    Quantity,
}

#[derive(DeriveIden)]
enum Receipts {
    Table,
    Id,
    TransactionId,
    Url,
    ParsedData,
}

#[derive(DeriveIden)]
enum Budgets {
    Table,
    Id,
    UserId,
}

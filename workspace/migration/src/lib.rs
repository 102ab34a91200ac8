pub use sea_orm_migration::prelude::*;

use sea_orm::DatabaseConnection;

mod m20240601_000001_create_tables;

pub use m20240601_000001_create_tables::EMAIL_PATTERN;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240601_000001_create_tables::Migration)]
    }
}

/// Drop every table of the schema and build it again from scratch.
///
/// Tables go children first so foreign keys never dangle. The migration
/// bookkeeping table is dropped too, which makes the following `up` apply
/// every migration again. All data is lost.
pub async fn reset_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let manager = SchemaManager::new(db);
    m20240601_000001_create_tables::drop_tables(&manager).await?;
    manager
        .drop_table(
            Table::drop()
                .table(Alias::new("seaql_migrations"))
                .if_exists()
                .to_owned(),
        )
        .await?;
    Migrator::up(db, None).await
}

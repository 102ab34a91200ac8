use sea_orm::entity::prelude::*;

use super::{category::Category, transaction};

/// A single line item of a transaction.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub transaction_id: i32,
    pub item: String,
    /// Unit price, never negative.
    pub price: i32,
    pub warranty_date: Option<String>,
    pub return_date: Option<String>,
    pub category: Category,
    /// At least one.
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "transaction::Entity",
        from = "Column::TransactionId",
        to = "transaction::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Transaction,
}

impl Related<transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

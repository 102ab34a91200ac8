//! SeaORM entities for the finance tracker.
//!
//! Users own transactions and budgets. A transaction owns the purchases it is
//! itemized into and the receipts scanned for it.

pub mod budget;
pub mod category;
pub mod purchase;
pub mod receipt;
pub mod transaction;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::budget::Entity as Budget;
    pub use super::category::Category;
    pub use super::purchase::Entity as Purchase;
    pub use super::receipt::Entity as Receipt;
    pub use super::transaction::Entity as Transaction;
    pub use super::user::Entity as User;
}

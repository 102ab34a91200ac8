//! Budget creation.
//!
//! A budget is checked in two steps. Amounts are validated in memory before
//! the database is touched. The owning user is then looked up inside the same
//! database transaction that inserts the row, so a request either writes one
//! complete budget or nothing.

use model::entities::{budget, category::Category, user};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

/// Error types for budget creation
#[derive(Error, Debug)]
pub enum BudgetError {
    /// A category amount is below zero
    #[error("Invalid budget: {category} amount {amount} is negative")]
    InvalidAmount { category: Category, amount: i32 },

    /// The owning user does not exist
    #[error("User {0} not found")]
    UserNotFound(i32),

    /// Any other failure of the database
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Request body for creating a budget: one amount per spending category.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct NewBudget {
    pub groceries: i32,
    pub clothing_and_accessories: i32,
    pub electronics: i32,
    pub home_and_garden: i32,
    pub health_and_beauty: i32,
    pub entertainment: i32,
    pub travel: i32,
    pub automotive: i32,
    pub services: i32,
    pub gifts_and_special_occasions: i32,
    pub education: i32,
    pub fitness_and_sports: i32,
    pub pets: i32,
    pub office_supplies: i32,
    pub financial_services: i32,
    pub other: i32,
}

impl NewBudget {
    /// Build a budget by asking `amount` for every category, in [`Category::ALL`] order.
    pub fn from_fn(mut amount: impl FnMut(Category) -> i32) -> Self {
        Self {
            groceries: amount(Category::Groceries),
            clothing_and_accessories: amount(Category::ClothingAndAccessories),
            electronics: amount(Category::Electronics),
            home_and_garden: amount(Category::HomeAndGarden),
            health_and_beauty: amount(Category::HealthAndBeauty),
            entertainment: amount(Category::Entertainment),
            travel: amount(Category::Travel),
            automotive: amount(Category::Automotive),
            services: amount(Category::Services),
            gifts_and_special_occasions: amount(Category::GiftsAndSpecialOccasions),
            education: amount(Category::Education),
            fitness_and_sports: amount(Category::FitnessAndSports),
            pets: amount(Category::Pets),
            office_supplies: amount(Category::OfficeSupplies),
            financial_services: amount(Category::FinancialServices),
            other: amount(Category::Other),
        }
    }

    /// Every amount paired with its category.
    pub fn amounts(&self) -> [(Category, i32); Category::COUNT] {
        [
            (Category::Groceries, self.groceries),
            (Category::ClothingAndAccessories, self.clothing_and_accessories),
            (Category::Electronics, self.electronics),
            (Category::HomeAndGarden, self.home_and_garden),
            (Category::HealthAndBeauty, self.health_and_beauty),
            (Category::Entertainment, self.entertainment),
            (Category::Travel, self.travel),
            (Category::Automotive, self.automotive),
            (Category::Services, self.services),
            (Category::GiftsAndSpecialOccasions, self.gifts_and_special_occasions),
            (Category::Education, self.education),
            (Category::FitnessAndSports, self.fitness_and_sports),
            (Category::Pets, self.pets),
            (Category::OfficeSupplies, self.office_supplies),
            (Category::FinancialServices, self.financial_services),
            (Category::Other, self.other),
        ]
    }

    /// Reject the first negative amount.
    pub fn validate(&self) -> Result<(), BudgetError> {
        match self.amounts().into_iter().find(|(_, amount)| *amount < 0) {
            Some((category, amount)) => Err(BudgetError::InvalidAmount { category, amount }),
            None => Ok(()),
        }
    }

    /// Active model of a budget owned by `user_id`, identifier left to the database.
    pub fn into_active_model(self, user_id: i32) -> budget::ActiveModel {
        budget::ActiveModel {
            user_id: Set(user_id),
            groceries: Set(self.groceries),
            clothing_and_accessories: Set(self.clothing_and_accessories),
            electronics: Set(self.electronics),
            home_and_garden: Set(self.home_and_garden),
            health_and_beauty: Set(self.health_and_beauty),
            entertainment: Set(self.entertainment),
            travel: Set(self.travel),
            automotive: Set(self.automotive),
            services: Set(self.services),
            gifts_and_special_occasions: Set(self.gifts_and_special_occasions),
            education: Set(self.education),
            fitness_and_sports: Set(self.fitness_and_sports),
            pets: Set(self.pets),
            office_supplies: Set(self.office_supplies),
            financial_services: Set(self.financial_services),
            other: Set(self.other),
            ..Default::default()
        }
    }
}

/// Insert a budget for `user_id` and return its identifier.
///
/// # Errors
///
/// - [`BudgetError::InvalidAmount`] when any amount is negative, before any query runs
/// - [`BudgetError::UserNotFound`] when no user has the given id
/// - [`BudgetError::Database`] for every other database failure
///
/// Nothing is written unless the call succeeds.
#[instrument(skip(db, budget))]
pub async fn create_budget(
    db: &DatabaseConnection,
    user_id: i32,
    budget: &NewBudget,
) -> Result<i32, BudgetError> {
    trace!("Entering create_budget function");
    budget.validate()?;

    let txn = db.begin().await?;

    trace!("Looking up owner with ID: {}", user_id);
    if user::Entity::find_by_id(user_id).one(&txn).await?.is_none() {
        debug!("User {} missing, rolling back", user_id);
        txn.rollback().await?;
        return Err(BudgetError::UserNotFound(user_id));
    }

    let created = budget.clone().into_active_model(user_id).insert(&txn).await?;
    txn.commit().await?;

    info!("Budget {} created for user {}", created.id, user_id);
    Ok(created.id)
}

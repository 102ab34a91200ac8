use sea_orm::entity::prelude::*;

use super::{category::Category, user};

/// Spending limits of one user, one non-negative amount per [`Category`].
///
/// A user may own several budgets; nothing makes `user_id` unique.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    #[sea_orm(default_value = 0)]
    pub groceries: i32,
    #[sea_orm(default_value = 0)]
    pub clothing_and_accessories: i32,
    #[sea_orm(default_value = 0)]
    pub electronics: i32,
    #[sea_orm(default_value = 0)]
    pub home_and_garden: i32,
    #[sea_orm(default_value = 0)]
    pub health_and_beauty: i32,
    #[sea_orm(default_value = 0)]
    pub entertainment: i32,
    #[sea_orm(default_value = 0)]
    pub travel: i32,
    #[sea_orm(default_value = 0)]
    pub automotive: i32,
    #[sea_orm(default_value = 0)]
    pub services: i32,
    #[sea_orm(default_value = 0)]
    pub gifts_and_special_occasions: i32,
    #[sea_orm(default_value = 0)]
    pub education: i32,
    #[sea_orm(default_value = 0)]
    pub fitness_and_sports: i32,
    #[sea_orm(default_value = 0)]
    pub pets: i32,
    #[sea_orm(default_value = 0)]
    pub office_supplies: i32,
    #[sea_orm(default_value = 0)]
    pub financial_services: i32,
    #[sea_orm(default_value = 0)]
    pub other: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::UserId",
        to = "user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// The amount stored for a single category.
    pub fn amount(&self, category: Category) -> i32 {
        match category {
            Category::Groceries => self.groceries,
            Category::ClothingAndAccessories => self.clothing_and_accessories,
            Category::Electronics => self.electronics,
            Category::HomeAndGarden => self.home_and_garden,
            Category::HealthAndBeauty => self.health_and_beauty,
            Category::Entertainment => self.entertainment,
            Category::Travel => self.travel,
            Category::Automotive => self.automotive,
            Category::Services => self.services,
            Category::GiftsAndSpecialOccasions => self.gifts_and_special_occasions,
            Category::Education => self.education,
            Category::FitnessAndSports => self.fitness_and_sports,
            Category::Pets => self.pets,
            Category::OfficeSupplies => self.office_supplies,
            Category::FinancialServices => self.financial_services,
            Category::Other => self.other,
        }
    }

    /// All sixteen amounts in [`Category::ALL`] order.
    pub fn amounts(&self) -> [(Category, i32); Category::COUNT] {
        Category::ALL.map(|category| (category, self.amount(category)))
    }
}

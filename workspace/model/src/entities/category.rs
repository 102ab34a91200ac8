use sea_orm::entity::prelude::*;

/// Spending category of a purchase.
///
/// The stored value is the human-readable label. Every category also has a
/// matching amount column on the `budgets` table, see [`Category::budget_column`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Category {
    #[sea_orm(string_value = "Groceries")]
    Groceries,
    #[sea_orm(string_value = "Clothing and Accessories")]
    ClothingAndAccessories,
    #[sea_orm(string_value = "Electronics")]
    Electronics,
    #[sea_orm(string_value = "Home and Garden")]
    HomeAndGarden,
    #[sea_orm(string_value = "Health and Beauty")]
    HealthAndBeauty,
    #[sea_orm(string_value = "Entertainment")]
    Entertainment,
    #[sea_orm(string_value = "Travel")]
    Travel,
    #[sea_orm(string_value = "Automotive")]
    Automotive,
    #[sea_orm(string_value = "Services")]
    Services,
    #[sea_orm(string_value = "Gifts and Special Occasions")]
    GiftsAndSpecialOccasions,
    #[sea_orm(string_value = "Education")]
    Education,
    #[sea_orm(string_value = "Fitness and Sports")]
    FitnessAndSports,
    #[sea_orm(string_value = "Pets")]
    Pets,
    #[sea_orm(string_value = "Office Supplies")]
    OfficeSupplies,
    #[sea_orm(string_value = "Financial Services")]
    FinancialServices,
    #[default]
    #[sea_orm(string_value = "Other")]
    Other,
}

impl Category {
    /// Number of categories, and of amount columns on a budget.
    pub const COUNT: usize = 16;

    /// All categories in budget column order.
    pub const ALL: [Category; Category::COUNT] = [
        Category::Groceries,
        Category::ClothingAndAccessories,
        Category::Electronics,
        Category::HomeAndGarden,
        Category::HealthAndBeauty,
        Category::Entertainment,
        Category::Travel,
        Category::Automotive,
        Category::Services,
        Category::GiftsAndSpecialOccasions,
        Category::Education,
        Category::FitnessAndSports,
        Category::Pets,
        Category::OfficeSupplies,
        Category::FinancialServices,
        Category::Other,
    ];

    /// Name of the `budgets` column holding the amount for this category.
    pub fn budget_column(&self) -> &'static str {
        match self {
            Category::Groceries => "groceries",
            Category::ClothingAndAccessories => "clothing_and_accessories",
            Category::Electronics => "electronics",
            Category::HomeAndGarden => "home_and_garden",
            Category::HealthAndBeauty => "health_and_beauty",
            Category::Entertainment => "entertainment",
            Category::Travel => "travel",
            Category::Automotive => "automotive",
            Category::Services => "services",
            Category::GiftsAndSpecialOccasions => "gifts_and_special_occasions",
            Category::Education => "education",
            Category::FitnessAndSports => "fitness_and_sports",
            Category::Pets => "pets",
            Category::OfficeSupplies => "office_supplies",
            Category::FinancialServices => "financial_services",
            Category::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_value())
    }
}

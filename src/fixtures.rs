//! Synthetic data for demos and load tests.
//!
//! [`populate`] wipes the schema and fills it with generated users, each with a
//! few transactions, their purchases and receipts, and one budget. Values come
//! from a [`ChaCha8Rng`] seeded by [`FixtureConfig::seed`], so the same seed
//! and anchor always produce the same rows.
//!
//! Never point this at a database whose data matters.

use std::ops::RangeInclusive;

use chrono::{DateTime, Duration, Utc};
use fake::Fake;
use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::{FirstName, LastName};
use model::entities::{category::Category, purchase, receipt, transaction, user};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, Set, TransactionTrait,
};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::budget::NewBudget;

/// Number of users created when none is configured.
pub const DEFAULT_USERS: usize = 1000;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

const TRANSACTIONS_PER_USER: RangeInclusive<usize> = 1..=4;
const PURCHASES_PER_TRANSACTION: RangeInclusive<usize> = 1..=4;
const PRICE: RangeInclusive<i32> = 1..=99;
const QUANTITY: RangeInclusive<i32> = 1..=9;
const BUDGET_AMOUNT: RangeInclusive<i32> = 50..=499;

/// Transactions are spread over this many days before the anchor.
const HISTORY_DAYS: i64 = 365;

/// Log progress every this many users.
const PROGRESS_INTERVAL: usize = 10;

/// Error types for fixture generation
#[derive(Error, Debug)]
pub enum FixtureError {
    /// Dropping or recreating the tables failed; nothing was generated.
    #[error("Failed to reset schema: {0}")]
    Schema(#[source] DbErr),
}

/// Parameters of a fixture run.
#[derive(Clone, Debug)]
pub struct FixtureConfig {
    /// How many users to create.
    pub users: usize,
    /// Seed of the random source.
    pub seed: u64,
    /// Reference instant: transactions happen in the year before it,
    /// warranty and return dates in the year after it.
    pub anchor: DateTime<Utc>,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            users: DEFAULT_USERS,
            seed: DEFAULT_SEED,
            anchor: Utc::now(),
        }
    }
}

/// Rows committed by a fixture run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FixtureReport {
    pub users: usize,
    pub transactions: usize,
    pub purchases: usize,
    pub receipts: usize,
    pub budgets: usize,
    /// Users whose rows were rolled back.
    pub failed_users: usize,
}

impl FixtureReport {
    fn record(&mut self, user: &SyntheticUser) {
        self.users += 1;
        self.transactions += user.transactions.len();
        for transaction in &user.transactions {
            self.purchases += transaction.purchases.len();
            // One receipt per purchase
            self.receipts += transaction.purchases.len();
        }
        self.budgets += 1;
    }
}

/// A generated user with everything it owns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntheticUser {
    pub name: String,
    pub email: String,
    pub transactions: Vec<SyntheticTransaction>,
    pub budget: NewBudget,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntheticTransaction {
    pub merchant: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    /// `created_at` as `YYYY-MM-DD`.
    pub date: String,
    pub purchases: Vec<SyntheticPurchase>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntheticPurchase {
    pub item: String,
    pub price: i32,
    pub warranty_date: String,
    pub return_date: String,
    pub category: Category,
    pub quantity: i32,
    pub receipt: SyntheticReceipt,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntheticReceipt {
    pub url: String,
    pub parsed_data: String,
}

/// Deterministic source of synthetic users.
pub struct FixtureGenerator {
    rng: ChaCha8Rng,
    anchor: DateTime<Utc>,
}

impl FixtureGenerator {
    pub fn new(seed: u64, anchor: DateTime<Utc>) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            anchor,
        }
    }

    /// Generate the next user. `index` keeps emails unique within a run.
    pub fn next_user(&mut self, index: usize) -> SyntheticUser {
        let first: String = FirstName().fake_with_rng(&mut self.rng);
        let last: String = LastName().fake_with_rng(&mut self.rng);
        let email = format!("{}.{}{}@example.com", slug(&first), slug(&last), index);

        let transaction_count = self.rng.random_range(TRANSACTIONS_PER_USER);
        let transactions = (0..transaction_count)
            .map(|_| self.next_transaction())
            .collect();

        let budget = NewBudget::from_fn(|_| self.rng.random_range(BUDGET_AMOUNT));

        SyntheticUser {
            name: format!("{first} {last}"),
            email,
            transactions,
            budget,
        }
    }

    fn next_transaction(&mut self) -> SyntheticTransaction {
        let merchant: String = CompanyName().fake_with_rng(&mut self.rng);
        let description: String = Sentence(3..8).fake_with_rng(&mut self.rng);
        let seconds_ago = self.rng.random_range(0..=HISTORY_DAYS * 86_400);
        let created_at = self.anchor - Duration::seconds(seconds_ago);

        let purchase_count = self.rng.random_range(PURCHASES_PER_TRANSACTION);
        let purchases = (0..purchase_count).map(|_| self.next_purchase()).collect();

        SyntheticTransaction {
            merchant,
            description,
            created_at,
            date: created_at.format("%Y-%m-%d").to_string(),
            purchases,
        }
    }

    fn next_purchase(&mut self) -> SyntheticPurchase {
        let item: String = Word().fake_with_rng(&mut self.rng);
        let price = self.rng.random_range(PRICE);
        let warranty_date = self.days_after_anchor(0..=HISTORY_DAYS);
        let return_date = self.days_after_anchor(1..=HISTORY_DAYS);
        let category = Category::ALL[self.rng.random_range(0..Category::COUNT)];
        let quantity = self.rng.random_range(QUANTITY);

        let host: String = Word().fake_with_rng(&mut self.rng);
        let receipt = SyntheticReceipt {
            url: format!(
                "https://{}.example.com/receipts/{:08x}",
                slug(&host),
                self.rng.random::<u32>()
            ),
            parsed_data: Paragraph(1..3).fake_with_rng(&mut self.rng),
        };

        SyntheticPurchase {
            item,
            price,
            warranty_date,
            return_date,
            category,
            quantity,
            receipt,
        }
    }

    fn days_after_anchor(&mut self, days: RangeInclusive<i64>) -> String {
        let offset = self.rng.random_range(days);
        (self.anchor + Duration::days(offset))
            .format("%Y-%m-%d")
            .to_string()
    }
}

/// Lowercase ASCII letters and digits of `text`, for email local parts and hosts.
fn slug(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Reset the schema and insert `config.users` synthetic users.
///
/// Each user is written in its own database transaction. A user that fails
/// to insert is rolled back, counted in [`FixtureReport::failed_users`] and
/// skipped; the run goes on with the next one.
#[instrument(skip(db))]
pub async fn populate(
    db: &DatabaseConnection,
    config: &FixtureConfig,
) -> Result<FixtureReport, FixtureError> {
    info!("Dropping and recreating tables");
    migration::reset_schema(db)
        .await
        .map_err(FixtureError::Schema)?;

    let mut generator = FixtureGenerator::new(config.seed, config.anchor);
    let users = (0..config.users).map(|index| generator.next_user(index));
    let report = insert_users(db, users, config.users).await;

    info!("Fake data generation completed: {:?}", report);
    Ok(report)
}

/// Insert `users` one transaction each, skipping and counting the ones that fail.
async fn insert_users(
    db: &DatabaseConnection,
    users: impl IntoIterator<Item = SyntheticUser>,
    total: usize,
) -> FixtureReport {
    let mut report = FixtureReport::default();

    info!("Creating {} fake users", total);
    for (index, synthetic) in users.into_iter().enumerate() {
        if index % PROGRESS_INTERVAL == 0 {
            info!("Progress: {}/{} users", index, total);
        }

        match insert_user(db, &synthetic).await {
            Ok(()) => report.record(&synthetic),
            Err(db_error) => {
                warn!("Skipping fake user {}: {}", index, db_error);
                report.failed_users += 1;
            }
        }
    }

    report
}

/// Write one user graph atomically. On failure the insert error is returned,
/// even if the rollback fails as well.
async fn insert_user(db: &DatabaseConnection, synthetic: &SyntheticUser) -> Result<(), DbErr> {
    let txn = db.begin().await?;
    match insert_user_rows(&txn, synthetic).await {
        Ok(()) => txn.commit().await,
        Err(db_error) => {
            if let Err(rollback_error) = txn.rollback().await {
                error!("Rollback of fake user {} failed: {}", synthetic.email, rollback_error);
            }
            Err(db_error)
        }
    }
}

async fn insert_user_rows(txn: &DatabaseTransaction, synthetic: &SyntheticUser) -> Result<(), DbErr> {
    let owner = user::ActiveModel {
        name: Set(synthetic.name.clone()),
        email: Set(synthetic.email.clone()),
        ..Default::default()
    }
    .insert(txn)
    .await?;
    debug!("Inserted user {} ({})", owner.id, owner.email);

    for generated in &synthetic.transactions {
        let stored = transaction::ActiveModel {
            user_id: Set(owner.id),
            merchant: Set(generated.merchant.clone()),
            description: Set(Some(generated.description.clone())),
            created_at: Set(generated.created_at),
            date: Set(Some(generated.date.clone())),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        for item in &generated.purchases {
            purchase::ActiveModel {
                transaction_id: Set(stored.id),
                item: Set(item.item.clone()),
                price: Set(item.price),
                warranty_date: Set(Some(item.warranty_date.clone())),
                return_date: Set(Some(item.return_date.clone())),
                category: Set(item.category),
                quantity: Set(item.quantity),
                ..Default::default()
            }
            .insert(txn)
            .await?;

            receipt::ActiveModel {
                transaction_id: Set(Some(stored.id)),
                url: Set(item.receipt.url.clone()),
                parsed_data: Set(item.receipt.parsed_data.clone()),
                ..Default::default()
            }
            .insert(txn)
            .await?;
        }
    }

    synthetic
        .budget
        .clone()
        .into_active_model(owner.id)
        .insert(txn)
        .await?;

    Ok(())
}

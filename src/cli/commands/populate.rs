use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::config::connect_database;
use crate::fixtures::{FixtureConfig, FixtureReport, populate};

/// Wipe the database at `database_url` and fill it with `users` fake users.
///
/// Runs with the same seed and anchor write identical rows. Without an
/// anchor the current time is used.
pub async fn populate_database(
    database_url: &str,
    users: usize,
    seed: u64,
    anchor: Option<DateTime<Utc>>,
) -> Result<FixtureReport> {
    let anchor = anchor.unwrap_or_else(Utc::now);
    info!("Populating database with {} fake users (seed {}, anchor {})", users, seed, anchor);
    let db = connect_database(database_url).await?;

    let config = FixtureConfig {
        users,
        seed,
        anchor,
    };

    match populate(&db, &config).await {
        Ok(report) => {
            if report.failed_users > 0 {
                error!("{} of {} fake users could not be inserted", report.failed_users, users);
            }
            Ok(report)
        }
        Err(e) => {
            error!("Failed to populate database: {}", e);
            Err(e.into())
        }
    }
}

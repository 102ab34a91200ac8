//! Fill the configured database with fake data.
//!
//! Reads `DATABASE_URL`, or `POSTGRES_USER`, `POSTGRES_PASSWORD`,
//! `POSTGRES_SERVER`, `POSTGRES_PORT` and `POSTGRES_DB`, from the environment
//! or a `.env` file. Drops every table first.

use anyhow::Result;
use budgetbook::cli::PopulateArgs;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "budgetbook=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    PopulateArgs::parse().run().await
}

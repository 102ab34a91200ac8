//! Budgetbook: per-user spending budgets over a small purchase-tracking schema.
//!
//! The HTTP surface is built by [`router::create_router`]; the binaries in
//! `main.rs` and `bin/populate.rs` drive it through [`cli`].

pub mod auth;
pub mod budget;
pub mod cli;
pub mod config;
pub mod fixtures;
pub mod handlers;
pub mod router;
pub mod schemas;

mod tests;

//! Back-office Library
//!
//! Persistence core of the store's back office: generic entity stores, a
//! unit of work committing their staged changes atomically, the role engine
//! keeping company affiliation consistent with role membership, and the
//! services built on them.

pub mod cli;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;
pub mod unit_of_work;

pub use config::BackofficeConfig;
pub use infra::Database;
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use unit_of_work::MockUnitOfWork;

/// Connect, create missing tables and provision the built-in roles.
pub async fn init(config: &BackofficeConfig) -> Result<Database, Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    db.ensure_schema().await?;
    db.ensure_builtin_roles().await?;
    Ok(db)
}

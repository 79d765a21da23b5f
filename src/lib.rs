//! Data-access layer for client records kept in SQLite.
//!
//! [`repository::DieselRepository`] implements [`repository::ClientReader`]
//! and [`repository::ClientWriter`]: paged filters by minimum income, name
//! substring and minimum birth date, plus keyed create/read/update/delete.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "cli")]
use std::time::Duration;

#[cfg(feature = "cli")]
use diesel::sqlite::SqliteConnection;
#[cfg(feature = "cli")]
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

#[cfg(feature = "cli")]
use crate::db::{ConnectionOptions, build_connection_pool, get_connection};
#[cfg(feature = "cli")]
use crate::models::config::GatewayConfig;
#[cfg(feature = "cli")]
use crate::pagination::PageRequest;
#[cfg(feature = "cli")]
use crate::repository::{ClientReader, DieselRepository};

#[cfg(feature = "cli")]
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Opens the store described by `config`, applies pending migrations and
/// logs how many clients match each configured filter.
#[cfg(feature = "cli")]
pub fn run(config: GatewayConfig) -> std::io::Result<()> {
    let options = ConnectionOptions {
        enable_wal: config.enable_wal,
        busy_timeout: Some(Duration::from_secs(config.busy_timeout_secs)),
    };

    // Establish Diesel connection pool for the SQLite database.
    let pool = build_connection_pool(&config.database_url, options, config.pool_max_size)
        .map_err(|e| {
            std::io::Error::other(format!("Failed to establish database connection: {e}"))
        })?;

    {
        let mut conn = get_connection(&pool)
            .map_err(|e| std::io::Error::other(format!("Failed to get connection: {e}")))?;
        let conn: &mut SqliteConnection = &mut conn;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| std::io::Error::other(format!("Failed to apply migrations: {e}")))?;
        for version in applied {
            log::info!("Applied migration {version}");
        }
    }

    let repo = DieselRepository::new(pool);
    let report = &config.report;
    let probe = PageRequest::of(0, 1).map_err(std::io::Error::other)?;

    let total = repo.count_clients().map_err(std::io::Error::other)?;
    let by_income = repo
        .find_clients_by_income(report.min_income, probe)
        .map_err(std::io::Error::other)?;
    let by_name = repo
        .find_clients_by_name(&report.name_part, probe)
        .map_err(std::io::Error::other)?;
    let by_year = repo
        .find_clients_by_year(report.min_birth_date, probe)
        .map_err(std::io::Error::other)?;

    log::info!("Store holds {total} clients");
    log::info!(
        "{} clients with income >= {}",
        by_income.total_elements,
        report.min_income
    );
    log::info!(
        "{} clients with name containing {:?}",
        by_name.total_elements,
        report.name_part
    );
    log::info!(
        "{} clients born at or after {}",
        by_year.total_elements,
        report.min_birth_date
    );

    Ok(())
}

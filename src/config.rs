use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::{debug, info};

use crate::ledger::seed::{seed_defaults, SeedReport};
use crate::schemas::AppState;

/// SQLite file next to the working directory, created on first use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://gastos.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Connect to the database at `database_url`.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection> {
    info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url)
        .await
        .with_context(|| format!("Failed to connect to database '{}'", database_url))?;
    debug!("Database connection established");
    Ok(db)
}

/// Create missing tables, then seed default categories and rules into empty tables.
pub async fn prepare_database(db: &DatabaseConnection) -> Result<SeedReport> {
    info!("Running database migrations");
    Migrator::up(db, None)
        .await
        .context("Failed to run database migrations")?;

    let report = seed_defaults(db)
        .await
        .context("Failed to seed default categories and rules")?;
    Ok(report)
}

/// Initialize application state with a specific database URL
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    let db = connect(database_url).await?;
    prepare_database(&db).await?;
    Ok(AppState { db })
}

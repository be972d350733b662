use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, trace, warn};

use crate::config::connect;
use crate::ledger::maintenance::clear_all_tables;

/// File behind a `sqlite:` URL, or `None` for in-memory and non-SQLite URLs.
fn sqlite_file_path(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(Path::new(path))
}

/// Empties every table of an existing database.
///
/// A missing SQLite file is reported and not created.
pub async fn clear_database(database_url: &str) -> Result<()> {
    trace!("Entering clear_database function");
    debug!("Database URL: {}", database_url);

    if let Some(path) = sqlite_file_path(database_url) {
        if !path.exists() {
            warn!("No se encontró la base de datos: {}", path.display());
            return Ok(());
        }
    }

    info!("Clearing all tables");
    let db = connect(database_url).await?;
    let cleared = clear_all_tables(&db)
        .await
        .context("Failed to clear database")?;

    let rows: u64 = cleared.iter().map(|table| table.rows_deleted).sum();
    info!("Database cleared: {} rows deleted from {} tables", rows, cleared.len());
    Ok(())
}

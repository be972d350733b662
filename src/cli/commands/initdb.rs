use anyhow::Result;
use tracing::{debug, error, info, trace};

use crate::config::{connect, prepare_database};

pub async fn init_database(database_url: &str) -> Result<()> {
    trace!("Entering init_database function");
    info!("Initializing database");
    debug!("Database URL: {}", database_url);

    let db = connect(database_url).await?;

    match prepare_database(&db).await {
        Ok(report) => {
            info!(
                "Database ready: {} categories and {} rules seeded",
                report.categories, report.rules
            );
        }
        Err(e) => {
            error!("Failed to initialize database: {:#}", e);
            return Err(e);
        }
    }

    info!("Database initialization completed successfully!");
    Ok(())
}

use sea_orm::{ConnectionTrait, DbBackend, Statement, TransactionTrait};
use tracing::{debug, info, instrument};

use super::Result;

/// Table sea-orm-migration uses to track applied migrations. Never cleared.
const MIGRATIONS_TABLE: &str = "seaql_migrations";

/// Rows removed from one table by [`clear_all_tables`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClearedTable {
    pub table: String,
    pub rows_deleted: u64,
}

/// Lists the user tables of a SQLite database by name.
pub async fn list_user_tables<C: ConnectionTrait>(db: &C) -> Result<Vec<String>> {
    let rows = db
        .query_all(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name != ? \
             ORDER BY name",
            [MIGRATIONS_TABLE.into()],
        ))
        .await?;

    let mut tables = Vec::with_capacity(rows.len());
    for row in rows {
        tables.push(row.try_get::<String>("", "name")?);
    }
    Ok(tables)
}

/// Deletes every row of every user table and resets autoincrement counters.
///
/// Runs in one transaction with foreign-key checks deferred to commit, so tables can be
/// emptied in any order. The schema and the migration history are left in place.
#[instrument(skip(db))]
pub async fn clear_all_tables<C: TransactionTrait>(db: &C) -> Result<Vec<ClearedTable>> {
    let txn = db.begin().await?;
    txn.execute_unprepared("PRAGMA defer_foreign_keys = ON").await?;

    let tables = list_user_tables(&txn).await?;
    if tables.is_empty() {
        info!("No tables found to clear");
    }

    let mut cleared = Vec::with_capacity(tables.len());
    for table in tables {
        let result = txn
            .execute_unprepared(&format!("DELETE FROM \"{}\"", table.replace('"', "\"\"")))
            .await?;
        info!("Cleared table {}: {} rows deleted", table, result.rows_affected());

        // Tables without AUTOINCREMENT have no sequence row; nothing to reset then.
        let reset = txn
            .execute(Statement::from_sql_and_values(
                DbBackend::Sqlite,
                "DELETE FROM sqlite_sequence WHERE name = ?",
                [table.clone().into()],
            ))
            .await;
        if let Err(e) = reset {
            debug!("Could not reset sequence for {}: {}", table, e);
        }

        cleared.push(ClearedTable {
            table,
            rows_deleted: result.rows_affected(),
        });
    }

    txn.commit().await?;
    Ok(cleared)
}

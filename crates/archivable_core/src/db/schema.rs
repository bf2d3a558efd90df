//! Mapping-driven schema bootstrap and guards.
//!
//! # Responsibility
//! - Create a record's table from its SQL projection when it is missing.
//! - Verify required columns exist before a store accepts a connection.
//!
//! # Invariants
//! - `ensure_record_schema` is idempotent for an unchanged projection.
//! - Verification failures name the offending table or column.

use crate::store::{ColumnSpec, SqlRecord, StoreError, StoreResult};
use log::info;
use rusqlite::Connection;
use std::collections::BTreeSet;

/// Creates the record's table when missing, otherwise verifies that every
/// projected column exists.
pub fn ensure_record_schema<R: SqlRecord>(conn: &Connection) -> StoreResult<()> {
    if !table_exists(conn, R::table())? {
        conn.execute_batch(&create_table_sql(R::table(), R::columns()))?;
        info!(
            "event=schema_create module=db status=ok table={}",
            R::table()
        );
        return Ok(());
    }
    verify_record_schema::<R>(conn)
}

/// Verifies the record's table and full column projection exist.
pub fn verify_record_schema<R: SqlRecord>(conn: &Connection) -> StoreResult<()> {
    if !table_exists(conn, R::table())? {
        return Err(StoreError::MissingRequiredTable(R::table()));
    }

    let existing = existing_columns(conn, R::table())?;
    for spec in R::columns() {
        if !existing.contains(spec.name) {
            return Err(StoreError::MissingRequiredColumn {
                table: R::table(),
                column: spec.name,
            });
        }
    }
    Ok(())
}

fn create_table_sql(table: &str, columns: &[ColumnSpec]) -> String {
    let body = columns
        .iter()
        .map(|spec| format!("{} {}", spec.name, spec.sql_type))
        .collect::<Vec<_>>()
        .join(",\n    ");
    format!("CREATE TABLE {table} (\n    {body}\n);")
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let count: u32 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn existing_columns(conn: &Connection, table: &str) -> StoreResult<BTreeSet<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = BTreeSet::new();
    while let Some(row) = rows.next()? {
        columns.insert(row.get::<_, String>("name")?);
    }
    Ok(columns)
}

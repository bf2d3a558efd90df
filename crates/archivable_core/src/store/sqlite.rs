//! SQLite-backed archive store.
//!
//! # Responsibility
//! - Implement the store contract over a validated SQLite connection.
//! - Render scoped SELECT/UPDATE statements from `RecordQuery` shapes.
//!
//! # Invariants
//! - Construction fails unless the record's table and full column
//!   projection exist.
//! - Joined queries reference record columns table-qualified; unjoined
//!   queries use bare names.
//! - Bulk UPDATEs against joined queries go through an id subselect, since
//!   SQLite UPDATE does not accept join clauses directly.

use crate::db::schema::verify_record_schema;
use crate::model::record::EpochMillis;
use crate::scope::filter::ArchiveFilter;
use crate::scope::query::RecordQuery;
use crate::store::{ArchiveStore, RecordId, SqlRecord, StoreError, StoreResult};
use log::info;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::marker::PhantomData;

/// SQLite store for one archivable record type.
pub struct SqliteStore<'conn, R: SqlRecord> {
    conn: &'conn Connection,
    _record: PhantomData<fn() -> R>,
}

impl<'conn, R: SqlRecord> SqliteStore<'conn, R> {
    /// Wraps a connection after verifying the record's schema is present.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when the record's table does not exist.
    /// - `MissingRequiredColumn` when the table lacks a projected column,
    ///   including the archived marker.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        verify_record_schema::<R>(conn)?;
        Ok(Self {
            conn,
            _record: PhantomData,
        })
    }

    fn select_list(qualified: bool) -> String {
        R::columns()
            .iter()
            .map(|spec| {
                if qualified {
                    format!("{table}.{name} AS {name}", table = R::table(), name = spec.name)
                } else {
                    spec.name.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn id_bind(record: &R) -> Value {
        Value::Text(record.id().to_string())
    }

    fn query_rows(&self, sql: &str, binds: Vec<Value>) -> StoreResult<Vec<R>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(binds))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(R::from_row(row)?);
        }
        Ok(records)
    }
}

impl<R: SqlRecord> ArchiveStore<R> for SqliteStore<'_, R> {
    fn insert(&self, record: &R) -> StoreResult<RecordId> {
        let columns = R::columns();
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {table} ({names}) VALUES ({placeholders});",
            table = R::table(),
            names = Self::select_list(false),
        );

        self.conn
            .execute(&sql, params_from_iter(record.bind_values()))?;
        Ok(record.id())
    }

    fn save(&self, record: &R) -> StoreResult<()> {
        let assignments = R::columns()
            .iter()
            .filter(|spec| spec.name != R::ID_COLUMN)
            .map(|spec| format!("{} = ?", spec.name))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {table} SET {assignments} WHERE {id} = ?;",
            table = R::table(),
            id = R::ID_COLUMN,
        );

        let mut binds: Vec<Value> = R::columns()
            .iter()
            .zip(record.bind_values())
            .filter(|(spec, _)| spec.name != R::ID_COLUMN)
            .map(|(_, value)| value)
            .collect();
        binds.push(Self::id_bind(record));

        let changed = self.conn.execute(&sql, params_from_iter(binds))?;
        if changed == 0 {
            return Err(StoreError::NotFound(record.id()));
        }
        Ok(())
    }

    fn get(&self, id: RecordId, filter: ArchiveFilter) -> StoreResult<Option<R>> {
        let mut sql = format!(
            "SELECT {list} FROM {table} WHERE {id_column} = ?1",
            list = Self::select_list(false),
            table = R::table(),
            id_column = R::ID_COLUMN,
        );
        if let Some(predicate) = filter.predicate_sql(R::archived_at_column()) {
            sql.push_str(" AND ");
            sql.push_str(&predicate);
        }
        sql.push(';');

        let mut records = self.query_rows(&sql, vec![Value::Text(id.to_string())])?;
        Ok(if records.is_empty() {
            None
        } else {
            Some(records.swap_remove(0))
        })
    }

    fn list(&self, query: &RecordQuery) -> StoreResult<Vec<R>> {
        let qualified = query.has_joins();
        let id_ref = if qualified {
            format!("{}.{}", R::table(), R::ID_COLUMN)
        } else {
            R::ID_COLUMN.to_string()
        };

        let mut sql = format!(
            "SELECT {list} FROM {table}{joins}",
            list = Self::select_list(qualified),
            table = R::table(),
            joins = query.join_sql(),
        );
        let (where_sql, mut binds) = query.where_sql();
        sql.push_str(&where_sql);
        sql.push_str(&format!(" ORDER BY {id_ref} ASC"));

        if let Some(limit) = query.limit_value() {
            sql.push_str(" LIMIT ?");
            binds.push(Value::Integer(i64::from(limit)));
            if query.offset_value() > 0 {
                sql.push_str(" OFFSET ?");
                binds.push(Value::Integer(i64::from(query.offset_value())));
            }
        } else if query.offset_value() > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            binds.push(Value::Integer(i64::from(query.offset_value())));
        }
        sql.push(';');

        self.query_rows(&sql, binds)
    }

    fn archive_matched(
        &self,
        query: &RecordQuery,
        archived_at: EpochMillis,
    ) -> StoreResult<usize> {
        let affected = execute_marker_update::<R>(
            self.conn,
            query,
            "?",
            vec![Value::Integer(archived_at)],
        )?;
        info!(
            "event=bulk_archive module=store table={} affected={affected}",
            R::table()
        );
        Ok(affected)
    }

    fn unarchive_matched(&self, query: &RecordQuery) -> StoreResult<usize> {
        // Archived rows must be reachable regardless of the caller's
        // visibility; active rows no-op to the same null marker.
        let forced = query.clone().with_archived();
        let affected = execute_marker_update::<R>(self.conn, &forced, "NULL", Vec::new())?;
        info!(
            "event=bulk_unarchive module=store table={} affected={affected}",
            R::table()
        );
        Ok(affected)
    }
}

fn execute_marker_update<R: SqlRecord>(
    conn: &Connection,
    query: &RecordQuery,
    marker_expr: &str,
    marker_binds: Vec<Value>,
) -> StoreResult<usize> {
    let (where_sql, where_binds) = query.where_sql();

    let sql = if query.has_joins() {
        format!(
            "UPDATE {table} SET {marker} = {marker_expr} WHERE {id} IN \
             (SELECT {table}.{id} FROM {table}{joins}{where_sql});",
            table = R::table(),
            marker = R::archived_at_column(),
            id = R::ID_COLUMN,
            joins = query.join_sql(),
        )
    } else {
        format!(
            "UPDATE {table} SET {marker} = {marker_expr}{where_sql};",
            table = R::table(),
            marker = R::archived_at_column(),
        )
    };

    let mut binds = marker_binds;
    binds.extend(where_binds);
    let affected = conn.execute(&sql, params_from_iter(binds))?;
    Ok(affected)
}

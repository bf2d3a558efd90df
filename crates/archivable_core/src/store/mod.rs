//! Persistence contracts for archivable records.
//!
//! # Responsibility
//! - Define the store contract archive transitions and scoped queries run
//!   against.
//! - Define the SQL row-mapping contract record types implement for the
//!   SQLite store.
//!
//! # Invariants
//! - Store writes surface semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Bulk transitions never fire per-record lifecycle listeners.

use crate::db::DbError;
use crate::model::record::{ArchiveRecord, EpochMillis};
use crate::scope::filter::ArchiveFilter;
use crate::scope::query::RecordQuery;
use rusqlite::types::Value;
use rusqlite::Row;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod sqlite;

pub use sqlite::SqliteStore;

/// Stable identifier for persisted records.
pub type RecordId = Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error for persistence and schema-guard failures.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    NotFound(RecordId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` does not exist")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "table `{table}` is missing required column `{column}`")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// One column of a record's SQL projection.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    /// Column type plus constraints as written in CREATE TABLE.
    pub sql_type: &'static str,
}

/// SQL row mapping implemented by record types persisted in SQLite.
///
/// `columns()` and `bind_values()` must stay aligned: same length, same
/// order, id and archived-marker columns included.
pub trait SqlRecord: ArchiveRecord + Sized {
    /// Primary-key column name.
    const ID_COLUMN: &'static str = "id";

    /// Stable record identifier.
    fn id(&self) -> RecordId;

    /// Full column projection, including id and the archived marker.
    fn columns() -> &'static [ColumnSpec];

    /// Bind values aligned with [`SqlRecord::columns`].
    fn bind_values(&self) -> Vec<Value>;

    /// Decodes one row selected with the [`SqlRecord::columns`] projection.
    fn from_row(row: &Row<'_>) -> StoreResult<Self>;
}

/// Persistence engine contract for one archivable record type.
pub trait ArchiveStore<R: ArchiveRecord> {
    /// Inserts a new record row.
    fn insert(&self, record: &R) -> StoreResult<RecordId>;

    /// Writes the record's current in-memory field values over its row.
    ///
    /// Returns `NotFound` when no row was updated, so callers can gate
    /// follow-up work on persistence actually happening.
    fn save(&self, record: &R) -> StoreResult<()>;

    /// Gets one record by id under the given visibility.
    fn get(&self, id: RecordId, filter: ArchiveFilter) -> StoreResult<Option<R>>;

    /// Lists records matched by the query's current predicate state.
    fn list(&self, query: &RecordQuery) -> StoreResult<Vec<R>>;

    /// Stamps `archived_at` on every row matched by the query.
    ///
    /// Honors the query's visibility: with the default filter active only
    /// active rows are stamped. Bypasses per-record lifecycle listeners.
    fn archive_matched(
        &self,
        query: &RecordQuery,
        archived_at: EpochMillis,
    ) -> StoreResult<usize>;

    /// Clears `archived_at` on every row matched by the query.
    ///
    /// Forces archived-row visibility first, so archived rows are always
    /// reachable; already-active rows are included and updated to the same
    /// null marker without error. Bypasses per-record lifecycle listeners.
    fn unarchive_matched(&self, query: &RecordQuery) -> StoreResult<usize>;
}

/// Decodes a uuid text column into a [`RecordId`].
pub fn read_record_id(row: &Row<'_>, column: &str) -> StoreResult<RecordId> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text).map_err(|_| {
        StoreError::InvalidData(format!("invalid uuid value `{text}` in column `{column}`"))
    })
}

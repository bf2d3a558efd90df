//! Soft-archiving layer for persistable domain records.
//!
//! Records carry a nullable archived-marker timestamp; queries exclude
//! archived rows by default, with explicit bypass/invert operations, and
//! typed lifecycle events fire around every single-record transition.

pub mod clock;
pub mod db;
pub mod events;
pub mod logging;
pub mod model;
pub mod scope;
pub mod service;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use db::schema::ensure_record_schema;
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use events::{ArchiveEvent, ArchiveHooks, HookDecision};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{ArchiveRecord, EpochMillis};
pub use scope::filter::{ArchiveFilter, ArchiveVisibility};
pub use scope::query::RecordQuery;
pub use service::archiver::{ArchiveOutcome, Archiver};
pub use store::{
    read_record_id, ArchiveStore, ColumnSpec, RecordId, SqlRecord, SqliteStore, StoreError,
    StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

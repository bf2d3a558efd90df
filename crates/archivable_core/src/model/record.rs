//! Archivable record contract.
//!
//! # Responsibility
//! - Expose archived-marker accessors and column/table resolution for one
//!   record type.
//! - Provide derived state helpers shared by every implementation.
//!
//! # Invariants
//! - `is_archived()` is true exactly when `archived_at()` is non-null; no
//!   separate boolean flag exists, so marker and state cannot diverge.
//! - Column resolution is configuration, not per-instance state.

/// Wall-clock instant in Unix epoch milliseconds.
pub type EpochMillis = i64;

/// Contract implemented by record types that support soft archiving.
///
/// The marker field is a nullable point-in-time: `None` means active,
/// `Some(t)` means archived as of `t`. Ordinary field updates must never
/// touch the marker; only archive/unarchive transitions do.
pub trait ArchiveRecord {
    /// Conventional marker column name. Record types with a different
    /// schema override this constant.
    const ARCHIVED_AT_COLUMN: &'static str = "archived_at";

    /// Table identifier used for persistence and column qualification.
    fn table() -> &'static str;

    /// Current archived-marker value.
    fn archived_at(&self) -> Option<EpochMillis>;

    /// Replaces the archived-marker value.
    fn set_archived_at(&mut self, archived_at: Option<EpochMillis>);

    /// Returns whether this record is archived.
    fn is_archived(&self) -> bool {
        self.archived_at().is_some()
    }

    /// Returns the configured marker column name for this record type.
    fn archived_at_column() -> &'static str {
        Self::ARCHIVED_AT_COLUMN
    }

    /// Returns the marker column qualified by the record's table, for use
    /// in queries that join other tables.
    fn qualified_archived_at_column() -> String {
        format!("{}.{}", Self::table(), Self::ARCHIVED_AT_COLUMN)
    }
}

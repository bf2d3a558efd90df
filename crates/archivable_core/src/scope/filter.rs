//! Archive visibility configuration.
//!
//! # Responsibility
//! - Model the default exclude-archived predicate as an immutable value.
//! - Provide the bypass and invert transforms as pure value operations.
//!
//! # Invariants
//! - New filters start with archived rows excluded.
//! - Transforms return new configurations; no shared state is mutated.

use serde::{Deserialize, Serialize};

/// Which archive states a query can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveVisibility {
    /// Only rows whose archived marker is null. The default for every query.
    #[default]
    ActiveOnly,
    /// Both archived and non-archived rows; the marker predicate is
    /// suppressed entirely.
    WithArchived,
    /// Only rows whose archived marker is non-null.
    OnlyArchived,
}

/// Immutable default-predicate configuration for one query.
///
/// Construction starts with the exclude-archived predicate applied, so a
/// caller that does nothing sees active rows only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArchiveFilter {
    visibility: ArchiveVisibility,
}

impl ArchiveFilter {
    /// Creates a filter with the default exclude-archived predicate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a filter with the default predicate suppressed: archived and
    /// active rows are both visible.
    pub fn with_archived(self) -> Self {
        Self {
            visibility: ArchiveVisibility::WithArchived,
        }
    }

    /// Returns a filter matching archived rows only.
    pub fn only_archived(self) -> Self {
        Self {
            visibility: ArchiveVisibility::OnlyArchived,
        }
    }

    /// Current visibility.
    pub fn visibility(&self) -> ArchiveVisibility {
        self.visibility
    }

    /// Renders the marker predicate for the given column reference, or
    /// `None` when visibility suppresses the predicate.
    pub fn predicate_sql(&self, column: &str) -> Option<String> {
        match self.visibility {
            ArchiveVisibility::ActiveOnly => Some(format!("{column} IS NULL")),
            ArchiveVisibility::WithArchived => None,
            ArchiveVisibility::OnlyArchived => Some(format!("{column} IS NOT NULL")),
        }
    }
}

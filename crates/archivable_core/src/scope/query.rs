//! Per-query predicate assembly for archivable records.
//!
//! # Responsibility
//! - Collect visibility, caller conditions, joins and pagination for one
//!   query against one record type.
//! - Render WHERE/JOIN fragments with positional binds in the store's
//!   expected order.
//!
//! # Invariants
//! - The marker predicate renders before caller conditions.
//! - The marker column is table-qualified exactly when the query carries at
//!   least one join clause, re-checked on every render.

use crate::model::record::ArchiveRecord;
use crate::scope::filter::{ArchiveFilter, ArchiveVisibility};
use rusqlite::types::Value;

/// Query shape for one archivable record type.
///
/// Built once per query; transforms consume and return the query so a
/// configuration cannot be half-applied.
#[derive(Debug, Clone)]
pub struct RecordQuery {
    table: &'static str,
    archived_at_column: &'static str,
    filter: ArchiveFilter,
    joins: Vec<String>,
    conditions: Vec<(String, Value)>,
    limit: Option<u32>,
    offset: u32,
}

impl RecordQuery {
    /// Creates the default query for a record type: active rows only, no
    /// joins, no caller conditions.
    pub fn of<R: ArchiveRecord>() -> Self {
        Self {
            table: R::table(),
            archived_at_column: R::archived_at_column(),
            filter: ArchiveFilter::new(),
            joins: Vec::new(),
            conditions: Vec::new(),
            limit: None,
            offset: 0,
        }
    }

    /// Suppresses the default predicate: archived rows become visible.
    pub fn with_archived(mut self) -> Self {
        self.filter = self.filter.with_archived();
        self
    }

    /// Inverts the default predicate: archived rows only.
    pub fn only_archived(mut self) -> Self {
        self.filter = self.filter.only_archived();
        self
    }

    /// Adds a raw join clause, e.g. `INNER JOIN labels l ON l.ticket_id = tickets.id`.
    pub fn join(mut self, clause: impl Into<String>) -> Self {
        self.joins.push(clause.into());
        self
    }

    /// Adds an equality condition on one column.
    pub fn where_eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.conditions.push((format!("{column} = ?"), value.into()));
        self
    }

    /// Caps the number of returned rows.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips leading rows.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn visibility(&self) -> ArchiveVisibility {
        self.filter.visibility()
    }

    pub fn has_joins(&self) -> bool {
        !self.joins.is_empty()
    }

    pub fn limit_value(&self) -> Option<u32> {
        self.limit
    }

    pub fn offset_value(&self) -> u32 {
        self.offset
    }

    /// Resolves the marker column reference for the query's current shape.
    ///
    /// Joined queries must qualify the column by table to avoid ambiguity;
    /// the join list is inspected on every call rather than captured when
    /// the query was built.
    pub fn archived_at_ref(&self) -> String {
        if self.joins.is_empty() {
            self.archived_at_column.to_string()
        } else {
            format!("{}.{}", self.table, self.archived_at_column)
        }
    }

    /// Renders accumulated join clauses, space-separated, or an empty
    /// string for unjoined queries.
    pub fn join_sql(&self) -> String {
        if self.joins.is_empty() {
            String::new()
        } else {
            format!(" {}", self.joins.join(" "))
        }
    }

    /// Renders the WHERE clause and its positional binds.
    ///
    /// The marker predicate (when visibility keeps one) always renders
    /// first; caller conditions follow in insertion order.
    pub fn where_sql(&self) -> (String, Vec<Value>) {
        let mut sql = String::from(" WHERE 1 = 1");
        let mut binds: Vec<Value> = Vec::new();

        if let Some(predicate) = self.filter.predicate_sql(&self.archived_at_ref()) {
            sql.push_str(" AND ");
            sql.push_str(&predicate);
        }

        for (fragment, value) in &self.conditions {
            sql.push_str(" AND ");
            sql.push_str(fragment);
            binds.push(value.clone());
        }

        (sql, binds)
    }
}

#![allow(dead_code)]

//! Shared fixture: a `Ticket` record persisted in an in-memory database,
//! plus a `ticket_labels` side table for joined-query coverage.

use archivable_core::{
    ensure_record_schema, open_db_in_memory, read_record_id, ArchiveRecord, ColumnSpec,
    EpochMillis, RecordId, SqlRecord, StoreResult,
};
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: RecordId,
    pub subject: String,
    pub status: String,
    pub archived_at: Option<EpochMillis>,
}

impl Ticket {
    pub fn new(subject: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: subject.to_string(),
            status: "open".to_string(),
            archived_at: None,
        }
    }

    pub fn with_status(subject: &str, status: &str) -> Self {
        Self {
            status: status.to_string(),
            ..Self::new(subject)
        }
    }
}

impl ArchiveRecord for Ticket {
    fn table() -> &'static str {
        "tickets"
    }

    fn archived_at(&self) -> Option<EpochMillis> {
        self.archived_at
    }

    fn set_archived_at(&mut self, archived_at: Option<EpochMillis>) {
        self.archived_at = archived_at;
    }
}

impl SqlRecord for Ticket {
    fn id(&self) -> RecordId {
        self.id
    }

    fn columns() -> &'static [ColumnSpec] {
        &[
            ColumnSpec {
                name: "id",
                sql_type: "TEXT PRIMARY KEY NOT NULL",
            },
            ColumnSpec {
                name: "subject",
                sql_type: "TEXT NOT NULL",
            },
            ColumnSpec {
                name: "status",
                sql_type: "TEXT NOT NULL",
            },
            ColumnSpec {
                name: "archived_at",
                sql_type: "INTEGER",
            },
        ]
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.to_string()),
            Value::Text(self.subject.clone()),
            Value::Text(self.status.clone()),
            self.archived_at.map_or(Value::Null, Value::Integer),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            id: read_record_id(row, "id")?,
            subject: row.get("subject")?,
            status: row.get("status")?,
            archived_at: row.get("archived_at")?,
        })
    }
}

/// Opens an in-memory database with the ticket schema and the label side
/// table applied.
pub fn setup_conn() -> Connection {
    let conn = open_db_in_memory().unwrap();
    ensure_record_schema::<Ticket>(&conn).unwrap();
    conn.execute_batch(
        "CREATE TABLE ticket_labels (
            ticket_id TEXT NOT NULL,
            label TEXT NOT NULL
        );",
    )
    .unwrap();
    conn
}

pub fn add_label(conn: &Connection, ticket_id: RecordId, label: &str) {
    conn.execute(
        "INSERT INTO ticket_labels (ticket_id, label) VALUES (?1, ?2);",
        params![ticket_id.to_string(), label],
    )
    .unwrap();
}

pub const LABEL_JOIN: &str = "INNER JOIN ticket_labels tl ON tl.ticket_id = tickets.id";

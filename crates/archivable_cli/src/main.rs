//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `archivable_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use archivable_core::{
    ensure_record_schema, open_db_in_memory, read_record_id, ArchiveRecord, ArchiveStore,
    Archiver, ColumnSpec, EpochMillis, FixedClock, RecordId, RecordQuery, SqlRecord, SqliteStore,
    StoreResult,
};
use rusqlite::types::Value;
use rusqlite::Row;
use uuid::Uuid;

const DEMO_RECORD_ID: &str = "00000000-0000-4000-8000-000000000001";
const DEMO_STAMP: EpochMillis = 1_700_000_000_000;

struct Memo {
    id: RecordId,
    body: String,
    archived_at: Option<EpochMillis>,
}

impl ArchiveRecord for Memo {
    fn table() -> &'static str {
        "memos"
    }

    fn archived_at(&self) -> Option<EpochMillis> {
        self.archived_at
    }

    fn set_archived_at(&mut self, archived_at: Option<EpochMillis>) {
        self.archived_at = archived_at;
    }
}

impl SqlRecord for Memo {
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
                name: "body",
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
            Value::Text(self.body.clone()),
            self.archived_at.map_or(Value::Null, Value::Integer),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            id: read_record_id(row, "id")?,
            body: row.get("body")?,
            archived_at: row.get("archived_at")?,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("archivable_core version={}", archivable_core::core_version());

    let conn = open_db_in_memory()?;
    ensure_record_schema::<Memo>(&conn)?;
    let store = SqliteStore::<Memo>::try_new(&conn)?;

    let mut memo = Memo {
        id: Uuid::parse_str(DEMO_RECORD_ID)?,
        body: "quarterly planning notes".to_string(),
        archived_at: None,
    };
    store.insert(&memo)?;

    let archiver = Archiver::new(store, FixedClock(DEMO_STAMP));
    archiver.archive(&mut memo)?;
    println!(
        "archived memo={} archived_at={}",
        memo.id,
        memo.archived_at.unwrap_or(0)
    );
    println!(
        "default_visible={} only_archived={}",
        archiver.store().list(&RecordQuery::of::<Memo>())?.len(),
        archiver
            .store()
            .list(&RecordQuery::of::<Memo>().only_archived())?
            .len()
    );

    archiver.unarchive(&mut memo)?;
    println!(
        "restored memo={} default_visible={}",
        memo.id,
        archiver.store().list(&RecordQuery::of::<Memo>())?.len()
    );

    Ok(())
}

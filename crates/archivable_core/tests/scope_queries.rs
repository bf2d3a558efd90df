mod common;

use archivable_core::{
    ArchiveFilter, ArchiveStore, ArchiveVisibility, Archiver, FixedClock, RecordQuery, SqliteStore,
};
use common::{Ticket, LABEL_JOIN};
use rusqlite::types::Value;
use std::collections::HashSet;
use uuid::Uuid;

fn ids(tickets: &[Ticket]) -> HashSet<Uuid> {
    tickets.iter().map(|ticket| ticket.id).collect()
}

#[test]
fn default_query_excludes_archived_rows() {
    let conn = common::setup_conn();
    let store = SqliteStore::<Ticket>::try_new(&conn).unwrap();

    let active = Ticket::new("active");
    let mut archived = Ticket::new("archived later");
    store.insert(&active).unwrap();
    store.insert(&archived).unwrap();

    let archiver = Archiver::new(store, FixedClock(10));
    archiver.archive(&mut archived).unwrap();

    let visible = archiver
        .store()
        .list(&RecordQuery::of::<Ticket>())
        .unwrap();
    assert_eq!(ids(&visible), HashSet::from([active.id]));
}

#[test]
fn with_archived_is_the_disjoint_union_of_default_and_only_archived() {
    let conn = common::setup_conn();
    let store = SqliteStore::<Ticket>::try_new(&conn).unwrap();

    let active_a = Ticket::new("a");
    let active_b = Ticket::new("b");
    let mut archived_c = Ticket::new("c");
    store.insert(&active_a).unwrap();
    store.insert(&active_b).unwrap();
    store.insert(&archived_c).unwrap();

    let archiver = Archiver::new(store, FixedClock(10));
    archiver.archive(&mut archived_c).unwrap();
    let store = archiver.store();

    let default_ids = ids(&store.list(&RecordQuery::of::<Ticket>()).unwrap());
    let only_ids = ids(&store
        .list(&RecordQuery::of::<Ticket>().only_archived())
        .unwrap());
    let all_ids = ids(&store
        .list(&RecordQuery::of::<Ticket>().with_archived())
        .unwrap());

    assert_eq!(default_ids, HashSet::from([active_a.id, active_b.id]));
    assert_eq!(only_ids, HashSet::from([archived_c.id]));
    assert!(default_ids.is_disjoint(&only_ids));
    assert_eq!(
        all_ids,
        default_ids.union(&only_ids).copied().collect::<HashSet<_>>()
    );
}

#[test]
fn get_honors_filter_visibility() {
    let conn = common::setup_conn();
    let store = SqliteStore::<Ticket>::try_new(&conn).unwrap();

    let active = Ticket::new("active");
    let mut archived = Ticket::new("archived");
    store.insert(&active).unwrap();
    store.insert(&archived).unwrap();

    let archiver = Archiver::new(store, FixedClock(10));
    archiver.archive(&mut archived).unwrap();
    let store = archiver.store();

    assert!(store.get(archived.id, ArchiveFilter::new()).unwrap().is_none());
    assert!(store
        .get(archived.id, ArchiveFilter::new().with_archived())
        .unwrap()
        .is_some());
    assert!(store
        .get(archived.id, ArchiveFilter::new().only_archived())
        .unwrap()
        .is_some());

    assert!(store.get(active.id, ArchiveFilter::new()).unwrap().is_some());
    assert!(store
        .get(active.id, ArchiveFilter::new().only_archived())
        .unwrap()
        .is_none());
}

#[test]
fn joined_query_resolves_marker_column_qualified() {
    let conn = common::setup_conn();
    let store = SqliteStore::<Ticket>::try_new(&conn).unwrap();

    let labeled_active = Ticket::new("labeled active");
    let mut labeled_archived = Ticket::new("labeled archived");
    let unlabeled = Ticket::new("unlabeled");
    store.insert(&labeled_active).unwrap();
    store.insert(&labeled_archived).unwrap();
    store.insert(&unlabeled).unwrap();

    common::add_label(&conn, labeled_active.id, "billing");
    common::add_label(&conn, labeled_archived.id, "billing");

    let archiver = Archiver::new(store, FixedClock(10));
    archiver.archive(&mut labeled_archived).unwrap();
    let store = archiver.store();

    // Both `tickets` and `ticket_labels` are in scope; the marker predicate
    // must come out table-qualified for the statement to be unambiguous.
    let billing = RecordQuery::of::<Ticket>()
        .join(LABEL_JOIN)
        .where_eq("tl.label", Value::Text("billing".to_string()));
    assert_eq!(billing.archived_at_ref(), "tickets.archived_at");

    let visible = store.list(&billing).unwrap();
    assert_eq!(ids(&visible), HashSet::from([labeled_active.id]));

    let everything = store.list(&billing.clone().with_archived()).unwrap();
    assert_eq!(
        ids(&everything),
        HashSet::from([labeled_active.id, labeled_archived.id])
    );

    // The unjoined equivalent stays unqualified.
    assert_eq!(
        RecordQuery::of::<Ticket>().archived_at_ref(),
        "archived_at"
    );
}

#[test]
fn caller_conditions_compose_with_the_default_predicate() {
    let conn = common::setup_conn();
    let store = SqliteStore::<Ticket>::try_new(&conn).unwrap();

    let open = Ticket::new("open one");
    let closed = Ticket::with_status("closed one", "closed");
    let mut archived_open = Ticket::new("archived open");
    store.insert(&open).unwrap();
    store.insert(&closed).unwrap();
    store.insert(&archived_open).unwrap();

    let archiver = Archiver::new(store, FixedClock(10));
    archiver.archive(&mut archived_open).unwrap();

    let open_only = archiver
        .store()
        .list(
            &RecordQuery::of::<Ticket>()
                .where_eq("status", Value::Text("open".to_string())),
        )
        .unwrap();
    assert_eq!(ids(&open_only), HashSet::from([open.id]));
}

#[test]
fn list_pagination_is_stable_by_id() {
    let conn = common::setup_conn();
    let store = SqliteStore::<Ticket>::try_new(&conn).unwrap();

    for subject in ["a", "b", "c"] {
        store.insert(&Ticket::new(subject)).unwrap();
    }

    let all = store
        .list(&RecordQuery::of::<Ticket>())
        .unwrap();
    let page = store
        .list(&RecordQuery::of::<Ticket>().limit(2).offset(1))
        .unwrap();

    assert_eq!(all.len(), 3);
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, all[1].id);
    assert_eq!(page[1].id, all[2].id);
}

#[test]
fn visibility_serializes_with_stable_names() {
    assert_eq!(
        serde_json::to_string(&ArchiveVisibility::ActiveOnly).unwrap(),
        "\"active_only\""
    );
    assert_eq!(
        serde_json::to_string(&ArchiveVisibility::OnlyArchived).unwrap(),
        "\"only_archived\""
    );
    assert_eq!(
        serde_json::from_str::<ArchiveVisibility>("\"with_archived\"").unwrap(),
        ArchiveVisibility::WithArchived
    );
}

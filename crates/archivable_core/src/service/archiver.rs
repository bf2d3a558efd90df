//! Single-record archive/unarchive transitions.
//!
//! # Responsibility
//! - Run the pre-event, mutation, persistence, post-event sequence for one
//!   record at a time.
//! - Delegate bulk transitions to the store with one clock reading.
//!
//! # Invariants
//! - A vetoed pre-event leaves the record and the store untouched.
//! - Post-events fire only after successful persistence; a failed save
//!   propagates its error and fires nothing.
//! - Redundant transitions are not guarded: archiving an archived record
//!   restamps the marker and fires the full event sequence.

use crate::clock::Clock;
use crate::events::{ArchiveHooks, HookDecision};
use crate::model::record::ArchiveRecord;
use crate::scope::query::RecordQuery;
use crate::store::{ArchiveStore, StoreResult};
use log::{debug, info};

/// How a single-record transition ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// Marker mutated and persisted; post-event fired.
    Committed,
    /// A pre-event listener halted the transition; nothing changed.
    Vetoed,
}

impl ArchiveOutcome {
    pub fn is_committed(self) -> bool {
        self == Self::Committed
    }
}

/// Composed archive helper for one record type.
///
/// Owns the lifecycle listener registry, the timestamp source and the store
/// handle. Replaces boot-time mixin installation: constructing an `Archiver`
/// is the whole setup.
pub struct Archiver<R, S, C>
where
    R: ArchiveRecord,
    S: ArchiveStore<R>,
    C: Clock,
{
    store: S,
    clock: C,
    hooks: ArchiveHooks<R>,
}

impl<R, S, C> Archiver<R, S, C>
where
    R: ArchiveRecord,
    S: ArchiveStore<R>,
    C: Clock,
{
    /// Creates an archiver with an empty listener registry.
    pub fn new(store: S, clock: C) -> Self {
        Self::with_hooks(store, clock, ArchiveHooks::new())
    }

    /// Creates an archiver with a pre-populated listener registry.
    pub fn with_hooks(store: S, clock: C, hooks: ArchiveHooks<R>) -> Self {
        Self {
            store,
            clock,
            hooks,
        }
    }

    /// Listener registry, for registration after construction.
    pub fn hooks_mut(&mut self) -> &mut ArchiveHooks<R> {
        &mut self.hooks
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Archives one persisted record.
    ///
    /// Fires the cancellable archiving pre-event; on veto returns
    /// `Vetoed` without mutating or persisting anything. Otherwise stamps
    /// the marker with one clock reading, saves, and fires the archived
    /// post-event only after the save succeeded.
    ///
    /// # Errors
    /// Store failures propagate unchanged; the post-event does not fire.
    pub fn archive(&self, record: &mut R) -> StoreResult<ArchiveOutcome> {
        if self.hooks.fire_archiving(record) == HookDecision::Halt {
            debug!(
                "event=archive module=service table={} status=vetoed",
                R::table()
            );
            return Ok(ArchiveOutcome::Vetoed);
        }

        let stamped_at = self.clock.now();
        record.set_archived_at(Some(stamped_at));
        self.store.save(record)?;
        self.hooks.fire_archived(record);

        info!(
            "event=archive module=service table={} status=ok archived_at={stamped_at}",
            R::table()
        );
        Ok(ArchiveOutcome::Committed)
    }

    /// Restores one archived record; symmetric to [`Archiver::archive`].
    pub fn unarchive(&self, record: &mut R) -> StoreResult<ArchiveOutcome> {
        if self.hooks.fire_unarchiving(record) == HookDecision::Halt {
            debug!(
                "event=unarchive module=service table={} status=vetoed",
                R::table()
            );
            return Ok(ArchiveOutcome::Vetoed);
        }

        record.set_archived_at(None);
        self.store.save(record)?;
        self.hooks.fire_unarchived(record);

        info!(
            "event=unarchive module=service table={} status=ok",
            R::table()
        );
        Ok(ArchiveOutcome::Committed)
    }

    /// Bulk-archives every row matched by the query.
    ///
    /// Reads the clock once so all matched rows share one stamp. Set-based:
    /// per-record lifecycle listeners do not fire.
    pub fn archive_matched(&self, query: &RecordQuery) -> StoreResult<usize> {
        self.store.archive_matched(query, self.clock.now())
    }

    /// Bulk-unarchives every row matched by the query after forcing
    /// archived-row visibility. Set-based: per-record lifecycle listeners
    /// do not fire.
    pub fn unarchive_matched(&self, query: &RecordQuery) -> StoreResult<usize> {
        self.store.unarchive_matched(query)
    }
}

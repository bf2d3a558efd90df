//! Typed lifecycle event registry for archive transitions.
//!
//! # Responsibility
//! - Hold per-record-type listener lists for the four archive lifecycle
//!   events.
//! - Fire cancellable pre-events and non-cancellable post-events in
//!   registration order.
//!
//! # Invariants
//! - Pre-event listeners run before any marker mutation; the first `Halt`
//!   short-circuits the transition.
//! - Post-event return values do not exist; listeners cannot veto after
//!   persistence.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Enumerated archive lifecycle events.
///
/// Replaces string-keyed event names: all four events are statically known,
/// so no runtime event-name registration is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveEvent {
    /// Cancellable, fired before the archive transition mutates anything.
    Archiving,
    /// Fired after a successfully persisted archive transition.
    Archived,
    /// Cancellable, fired before the unarchive transition mutates anything.
    Unarchiving,
    /// Fired after a successfully persisted unarchive transition.
    Unarchived,
}

impl ArchiveEvent {
    /// Stable name used in structured log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Archiving => "archiving",
            Self::Archived => "archived",
            Self::Unarchiving => "unarchiving",
            Self::Unarchived => "unarchived",
        }
    }
}

/// Verdict returned by cancellable pre-event listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookDecision {
    /// Continue the transition.
    Proceed,
    /// Abort the transition before any mutation or persistence.
    Halt,
}

/// Listener for cancellable pre-events.
pub type PreHook<R> = Arc<dyn Fn(&R) -> HookDecision + Send + Sync>;

/// Listener for non-cancellable post-events.
pub type PostHook<R> = Arc<dyn Fn(&R) + Send + Sync>;

/// Lifecycle listener registry for one archivable record type.
///
/// Listeners may perform arbitrary side effects. The registry guarantees
/// only ordering (pre-event, mutation, persistence, post-event) and the
/// cancellation short-circuit.
pub struct ArchiveHooks<R> {
    archiving: Vec<PreHook<R>>,
    archived: Vec<PostHook<R>>,
    unarchiving: Vec<PreHook<R>>,
    unarchived: Vec<PostHook<R>>,
}

impl<R> Default for ArchiveHooks<R> {
    fn default() -> Self {
        Self {
            archiving: Vec::new(),
            archived: Vec::new(),
            unarchiving: Vec::new(),
            unarchived: Vec::new(),
        }
    }
}

impl<R> ArchiveHooks<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a cancellable listener for the archiving pre-event.
    pub fn archiving(&mut self, listener: impl Fn(&R) -> HookDecision + Send + Sync + 'static) {
        self.archiving.push(Arc::new(listener));
    }

    /// Registers a listener for the archived post-event.
    pub fn archived(&mut self, listener: impl Fn(&R) + Send + Sync + 'static) {
        self.archived.push(Arc::new(listener));
    }

    /// Registers a cancellable listener for the unarchiving pre-event.
    pub fn unarchiving(&mut self, listener: impl Fn(&R) -> HookDecision + Send + Sync + 'static) {
        self.unarchiving.push(Arc::new(listener));
    }

    /// Registers a listener for the unarchived post-event.
    pub fn unarchived(&mut self, listener: impl Fn(&R) + Send + Sync + 'static) {
        self.unarchived.push(Arc::new(listener));
    }

    /// Returns how many listeners are registered for one event.
    pub fn listener_count(&self, event: ArchiveEvent) -> usize {
        match event {
            ArchiveEvent::Archiving => self.archiving.len(),
            ArchiveEvent::Archived => self.archived.len(),
            ArchiveEvent::Unarchiving => self.unarchiving.len(),
            ArchiveEvent::Unarchived => self.unarchived.len(),
        }
    }

    /// Fires the archiving pre-event; stops at the first `Halt`.
    pub fn fire_archiving(&self, record: &R) -> HookDecision {
        Self::fire_cancellable(&self.archiving, record)
    }

    /// Fires the archived post-event for every listener.
    pub fn fire_archived(&self, record: &R) {
        Self::fire_notify(&self.archived, record);
    }

    /// Fires the unarchiving pre-event; stops at the first `Halt`.
    pub fn fire_unarchiving(&self, record: &R) -> HookDecision {
        Self::fire_cancellable(&self.unarchiving, record)
    }

    /// Fires the unarchived post-event for every listener.
    pub fn fire_unarchived(&self, record: &R) {
        Self::fire_notify(&self.unarchived, record);
    }

    fn fire_cancellable(listeners: &[PreHook<R>], record: &R) -> HookDecision {
        for listener in listeners {
            if listener(record) == HookDecision::Halt {
                return HookDecision::Halt;
            }
        }
        HookDecision::Proceed
    }

    fn fire_notify(listeners: &[PostHook<R>], record: &R) {
        for listener in listeners {
            listener(record);
        }
    }
}

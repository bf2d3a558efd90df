//! Timestamp source used by archive transitions.
//!
//! # Responsibility
//! - Provide the single wall-clock reading stamped into archived markers.
//!
//! # Invariants
//! - Each transition reads the clock exactly once; bulk transitions stamp
//!   one value across every matched row.

use crate::model::record::EpochMillis;
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock provider for archive transitions.
pub trait Clock {
    /// Current instant in epoch milliseconds.
    fn now(&self) -> EpochMillis;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> EpochMillis {
        // Pre-epoch system clocks clamp to 0 rather than panicking.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as EpochMillis)
    }
}

/// Fixed clock for deterministic tests and demos.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub EpochMillis);

impl Clock for FixedClock {
    fn now(&self) -> EpochMillis {
        self.0
    }
}

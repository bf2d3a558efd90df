//! Record contracts for soft-archivable domain data.
//!
//! # Responsibility
//! - Define the archived-marker contract every archivable record implements.
//! - Keep archive state derivable from one nullable timestamp field.
//!
//! # Invariants
//! - A record is archived if and only if its marker is non-null.
//! - Only archive/unarchive transitions mutate the marker.

pub mod record;

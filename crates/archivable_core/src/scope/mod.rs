//! Default archive filtering and query predicate assembly.
//!
//! # Responsibility
//! - Apply the exclude-archived predicate to every query unless explicitly
//!   bypassed or inverted.
//! - Resolve the archived-marker column reference per query, qualified by
//!   table when joins are present.
//!
//! # Invariants
//! - A query carries exactly one visibility; re-applying a transform cannot
//!   stack duplicate marker predicates.
//! - The marker predicate is rendered before caller conditions.
//! - Join-awareness is read from the query's current join list at render
//!   time, never cached.

pub mod filter;
pub mod query;

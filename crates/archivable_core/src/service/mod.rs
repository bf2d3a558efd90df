//! Archive transition services.
//!
//! # Responsibility
//! - Orchestrate lifecycle events, marker mutation and persistence into
//!   use-case level archive/unarchive APIs.
//! - Keep callers decoupled from store and clock implementations.

pub mod archiver;

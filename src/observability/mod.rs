//! Observability for load sessions.
//!
//! # Principles
//!
//! 1. Observability is read-only: no side effects on loading
//! 2. Deterministic output (sorted keys, stable event names)
//! 3. Synchronous, no background threads

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

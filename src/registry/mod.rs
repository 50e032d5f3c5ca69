//! Reference Registry subsystem.
//!
//! Integration definitions reference each other by identifier and load in
//! unpredictable order, so references are never resolved eagerly: they are
//! recorded against the load session and bound in one finalization pass
//! after every entity has been registered.
//!
//! # Design Principles
//!
//! - One registry per load session, passed by handle, never ambient
//! - Registration order is irrelevant: forward and backward references
//!   resolve identically
//! - Finalization runs at most once and reports every broken reference,
//!   not just the first
//! - No partially-resolved graph ever escapes the session

mod errors;
mod reference;
mod session;

pub use errors::{BrokenReason, BrokenReference, RegistryError, RegistryResult};
pub use reference::{EntityId, Reference};
pub use session::{EntityGraph, LoadSession};

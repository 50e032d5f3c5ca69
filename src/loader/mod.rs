//! Load Coordinator subsystem.
//!
//! Drives the two-phase protocol over a batch of definition sources:
//! construct-and-register everything, then finalize the session's
//! references. A load returns either a complete, fully-resolved graph or
//! one aggregate failure; nothing in between.

mod coordinator;
mod errors;
mod source;

pub use coordinator::{load, ValidationMode};
pub use errors::{ConstructionFailure, FailureCause, LoadError, LoadResult};
pub use source::{DefinitionKind, DefinitionSource};

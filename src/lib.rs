//! linehaul - validated, immutable domain-model loading for carrier and
//! order-source integrations
//!
//! Third parties describe integrations as plain JSON definitions. This
//! crate turns one batch of those definitions into a validated,
//! immutable, fully cross-referenced entity graph:
//!
//! 1. every definition is checked against its entity type's schema,
//! 2. entities are built immutably and registered by identifier,
//! 3. a single finalization pass resolves every identifier reference,
//!    regardless of the order definitions arrived in.
//!
//! Any failure along the way fails the whole load with one aggregate,
//! structured error; a partially-built graph is never observable.

pub mod entity;
pub mod loader;
pub mod observability;
pub mod registry;
pub mod schema;

//! Type-level entity metadata.
//!
//! Every entity type carries a human-readable label (used in error
//! messages) and the schema its raw definitions are validated against.
//! Both live on the type, never on instances: serializing or iterating an
//! entity can never leak them.

use std::fmt;

use crate::schema::ObjectSchema;

/// Discriminant for the entity kinds a load session can register.
///
/// Embedded sub-entities (addresses, identifier maps, notes) are owned by
/// their parent and have no kind of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    DeliveryService,
    PickupService,
    CarrierApp,
    OrderApp,
}

impl EntityKind {
    /// Returns the label used in error messages and logs.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::DeliveryService => "delivery service",
            EntityKind::PickupService => "pickup service",
            EntityKind::CarrierApp => "carrier app",
            EntityKind::OrderApp => "order app",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The contract an entity type supplies to participate in loading.
pub trait EntityType {
    /// Human-readable type name for error messages.
    const LABEL: &'static str;

    /// The rule tree raw definitions of this type are validated against.
    fn schema() -> ObjectSchema;
}

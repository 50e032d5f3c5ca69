//! Immutable domain entities built from validated definitions.
//!
//! Every entity type here follows the same construction discipline:
//! a fallible builder (`from_pojo`) copies and normalizes fields from a
//! definition value, absent optional strings become empty strings, absent
//! structured fields become empty containers, and the finished value
//! exposes accessors only. No setters exist, so an entity cannot change
//! after construction.
//!
//! Type metadata (label and schema) lives on the `EntityType` trait, not
//! on instances: serializing an entity yields its declared fields and
//! nothing else.

mod address;
mod app;
mod identifiers;
mod metadata;
mod note;
mod pojo;
mod service;

pub use address::Address;
pub use app::{BuildError, CarrierApp, OrderApp};
pub use identifiers::Identifiers;
pub use metadata::{EntityKind, EntityType};
pub use note::{Note, NoteType};
pub use service::{DeliveryService, PickupService};

use serde::Serialize;

use crate::schema::StringRule;

/// The identifier rule shared by every registrable entity: an opaque,
/// author-supplied join key.
pub(crate) fn id_rule() -> StringRule {
    StringRule::new().trimmed().single_line().non_empty().max(100)
}

/// A registered entity in a load session's arena.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Entity {
    DeliveryService(DeliveryService),
    PickupService(PickupService),
    CarrierApp(CarrierApp),
    OrderApp(OrderApp),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::DeliveryService(_) => EntityKind::DeliveryService,
            Entity::PickupService(_) => EntityKind::PickupService,
            Entity::CarrierApp(_) => EntityKind::CarrierApp,
            Entity::OrderApp(_) => EntityKind::OrderApp,
        }
    }

    /// The identifier this entity registers under.
    pub fn identifier(&self) -> &str {
        match self {
            Entity::DeliveryService(service) => service.id(),
            Entity::PickupService(service) => service.id(),
            Entity::CarrierApp(app) => app.id(),
            Entity::OrderApp(app) => app.id(),
        }
    }

    pub fn as_delivery_service(&self) -> Option<&DeliveryService> {
        match self {
            Entity::DeliveryService(service) => Some(service),
            _ => None,
        }
    }

    pub fn as_pickup_service(&self) -> Option<&PickupService> {
        match self {
            Entity::PickupService(service) => Some(service),
            _ => None,
        }
    }

    pub fn as_carrier_app(&self) -> Option<&CarrierApp> {
        match self {
            Entity::CarrierApp(app) => Some(app),
            _ => None,
        }
    }

    pub fn as_order_app(&self) -> Option<&OrderApp> {
        match self {
            Entity::OrderApp(app) => Some(app),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_kind_and_identifier() {
        let raw = json!({ "id": "svc-1", "name": "Ground" });
        let entity = Entity::DeliveryService(DeliveryService::from_pojo(&raw).unwrap());

        assert_eq!(entity.kind(), EntityKind::DeliveryService);
        assert_eq!(entity.identifier(), "svc-1");
        assert!(entity.as_delivery_service().is_some());
        assert!(entity.as_order_app().is_none());
    }

    #[test]
    fn test_entity_serializes_untagged() {
        let raw = json!({ "id": "svc-1", "name": "Ground" });
        let entity = Entity::DeliveryService(DeliveryService::from_pojo(&raw).unwrap());

        let serialized = serde_json::to_value(&entity).unwrap();
        assert_eq!(serialized["id"], "svc-1");
        // No discriminant key, no metadata key.
        assert!(serialized.get("DeliveryService").is_none());
    }
}

//! Pickup and delivery service definitions.
//!
//! Services are registrable entities: apps point at them by identifier,
//! so their `id` is the join key the registry indexes.

use serde::Serialize;
use serde_json::Value;

use crate::entity::address::Address;
use crate::entity::id_rule;
use crate::entity::identifiers::Identifiers;
use crate::entity::metadata::EntityType;
use crate::entity::note::{self, Note};
use crate::entity::pojo::Pojo;
use crate::schema::{FieldRule, ObjectSchema, Rule, StringRule, ValidationResult};

fn service_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field("id", FieldRule::required(id_rule()))
        .field(
            "code",
            FieldRule::optional(StringRule::new().trimmed().single_line().max(50)),
        )
        .field(
            "name",
            FieldRule::required(StringRule::new().trimmed().single_line().non_empty().max(100)),
        )
        .field(
            "description",
            FieldRule::optional(StringRule::new().trimmed().max(1000)),
        )
        .field("identifiers", FieldRule::optional(Identifiers::rule()))
        .field("notes", FieldRule::optional(note::rule()))
}

/// A carrier's delivery service (e.g. ground, overnight).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryService {
    id: String,
    code: String,
    name: String,
    description: String,
    identifiers: Identifiers,
    notes: Vec<Note>,
    #[serde(skip_serializing_if = "Option::is_none")]
    origin_address: Option<Address>,
}

impl EntityType for DeliveryService {
    const LABEL: &'static str = "delivery service";

    fn schema() -> ObjectSchema {
        service_schema().field(
            "originAddress",
            FieldRule::optional(Rule::object(Address::schema())),
        )
    }
}

impl DeliveryService {
    /// Builds a delivery service from a (validated or trusted) definition.
    pub fn from_pojo(value: &Value) -> ValidationResult<Self> {
        let pojo = Pojo::new(Self::LABEL, value)?;
        Ok(Self {
            id: pojo.required_str("id")?,
            code: pojo.optional_str("code")?,
            name: pojo.required_str("name")?,
            description: pojo.optional_str("description")?,
            identifiers: Identifiers::from_value(Self::LABEL, pojo.get("identifiers"))?,
            notes: note::from_value(Self::LABEL, pojo.get("notes"))?,
            origin_address: pojo
                .get("originAddress")
                .map(Address::from_pojo)
                .transpose()?,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn identifiers(&self) -> &Identifiers {
        &self.identifiers
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn origin_address(&self) -> Option<&Address> {
        self.origin_address.as_ref()
    }
}

/// A carrier's pickup service (e.g. scheduled, one-time).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupService {
    id: String,
    code: String,
    name: String,
    description: String,
    identifiers: Identifiers,
    notes: Vec<Note>,
}

impl EntityType for PickupService {
    const LABEL: &'static str = "pickup service";

    fn schema() -> ObjectSchema {
        service_schema()
    }
}

impl PickupService {
    /// Builds a pickup service from a (validated or trusted) definition.
    pub fn from_pojo(value: &Value) -> ValidationResult<Self> {
        let pojo = Pojo::new(Self::LABEL, value)?;
        Ok(Self {
            id: pojo.required_str("id")?,
            code: pojo.optional_str("code")?,
            name: pojo.required_str("name")?,
            description: pojo.optional_str("description")?,
            identifiers: Identifiers::from_value(Self::LABEL, pojo.get("identifiers"))?,
            notes: note::from_value(Self::LABEL, pojo.get("notes"))?,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn identifiers(&self) -> &Identifiers {
        &self.identifiers
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::note::NoteType;
    use crate::schema::validate;
    use serde_json::json;

    #[test]
    fn test_build_reproduces_supplied_fields() {
        let raw = json!({
            "id": "svc-1",
            "code": "GND",
            "name": "Ground",
            "description": "3-5 business days",
            "identifiers": { "scac": "ACME" },
            "notes": "cheapest option"
        });

        let service = DeliveryService::from_pojo(&raw).unwrap();
        assert_eq!(service.id(), "svc-1");
        assert_eq!(service.code(), "GND");
        assert_eq!(service.name(), "Ground");
        assert_eq!(service.description(), "3-5 business days");
        assert_eq!(service.identifiers().get("scac"), Some("ACME"));
        assert_eq!(service.notes().len(), 1);
        assert_eq!(service.notes()[0].kind(), NoteType::Uncategorized);
    }

    #[test]
    fn test_absent_optionals_default_to_empty() {
        let raw = json!({ "id": "svc-1", "name": "Ground" });
        let service = DeliveryService::from_pojo(&raw).unwrap();
        assert_eq!(service.code(), "");
        assert_eq!(service.description(), "");
        assert!(service.identifiers().is_empty());
        assert!(service.notes().is_empty());
        assert!(service.origin_address().is_none());
    }

    #[test]
    fn test_nested_address_is_built_recursively() {
        let raw = json!({
            "id": "svc-1",
            "name": "Ground",
            "originAddress": { "cityLocality": "Austin", "country": "US" }
        });
        let service = DeliveryService::from_pojo(&raw).unwrap();
        let address = service.origin_address().unwrap();
        assert_eq!(address.city_locality(), "Austin");
    }

    #[test]
    fn test_nested_address_failure_propagates() {
        let raw = json!({
            "id": "svc-1",
            "name": "Ground",
            "originAddress": { "cityLocality": "Austin" }
        });
        let err = DeliveryService::from_pojo(&raw).unwrap_err();
        assert_eq!(err.label(), "address");
        assert_eq!(err.violations()[0].field, "country");
    }

    #[test]
    fn test_schema_validates_and_normalizes() {
        let raw = json!({ "id": " svc-1 ", "name": "  Ground  " });
        let normalized =
            validate(DeliveryService::LABEL, &raw, &DeliveryService::schema()).unwrap();
        let service = DeliveryService::from_pojo(&normalized).unwrap();
        assert_eq!(service.id(), "svc-1");
        assert_eq!(service.name(), "Ground");
    }

    #[test]
    fn test_pickup_service_schema_has_no_origin_address() {
        let raw = json!({
            "id": "pick-1",
            "name": "Scheduled",
            "originAddress": { "country": "US" }
        });
        let err = validate(PickupService::LABEL, &raw, &PickupService::schema()).unwrap_err();
        assert!(err.violations()[0].field.contains("originAddress"));
    }

    #[test]
    fn test_serialization_has_no_metadata_keys() {
        let raw = json!({ "id": "svc-1", "name": "Ground" });
        let service = DeliveryService::from_pojo(&raw).unwrap();
        let serialized = serde_json::to_value(&service).unwrap();
        let keys: Vec<&String> = serialized.as_object().unwrap().keys().collect();
        for key in keys {
            assert!(!key.contains("label"), "leaked metadata key: {}", key);
            assert!(!key.contains("schema"), "leaked metadata key: {}", key);
        }
    }
}

//! Carrier and order-source app definitions.
//!
//! Apps are the entities that hold cross-references: a carrier app points
//! at the services it offers, an order app points at the delivery service
//! it ships with. All of these are recorded as deferred references against
//! the load session and bound at finalization.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::entity::id_rule;
use crate::entity::metadata::{EntityKind, EntityType};
use crate::entity::note::{self, Note};
use crate::entity::pojo::Pojo;
use crate::registry::{LoadSession, Reference, RegistryError, RegistryResult};
use crate::schema::{
    FieldRule, ObjectSchema, Rule, StringRule, ValidationError, ValidationResult, Violation,
};

/// Why building an app failed: the definition itself was bad, or the
/// load session rejected recording its references.
#[derive(Debug, Clone, Error)]
pub enum BuildError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl BuildError {
    /// Stable error code for structured reporting.
    pub fn code(&self) -> &'static str {
        match self {
            BuildError::Invalid(err) => err.code(),
            BuildError::Registry(err) => err.code(),
        }
    }
}

fn app_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field("id", FieldRule::required(id_rule()))
        .field("applicationId", FieldRule::optional(Rule::uuid()))
        .field(
            "name",
            FieldRule::required(StringRule::new().trimmed().single_line().non_empty().max(100)),
        )
        .field(
            "description",
            FieldRule::optional(StringRule::new().trimmed().max(1000)),
        )
        .field("notes", FieldRule::optional(note::rule()))
}

fn parse_application_id(
    label: &'static str,
    pojo: &Pojo<'_>,
) -> ValidationResult<Option<Uuid>> {
    let raw = match pojo.get("applicationId") {
        Some(raw) => raw,
        None => return Ok(None),
    };
    let s = raw.as_str().ok_or_else(|| {
        ValidationError::single(
            label,
            Violation::type_mismatch(
                "applicationId",
                "uuid",
                crate::schema::json_type_name(raw),
            ),
        )
    })?;
    let parsed = Uuid::parse_str(s).map_err(|_| {
        ValidationError::single(
            label,
            Violation::new("applicationId", "canonical UUID", format!("'{}'", s)),
        )
    })?;
    Ok(Some(parsed))
}

/// A shipping-carrier integration app.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierApp {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    application_id: Option<Uuid>,
    name: String,
    description: String,
    website_url: String,
    delivery_services: Vec<Reference>,
    pickup_services: Vec<Reference>,
    notes: Vec<Note>,
}

impl EntityType for CarrierApp {
    const LABEL: &'static str = "carrier app";

    fn schema() -> ObjectSchema {
        let service_id = id_rule();
        app_schema()
            .field(
                "websiteUrl",
                FieldRule::optional(StringRule::new().trimmed().single_line().max(200)),
            )
            .field(
                "deliveryServices",
                FieldRule::optional(Rule::array(service_id.clone().into())),
            )
            .field(
                "pickupServices",
                FieldRule::optional(Rule::array(service_id.into())),
            )
    }
}

impl CarrierApp {
    /// Builds a carrier app, recording one deferred reference per listed
    /// service identifier.
    pub fn from_pojo(value: &Value, session: &mut LoadSession) -> Result<Self, BuildError> {
        let pojo = Pojo::new(Self::LABEL, value)?;
        let id = pojo.required_str("id")?;

        let delivery_services = pojo
            .optional_str_list("deliveryServices")?
            .into_iter()
            .map(|target| session.resolve(&id, &target, EntityKind::DeliveryService))
            .collect::<RegistryResult<Vec<_>>>()?;
        let pickup_services = pojo
            .optional_str_list("pickupServices")?
            .into_iter()
            .map(|target| session.resolve(&id, &target, EntityKind::PickupService))
            .collect::<RegistryResult<Vec<_>>>()?;

        Ok(Self {
            application_id: parse_application_id(Self::LABEL, &pojo)?,
            name: pojo.required_str("name")?,
            description: pojo.optional_str("description")?,
            website_url: pojo.optional_str("websiteUrl")?,
            delivery_services,
            pickup_services,
            notes: note::from_value(Self::LABEL, pojo.get("notes"))?,
            id,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn application_id(&self) -> Option<Uuid> {
        self.application_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn website_url(&self) -> &str {
        &self.website_url
    }

    pub fn delivery_services(&self) -> &[Reference] {
        &self.delivery_services
    }

    pub fn pickup_services(&self) -> &[Reference] {
        &self.pickup_services
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

/// An order-source integration app.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderApp {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    application_id: Option<Uuid>,
    name: String,
    description: String,
    service_ref: Reference,
    notes: Vec<Note>,
}

impl EntityType for OrderApp {
    const LABEL: &'static str = "order app";

    fn schema() -> ObjectSchema {
        app_schema().field("serviceRef", FieldRule::required(id_rule()))
    }
}

impl OrderApp {
    /// Builds an order app with a deferred reference to its delivery
    /// service.
    pub fn from_pojo(value: &Value, session: &mut LoadSession) -> Result<Self, BuildError> {
        let pojo = Pojo::new(Self::LABEL, value)?;
        let id = pojo.required_str("id")?;
        let target = pojo.required_str("serviceRef")?;
        let service_ref = session.resolve(&id, &target, EntityKind::DeliveryService)?;

        Ok(Self {
            application_id: parse_application_id(Self::LABEL, &pojo)?,
            name: pojo.required_str("name")?,
            description: pojo.optional_str("description")?,
            service_ref,
            notes: note::from_value(Self::LABEL, pojo.get("notes"))?,
            id,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn application_id(&self) -> Option<Uuid> {
        self.application_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The app's delivery-service reference; bound once the load session
    /// finalizes.
    pub fn service_ref(&self) -> &Reference {
        &self.service_ref
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

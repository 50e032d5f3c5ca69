//! Addresses embedded in definitions.
//!
//! An address is an owned sub-entity: it is built recursively by its
//! parent's builder (including its own identifiers sub-object) and is
//! never registered in a load session on its own.

use serde::Serialize;
use serde_json::Value;

use crate::entity::identifiers::Identifiers;
use crate::entity::metadata::EntityType;
use crate::entity::pojo::Pojo;
use crate::schema::{FieldRule, ObjectSchema, Rule, StringRule, ValidationResult};

/// An immutable postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    company: String,
    address_lines: Vec<String>,
    city_locality: String,
    state_province: String,
    postal_code: String,
    country: String,
    identifiers: Identifiers,
}

impl EntityType for Address {
    const LABEL: &'static str = "address";

    fn schema() -> ObjectSchema {
        let line = StringRule::new().trimmed().single_line().max(100);
        ObjectSchema::new()
            .field("company", FieldRule::optional(line.clone()))
            .field(
                "addressLines",
                FieldRule::optional(Rule::array(line.clone().into())),
            )
            .field("cityLocality", FieldRule::optional(line.clone()))
            .field("stateProvince", FieldRule::optional(line.clone()))
            .field("postalCode", FieldRule::optional(line))
            .field(
                "country",
                FieldRule::required(
                    StringRule::new()
                        .trimmed()
                        .single_line()
                        .non_empty()
                        .min(2)
                        .max(2),
                ),
            )
            .field("identifiers", FieldRule::optional(Identifiers::rule()))
    }
}

impl Address {
    /// Builds an address from a (validated or trusted) definition value.
    pub(crate) fn from_pojo(value: &Value) -> ValidationResult<Self> {
        let pojo = Pojo::new(Self::LABEL, value)?;
        Ok(Self {
            company: pojo.optional_str("company")?,
            address_lines: pojo.optional_str_list("addressLines")?,
            city_locality: pojo.optional_str("cityLocality")?,
            state_province: pojo.optional_str("stateProvince")?,
            postal_code: pojo.optional_str("postalCode")?,
            country: pojo.required_str("country")?,
            identifiers: Identifiers::from_value(Self::LABEL, pojo.get("identifiers"))?,
        })
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn address_lines(&self) -> &[String] {
        &self.address_lines
    }

    pub fn city_locality(&self) -> &str {
        &self.city_locality
    }

    pub fn state_province(&self) -> &str {
        &self.state_province
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn identifiers(&self) -> &Identifiers {
        &self.identifiers
    }
}

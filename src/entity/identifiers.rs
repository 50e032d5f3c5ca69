//! Caller-defined custom identifier maps.
//!
//! An open string-to-string mapping attached to many entities for
//! correlation with external systems. Keys are arbitrary (bounded in
//! length), values are trimmed and length-bounded, ordering is
//! insignificant.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::schema::{json_type_name, Rule, StringRule, ValidationError, ValidationResult, Violation};

const KEY_PATTERN: &str = r"^.{1,100}$";
const VALUE_MAX: usize = 100;

/// An immutable custom-identifiers map.
///
/// Serializes as the bare map, so the round trip `{foo: "bar"}` in,
/// `{foo: "bar"}` out holds with no extra keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Identifiers {
    entries: BTreeMap<String, String>,
}

impl Identifiers {
    /// The map rule parent schemas embed for an identifiers field.
    pub(crate) fn rule() -> Rule {
        Rule::map_keyed(
            KEY_PATTERN,
            StringRule::new().trimmed().single_line().max(VALUE_MAX),
        )
    }

    /// Builds an identifiers map from a definition field.
    ///
    /// Absent reads as an empty map, not as a missing field.
    pub(crate) fn from_value(label: &'static str, value: Option<&Value>) -> ValidationResult<Self> {
        let obj = match value {
            Some(value) => match value.as_object() {
                Some(obj) => obj,
                None => {
                    return Err(ValidationError::single(
                        label,
                        Violation::type_mismatch("identifiers", "map", json_type_name(value)),
                    ))
                }
            },
            None => return Ok(Self::default()),
        };

        let mut entries = BTreeMap::new();
        for (key, entry) in obj {
            match entry.as_str() {
                Some(s) => {
                    entries.insert(key.clone(), s.to_string());
                }
                None => {
                    return Err(ValidationError::single(
                        label,
                        Violation::type_mismatch(
                            format!("identifiers.{}", key),
                            "string",
                            json_type_name(entry),
                        ),
                    ))
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_reads_as_empty() {
        let identifiers = Identifiers::from_value("test", None).unwrap();
        assert!(identifiers.is_empty());
    }

    #[test]
    fn test_entries_copied() {
        let raw = json!({ "foo": "bar", "carrier": "ACME-7" });
        let identifiers = Identifiers::from_value("test", Some(&raw)).unwrap();
        assert_eq!(identifiers.len(), 2);
        assert_eq!(identifiers.get("foo"), Some("bar"));
        assert_eq!(identifiers.get("carrier"), Some("ACME-7"));
        assert_eq!(identifiers.get("absent"), None);
    }

    #[test]
    fn test_non_string_value_rejected() {
        let raw = json!({ "foo": 7 });
        let err = Identifiers::from_value("test", Some(&raw)).unwrap_err();
        assert_eq!(err.violations()[0].field, "identifiers.foo");
    }

    #[test]
    fn test_serializes_as_bare_map() {
        let raw = json!({ "foo": "bar" });
        let identifiers = Identifiers::from_value("test", Some(&raw)).unwrap();
        let serialized = serde_json::to_value(&identifiers).unwrap();
        assert_eq!(serialized, json!({ "foo": "bar" }));
        // Exactly one enumerable key, nothing internal alongside it.
        assert_eq!(serialized.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_rule_validates_trim_and_bounds() {
        let schema = crate::schema::ObjectSchema::new().field(
            "identifiers",
            crate::schema::FieldRule::optional(Identifiers::rule()),
        );

        let raw = json!({ "identifiers": { "foo": "  bar  " } });
        let normalized = crate::schema::validate("test", &raw, &schema).unwrap();
        assert_eq!(normalized["identifiers"]["foo"], "bar");

        let long_value = "x".repeat(101);
        let raw = json!({ "identifiers": { "foo": long_value } });
        assert!(crate::schema::validate("test", &raw, &schema).is_err());
    }
}

//! Field extraction helpers shared by every entity builder.
//!
//! Builders normally run on validated, normalized data, but trust-mode
//! loads hand them raw definitions, so every accessor stays fallible and
//! reports failures in the same shape the validator does.

use serde_json::{Map, Value};

use crate::schema::{json_type_name, ValidationError, ValidationResult, Violation};

/// A borrowed view over one definition object.
pub(crate) struct Pojo<'a> {
    label: &'static str,
    obj: &'a Map<String, Value>,
}

impl<'a> Pojo<'a> {
    pub fn new(label: &'static str, value: &'a Value) -> ValidationResult<Self> {
        match value.as_object() {
            Some(obj) => Ok(Self { label, obj }),
            None => Err(ValidationError::single(
                label,
                Violation::type_mismatch("$root", "object", json_type_name(value)),
            )),
        }
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.obj.get(key).filter(|v| !v.is_null())
    }

    /// A required string field.
    pub fn required_str(&self, key: &str) -> ValidationResult<String> {
        match self.get(key) {
            Some(value) => self.as_str(key, value),
            None => Err(ValidationError::single(
                self.label,
                Violation::missing_field(key),
            )),
        }
    }

    /// An optional string field; absent reads as empty string so display
    /// code never branches on presence.
    pub fn optional_str(&self, key: &str) -> ValidationResult<String> {
        match self.get(key) {
            Some(value) => self.as_str(key, value),
            None => Ok(String::new()),
        }
    }

    /// An optional array-of-strings field; absent reads as an empty list.
    pub fn optional_str_list(&self, key: &str) -> ValidationResult<Vec<String>> {
        let items = match self.get(key) {
            Some(value) => match value.as_array() {
                Some(items) => items,
                None => {
                    return Err(ValidationError::single(
                        self.label,
                        Violation::type_mismatch(key, "array", json_type_name(value)),
                    ))
                }
            },
            None => return Ok(Vec::new()),
        };

        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            out.push(self.as_str(&format!("{}[{}]", key, i), item)?);
        }
        Ok(out)
    }

    fn as_str(&self, path: &str, value: &Value) -> ValidationResult<String> {
        match value.as_str() {
            Some(s) => Ok(s.to_string()),
            None => Err(ValidationError::single(
                self.label,
                Violation::type_mismatch(path, "string", json_type_name(value)),
            )),
        }
    }
}

//! Schema validation for raw definition data.
//!
//! Validation semantics:
//! - All required fields must be present
//! - No undeclared fields
//! - Null is never a valid field value
//! - Violations for every field are collected in one pass, not
//!   short-circuited on the first
//! - On success the returned value is normalized: strings declared
//!   `trimmed()` have surrounding whitespace removed
//!
//! Validation is a pure function over the input value: the input is never
//! mutated and the same definition validates the same way every time.

use regex::Regex;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::errors::{ValidationError, ValidationResult, Violation};
use super::types::{ObjectSchema, Rule, StringRule};

/// Validates a raw definition against an object schema.
///
/// Returns the normalized value, or a `ValidationError` carrying the
/// entity `label` and every violation found.
pub fn validate(label: &str, value: &Value, schema: &ObjectSchema) -> ValidationResult<Value> {
    let mut walker = Walker::default();

    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            return Err(ValidationError::single(
                label,
                Violation::type_mismatch("$root", "object", json_type_name(value)),
            ));
        }
    };

    let normalized = walker.check_object(obj, schema, "");

    if walker.violations.is_empty() {
        Ok(Value::Object(normalized))
    } else {
        walker.violations.sort_by(|a, b| a.field.cmp(&b.field));
        Err(ValidationError::new(label, walker.violations))
    }
}

#[derive(Default)]
struct Walker {
    violations: Vec<Violation>,
}

impl Walker {
    fn check_object(
        &mut self,
        obj: &Map<String, Value>,
        schema: &ObjectSchema,
        path_prefix: &str,
    ) -> Map<String, Value> {
        // Undeclared fields are rejected, not silently dropped.
        for key in obj.keys() {
            if !schema.contains(key) {
                self.violations
                    .push(Violation::extra_field(make_path(path_prefix, key)));
            }
        }

        let mut normalized = Map::new();
        for (field_name, field_rule) in schema.fields() {
            let field_path = make_path(path_prefix, field_name);

            match obj.get(field_name) {
                Some(Value::Null) => {
                    self.violations.push(Violation::null_value(&field_path));
                }
                Some(value) => {
                    let checked = self.check_value(value, field_rule.rule(), &field_path);
                    normalized.insert(field_name.to_string(), checked);
                }
                None => {
                    // Absent optional fields stay absent here; builders
                    // apply the type's default.
                    if field_rule.is_required() {
                        self.violations.push(Violation::missing_field(&field_path));
                    }
                }
            }
        }

        normalized
    }

    fn check_value(&mut self, value: &Value, rule: &Rule, path: &str) -> Value {
        match rule {
            Rule::String(constraints) => self.check_string(value, constraints, path),
            Rule::Integer { min } => {
                if !value.is_i64() && !value.is_u64() {
                    self.type_violation(path, "integer", value);
                } else if let (Some(min), Some(n)) = (min, value.as_i64()) {
                    if n < *min {
                        self.violations.push(Violation::new(
                            path,
                            format!("integer >= {}", min),
                            n.to_string(),
                        ));
                    }
                }
                value.clone()
            }
            Rule::Boolean => {
                if !value.is_boolean() {
                    self.type_violation(path, "boolean", value);
                }
                value.clone()
            }
            Rule::Enum { allowed } => {
                match value.as_str() {
                    Some(s) if allowed.contains(&s) => {}
                    Some(s) => self.violations.push(Violation::new(
                        path,
                        format!("one of [{}]", allowed.join(", ")),
                        format!("'{}'", s),
                    )),
                    None => self.type_violation(path, "enumeration value", value),
                }
                value.clone()
            }
            Rule::Uuid => {
                match value.as_str() {
                    Some(s) if Uuid::parse_str(s).is_ok() => {}
                    Some(s) => self.violations.push(Violation::new(
                        path,
                        "canonical UUID",
                        format!("'{}'", s),
                    )),
                    None => self.type_violation(path, "uuid", value),
                }
                value.clone()
            }
            Rule::Object(schema) => match value.as_object() {
                Some(obj) => Value::Object(self.check_object(obj, schema, path)),
                None => {
                    self.type_violation(path, "object", value);
                    value.clone()
                }
            },
            Rule::Array(element) => match value.as_array() {
                Some(items) => {
                    let mut normalized = Vec::with_capacity(items.len());
                    for (i, item) in items.iter().enumerate() {
                        let item_path = format!("{}[{}]", path, i);
                        if item.is_null() {
                            self.violations.push(Violation::null_value(&item_path));
                            normalized.push(item.clone());
                        } else {
                            normalized.push(self.check_value(item, element, &item_path));
                        }
                    }
                    Value::Array(normalized)
                }
                None => {
                    self.type_violation(path, "array", value);
                    value.clone()
                }
            },
            Rule::Map { key_pattern, value: value_rule } => {
                self.check_map(value, *key_pattern, value_rule, path)
            }
            Rule::OneOf(alternatives) => self.check_one_of(value, alternatives, path),
            Rule::Function => {
                // Presence marker only; the value is never invoked.
                value.clone()
            }
        }
    }

    fn check_string(&mut self, value: &Value, constraints: &StringRule, path: &str) -> Value {
        let raw = match value.as_str() {
            Some(s) => s,
            None => {
                self.type_violation(path, "string", value);
                return value.clone();
            }
        };

        let text = if constraints.trim { raw.trim() } else { raw };

        if constraints.single_line && text.contains(['\n', '\r']) {
            self.violations.push(Violation::new(
                path,
                "single-line string",
                "embedded line break",
            ));
        }
        if constraints.non_empty && text.is_empty() {
            self.violations
                .push(Violation::new(path, "non-empty string", "empty string"));
        }

        let length = text.chars().count();
        if let Some(min) = constraints.min {
            if length < min {
                self.violations.push(Violation::new(
                    path,
                    format!("string of at least {} character(s)", min),
                    format!("{} character(s)", length),
                ));
            }
        }
        if let Some(max) = constraints.max {
            if length > max {
                self.violations.push(Violation::new(
                    path,
                    format!("string of at most {} character(s)", max),
                    format!("{} character(s)", length),
                ));
            }
        }

        Value::String(text.to_string())
    }

    fn check_map(
        &mut self,
        value: &Value,
        key_pattern: Option<&'static str>,
        value_rule: &Rule,
        path: &str,
    ) -> Value {
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => {
                self.type_violation(path, "map", value);
                return value.clone();
            }
        };

        let pattern = match key_pattern {
            Some(pattern) => match Regex::new(pattern) {
                Ok(regex) => Some(regex),
                Err(_) => {
                    // A schema authoring bug, surfaced loudly rather than
                    // silently accepting every key.
                    self.violations.push(Violation::new(
                        path,
                        "a valid key pattern in the schema",
                        format!("unparseable pattern '{}'", pattern),
                    ));
                    None
                }
            },
            None => None,
        };

        let mut normalized = Map::new();
        for (key, entry) in obj {
            let entry_path = make_path(path, key);
            if let Some(regex) = &pattern {
                if !regex.is_match(key) {
                    self.violations.push(Violation::new(
                        &entry_path,
                        format!("key matching pattern '{}'", regex.as_str()),
                        format!("key '{}'", key),
                    ));
                }
            }
            if entry.is_null() {
                self.violations.push(Violation::null_value(&entry_path));
                normalized.insert(key.clone(), entry.clone());
            } else {
                let checked = self.check_value(entry, value_rule, &entry_path);
                normalized.insert(key.clone(), checked);
            }
        }
        Value::Object(normalized)
    }

    fn check_one_of(&mut self, value: &Value, alternatives: &[Rule], path: &str) -> Value {
        // Alternatives are tried in declaration order; the first that
        // matches cleanly wins and its normalization is kept.
        for alternative in alternatives {
            let mut trial = Walker::default();
            let normalized = trial.check_value(value, alternative, path);
            if trial.violations.is_empty() {
                return normalized;
            }
        }

        let shapes: Vec<&str> = alternatives.iter().map(Rule::type_name).collect();
        self.violations.push(Violation::new(
            path,
            format!("one of: {}", shapes.join(" | ")),
            json_type_name(value),
        ));
        value.clone()
    }

    fn type_violation(&mut self, path: &str, expected: &str, actual: &Value) {
        self.violations.push(Violation::type_mismatch(
            path,
            expected,
            json_type_name(actual),
        ));
    }
}

/// Returns the JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

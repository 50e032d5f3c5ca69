//! Declarative schema rules for definition data.
//!
//! Supported rule forms:
//! - string: UTF-8 string with trim/single-line/length constraints
//! - integer: 64-bit signed integer with optional minimum
//! - boolean
//! - enumeration: membership in a fixed set of string values
//! - uuid: string in canonical UUID form
//! - object: nested object with its own field rules
//! - array: homogeneous array with one element rule
//! - map: open object with arbitrary keys, one value rule
//! - one-of: value must satisfy one of several alternative rules
//! - function: presence marker, never invoked
//!
//! Schemas are data, not behavior: the validator interprets them, entity
//! types declare them.

use std::collections::BTreeMap;

/// Constraints on a string field.
///
/// Length constraints count characters and are applied after trimming
/// when `trimmed()` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringRule {
    pub(crate) trim: bool,
    pub(crate) single_line: bool,
    pub(crate) non_empty: bool,
    pub(crate) min: Option<usize>,
    pub(crate) max: Option<usize>,
}

impl StringRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strip leading/trailing whitespace before other checks.
    pub fn trimmed(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Reject embedded line breaks.
    pub fn single_line(mut self) -> Self {
        self.single_line = true;
        self
    }

    /// Reject the empty string.
    pub fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    /// Minimum length in characters.
    pub fn min(mut self, n: usize) -> Self {
        self.min = Some(n);
        self
    }

    /// Maximum length in characters.
    pub fn max(mut self, n: usize) -> Self {
        self.max = Some(n);
        self
    }
}

impl From<StringRule> for Rule {
    fn from(rule: StringRule) -> Self {
        Rule::String(rule)
    }
}

/// A single validation rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// UTF-8 string with constraints
    String(StringRule),
    /// 64-bit signed integer
    Integer {
        /// Inclusive minimum
        min: Option<i64>,
    },
    /// Boolean
    Boolean,
    /// String restricted to a fixed set of values
    Enum {
        /// Allowed values
        allowed: &'static [&'static str],
    },
    /// String in canonical UUID form
    Uuid,
    /// Nested object with declared fields
    Object(ObjectSchema),
    /// Homogeneous array (boxed to allow recursive rules)
    Array(Box<Rule>),
    /// Open object: arbitrary keys, one value rule.
    ///
    /// `key_pattern` is an anchored regular expression each key must match;
    /// `None` accepts any key.
    Map {
        key_pattern: Option<&'static str>,
        value: Box<Rule>,
    },
    /// Value must satisfy one of the alternatives, tried in order
    OneOf(Vec<Rule>),
    /// Presence marker for method slots; any non-null value passes
    Function,
}

impl Rule {
    /// Unconstrained string.
    pub fn string() -> Self {
        Rule::String(StringRule::new())
    }

    /// Unconstrained integer.
    pub fn integer() -> Self {
        Rule::Integer { min: None }
    }

    /// Integer with an inclusive minimum.
    pub fn integer_min(min: i64) -> Self {
        Rule::Integer { min: Some(min) }
    }

    pub fn boolean() -> Self {
        Rule::Boolean
    }

    pub fn enumeration(allowed: &'static [&'static str]) -> Self {
        Rule::Enum { allowed }
    }

    pub fn uuid() -> Self {
        Rule::Uuid
    }

    pub fn object(schema: ObjectSchema) -> Self {
        Rule::Object(schema)
    }

    pub fn array(element: Rule) -> Self {
        Rule::Array(Box::new(element))
    }

    /// Open map accepting any key.
    pub fn map(value: impl Into<Rule>) -> Self {
        Rule::Map {
            key_pattern: None,
            value: Box::new(value.into()),
        }
    }

    /// Open map whose keys must match `key_pattern`.
    pub fn map_keyed(key_pattern: &'static str, value: impl Into<Rule>) -> Self {
        Rule::Map {
            key_pattern: Some(key_pattern),
            value: Box::new(value.into()),
        }
    }

    pub fn one_of(alternatives: Vec<Rule>) -> Self {
        Rule::OneOf(alternatives)
    }

    pub fn function() -> Self {
        Rule::Function
    }

    /// Returns the rule's type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Rule::String(_) => "string",
            Rule::Integer { .. } => "integer",
            Rule::Boolean => "boolean",
            Rule::Enum { .. } => "enumeration value",
            Rule::Uuid => "uuid",
            Rule::Object(_) => "object",
            Rule::Array(_) => "array",
            Rule::Map { .. } => "map",
            Rule::OneOf(_) => "one of the allowed shapes",
            Rule::Function => "function",
        }
    }
}

/// A rule plus its presence requirement.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub(crate) rule: Rule,
    pub(crate) required: bool,
}

impl FieldRule {
    /// Field must be present.
    pub fn required(rule: impl Into<Rule>) -> Self {
        Self {
            rule: rule.into(),
            required: true,
        }
    }

    /// Field may be absent; builders apply the type's default.
    pub fn optional(rule: impl Into<Rule>) -> Self {
        Self {
            rule: rule.into(),
            required: false,
        }
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// Field rules for one object shape.
///
/// Fields are kept in a sorted map so violation reports and normalized
/// output are deterministic regardless of declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    fields: BTreeMap<String, FieldRule>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. Chainable; later declarations win.
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.fields.insert(name.into(), rule);
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_rule_builder() {
        let rule = StringRule::new().trimmed().single_line().min(1).max(100);
        assert!(rule.trim);
        assert!(rule.single_line);
        assert!(!rule.non_empty);
        assert_eq!(rule.min, Some(1));
        assert_eq!(rule.max, Some(100));
    }

    #[test]
    fn test_object_schema_declaration() {
        let schema = ObjectSchema::new()
            .field("id", FieldRule::required(Rule::string()))
            .field("name", FieldRule::required(StringRule::new().trimmed()))
            .field("age", FieldRule::optional(Rule::integer_min(0)));

        assert_eq!(schema.len(), 3);
        assert!(schema.contains("id"));
        assert!(schema.get("age").is_some());
        assert!(!schema.get("age").unwrap().is_required());
        assert!(schema.get("name").unwrap().is_required());
    }

    #[test]
    fn test_rule_type_names() {
        assert_eq!(Rule::string().type_name(), "string");
        assert_eq!(Rule::integer().type_name(), "integer");
        assert_eq!(Rule::boolean().type_name(), "boolean");
        assert_eq!(Rule::uuid().type_name(), "uuid");
        assert_eq!(Rule::object(ObjectSchema::new()).type_name(), "object");
        assert_eq!(Rule::array(Rule::string()).type_name(), "array");
        assert_eq!(Rule::map(Rule::string()).type_name(), "map");
        assert_eq!(Rule::function().type_name(), "function");
    }

    #[test]
    fn test_map_value_coerces_from_string_rule() {
        let keyed = Rule::map_keyed(r"^.{1,100}$", StringRule::new().trimmed().max(100));
        match keyed {
            Rule::Map { key_pattern, value } => {
                assert_eq!(key_pattern, Some(r"^.{1,100}$"));
                assert_eq!(value.type_name(), "string");
            }
            other => panic!("expected map rule, got {:?}", other),
        }

        let open = Rule::map(StringRule::new().non_empty());
        assert_eq!(open.type_name(), "map");
    }

    #[test]
    fn test_later_field_declaration_wins() {
        let schema = ObjectSchema::new()
            .field("code", FieldRule::required(Rule::string()))
            .field("code", FieldRule::optional(Rule::string()));

        assert_eq!(schema.len(), 1);
        assert!(!schema.get("code").unwrap().is_required());
    }
}

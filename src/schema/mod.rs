//! Schema Validator subsystem.
//!
//! Integration definitions arrive as loosely-typed JSON authored by third
//! parties. Every definition is checked against a declarative rule tree
//! before an entity is built from it.
//!
//! # Design Principles
//!
//! - Validation is pure: no mutation of the input, no side effects
//! - Violations are aggregated per definition, never short-circuited
//! - No nulls, no undeclared fields, no implicit coercion
//! - Normalization (trimming) happens here; defaulting happens in builders

mod errors;
mod types;
mod validator;

pub use errors::{ValidationError, ValidationResult, Violation};
pub use types::{FieldRule, ObjectSchema, Rule, StringRule};
pub use validator::validate;

pub(crate) use validator::json_type_name;

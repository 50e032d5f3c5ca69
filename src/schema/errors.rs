//! Validation error types for definition data.
//!
//! A failed validation never reports just the first broken field: every
//! violation found in one pass is carried in a single `ValidationError`
//! so a third party can fix a whole definition in one round.

use std::fmt;

/// A single schema rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field path (e.g., "originAddress.identifiers.po")
    pub field: String,
    /// Expected type or constraint
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl Violation {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: "field to be present".into(),
            actual: "missing".into(),
        }
    }

    pub fn extra_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: "no undeclared fields".into(),
            actual: "extra field present".into(),
        }
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(field, expected, actual)
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: "non-null value".into(),
            actual: "null".into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}': expected {}, got {}",
            self.field, self.expected, self.actual
        )
    }
}

/// One or more schema rule violations for a single definition.
///
/// Carries the entity label so batch error reports can say which kind
/// of definition was rejected.
#[derive(Debug, Clone)]
pub struct ValidationError {
    label: String,
    violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(label: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            label: label.into(),
            violations,
        }
    }

    /// Convenience constructor for a single-violation failure.
    pub fn single(label: impl Into<String>, violation: Violation) -> Self {
        Self::new(label, vec![violation])
    }

    /// Stable error code for structured reporting.
    pub fn code(&self) -> &'static str {
        "VALIDATION_FAILED"
    }

    /// The label of the entity type whose definition was rejected.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// All violations found in the definition, in field-path order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} definition invalid ({} violation{}):",
            self.code(),
            self.label,
            self.violations.len(),
            if self.violations.len() == 1 { "" } else { "s" }
        )?;
        for violation in &self.violations {
            write!(f, " {};", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

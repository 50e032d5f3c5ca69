//! Aggregate load failures.
//!
//! A load either returns a complete graph or a single structured failure:
//! every definition rejected in phase 1 is listed together, and a
//! resolution failure carries every broken reference from finalization.

use std::fmt;

use thiserror::Error;

use crate::entity::BuildError;
use crate::registry::RegistryError;
use crate::schema::ValidationError;

/// Result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Why one definition source failed during construction.
#[derive(Debug, Clone, Error)]
pub enum FailureCause {
    /// The source could not be read or parsed as JSON.
    #[error("unreadable definition: {0}")]
    Unreadable(String),
    /// Schema validation or building rejected the definition.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// Registration failed (duplicate identifier).
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl From<BuildError> for FailureCause {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::Invalid(err) => FailureCause::Invalid(err),
            BuildError::Registry(err) => FailureCause::Registry(err),
        }
    }
}

impl FailureCause {
    pub fn code(&self) -> &'static str {
        match self {
            FailureCause::Unreadable(_) => "DEFINITION_UNREADABLE",
            FailureCause::Invalid(err) => err.code(),
            FailureCause::Registry(err) => err.code(),
        }
    }
}

/// One rejected definition source.
#[derive(Debug, Clone)]
pub struct ConstructionFailure {
    /// Origin of the source (file path or `<inline>`).
    pub origin: String,
    /// Label of the entity kind the source declared.
    pub label: &'static str,
    /// What went wrong.
    pub cause: FailureCause,
}

impl fmt::Display for ConstructionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.origin, self.label, self.cause)
    }
}

/// A failed load session.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// Phase 1 rejected one or more definitions; nothing was loaded.
    #[error("load failed: {} definition(s) rejected: {}", .failures.len(), summarize(.failures))]
    Construction { failures: Vec<ConstructionFailure> },

    /// Phase 2 could not resolve every reference; nothing was loaded.
    #[error("load failed: {0}")]
    Resolution(#[from] RegistryError),
}

impl LoadError {
    /// Stable error code for structured reporting.
    pub fn code(&self) -> &'static str {
        match self {
            LoadError::Construction { .. } => "LOAD_CONSTRUCTION_FAILED",
            LoadError::Resolution(err) => err.code(),
        }
    }

    /// Construction failures, if any.
    pub fn failures(&self) -> &[ConstructionFailure] {
        match self {
            LoadError::Construction { failures } => failures,
            LoadError::Resolution(_) => &[],
        }
    }
}

fn summarize(failures: &[ConstructionFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

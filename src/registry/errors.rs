//! Registry error types.
//!
//! Duplicate identifiers and unresolved references are fatal to a load;
//! immutability violations are programming errors in calling code, not
//! bad input data.

use std::fmt;

use thiserror::Error;

use crate::entity::EntityKind;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors raised by a load session's reference registry.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// Two entities in the same load session share an identifier.
    #[error("duplicate identifier '{identifier}': {kind} conflicts with already-registered {existing}")]
    DuplicateIdentifier {
        identifier: String,
        kind: EntityKind,
        existing: EntityKind,
    },

    /// One or more deferred references could not be resolved at
    /// finalization. Reported after the full pass, so every broken
    /// reference in the batch is listed.
    #[error("{} unresolved reference(s): {}", .broken.len(), summarize(.broken))]
    UnresolvedReference { broken: Vec<BrokenReference> },

    /// A reference was dereferenced before finalization completed.
    #[error("reference '{identifier}' is not resolved until loading finishes")]
    ReferencePending { identifier: String },

    /// The session was consumed before finalization ran.
    #[error("load session is not finalized")]
    NotFinalized,

    /// An attempt to mutate already-frozen state: binding a resolved
    /// reference again, or finalizing a session twice.
    #[error("immutability violation: {0}")]
    ImmutabilityViolation(String),
}

impl RegistryError {
    /// Stable error code for structured reporting.
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::DuplicateIdentifier { .. } => "DUPLICATE_IDENTIFIER",
            RegistryError::UnresolvedReference { .. } => "UNRESOLVED_REFERENCE",
            RegistryError::ReferencePending { .. } => "REFERENCE_PENDING",
            RegistryError::NotFinalized => "NOT_FINALIZED",
            RegistryError::ImmutabilityViolation(_) => "IMMUTABILITY_VIOLATION",
        }
    }
}

/// One reference that failed to resolve at finalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenReference {
    /// The identifier the reference points at.
    pub identifier: String,
    /// Identifier of the entity holding the reference.
    pub referrer: String,
    /// Why resolution failed.
    pub reason: BrokenReason,
}

/// Why a deferred reference failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrokenReason {
    /// The identifier was never registered in this session.
    NotRegistered,
    /// The identifier resolved to an entity of the wrong kind.
    WrongKind {
        expected: EntityKind,
        actual: EntityKind,
    },
}

impl fmt::Display for BrokenReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            BrokenReason::NotRegistered => write!(
                f,
                "'{}' referenced by '{}' (not registered)",
                self.identifier, self.referrer
            ),
            BrokenReason::WrongKind { expected, actual } => write!(
                f,
                "'{}' referenced by '{}' (expected {}, found {})",
                self.identifier, self.referrer, expected, actual
            ),
        }
    }
}

fn summarize(broken: &[BrokenReference]) -> String {
    broken
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let duplicate = RegistryError::DuplicateIdentifier {
            identifier: "x".into(),
            kind: EntityKind::OrderApp,
            existing: EntityKind::DeliveryService,
        };
        assert_eq!(duplicate.code(), "DUPLICATE_IDENTIFIER");
        assert_eq!(
            RegistryError::NotFinalized.code(),
            "NOT_FINALIZED"
        );
        assert_eq!(
            RegistryError::ImmutabilityViolation("x".into()).code(),
            "IMMUTABILITY_VIOLATION"
        );
    }

    #[test]
    fn test_unresolved_reference_lists_every_break() {
        let err = RegistryError::UnresolvedReference {
            broken: vec![
                BrokenReference {
                    identifier: "svc-missing".into(),
                    referrer: "app-1".into(),
                    reason: BrokenReason::NotRegistered,
                },
                BrokenReference {
                    identifier: "svc-1".into(),
                    referrer: "app-2".into(),
                    reason: BrokenReason::WrongKind {
                        expected: EntityKind::DeliveryService,
                        actual: EntityKind::PickupService,
                    },
                },
            ],
        };
        let display = format!("{}", err);
        assert!(display.contains("2 unresolved"));
        assert!(display.contains("svc-missing"));
        assert!(display.contains("app-1"));
        assert!(display.contains("expected delivery service, found pickup service"));
    }
}

//! Deferred entity references.
//!
//! A reference starts as a raw identifier plus an expected entity kind.
//! The binding to an arena slot is written exactly once, during the load
//! session's finalization pass; until then any dereference attempt is an
//! error. Clones share the binding slot, so the copy embedded in an
//! entity and the copy on the session's deferred list resolve together.

use std::sync::{Arc, OnceLock};

use serde::{Serialize, Serializer};

use super::errors::{RegistryError, RegistryResult};
use crate::entity::EntityKind;

/// Index of an entity in a load session's arena.
///
/// Only meaningful within the session (and the graph it becomes) that
/// issued it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct EntityId(u32);

impl EntityId {
    pub(crate) fn new(index: u32) -> Self {
        Self(index)
    }

    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
struct Slot {
    identifier: String,
    expected: EntityKind,
    target: OnceLock<EntityId>,
}

/// A lazily-resolved pointer to another entity.
#[derive(Debug, Clone)]
pub struct Reference {
    inner: Arc<Slot>,
}

impl Reference {
    pub(crate) fn new(identifier: impl Into<String>, expected: EntityKind) -> Self {
        Self {
            inner: Arc::new(Slot {
                identifier: identifier.into(),
                expected,
                target: OnceLock::new(),
            }),
        }
    }

    /// The raw identifier this reference points at.
    pub fn identifier(&self) -> &str {
        &self.inner.identifier
    }

    /// The entity kind the target must have.
    pub fn expected_kind(&self) -> EntityKind {
        self.inner.expected
    }

    /// Whether finalization has bound this reference.
    pub fn is_resolved(&self) -> bool {
        self.inner.target.get().is_some()
    }

    /// The bound arena slot.
    ///
    /// Fails with `REFERENCE_PENDING` before finalization completes.
    pub fn target(&self) -> RegistryResult<EntityId> {
        self.inner
            .target
            .get()
            .copied()
            .ok_or_else(|| RegistryError::ReferencePending {
                identifier: self.inner.identifier.clone(),
            })
    }

    /// Binds the reference to its target. Write-once: a second bind is an
    /// immutability violation.
    pub(crate) fn bind(&self, id: EntityId) -> RegistryResult<()> {
        self.inner.target.set(id).map_err(|_| {
            RegistryError::ImmutabilityViolation(format!(
                "reference '{}' is already resolved",
                self.inner.identifier
            ))
        })
    }
}

// A reference serializes as its raw identifier: the object pointer is a
// session-local index with no meaning outside the process.
impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner.identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_starts_pending() {
        let reference = Reference::new("svc-1", EntityKind::DeliveryService);
        assert!(!reference.is_resolved());
        assert_eq!(reference.identifier(), "svc-1");
        assert_eq!(reference.expected_kind(), EntityKind::DeliveryService);

        let err = reference.target().unwrap_err();
        assert_eq!(err.code(), "REFERENCE_PENDING");
    }

    #[test]
    fn test_bind_resolves_every_clone() {
        let reference = Reference::new("svc-1", EntityKind::DeliveryService);
        let clone = reference.clone();

        reference.bind(EntityId::new(3)).unwrap();
        assert!(clone.is_resolved());
        assert_eq!(clone.target().unwrap(), EntityId::new(3));
    }

    #[test]
    fn test_second_bind_is_immutability_violation() {
        let reference = Reference::new("svc-1", EntityKind::DeliveryService);
        reference.bind(EntityId::new(0)).unwrap();

        let err = reference.bind(EntityId::new(1)).unwrap_err();
        assert_eq!(err.code(), "IMMUTABILITY_VIOLATION");
        // Observable state is unchanged by the failed mutation.
        assert_eq!(reference.target().unwrap(), EntityId::new(0));
    }

    #[test]
    fn test_serializes_as_identifier() {
        let reference = Reference::new("svc-1", EntityKind::DeliveryService);
        let serialized = serde_json::to_value(&reference).unwrap();
        assert_eq!(serialized, serde_json::json!("svc-1"));
    }
}

//! Per-load reference registry and the finalized entity graph.
//!
//! One `LoadSession` exists per load invocation and is passed by explicit
//! handle; there is no process-wide registry. Entities register during the
//! construction phase, references are recorded deferred, and a single
//! finalization pass binds every reference or fails the whole session.
//! Because binding is deferred, registration order never matters: forward
//! and backward references resolve identically.

use std::collections::HashMap;

use super::errors::{BrokenReason, BrokenReference, RegistryError, RegistryResult};
use super::reference::{EntityId, Reference};
use crate::entity::{CarrierApp, DeliveryService, Entity, EntityKind, OrderApp, PickupService};

struct Deferred {
    referrer: String,
    reference: Reference,
}

/// The reference registry for one load session.
#[derive(Default)]
pub struct LoadSession {
    entities: Vec<Entity>,
    index: HashMap<String, EntityId>,
    deferred: Vec<Deferred>,
    finished: bool,
}

impl LoadSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entity under its identifier.
    pub fn register(&mut self, entity: Entity) -> RegistryResult<EntityId> {
        if self.finished {
            return Err(RegistryError::ImmutabilityViolation(
                "load session is finalized; no further registrations".into(),
            ));
        }

        let identifier = entity.identifier().to_string();
        if let Some(&existing) = self.index.get(&identifier) {
            return Err(RegistryError::DuplicateIdentifier {
                identifier,
                kind: entity.kind(),
                existing: self.entities[existing.index()].kind(),
            });
        }

        let id = EntityId::new(self.entities.len() as u32);
        self.entities.push(entity);
        self.index.insert(identifier, id);
        Ok(id)
    }

    /// Records a reference from `referrer` to `identifier` and returns the
    /// deferred handle.
    ///
    /// The target need not be registered yet; binding happens in
    /// `finished_loading`. A finalized session accepts no new references:
    /// the binding pass has already run, so the handle could never
    /// resolve.
    pub fn resolve(
        &mut self,
        referrer: &str,
        identifier: &str,
        expected: EntityKind,
    ) -> RegistryResult<Reference> {
        if self.finished {
            return Err(RegistryError::ImmutabilityViolation(
                "load session is finalized; no further references".into(),
            ));
        }

        let reference = Reference::new(identifier, expected);
        self.deferred.push(Deferred {
            referrer: referrer.to_string(),
            reference: reference.clone(),
        });
        Ok(reference)
    }

    /// Finalization: binds every deferred reference recorded in this
    /// session.
    ///
    /// Walks the full deferred list before reporting, so one error lists
    /// every identifier that is unregistered or of the wrong kind. May run
    /// at most once per session.
    pub fn finished_loading(&mut self) -> RegistryResult<()> {
        if self.finished {
            return Err(RegistryError::ImmutabilityViolation(
                "load session was already finalized".into(),
            ));
        }
        self.finished = true;

        let mut broken = Vec::new();
        for deferred in &self.deferred {
            match self.index.get(deferred.reference.identifier()) {
                None => broken.push(BrokenReference {
                    identifier: deferred.reference.identifier().to_string(),
                    referrer: deferred.referrer.clone(),
                    reason: BrokenReason::NotRegistered,
                }),
                Some(&id) => {
                    let actual = self.entities[id.index()].kind();
                    let expected = deferred.reference.expected_kind();
                    if actual != expected {
                        broken.push(BrokenReference {
                            identifier: deferred.reference.identifier().to_string(),
                            referrer: deferred.referrer.clone(),
                            reason: BrokenReason::WrongKind { expected, actual },
                        });
                    } else {
                        deferred.reference.bind(id)?;
                    }
                }
            }
        }

        if broken.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::UnresolvedReference { broken })
        }
    }

    /// Consumes the session into the read-only graph.
    ///
    /// Only a finalized session becomes a graph; a session whose
    /// finalization failed is simply dropped.
    pub fn into_graph(self) -> RegistryResult<EntityGraph> {
        if !self.finished {
            return Err(RegistryError::NotFinalized);
        }
        Ok(EntityGraph {
            entities: self.entities,
            index: self.index,
        })
    }

    /// A registered entity, by arena slot.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// The fully-linked, immutable entity graph a successful load returns.
///
/// Every entity is reachable by identifier; every reference held by an
/// entity is bound to a slot in this graph.
#[derive(Debug)]
pub struct EntityGraph {
    entities: Vec<Entity>,
    index: HashMap<String, EntityId>,
}

impl EntityGraph {
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    pub fn by_identifier(&self, identifier: &str) -> Option<&Entity> {
        self.index.get(identifier).and_then(|&id| self.get(id))
    }

    /// Dereferences a bound reference.
    pub fn resolve(&self, reference: &Reference) -> RegistryResult<&Entity> {
        let id = reference.target()?;
        self.get(id).ok_or_else(|| {
            RegistryError::ImmutabilityViolation(
                "reference was resolved by a different load session".into(),
            )
        })
    }

    pub fn delivery_service(&self, identifier: &str) -> Option<&DeliveryService> {
        self.by_identifier(identifier)?.as_delivery_service()
    }

    pub fn pickup_service(&self, identifier: &str) -> Option<&PickupService> {
        self.by_identifier(identifier)?.as_pickup_service()
    }

    pub fn carrier_app(&self, identifier: &str) -> Option<&CarrierApp> {
        self.by_identifier(identifier)?.as_carrier_app()
    }

    pub fn order_app(&self, identifier: &str) -> Option<&OrderApp> {
        self.by_identifier(identifier)?.as_order_app()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

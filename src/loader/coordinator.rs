//! The two-phase load protocol.
//!
//! Phase 1 (construction): every definition source is read, validated
//! (unless the caller chose trust mode), built, and registered. A failure
//! does not stop the batch; every broken definition is reported together,
//! and any failure aborts the load before finalization.
//!
//! Phase 2 (finalization): runs only on a clean phase 1. Every deferred
//! reference is bound, or the whole load fails with the full list of
//! broken references. Only a fully-resolved graph is ever returned.

use crate::entity::{
    CarrierApp, DeliveryService, Entity, EntityType, OrderApp, PickupService,
};
use crate::observability::{Event, Logger};
use crate::registry::{EntityGraph, EntityId, LoadSession};
use crate::schema::{validate, ObjectSchema};

use super::errors::{ConstructionFailure, FailureCause, LoadError, LoadResult};
use super::source::{DefinitionKind, DefinitionSource};

/// Whether a load validates definitions or trusts them.
///
/// The choice is explicit per load; there is no ambient switch. Trust
/// mode still builds, registers, and finalizes, so structural breakage
/// (wrong field types, dangling references) is caught either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Validate every definition against its entity schema.
    Validate,
    /// Skip schema validation for pre-validated definitions.
    Trust,
}

impl ValidationMode {
    fn as_str(&self) -> &'static str {
        match self {
            ValidationMode::Validate => "validate",
            ValidationMode::Trust => "trust",
        }
    }
}

/// Loads a batch of definition sources into a fully-resolved, immutable
/// entity graph.
///
/// On any failure the in-progress session is discarded whole: no entity
/// from a failed load is ever reachable.
pub fn load(sources: &[DefinitionSource], mode: ValidationMode) -> LoadResult<EntityGraph> {
    let source_count = sources.len().to_string();
    Logger::info(
        Event::LoadStart.name(),
        &[("mode", mode.as_str()), ("sources", &source_count)],
    );

    let mut session = LoadSession::new();
    let mut failures = Vec::new();

    for source in sources {
        match construct(source, mode, &mut session) {
            Ok(id) => {
                if let Some(entity) = session.get(id) {
                    Logger::trace(
                        Event::EntityRegistered.name(),
                        &[
                            ("identifier", entity.identifier()),
                            ("kind", entity.kind().label()),
                        ],
                    );
                }
            }
            Err(cause) => {
                let failure = ConstructionFailure {
                    origin: source.origin(),
                    label: source.kind().label(),
                    cause,
                };
                Logger::warn(
                    Event::DefinitionRejected.name(),
                    &[
                        ("code", failure.cause.code()),
                        ("kind", failure.label),
                        ("origin", &failure.origin),
                    ],
                );
                failures.push(failure);
            }
        }
    }

    if !failures.is_empty() {
        let failure_count = failures.len().to_string();
        Logger::error(
            Event::LoadFailed.name(),
            &[("failures", &failure_count), ("phase", "construction")],
        );
        return Err(LoadError::Construction { failures });
    }

    if let Err(err) = session.finished_loading() {
        Logger::error(
            Event::LoadFailed.name(),
            &[("code", err.code()), ("phase", "finalization")],
        );
        return Err(LoadError::Resolution(err));
    }

    let graph = session.into_graph()?;
    let entity_count = graph.len().to_string();
    Logger::info(Event::LoadComplete.name(), &[("entities", &entity_count)]);
    Ok(graph)
}

fn construct(
    source: &DefinitionSource,
    mode: ValidationMode,
    session: &mut LoadSession,
) -> Result<EntityId, FailureCause> {
    let raw = source.read().map_err(FailureCause::Unreadable)?;

    let value = match mode {
        ValidationMode::Validate => {
            validate(source.kind().label(), &raw, &schema_for(source.kind()))?
        }
        ValidationMode::Trust => raw,
    };

    let entity = match source.kind() {
        DefinitionKind::DeliveryService => {
            Entity::DeliveryService(DeliveryService::from_pojo(&value)?)
        }
        DefinitionKind::PickupService => {
            Entity::PickupService(PickupService::from_pojo(&value)?)
        }
        DefinitionKind::CarrierApp => {
            Entity::CarrierApp(CarrierApp::from_pojo(&value, session)?)
        }
        DefinitionKind::OrderApp => Entity::OrderApp(OrderApp::from_pojo(&value, session)?),
    };

    Ok(session.register(entity)?)
}

fn schema_for(kind: DefinitionKind) -> ObjectSchema {
    match kind {
        DefinitionKind::DeliveryService => DeliveryService::schema(),
        DefinitionKind::PickupService => PickupService::schema(),
        DefinitionKind::CarrierApp => CarrierApp::schema(),
        DefinitionKind::OrderApp => OrderApp::schema(),
    }
}

//! Definition sources.
//!
//! A source pairs one raw definition with the entity kind it declares and
//! an origin string for error attribution. The payload is either an
//! inline JSON value or a `.json` file path read synchronously during
//! phase 1, so read and parse failures aggregate with the batch's other
//! construction failures.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::entity::EntityKind;

/// Which entity type a definition source declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    DeliveryService,
    PickupService,
    CarrierApp,
    OrderApp,
}

impl DefinitionKind {
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            DefinitionKind::DeliveryService => EntityKind::DeliveryService,
            DefinitionKind::PickupService => EntityKind::PickupService,
            DefinitionKind::CarrierApp => EntityKind::CarrierApp,
            DefinitionKind::OrderApp => EntityKind::OrderApp,
        }
    }

    pub fn label(&self) -> &'static str {
        self.entity_kind().label()
    }
}

#[derive(Debug, Clone)]
enum Payload {
    Inline(Value),
    File(PathBuf),
}

/// One raw definition to load.
#[derive(Debug, Clone)]
pub struct DefinitionSource {
    kind: DefinitionKind,
    payload: Payload,
}

impl DefinitionSource {
    /// A definition supplied as an in-memory value.
    pub fn inline(kind: DefinitionKind, value: Value) -> Self {
        Self {
            kind,
            payload: Payload::Inline(value),
        }
    }

    /// A definition stored in a JSON file, read when the load runs.
    pub fn from_path(kind: DefinitionKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            payload: Payload::File(path.into()),
        }
    }

    pub fn kind(&self) -> DefinitionKind {
        self.kind
    }

    /// Origin string quoted in construction failures.
    pub fn origin(&self) -> String {
        match &self.payload {
            Payload::Inline(_) => "<inline>".to_string(),
            Payload::File(path) => path.display().to_string(),
        }
    }

    /// Produces the raw definition value, reading and parsing the file
    /// for file-backed sources.
    pub(crate) fn read(&self) -> Result<Value, String> {
        match &self.payload {
            Payload::Inline(value) => Ok(value.clone()),
            Payload::File(path) => {
                let content = fs::read_to_string(path)
                    .map_err(|e| format!("failed to read file: {}", e))?;
                serde_json::from_str(&content).map_err(|e| format!("invalid JSON: {}", e))
            }
        }
    }
}

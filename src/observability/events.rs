//! Observable load-lifecycle events.

use std::fmt;

/// Events emitted during a load session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A load invocation began
    LoadStart,
    /// One entity validated, built, and registered
    EntityRegistered,
    /// One definition source rejected during construction
    DefinitionRejected,
    /// Finalization bound every deferred reference
    LoadComplete,
    /// The load failed (construction or resolution)
    LoadFailed,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::LoadStart => "LOAD_START",
            Event::EntityRegistered => "ENTITY_REGISTERED",
            Event::DefinitionRejected => "DEFINITION_REJECTED",
            Event::LoadComplete => "LOAD_COMPLETE",
            Event::LoadFailed => "LOAD_FAILED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_screaming_snake() {
        for event in [
            Event::LoadStart,
            Event::EntityRegistered,
            Event::DefinitionRejected,
            Event::LoadComplete,
            Event::LoadFailed,
        ] {
            let name = event.name();
            assert!(name
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '_'));
            assert_eq!(format!("{}", event), name);
        }
    }
}

//! Load Protocol Invariant Tests
//!
//! Invariants covered:
//! - A load returns a whole graph or a single aggregate failure
//! - Construction failures are batched, never short-circuited
//! - Duplicate identifiers are fatal to the load
//! - Validation is explicit per load (validate vs. trust)
//! - Absent optional fields read as empty, never as missing
//! - Loading is deterministic

use linehaul::loader::{load, DefinitionKind, DefinitionSource, ValidationMode};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn ground_service() -> DefinitionSource {
    DefinitionSource::inline(
        DefinitionKind::DeliveryService,
        json!({ "id": "svc-1", "name": "Ground" }),
    )
}

fn shop_app() -> DefinitionSource {
    DefinitionSource::inline(
        DefinitionKind::OrderApp,
        json!({ "id": "app-1", "name": "Shop", "serviceRef": "svc-1" }),
    )
}

// =============================================================================
// Whole-Graph-Or-Nothing Tests
// =============================================================================

/// A clean batch loads every entity.
#[test]
fn test_clean_batch_loads_whole_graph() {
    let graph = load(&[ground_service(), shop_app()], ValidationMode::Validate).unwrap();
    assert_eq!(graph.len(), 2);
    assert!(graph.delivery_service("svc-1").is_some());
    assert!(graph.order_app("app-1").is_some());
}

/// One bad definition fails the whole load; the good ones are not
/// partially returned anywhere.
#[test]
fn test_one_bad_definition_fails_whole_load() {
    let sources = [
        ground_service(),
        DefinitionSource::inline(DefinitionKind::OrderApp, json!({ "id": "app-1" })),
    ];

    let err = load(&sources, ValidationMode::Validate).unwrap_err();
    assert_eq!(err.code(), "LOAD_CONSTRUCTION_FAILED");
    assert_eq!(err.failures().len(), 1);
    assert_eq!(err.failures()[0].label, "order app");
}

/// Every broken definition in a batch is reported together.
#[test]
fn test_construction_failures_aggregate_across_batch() {
    let sources = [
        DefinitionSource::inline(DefinitionKind::DeliveryService, json!({ "name": "NoId" })),
        ground_service(),
        DefinitionSource::inline(DefinitionKind::PickupService, json!({ "id": "p-1" })),
        DefinitionSource::inline(DefinitionKind::OrderApp, json!("not an object")),
    ];

    let err = load(&sources, ValidationMode::Validate).unwrap_err();
    assert_eq!(err.failures().len(), 3);

    let labels: Vec<&str> = err.failures().iter().map(|f| f.label).collect();
    assert_eq!(labels, vec!["delivery service", "pickup service", "order app"]);
}

// =============================================================================
// Duplicate Identifier Tests
// =============================================================================

/// Two entities sharing one identifier fail the load, regardless of kind.
#[test]
fn test_duplicate_identifier_fails_load() {
    let sources = [
        ground_service(),
        DefinitionSource::inline(
            DefinitionKind::PickupService,
            json!({ "id": "svc-1", "name": "Scheduled" }),
        ),
    ];

    let err = load(&sources, ValidationMode::Validate).unwrap_err();
    assert_eq!(err.failures().len(), 1);
    assert_eq!(err.failures()[0].cause.code(), "DUPLICATE_IDENTIFIER");
    let display = format!("{}", err);
    assert!(display.contains("svc-1"));
}

// =============================================================================
// Validation Mode Tests
// =============================================================================

/// Validate mode rejects undeclared fields; trust mode builds anyway.
#[test]
fn test_mode_is_explicit_per_load() {
    let sources = [DefinitionSource::inline(
        DefinitionKind::DeliveryService,
        json!({ "id": "svc-1", "name": "Ground", "futureField": true }),
    )];

    assert!(load(&sources, ValidationMode::Validate).is_err());
    assert!(load(&sources, ValidationMode::Trust).is_ok());
}

/// Trust mode still fails on data the builders cannot shape.
#[test]
fn test_trust_mode_is_not_anything_goes() {
    let sources = [DefinitionSource::inline(
        DefinitionKind::OrderApp,
        json!({ "id": "app-1", "name": "Shop" }),
    )];

    // serviceRef is structurally required to build an order app.
    let err = load(&sources, ValidationMode::Trust).unwrap_err();
    assert_eq!(err.failures()[0].cause.code(), "VALIDATION_FAILED");
}

// =============================================================================
// Field Defaulting Tests
// =============================================================================

/// Supplied values come back unchanged; absent optional strings read as
/// empty strings, absent structured fields as empty containers.
#[test]
fn test_build_reproduces_values_and_defaults_absent_fields() {
    let sources = [DefinitionSource::inline(
        DefinitionKind::DeliveryService,
        json!({ "id": "svc-1", "name": "Ground", "code": "GND" }),
    )];

    let graph = load(&sources, ValidationMode::Validate).unwrap();
    let service = graph.delivery_service("svc-1").unwrap();

    assert_eq!(service.id(), "svc-1");
    assert_eq!(service.name(), "Ground");
    assert_eq!(service.code(), "GND");
    assert_eq!(service.description(), "");
    assert!(service.identifiers().is_empty());
    assert!(service.notes().is_empty());
    assert!(service.origin_address().is_none());
}

/// Validation normalizes whitespace before building.
#[test]
fn test_validated_strings_are_trimmed() {
    let sources = [DefinitionSource::inline(
        DefinitionKind::DeliveryService,
        json!({ "id": "svc-1", "name": "  Ground  " }),
    )];

    let graph = load(&sources, ValidationMode::Validate).unwrap();
    assert_eq!(graph.delivery_service("svc-1").unwrap().name(), "Ground");
}

// =============================================================================
// File-Backed Source Tests
// =============================================================================

/// Definitions load from JSON files, and read failures are attributed to
/// the file's path.
#[test]
fn test_file_backed_sources() {
    let tmp = TempDir::new().unwrap();
    let good = tmp.path().join("ground.json");
    fs::write(&good, r#"{ "id": "svc-1", "name": "Ground" }"#).unwrap();

    let graph = load(
        &[DefinitionSource::from_path(
            DefinitionKind::DeliveryService,
            &good,
        )],
        ValidationMode::Validate,
    )
    .unwrap();
    assert_eq!(graph.delivery_service("svc-1").unwrap().name(), "Ground");

    let missing = tmp.path().join("absent.json");
    let err = load(
        &[DefinitionSource::from_path(
            DefinitionKind::DeliveryService,
            &missing,
        )],
        ValidationMode::Validate,
    )
    .unwrap_err();
    assert_eq!(err.failures()[0].cause.code(), "DEFINITION_UNREADABLE");
    assert!(err.failures()[0].origin.contains("absent.json"));
}

/// A malformed file is a construction failure batched with the rest.
#[test]
fn test_malformed_file_batches_with_other_failures() {
    let tmp = TempDir::new().unwrap();
    let broken = tmp.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();

    let sources = [
        DefinitionSource::from_path(DefinitionKind::DeliveryService, &broken),
        DefinitionSource::inline(DefinitionKind::OrderApp, json!({ "id": "app-1" })),
    ];

    let err = load(&sources, ValidationMode::Validate).unwrap_err();
    assert_eq!(err.failures().len(), 2);
    assert_eq!(err.failures()[0].cause.code(), "DEFINITION_UNREADABLE");
    assert_eq!(err.failures()[1].cause.code(), "VALIDATION_FAILED");
}

// =============================================================================
// Determinism Tests
// =============================================================================

/// The same batch loads the same way every time.
#[test]
fn test_loading_is_deterministic() {
    for _ in 0..50 {
        let graph = load(&[ground_service(), shop_app()], ValidationMode::Validate).unwrap();
        assert_eq!(graph.len(), 2);
    }

    let bad = [DefinitionSource::inline(
        DefinitionKind::DeliveryService,
        json!({ "id": "svc-1" }),
    )];
    for _ in 0..50 {
        let err = load(&bad, ValidationMode::Validate).unwrap_err();
        assert_eq!(err.failures().len(), 1);
    }
}

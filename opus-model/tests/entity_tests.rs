use opus_model::document::{ServerDates, STATE_PUBLISHED};
use opus_model::{Entity, FieldOptions, ModelConfig, ModelDescriptor, ModelError, ModelType};
use opus_types::{ModelId, ServerDate};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;

fn document_descriptor() -> Arc<ModelDescriptor> {
    let config = ModelConfig::new()
        .field("title", FieldOptions::string().max_size(255))
        .field("pageCount", FieldOptions::int())
        .field("serverState", FieldOptions::string())
        .field("serverDateCreated", FieldOptions::of_type("date"))
        .field("serverDateModified", FieldOptions::of_type("date"))
        .field("serverDatePublished", FieldOptions::of_type("date"))
        .state_field("ServerState");
    ModelDescriptor::new("Document", Some(&config))
}

fn person_descriptor() -> Arc<ModelDescriptor> {
    let config = ModelConfig::new().field("lastName", FieldOptions::string());
    ModelDescriptor::new("Person", Some(&config))
}

// ── Construction ─────────────────────────────────────────────────

#[test]
fn new_entity_is_new_and_unmodified() {
    let entity = Entity::new(document_descriptor());
    assert!(entity.is_new_record());
    assert!(!entity.is_modified());
    assert!(!entity.has_state_transition());
    assert_eq!(entity.id(), None);
    assert_eq!(entity.model_type(), &ModelType::new("Document"));
}

#[test]
fn from_stored_is_not_new_and_not_modified() {
    let entity = Entity::from_stored(
        document_descriptor(),
        ModelId::new(5),
        vec![("title".to_string(), json!("Stored"))],
    )
    .unwrap();
    assert!(!entity.is_new_record());
    assert!(!entity.is_modified());
    assert_eq!(entity.id(), Some(ModelId::new(5)));
    assert_eq!(entity.get("Title").unwrap(), Some(&json!("Stored")));
}

#[test]
fn from_stored_rejects_unknown_fields() {
    let result = Entity::from_stored(
        document_descriptor(),
        ModelId::new(5),
        vec![("colour".to_string(), json!("red"))],
    );
    assert!(matches!(result, Err(ModelError::UnknownField { .. })));
}

// ── Field access ─────────────────────────────────────────────────

#[test]
fn set_and_get_normalize_names() {
    let mut entity = Entity::new(document_descriptor());
    entity.set("title", "On Rust").unwrap();
    assert_eq!(entity.get("Title").unwrap(), Some(&json!("On Rust")));
    assert_eq!(entity.get("title").unwrap(), Some(&json!("On Rust")));
}

#[test]
fn unset_field_is_none() {
    let entity = Entity::new(document_descriptor());
    assert_eq!(entity.get("title").unwrap(), None);
    assert_eq!(entity.get_as::<String>("title").unwrap(), None);
}

#[test]
fn null_counts_as_unset() {
    let mut entity = Entity::new(document_descriptor());
    entity.set("title", "x").unwrap();
    entity.set("title", Value::Null).unwrap();
    assert_eq!(entity.get("title").unwrap(), None);
}

#[test]
fn unknown_field_fails_with_field_name() {
    let mut entity = Entity::new(document_descriptor());
    let err = entity.set("colour", "red").unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("colour"));
    assert!(msg.contains("Document"));
    assert!(entity.get("colour").is_err());
}

#[test]
fn get_as_deserializes() {
    let mut entity = Entity::new(document_descriptor());
    entity.set("pageCount", 42).unwrap();
    assert_eq!(entity.get_as::<u32>("PageCount").unwrap(), Some(42));
}

#[test]
fn get_as_wrong_type_is_invalid_value() {
    let mut entity = Entity::new(document_descriptor());
    entity.set("pageCount", "many").unwrap();
    let err = entity.get_as::<u32>("pageCount").unwrap_err();
    assert!(matches!(err, ModelError::InvalidValue { .. }));
}

#[test]
fn values_follow_declaration_order() {
    let mut entity = Entity::new(document_descriptor());
    entity.set("serverState", "unpublished").unwrap();
    entity.set("title", "T").unwrap();
    let names: Vec<&str> = entity.values().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["Title", "ServerState"]);
    assert_eq!(
        entity.to_json(),
        json!({"Title": "T", "ServerState": "unpublished"})
    );
}

// ── Modification tracking ────────────────────────────────────────

#[test]
fn set_marks_modified() {
    let mut entity = Entity::from_stored(document_descriptor(), ModelId::new(1), vec![]).unwrap();
    entity.set("title", "New").unwrap();
    assert!(entity.is_modified());
    assert!(entity.is_field_modified("Title"));
    assert_eq!(entity.modified_fields(), vec!["Title"]);
}

#[test]
fn setting_same_value_is_not_a_modification() {
    let mut entity = Entity::from_stored(
        document_descriptor(),
        ModelId::new(1),
        vec![("title".to_string(), json!("Same"))],
    )
    .unwrap();
    entity.set("title", "Same").unwrap();
    assert!(!entity.is_modified());
}

#[test]
fn mark_stored_clears_flags() {
    let mut entity = Entity::new(document_descriptor());
    entity.set("serverState", STATE_PUBLISHED).unwrap();
    assert!(entity.has_state_transition());

    entity.mark_stored(ModelId::new(9));
    assert!(!entity.is_new_record());
    assert!(!entity.is_modified());
    assert!(!entity.has_state_transition());
    assert_eq!(entity.id(), Some(ModelId::new(9)));
}

// ── State transitions ────────────────────────────────────────────

#[test]
fn changing_state_field_is_a_transition() {
    let mut entity = Entity::from_stored(
        document_descriptor(),
        ModelId::new(1),
        vec![("serverState".to_string(), json!("unpublished"))],
    )
    .unwrap();
    entity.set_server_state(STATE_PUBLISHED).unwrap();
    assert!(entity.has_state_transition());
}

#[test]
fn same_state_is_not_a_transition() {
    let mut entity = Entity::from_stored(
        document_descriptor(),
        ModelId::new(1),
        vec![("serverState".to_string(), json!("published"))],
    )
    .unwrap();
    entity.set_server_state(STATE_PUBLISHED).unwrap();
    assert!(!entity.has_state_transition());
}

#[test]
fn other_fields_are_not_transitions() {
    let mut entity = Entity::new(document_descriptor());
    entity.set("title", "x").unwrap();
    assert!(!entity.has_state_transition());
}

#[test]
fn models_without_state_field_never_transition() {
    let mut entity = Entity::new(person_descriptor());
    entity.set("lastName", "Doe").unwrap();
    assert!(!entity.has_state_transition());
}

// ── Server dates ─────────────────────────────────────────────────

#[test]
fn server_dates_roundtrip() {
    let mut entity = Entity::new(document_descriptor());
    let date = ServerDate::from_unix(1_700_000_000).unwrap();
    entity.set_server_date_created(date).unwrap();
    entity.set_server_date_modified(date).unwrap();
    assert_eq!(entity.server_date_created().unwrap(), Some(date));
    assert_eq!(entity.server_date_modified().unwrap(), Some(date));
    assert_eq!(entity.server_date_published().unwrap(), None);
}

#[test]
fn server_dates_on_model_without_date_fields_fail() {
    let mut entity = Entity::new(person_descriptor());
    let err = entity.server_date_created().unwrap_err();
    assert!(format!("{err}").contains("ServerDateCreated"));
    assert!(entity.set_server_state(STATE_PUBLISHED).is_err());
}

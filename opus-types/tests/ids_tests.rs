use opus_types::ModelId;
use std::collections::HashSet;
use std::str::FromStr;

// ── ModelId ──────────────────────────────────────────────────────

#[test]
fn model_id_new_and_get() {
    let id = ModelId::new(42);
    assert_eq!(id.get(), 42);
}

#[test]
fn model_id_from_u64() {
    let id: ModelId = 7u64.into();
    assert_eq!(id, ModelId::new(7));
}

#[test]
fn model_id_display_and_parse() {
    let id = ModelId::new(1234);
    let s = id.to_string();
    assert_eq!(s, "1234");
    let parsed = ModelId::parse(&s).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn model_id_parse_trims_whitespace() {
    assert_eq!(ModelId::parse(" 15 ").unwrap(), ModelId::new(15));
}

#[test]
fn model_id_from_str() {
    let parsed = ModelId::from_str("99").unwrap();
    assert_eq!(parsed.get(), 99);
}

#[test]
fn model_id_parse_invalid() {
    assert!(ModelId::parse("not-a-number").is_err());
    assert!(ModelId::parse("-1").is_err());
}

#[test]
fn model_id_ordering() {
    assert!(ModelId::new(1) < ModelId::new(2));
}

#[test]
fn model_id_hash_and_eq() {
    let id = ModelId::new(3);
    let mut set = HashSet::new();
    set.insert(id);
    set.insert(id); // duplicate
    assert_eq!(set.len(), 1);
}

#[test]
fn model_id_serde_is_transparent() {
    let id = ModelId::new(17);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "17");
    let back: ModelId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

//! Tests for the placeholder registry

use super::*;
use crate::Error;

#[test]
fn test_assign_numbers_per_kind_from_one() {
    let mut table = MappingTable::new();

    assert_eq!(table.assign(EntityKind::Person, "Ada Lovelace"), "<PER_1>");
    assert_eq!(table.assign(EntityKind::Email, "ada@example.com"), "<EMAIL_1>");
    assert_eq!(table.assign(EntityKind::Person, "Charles Babbage"), "<PER_2>");
    assert_eq!(table.len(), 3);
}

#[test]
fn test_assign_dedups_same_value_and_kind() {
    let mut table = MappingTable::new();

    let first = table.assign(EntityKind::Person, "Ada");
    let second = table.assign(EntityKind::Person, "Ada");

    assert_eq!(first, second);
    assert_eq!(table.len(), 1);
}

#[test]
fn test_same_value_different_kind_gets_distinct_placeholders() {
    let mut table = MappingTable::new();

    let as_person = table.assign(EntityKind::Person, "Orange");
    let as_org = table.assign(EntityKind::Organization, "Orange");

    assert_eq!(as_person, "<PER_1>");
    assert_eq!(as_org, "<ORG_1>");
    assert_eq!(table.len(), 2);
}

#[test]
fn test_lookups_in_both_directions() {
    let mut table = MappingTable::new();
    table.assign(EntityKind::Location, "Paris");

    assert_eq!(table.original_for("<LOC_1>"), Some("Paris"));
    assert_eq!(table.placeholder_for(EntityKind::Location, "Paris"), Some("<LOC_1>"));

    assert_eq!(table.original_for("<LOC_2>"), None);
    assert_eq!(table.placeholder_for(EntityKind::Person, "Paris"), None);
}

#[test]
fn test_json_round_trip_preserves_order_and_kind() {
    let mut table = MappingTable::new();
    table.assign(EntityKind::Person, "Ada");
    table.assign(EntityKind::Email, "ada@example.com");
    table.assign(EntityKind::Person, "Charles");

    let json = table.to_json().unwrap();
    let reloaded = MappingTable::from_json(&json).unwrap();

    assert_eq!(reloaded.entries(), table.entries());
    assert_eq!(reloaded.original_for("<PER_2>"), Some("Charles"));
    assert_eq!(
        reloaded.placeholder_for(EntityKind::Email, "ada@example.com"),
        Some("<EMAIL_1>")
    );
}

#[test]
fn test_counters_resume_after_reload() {
    let mut table = MappingTable::new();
    table.assign(EntityKind::Person, "Ada");
    table.assign(EntityKind::Person, "Charles");

    let json = table.to_json().unwrap();
    let mut reloaded = MappingTable::from_json(&json).unwrap();

    assert_eq!(reloaded.assign(EntityKind::Person, "Grace"), "<PER_3>");
}

#[test]
fn test_yaml_round_trip() {
    let mut table = MappingTable::new();
    table.assign(EntityKind::Iban, "DE89370400440532013000");

    let yaml = serde_yaml::to_string(&table).unwrap();
    let reloaded: MappingTable = serde_yaml::from_str(&yaml).unwrap();

    assert_eq!(reloaded.original_for("<IBAN_1>"), Some("DE89370400440532013000"));
}

#[test]
fn test_reload_accepts_gaps_in_numbering() {
    // Callers may prune entries between serialize and deserialize
    let json = r#"[{"placeholder":"<PER_2>","original":"Charles","kind":"person"}]"#;
    let mut table = MappingTable::from_json(json).unwrap();

    assert_eq!(table.original_for("<PER_2>"), Some("Charles"));
    assert_eq!(table.assign(EntityKind::Person, "Grace"), "<PER_3>");
}

#[test]
fn test_reload_rejects_malformed_placeholder() {
    let json = r#"[{"placeholder":"PER_1","original":"Ada","kind":"person"}]"#;
    let err = MappingTable::from_json(json).unwrap_err();
    assert!(matches!(err, Error::InvalidTable(_)));
}

#[test]
fn test_reload_rejects_non_canonical_placeholder() {
    let json = r#"[{"placeholder":"<PER_01>","original":"Ada","kind":"person"}]"#;
    let err = MappingTable::from_json(json).unwrap_err();
    assert!(matches!(err, Error::InvalidTable(_)));
}

#[test]
fn test_reload_rejects_kind_mismatch() {
    let json = r#"[{"placeholder":"<PER_1>","original":"Ada","kind":"email"}]"#;
    let err = MappingTable::from_json(json).unwrap_err();
    assert!(matches!(err, Error::InvalidTable(_)));
}

#[test]
fn test_reload_rejects_duplicate_placeholder() {
    let json = r#"[
        {"placeholder":"<PER_1>","original":"Ada","kind":"person"},
        {"placeholder":"<PER_1>","original":"Charles","kind":"person"}
    ]"#;
    let err = MappingTable::from_json(json).unwrap_err();
    assert!(matches!(err, Error::InvalidTable(_)));
}

#[test]
fn test_reload_rejects_duplicate_original() {
    let json = r#"[
        {"placeholder":"<PER_1>","original":"Ada","kind":"person"},
        {"placeholder":"<PER_2>","original":"Ada","kind":"person"}
    ]"#;
    let err = MappingTable::from_json(json).unwrap_err();
    assert!(matches!(err, Error::InvalidTable(_)));
}

#[test]
fn test_from_json_propagates_syntax_errors() {
    let err = MappingTable::from_json("not json").unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}

use serde_json::{Map, Value, json};

use voxrag::domain::{Provenance, UNKNOWN_SOURCE};

fn metadata(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[test]
fn given_metadata_with_source_when_building_provenance_then_source_is_lifted() {
    let provenance =
        Provenance::from_metadata(metadata(json!({"source": "manual.pdf", "page": 3})));

    assert_eq!(provenance.source, "manual.pdf");
    assert_eq!(provenance.metadata.get("page"), Some(&json!(3)));
    assert!(!provenance.metadata.contains_key("source"));
}

#[test]
fn given_metadata_without_source_when_building_provenance_then_unknown() {
    let provenance = Provenance::from_metadata(metadata(json!({"page": 3})));

    assert_eq!(provenance.source, UNKNOWN_SOURCE);
}

#[test]
fn given_non_string_source_when_building_provenance_then_unknown() {
    let provenance = Provenance::from_metadata(metadata(json!({"source": 42})));

    assert_eq!(provenance.source, "unknown");
}

#[test]
fn given_provenance_when_serialized_then_metadata_is_flattened_beside_source() {
    let provenance = Provenance::new("faq.md")
        .with_field("section", json!("billing"))
        .with_field("source", json!("ignored"));

    let value = serde_json::to_value(&provenance).unwrap();

    assert_eq!(value, json!({"source": "faq.md", "section": "billing"}));
}

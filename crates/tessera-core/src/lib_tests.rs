use crate::{Nullability, RawAttributes, parse_attributes};

const SAMPLE_JSON: &str = r#"{
    "externalName": "User",
    "previousNames": ["Customer", "Acme.Customer"],
    "defaultValue": 0,
    "tupleNames": ["Id", null],
    "cacheHint": { "ttl": 30 },
    "audited": true
}"#;

#[test]
fn parse_full_attributes() {
    let attrs = parse_attributes(SAMPLE_JSON).unwrap();

    assert_eq!(attrs.external_name.as_deref(), Some("User"));
    assert_eq!(attrs.previous_names, vec!["Customer", "Acme.Customer"]);
    assert!(attrs.has_default_value());
    assert_eq!(attrs.tuple_names, vec![Some("Id".to_string()), None]);
}

#[test]
fn unknown_keys_are_kept_in_order() {
    let attrs = parse_attributes(SAMPLE_JSON).unwrap();

    let keys: Vec<_> = attrs.extra.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["cacheHint", "audited"]);
}

#[test]
fn empty_blob_is_default() {
    let attrs = parse_attributes("{}").unwrap();

    assert!(attrs.is_empty());
    assert!(!attrs.has_default_value());
}

#[test]
fn null_default_value_counts_as_absent() {
    // serde maps JSON null onto `None` for optional fields.
    let attrs = parse_attributes(r#"{ "defaultValue": null }"#).unwrap();
    assert!(!attrs.has_default_value());
}

#[test]
fn malformed_blob_is_rejected() {
    assert!(parse_attributes(r#"{ "previousNames": "Customer" }"#).is_err());
}

#[test]
fn builder_matches_parsed() {
    let built = RawAttributes::new()
        .with_external_name("User")
        .with_previous_names(["Customer"]);
    let parsed =
        parse_attributes(r#"{ "externalName": "User", "previousNames": ["Customer"] }"#).unwrap();

    assert_eq!(built, parsed);
}

#[test]
fn nullability_deserializes_lowercase() {
    let states: Vec<Nullability> = serde_json::from_str(r#"["notnull", "nullable"]"#).unwrap();
    assert_eq!(states, vec![Nullability::NotNull, Nullability::Nullable]);
    assert!(states[1].is_nullable());
}

use super::Config;

#[test]
fn defaults() {
    let config = Config::new();

    assert_eq!(config.nullable_suffix, "?");
    assert_eq!(config.byte_array_name, "binary");
    assert!(config.enum_follows_underlying);
    assert!(config.allow_empty_composites);
}

#[test]
fn builder_overrides() {
    let config = Config::new()
        .nullable_suffix("_opt")
        .byte_array_name("bytes")
        .enum_follows_underlying(false)
        .allow_empty_composites(false);

    assert_eq!(config.nullable_suffix, "_opt");
    assert_eq!(config.byte_array_name, "bytes");
    assert!(!config.enum_follows_underlying);
    assert!(!config.allow_empty_composites);
}

#[test]
fn deserialize_partial_json_keeps_defaults() {
    let config: Config = serde_json::from_str(r#"{ "enumFollowsUnderlying": false }"#).unwrap();

    assert_eq!(config, Config::new().enum_follows_underlying(false));
}

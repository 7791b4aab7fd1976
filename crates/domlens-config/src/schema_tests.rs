use super::*;

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.model.provider, "gemini");
    assert_eq!(config.model.model, "gemini-2.0-flash");
    assert!(config.model.api_key.is_none());
    assert_eq!(config.stamping.address_length, 3);
    assert!(config.stamping.seed.is_none());
    assert!(config.markdown.collapse_newlines);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_partial_sections_keep_defaults() {
    let config: Config = toml::from_str(
        r#"
        [model]
        api_key = "k"

        [stamping]
        seed = 7
        "#,
    )
    .unwrap();
    assert_eq!(config.model.api_key.as_deref(), Some("k"));
    assert_eq!(config.model.timeout_seconds, 300);
    assert_eq!(config.stamping.address_length, 3);
    assert_eq!(config.stamping.seed, Some(7));
}

#[test]
fn test_serialize_skips_unset_options() {
    let text = toml::to_string(&Config::default()).unwrap();
    assert!(!text.contains("api_key"));
    assert!(!text.contains("seed"));
    assert!(text.contains("address_length = 3"));
}

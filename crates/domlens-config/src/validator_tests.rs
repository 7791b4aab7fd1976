use super::*;

fn configured() -> Config {
    let mut config = Config::default();
    config.model.api_key = Some("key".to_string());
    config
}

#[test]
fn test_validate_configured_config() {
    let result = ConfigValidator::validate(&configured());
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_default_config_warns_about_api_key() {
    let result = ConfigValidator::validate(&Config::default());
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "model.api_key"));
}

#[test]
fn test_validate_unknown_provider() {
    let mut config = configured();
    config.model.provider = "openai".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "model.provider"));
}

#[test]
fn test_validate_invalid_base_url() {
    let mut config = configured();
    config.model.base_url = Some("localhost:9000".to_string());

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "model.base_url"));
}

#[test]
fn test_validate_temperature_range() {
    let mut config = configured();
    config.model.temperature = Some(3.5);

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "model.temperature"));
}

#[test]
fn test_validate_zero_address_length() {
    let mut config = configured();
    config.stamping.address_length = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "stamping.address_length"));
}

#[test]
fn test_validate_short_address_length_warning() {
    let mut config = configured();
    config.stamping.address_length = 2;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "stamping.address_length"));
}

#[test]
fn test_into_result_reports_first_error() {
    let mut config = configured();
    config.model.timeout_seconds = 0;

    let err = ConfigValidator::validate(&config).into_result().unwrap_err();
    assert!(err.to_string().contains("model.timeout_seconds"));
}

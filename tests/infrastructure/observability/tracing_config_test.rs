use voxrag::infrastructure::observability::TracingConfig;
use voxrag::presentation::Environment;
use voxrag::presentation::config::LoggingSettings;

#[test]
fn given_logging_settings_when_building_config_then_level_leads_directives() {
    let logging = LoggingSettings {
        level: "warn".to_string(),
        enable_json: true,
    };

    let config = TracingConfig::from_settings(&logging, Environment::Prod);

    assert!(config.json_format);
    assert_eq!(config.environment, "Prod");
    assert!(config.default_directives.starts_with("warn,"));
    assert!(config.default_directives.contains("voxrag=debug"));
}

#[test]
fn given_default_logging_when_building_config_then_plain_text_at_info() {
    let config = TracingConfig::from_settings(&LoggingSettings::default(), Environment::Local);

    assert!(!config.json_format);
    assert!(config.default_directives.starts_with("info,"));
}

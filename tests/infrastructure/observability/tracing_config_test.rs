use pronunciation_relay::infrastructure::observability::TracingConfig;

#[test]
fn given_logging_settings_when_building_config_then_crate_filters_are_appended() {
    let config = TracingConfig::from_logging("production", "warn", true);

    assert_eq!(config.environment, "production");
    assert!(config.json_format);
    assert_eq!(
        config.default_filter,
        "warn,pronunciation_relay=debug,tower_http=debug"
    );
}

#[test]
fn given_default_config_when_created_then_filter_includes_crate_debug() {
    let config = TracingConfig::default();

    assert!(config.default_filter.starts_with("info,"));
    assert!(config.default_filter.contains("pronunciation_relay=debug"));
}

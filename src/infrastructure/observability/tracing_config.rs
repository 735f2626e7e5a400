/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub default_filter: String,
}

impl TracingConfig {
    pub fn from_logging(environment: &str, level: &str, enable_json: bool) -> Self {
        Self {
            environment: environment.to_string(),
            json_format: enable_json,
            default_filter: format!("{level},pronunciation_relay=debug,tower_http=debug"),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            default_filter: "info,pronunciation_relay=debug,tower_http=debug".to_string(),
        }
    }
}

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Default generation endpoint. Overridable for tests and proxies via
/// `PULSE_INSIGHT_BASE_URL`.
pub(crate) const DEFAULT_INSIGHT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if an env var holds an unparseable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if an env var holds an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so it
/// can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("PULSE_ENV", "development"));
    let bind_addr = parse_addr("PULSE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("PULSE_LOG_LEVEL", "info");

    let insight_api_key = lookup("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
    let insight_base_url = or_default("PULSE_INSIGHT_BASE_URL", DEFAULT_INSIGHT_BASE_URL);
    let insight_model = or_default("PULSE_INSIGHT_MODEL", "gemini-2.0-flash");
    let insight_timeout_secs = parse_u64("PULSE_INSIGHT_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        insight_api_key,
        insight_base_url,
        insight_model,
        insight_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_known_values() {
        assert_eq!(parse_environment("development"), Environment::Development);
        assert_eq!(parse_environment("test"), Environment::Test);
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("empty env should be valid");
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.insight_api_key.is_none());
        assert_eq!(cfg.insight_base_url, DEFAULT_INSIGHT_BASE_URL);
        assert_eq!(cfg.insight_model, "gemini-2.0-flash");
        assert_eq!(cfg.insight_timeout_secs, 30);
    }

    #[test]
    fn build_app_config_reads_overrides() {
        let mut map = HashMap::new();
        map.insert("PULSE_BIND_ADDR", "127.0.0.1:8080");
        map.insert("PULSE_ENV", "production");
        map.insert("GEMINI_API_KEY", "secret-key");
        map.insert("PULSE_INSIGHT_MODEL", "gemini-2.5-pro");
        map.insert("PULSE_INSIGHT_TIMEOUT_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).expect("valid overrides");
        assert_eq!(cfg.env, Environment::Production);
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(cfg.insight_api_key.as_deref(), Some("secret-key"));
        assert_eq!(cfg.insight_model, "gemini-2.5-pro");
        assert_eq!(cfg.insight_timeout_secs, 60);
    }

    #[test]
    fn build_app_config_treats_empty_key_as_absent() {
        let mut map = HashMap::new();
        map.insert("GEMINI_API_KEY", "");
        let cfg = build_app_config(lookup_from_map(&map)).expect("valid");
        assert!(cfg.insight_api_key.is_none());
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = HashMap::new();
        map.insert("PULSE_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PULSE_BIND_ADDR"),
            "expected InvalidEnvVar(PULSE_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_timeout() {
        let mut map = HashMap::new();
        map.insert("PULSE_INSIGHT_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PULSE_INSIGHT_TIMEOUT_SECS"),
            "expected InvalidEnvVar(PULSE_INSIGHT_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let mut map = HashMap::new();
        map.insert("GEMINI_API_KEY", "super-secret");
        let cfg = build_app_config(lookup_from_map(&map)).expect("valid");
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("super-secret"), "got: {debug}");
        assert!(debug.contains("[redacted]"), "got: {debug}");
    }
}

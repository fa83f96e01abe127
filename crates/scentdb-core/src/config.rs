use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_FRAGELLA_BASE_URL: &str = "https://api.fragella.com/api/v1";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so only malformed values fail. The Fragella
/// API key stays optional here: only the seed job needs it, and the client
/// rejects a missing key at construction time.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SCENTDB_ENV", "development"));
    let bind_addr = parse_addr("SCENTDB_BIND_ADDR", "0.0.0.0:3001")?;
    let log_level = or_default("SCENTDB_LOG_LEVEL", "info");
    let store_path = PathBuf::from(or_default("SCENTDB_STORE_PATH", "./data/products.json"));
    let seed_config_path = lookup("SCENTDB_SEED_CONFIG_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    let fragella_api_key = lookup("FRAGELLA_API_KEY")
        .ok()
        .filter(|s| !s.trim().is_empty());
    let fragella_base_url = or_default("FRAGELLA_BASE_URL", DEFAULT_FRAGELLA_BASE_URL);
    let fragella_request_timeout_secs = parse_u64("FRAGELLA_REQUEST_TIMEOUT_SECS", "30")?;
    let fragella_max_requests = parse_u32("FRAGELLA_MAX_REQUESTS", "20")?;

    if fragella_max_requests == 0 {
        return Err(invalid(
            "FRAGELLA_MAX_REQUESTS",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        store_path,
        seed_config_path,
        fragella_api_key,
        fragella_base_url,
        fragella_request_timeout_secs,
        fragella_max_requests,
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
#[path = "config_test.rs"]
mod tests;

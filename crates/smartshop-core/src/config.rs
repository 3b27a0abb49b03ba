use crate::app_config::{AppConfig, Environment, SearchSource};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SMARTSHOP_ENV", "development"))?;
    let bind_addr = parse_addr("SMARTSHOP_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("SMARTSHOP_LOG_LEVEL", "info");
    let search_source = parse_search_source(&or_default("SMARTSHOP_SEARCH_SOURCE", "live"))?;
    let catalog_path = lookup("SMARTSHOP_CATALOG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let scraper_request_timeout_secs = parse_u64("SMARTSHOP_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    if scraper_request_timeout_secs == 0 {
        return Err(invalid(
            "SMARTSHOP_SCRAPER_REQUEST_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }
    let scraper_pool_max_idle = parse_usize("SMARTSHOP_SCRAPER_POOL_MAX_IDLE", "10")?;
    let scraper_throttle_delay_ms = parse_u64("SMARTSHOP_SCRAPER_THROTTLE_DELAY_MS", "1000")?;
    let rate_limit_per_minute = parse_usize("SMARTSHOP_RATE_LIMIT_PER_MINUTE", "120")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        search_source,
        catalog_path,
        scraper_request_timeout_secs,
        scraper_pool_max_idle,
        scraper_throttle_delay_ms,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SMARTSHOP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_search_source(s: &str) -> Result<SearchSource, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "live" => Ok(SearchSource::Live),
        "catalog" | "offline" => Ok(SearchSource::Catalog),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SMARTSHOP_SEARCH_SOURCE".to_string(),
            reason: format!("expected 'live' or 'catalog', got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

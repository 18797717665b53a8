use crate::app_config::AppConfig;
use crate::ConfigError;

/// Default desktop UA. Matches what the extraction heuristics are tuned
/// against: Japanese-locale product pages served to a mainstream browser.
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Default mobile UA for short-link expansion.
const DEFAULT_MOBILE_USER_AGENT: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Mobile/15E148 Safari/604.1";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function.
///
/// The parsing/validation logic is decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`
/// needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("HOSHII_LOG_LEVEL", "info");
    let scrape_timeout_secs = parse_u64("HOSHII_SCRAPE_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("HOSHII_USER_AGENT", DEFAULT_USER_AGENT);
    let mobile_user_agent = or_default("HOSHII_MOBILE_USER_AGENT", DEFAULT_MOBILE_USER_AGENT);
    let inter_request_delay_ms = parse_u64("HOSHII_INTER_REQUEST_DELAY_MS", "800")?;

    Ok(AppConfig {
        log_level,
        scrape_timeout_secs,
        user_agent,
        mobile_user_agent,
        inter_request_delay_ms,
    })
}

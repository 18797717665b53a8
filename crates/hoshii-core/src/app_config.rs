/// Application configuration for the scraper and its drivers.
///
/// Every knob has a default so a bare environment works; overrides come
/// from `HOSHII_*` env vars (see [`crate::config`]).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Whole-request timeout for one scrape fetch.
    pub scrape_timeout_secs: u64,
    /// Desktop browser user agent sent to product pages.
    pub user_agent: String,
    /// Mobile user agent used for short-link expansion — some short-link
    /// targets vary behavior by client.
    pub mobile_user_agent: String,
    /// Pacing hint for external batch callers. The core itself never
    /// sleeps; repeated un-paced calls trip target-site bot defenses.
    pub inter_request_delay_ms: u64,
}

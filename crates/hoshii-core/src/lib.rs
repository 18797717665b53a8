pub mod app_config;
pub mod config;
pub mod result;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use result::{ScrapeResult, Source, StockStatus, FETCH_FAILED_NAME, NAME_PLACEHOLDER};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

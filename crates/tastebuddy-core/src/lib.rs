//! Canonical records and application configuration shared by every
//! TasteBuddy crate.

pub mod app_config;
pub mod config;
pub mod discount;
pub mod market;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use discount::Discount;
pub use market::{Coordinates, Market, MarketLocation};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

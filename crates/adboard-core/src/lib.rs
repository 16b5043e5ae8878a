pub mod app_config;
pub mod config;
pub mod date_range;
pub mod entities;
pub mod lenient;
pub mod metrics;
pub mod platform;

pub use app_config::{AppConfig, Environment, LocalConfig};
pub use config::{load_app_config, load_app_config_from_env, load_local_config};
pub use date_range::{DatePreset, DateRange, DateWindow};
pub use entities::{
    AdCreative, GoogleAd, GoogleAdGroup, GoogleCampaign, Identified, MetaAd, MetaAdSet,
    MetaCampaign, ShopifyCustomer, ShopifyOrder, ShopifyProduct, ShopifyVariant,
};
pub use metrics::{DailyChartPoint, InsightMetrics};
pub use platform::{Platform, PlatformConnection, PlatformStatus};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("unknown date preset: {0}")]
    UnknownDatePreset(String),
}

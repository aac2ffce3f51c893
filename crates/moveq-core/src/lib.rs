pub mod app_config;
pub mod config;
pub mod distance;
pub mod pricing;
pub mod quote;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use distance::{parse_distance_miles, DistanceRecord, DistanceUnit, MAX_DISTANCE_MILES};
pub use pricing::{round_money, PricingPolicy};
pub use quote::{
    LineItem, MoveSize, Quote, QuoteRequest, ServiceType, SpecialtyItem,
    DEFAULT_SHIPMENT_WEIGHT_LBS, MAX_SHIPMENT_WEIGHT_LBS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

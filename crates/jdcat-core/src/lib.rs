//! Domain types and configuration shared by the `jdcat` crates.

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod error;

pub use app_config::{AppConfig, Environment};
pub use catalog::{PhotoSet, PriceQuote, ProductInfo, SearchHit, SearchResult};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;

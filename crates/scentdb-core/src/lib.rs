pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod price;
pub mod product;
pub mod seed;
pub mod wishlist;

pub use app_config::{AppConfig, Environment};
pub use cart::{Cart, CartItem};
pub use catalog::{available_brands, available_scent_families, best_sellers, CatalogFilter, SortKey};
pub use config::{load_app_config, load_app_config_from_env};
pub use price::format_price;
pub use product::{Gender, Notes, Product, ScentFamily, SizeTier};
pub use seed::{load_seed_config, validate_seed_config, SeedConfig};
pub use wishlist::Wishlist;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid scent family: {0}")]
    InvalidScentFamily(String),
    #[error("invalid gender: {0}")]
    InvalidGender(String),
    #[error("invalid sort key: {0}")]
    InvalidSortKey(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read seed config {path}: {source}")]
    SeedFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed config: {0}")]
    SeedFileParse(#[from] serde_yaml::Error),

    #[error("seed config validation failed: {0}")]
    Validation(String),
}

//! Domain logic for the skuforge catalog service.
//!
//! Everything in this crate is pure: submission types and their validator,
//! the variant combination generator, price/stock derivation, SKU and slug
//! generation, and the configuration loaders. Persistence lives in
//! `skuforge-db`, HTTP in `skuforge-server`.

use thiserror::Error;

pub mod app_config;
pub mod catalog;
pub mod combine;
pub mod config;
pub mod pricing;
pub mod product;
pub mod sku;
pub mod slug;
pub mod validate;

pub use app_config::{AppConfig, Environment};
pub use combine::{cartesian_product, combination_count};
pub use config::{load_app_config, load_app_config_from_env};
pub use pricing::{final_price, final_stock};
pub use product::{NewProduct, ProductStatus, ProductSubmission};
pub use sku::SkuGenerator;
pub use slug::slugify;
pub use validate::{validate_submission, FieldViolation, ValidationErrors};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}

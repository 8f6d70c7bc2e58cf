use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env
/// vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are
/// invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are
/// invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = require("DATABASE_URL")?;

    let env = parse_environment(&or_default("SKUFORGE_ENV", "development"))?;

    let bind_addr = parse_addr("SKUFORGE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SKUFORGE_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default("SKUFORGE_CATALOG_PATH", "./config/catalog.yaml"));

    let db_max_connections = parse_u32("SKUFORGE_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("SKUFORGE_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("SKUFORGE_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let max_variants_per_product = parse_u64("SKUFORGE_MAX_VARIANTS_PER_PRODUCT", "500")?;
    if max_variants_per_product == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SKUFORGE_MAX_VARIANTS_PER_PRODUCT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let media_base_url = lookup("SKUFORGE_MEDIA_BASE_URL").ok();
    let media_api_key = lookup("SKUFORGE_MEDIA_API_KEY").ok();
    let media_upload_folder = or_default("SKUFORGE_MEDIA_UPLOAD_FOLDER", "products");
    let media_request_timeout_secs = parse_u64("SKUFORGE_MEDIA_REQUEST_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        catalog_path,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        max_variants_per_product,
        media_base_url,
        media_api_key,
        media_upload_folder,
        media_request_timeout_secs,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SKUFORGE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

//! Offline unit tests for skuforge-db pool configuration and row types.
//! These tests do not require a live database connection.

use skuforge_core::{AppConfig, Environment};
use skuforge_db::{PoolConfig, ProductSummaryRow, ProductVariantRow};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        catalog_path: PathBuf::from("./config/catalog.yaml"),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        max_variants_per_product: 500,
        media_base_url: None,
        media_api_key: None,
        media_upload_folder: "products".to_string(),
        media_request_timeout_secs: 30,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn pool_config_default_is_sensible() {
    let pool_config = PoolConfig::default();
    assert!(pool_config.max_connections >= pool_config.min_connections);
    assert!(pool_config.acquire_timeout_secs > 0);
}

/// Compile-time smoke test: confirm that [`ProductSummaryRow`] has all
/// expected fields with the correct types. No database required.
#[test]
fn product_summary_row_has_expected_fields() {
    use chrono::Utc;
    use rust_decimal::Decimal;

    let row = ProductSummaryRow {
        id: 42_i64,
        name: "Photon X2".to_string(),
        slug: "photon-x2".to_string(),
        status: "draft".to_string(),
        base_price: Decimal::new(99_900, 2),
        variant_count: 4_i64,
        created_at: Utc::now(),
    };

    assert_eq!(row.id, 42);
    assert_eq!(row.slug, "photon-x2");
    assert_eq!(row.status, "draft");
    assert_eq!(row.variant_count, 4);
}

/// Compile-time smoke test: confirm that [`ProductVariantRow`] has all
/// expected fields with the correct types. No database required.
#[test]
fn product_variant_row_has_expected_fields() {
    use rust_decimal::Decimal;
    use serde_json::json;

    let row = ProductVariantRow {
        id: 1_i64,
        product_id: 42_i64,
        sku: "P42-128GB-BLA".to_string(),
        variant_option_ids: json!([7, 9]),
        color_variant_id: Some(3_i64),
        final_price: Decimal::new(99_900, 2),
        stock: 7_i32,
    };

    assert_eq!(row.product_id, 42);
    assert_eq!(row.sku, "P42-128GB-BLA");
    assert_eq!(row.variant_option_ids, json!([7, 9]));
    assert_eq!(row.color_variant_id, Some(3));
    assert_eq!(row.stock, 7);
}

//! Product routes: the orchestrated create, the admin listing, and the
//! full-detail read-back.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use skuforge_core::validate_submission;
use skuforge_core::ProductSubmission;

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(super) struct CreatedProductBody {
    id: i64,
    slug: String,
    variant_count: usize,
}

#[derive(Debug, Serialize)]
pub(super) struct ProductSummaryItem {
    id: i64,
    name: String,
    slug: String,
    status: String,
    base_price: Decimal,
    variant_count: i64,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(super) struct ProductDetailBody {
    id: i64,
    name: String,
    slug: String,
    description: String,
    category_id: i64,
    subcategory_id: Option<i64>,
    brand_id: Option<i64>,
    base_price: Decimal,
    crossing_price: Option<Decimal>,
    images: Value,
    specifications: Option<Value>,
    status: String,
    scheduled_at: Option<DateTime<Utc>>,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    variant_types: Vec<VariantTypeBody>,
    color_variants: Vec<ColorVariantBody>,
    variants: Vec<VariantBody>,
}

#[derive(Debug, Serialize)]
pub(super) struct VariantTypeBody {
    id: i64,
    type_name: String,
    options: Vec<VariantOptionBody>,
}

#[derive(Debug, Serialize)]
pub(super) struct VariantOptionBody {
    id: i64,
    name: String,
    price_adjustment: Decimal,
    stock: i32,
}

#[derive(Debug, Serialize)]
pub(super) struct ColorVariantBody {
    id: i64,
    color_name: String,
    color_code: Option<String>,
    images: Value,
    stock: i32,
}

#[derive(Debug, Serialize)]
pub(super) struct VariantBody {
    id: i64,
    sku: String,
    variant_option_ids: Value,
    color_variant_id: Option<i64>,
    final_price: Decimal,
    stock: i32,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductListQuery {
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/products — validate a submission and persist it with its
/// full variant cross-product.
pub(super) async fn create_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ProductSubmission>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedProductBody>>), ApiError> {
    let product = validate_submission(&body).map_err(|errors| {
        ApiError::new(
            req_id.0.clone(),
            "validation_error",
            errors.to_string(),
        )
        .with_details(serde_json::to_value(&errors.violations).ok())
    })?;

    let created =
        skuforge_db::create_product(&state.pool, &product, state.max_variants_per_product)
            .await
            .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(
        product_id = created.id,
        slug = %created.slug,
        variants = created.variant_count,
        "product created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: CreatedProductBody {
                id: created.id,
                slug: created.slug,
                variant_count: created.variant_count,
            },
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// GET /api/v1/products — newest products with their variant counts.
pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ApiResponse<Vec<ProductSummaryItem>>>, ApiError> {
    let rows = skuforge_db::list_products(&state.pool, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| ProductSummaryItem {
            id: row.id,
            name: row.name,
            slug: row.slug,
            status: row.status,
            base_price: row.base_price,
            variant_count: row.variant_count,
            created_at: row.created_at,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/products/{product_id} — one product with its axes, colors,
/// and materialized variants.
pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product_id): Path<i64>,
) -> Result<Json<ApiResponse<ProductDetailBody>>, ApiError> {
    let detail = skuforge_db::get_product_detail(&state.pool, product_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "product not found"))?;

    let variant_types = detail
        .axes
        .into_iter()
        .map(|axis| VariantTypeBody {
            id: axis.variant_type.id,
            type_name: axis.variant_type.type_name,
            options: axis
                .options
                .into_iter()
                .map(|option| VariantOptionBody {
                    id: option.id,
                    name: option.name,
                    price_adjustment: option.price_adjustment,
                    stock: option.stock,
                })
                .collect(),
        })
        .collect();

    let color_variants = detail
        .color_variants
        .into_iter()
        .map(|color| ColorVariantBody {
            id: color.id,
            color_name: color.color_name,
            color_code: color.color_code,
            images: color.images,
            stock: color.stock,
        })
        .collect();

    let variants = detail
        .variants
        .into_iter()
        .map(|variant| VariantBody {
            id: variant.id,
            sku: variant.sku,
            variant_option_ids: variant.variant_option_ids,
            color_variant_id: variant.color_variant_id,
            final_price: variant.final_price,
            stock: variant.stock,
        })
        .collect();

    let product = detail.product;
    Ok(Json(ApiResponse {
        data: ProductDetailBody {
            id: product.id,
            name: product.name,
            slug: product.slug,
            description: product.description,
            category_id: product.category_id,
            subcategory_id: product.subcategory_id,
            brand_id: product.brand_id,
            base_price: product.base_price,
            crossing_price: product.crossing_price,
            images: product.images,
            specifications: product.specifications,
            status: product.status,
            scheduled_at: product.scheduled_at,
            published_at: product.published_at,
            created_at: product.created_at,
            updated_at: product.updated_at,
            variant_types,
            color_variants,
            variants,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

//! Reference catalog routes: categories, per-category subcategories, and
//! brands. All read-only; rows come from the seeded catalog.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct CategoryItem {
    id: i64,
    name: String,
    slug: String,
}

#[derive(Debug, Serialize)]
pub(super) struct SubcategoryItem {
    id: i64,
    category_id: i64,
    name: String,
    slug: String,
}

#[derive(Debug, Serialize)]
pub(super) struct BrandItem {
    id: i64,
    name: String,
    slug: String,
    logo_url: Option<String>,
}

/// GET /api/v1/categories
pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<CategoryItem>>>, ApiError> {
    let rows = skuforge_db::list_categories(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| CategoryItem {
            id: row.id,
            name: row.name,
            slug: row.slug,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/categories/{category_id}/subcategories
pub(super) async fn list_subcategories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(category_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<SubcategoryItem>>>, ApiError> {
    let rows = skuforge_db::list_subcategories(&state.pool, category_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| SubcategoryItem {
            id: row.id,
            category_id: row.category_id,
            name: row.name,
            slug: row.slug,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/brands
pub(super) async fn list_brands(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<BrandItem>>>, ApiError> {
    let rows = skuforge_db::list_brands(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| BrandItem {
            id: row.id,
            name: row.name,
            slug: row.slug,
            logo_url: row.logo_url,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

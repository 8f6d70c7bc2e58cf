mod catalog;
mod media;
mod products;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::{
    enforce_rate_limit, request_id, require_bearer_auth, AuthState, RateLimitState, RequestId,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub max_variants_per_product: u64,
    pub media: Option<Arc<skuforge_media::MediaClient>>,
    pub media_upload_folder: String,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
                details: None,
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    /// Attaches a structured payload, e.g. the per-field violation list of a
    /// failed validation.
    #[must_use]
    pub fn with_details(mut self, details: Option<serde_json::Value>) -> Self {
        self.error.details = details;
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" | "combination_limit" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "media_unconfigured" => StatusCode::SERVICE_UNAVAILABLE,
            "media_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn normalize_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(50).clamp(1, 200)
}

pub(super) fn map_db_error(request_id: String, error: &skuforge_db::DbError) -> ApiError {
    match error {
        skuforge_db::DbError::NotFound => {
            ApiError::new(request_id, "not_found", "resource not found")
        }
        skuforge_db::DbError::TooManyVariants { .. } => {
            ApiError::new(request_id, "combination_limit", error.to_string())
        }
        skuforge_db::DbError::UniqueViolation { .. } => ApiError::new(
            request_id,
            "conflict",
            "a product with a conflicting slug or sku already exists",
        ),
        _ => {
            tracing::error!(error = %error, "database query failed");
            ApiError::new(request_id, "internal_error", "database query failed")
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState, rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/v1/products/{product_id}",
            get(products::get_product),
        )
        .route("/api/v1/categories", get(catalog::list_categories))
        .route(
            "/api/v1/categories/{category_id}/subcategories",
            get(catalog::list_subcategories),
        )
        .route("/api/v1/brands", get(catalog::list_brands))
        .route("/api/v1/media/images", post(media::upload_images))
        .route(
            "/api/v1/media/images/{file_id}",
            delete(media::delete_image),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    rate_limit,
                    enforce_rate_limit,
                ))
                .layer(axum::middleware::from_fn_with_state(
                    auth,
                    require_bearer_auth,
                )),
        )
}

pub fn build_app(state: AppState, auth: AuthState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(auth, rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    match skuforge_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    database: "ok",
                },
                meta,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        database: "unavailable",
                    },
                    meta,
                }),
            )
        }
    }
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_state(pool: PgPool) -> AppState {
        AppState {
            pool,
            max_variants_per_product: 500,
            media: None,
            media_upload_folder: "products".to_string(),
        }
    }

    fn test_app(state: AppState) -> Router {
        let auth = AuthState::from_env(true).expect("auth");
        build_app(state, auth, default_rate_limit_state())
    }

    async fn seed_category(pool: &PgPool) -> i64 {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO categories (name, slug) VALUES ('Smartphones', 'smartphones') RETURNING id",
        )
        .fetch_one(pool)
        .await
        .expect("seed category")
    }

    fn phone_payload(category_id: i64) -> serde_json::Value {
        serde_json::json!({
            "name": "Photon X2",
            "description": "Flagship phone with modular storage options.",
            "category_id": category_id,
            "base_price": "999.00",
            "variant_types": [
                {
                    "type_name": "Storage",
                    "options": [
                        { "name": "128GB", "price_adjustment": "0", "stock": 10 },
                        { "name": "256GB", "price_adjustment": "100.00", "stock": 5 }
                    ]
                }
            ],
            "color_variants": [
                {
                    "color_name": "Black",
                    "color_code": "#000000",
                    "images": ["https://cdn.example.com/black.jpg"],
                    "stock": 7
                },
                {
                    "color_name": "Blue",
                    "color_code": "#0000FF",
                    "images": ["https://cdn.example.com/blue.jpg"],
                    "stock": 3
                }
            ],
            "images": ["https://cdn.example.com/hero.jpg"],
            "status": "draft"
        })
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json parse")
    }

    // -------------------------------------------------------------------------
    // Envelope and error mapping — unit tests (no DB)
    // -------------------------------------------------------------------------

    #[test]
    fn normalize_limit_applies_defaults_and_bounds() {
        assert_eq!(normalize_limit(None), 50);
        assert_eq!(normalize_limit(Some(0)), 1);
        assert_eq!(normalize_limit(Some(1_000)), 200);
        assert_eq!(normalize_limit(Some(25)), 25);
    }

    #[test]
    fn api_error_codes_map_to_expected_statuses() {
        let cases = [
            ("validation_error", StatusCode::BAD_REQUEST),
            ("combination_limit", StatusCode::BAD_REQUEST),
            ("conflict", StatusCode::CONFLICT),
            ("not_found", StatusCode::NOT_FOUND),
            ("rate_limited", StatusCode::TOO_MANY_REQUESTS),
            ("media_unconfigured", StatusCode::SERVICE_UNAVAILABLE),
            ("media_error", StatusCode::BAD_GATEWAY),
            ("internal_error", StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (code, status) in cases {
            let response = ApiError::new("req-1", code, "boom").into_response();
            assert_eq!(response.status(), status, "wrong status for code '{code}'");
        }
    }

    #[test]
    fn error_body_omits_details_when_absent() {
        let error = ApiError::new("req-1", "validation_error", "invalid input");
        let json = serde_json::to_string(&error).expect("serialize");
        assert!(!json.contains("details"));
    }

    #[test]
    fn error_body_includes_details_when_present() {
        let error = ApiError::new("req-1", "validation_error", "invalid input").with_details(
            Some(serde_json::json!([{ "field": "name", "message": "too short" }])),
        );
        let json = serde_json::to_value(&error).expect("serialize");
        assert_eq!(json["error"]["details"][0]["field"], "name");
    }

    #[test]
    fn map_db_error_translates_unique_violations_to_conflict() {
        let error = skuforge_db::DbError::UniqueViolation {
            constraint: "product_variants_sku_key".to_string(),
        };
        let mapped = map_db_error("req-1".to_string(), &error);
        assert_eq!(mapped.error.code, "conflict");
    }

    #[test]
    fn map_db_error_translates_variant_ceiling() {
        let error = skuforge_db::DbError::TooManyVariants {
            requested: 12,
            limit: 10,
        };
        let mapped = map_db_error("req-1".to_string(), &error);
        assert_eq!(mapped.error.code, "combination_limit");
        assert!(mapped.error.message.contains("12"));
        assert!(mapped.error.message.contains("10"));
    }

    // -------------------------------------------------------------------------
    // Product routes — integration tests (with DB)
    // -------------------------------------------------------------------------

    #[sqlx::test(migrations = "../../migrations")]
    async fn create_product_returns_created_summary(pool: PgPool) {
        let category_id = seed_category(&pool).await;
        let app = test_app(test_state(pool));

        let response = app
            .oneshot(post_json("/api/v1/products", &phone_payload(category_id)))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["data"]["slug"], "photon-x2");
        assert_eq!(json["data"]["variant_count"], 4);
        assert!(json["data"]["id"].as_i64().is_some());
        assert!(json["meta"]["request_id"].as_str().is_some());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn created_product_is_readable_with_full_detail(pool: PgPool) {
        let category_id = seed_category(&pool).await;
        let app = test_app(test_state(pool));

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/products", &phone_payload(category_id)))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = body_json(response).await["data"]["id"]
            .as_i64()
            .expect("created id");

        let response = app
            .oneshot(get_request(&format!("/api/v1/products/{id}")))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;

        assert_eq!(json["data"]["name"], "Photon X2");
        assert_eq!(json["data"]["status"], "draft");
        assert_eq!(json["data"]["variant_types"][0]["type_name"], "Storage");
        assert_eq!(
            json["data"]["variant_types"][0]["options"]
                .as_array()
                .map(Vec::len),
            Some(2)
        );
        assert_eq!(
            json["data"]["color_variants"].as_array().map(Vec::len),
            Some(2)
        );

        let variants = json["data"]["variants"].as_array().expect("variants");
        assert_eq!(variants.len(), 4);
        let sku = format!("P{id}-256GB-BLA");
        let row = variants
            .iter()
            .find(|v| v["sku"] == sku.as_str())
            .expect("256GB Black variant");
        assert_eq!(row["final_price"], "1099.00");
        assert_eq!(row["stock"], 5);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn create_product_returns_all_violations(pool: PgPool) {
        let category_id = seed_category(&pool).await;
        let mut payload = phone_payload(category_id);
        payload["name"] = serde_json::json!("ab");
        payload["base_price"] = serde_json::json!("-5");
        payload["images"] = serde_json::json!([]);

        let app = test_app(test_state(pool.clone()));
        let response = app
            .oneshot(post_json("/api/v1/products", &payload))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "validation_error");
        let details = json["error"]["details"].as_array().expect("details array");
        let fields: Vec<&str> = details.iter().filter_map(|d| d["field"].as_str()).collect();
        assert_eq!(fields.len(), 3, "got violations for: {fields:?}");
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"base_price"));
        assert!(fields.contains(&"images"));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!(count, 0, "rejected submissions must write nothing");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn create_product_enforces_combination_ceiling(pool: PgPool) {
        let category_id = seed_category(&pool).await;
        let state = AppState {
            pool: pool.clone(),
            max_variants_per_product: 3,
            media: None,
            media_upload_folder: "products".to_string(),
        };
        let app = test_app(state);

        let response = app
            .oneshot(post_json("/api/v1/products", &phone_payload(category_id)))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "combination_limit");
        assert!(json["error"]["message"]
            .as_str()
            .expect("message")
            .contains("limit of 3"));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!(count, 0);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn sku_race_between_submissions_is_a_conflict(pool: PgPool) {
        let category_id = seed_category(&pool).await;
        let app = test_app(test_state(pool.clone()));

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/products", &phone_payload(category_id)))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::CREATED);
        let first_id = body_json(response).await["data"]["id"]
            .as_i64()
            .expect("created id");

        // Product ids come from a fresh sequence, so the next submission
        // gets first_id + 1. Claim one of its SKUs up front to stand in
        // for a racing submission.
        sqlx::query(
            "INSERT INTO product_variants \
               (product_id, sku, variant_option_ids, final_price, stock) \
             VALUES ($1, $2, '[]'::jsonb, 1, 0)",
        )
        .bind(first_id)
        .bind(format!("P{}-128GB-BLA", first_id + 1))
        .execute(&pool)
        .await
        .expect("staging the conflicting sku failed");

        let response = app
            .oneshot(post_json("/api/v1/products", &phone_payload(category_id)))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "conflict");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!(count, 1, "conflicting submission must roll back fully");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn create_product_with_unknown_category_is_internal_error(pool: PgPool) {
        let app = test_app(test_state(pool));

        let response = app
            .oneshot(post_json("/api/v1/products", &phone_payload(4242)))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "internal_error");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn get_product_returns_404_for_unknown_id(pool: PgPool) {
        let app = test_app(test_state(pool));
        let response = app
            .oneshot(get_request("/api/v1/products/999999"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn list_products_includes_variant_counts(pool: PgPool) {
        let category_id = seed_category(&pool).await;
        let app = test_app(test_state(pool));

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/products", &phone_payload(category_id)))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(get_request("/api/v1/products?limit=10"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let data = json["data"].as_array().expect("data array");
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["slug"], "photon-x2");
        assert_eq!(data[0]["variant_count"], 4);
    }

    // -------------------------------------------------------------------------
    // Catalog and health routes
    // -------------------------------------------------------------------------

    #[sqlx::test(migrations = "../../migrations")]
    async fn catalog_routes_return_seeded_reference_data(pool: PgPool) {
        let catalog = skuforge_core::catalog::CatalogFile {
            categories: vec![skuforge_core::catalog::CategoryConfig {
                name: "Audio".into(),
                subcategories: vec!["Headphones".into()],
            }],
            brands: vec![skuforge_core::catalog::BrandConfig {
                name: "Sony".into(),
                logo_url: None,
            }],
        };
        skuforge_db::seed_catalog(&pool, &catalog).await.expect("seed");

        let app = test_app(test_state(pool));

        let response = app
            .clone()
            .oneshot(get_request("/api/v1/categories"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let data = json["data"].as_array().expect("data array");
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["slug"], "audio");
        let category_id = data[0]["id"].as_i64().expect("category id");

        let response = app
            .clone()
            .oneshot(get_request(&format!(
                "/api/v1/categories/{category_id}/subcategories"
            )))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"][0]["slug"], "headphones");

        let response = app
            .oneshot(get_request("/api/v1/brands"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"][0]["slug"], "sony");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn health_reports_database_ok(pool: PgPool) {
        let app = test_app(test_state(pool));
        let response = app
            .oneshot(get_request("/api/v1/health"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["database"], "ok");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn rate_limit_answers_429_past_the_window_budget(pool: PgPool) {
        let auth = AuthState::from_env(true).expect("auth");
        let app = build_app(
            test_state(pool),
            auth,
            RateLimitState::new(1, Duration::from_secs(60)),
        );

        let first = app
            .clone()
            .oneshot(get_request("/api/v1/categories"))
            .await
            .expect("response");
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(get_request("/api/v1/categories"))
            .await
            .expect("response");
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn rate_limit_budgets_are_tracked_per_bearer_token(pool: PgPool) {
        let auth = AuthState::from_env(true).expect("auth");
        let app = build_app(
            test_state(pool),
            auth,
            RateLimitState::new(1, Duration::from_secs(60)),
        );

        let with_token = |token: &str| {
            Request::builder()
                .uri("/api/v1/categories")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .expect("request")
        };

        let first = app
            .clone()
            .oneshot(with_token("client-a"))
            .await
            .expect("response");
        assert_eq!(first.status(), StatusCode::OK);

        // A different token draws from its own budget.
        let other = app
            .clone()
            .oneshot(with_token("client-b"))
            .await
            .expect("response");
        assert_eq!(other.status(), StatusCode::OK);

        let second = app.oneshot(with_token("client-a")).await.expect("response");
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    // -------------------------------------------------------------------------
    // Media routes
    // -------------------------------------------------------------------------

    #[sqlx::test(migrations = "../../migrations")]
    async fn media_upload_without_credentials_is_503(pool: PgPool) {
        let app = test_app(test_state(pool));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/media/images")
                    .header(header::CONTENT_TYPE, "multipart/form-data; boundary=x")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "media_unconfigured");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn media_upload_proxies_to_cdn(pool: PgPool) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/files/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&serde_json::json!({
                "url": "https://ik.example.com/products/hero_abc.jpg",
                "fileId": "abc123",
                "name": "hero_abc.jpg",
                "size": 16,
                "filePath": "/products/hero_abc.jpg"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let media =
            skuforge_media::MediaClient::new(&server.uri(), "key", 5).expect("media client");
        let state = AppState {
            pool,
            max_variants_per_product: 500,
            media: Some(Arc::new(media)),
            media_upload_folder: "products".to_string(),
        };
        let app = test_app(state);

        let boundary = "XBOUNDARYX";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"hero.jpg\"\r\n\
             Content-Type: image/jpeg\r\n\r\n\
             fake image bytes\r\n\
             --{boundary}--\r\n"
        );
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/media/images")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["data"][0]["file_id"], "abc123");
        assert_eq!(
            json["data"][0]["url"],
            "https://ik.example.com/products/hero_abc.jpg"
        );
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn media_delete_calls_cdn_and_confirms(pool: PgPool) {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/files/abc123"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let media =
            skuforge_media::MediaClient::new(&server.uri(), "key", 5).expect("media client");
        let state = AppState {
            pool,
            max_variants_per_product: 500,
            media: Some(Arc::new(media)),
            media_upload_folder: "products".to_string(),
        };
        let app = test_app(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/media/images/abc123")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["deleted"], true);
    }
}

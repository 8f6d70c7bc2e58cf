//! Media proxy routes: multipart upload to the image CDN and deletion by
//! file id. The CDN client is optional; without credentials these routes
//! answer 503 so the rest of the admin API keeps working.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct UploadedImageBody {
    url: String,
    file_id: String,
    name: String,
    size: u64,
    file_path: String,
}

#[derive(Debug, Serialize)]
pub(super) struct DeletedImageBody {
    deleted: bool,
    file_id: String,
}

fn require_media(
    state: &AppState,
    req_id: &str,
) -> Result<Arc<skuforge_media::MediaClient>, ApiError> {
    state.media.clone().ok_or_else(|| {
        ApiError::new(
            req_id,
            "media_unconfigured",
            "media credentials are not configured on this server",
        )
    })
}

fn map_media_error(req_id: String, error: &skuforge_media::MediaError) -> ApiError {
    tracing::warn!(error = %error, "media service call failed");
    ApiError::new(req_id, "media_error", error.to_string())
}

/// POST /api/v1/media/images — upload every file part to the CDN and hand
/// back the stored URLs and file ids.
pub(super) async fn upload_images(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<Vec<UploadedImageBody>>>), ApiError> {
    let media = require_media(&state, &req_id.0)?;

    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(ApiError::new(
                    req_id.0.clone(),
                    "bad_request",
                    format!("malformed multipart body: {e}"),
                ));
            }
        };

        let file_name = field
            .file_name()
            .map_or_else(|| "upload".to_string(), ToOwned::to_owned);
        let bytes = field.bytes().await.map_err(|e| {
            ApiError::new(
                req_id.0.clone(),
                "bad_request",
                format!("failed to read file part '{file_name}': {e}"),
            )
        })?;
        files.push((file_name, bytes.to_vec()));
    }

    if files.is_empty() {
        return Err(ApiError::new(
            req_id.0.clone(),
            "validation_error",
            "at least one file part is required",
        ));
    }

    let uploaded = media
        .upload_many(files, &state.media_upload_folder)
        .await
        .map_err(|e| map_media_error(req_id.0.clone(), &e))?;

    let data = uploaded
        .into_iter()
        .map(|image| UploadedImageBody {
            url: image.url,
            file_id: image.file_id,
            name: image.name,
            size: image.size,
            file_path: image.file_path,
        })
        .collect();

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data,
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// DELETE /api/v1/media/images/{file_id} — revoke a previously uploaded
/// file by the id returned at upload time.
pub(super) async fn delete_image(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(file_id): Path<String>,
) -> Result<Json<ApiResponse<DeletedImageBody>>, ApiError> {
    let media = require_media(&state, &req_id.0)?;

    media
        .delete(&file_id)
        .await
        .map_err(|e| map_media_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: DeletedImageBody {
            deleted: true,
            file_id,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

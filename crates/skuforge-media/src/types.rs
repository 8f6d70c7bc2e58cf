//! Media service response types.

use serde::Deserialize;

/// A stored file as returned by the upload endpoint.
///
/// `url` is the public CDN URL; `file_id` is the handle later passed to
/// [`crate::MediaClient::delete`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub url: String,
    pub file_id: String,
    pub name: String,
    pub size: u64,
    pub file_path: String,
}

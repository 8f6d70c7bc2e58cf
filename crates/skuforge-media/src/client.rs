//! HTTP client for the image CDN that stores product and variant media.
//!
//! Wraps `reqwest` with basic-auth key handling, multipart uploads, and
//! typed response deserialization. Error responses are parsed for the
//! service's `"message"` field and surfaced as [`MediaError::Api`].

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};

use crate::error::MediaError;
use crate::types::UploadedImage;

/// Client for the media service REST API.
///
/// Manages the HTTP client, API key, and base URL. The base URL comes from
/// configuration, so tests can point the client at a mock server.
#[derive(Debug)]
pub struct MediaClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl MediaClient {
    /// Creates a new client for the media service at `base_url`.
    ///
    /// The API key is sent as the basic-auth username with an empty
    /// password on every request.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`MediaError::InvalidBaseUrl`] if
    /// `base_url` does not parse as an HTTP base.
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self, MediaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("skuforge/0.1 (catalog-admin)")
            .build()?;

        // Normalise: keep exactly one trailing slash so appended path
        // segments land under the base rather than replacing its last
        // segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| MediaError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(MediaError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "not a hierarchical URL".to_string(),
            });
        }

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: parsed,
        })
    }

    /// Uploads one file and returns the stored image's metadata.
    ///
    /// Posts a multipart form to the `files/upload` endpoint with the
    /// `file`, `fileName`, `folder`, and `useUniqueFileName` fields, so
    /// repeated uploads of the same name never overwrite each other.
    ///
    /// # Errors
    ///
    /// - [`MediaError::Api`] if the service answers with a non-2xx status.
    /// - [`MediaError::Http`] on network failure.
    /// - [`MediaError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        folder: &str,
    ) -> Result<UploadedImage, MediaError> {
        tracing::debug!(file_name, folder, size = bytes.len(), "uploading media file");

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_owned()))
            .text("fileName", file_name.to_owned())
            .text("folder", folder.to_owned())
            .text("useUniqueFileName", "true");

        let response = self
            .client
            .post(self.endpoint(&["files", "upload"]))
            .basic_auth(&self.api_key, None::<&str>)
            .multipart(form)
            .send()
            .await?;
        let body = Self::check_status(response).await?;

        serde_json::from_str(&body).map_err(|e| MediaError::Deserialize {
            context: format!("upload({file_name})"),
            source: e,
        })
    }

    /// Uploads several files concurrently, preserving input order in the
    /// result.
    ///
    /// Fails fast: the first failed upload aborts the rest, and files
    /// already stored by then are not rolled back.
    ///
    /// # Errors
    ///
    /// Same as [`MediaClient::upload`], for the first file that fails.
    pub async fn upload_many(
        &self,
        files: Vec<(String, Vec<u8>)>,
        folder: &str,
    ) -> Result<Vec<UploadedImage>, MediaError> {
        let uploads = files
            .into_iter()
            .map(|(file_name, bytes)| async move { self.upload(&file_name, bytes, folder).await });
        futures::future::try_join_all(uploads).await
    }

    /// Deletes a stored file by the `file_id` returned at upload time.
    ///
    /// # Errors
    ///
    /// - [`MediaError::Api`] if the service answers with a non-2xx status
    ///   (including 404 for an unknown id).
    /// - [`MediaError::Http`] on network failure.
    pub async fn delete(&self, file_id: &str) -> Result<(), MediaError> {
        tracing::debug!(file_id, "deleting media file");

        let response = self
            .client
            .delete(self.endpoint(&["files", file_id]))
            .basic_auth(&self.api_key, None::<&str>)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Builds the full request URL by appending percent-encoded path
    /// segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // The constructor rejects cannot-be-a-base URLs, so this always
        // takes the Ok branch.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Asserts a 2xx status and hands back the body text; on failure,
    /// extracts the service's `"message"` field when the body carries one.
    async fn check_status(response: Response) -> Result<String, MediaError> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            return Ok(body);
        }

        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| "unknown error".to_string());
        Err(MediaError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

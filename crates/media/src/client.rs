//! HTTP implementation of [`MediaStore`] using [`reqwest`].

use crate::store::{MediaKind, MediaStore, MediaStoreError, MediaUpload};

/// Thumbnail dimensions requested from the media host.
const THUMB_WIDTH: u32 = 300;
const THUMB_HEIGHT: u32 = 200;

/// Connection settings for the media host.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Base HTTP URL, e.g. `https://media.example.com/api`.
    pub base_url: String,
    /// Bearer token authenticating this application.
    pub api_key: String,
}

impl MediaConfig {
    /// Load media host configuration from environment variables.
    ///
    /// | Env Var          | Required |
    /// |------------------|----------|
    /// | `MEDIA_BASE_URL` | **yes**  |
    /// | `MEDIA_API_KEY`  | **yes**  |
    ///
    /// # Panics
    ///
    /// Panics if either variable is missing.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("MEDIA_BASE_URL").expect("MEDIA_BASE_URL must be set in the environment");
        let api_key =
            std::env::var("MEDIA_API_KEY").expect("MEDIA_API_KEY must be set in the environment");
        Self { base_url, api_key }
    }
}

/// HTTP client for the media host.
pub struct HttpMediaStore {
    client: reqwest::Client,
    config: MediaConfig,
}

impl HttpMediaStore {
    /// Create a client for the configured media host.
    pub fn new(config: MediaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling).
    pub fn with_client(client: reqwest::Client, config: MediaConfig) -> Self {
        Self { client, config }
    }

    /// Multipart upload to `{base}/{kind}/upload`.
    async fn upload(
        &self,
        kind: MediaKind,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<MediaUpload, MediaStoreError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!(
                "{}/{}/upload",
                self.config.base_url,
                kind.as_path()
            ))
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Deserialize a 2xx response body, or surface the error body.
    async fn parse_response(response: reqwest::Response) -> Result<MediaUpload, MediaStoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MediaStoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<MediaUpload>().await?)
    }

    /// Check a response for success, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), MediaStoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MediaStoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload_video(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<MediaUpload, MediaStoreError> {
        tracing::debug!(filename, "Uploading video to media host");
        self.upload(MediaKind::Video, filename, bytes).await
    }

    async fn upload_image(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<MediaUpload, MediaStoreError> {
        tracing::debug!(filename, "Uploading image to media host");
        self.upload(MediaKind::Image, filename, bytes).await
    }

    async fn derive_thumbnail(
        &self,
        video_public_id: &str,
    ) -> Result<MediaUpload, MediaStoreError> {
        let body = serde_json::json!({
            "width": THUMB_WIDTH,
            "height": THUMB_HEIGHT,
            "crop": "fill",
        });

        let response = self
            .client
            .post(format!(
                "{}/video/{}/thumbnail",
                self.config.base_url, video_public_id
            ))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn delete(&self, kind: MediaKind, public_id: &str) -> Result<(), MediaStoreError> {
        let response = self
            .client
            .delete(format!(
                "{}/{}/{}",
                self.config.base_url,
                kind.as_path(),
                public_id
            ))
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        Self::check_status(response).await
    }
}

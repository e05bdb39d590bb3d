//! The [`MediaStore`] trait and its data types.

use serde::Deserialize;

/// Asset class on the media host. Video and image objects live in
/// separate namespaces and must be deleted with the matching kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Image,
}

impl MediaKind {
    /// URL path segment for this asset class.
    pub fn as_path(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Image => "image",
        }
    }
}

/// A stored asset as reported by the media host.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaUpload {
    /// Stable public URL for serving the asset.
    pub url: String,
    /// Host-side identifier, required for deletion.
    pub public_id: String,
}

/// Errors from the media host.
#[derive(Debug, thiserror::Error)]
pub enum MediaStoreError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("media host request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The media host returned a non-2xx status code.
    #[error("media host error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Operations the catalog needs from the media host.
///
/// Implemented by [`HttpMediaStore`](crate::HttpMediaStore) in
/// production and by in-process mocks in the API integration tests.
#[async_trait::async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload a video file, returning its URL and public id.
    async fn upload_video(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<MediaUpload, MediaStoreError>;

    /// Upload an image file (thumbnails provided by users).
    async fn upload_image(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<MediaUpload, MediaStoreError>;

    /// Ask the host to derive a thumbnail image from an uploaded video.
    async fn derive_thumbnail(&self, video_public_id: &str)
        -> Result<MediaUpload, MediaStoreError>;

    /// Delete an asset by public id.
    async fn delete(&self, kind: MediaKind, public_id: &str) -> Result<(), MediaStoreError>;
}

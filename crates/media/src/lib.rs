//! Client for the external media host.
//!
//! The media host stores the binary video/image assets, serves them from
//! stable URLs, and derives thumbnail images from uploaded videos. This
//! crate wraps its HTTP API behind the [`MediaStore`] trait so the API
//! server can be exercised in tests without the external service.

pub mod client;
pub mod store;

pub use client::{HttpMediaStore, MediaConfig};
pub use store::{MediaKind, MediaStore, MediaStoreError, MediaUpload};

/// Derive a media-host public id from a stored asset URL.
///
/// Asset URLs end in `/{public_id}.{ext}`; the catalog stores only the
/// URL, so deletion re-derives the id from it.
pub fn public_id_from_url(url: &str) -> Option<&str> {
    let last = url.rsplit('/').next()?;
    let id = last.split('.').next()?;
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

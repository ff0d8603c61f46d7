use bytes::Bytes;
use uuid::Uuid;

use crate::utils::filename::{secure_filename, truncate_filename};

/// Prefix that maps an image blob name to its thumbnail blob name.
pub const THUMBNAIL_PREFIX: &str = "thumb_";

/// Longest blob name, in bytes. Filesystem blobs are single path components.
pub const MAX_BLOB_NAME_LEN: usize = 255;

/// Stored name for a freshly uploaded original: `{uuid}-{sanitized filename}`.
///
/// The filename part is shortened, extension kept, so that the thumbnail
/// name also fits in [`MAX_BLOB_NAME_LEN`].
pub fn image_blob_name(id: Uuid, original_filename: &str) -> String {
    let prefix = format!("{id}-");
    let budget = MAX_BLOB_NAME_LEN - THUMBNAIL_PREFIX.len() - prefix.len();
    format!(
        "{prefix}{}",
        truncate_filename(&secure_filename(original_filename), budget)
    )
}

/// Thumbnail blob name for an image blob name.
pub fn thumbnail_name(image_name: &str) -> String {
    format!("{THUMBNAIL_PREFIX}{image_name}")
}

/// MIME type for an original, derived from its extension.
///
/// `jpg` maps to `image/jpeg`; any other extension `ext` to `image/{ext}`.
/// A name without a dot is treated as all extension.
pub fn content_type_for(name: &str) -> String {
    let ext = name.rsplit('.').next().unwrap_or(name).to_lowercase();
    if ext == "jpg" {
        "image/jpeg".to_string()
    } else {
        format!("image/{ext}")
    }
}

/// One uploaded file as received from the client.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// Client-supplied filename, `None` when the `file` field was absent.
    pub filename: Option<String>,
    pub content: Bytes,
}

/// Why an upload was turned away without storing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadRejection {
    MissingFile,
    EmptyFilename,
    DisallowedExtension,
}

/// Names under which an accepted upload was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub name: String,
    pub thumbnail_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Stored(StoredImage),
    Rejected(UploadRejection),
}

/// A blob ready to be sent back to a client.
#[derive(Debug, Clone)]
pub struct BlobPayload {
    pub content_type: String,
    pub download_name: String,
    pub content: Vec<u8>,
}

//! Gallery operations, independent of the HTTP layer.
//!
//! Handlers translate requests into calls on [`GalleryService`] and its
//! results back into responses.

use std::sync::Arc;

use common::storage::BlobStore;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::config::GalleryConfig;
use crate::error::AppError;
use crate::models::image::{
    BlobPayload, StoredImage, UploadOutcome, UploadRejection, UploadRequest, content_type_for,
    image_blob_name, thumbnail_name,
};
use crate::thumbnail::{THUMBNAIL_CONTENT_TYPE, make_thumbnail};
use crate::utils::filename::has_allowed_extension;

#[derive(Clone)]
pub struct GalleryService {
    store: Arc<dyn BlobStore>,
    config: GalleryConfig,
}

impl GalleryService {
    pub fn new(store: Arc<dyn BlobStore>, config: GalleryConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    async fn ensure_containers(&self) -> Result<(), AppError> {
        self.store
            .ensure_container(&self.config.image_container)
            .await?;
        self.store
            .ensure_container(&self.config.thumbnail_container)
            .await?;
        Ok(())
    }

    /// Names of every stored original, in backend order.
    #[instrument(skip(self))]
    pub async fn list_images(&self) -> Result<Vec<String>, AppError> {
        self.ensure_containers().await?;
        Ok(self.store.list_blobs(&self.config.image_container).await?)
    }

    /// Validate, thumbnail and store an uploaded image.
    ///
    /// The thumbnail is generated before anything is written, so a file that
    /// fails to decode leaves storage untouched.
    #[instrument(skip(self, request), fields(filename = ?request.filename, size = request.content.len()))]
    pub async fn upload(&self, request: UploadRequest) -> Result<UploadOutcome, AppError> {
        let Some(filename) = request.filename else {
            debug!("Upload rejected: no file field");
            return Ok(UploadOutcome::Rejected(UploadRejection::MissingFile));
        };
        if filename.is_empty() {
            debug!("Upload rejected: empty filename");
            return Ok(UploadOutcome::Rejected(UploadRejection::EmptyFilename));
        }
        if !has_allowed_extension(&filename) {
            debug!("Upload rejected: extension not allowed");
            return Ok(UploadOutcome::Rejected(
                UploadRejection::DisallowedExtension,
            ));
        }

        self.ensure_containers().await?;

        let name = image_blob_name(Uuid::new_v4(), &filename);
        let content = request.content;

        let source = content.clone();
        let thumbnail = tokio::task::spawn_blocking(move || make_thumbnail(&source))
            .await
            .map_err(|e| AppError::Internal(format!("Thumbnail task failed: {e}")))??;
        let thumbnail_name = thumbnail_name(&name);

        self.store
            .put(&self.config.image_container, &name, &content)
            .await?;
        self.store
            .put(&self.config.thumbnail_container, &thumbnail_name, &thumbnail)
            .await?;

        info!(name = %name, thumbnail = %thumbnail_name, "Stored image");
        Ok(UploadOutcome::Stored(StoredImage {
            name,
            thumbnail_name,
        }))
    }

    /// Original bytes of a stored image.
    #[instrument(skip(self))]
    pub async fn fetch_original(&self, name: &str) -> Result<BlobPayload, AppError> {
        let content = self.store.get(&self.config.image_container, name).await?;
        Ok(BlobPayload {
            content_type: content_type_for(name),
            download_name: name.to_string(),
            content,
        })
    }

    /// Thumbnail bytes for the original named `name`.
    #[instrument(skip(self))]
    pub async fn fetch_thumbnail(&self, name: &str) -> Result<BlobPayload, AppError> {
        let thumb = thumbnail_name(name);
        let content = self
            .store
            .get(&self.config.thumbnail_container, &thumb)
            .await?;
        Ok(BlobPayload {
            content_type: THUMBNAIL_CONTENT_TYPE.to_string(),
            download_name: thumb,
            content,
        })
    }
}

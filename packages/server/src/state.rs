use std::sync::Arc;

use common::storage::BlobStore;

use crate::config::AppConfig;
use crate::gallery::GalleryService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub gallery: GalleryService,
}

impl AppState {
    pub fn new(config: AppConfig, blob_store: Arc<dyn BlobStore>) -> Self {
        let gallery = GalleryService::new(blob_store, config.gallery.clone());
        Self {
            config: Arc::new(config),
            gallery,
        }
    }
}

mod error;
mod name;
mod traits;

pub mod filesystem;
#[cfg(feature = "object-storage")]
pub mod s3_store;

use std::sync::Arc;

pub use error::StorageError;
pub use name::validate_name;
pub use traits::BlobStore;

use crate::config::{StorageBackend, StorageConfig};

/// Build the blob store selected by `config.backend`.
pub async fn open_blob_store(config: &StorageConfig) -> Result<Arc<dyn BlobStore>, StorageError> {
    match config.backend {
        StorageBackend::Filesystem => {
            let store = filesystem::FilesystemBlobStore::new(config.filesystem.root.clone()).await?;
            Ok(Arc::new(store))
        }
        #[cfg(feature = "object-storage")]
        StorageBackend::S3 => Ok(Arc::new(s3_store::S3BlobStore::new(&config.s3)?)),
        #[cfg(not(feature = "object-storage"))]
        StorageBackend::S3 => Err(StorageError::Backend(
            "s3 backend requires the `object-storage` feature".into(),
        )),
    }
}

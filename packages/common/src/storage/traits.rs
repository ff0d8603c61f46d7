use async_trait::async_trait;

use super::error::StorageError;

/// Named blob storage grouped into containers.
///
/// Whole objects are buffered in memory in both directions.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Create the container if it does not exist yet.
    ///
    /// Succeeds when the container already exists, including when another
    /// caller created it concurrently.
    async fn ensure_container(&self, container: &str) -> Result<(), StorageError>;

    /// List the names of all blobs in a container, in no particular order.
    async fn list_blobs(&self, container: &str) -> Result<Vec<String>, StorageError>;

    /// Store bytes under `name`, replacing any existing blob.
    async fn put(&self, container: &str, name: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Retrieve all bytes of a blob.
    async fn get(&self, container: &str, name: &str) -> Result<Vec<u8>, StorageError>;

    /// Check whether a blob exists.
    async fn exists(&self, container: &str, name: &str) -> Result<bool, StorageError> {
        match self.get(container, name).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

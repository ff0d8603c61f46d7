use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::error::StorageError;
use super::name::validate_name;
use super::traits::BlobStore;

/// Filesystem-backed blob store.
///
/// Layout: `{base_path}/{container}/{blob name}`. Writes are staged in
/// `{base_path}/.tmp` and renamed into place, so a reader never sees a
/// partially written blob.
pub struct FilesystemBlobStore {
    base_path: PathBuf,
}

impl FilesystemBlobStore {
    /// Create a new filesystem blob store rooted at `base_path`.
    pub async fn new(base_path: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn container_path(&self, container: &str) -> Result<PathBuf, StorageError> {
        Ok(self.base_path.join(validate_name(container)?))
    }

    fn blob_path(&self, container: &str, name: &str) -> Result<PathBuf, StorageError> {
        Ok(self.container_path(container)?.join(validate_name(name)?))
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn ensure_container(&self, container: &str) -> Result<(), StorageError> {
        let path = self.container_path(container)?;
        fs::create_dir_all(&path).await?;
        Ok(())
    }

    async fn list_blobs(&self, container: &str) -> Result<Vec<String>, StorageError> {
        let path = self.container_path(container)?;
        let mut entries = match fs::read_dir(&path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::ContainerNotFound(container.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    async fn put(&self, container: &str, name: &str, data: &[u8]) -> Result<(), StorageError> {
        let blob_path = self.blob_path(container, name)?;
        if !fs::try_exists(self.container_path(container)?).await? {
            return Err(StorageError::ContainerNotFound(container.to_string()));
        }

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &blob_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(())
    }

    async fn get(&self, container: &str, name: &str) -> Result<Vec<u8>, StorageError> {
        let blob_path = self.blob_path(container, name)?;
        match fs::read(&blob_path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::not_found(container, name))
            }
            Err(e) => Err(e.into()),
        }
    }
}

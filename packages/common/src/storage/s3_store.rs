use async_trait::async_trait;
use s3::BucketConfiguration;
use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::region::Region;
use tracing::{debug, info};

use super::error::StorageError;
use super::name::validate_name;
use super::traits::BlobStore;
use crate::config::S3Config;

/// Blob store on an S3-compatible service.
///
/// Each container is a bucket addressed path-style against the configured
/// endpoint, so local emulators work without DNS tricks.
pub struct S3BlobStore {
    region: Region,
    credentials: Credentials,
}

impl S3BlobStore {
    pub fn new(config: &S3Config) -> Result<Self, StorageError> {
        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };
        let credentials = Credentials::new(
            Some(config.access_key.as_str()),
            Some(config.secret_key.as_str()),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Backend(format!("invalid credentials: {e}")))?;

        Ok(Self {
            region,
            credentials,
        })
    }

    fn bucket(&self, container: &str) -> Result<Box<Bucket>, StorageError> {
        let bucket = Bucket::new(
            validate_name(container)?,
            self.region.clone(),
            self.credentials.clone(),
        )
        .map_err(backend_error)?;
        Ok(bucket.with_path_style())
    }
}

fn backend_error(err: S3Error) -> StorageError {
    StorageError::Backend(err.to_string())
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn ensure_container(&self, container: &str) -> Result<(), StorageError> {
        let bucket = self.bucket(container)?;
        if bucket.exists().await.map_err(backend_error)? {
            return Ok(());
        }

        let response = Bucket::create_with_path_style(
            container,
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::public(),
        )
        .await
        .map_err(backend_error)?;

        match response.response_code {
            code if is_success(code) => {
                info!(container, "Created bucket");
                Ok(())
            }
            // BucketAlreadyExists / BucketAlreadyOwnedByYou: lost a creation race.
            409 => {
                debug!(container, "Bucket created concurrently");
                Ok(())
            }
            code => Err(StorageError::Backend(format!(
                "creating bucket '{container}' failed with status {code}: {}",
                response.response_text
            ))),
        }
    }

    async fn list_blobs(&self, container: &str) -> Result<Vec<String>, StorageError> {
        let bucket = self.bucket(container)?;
        let pages = match bucket.list(String::new(), None).await {
            Ok(pages) => pages,
            // A missing bucket answers with an error document that fails to
            // parse as a listing, so ask the endpoint which buckets exist.
            Err(err) => {
                if !bucket.exists().await.map_err(backend_error)? {
                    return Err(StorageError::ContainerNotFound(container.to_string()));
                }
                return Err(backend_error(err));
            }
        };

        Ok(pages
            .into_iter()
            .flat_map(|page| page.contents)
            .map(|object| object.key)
            .collect())
    }

    async fn put(&self, container: &str, name: &str, data: &[u8]) -> Result<(), StorageError> {
        let bucket = self.bucket(container)?;
        let response = bucket
            .put_object(validate_name(name)?, data)
            .await
            .map_err(backend_error)?;

        match response.status_code() {
            code if is_success(code) => Ok(()),
            404 => Err(StorageError::ContainerNotFound(container.to_string())),
            code => Err(StorageError::Backend(format!(
                "uploading '{name}' to '{container}' failed with status {code}"
            ))),
        }
    }

    async fn get(&self, container: &str, name: &str) -> Result<Vec<u8>, StorageError> {
        let bucket = self.bucket(container)?;
        let response = bucket
            .get_object(validate_name(name)?)
            .await
            .map_err(backend_error)?;

        match response.status_code() {
            code if is_success(code) => Ok(response.bytes().to_vec()),
            404 => Err(StorageError::not_found(container, name)),
            code => Err(StorageError::Backend(format!(
                "downloading '{name}' from '{container}' failed with status {code}"
            ))),
        }
    }
}

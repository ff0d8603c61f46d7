use std::path::PathBuf;

use serde::Deserialize;

/// Which blob storage backend to use.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Containers are directories under `storage.filesystem.root`.
    #[default]
    Filesystem,
    /// Containers are buckets on an S3-compatible endpoint.
    S3,
}

/// Blob storage configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default)]
    pub filesystem: FilesystemConfig,
    #[serde(default)]
    pub s3: S3Config,
}

/// Filesystem backend settings.
#[derive(Debug, Deserialize, Clone)]
pub struct FilesystemConfig {
    /// Root directory holding one subdirectory per container. Default: "./data/blobs".
    #[serde(default = "default_fs_root")]
    pub root: PathBuf,
}

/// S3-compatible backend settings.
#[derive(Debug, Deserialize, Clone)]
pub struct S3Config {
    /// Storage endpoint URL. Default: "http://127.0.0.1:9000".
    #[serde(default = "default_s3_endpoint")]
    pub endpoint: String,
    /// Region name sent to the endpoint. Default: "us-east-1".
    #[serde(default = "default_s3_region")]
    pub region: String,
    #[serde(default = "default_s3_access_key")]
    pub access_key: String,
    #[serde(default = "default_s3_secret_key")]
    pub secret_key: String,
}

fn default_fs_root() -> PathBuf {
    PathBuf::from("./data/blobs")
}
fn default_s3_endpoint() -> String {
    "http://127.0.0.1:9000".into()
}
fn default_s3_region() -> String {
    "us-east-1".into()
}
fn default_s3_access_key() -> String {
    "minioadmin".into()
}
fn default_s3_secret_key() -> String {
    "minioadmin".into()
}

impl Default for FilesystemConfig {
    fn default() -> Self {
        Self {
            root: default_fs_root(),
        }
    }
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            endpoint: default_s3_endpoint(),
            region: default_s3_region(),
            access_key: default_s3_access_key(),
            secret_key: default_s3_secret_key(),
        }
    }
}

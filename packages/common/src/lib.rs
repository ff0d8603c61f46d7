pub mod config;
pub mod storage;

pub use config::{FilesystemConfig, S3Config, StorageBackend, StorageConfig};

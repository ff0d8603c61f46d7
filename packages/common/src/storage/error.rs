use thiserror::Error;

/// Errors that can occur during blob storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested blob does not exist in the container.
    #[error("blob '{name}' not found in container '{container}'")]
    NotFound { container: String, name: String },

    /// The container has never been created.
    #[error("container '{0}' not found")]
    ContainerNotFound(String),

    /// A container or blob name failed validation.
    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote storage service rejected the request or was unreachable.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn not_found(container: &str, name: &str) -> Self {
        Self::NotFound {
            container: container.to_string(),
            name: name.to_string(),
        }
    }

    /// True for the errors that mean "nothing by that name exists".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::ContainerNotFound(_) | Self::InvalidName(_)
        )
    }
}

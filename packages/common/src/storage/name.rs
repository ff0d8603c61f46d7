use super::error::StorageError;

/// Validates a flat container or blob name.
///
/// Names map directly onto directory and file names in the filesystem
/// backend, so anything that could escape the container is rejected.
pub fn validate_name(name: &str) -> Result<&str, StorageError> {
    if name.is_empty() {
        return Err(StorageError::InvalidName("name cannot be empty".into()));
    }

    if name.chars().any(|c| c.is_control()) {
        return Err(StorageError::InvalidName(
            "control characters are not allowed".into(),
        ));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(StorageError::InvalidName(format!(
            "'{name}' contains a path separator"
        )));
    }

    if name.starts_with('.') {
        return Err(StorageError::InvalidName(format!(
            "'{name}' must not start with '.'"
        )));
    }

    Ok(name)
}

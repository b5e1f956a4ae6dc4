use std::path::Path;

use anyhow::{Context, Result};
use shared::domain::{FileRef, DEFAULT_CONTENT_TYPE};

/// Reads a file from disk into a [`FileRef`] named after its final path
/// component.
pub async fn load_file_ref(path: impl AsRef<Path>) -> Result<FileRef> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("'{}' has no usable file name", path.display()))?
        .to_string();
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    let content_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();
    Ok(FileRef::new(name, bytes, content_type))
}

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Reduce a client-supplied filename to a safe basename of ASCII alphanumerics,
/// `.`, `-` and `_`. Directory components are dropped, whitespace becomes `_`,
/// and leading dots or underscores are stripped. May return an empty string.
pub fn secure_filename(filename: &str) -> String {
    let basename = filename.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = basename
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    cleaned.trim_start_matches(['.', '_']).to_string()
}

/// Lowercased text after the last `.`, if there is one.
pub fn extension_of(filename: &str) -> Option<String> {
    let (stem, extension) = filename.rsplit_once('.')?;
    if extension.is_empty() || stem.is_empty() {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}

/// An uploaded file written under a random name; removed once processed.
#[derive(Debug)]
pub struct StoredUpload {
    path: PathBuf,
}

impl StoredUpload {
    pub async fn save(dir: &Path, extension: &str, bytes: &[u8]) -> Result<Self> {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create upload directory {}", dir.display()))?;

        let path = dir.join(format!("{}.{}", Uuid::new_v4(), extension));
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to store upload at {}", path.display()))?;

        debug!(path = %path.display(), bytes = bytes.len(), "Stored upload");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Best effort
    pub async fn remove(self) {
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            debug!(path = %self.path.display(), error = %e, "Could not remove upload");
        }
    }
}

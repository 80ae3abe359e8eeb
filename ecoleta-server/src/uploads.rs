//! Upload storage for point images
//!
//! Persists multipart image payloads under the uploads directory with a
//! collision-resistant name: six random bytes hex-encoded, a dash, then the
//! sanitized client filename. Files are served back by the static route.

use std::path::{Path, PathBuf};

use rand::Rng;

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("uploaded file is empty")]
    EmptyFile,

    #[error("uploaded filename is invalid")]
    InvalidName,
}

/// File store rooted at the uploads directory
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Open a store, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, UploadError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist an uploaded image, returning the stored filename.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::EmptyFile);
        }

        let name = stored_name(original_name)?;
        tokio::fs::write(self.root.join(&name), bytes).await?;

        tracing::debug!(file = %name, size = bytes.len(), "stored upload");
        Ok(name)
    }
}

/// Build the stored filename: `<12 hex chars>-<sanitized original>`.
fn stored_name(original_name: &str) -> Result<String, UploadError> {
    let base = sanitize(original_name)?;
    let prefix: [u8; 6] = rand::thread_rng().gen();
    let prefix: String = prefix.iter().map(|b| format!("{:02x}", b)).collect();
    Ok(format!("{}-{}", prefix, base))
}

/// Strip any path components from the client-supplied name and keep only
/// characters safe for a filename. Path traversal in `original_name` must
/// never escape the uploads directory.
fn sanitize(original_name: &str) -> Result<String, UploadError> {
    let base = Path::new(original_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        return Err(UploadError::InvalidName);
    }

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_file_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path()).unwrap();

        let name = store.store("market.jpg", b"fake image bytes").await.unwrap();
        assert!(name.ends_with("-market.jpg"));

        let written = std::fs::read(dir.path().join(&name)).unwrap();
        assert_eq!(written, b"fake image bytes");
    }

    #[tokio::test]
    async fn prefix_is_twelve_hex_chars() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path()).unwrap();

        let name = store.store("a.png", b"x").await.unwrap();
        let (prefix, rest) = name.split_once('-').unwrap();
        assert_eq!(prefix.len(), 12);
        assert!(prefix.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(rest, "a.png");
    }

    #[tokio::test]
    async fn strips_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path()).unwrap();

        let name = store.store("../../etc/passwd", b"x").await.unwrap();
        assert!(name.ends_with("-passwd"));
        assert!(!name.contains('/'));
        assert!(dir.path().join(&name).exists());
    }

    #[tokio::test]
    async fn rejects_empty_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path()).unwrap();

        let err = store.store("a.png", b"").await.unwrap_err();
        assert!(matches!(err, UploadError::EmptyFile));
    }

    #[tokio::test]
    async fn rejects_unusable_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path()).unwrap();

        assert!(matches!(
            store.store("", b"x").await.unwrap_err(),
            UploadError::InvalidName
        ));
        assert!(matches!(
            store.store("..", b"x").await.unwrap_err(),
            UploadError::InvalidName
        ));
    }

    #[test]
    fn two_stored_names_differ() {
        let a = stored_name("same.jpg").unwrap();
        let b = stored_name("same.jpg").unwrap();
        assert_ne!(a, b);
    }
}

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::StoreError;

/// A JSON document stored as a single file.
///
/// `load` reads and parses the whole file; `save` replaces it with the
/// pretty-printed document. A missing file loads as `T::default()`.
pub struct JsonFile<T> {
    path: PathBuf,
    _doc: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonFile<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            _doc: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for JsonFile<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFile").field("path", &self.path).finish()
    }
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _doc: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file is present. Errors other than "not found" (permission
    /// denied, a file where a directory should be) are returned, not hidden.
    pub async fn exists(&self) -> Result<bool, StoreError> {
        tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| self.io_error(e))
    }

    pub async fn load(&self) -> Result<T, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("{} not found, using empty document", self.path.display());
                return Ok(T::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
            path: self.path.display().to_string(),
            source,
        })
    }

    pub async fn save(&self, doc: &T) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let bytes = serde_json::to_vec_pretty(doc).map_err(|source| StoreError::Json {
            path: self.path.display().to_string(),
            source,
        })?;

        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let file: JsonFile<Vec<String>> = JsonFile::new(dir.path().join("absent.json"));

        assert!(!file.exists().await.unwrap());
        assert!(file.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_creates_parent_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let file: JsonFile<BTreeMap<String, u32>> =
            JsonFile::new(dir.path().join("nested").join("doc.json"));

        let mut doc = BTreeMap::new();
        doc.insert("a".to_string(), 1);
        doc.insert("b".to_string(), 2);
        file.save(&doc).await.unwrap();

        doc.remove("a");
        file.save(&doc).await.unwrap();

        let loaded = file.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["b"], 2);

        // Pretty-printed with two-space indentation
        let raw = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(raw, "{\n  \"b\": 2\n}");
    }

    #[tokio::test]
    async fn test_exists_reports_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain");
        std::fs::write(&plain, "not a directory").unwrap();

        // A regular file in place of the parent directory is not "missing".
        let file: JsonFile<Vec<String>> = JsonFile::new(plain.join("inbox.json"));
        assert!(matches!(file.exists().await, Err(StoreError::Io { .. })));

        let present: JsonFile<Vec<String>> = JsonFile::new(plain);
        assert!(present.exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[{").unwrap();

        let file: JsonFile<Vec<String>> = JsonFile::new(path);
        assert!(matches!(file.load().await, Err(StoreError::Json { .. })));
    }
}

//! Local filesystem storage

use std::io;
use std::path::{Component, Path, PathBuf};

use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;

use super::{sanitize_filename, ByteStream, FileStore, StorageError, StoredFileBody};

/// Stores files directly in one directory on local disk
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub async fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Resolve a name directly under the root.
    ///
    /// Names are used as given (no basename stripping), but only a single
    /// plain path segment can address a stored file.
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        if name.contains(['/', '\\']) {
            return None;
        }

        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(self.root.join(name)),
            _ => None,
        }
    }

    /// Existence check performed right before read/delete
    async fn regular_file(&self, name: &str) -> Result<PathBuf, StorageError> {
        let path = self
            .resolve(name)
            .ok_or_else(|| StorageError::NotFound(name.to_string()))?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(StorageError::NotFound(name.to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[async_trait::async_trait]
impl FileStore for LocalFileStore {
    fn root(&self) -> &Path {
        &self.root
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        names.sort();
        Ok(names)
    }

    async fn read(&self, name: &str) -> Result<StoredFileBody, StorageError> {
        let path = self.regular_file(name).await?;

        let file = tokio::fs::File::open(&path).await?;
        let size = file.metadata().await?.len();

        Ok(StoredFileBody {
            size,
            stream: ReaderStream::new(file).boxed(),
        })
    }

    async fn write<'a>(
        &self,
        name: &str,
        mut content: ByteStream<'a>,
    ) -> Result<String, StorageError> {
        let filename = sanitize_filename(name)?;
        let path = self.root.join(&filename);

        let mut file = tokio::fs::File::create(&path).await?;
        let mut written: u64 = 0;

        while let Some(chunk) = content.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::debug!(
            filename = %filename,
            bytes = written,
            "File written"
        );

        Ok(filename)
    }

    async fn delete(&self, name: &str) -> Result<(), StorageError> {
        let path = self.regular_file(name).await?;
        tokio::fs::remove_file(&path).await?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

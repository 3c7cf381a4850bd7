//! File storage for uploaded files
//!
//! The upload root is the whole content store: every regular entry in it is
//! a stored file, keyed by its name. There is no metadata beyond what the
//! backend itself reports.

mod local;

use std::io;
use std::path::Path;

use bytes::Bytes;
use futures::stream::BoxStream;
use thiserror::Error;

pub use local::LocalFileStore;

/// A stream of file content chunks
pub type ByteStream<'a> = BoxStream<'a, io::Result<Bytes>>;

/// Storage-specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid filename: {0:?}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Content of a stored file, ready to stream back to a client
pub struct StoredFileBody {
    pub size: u64,
    pub stream: ByteStream<'static>,
}

/// Trait for file storage backends
///
/// Kept to name-based operations so the router never touches paths.
#[async_trait::async_trait]
pub trait FileStore: Send + Sync {
    /// Root location of the store
    fn root(&self) -> &Path;

    /// Names of all entries, sorted lexicographically
    async fn list(&self) -> Result<Vec<String>, StorageError>;

    /// Open a stored file for streaming
    async fn read(&self, name: &str) -> Result<StoredFileBody, StorageError>;

    /// Create or overwrite a file, returning the sanitized name used
    async fn write<'a>(&self, name: &str, content: ByteStream<'a>) -> Result<String, StorageError>;

    /// Remove a stored file
    async fn delete(&self, name: &str) -> Result<(), StorageError>;
}

/// Reduce a client-supplied filename to its final path segment.
///
/// `../../etc/passwd` becomes `passwd`. Both `/` and `\` count as
/// separators. Names that reduce to nothing usable are rejected.
pub fn sanitize_filename(name: &str) -> Result<String, StorageError> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("");

    match base {
        "" | "." | ".." => Err(StorageError::InvalidName(name.to_string())),
        _ if base.contains('\0') => Err(StorageError::InvalidName(name.to_string())),
        _ => Ok(base.to_string()),
    }
}

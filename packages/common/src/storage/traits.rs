use std::io::Cursor;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;
use super::key::PhotoKey;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Result of storing one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPhoto {
    pub key: PhotoKey,
    pub size: u64,
}

/// Object storage for item photos, addressed by generated keys.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Store bytes under a key derived from `filename`.
    async fn put(&self, filename: &str, data: &[u8]) -> Result<StoredPhoto, StorageError> {
        let reader: BoxReader = Box::new(Cursor::new(data.to_vec()));
        self.put_stream(filename, reader).await
    }

    /// Store data from an async reader under a key derived from `filename`.
    async fn put_stream(&self, filename: &str, reader: BoxReader)
    -> Result<StoredPhoto, StorageError>;

    /// Retrieve all bytes of a photo.
    async fn get(&self, key: &PhotoKey) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.get_stream(key).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Retrieve a photo as a streaming async reader.
    async fn get_stream(&self, key: &PhotoKey) -> Result<BoxReader, StorageError>;

    async fn exists(&self, key: &PhotoKey) -> Result<bool, StorageError>;

    /// Returns `true` if the photo was deleted, `false` if it did not exist.
    async fn delete(&self, key: &PhotoKey) -> Result<bool, StorageError>;

    /// Size of a stored photo in bytes.
    async fn size(&self, key: &PhotoKey) -> Result<u64, StorageError>;
}

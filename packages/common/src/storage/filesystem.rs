use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use super::error::StorageError;
use super::key::PhotoKey;
use super::traits::{BoxReader, PhotoStore, StoredPhoto};

/// Attempts at finding a free key before giving up.
const MAX_KEY_ATTEMPTS: usize = 8;

/// Filesystem-backed photo store.
///
/// Photos live flat under `{root}/{key}`. Uploads are written to
/// `{root}/.tmp` first and only become visible once complete.
pub struct FilesystemPhotoStore {
    root: PathBuf,
    max_size: u64,
}

impl FilesystemPhotoStore {
    pub async fn new(root: PathBuf, max_size: u64) -> Result<Self, StorageError> {
        fs::create_dir_all(&root).await?;
        fs::create_dir_all(root.join(".tmp")).await?;
        Ok(Self { root, max_size })
    }

    fn photo_path(&self, key: &PhotoKey) -> PathBuf {
        self.root.join(key.as_str())
    }

    fn temp_path(&self) -> PathBuf {
        self.root
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }

    /// Link a finished temp file to a fresh key.
    ///
    /// `hard_link` refuses to overwrite, so two uploads of the same name in
    /// the same millisecond end up under different keys.
    async fn publish(&self, temp_path: &Path, filename: &str) -> Result<PhotoKey, StorageError> {
        let millis = chrono::Utc::now().timestamp_millis();
        for attempt in 0..MAX_KEY_ATTEMPTS {
            let suffix = (attempt > 0)
                .then(|| uuid::Uuid::new_v4().simple().to_string()[..8].to_string());
            let key = PhotoKey::generate(filename, millis, suffix.as_deref());
            match fs::hard_link(temp_path, self.photo_path(&key)).await {
                Ok(()) => return Ok(key),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    debug!(key = %key, "Photo key taken, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "could not allocate a unique photo key",
        )))
    }
}

#[async_trait]
impl PhotoStore for FilesystemPhotoStore {
    async fn put_stream(
        &self,
        filename: &str,
        mut reader: BoxReader,
    ) -> Result<StoredPhoto, StorageError> {
        let temp_path = self.temp_path();
        let mut total_bytes: u64 = 0;

        let mut buf = vec![0u8; 64 * 1024];
        let mut temp_file = fs::File::create(&temp_path).await?;

        let written: Result<(), StorageError> = async {
            loop {
                let n = reader.read(&mut buf).await?;
                if n == 0 {
                    break;
                }
                total_bytes += n as u64;
                if total_bytes > self.max_size {
                    return Err(StorageError::SizeLimitExceeded {
                        actual: total_bytes,
                        limit: self.max_size,
                    });
                }
                temp_file.write_all(&buf[..n]).await?;
            }
            temp_file.flush().await?;
            Ok(())
        }
        .await;
        drop(temp_file);

        let published = match written {
            Ok(()) => self.publish(&temp_path, filename).await,
            Err(e) => Err(e),
        };
        let _ = fs::remove_file(&temp_path).await;

        Ok(StoredPhoto {
            key: published?,
            size: total_bytes,
        })
    }

    async fn get_stream(&self, key: &PhotoKey) -> Result<BoxReader, StorageError> {
        match fs::File::open(self.photo_path(key)).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, key: &PhotoKey) -> Result<bool, StorageError> {
        Ok(fs::try_exists(self.photo_path(key)).await?)
    }

    async fn delete(&self, key: &PhotoKey) -> Result<bool, StorageError> {
        match fs::remove_file(self.photo_path(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn size(&self, key: &PhotoKey) -> Result<u64, StorageError> {
        match fs::metadata(self.photo_path(key)).await {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::BufReader;

use super::error::StorageError;
use super::key::MediaKey;
use super::traits::{BoxReader, MediaStore};

/// Filesystem-backed media store.
///
/// Assets live flat under `base_path`, named by their key. Writes go through
/// a temp file in `{base_path}/.tmp` and are moved into place with a rename,
/// so a crashed upload never leaves a partial asset at its final name.
pub struct FilesystemMediaStore {
    base_path: PathBuf,
    max_size: u64,
}

impl FilesystemMediaStore {
    /// Create a new filesystem media store rooted at `base_path`.
    pub async fn new(base_path: PathBuf, max_size: u64) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self {
            base_path,
            max_size,
        })
    }

    fn asset_path(&self, key: &MediaKey) -> PathBuf {
        self.base_path.join(key.as_filename())
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl MediaStore for FilesystemMediaStore {
    async fn put(&self, key: &MediaKey, data: &[u8]) -> Result<(), StorageError> {
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let asset_path = self.asset_path(key);
        if fs::try_exists(&asset_path).await? {
            return Err(StorageError::AlreadyExists(key.as_filename()));
        }

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &asset_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(())
    }

    async fn get_stream(&self, key: &MediaKey) -> Result<BoxReader, StorageError> {
        match fs::File::open(self.asset_path(key)).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.as_filename()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, key: &MediaKey) -> Result<bool, StorageError> {
        Ok(fs::try_exists(self.asset_path(key)).await?)
    }

    async fn delete(&self, key: &MediaKey) -> Result<bool, StorageError> {
        match fs::remove_file(self.asset_path(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn size(&self, key: &MediaKey) -> Result<u64, StorageError> {
        match fs::metadata(self.asset_path(key)).await {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.as_filename()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;
use super::key::MediaKey;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Key-addressed media asset storage.
///
/// Keys are generated, never caller-supplied, so `put` can refuse to
/// overwrite: two uploads can never race onto the same name.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store a payload under the given key.
    ///
    /// Fails with `AlreadyExists` if the key is taken.
    async fn put(&self, key: &MediaKey, data: &[u8]) -> Result<(), StorageError>;

    /// Retrieve all bytes of an asset.
    async fn get(&self, key: &MediaKey) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.get_stream(key).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Retrieve an asset as a streaming async reader.
    async fn get_stream(&self, key: &MediaKey) -> Result<BoxReader, StorageError>;

    /// Check whether an asset exists.
    async fn exists(&self, key: &MediaKey) -> Result<bool, StorageError>;

    /// Delete an asset.
    ///
    /// Returns `true` if the asset was deleted, `false` if it did not exist.
    async fn delete(&self, key: &MediaKey) -> Result<bool, StorageError>;

    /// Get the size of an asset in bytes.
    async fn size(&self, key: &MediaKey) -> Result<u64, StorageError>;
}

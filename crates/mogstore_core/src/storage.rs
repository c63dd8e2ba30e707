//! The storage adapter.

use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};
use crate::file::RemoteFile;
use crate::mode::OpenMode;
use mogstore_client::{BlobClient, Connector, TrackerAddr};
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, warn};

/// File storage over a key-addressed blob store.
///
/// The adapter owns a validated [`StorageConfig`] and a blob client bound
/// to the configured domain. It hands out [`RemoteFile`] handles and
/// implements the key-level operations directly against the client.
///
/// # Consistency
///
/// There is no locking or versioning. Two handles that flush the same key
/// race at the store and the last writer wins.
///
/// # Example
///
/// ```rust
/// use mogstore_client::MemoryConnector;
/// use mogstore_core::{MogileStorage, OpenMode, StorageConfig};
///
/// let config = StorageConfig::parse("media", "10.0.0.1:7001").unwrap();
/// let storage = MogileStorage::connect(config, &MemoryConnector::new()).unwrap();
///
/// let mut file = storage.open_with_mode("hello.txt", OpenMode::Write);
/// file.write(b"hello").unwrap();
/// file.close().unwrap();
///
/// assert!(storage.exists("hello.txt").unwrap());
/// assert_eq!(storage.open("hello.txt").read(None).unwrap(), b"hello");
/// ```
#[derive(Debug)]
pub struct MogileStorage<C> {
    config: StorageConfig,
    client: C,
}

impl<C: BlobClient> MogileStorage<C> {
    /// Validates `config` and builds a client through `connector`.
    ///
    /// No network I/O happens here.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] if the configuration is
    /// invalid or the connector cannot build a client from it.
    pub fn connect<K>(config: StorageConfig, connector: &K) -> StorageResult<Self>
    where
        K: Connector<Client = C>,
    {
        config.validate()?;
        let client = connector
            .connect(config.domain(), config.trackers())
            .map_err(|e| StorageError::configuration(format!("cannot build client: {e}")))?;
        Self::with_client(config, client)
    }

    /// Wraps an already-built client.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] if the configuration is
    /// invalid or the client is bound to a different domain.
    pub fn with_client(config: StorageConfig, client: C) -> StorageResult<Self> {
        config.validate()?;
        if client.domain() != config.domain() {
            return Err(StorageError::configuration(format!(
                "client is bound to domain {:?}, configuration names {:?}",
                client.domain(),
                config.domain()
            )));
        }
        debug!(domain = config.domain(), trackers = config.trackers().len(), "storage ready");
        Ok(Self { config, client })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Returns the domain.
    pub fn domain(&self) -> &str {
        self.config.domain()
    }

    /// Returns the trackers.
    pub fn trackers(&self) -> &[TrackerAddr] {
        self.config.trackers()
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Opens `key` for reading.
    ///
    /// Nothing is fetched until the handle is first read.
    pub fn open(&self, key: &str) -> RemoteFile<'_, C> {
        self.open_with_mode(key, OpenMode::Read)
    }

    /// Opens `key` in `mode`.
    ///
    /// Nothing is fetched until the handle is first read.
    pub fn open_with_mode(&self, key: &str, mode: OpenMode) -> RemoteFile<'_, C> {
        RemoteFile::new(self, key, mode)
    }

    /// Returns true if a blob is stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::RemoteUnavailable`] if the store cannot be reached.
    pub fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.client.contains(key)?)
    }

    /// Deletes the blob under `key`.
    ///
    /// Deleting a missing key does whatever the client does.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::RemoteUnavailable`] if the store cannot be reached.
    pub fn delete(&self, key: &str) -> StorageResult<()> {
        debug!(domain = self.domain(), key, "delete");
        Ok(self.client.delete(key)?)
    }

    /// Stores `content` under `key` and returns the stored key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::WriteFailure`] if the store refuses the blob,
    /// or [`StorageError::RemoteUnavailable`] if it cannot be reached.
    pub fn save(&self, key: &str, content: &[u8]) -> StorageResult<String> {
        debug!(domain = self.domain(), key, len = content.len(), "save");
        if !self.client.put(key, content)? {
            warn!(domain = self.domain(), key, "store rejected blob");
            return Err(StorageError::write_failure(key));
        }
        Ok(key.to_string())
    }

    /// Drains `reader` and stores the result under `key`.
    ///
    /// `reader` may be another [`RemoteFile`], which copies one key to another.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if reading fails, otherwise the errors
    /// of [`MogileStorage::save`].
    pub fn save_from<R: Read>(&self, key: &str, reader: &mut R) -> StorageResult<String> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        self.save(key, &content)
    }

    /// Fetches the full blob under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if the key is absent, or
    /// [`StorageError::RemoteUnavailable`] if the store cannot be reached.
    pub fn read(&self, key: &str) -> StorageResult<Vec<u8>> {
        debug!(domain = self.domain(), key, "fetch");
        self.client
            .get(key)
            .map_err(StorageError::from)?
            .ok_or_else(|| StorageError::not_found(key))
    }

    /// Returns the size of the blob under `key` in bytes.
    ///
    /// The store has no metadata call, so this fetches the blob.
    ///
    /// # Errors
    ///
    /// Same as [`MogileStorage::read`].
    pub fn size(&self, key: &str) -> StorageResult<u64> {
        Ok(self.read(key)?.len() as u64)
    }

    /// Always fails: blobs have no local filesystem path.
    ///
    /// # Errors
    ///
    /// Always returns [`StorageError::Unsupported`].
    pub fn path(&self, _key: &str) -> StorageResult<PathBuf> {
        Err(StorageError::unsupported("path"))
    }

    /// Always fails: blobs have no stable public URL.
    ///
    /// # Errors
    ///
    /// Always returns [`StorageError::Unsupported`].
    pub fn url(&self, _key: &str) -> StorageResult<String> {
        Err(StorageError::unsupported("url"))
    }
}

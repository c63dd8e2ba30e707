//! Directory-backed blob store for persistent local use.

use crate::client::{BlobClient, Connector};
use crate::error::{ClientError, ClientResult};
use crate::tracker::TrackerAddr;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// A blob client that keeps each domain in a directory.
///
/// Every blob is one file named by the SHA-256 of its key, so arbitrary keys
/// (slashes, unicode) map to safe file names. Data survives process
/// restarts and is visible to every client opened on the same directory.
///
/// # Durability
///
/// - `put` writes a temporary file, syncs it, then renames it into place,
///   so readers see either the old blob or the new one
/// - `delete` of a missing key succeeds
///
/// # Example
///
/// ```no_run
/// use mogstore_client::{BlobClient, DirClient};
/// use std::path::Path;
///
/// let client = DirClient::open(Path::new("/var/lib/mogstore"), "media").unwrap();
/// client.put("report.pdf", b"%PDF-1.7").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DirClient {
    domain: String,
    dir: PathBuf,
}

impl DirClient {
    /// Opens the directory for `domain` under `root`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidDomain`] if `domain` is not a single
    /// plain directory name (empty, `.`, `..`, absolute, or containing a
    /// separator or NUL), or an I/O error if the directory cannot be created.
    pub fn open(root: &Path, domain: &str) -> ClientResult<Self> {
        validate_domain(domain)?;
        let dir = root.join(domain);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            domain: domain.to_string(),
            dir,
        })
    }

    /// Returns the directory holding this domain's blobs.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file that holds (or would hold) `key`.
    #[must_use]
    pub fn blob_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        let name: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
        self.dir.join(name)
    }
}

/// Checks that `domain` names one directory directly under the root.
fn validate_domain(domain: &str) -> ClientResult<()> {
    if domain.contains(['/', '\\', '\0']) {
        return Err(ClientError::invalid_domain(
            domain,
            "must not contain path separators or NUL",
        ));
    }
    let mut components = Path::new(domain).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(ClientError::invalid_domain(
            domain,
            "must be a single plain path component",
        )),
    }
}

impl BlobClient for DirClient {
    fn domain(&self) -> &str {
        &self.domain
    }

    fn get(&self, key: &str) -> ClientResult<Option<Vec<u8>>> {
        match fs::read(self.blob_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, data: &[u8]) -> ClientResult<bool> {
        let target = self.blob_path(key);
        let tmp = self.dir.join(format!(".tmp-{}", Uuid::new_v4()));

        let written = (|| -> io::Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(data)?;
            file.sync_all()?;
            fs::rename(&tmp, &target)
        })();

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        debug!(domain = %self.domain, key, len = data.len(), path = ?target, "stored blob");
        Ok(true)
    }

    fn delete(&self, key: &str) -> ClientResult<()> {
        match fs::remove_file(self.blob_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn contains(&self, key: &str) -> ClientResult<bool> {
        Ok(self.blob_path(key).try_exists()?)
    }
}

/// Builds [`DirClient`]s rooted at one directory.
///
/// Trackers are validated by the caller and otherwise ignored; the root
/// directory plays the part of the store.
#[derive(Debug, Clone)]
pub struct DirConnector {
    root: PathBuf,
}

impl DirConnector {
    /// Creates a connector rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Connector for DirConnector {
    type Client = DirClient;

    fn connect(&self, domain: &str, _trackers: &[TrackerAddr]) -> ClientResult<DirClient> {
        DirClient::open(&self.root, domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn dir_create_domain() {
        let dir = tempdir().unwrap();
        let client = DirClient::open(dir.path(), "media").unwrap();
        assert!(client.dir().is_dir());
        assert_eq!(client.domain(), "media");
    }

    #[test]
    fn dir_put_and_get() {
        let dir = tempdir().unwrap();
        let client = DirClient::open(dir.path(), "media").unwrap();

        assert!(client.put("photos/cat.jpg", b"meow").unwrap());
        assert_eq!(client.get("photos/cat.jpg").unwrap().unwrap(), b"meow");
        assert!(client.contains("photos/cat.jpg").unwrap());
    }

    #[test]
    fn dir_get_missing() {
        let dir = tempdir().unwrap();
        let client = DirClient::open(dir.path(), "media").unwrap();
        assert!(client.get("nope").unwrap().is_none());
        assert!(!client.contains("nope").unwrap());
    }

    #[test]
    fn dir_delete() {
        let dir = tempdir().unwrap();
        let client = DirClient::open(dir.path(), "media").unwrap();

        client.put("a", b"x").unwrap();
        client.delete("a").unwrap();
        assert!(!client.contains("a").unwrap());
        client.delete("a").unwrap();
    }

    #[test]
    fn dir_persistence() {
        let dir = tempdir().unwrap();

        // Write data
        {
            let client = DirClient::open(dir.path(), "media").unwrap();
            client.put("persistent", b"persistent data").unwrap();
        }

        // Reopen and read
        {
            let client = DirClient::open(dir.path(), "media").unwrap();
            assert_eq!(client.get("persistent").unwrap().unwrap(), b"persistent data");
        }
    }

    #[test]
    fn dir_put_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let client = DirClient::open(dir.path(), "media").unwrap();
        client.put("a", b"one").unwrap();
        client.put("a", b"two").unwrap();

        let names: Vec<_> = fs::read_dir(client.dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(!names[0].to_string_lossy().starts_with(".tmp-"));
    }

    #[test]
    fn dir_blob_path_is_stable_hex() {
        let dir = tempdir().unwrap();
        let client = DirClient::open(dir.path(), "media").unwrap();
        let path = client.blob_path("key");
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(name.len(), 64);
        assert!(name.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(path, client.blob_path("key"));
        assert_ne!(path, client.blob_path("other"));
    }

    #[test]
    fn dir_connector_separates_domains() {
        let dir = tempdir().unwrap();
        let connector = DirConnector::new(dir.path());
        let media = connector.connect("media", &[]).unwrap();
        let thumbs = connector.connect("thumbs", &[]).unwrap();

        media.put("a", b"x").unwrap();
        assert!(!thumbs.contains("a").unwrap());
        assert_eq!(connector.root(), dir.path());
    }

    #[test]
    fn dir_rejects_domains_outside_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("store");
        let absolute = dir.path().join("elsewhere");

        for domain in ["", ".", "..", "../escaped", "a/b", "a\\b", "nul\0", absolute.to_str().unwrap()] {
            let result = DirClient::open(&root, domain);
            assert!(
                matches!(result, Err(ClientError::InvalidDomain { .. })),
                "{domain:?} should be rejected"
            );
        }
        assert!(!dir.path().join("escaped").exists());
        assert!(!absolute.exists());
    }

    #[test]
    fn dir_connector_rejects_escaping_domain() {
        let dir = tempdir().unwrap();
        let connector = DirConnector::new(dir.path().join("store"));
        let result = connector.connect("../escaped", &[]);
        assert!(matches!(result, Err(ClientError::InvalidDomain { .. })));
    }

    #[test]
    fn dir_blob_path_matches_sha256() {
        let dir = tempdir().unwrap();
        let client = DirClient::open(dir.path(), "media").unwrap();
        let path = client.blob_path("abc");
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(path.parent().unwrap(), client.dir());
    }
}

//! Buffered file handles over remote blobs.

use crate::config::FlushPolicy;
use crate::error::{StorageError, StorageResult};
use crate::mode::OpenMode;
use crate::storage::MogileStorage;
use mogstore_client::BlobClient;
use std::io::{self, Cursor, Seek, SeekFrom};
use std::mem;
use tracing::{debug, warn};

/// Handle lifecycle.
///
/// The buffer and its cursor live inside the states that have one, so a
/// closed handle cannot also be dirty.
#[derive(Debug)]
enum State {
    /// Nothing buffered; remembers a seek target. `saved` is set once this
    /// handle has flushed, so later writes append to the stored blob.
    Fresh { position: u64, saved: bool },
    /// Buffer holds the remote content.
    Cached(Cursor<Vec<u8>>),
    /// Buffer holds writes not yet saved.
    Dirty(Cursor<Vec<u8>>),
    /// Terminal.
    Closed,
}

/// A file-like view of one blob.
///
/// The handle is lazy: nothing is fetched until a read, `tell`, `size` or
/// end-relative seek needs the content. Writes append to an in-memory
/// buffer which is pushed to the store as a whole on [`RemoteFile::flush`]
/// or [`RemoteFile::close`].
///
/// # Lifecycle
///
/// ```text
/// Fresh --read/tell/size--> Cached --write--> Dirty --flush--> Fresh | Cached
///   \______________________write______________/
/// any --close--> Closed
/// ```
///
/// After `close` every I/O method fails with [`StorageError::ClosedHandle`].
/// If the flush inside `close` fails the handle stays dirty and open, so
/// the caller can retry.
///
/// Dropping a handle performs no I/O. Call [`RemoteFile::close`] to save
/// writes; a dirty handle dropped without closing loses them.
///
/// A handle is owned by one caller and is not meant to be shared between
/// threads. Handles on the same key do not coordinate; the last flush wins.
///
/// The inherent `read`, `write`, `seek` and `flush` return
/// [`StorageResult`]; the [`io::Read`], [`io::Write`] and [`io::Seek`]
/// implementations wrap the same logic for use with `std::io` helpers.
#[derive(Debug)]
pub struct RemoteFile<'a, C> {
    storage: &'a MogileStorage<C>,
    key: String,
    mode: OpenMode,
    state: State,
}

impl<'a, C: BlobClient> RemoteFile<'a, C> {
    pub(crate) fn new(storage: &'a MogileStorage<C>, key: &str, mode: OpenMode) -> Self {
        Self {
            storage,
            key: key.to_string(),
            mode,
            state: State::Fresh {
                position: 0,
                saved: false,
            },
        }
    }

    /// Returns the key this handle addresses.
    pub fn name(&self) -> &str {
        &self.key
    }

    /// Returns the access mode.
    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    /// Returns true once the handle has been closed.
    pub fn closed(&self) -> bool {
        matches!(self.state, State::Closed)
    }

    /// Returns true if the buffer holds unsaved writes.
    pub fn is_dirty(&self) -> bool {
        matches!(self.state, State::Dirty(_))
    }

    /// Returns true if the buffer is populated.
    pub fn is_cached(&self) -> bool {
        matches!(self.state, State::Cached(_) | State::Dirty(_))
    }

    /// Always false; a blob is never a terminal.
    pub fn is_terminal(&self) -> bool {
        false
    }

    fn ensure_open(&self) -> StorageResult<()> {
        if self.closed() {
            Err(StorageError::closed_handle(&self.key))
        } else {
            Ok(())
        }
    }

    /// Returns the buffer, fetching it first if the handle is fresh.
    fn buffer(&mut self) -> StorageResult<&mut Cursor<Vec<u8>>> {
        if let State::Fresh { position, .. } = self.state {
            let data = self.storage.read(&self.key)?;
            debug!(key = %self.key, len = data.len(), "populated buffer");
            let mut cursor = Cursor::new(data);
            cursor.set_position(position);
            self.state = State::Cached(cursor);
        }
        match &mut self.state {
            State::Cached(cursor) | State::Dirty(cursor) => Ok(cursor),
            State::Fresh { .. } | State::Closed => Err(StorageError::closed_handle(&self.key)),
        }
    }

    /// Reads from the cursor.
    ///
    /// `None` reads to the end of the buffer; `Some(n)` reads at most `n`
    /// bytes. The cursor advances by the number of bytes returned, which is
    /// zero at or past the end.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ClosedHandle`] after close, or the fetch
    /// error ([`StorageError::NotFound`], [`StorageError::RemoteUnavailable`])
    /// if the buffer had to be populated.
    pub fn read(&mut self, limit: Option<usize>) -> StorageResult<Vec<u8>> {
        self.ensure_open()?;
        let cursor = self.buffer()?;
        let position = cursor.position();
        let len = cursor.get_ref().len();
        let start = usize::try_from(position).map_or(len, |p| p.min(len));
        let end = match limit {
            Some(n) => start.saturating_add(n).min(len),
            None => len,
        };
        let chunk = cursor.get_ref()[start..end].to_vec();
        cursor.set_position(position + chunk.len() as u64);
        Ok(chunk)
    }

    /// Reads like [`RemoteFile::read`] and splits the result on `\n`.
    ///
    /// The separators are dropped; content ending in `\n` yields a trailing
    /// empty line.
    ///
    /// # Errors
    ///
    /// Same as [`RemoteFile::read`].
    pub fn readlines(&mut self, limit: Option<usize>) -> StorageResult<Vec<Vec<u8>>> {
        let data = self.read(limit)?;
        Ok(data.split(|&b| b == b'\n').map(<[u8]>::to_vec).collect())
    }

    /// Appends `data` to the buffer and returns the number of bytes taken.
    ///
    /// A newly opened handle starts from an empty buffer without fetching.
    /// After a flush that dropped the buffer, the saved blob is fetched
    /// first so the write appends to it. The cursor ends up at the end of
    /// the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::AccessDenied`] if the handle was opened for
    /// reading, [`StorageError::ClosedHandle`] after close, or a fetch error
    /// other than not found.
    pub fn write(&mut self, data: &[u8]) -> StorageResult<usize> {
        self.ensure_open()?;
        if !self.mode.is_writable() {
            return Err(StorageError::access_denied(&self.key));
        }

        let mut buffer = match &mut self.state {
            State::Cached(cursor) | State::Dirty(cursor) => mem::take(cursor.get_mut()),
            State::Fresh { saved: true, .. } => match self.storage.read(&self.key) {
                Ok(stored) => stored,
                Err(e) if e.is_not_found() => Vec::new(),
                Err(e) => return Err(e),
            },
            State::Fresh { saved: false, .. } | State::Closed => Vec::new(),
        };
        buffer.extend_from_slice(data);
        let end = buffer.len() as u64;

        let mut cursor = Cursor::new(buffer);
        cursor.set_position(end);
        self.state = State::Dirty(cursor);
        Ok(data.len())
    }

    /// Moves the cursor and returns the new position.
    ///
    /// Start- and current-relative seeks on a fresh handle do not fetch;
    /// end-relative seeks need the length and do. Seeking past the end is
    /// allowed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] for a negative target,
    /// [`StorageError::ClosedHandle`] after close, or a fetch error.
    pub fn seek(&mut self, pos: SeekFrom) -> StorageResult<u64> {
        self.ensure_open()?;
        if let State::Fresh { position, .. } = &mut self.state {
            let target = match pos {
                SeekFrom::Start(offset) => Some(offset),
                SeekFrom::Current(delta) => {
                    Some(position.checked_add_signed(delta).ok_or_else(|| {
                        io::Error::new(
                            io::ErrorKind::InvalidInput,
                            "invalid seek to a negative or overflowing position",
                        )
                    })?)
                }
                SeekFrom::End(_) => None,
            };
            if let Some(target) = target {
                *position = target;
                return Ok(target);
            }
        }
        Ok(self.buffer()?.seek(pos)?)
    }

    /// Returns the cursor position, fetching the blob if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ClosedHandle`] after close, or a fetch error.
    pub fn tell(&mut self) -> StorageResult<u64> {
        self.ensure_open()?;
        Ok(self.buffer()?.position())
    }

    /// Returns the content length, fetching the blob if needed.
    ///
    /// For a dirty handle this is the length of the buffered content.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ClosedHandle`] after close, or a fetch error.
    pub fn size(&mut self) -> StorageResult<u64> {
        self.ensure_open()?;
        Ok(self.buffer()?.get_ref().len() as u64)
    }

    /// Saves buffered writes to the store.
    ///
    /// Does nothing unless the handle is dirty. After a successful save the
    /// storage's [`FlushPolicy`] decides whether the buffer is dropped or
    /// kept as the cache. On failure the handle stays dirty.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ClosedHandle`] after close, otherwise the
    /// errors of [`MogileStorage::save`].
    pub fn flush(&mut self) -> StorageResult<()> {
        self.ensure_open()?;
        let State::Dirty(cursor) = &self.state else {
            return Ok(());
        };
        self.storage.save(&self.key, cursor.get_ref())?;

        self.state = match mem::replace(&mut self.state, State::Closed) {
            State::Dirty(cursor) => match self.storage.config().flush_policy() {
                FlushPolicy::Refetch => State::Fresh {
                    position: cursor.position(),
                    saved: true,
                },
                FlushPolicy::KeepCache => State::Cached(cursor),
            },
            other => other,
        };
        debug!(key = %self.key, "flushed");
        Ok(())
    }

    /// Flushes and closes the handle.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ClosedHandle`] if already closed, or the
    /// flush error, in which case the handle stays open and dirty.
    pub fn close(&mut self) -> StorageResult<()> {
        self.flush()?;
        self.state = State::Closed;
        Ok(())
    }
}

impl<C: BlobClient> io::Read for RemoteFile<'_, C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let chunk = RemoteFile::read(self, Some(buf.len()))?;
        buf[..chunk.len()].copy_from_slice(&chunk);
        Ok(chunk.len())
    }
}

impl<C: BlobClient> io::Write for RemoteFile<'_, C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(RemoteFile::write(self, buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(RemoteFile::flush(self)?)
    }
}

impl<C: BlobClient> io::Seek for RemoteFile<'_, C> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Ok(RemoteFile::seek(self, pos)?)
    }
}

impl<C> Drop for RemoteFile<'_, C> {
    fn drop(&mut self) {
        if let State::Dirty(cursor) = &self.state {
            warn!(
                key = %self.key,
                unsaved = cursor.get_ref().len(),
                "remote file dropped with unsaved writes; call close() to save"
            );
        }
    }
}

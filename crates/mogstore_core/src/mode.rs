//! Access modes for remote file handles.

use crate::error::StorageError;
use std::fmt;
use std::str::FromStr;

/// Access intent of a [`crate::RemoteFile`].
///
/// Parses from the usual mode strings: `"r"`, `"rb"`, `"rt"` open for
/// reading; `"w"`, `"wb"`, `"wt"` open for writing. Append and update
/// modes are not supported by a whole-object store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OpenMode {
    /// Reads only; writes fail with access denied.
    #[default]
    Read,
    /// Reads and buffered writes, flushed on close.
    Write,
}

impl OpenMode {
    /// Returns true if handles in this mode accept writes.
    #[must_use]
    pub fn is_writable(self) -> bool {
        matches!(self, Self::Write)
    }

    /// Returns the canonical mode string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "rb",
            Self::Write => "wb",
        }
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpenMode {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StorageError::InvalidMode { mode: s.to_string() };

        if s.chars().any(|c| !matches!(c, 'r' | 'w' | 'b' | 't')) {
            return Err(invalid());
        }
        match (s.matches('r').count(), s.matches('w').count()) {
            (1, 0) => Ok(Self::Read),
            (0, 1) => Ok(Self::Write),
            _ => Err(invalid()),
        }
    }
}

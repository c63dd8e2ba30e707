//! # mogstore core
//!
//! File storage adapter over a key-addressed blob store.
//!
//! [`MogileStorage`] maps file-storage operations (open, save, exists,
//! delete) onto a [`mogstore_client::BlobClient`] bound to one domain.
//! [`RemoteFile`] gives a blob file semantics: a lazily fetched in-memory
//! buffer with a cursor, and writes that are saved as a whole on flush or
//! close.
//!
//! ## Design Principles
//!
//! - Construction and `open` do no I/O
//! - Blobs are moved whole; there are no partial or ranged transfers
//! - Failures keep their kind: not found, unreachable, rejected, closed
//! - A failed flush never loses buffered data
//!
//! ## Example
//!
//! ```rust
//! use mogstore_client::MemoryConnector;
//! use mogstore_core::{MogileStorage, OpenMode, Settings};
//! use std::io::SeekFrom;
//!
//! let settings = Settings {
//!     trackers: Some("10.0.0.1:7001,10.0.0.2:7001".into()),
//!     domain: Some("media".into()),
//! };
//! let storage = MogileStorage::connect(settings.into_config().unwrap(), &MemoryConnector::new())
//!     .unwrap();
//!
//! let mut file = storage.open_with_mode("report.txt", OpenMode::Write);
//! file.write(b"AAAAA").unwrap();
//! file.write(b"BBBBB").unwrap();
//! file.close().unwrap();
//!
//! let mut file = storage.open("report.txt");
//! file.seek(SeekFrom::Start(5)).unwrap();
//! assert_eq!(file.read(None).unwrap(), b"BBBBB");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod file;
mod mode;
mod storage;

pub use config::{FlushPolicy, Settings, StorageConfig};
pub use error::{StorageError, StorageResult};
pub use file::RemoteFile;
pub use mode::OpenMode;
pub use storage::MogileStorage;

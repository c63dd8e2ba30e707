//! # mogstore testkit
//!
//! Test utilities for mogstore.
//!
//! This crate provides:
//! - Fixtures: ready-made storages over a shared in-memory store or a
//!   temporary directory store
//! - Property-based test generators using proptest
//!
//! The cross-crate scenario and property suites live in `tests/`.
//!
//! ## Usage
//!
//! ```rust
//! use mogstore_core::OpenMode;
//! use mogstore_testkit::prelude::*;
//!
//! with_memory_storage(|storage| {
//!     let mut file = storage.open_with_mode("greeting", OpenMode::Write);
//!     file.write(b"hi").unwrap();
//!     file.close().unwrap();
//!     assert!(storage.exists("greeting").unwrap());
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;

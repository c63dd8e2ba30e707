//! # mogstore client
//!
//! Blob client seam and reference clients for mogstore.
//!
//! A blob store is reached through a domain (a namespace) and an ordered
//! list of tracker endpoints. This crate does not speak any tracker
//! protocol; it defines the operations the storage adapter needs and ships
//! clients that satisfy them locally.
//!
//! ## Design Principles
//!
//! - Clients move whole blobs (get, put, delete, contains)
//! - A missing key is a value (`Ok(None)`), not an error
//! - A rejected upload is a value (`Ok(false)`), distinct from a transport error
//! - Clients must be `Send + Sync`
//!
//! ## Available Clients
//!
//! - [`MemoryClient`] - Shared in-process store, for tests
//! - [`DirClient`] - One directory per domain, for local persistence
//! - [`FailingClient`] - Fault injection wrapper
//!
//! ## Example
//!
//! ```rust
//! use mogstore_client::{parse_tracker_list, BlobClient, Connector, MemoryConnector};
//!
//! let trackers = parse_tracker_list("10.0.0.1:7001,10.0.0.2:7001").unwrap();
//! let client = MemoryConnector::new().connect("media", &trackers).unwrap();
//! client.put("hello.txt", b"hello world").unwrap();
//! assert_eq!(client.get("hello.txt").unwrap().unwrap(), b"hello world");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod dir;
mod error;
mod failing;
mod memory;
mod tracker;

pub use client::{BlobClient, Connector};
pub use dir::{DirClient, DirConnector};
pub use error::{ClientError, ClientResult};
pub use failing::FailingClient;
pub use memory::{MemoryClient, MemoryConnector, MemoryStore};
pub use tracker::{parse_tracker_list, TrackerAddr, DEFAULT_TRACKER_PORT};

//! ov-core: Core library for the ov versioned object storage client
//!
//! This crate provides the SDK-independent pieces of ov:
//! - Error taxonomy shared by all crates
//! - Typed per-call options for store operations
//! - Alias (connection profile) management
//! - Remote path parsing
//! - The ObjectStore trait describing the store facade
//! - Atomic local-file transfer helpers
//!
//! Keeping this crate free of any specific S3 SDK allows the contract
//! to be exercised against an in-memory store in tests.

pub mod alias;
pub mod error;
pub mod options;
pub mod path;
pub mod store;
pub mod transfer;
pub mod types;

pub use alias::{Alias, AliasManager};
pub use error::{Error, Result};
pub use options::{DeleteOptions, DownloadOptions, ListOptions, UploadOptions};
pub use path::{RemotePath, parse_remote, parse_remote_object};
pub use store::{ObjectStore, validate_bucket, validate_bucket_key};
pub use transfer::{ensure_readable_file, write_atomic};
pub use types::{BucketInfo, ObjectInfo, ObjectVersion, UploadReceipt, VersioningState};

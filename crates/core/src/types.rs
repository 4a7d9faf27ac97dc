//! Data model for buckets, objects, and object versions

use jiff::Timestamp;
use serde::Serialize;

/// Bucket-level versioning state
///
/// Suspended is not "disabled": once a bucket has ever enabled
/// versioning it can never return to a state without version metadata.
/// Existing versions persist across suspension. The never-configured
/// state is represented as `None` in `Option<VersioningState>` and is
/// only reachable as a bucket's initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VersioningState {
    Enabled,
    Suspended,
}

impl VersioningState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "Enabled",
            Self::Suspended => "Suspended",
        }
    }
}

impl std::fmt::Display for VersioningState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptor for a bucket owned by the configured account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
}

impl BucketInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created: None,
        }
    }
}

/// Descriptor for an object as returned by a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectInfo {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}

impl ObjectInfo {
    pub fn new(key: impl Into<String>, size_bytes: i64) -> Self {
        Self {
            key: key.into(),
            size_bytes: Some(size_bytes),
            last_modified: None,
            etag: None,
            storage_class: None,
        }
    }
}

/// Descriptor for one immutable revision of an object
///
/// A delete marker is a tombstone revision: it hides the object from
/// unversioned retrieval but carries no bytes of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectVersion {
    pub key: String,
    /// Store-assigned, opaque version identifier
    pub version_id: String,
    pub is_latest: bool,
    pub is_delete_marker: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

/// Result of a completed upload
///
/// `version_id` is the store-assigned id of the newly created revision;
/// `None` when the bucket has never enabled versioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReceipt {
    pub bucket: String,
    pub key: String,
    pub size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

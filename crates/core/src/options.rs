//! Typed per-call options for object store operations
//!
//! Each operation takes its own options struct enumerating the optional
//! parameters it recognizes. Bucket and key are always separate,
//! mandatory arguments, so an options value can never override them.
//! All options default to "unset"; constructing `Default::default()`
//! issues the plain form of the call.

use crate::error::{Error, Result};

/// Options for deleting an object
///
/// Without a version id, the delete targets the object's current state:
/// versioning-enabled buckets get a new delete marker, unversioned or
/// suspended buckets lose the current object permanently. With a version
/// id, exactly that version is removed — including a delete marker
/// itself, which restores visibility of the prior version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOptions {
    /// Specific version to remove permanently
    pub version_id: Option<String>,
}

impl DeleteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version_id(mut self, id: impl Into<String>) -> Self {
        self.version_id = Some(id.into());
        self
    }

    /// Reject blank version ids before any remote call
    pub fn validate(&self) -> Result<()> {
        validate_version_id(self.version_id.as_deref())
    }
}

/// Options for uploading an object
///
/// Purely metadata: none of these alter the uploaded byte content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOptions {
    /// MIME type stored with the object; guessed from the file
    /// extension when unset
    pub content_type: Option<String>,
    /// Cache-Control header stored with the object
    pub cache_control: Option<String>,
}

impl UploadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_type(mut self, ct: impl Into<String>) -> Self {
        self.content_type = Some(ct.into());
        self
    }

    pub fn cache_control(mut self, cc: impl Into<String>) -> Self {
        self.cache_control = Some(cc.into());
        self
    }
}

/// Options for downloading an object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Specific version to fetch, regardless of any delete marker
    /// currently hiding the object
    pub version_id: Option<String>,
}

impl DownloadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version_id(mut self, id: impl Into<String>) -> Self {
        self.version_id = Some(id.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_version_id(self.version_id.as_deref())
    }
}

/// Options for listing objects or object versions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Only return keys starting with this prefix
    pub prefix: Option<String>,
    /// Cap the total number of entries returned
    pub max_keys: Option<i32>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn max_keys(mut self, max: i32) -> Self {
        self.max_keys = Some(max);
        self
    }
}

fn validate_version_id(version_id: Option<&str>) -> Result<()> {
    if let Some(v) = version_id
        && v.trim().is_empty()
    {
        return Err(Error::invalid_argument("version id cannot be blank"));
    }
    Ok(())
}

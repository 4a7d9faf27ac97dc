//! ObjectStore trait: the versioned object store facade contract
//!
//! Implementations wrap a remote object storage API. The contract is
//! deliberately thin: every method maps to one logical store operation,
//! no method retries internally, and no state is shared between calls. Callers needing bounded latency impose their own timeout and
//! treat expiry as a store access failure.

use std::path::Path;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::options::{DeleteOptions, DownloadOptions, ListOptions, UploadOptions};
use crate::types::{BucketInfo, ObjectInfo, ObjectVersion, UploadReceipt, VersioningState};

/// Facade over a remote object store with versioning-aware semantics
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List buckets owned by the configured account
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>>;

    /// List objects in a bucket
    ///
    /// Each call is an independent, fresh fetch; ordering is
    /// store-defined (typically lexicographic by key).
    async fn list_objects(&self, bucket: &str, options: &ListOptions) -> Result<Vec<ObjectInfo>>;

    /// List all object versions in a bucket, delete markers included
    async fn list_object_versions(
        &self,
        bucket: &str,
        options: &ListOptions,
    ) -> Result<Vec<ObjectVersion>>;

    /// Current versioning state, `None` if never configured
    async fn get_versioning(&self, bucket: &str) -> Result<Option<VersioningState>>;

    /// Transition versioning to Enabled (`true`) or Suspended (`false`)
    ///
    /// Suspension never erases existing versions; a bucket that has
    /// ever been Enabled retains its version metadata permanently.
    async fn set_versioning(&self, bucket: &str, enable: bool) -> Result<()>;

    /// Remove an object or a specific version
    ///
    /// With `options.version_id`, exactly that version is removed
    /// permanently — a delete marker's own id un-deletes the object.
    /// Without, an Enabled bucket gets a new delete marker while an
    /// unversioned or Suspended bucket loses the current object
    /// permanently.
    async fn delete_object(&self, bucket: &str, key: &str, options: &DeleteOptions) -> Result<()>;

    /// Upload a local file's bytes under the given key
    ///
    /// Creates a new version when versioning is Enabled, otherwise
    /// overwrites the current object. The receipt carries the
    /// store-assigned version id when one is returned.
    async fn upload_file(
        &self,
        local: &Path,
        bucket: &str,
        key: &str,
        options: &UploadOptions,
    ) -> Result<UploadReceipt>;

    /// Download an object's bytes into a local file
    ///
    /// With `options.version_id`, exactly that revision is fetched even
    /// when a delete marker hides the object. Without, the current
    /// visible version is fetched; a delete marker at the top yields
    /// `ObjectNotFound`. The local write is all-or-nothing: the
    /// destination is never left partially written on failure.
    async fn download_file(
        &self,
        bucket: &str,
        key: &str,
        local: &Path,
        options: &DownloadOptions,
    ) -> Result<()>;
}

/// Reject a blank bucket name before any remote call
pub fn validate_bucket(bucket: &str) -> Result<()> {
    if bucket.trim().is_empty() {
        return Err(Error::invalid_argument("bucket name cannot be empty"));
    }
    Ok(())
}

/// Reject blank bucket/key identifiers before any remote call
pub fn validate_bucket_key(bucket: &str, key: &str) -> Result<()> {
    validate_bucket(bucket)?;
    if key.trim().is_empty() {
        return Err(Error::invalid_argument("object key cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_bucket() {
        assert!(validate_bucket("photos").is_ok());
        assert!(matches!(
            validate_bucket(""),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            validate_bucket("   "),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_validate_bucket_key() {
        assert!(validate_bucket_key("photos", "cat.png").is_ok());
        assert!(validate_bucket_key("photos", "").is_err());
        assert!(validate_bucket_key("", "cat.png").is_err());
    }
}

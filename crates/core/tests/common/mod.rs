//! In-memory ObjectStore used to exercise the versioning contract
//!
//! Implements the full delete-marker/version semantics documented on
//! the `ObjectStore` trait, with objects held as per-key revision
//! stacks (newest last). Version ids are store-assigned and opaque,
//! mirroring a real backend.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use ov_core::{
    BucketInfo, DeleteOptions, DownloadOptions, Error, ListOptions, ObjectInfo, ObjectStore,
    ObjectVersion, Result, UploadOptions, UploadReceipt, VersioningState, ensure_readable_file,
    validate_bucket, validate_bucket_key, write_atomic,
};

/// One revision of an object: either stored bytes or a delete marker
#[derive(Debug, Clone)]
struct Revision {
    /// `None` for the unversioned ("null") revision of a bucket that
    /// has never enabled versioning or is currently suspended
    version_id: Option<String>,
    /// `None` marks a tombstone
    data: Option<Vec<u8>>,
}

impl Revision {
    fn is_marker(&self) -> bool {
        self.data.is_none()
    }
}

#[derive(Debug, Default)]
struct BucketState {
    versioning: Option<VersioningState>,
    /// Revisions per key, oldest first
    objects: BTreeMap<String, Vec<Revision>>,
}

#[derive(Debug, Default)]
struct State {
    next_version: u64,
    buckets: BTreeMap<String, BucketState>,
}

impl State {
    fn fresh_version_id(&mut self) -> String {
        self.next_version += 1;
        format!("mv{:06}", self.next_version)
    }

    fn bucket(&mut self, name: &str) -> Result<&mut BucketState> {
        self.buckets
            .get_mut(name)
            .ok_or_else(|| Error::StoreAccess(format!("no such bucket: {name}")))
    }
}

/// In-memory versioned object store
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test fixture helper; bucket creation is not part of the facade
    pub fn create_bucket(&self, name: &str) {
        let mut state = self.state.lock().unwrap();
        state.buckets.entry(name.to_string()).or_default();
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        let state = self.state.lock().unwrap();
        Ok(state.buckets.keys().map(BucketInfo::new).collect())
    }

    async fn list_objects(&self, bucket: &str, options: &ListOptions) -> Result<Vec<ObjectInfo>> {
        validate_bucket(bucket)?;
        let mut state = self.state.lock().unwrap();
        let bucket_state = state.bucket(bucket)?;

        let mut items = Vec::new();
        for (key, revisions) in &bucket_state.objects {
            if let Some(prefix) = &options.prefix
                && !key.starts_with(prefix.as_str())
            {
                continue;
            }
            // Hidden keys: empty stacks cannot occur, a marker on top hides
            if let Some(latest) = revisions.last()
                && let Some(data) = &latest.data
            {
                items.push(ObjectInfo::new(key, data.len() as i64));
            }
            if let Some(max) = options.max_keys
                && items.len() >= max as usize
            {
                break;
            }
        }
        Ok(items)
    }

    async fn list_object_versions(
        &self,
        bucket: &str,
        options: &ListOptions,
    ) -> Result<Vec<ObjectVersion>> {
        validate_bucket(bucket)?;
        let mut state = self.state.lock().unwrap();
        let bucket_state = state.bucket(bucket)?;

        let mut versions = Vec::new();
        for (key, revisions) in &bucket_state.objects {
            if let Some(prefix) = &options.prefix
                && !key.starts_with(prefix.as_str())
            {
                continue;
            }
            for (idx, rev) in revisions.iter().enumerate().rev() {
                versions.push(ObjectVersion {
                    key: key.clone(),
                    version_id: rev.version_id.clone().unwrap_or_else(|| "null".to_string()),
                    is_latest: idx == revisions.len() - 1,
                    is_delete_marker: rev.is_marker(),
                    last_modified: None,
                    size_bytes: rev.data.as_ref().map(|d| d.len() as i64),
                    etag: None,
                });
            }
        }
        if let Some(max) = options.max_keys {
            versions.truncate(max as usize);
        }
        Ok(versions)
    }

    async fn get_versioning(&self, bucket: &str) -> Result<Option<VersioningState>> {
        validate_bucket(bucket)?;
        let mut state = self.state.lock().unwrap();
        Ok(state.bucket(bucket)?.versioning)
    }

    async fn set_versioning(&self, bucket: &str, enable: bool) -> Result<()> {
        validate_bucket(bucket)?;
        let mut state = self.state.lock().unwrap();
        let bucket_state = state.bucket(bucket)?;
        // One-way ratchet: never returns to the never-configured state,
        // and suspension leaves existing versions untouched
        bucket_state.versioning = Some(if enable {
            VersioningState::Enabled
        } else {
            VersioningState::Suspended
        });
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str, options: &DeleteOptions) -> Result<()> {
        validate_bucket_key(bucket, key)?;
        options.validate()?;
        let mut state = self.state.lock().unwrap();

        match &options.version_id {
            Some(target) => {
                let bucket_state = state.bucket(bucket)?;
                let revisions = bucket_state
                    .objects
                    .get_mut(key)
                    .ok_or_else(|| Error::object_not_found(bucket, key, Some(target.as_str())))?;
                let idx = revisions
                    .iter()
                    .position(|r| r.version_id.as_deref() == Some(target.as_str()))
                    .ok_or_else(|| Error::object_not_found(bucket, key, Some(target.as_str())))?;
                // Exact-version delete is permanent, delete markers included
                revisions.remove(idx);
                if revisions.is_empty() {
                    bucket_state.objects.remove(key);
                }
                Ok(())
            }
            None => {
                let versioning = state.bucket(bucket)?.versioning;
                match versioning {
                    Some(VersioningState::Enabled) => {
                        let marker_id = state.fresh_version_id();
                        let bucket_state = state.bucket(bucket)?;
                        let revisions = bucket_state
                            .objects
                            .get_mut(key)
                            .ok_or_else(|| Error::object_not_found(bucket, key, None))?;
                        revisions.push(Revision {
                            version_id: Some(marker_id),
                            data: None,
                        });
                        Ok(())
                    }
                    _ => {
                        // Never versioned or suspended: the current object
                        // is removed permanently
                        let bucket_state = state.bucket(bucket)?;
                        let revisions = bucket_state
                            .objects
                            .get_mut(key)
                            .ok_or_else(|| Error::object_not_found(bucket, key, None))?;
                        if let Some(idx) =
                            revisions.iter().position(|r| r.version_id.is_none())
                        {
                            revisions.remove(idx);
                        } else {
                            revisions.pop();
                        }
                        if revisions.is_empty() {
                            bucket_state.objects.remove(key);
                        }
                        Ok(())
                    }
                }
            }
        }
    }

    async fn upload_file(
        &self,
        local: &Path,
        bucket: &str,
        key: &str,
        _options: &UploadOptions,
    ) -> Result<UploadReceipt> {
        validate_bucket_key(bucket, key)?;
        ensure_readable_file(local)?;
        let data = std::fs::read(local)?;
        let size_bytes = data.len() as u64;

        let mut state = self.state.lock().unwrap();
        let versioning = state.bucket(bucket)?.versioning;

        let version_id = match versioning {
            Some(VersioningState::Enabled) => Some(state.fresh_version_id()),
            _ => None,
        };

        let bucket_state = state.bucket(bucket)?;
        let revisions = bucket_state.objects.entry(key.to_string()).or_default();
        if version_id.is_none() {
            // Overwrite in place: at most one unversioned revision exists
            revisions.retain(|r| r.version_id.is_some());
        }
        revisions.push(Revision {
            version_id: version_id.clone(),
            data: Some(data),
        });

        Ok(UploadReceipt {
            bucket: bucket.to_string(),
            key: key.to_string(),
            size_bytes,
            etag: None,
            version_id,
        })
    }

    async fn download_file(
        &self,
        bucket: &str,
        key: &str,
        local: &Path,
        options: &DownloadOptions,
    ) -> Result<()> {
        validate_bucket_key(bucket, key)?;
        options.validate()?;
        let data = {
            let mut state = self.state.lock().unwrap();
            let bucket_state = state.bucket(bucket)?;
            let revisions = bucket_state
                .objects
                .get(key)
                .ok_or_else(|| Error::object_not_found(bucket, key, options.version_id.as_deref()))?;

            let revision = match &options.version_id {
                Some(target) => revisions
                    .iter()
                    .find(|r| r.version_id.as_deref() == Some(target.as_str()))
                    .ok_or_else(|| Error::object_not_found(bucket, key, Some(target.as_str())))?,
                None => revisions
                    .last()
                    .ok_or_else(|| Error::object_not_found(bucket, key, None))?,
            };

            revision
                .data
                .clone()
                .ok_or_else(|| Error::object_not_found(bucket, key, options.version_id.as_deref()))?
        };

        write_atomic(local, &data)
    }
}

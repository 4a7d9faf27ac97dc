//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from ov-core.
//! The client is constructed explicitly from an alias and holds no
//! process-global state; credentials, endpoint, and the optional proxy
//! trust bundle are bound once at construction.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::config::SharedHttpClient;
use jiff::Timestamp;

use ov_core::{
    Alias, BucketInfo, DeleteOptions, DownloadOptions, Error, ListOptions, ObjectInfo,
    ObjectStore, ObjectVersion, Result, UploadOptions, UploadReceipt, VersioningState,
};

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    #[allow(dead_code)]
    alias: Alias,
}

impl S3Client {
    /// Create a new S3 client from an alias configuration
    pub async fn new(alias: Alias) -> Result<Self> {
        alias.validate()?;

        let credentials = aws_credential_types::Credentials::new(
            alias.access_key.clone(),
            alias.secret_key.clone(),
            None, // session token
            None, // expiry
            "ov-static-credentials",
        );

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(alias.region.clone()))
            .endpoint_url(&alias.endpoint);

        // Trust bundle for connections through a TLS-intercepting proxy
        if let Some(bundle) = &alias.ca_bundle {
            loader = loader.http_client(https_client_with_bundle(bundle)?);
        }

        let config = loader.load().await;

        // Path-style addressing for S3-compatible services
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(alias.bucket_lookup == "path" || alias.bucket_lookup == "auto")
            .build();

        let client = aws_sdk_s3::Client::from_conf(s3_config);

        Ok(Self {
            inner: client,
            alias,
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

/// HTTPS client trusting exactly the roots in the PEM bundle; the
/// bundle must carry every root the proxy chain needs
fn https_client_with_bundle(bundle: &Path) -> Result<SharedHttpClient> {
    use aws_smithy_http_client::{Builder, tls};

    let pem = std::fs::read(bundle)
        .map_err(|e| Error::Config(format!("cannot read CA bundle {}: {e}", bundle.display())))?;

    let trust_store = tls::TrustStore::empty().with_pem_certificate(pem);
    let tls_context = tls::TlsContext::builder()
        .with_trust_store(trust_store)
        .build()
        .map_err(|e| Error::Config(format!("invalid CA bundle {}: {e}", bundle.display())))?;

    Ok(Builder::new()
        .tls_provider(tls::Provider::Rustls(
            tls::rustls_provider::CryptoMode::Ring,
        ))
        .tls_context(tls_context)
        .build_https())
}

/// Map an SDK error onto the ov-core taxonomy
///
/// Not-found service codes become `ObjectNotFound`; everything else
/// (auth, permission, network, service-side) is a store access failure
/// carrying the operation context.
fn classify_sdk_error<E>(err: &SdkError<E>, context: &str) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    match err.code() {
        Some("NoSuchKey") | Some("NoSuchVersion") | Some("NotFound") | Some("NoSuchBucket") => {
            Error::ObjectNotFound(context.to_string())
        }
        Some(code) => Error::StoreAccess(format!("{context}: {code}: {}", display_sdk_error(err))),
        None => Error::StoreAccess(format!("{context}: {}", display_sdk_error(err))),
    }
}

fn display_sdk_error<E>(err: &SdkError<E>) -> String
where
    E: std::error::Error + 'static,
{
    match err {
        SdkError::ServiceError(service_err) => service_err.err().to_string(),
        SdkError::TimeoutError(_) => "request timeout".to_string(),
        SdkError::DispatchFailure(err) => format!("network dispatch error: {err:?}"),
        SdkError::ResponseError(err) => format!("response error: {err:?}"),
        SdkError::ConstructionFailure(err) => format!("request construction failed: {err:?}"),
        other => other.to_string(),
    }
}

fn version_record(v: &aws_sdk_s3::types::ObjectVersion) -> ObjectVersion {
    ObjectVersion {
        key: v.key().unwrap_or_default().to_string(),
        version_id: v.version_id().unwrap_or("null").to_string(),
        is_latest: v.is_latest().unwrap_or(false),
        is_delete_marker: false,
        last_modified: v
            .last_modified()
            .and_then(|dt| Timestamp::from_second(dt.secs()).ok()),
        size_bytes: v.size(),
        etag: v.e_tag().map(|s| s.trim_matches('"').to_string()),
    }
}

fn marker_record(m: &aws_sdk_s3::types::DeleteMarkerEntry) -> ObjectVersion {
    ObjectVersion {
        key: m.key().unwrap_or_default().to_string(),
        version_id: m.version_id().unwrap_or("null").to_string(),
        is_latest: m.is_latest().unwrap_or(false),
        is_delete_marker: true,
        last_modified: m
            .last_modified()
            .and_then(|dt| Timestamp::from_second(dt.secs()).ok()),
        size_bytes: None,
        etag: None,
    }
}

/// Store listing order: by key, then most recent first
fn sort_versions(versions: &mut [ObjectVersion]) {
    versions.sort_by(|a, b| {
        a.key
            .cmp(&b.key)
            .then_with(|| b.last_modified.cmp(&a.last_modified))
    });
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        let response = self
            .inner
            .list_buckets()
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e, "list buckets"))?;

        let buckets = response
            .buckets()
            .iter()
            .map(|b| {
                let mut info = BucketInfo::new(b.name().unwrap_or_default());
                if let Some(creation_date) = b.creation_date() {
                    info.created = Timestamp::from_second(creation_date.secs()).ok();
                }
                info
            })
            .collect();

        Ok(buckets)
    }

    async fn list_objects(&self, bucket: &str, options: &ListOptions) -> Result<Vec<ObjectInfo>> {
        ov_core::validate_bucket(bucket)?;

        let mut items = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut request = self.inner.list_objects_v2().bucket(bucket);
            if let Some(prefix) = &options.prefix {
                request = request.prefix(prefix);
            }
            if let Some(max) = options.max_keys {
                request = request.max_keys(max);
            }
            if let Some(token) = &continuation_token {
                request = request.continuation_token(token);
            }

            let response = request
                .send()
                .await
                .map_err(|e| classify_sdk_error(&e, &format!("list objects in {bucket}")))?;

            for object in response.contents() {
                let key = object.key().unwrap_or_default().to_string();
                let mut info = ObjectInfo::new(&key, object.size().unwrap_or(0));
                if let Some(modified) = object.last_modified() {
                    info.last_modified = Timestamp::from_second(modified.secs()).ok();
                }
                if let Some(etag) = object.e_tag() {
                    info.etag = Some(etag.trim_matches('"').to_string());
                }
                if let Some(sc) = object.storage_class() {
                    info.storage_class = Some(sc.as_str().to_string());
                }
                items.push(info);

                if let Some(max) = options.max_keys
                    && items.len() >= max as usize
                {
                    return Ok(items);
                }
            }

            if !response.is_truncated().unwrap_or(false) {
                break;
            }
            continuation_token = response.next_continuation_token().map(|s| s.to_string());
        }

        Ok(items)
    }

    async fn list_object_versions(
        &self,
        bucket: &str,
        options: &ListOptions,
    ) -> Result<Vec<ObjectVersion>> {
        ov_core::validate_bucket(bucket)?;

        let mut versions = Vec::new();
        let mut key_marker: Option<String> = None;
        let mut version_id_marker: Option<String> = None;

        loop {
            let mut request = self.inner.list_object_versions().bucket(bucket);
            if let Some(prefix) = &options.prefix {
                request = request.prefix(prefix);
            }
            if let Some(max) = options.max_keys {
                request = request.max_keys(max);
            }
            request = request
                .set_key_marker(key_marker.take())
                .set_version_id_marker(version_id_marker.take());

            let response = request
                .send()
                .await
                .map_err(|e| classify_sdk_error(&e, &format!("list versions in {bucket}")))?;

            versions.extend(response.versions().iter().map(version_record));
            versions.extend(response.delete_markers().iter().map(marker_record));

            if let Some(max) = options.max_keys
                && versions.len() >= max as usize
            {
                versions.truncate(max as usize);
                break;
            }
            if !response.is_truncated().unwrap_or(false) {
                break;
            }
            key_marker = response.next_key_marker().map(|s| s.to_string());
            version_id_marker = response.next_version_id_marker().map(|s| s.to_string());
        }

        sort_versions(&mut versions);
        Ok(versions)
    }

    async fn get_versioning(&self, bucket: &str) -> Result<Option<VersioningState>> {
        ov_core::validate_bucket(bucket)?;

        let response = self
            .inner
            .get_bucket_versioning()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e, &format!("get versioning for {bucket}")))?;

        Ok(match response.status() {
            Some(aws_sdk_s3::types::BucketVersioningStatus::Enabled) => {
                Some(VersioningState::Enabled)
            }
            Some(aws_sdk_s3::types::BucketVersioningStatus::Suspended) => {
                Some(VersioningState::Suspended)
            }
            _ => None,
        })
    }

    async fn set_versioning(&self, bucket: &str, enable: bool) -> Result<()> {
        use aws_sdk_s3::types::{BucketVersioningStatus, VersioningConfiguration};

        ov_core::validate_bucket(bucket)?;

        let status = if enable {
            BucketVersioningStatus::Enabled
        } else {
            BucketVersioningStatus::Suspended
        };
        let config = VersioningConfiguration::builder().status(status).build();

        self.inner
            .put_bucket_versioning()
            .bucket(bucket)
            .versioning_configuration(config)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e, &format!("set versioning for {bucket}")))?;

        tracing::debug!(bucket, enable, "updated bucket versioning");
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str, options: &DeleteOptions) -> Result<()> {
        ov_core::validate_bucket_key(bucket, key)?;
        options.validate()?;

        let context = match &options.version_id {
            Some(v) => format!("delete {bucket}/{key} (version {v})"),
            None => format!("delete {bucket}/{key}"),
        };

        self.inner
            .delete_object()
            .bucket(bucket)
            .key(key)
            .set_version_id(options.version_id.clone())
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e, &context))?;

        tracing::debug!(
            bucket,
            key,
            version_id = options.version_id.as_deref(),
            "deleted object"
        );
        Ok(())
    }

    async fn upload_file(
        &self,
        local: &Path,
        bucket: &str,
        key: &str,
        options: &UploadOptions,
    ) -> Result<UploadReceipt> {
        ov_core::validate_bucket_key(bucket, key)?;
        let size_bytes = ov_core::ensure_readable_file(local)?;

        let body = aws_sdk_s3::primitives::ByteStream::from_path(local)
            .await
            .map_err(|e| Error::LocalFileNotFound(format!("{}: {e}", local.display())))?;

        // Explicit content type wins; otherwise guess from the extension
        let content_type = options
            .content_type
            .clone()
            .or_else(|| mime_guess::from_path(local).first_raw().map(str::to_string));

        let response = self
            .inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .set_content_type(content_type)
            .set_cache_control(options.cache_control.clone())
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e, &format!("upload {bucket}/{key}")))?;

        let receipt = UploadReceipt {
            bucket: bucket.to_string(),
            key: key.to_string(),
            size_bytes,
            etag: response.e_tag().map(|s| s.trim_matches('"').to_string()),
            version_id: response.version_id().map(|s| s.to_string()),
        };

        tracing::debug!(
            bucket,
            key,
            version_id = receipt.version_id.as_deref(),
            size_bytes,
            "uploaded object"
        );
        Ok(receipt)
    }

    async fn download_file(
        &self,
        bucket: &str,
        key: &str,
        local: &Path,
        options: &DownloadOptions,
    ) -> Result<()> {
        ov_core::validate_bucket_key(bucket, key)?;
        options.validate()?;

        let context = match &options.version_id {
            Some(v) => format!("download {bucket}/{key} (version {v})"),
            None => format!("download {bucket}/{key}"),
        };

        let response = self
            .inner
            .get_object()
            .bucket(bucket)
            .key(key)
            .set_version_id(options.version_id.clone())
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e, &context))?;

        let data: bytes::Bytes = response
            .body
            .collect()
            .await
            .map_err(|e| Error::StoreAccess(format!("{context}: {e}")))?
            .into_bytes();

        // All-or-nothing on the local side
        ov_core::write_atomic(local, &data)?;

        tracing::debug!(
            bucket,
            key,
            version_id = options.version_id.as_deref(),
            dest = %local.display(),
            bytes = data.len(),
            "downloaded object"
        );
        Ok(())
    }
}

//! Remote path parsing
//!
//! CLI paths take the form `alias/bucket[/key]`, where the alias names a
//! configured storage endpoint.

use crate::error::{Error, Result};

/// A parsed remote location: alias, bucket, and (possibly empty) key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePath {
    pub alias: String,
    pub bucket: String,
    pub key: String,
}

impl RemotePath {
    pub fn new(alias: impl Into<String>, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// True when the path names a bucket without an object key
    pub fn is_bucket(&self) -> bool {
        self.key.is_empty()
    }
}

impl std::fmt::Display for RemotePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.key.is_empty() {
            write!(f, "{}/{}", self.alias, self.bucket)
        } else {
            write!(f, "{}/{}/{}", self.alias, self.bucket, self.key)
        }
    }
}

/// Parse `alias/bucket[/key]`, requiring both alias and bucket
pub fn parse_remote(path: &str) -> Result<RemotePath> {
    if path.is_empty() {
        return Err(Error::invalid_argument("path cannot be empty"));
    }

    let parts: Vec<&str> = path.splitn(3, '/').collect();

    match parts.as_slice() {
        [_] => Err(Error::invalid_argument(format!(
            "bucket name is required: '{path}' (expected alias/bucket[/key])"
        ))),
        [alias, bucket] | [alias, bucket, ""] => {
            let bucket = bucket.trim_end_matches('/');
            if bucket.is_empty() {
                return Err(Error::invalid_argument(format!(
                    "bucket name is required: '{path}' (expected alias/bucket[/key])"
                )));
            }
            Ok(RemotePath::new(*alias, bucket, ""))
        }
        [alias, bucket, key] => Ok(RemotePath::new(*alias, *bucket, *key)),
        _ => unreachable!("splitn(3) yields at most three parts"),
    }
}

/// Parse a path that must include an object key
pub fn parse_remote_object(path: &str) -> Result<RemotePath> {
    let parsed = parse_remote(path)?;
    if parsed.is_bucket() {
        return Err(Error::invalid_argument(format!(
            "object key is required: '{path}' (expected alias/bucket/key)"
        )));
    }
    Ok(parsed)
}

//! Error types shared across the ov crates
//!
//! The facade performs no recovery of its own: every error is surfaced
//! to the caller with enough context (bucket, key, attempted version)
//! to diagnose, and no operation is retried internally.

/// Result type used throughout the ov crates
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for object store operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or contradictory caller input, detected before any
    /// remote call is issued
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Upload source file does not exist or is not readable
    #[error("local file not found: {0}")]
    LocalFileNotFound(String),

    /// The requested key or version does not resolve to retrievable
    /// bytes (including a delete marker hiding the current version)
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    /// Any remote failure: auth, permission, network, or service-side
    #[error("store access error: {0}")]
    StoreAccess(String),

    /// No alias with the given name is configured
    #[error("alias not found: {0}")]
    AliasNotFound(String),

    /// Configuration file could not be read, written, or parsed
    #[error("config error: {0}")]
    Config(String),

    /// Local I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Invalid argument error with context
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Object-not-found error naming the bucket/key (and version, when
    /// one was requested)
    pub fn object_not_found(bucket: &str, key: &str, version_id: Option<&str>) -> Self {
        match version_id {
            Some(v) => Self::ObjectNotFound(format!("{bucket}/{key} (version {v})")),
            None => Self::ObjectNotFound(format!("{bucket}/{key}")),
        }
    }

    /// True for errors raised before any remote call was made
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_)
                | Self::LocalFileNotFound(_)
                | Self::Config(_)
                | Self::AliasNotFound(_)
                | Self::Io(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_not_found_context() {
        let e = Error::object_not_found("photos", "cat.png", None);
        assert_eq!(e.to_string(), "object not found: photos/cat.png");

        let e = Error::object_not_found("photos", "cat.png", Some("3sL4"));
        assert_eq!(e.to_string(), "object not found: photos/cat.png (version 3sL4)");
    }

    #[test]
    fn test_is_local() {
        assert!(Error::invalid_argument("empty bucket").is_local());
        assert!(Error::LocalFileNotFound("missing.txt".into()).is_local());
        assert!(!Error::StoreAccess("503".into()).is_local());
        assert!(!Error::ObjectNotFound("b/k".into()).is_local());
    }
}

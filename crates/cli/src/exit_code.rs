//! Process exit codes
//!
//! Stable codes so scripts can distinguish failure classes.

use ov_core::Error;

/// Exit code for the ov binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    UsageError = 2,
    NotFound = 3,
    NetworkError = 4,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Exit code for a failed store operation
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::InvalidArgument(_) => Self::UsageError,
            Error::ObjectNotFound(_) | Error::AliasNotFound(_) | Error::LocalFileNotFound(_) => {
                Self::NotFound
            }
            Error::StoreAccess(_) => Self::NetworkError,
            Error::Config(_) | Error::Io(_) => Self::GeneralError,
        }
    }
}

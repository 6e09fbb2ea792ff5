//! Error types shared by every backend and decorator.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
///
/// Callers that only care about *what kind* of failure happened (for example, a test that
/// checks "missing" vs "present but empty" arguments) should match on this rather than on
/// the concrete variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required argument was absent or unusable.
    InvalidArgument,
    /// An argument was present but empty/blank, or held a value outside its defined set.
    OutOfRange,
    /// The file or directory the operation needs does not exist.
    NotFound,
    /// File content could not be decoded with the requested encoding.
    InvalidData,
    /// The host storage reported a failure.
    Io,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("argument `{name}` out of range: {reason}")]
    OutOfRange { name: &'static str, reason: String },

    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("{} is not valid {encoding}", path.display())]
    Decode {
        path: PathBuf,
        encoding: &'static str,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Error::OutOfRange { .. } => ErrorKind::OutOfRange,
            Error::FileNotFound { .. } | Error::DirectoryNotFound { .. } => ErrorKind::NotFound,
            Error::Decode { .. } => ErrorKind::InvalidData,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(name: &'static str, reason: impl Into<String>) -> Self {
        Error::OutOfRange {
            name,
            reason: reason.into(),
        }
    }
}

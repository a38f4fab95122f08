//! Rewrite errors.

use std::io;
use std::path::{Path, PathBuf};

/// Coarse error classification, for callers that branch on failure type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingField,
    InvalidField,
    Io,
    Parse,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingField => "missing-field",
            ErrorKind::InvalidField => "invalid-field",
            ErrorKind::Io => "io-error",
            ErrorKind::Parse => "parse-error",
        }
    }
}

/// Errors from loading, deriving or persisting a rewritten config.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error("missing required field: {key}")]
    MissingField { key: String },

    #[error("invalid field {key}: expected {expected}")]
    InvalidField { key: String, expected: String },

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Parse error in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

impl RewriteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RewriteError::MissingField { .. } => ErrorKind::MissingField,
            RewriteError::InvalidField { .. } => ErrorKind::InvalidField,
            RewriteError::Io { .. } => ErrorKind::Io,
            RewriteError::Parse { .. } => ErrorKind::Parse,
        }
    }

    pub(crate) fn missing(key: &str) -> Self {
        RewriteError::MissingField {
            key: key.to_string(),
        }
    }

    pub(crate) fn invalid(key: &str, expected: &str) -> Self {
        RewriteError::InvalidField {
            key: key.to_string(),
            expected: expected.to_string(),
        }
    }

    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        RewriteError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &Path, message: impl Into<String>) -> Self {
        RewriteError::Parse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

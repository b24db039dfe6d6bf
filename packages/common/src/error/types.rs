//! Core error types and definitions

use std::sync::Arc;
use thiserror::Error;

/// Failure classified by an [`ErrorKind`], with optional context and cause
///
/// Cloning an `Error` shares the same underlying failure, so a captured error
/// can be handed out repeatedly without losing its identity.
#[derive(Debug, Clone)]
pub struct Error {
    pub(super) inner: Arc<ErrorInner>,
}

#[derive(Debug)]
pub(super) struct ErrorInner {
    /// Broad classification
    pub kind: ErrorKind,
    /// What was being attempted
    pub context: Option<String>,
    /// Underlying cause, if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    /// Captured when the error is built
    #[cfg(feature = "full-backtrace")]
    pub backtrace: backtrace::Backtrace,
}

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Reading or writing a stream failed
    #[error("I/O error")]
    Io,

    /// Key or trust material could not be set up
    #[error("Key management error")]
    KeyManagement,

    /// A configuration value was rejected
    #[error("Configuration error")]
    Configuration,

    /// Parsing of encoded data failed
    #[error("Parsing error")]
    Parsing,

    /// Encoding to a canonical form failed
    #[error("Encoding error")]
    Encoding,

    /// The caller passed an unusable argument
    #[error("Invalid argument")]
    InvalidArgument,

    /// Broken internal invariant
    #[error("Internal error")]
    Internal,
}

/// Result carrying an [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

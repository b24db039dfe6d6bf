//! Provider error types

/// Errors produced by revoked-certificate entries and the CRL container
#[derive(Debug, thiserror::Error)]
pub enum CrlError {
    /// Malformed CRL or entry data
    #[error("CRL parsing failed: {0}")]
    Parsing(String),
    /// The entry could not be DER encoded
    #[error("CRL entry encoding failed: {0}")]
    Encoding(String),
    /// The native printer failed part way through
    #[error("CRL entry printing failed: {0}")]
    Print(String),
    /// The handle does not name a live native record
    #[error("Unknown native handle: {0}")]
    UnknownHandle(u64),
}

/// Errors produced while creating sockets
#[derive(Debug, thiserror::Error)]
pub enum SocketError {
    /// The factory could not build its parameters template; the captured
    /// failure is returned unchanged by every creation call.
    #[error("{0}")]
    DelayedInit(tlsprov_common::Error),
    /// A required argument was absent
    #[error("Argument must not be absent: {0}")]
    NullArgument(&'static str),
    /// The operation needs a connected socket
    #[error("Socket is not connected.")]
    NotConnected,
}

/// Errors produced while building a parameters template
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamsError {
    /// The protocol list is empty
    #[error("No protocols enabled")]
    NoProtocols,
    /// A protocol name the TLS stack does not offer
    #[error("Unknown protocol: {0}")]
    UnknownProtocol(String),
    /// No suite matches the enabled protocols
    #[error("No cipher suites available for the enabled protocols")]
    NoCipherSuites,
    /// A suite name the TLS stack does not offer
    #[error("Unknown cipher suite: {0}")]
    UnknownCipherSuite(String),
    /// Configuration could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<ParamsError> for tlsprov_common::Error {
    fn from(err: ParamsError) -> Self {
        let kind = match &err {
            ParamsError::Config(_) => tlsprov_common::ErrorKind::Configuration,
            _ => tlsprov_common::ErrorKind::KeyManagement,
        };
        tlsprov_common::Error::with_source(kind, err)
    }
}

impl From<CrlError> for tlsprov_common::Error {
    fn from(err: CrlError) -> Self {
        let kind = match &err {
            CrlError::Parsing(_) => tlsprov_common::ErrorKind::Parsing,
            CrlError::Encoding(_) | CrlError::Print(_) => tlsprov_common::ErrorKind::Encoding,
            CrlError::UnknownHandle(_) => tlsprov_common::ErrorKind::Internal,
        };
        tlsprov_common::Error::with_source(kind, err)
    }
}

/// Result type for CRL operations
pub type CrlResult<T> = std::result::Result<T, CrlError>;

/// Result type for socket creation
pub type SocketResult<T> = std::result::Result<T, SocketError>;

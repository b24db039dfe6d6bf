//! Interface to the native layer that owns revoked-certificate records

use std::fmt;
use std::io;
use std::num::NonZeroU64;

use crate::error::CrlResult;

/// Opaque reference to one native revoked-certificate record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevokedHandle(NonZeroU64);

impl RevokedHandle {
    /// Wrap a raw handle; zero is the "no record" sentinel and yields `None`
    #[must_use]
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    /// Raw handle value, never zero
    #[must_use]
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for RevokedHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0.get())
    }
}

/// Which entry extensions to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
    /// Extensions marked critical
    Critical,
    /// Extensions not marked critical
    NonCritical,
}

impl ExtensionKind {
    /// The opposite kind
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Critical => Self::NonCritical,
            Self::NonCritical => Self::Critical,
        }
    }
}

/// One extension of a revoked-certificate record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionRef {
    /// Dotted-decimal object identifier
    pub oid: String,
    /// Whether the extension is marked critical
    pub critical: bool,
    /// Raw extension value (contents of the `extnValue` octet string)
    pub value: Vec<u8>,
}

/// Operations the native layer offers on revoked-certificate records
///
/// Releasing a handle twice is undefined at this layer; callers own the
/// guarantee that `release` runs at most once per handle.
pub trait RevokedRecordBackend: Send + Sync {
    /// Big-endian two's-complement serial number
    fn serial_number(&self, handle: RevokedHandle) -> CrlResult<Vec<u8>>;

    /// DER encoding of the revocation date, not validated by the native layer
    fn revocation_date_der(&self, handle: RevokedHandle) -> CrlResult<Vec<u8>>;

    /// OIDs of the record's extensions of one kind, in record order
    fn extension_oids(&self, handle: RevokedHandle, kind: ExtensionKind) -> Vec<String>;

    /// Look up one extension by OID
    fn extension(&self, handle: RevokedHandle, oid: &str) -> Option<ExtensionRef>;

    /// Whether the crypto engine understands this extension type
    fn is_supported_extension(&self, extension: &ExtensionRef) -> bool;

    /// DER `OCTET STRING` wrapping the value of the extension with this OID
    fn extension_value(&self, handle: RevokedHandle, oid: &str) -> Option<Vec<u8>>;

    /// Canonical DER encoding of the record
    fn encode(&self, handle: RevokedHandle) -> CrlResult<Vec<u8>>;

    /// Write a human readable dump of the record to `sink`
    fn print(&self, handle: RevokedHandle, sink: &mut dyn io::Write) -> io::Result<()>;

    /// Free the record
    fn release(&self, handle: RevokedHandle);
}

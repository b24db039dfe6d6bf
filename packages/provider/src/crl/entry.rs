//! Wrapper around one native revoked-certificate record

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use const_oid::db::rfc5280::ID_CE_CRL_REASONS;
use der::asn1::OctetString;
use der::Decode;
use tlsprov_common::LoggingTransformer;

use super::backend::{ExtensionKind, RevokedHandle, RevokedRecordBackend};
use super::serial::SerialNumber;
use crate::error::{CrlError, CrlResult};

/// Reason a certificate was revoked (RFC 5280, section 5.3.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrlReason {
    /// No reason given
    Unspecified,
    /// The subject's key was compromised
    KeyCompromise,
    /// The issuing CA's key was compromised
    CaCompromise,
    /// Subject details changed
    AffiliationChanged,
    /// Replaced by a newer certificate
    Superseded,
    /// No longer needed
    CessationOfOperation,
    /// Temporarily on hold
    CertificateHold,
    /// Released from hold
    RemoveFromCrl,
    /// Privileges were withdrawn
    PrivilegeWithdrawn,
    /// Attribute authority compromised
    AaCompromise,
}

impl CrlReason {
    /// Map a reason code; 7 is unassigned
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::Unspecified,
            1 => Self::KeyCompromise,
            2 => Self::CaCompromise,
            3 => Self::AffiliationChanged,
            4 => Self::Superseded,
            5 => Self::CessationOfOperation,
            6 => Self::CertificateHold,
            8 => Self::RemoveFromCrl,
            9 => Self::PrivilegeWithdrawn,
            10 => Self::AaCompromise,
            _ => return None,
        })
    }

    /// Numeric reason code
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Unspecified => 0,
            Self::KeyCompromise => 1,
            Self::CaCompromise => 2,
            Self::AffiliationChanged => 3,
            Self::Superseded => 4,
            Self::CessationOfOperation => 5,
            Self::CertificateHold => 6,
            Self::RemoveFromCrl => 8,
            Self::PrivilegeWithdrawn => 9,
            Self::AaCompromise => 10,
        }
    }
}

/// Owns a native handle and frees it at most once
struct HandleGuard {
    backend: Arc<dyn RevokedRecordBackend>,
    handle: RevokedHandle,
    // Holds the raw handle while live, zero once released.
    live: AtomicU64,
}

impl HandleGuard {
    fn new(backend: Arc<dyn RevokedRecordBackend>, handle: RevokedHandle) -> Self {
        Self {
            backend,
            handle,
            live: AtomicU64::new(handle.get()),
        }
    }

    fn release(&self) {
        let raw = self.live.swap(0, Ordering::AcqRel);
        if let Some(handle) = RevokedHandle::new(raw) {
            self.backend.release(handle);
            LoggingTransformer::log_handle_release("crl entry", raw);
        }
    }
}

impl Drop for HandleGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// One revoked certificate of a CRL
///
/// The revocation date is parsed when the entry is created, because the
/// native layer does not validate time structures until they are read. An
/// entry whose date does not parse is never created. Everything else is
/// fetched from the native record on demand.
///
/// The native record is released when the entry is closed or dropped,
/// whichever comes first.
pub struct CrlEntry {
    guard: HandleGuard,
    revocation_date: DateTime<Utc>,
}

impl CrlEntry {
    /// Take ownership of a native record
    ///
    /// On error the record has already been released.
    pub fn new(backend: Arc<dyn RevokedRecordBackend>, handle: RevokedHandle) -> CrlResult<Self> {
        let guard = HandleGuard::new(backend, handle);
        let date_der = guard.backend.revocation_date_der(handle)?;
        let revocation_date = super::parse_time_der(&date_der).map_err(|e| {
            tracing::warn!("Rejecting CRL entry {}: {}", handle, e);
            e
        })?;

        Ok(Self {
            guard,
            revocation_date,
        })
    }

    fn backend(&self) -> &dyn RevokedRecordBackend {
        self.guard.backend.as_ref()
    }

    fn handle(&self) -> RevokedHandle {
        self.guard.handle
    }

    /// Serial number of the revoked certificate
    pub fn serial_number(&self) -> CrlResult<SerialNumber> {
        let bytes = self.backend().serial_number(self.handle())?;
        Ok(SerialNumber::from_be_bytes(&bytes))
    }

    /// When the certificate was revoked
    ///
    /// Returns a copy; the entry's own value cannot be changed through it.
    #[must_use]
    pub fn revocation_date(&self) -> DateTime<Utc> {
        self.revocation_date
    }

    /// OIDs of the critical entry extensions
    ///
    /// `None` means the entry has no extensions at all; `Some` of an empty
    /// set means it only has non-critical ones.
    #[must_use]
    pub fn critical_extension_oids(&self) -> Option<HashSet<String>> {
        self.extension_oids(ExtensionKind::Critical)
    }

    /// OIDs of the non-critical entry extensions
    ///
    /// Same convention as [`critical_extension_oids`](Self::critical_extension_oids).
    #[must_use]
    pub fn non_critical_extension_oids(&self) -> Option<HashSet<String>> {
        self.extension_oids(ExtensionKind::NonCritical)
    }

    fn extension_oids(&self, kind: ExtensionKind) -> Option<HashSet<String>> {
        let oids = self.backend().extension_oids(self.handle(), kind);
        if oids.is_empty()
            && self
                .backend()
                .extension_oids(self.handle(), kind.other())
                .is_empty()
        {
            return None;
        }
        Some(oids.into_iter().collect())
    }

    /// DER `OCTET STRING` holding the value of the extension with this OID
    #[must_use]
    pub fn extension_value(&self, oid: &str) -> Option<Vec<u8>> {
        self.backend().extension_value(self.handle(), oid)
    }

    /// Whether the record carries any extension at all
    #[must_use]
    pub fn has_extensions(&self) -> bool {
        !self
            .backend()
            .extension_oids(self.handle(), ExtensionKind::NonCritical)
            .is_empty()
            || !self
                .backend()
                .extension_oids(self.handle(), ExtensionKind::Critical)
                .is_empty()
    }

    /// Whether any critical extension is of a type the engine does not know
    #[must_use]
    pub fn has_unsupported_critical_extension(&self) -> bool {
        let backend = self.backend();
        backend
            .extension_oids(self.handle(), ExtensionKind::Critical)
            .iter()
            .any(|oid| match backend.extension(self.handle(), oid) {
                Some(extension) => !backend.is_supported_extension(&extension),
                None => true,
            })
    }

    /// Reason code from the reason-code entry extension, if present and valid
    #[must_use]
    pub fn revocation_reason(&self) -> Option<CrlReason> {
        let wrapped = self.extension_value(&ID_CE_CRL_REASONS.to_string())?;
        let value = OctetString::from_der(&wrapped)
            .and_then(|octets| x509_cert::ext::pkix::CrlReason::from_der(octets.as_bytes()));
        match value {
            Ok(reason) => u8::try_from(reason as u32).ok().and_then(CrlReason::from_code),
            Err(e) => {
                tracing::debug!("Ignoring malformed reason code on {}: {}", self.handle(), e);
                None
            }
        }
    }

    /// Canonical DER encoding of the entry
    pub fn encoded(&self) -> CrlResult<Vec<u8>> {
        self.backend().encode(self.handle())
    }

    /// Release the native record now instead of at drop
    pub fn close(self) {
        self.guard.release();
    }
}

impl CrlEntry {
    /// Human readable dump from the native printer
    ///
    /// Fails when the printer does; [`Display`](fmt::Display) instead shows
    /// the partial output followed by a failure marker.
    pub fn text(&self) -> CrlResult<String> {
        let mut sink = Vec::new();
        self.backend()
            .print(self.handle(), &mut sink)
            .map_err(|e| CrlError::Print(e.to_string()))?;
        Ok(String::from_utf8_lossy(&sink).into_owned())
    }
}

impl fmt::Display for CrlEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sink = Vec::new();
        let printed = self.backend().print(self.handle(), &mut sink);
        f.write_str(&String::from_utf8_lossy(&sink))?;
        if let Err(e) = printed {
            write!(f, "<print failed: {e}>")?;
        }
        Ok(())
    }
}

impl fmt::Debug for CrlEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrlEntry")
            .field("handle", &self.guard.live.load(Ordering::Acquire))
            .field("revocation_date", &self.revocation_date)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::AtomicUsize;

    use crate::crl::ExtensionRef;

    #[derive(Default)]
    struct CountingBackend {
        releases: AtomicUsize,
    }

    impl RevokedRecordBackend for CountingBackend {
        fn serial_number(&self, _: RevokedHandle) -> CrlResult<Vec<u8>> {
            Ok(vec![1])
        }
        fn revocation_date_der(&self, _: RevokedHandle) -> CrlResult<Vec<u8>> {
            // UTCTime 240102030405Z
            Ok(b"\x17\x0d240102030405Z".to_vec())
        }
        fn extension_oids(&self, _: RevokedHandle, _: ExtensionKind) -> Vec<String> {
            Vec::new()
        }
        fn extension(&self, _: RevokedHandle, _: &str) -> Option<ExtensionRef> {
            None
        }
        fn is_supported_extension(&self, _: &ExtensionRef) -> bool {
            true
        }
        fn extension_value(&self, _: RevokedHandle, _: &str) -> Option<Vec<u8>> {
            None
        }
        fn encode(&self, _: RevokedHandle) -> CrlResult<Vec<u8>> {
            Ok(Vec::new())
        }
        fn print(&self, _: RevokedHandle, _: &mut dyn io::Write) -> io::Result<()> {
            Ok(())
        }
        fn release(&self, _: RevokedHandle) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_guard_releases_once_from_both_paths() {
        let backend = Arc::new(CountingBackend::default());
        let handle = RevokedHandle::new(9).unwrap();
        let entry = CrlEntry::new(backend.clone(), handle).unwrap();

        // explicit path, then the drop path of the same guard
        entry.guard.release();
        drop(entry);

        assert_eq!(backend.releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_release_frees_once() {
        let backend = Arc::new(CountingBackend::default());
        let handle = RevokedHandle::new(3).unwrap();
        let entry = Arc::new(CrlEntry::new(backend.clone(), handle).unwrap());

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let entry = Arc::clone(&entry);
                std::thread::spawn(move || entry.guard.release())
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        drop(entry);

        assert_eq!(backend.releases.load(Ordering::SeqCst), 1);
    }
}

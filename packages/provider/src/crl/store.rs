//! In-process native layer backed by DER decoded CRL records

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use const_oid::db::rfc5280::{
    ID_CE_BASIC_CONSTRAINTS, ID_CE_CERTIFICATE_POLICIES, ID_CE_EXT_KEY_USAGE,
    ID_CE_INHIBIT_ANY_POLICY, ID_CE_KEY_USAGE, ID_CE_NAME_CONSTRAINTS, ID_CE_POLICY_CONSTRAINTS,
    ID_CE_POLICY_MAPPINGS, ID_CE_SUBJECT_ALT_NAME,
};
use const_oid::ObjectIdentifier;
use der::Encode;
use x509_cert::crl::RevokedCert;
use x509_cert::ext::Extension;

use super::backend::{ExtensionKind, ExtensionRef, RevokedHandle, RevokedRecordBackend};
use super::serial::SerialNumber;
use crate::error::{CrlError, CrlResult};

/// Netscape certificate type; not in the PKIX OID tables
const NETSCAPE_CERT_TYPE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.113730.1.1");

/// Extension types the crypto engine knows how to process
const SUPPORTED_EXTENSIONS: &[ObjectIdentifier] = &[
    NETSCAPE_CERT_TYPE,
    ID_CE_KEY_USAGE,
    ID_CE_SUBJECT_ALT_NAME,
    ID_CE_BASIC_CONSTRAINTS,
    ID_CE_CERTIFICATE_POLICIES,
    ID_CE_EXT_KEY_USAGE,
    ID_CE_POLICY_CONSTRAINTS,
    ID_CE_NAME_CONSTRAINTS,
    ID_CE_POLICY_MAPPINGS,
    ID_CE_INHIBIT_ANY_POLICY,
];

/// Handle table of revoked-certificate records
///
/// Every inserted record gets a fresh handle and stays alive until that
/// handle is released.
#[derive(Debug)]
pub struct DerCrlStore {
    records: RwLock<HashMap<u64, RevokedCert>>,
    next_handle: AtomicU64,
}

impl DerCrlStore {
    /// Empty store; the first handle handed out is 1
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::with_capacity(64)),
            next_handle: AtomicU64::new(1),
        }
    }

    /// Store a copy of `record` under a new handle
    pub fn insert(&self, record: RevokedCert) -> RevokedHandle {
        loop {
            let raw = self.next_handle.fetch_add(1, Ordering::Relaxed);
            // zero is the released sentinel, skip it on wrap-around
            if let Some(handle) = RevokedHandle::new(raw) {
                self.write().insert(raw, record);
                return handle;
            }
        }
    }

    /// Number of records not yet released
    #[must_use]
    pub fn live_handles(&self) -> usize {
        self.read().len()
    }

    fn with_record<T>(
        &self,
        handle: RevokedHandle,
        f: impl FnOnce(&RevokedCert) -> T,
    ) -> Option<T> {
        let records = self.read();
        let record = records.get(&handle.get());
        if record.is_none() {
            tracing::warn!("Native CRL record {} is not live", handle);
        }
        record.map(f)
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<u64, RevokedCert>> {
        match self.records.read() {
            Ok(records) => records,
            Err(poisoned) => {
                tracing::warn!("CRL record table read lock poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<u64, RevokedCert>> {
        match self.records.write() {
            Ok(records) => records,
            Err(poisoned) => {
                tracing::warn!("CRL record table write lock poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}

impl Default for DerCrlStore {
    fn default() -> Self {
        Self::new()
    }
}

fn extensions(record: &RevokedCert) -> &[Extension] {
    record.crl_entry_extensions.as_deref().unwrap_or_default()
}

fn find_extension<'a>(record: &'a RevokedCert, oid: &str) -> Option<&'a Extension> {
    extensions(record)
        .iter()
        .find(|ext| ext.extn_id.to_string() == oid)
}

fn print_record(record: &RevokedCert, sink: &mut dyn io::Write) -> io::Result<()> {
    let serial = SerialNumber::from_be_bytes(record.serial_number.as_bytes());
    writeln!(sink, "    Serial Number: {serial}")?;
    match super::time_to_utc(&record.revocation_date) {
        Ok(date) => writeln!(
            sink,
            "        Revocation Date: {}",
            date.format("%b %e %H:%M:%S %Y GMT")
        )?,
        Err(_) => writeln!(sink, "        Revocation Date: Bad time value")?,
    }
    let extensions = extensions(record);
    if !extensions.is_empty() {
        writeln!(sink, "        CRL entry extensions:")?;
        for ext in extensions {
            let critical = if ext.critical { " critical" } else { "" };
            writeln!(sink, "            {}:{}", ext.extn_id, critical)?;
            writeln!(sink, "                {}", hex::encode(ext.extn_value.as_bytes()))?;
        }
    }
    Ok(())
}

impl RevokedRecordBackend for DerCrlStore {
    fn serial_number(&self, handle: RevokedHandle) -> CrlResult<Vec<u8>> {
        self.with_record(handle, |r| r.serial_number.as_bytes().to_vec())
            .ok_or(CrlError::UnknownHandle(handle.get()))
    }

    fn revocation_date_der(&self, handle: RevokedHandle) -> CrlResult<Vec<u8>> {
        self.with_record(handle, |r| {
            r.revocation_date
                .to_der()
                .map_err(|e| CrlError::Parsing(format!("revocation date: {e}")))
        })
        .unwrap_or(Err(CrlError::UnknownHandle(handle.get())))
    }

    fn extension_oids(&self, handle: RevokedHandle, kind: ExtensionKind) -> Vec<String> {
        let critical = kind == ExtensionKind::Critical;
        self.with_record(handle, |r| {
            extensions(r)
                .iter()
                .filter(|ext| ext.critical == critical)
                .map(|ext| ext.extn_id.to_string())
                .collect()
        })
        .unwrap_or_default()
    }

    fn extension(&self, handle: RevokedHandle, oid: &str) -> Option<ExtensionRef> {
        self.with_record(handle, |r| {
            find_extension(r, oid).map(|ext| ExtensionRef {
                oid: ext.extn_id.to_string(),
                critical: ext.critical,
                value: ext.extn_value.as_bytes().to_vec(),
            })
        })
        .flatten()
    }

    fn is_supported_extension(&self, extension: &ExtensionRef) -> bool {
        SUPPORTED_EXTENSIONS
            .iter()
            .any(|oid| oid.to_string() == extension.oid)
    }

    fn extension_value(&self, handle: RevokedHandle, oid: &str) -> Option<Vec<u8>> {
        self.with_record(handle, |r| {
            find_extension(r, oid).and_then(|ext| ext.extn_value.to_der().ok())
        })
        .flatten()
    }

    fn encode(&self, handle: RevokedHandle) -> CrlResult<Vec<u8>> {
        self.with_record(handle, |r| {
            r.to_der().map_err(|e| CrlError::Encoding(e.to_string()))
        })
        .unwrap_or(Err(CrlError::UnknownHandle(handle.get())))
    }

    fn print(&self, handle: RevokedHandle, sink: &mut dyn io::Write) -> io::Result<()> {
        self.with_record(handle, |r| print_record(r, sink))
            .unwrap_or_else(|| {
                Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("native CRL record {handle} is not live"),
                ))
            })
    }

    fn release(&self, handle: RevokedHandle) {
        if self.write().remove(&handle.get()).is_none() {
            tracing::warn!("Native CRL record {} released twice", handle);
        }
    }
}

//! CRL container handing out revoked-certificate entries

use std::sync::Arc;

use base64::engine::Engine;
use chrono::{DateTime, Utc};
use der::Decode;
use x509_cert::crl::CertificateList;

use super::entry::CrlEntry;
use super::serial::SerialNumber;
use super::store::DerCrlStore;
use crate::error::{CrlError, CrlResult};

/// A decoded X.509 certificate revocation list
///
/// Each entry handed out owns its own native record, so entries may outlive
/// the list.
#[derive(Debug)]
pub struct RevocationList {
    crl: CertificateList,
    this_update: DateTime<Utc>,
    next_update: Option<DateTime<Utc>>,
    store: Arc<DerCrlStore>,
}

impl RevocationList {
    /// Decode a DER or PEM encoded CRL
    pub fn parse(bytes: &[u8]) -> CrlResult<Self> {
        if bytes.starts_with(b"-----BEGIN") {
            Self::from_pem(bytes)
        } else {
            Self::from_der(bytes)
        }
    }

    /// Decode a PEM `X509 CRL` block
    pub fn from_pem(pem: &[u8]) -> CrlResult<Self> {
        let crl_pem = std::str::from_utf8(pem)
            .map_err(|_| CrlError::Parsing("Invalid UTF-8 in PEM CRL".to_string()))?;

        let mut der_data = Vec::new();
        let mut in_crl = false;
        for line in crl_pem.lines() {
            let line = line.trim();
            if line.starts_with("-----BEGIN") && line.contains("CRL") {
                in_crl = true;
            } else if line.starts_with("-----END") && line.contains("CRL") {
                break;
            } else if in_crl && !line.is_empty() {
                let decoded = base64::engine::general_purpose::STANDARD
                    .decode(line)
                    .map_err(|e| CrlError::Parsing(format!("Invalid base64 in PEM CRL: {e}")))?;
                der_data.extend(decoded);
            }
        }

        if der_data.is_empty() {
            return Err(CrlError::Parsing("No CRL data found in PEM".to_string()));
        }

        Self::from_der(&der_data)
    }

    /// Decode a DER encoded CRL
    pub fn from_der(der_bytes: &[u8]) -> CrlResult<Self> {
        let crl = CertificateList::from_der(der_bytes)
            .map_err(|e| CrlError::Parsing(format!("CRL parsing failed: {e}")))?;

        let this_update = super::time_to_utc(&crl.tbs_cert_list.this_update)?;
        let next_update = crl
            .tbs_cert_list
            .next_update
            .as_ref()
            .map(super::time_to_utc)
            .transpose()?;

        tracing::info!(
            "Parsed CRL from {} with {} revoked certificates, next update: {:?}",
            crl.tbs_cert_list.issuer,
            crl.tbs_cert_list
                .revoked_certificates
                .as_ref()
                .map_or(0, Vec::len),
            next_update
        );

        Ok(Self {
            crl,
            this_update,
            next_update,
            store: Arc::new(DerCrlStore::new()),
        })
    }

    /// Issuer distinguished name
    #[must_use]
    pub fn issuer(&self) -> String {
        self.crl.tbs_cert_list.issuer.to_string()
    }

    /// Issue date of this list
    #[must_use]
    pub fn this_update(&self) -> DateTime<Utc> {
        self.this_update
    }

    /// Date by which the next list is due, if stated
    #[must_use]
    pub fn next_update(&self) -> Option<DateTime<Utc>> {
        self.next_update
    }

    /// Number of revoked certificates
    #[must_use]
    pub fn len(&self) -> usize {
        self.revoked().len()
    }

    /// Whether no certificate is listed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.revoked().is_empty()
    }

    /// Native records currently held by entries of this list
    #[must_use]
    pub fn live_entries(&self) -> usize {
        self.store.live_handles()
    }

    /// Wrap every revoked certificate in its own entry
    ///
    /// Fails on the first entry whose revocation date does not parse.
    pub fn entries(&self) -> CrlResult<Vec<CrlEntry>> {
        self.revoked()
            .iter()
            .map(|revoked| {
                let handle = self.store.insert(revoked.clone());
                CrlEntry::new(self.store.clone(), handle)
            })
            .collect()
    }

    /// Entry for the certificate with this serial number
    pub fn find(&self, serial: &SerialNumber) -> CrlResult<Option<CrlEntry>> {
        let revoked = self
            .revoked()
            .iter()
            .find(|r| SerialNumber::from_be_bytes(r.serial_number.as_bytes()) == *serial);
        match revoked {
            Some(revoked) => {
                let handle = self.store.insert(revoked.clone());
                CrlEntry::new(self.store.clone(), handle).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Whether the list revokes the certificate with this serial number
    #[must_use]
    pub fn is_revoked(&self, serial: &SerialNumber) -> bool {
        self.revoked()
            .iter()
            .any(|r| SerialNumber::from_be_bytes(r.serial_number.as_bytes()) == *serial)
    }

    fn revoked(&self) -> &[x509_cert::crl::RevokedCert] {
        self.crl
            .tbs_cert_list
            .revoked_certificates
            .as_deref()
            .unwrap_or_default()
    }
}

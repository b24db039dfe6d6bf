//! Revoked-certificate entries
//!
//! A [`CrlEntry`] wraps one revoked-certificate record owned by the native
//! layer ([`RevokedRecordBackend`]). The entry parses its revocation date when
//! it is created, queries everything else on demand, and releases the native
//! record exactly once.

mod backend;
mod entry;
mod list;
mod serial;
mod store;

pub use backend::{ExtensionKind, ExtensionRef, RevokedHandle, RevokedRecordBackend};
pub use entry::{CrlEntry, CrlReason};
pub use list::RevocationList;
pub use serial::SerialNumber;
pub use store::DerCrlStore;

use chrono::{DateTime, Utc};
use der::Decode;
use x509_cert::time::Time;

use crate::error::{CrlError, CrlResult};

/// Convert an X.509 time to UTC
pub(crate) fn time_to_utc(time: &Time) -> CrlResult<DateTime<Utc>> {
    let since_epoch = time.to_unix_duration();
    let secs = i64::try_from(since_epoch.as_secs())
        .map_err(|_| CrlError::Parsing(format!("time out of range: {since_epoch:?}")))?;
    DateTime::from_timestamp(secs, since_epoch.subsec_nanos())
        .ok_or_else(|| CrlError::Parsing(format!("time out of range: {secs}")))
}

/// Parse a DER encoded `UTCTime` or `GeneralizedTime`
pub(crate) fn parse_time_der(der: &[u8]) -> CrlResult<DateTime<Utc>> {
    let time = Time::from_der(der)
        .map_err(|e| CrlError::Parsing(format!("invalid revocation date: {e}")))?;
    time_to_utc(&time)
}

//! Tests for error context propagation and shared identity

use std::error::Error as _;

use tlsprov_common::{Error, ErrorKind};

#[test]
fn test_context_keeps_kind() {
    let err = Error::new(ErrorKind::KeyManagement).context("no default trust managers");

    assert_eq!(err.kind(), &ErrorKind::KeyManagement);
    assert_eq!(err.get_context(), Some("no default trust managers"));
    assert_eq!(err.to_string(), "Key management error: no default trust managers");
}

#[test]
fn test_context_on_contextual_error_nests_it() {
    let inner = Error::new(ErrorKind::Parsing).context("bad revocation date");
    let outer = inner.clone().context("loading CRL");

    assert_eq!(outer.kind(), &ErrorKind::Parsing);
    let nearest = outer.chain().next().and_then(|e| e.downcast_ref::<Error>());
    assert!(nearest.is_some_and(|e| e.same_as(&inner)));
}

#[test]
fn test_source_chain_display() {
    let io = std::io::Error::other("disk unavailable");
    let err = Error::with_source(ErrorKind::Io, io)
        .context("reading keystore")
        .context("loading provider");

    assert_eq!(err.chain().count(), 3);
    assert!(err.source().is_some());

    let short = err.to_string();
    let full = format!("{err:#}");
    assert!(short
        .starts_with("I/O error: loading provider\nCaused by: I/O error: reading keystore"));
    assert_eq!(full.matches("Caused by").count(), 3);
    assert!(full.ends_with("Caused by: disk unavailable"));
}

#[test]
fn test_clones_share_identity() {
    let err = Error::new(ErrorKind::Configuration);
    let clone = err.clone();
    let other = Error::new(ErrorKind::Configuration);

    assert!(err.same_as(&clone));
    assert!(!err.same_as(&other));
}

#[test]
fn test_from_io_error() {
    let err: Error = std::io::Error::other("boom").into();

    assert_eq!(err.kind(), &ErrorKind::Io);
    assert!(err.source().is_some());
}

#[test]
fn test_err_macro_formats_context() {
    let bare = tlsprov_common::err!(Internal);
    let err = tlsprov_common::err!(InvalidArgument, "socket must not be {}", "absent");

    assert_eq!(bare.get_context(), None);
    assert_eq!(err.kind(), &ErrorKind::InvalidArgument);
    assert_eq!(err.get_context(), Some("socket must not be absent"));
}

#[test]
fn test_ensure_macro_bails() {
    fn check(port: u16) -> tlsprov_common::Result<u16> {
        tlsprov_common::ensure!(port != 0, InvalidArgument, "port {} is not usable", port);
        Ok(port)
    }

    assert_eq!(check(443).ok(), Some(443));
    let err = check(0).err();
    assert_eq!(
        err.as_ref().and_then(Error::get_context),
        Some("port 0 is not usable")
    );
}

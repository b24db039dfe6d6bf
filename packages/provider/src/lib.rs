//! TLS provider core
//!
//! This crate provides:
//! - [`SslSocketFactory`]: picks the descriptor-based or engine-based socket
//!   implementation per connection and hands each socket its own parameters
//! - [`CustomExtensionCallbacks`]: lets external code add and inspect custom
//!   TLS extensions on sockets and engines
//! - [`CrlEntry`]: one revoked certificate backed by a native record that is
//!   released exactly once
//!
//! Logging goes through `tracing`; call
//! [`tlsprov_common::LoggingTransformer::init`] to route it to `env_logger`.

pub mod config;
pub mod crl;
pub mod error;
pub mod extension;
pub mod params;
pub mod socket;

pub use config::ProviderConfig;
pub use crl::{
    CrlEntry, CrlReason, DerCrlStore, ExtensionKind, ExtensionRef, RevocationList, RevokedHandle,
    RevokedRecordBackend, SerialNumber,
};
pub use error::{CrlError, CrlResult, ParamsError, SocketError, SocketResult};
pub use extension::{
    ConnectionId, ConnectionStyle, CustomExtensionCallbacks, CustomExtensionData,
    ExtensionRegistry, ExtensionType, HandshakeContext,
};
pub use params::SslParameters;
pub use socket::{
    EngineSocket, FileDescriptorSocket, PlainSocket, SocketImpl, SocketKind, SocketTarget,
    SslEngine, SslSocket, SslSocketFactory,
};

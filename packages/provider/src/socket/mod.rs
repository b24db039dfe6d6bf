//! TLS socket construction
//!
//! [`SslSocketFactory`] picks between the two connection implementations:
//! [`FileDescriptorSocket`], which drives the handshake directly on a native
//! descriptor, and [`EngineSocket`], which runs an [`SslEngine`] over any byte
//! stream.

mod engine;
mod factory;
mod imp;
mod plain;
mod target;

pub use engine::SslEngine;
pub use factory::SslSocketFactory;
pub use imp::{EngineSocket, FileDescriptorSocket, SocketImpl, SocketKind, SslSocket};
pub use plain::PlainSocket;
pub use target::SocketTarget;

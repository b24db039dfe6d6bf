//! Callback contract for custom TLS extensions

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::data::CustomExtensionData;

/// Identity of a single connection, unique within the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Allocate a fresh identity
    #[must_use]
    pub fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw identifier value
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn#{}", self.0)
    }
}

/// The two ways a TLS connection can be driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionStyle {
    /// Blocking socket that performs its own I/O
    Socket,
    /// Engine that only transforms buffers handed to it
    Engine,
}

/// A connection a handshake runs on, as seen by extension callbacks
pub trait HandshakeContext {
    /// Style of every connection of this type
    const STYLE: ConnectionStyle;

    /// Identity the connection's callbacks are registered under
    fn connection_id(&self) -> ConnectionId;
}

/// Implemented by code that adds a custom extension to the handshake
///
/// `C` is the connection type the callbacks accept, so callbacks written for
/// sockets can never be handed an engine and vice versa. Implementations
/// are invoked by the handshake machinery, possibly from any thread.
pub trait CustomExtensionCallbacks<C: HandshakeContext + ?Sized>: Send + Sync {
    /// Called before the `ClientHello` is sent.
    ///
    /// Returning `None` adds no extension for this callback.
    fn add_client_custom_extension(&self, connection: &C) -> Option<CustomExtensionData>;

    /// Called before the `ServerHello` is sent.
    ///
    /// Returning `None` adds no extension for this callback.
    fn add_server_custom_extension(&self, connection: &C) -> Option<CustomExtensionData>;

    /// Called when the peer's hello carried this extension.
    ///
    /// Malformed input is not an error here: record it and answer with an
    /// alert from the next `add_*` call instead.
    fn parse_custom_extension(&self, connection: &C, data: &[u8]);
}

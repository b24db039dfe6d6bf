//! Buffer-driven TLS engine handle

use std::fmt;
use std::sync::Arc;

use crate::extension::{
    ConnectionId, ConnectionStyle, CustomExtensionCallbacks, ExtensionRegistry, ExtensionType,
    HandshakeContext,
};
use crate::params::SslParameters;

/// A TLS engine: handshake and record state without its own I/O
///
/// Engines are the engine-style handshake context; callbacks registered on
/// an engine only ever receive engines.
pub struct SslEngine {
    id: ConnectionId,
    parameters: SslParameters,
    peer_host: Option<String>,
    peer_port: Option<u16>,
    extensions: Arc<ExtensionRegistry<SslEngine>>,
}

impl SslEngine {
    /// Create an engine with its own callback registry
    #[must_use]
    pub fn new(
        parameters: SslParameters,
        peer_host: Option<String>,
        peer_port: Option<u16>,
    ) -> Self {
        Self::with_registry(
            parameters,
            peer_host,
            peer_port,
            Arc::new(ExtensionRegistry::new()),
        )
    }

    /// Create an engine whose callbacks live in a shared registry
    #[must_use]
    pub fn with_registry(
        parameters: SslParameters,
        peer_host: Option<String>,
        peer_port: Option<u16>,
        extensions: Arc<ExtensionRegistry<SslEngine>>,
    ) -> Self {
        Self {
            id: ConnectionId::next(),
            parameters,
            peer_host,
            peer_port,
            extensions,
        }
    }

    /// This engine's own parameters
    #[must_use]
    pub fn parameters(&self) -> &SslParameters {
        &self.parameters
    }

    /// Peer hostname hint, if known
    #[must_use]
    pub fn peer_host(&self) -> Option<&str> {
        self.peer_host.as_deref()
    }

    /// Peer port hint, if known
    #[must_use]
    pub fn peer_port(&self) -> Option<u16> {
        self.peer_port
    }

    /// Add a custom extension to this engine's handshakes
    pub fn register_custom_extension(
        &self,
        extension_type: ExtensionType,
        callbacks: Arc<dyn CustomExtensionCallbacks<SslEngine>>,
    ) {
        self.extensions.register(self.id, extension_type, callbacks);
    }

    /// Registry the handshake machinery dispatches this engine's callbacks from
    #[must_use]
    pub fn extension_registry(&self) -> &Arc<ExtensionRegistry<SslEngine>> {
        &self.extensions
    }
}

impl HandshakeContext for SslEngine {
    const STYLE: ConnectionStyle = ConnectionStyle::Engine;

    fn connection_id(&self) -> ConnectionId {
        self.id
    }
}

impl Drop for SslEngine {
    fn drop(&mut self) {
        self.extensions.unregister_connection(self.id);
    }
}

impl fmt::Debug for SslEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SslEngine")
            .field("id", &self.id)
            .field("peer_host", &self.peer_host)
            .field("peer_port", &self.peer_port)
            .finish_non_exhaustive()
    }
}

//! The two TLS socket implementations and the socket handle wrapping them

use std::fmt;
use std::sync::Arc;

use super::engine::SslEngine;
use super::target::SocketTarget;
use crate::extension::{
    ConnectionId, ConnectionStyle, CustomExtensionCallbacks, ExtensionRegistry, ExtensionType,
    HandshakeContext,
};
use crate::params::SslParameters;

/// Which implementation backs an [`SslSocket`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketKind {
    /// Handshake runs on a native descriptor
    FileDescriptor,
    /// Handshake runs through an engine
    Engine,
}

impl fmt::Display for SocketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileDescriptor => f.write_str("file-descriptor"),
            Self::Engine => f.write_str("engine"),
        }
    }
}

/// Socket that runs the handshake directly on a native descriptor
///
/// Reuses the descriptor of a layered socket instead of buffering through
/// an engine.
#[derive(Debug)]
pub struct FileDescriptorSocket {
    parameters: SslParameters,
    target: SocketTarget,
    auto_close: bool,
    descriptor: Option<u64>,
}

impl FileDescriptorSocket {
    /// Socket over `target`; takes over the descriptor of a layered socket
    pub fn new(parameters: SslParameters, target: SocketTarget, auto_close: bool) -> Self {
        let descriptor = match &target {
            SocketTarget::Layered { socket, .. } => socket.raw_descriptor().ok(),
            _ => None,
        };
        Self {
            parameters,
            target,
            auto_close,
            descriptor,
        }
    }

    /// Descriptor taken over from a layered socket
    #[must_use]
    pub fn descriptor(&self) -> Option<u64> {
        self.descriptor
    }
}

/// Socket that runs an [`SslEngine`] over an arbitrary byte stream
#[derive(Debug)]
pub struct EngineSocket {
    engine: SslEngine,
    target: SocketTarget,
    auto_close: bool,
}

impl EngineSocket {
    /// Socket driving a fresh engine for `target`
    pub fn new(parameters: SslParameters, target: SocketTarget, auto_close: bool) -> Self {
        let engine = SslEngine::new(
            parameters,
            target.peer_host().map(str::to_string),
            target.peer_port(),
        );
        Self {
            engine,
            target,
            auto_close,
        }
    }

    /// The engine driving this socket
    #[must_use]
    pub fn engine(&self) -> &SslEngine {
        &self.engine
    }
}

/// The implementation behind an [`SslSocket`]
#[derive(Debug)]
pub enum SocketImpl {
    /// Descriptor based
    FileDescriptor(FileDescriptorSocket),
    /// Engine based
    Engine(EngineSocket),
}

/// A TLS socket created by a factory
///
/// This is the socket-style handshake context: callbacks registered on it
/// only ever receive sockets.
pub struct SslSocket {
    id: ConnectionId,
    imp: SocketImpl,
    extensions: Arc<ExtensionRegistry<SslSocket>>,
}

impl SslSocket {
    /// Wrap an implementation with a fresh connection id
    pub fn new(imp: SocketImpl, extensions: Arc<ExtensionRegistry<SslSocket>>) -> Self {
        Self {
            id: ConnectionId::next(),
            imp,
            extensions,
        }
    }

    /// Which implementation backs this socket
    #[must_use]
    pub fn kind(&self) -> SocketKind {
        match self.imp {
            SocketImpl::FileDescriptor(_) => SocketKind::FileDescriptor,
            SocketImpl::Engine(_) => SocketKind::Engine,
        }
    }

    /// The implementation itself
    #[must_use]
    pub fn implementation(&self) -> &SocketImpl {
        &self.imp
    }

    /// This socket's own copy of the parameters
    #[must_use]
    pub fn parameters(&self) -> &SslParameters {
        match &self.imp {
            SocketImpl::FileDescriptor(s) => &s.parameters,
            SocketImpl::Engine(s) => s.engine.parameters(),
        }
    }

    /// Where this socket connects to
    #[must_use]
    pub fn target(&self) -> &SocketTarget {
        match &self.imp {
            SocketImpl::FileDescriptor(s) => &s.target,
            SocketImpl::Engine(s) => &s.target,
        }
    }

    /// Whether closing this socket also closes a layered plain socket
    #[must_use]
    pub fn auto_close(&self) -> bool {
        match &self.imp {
            SocketImpl::FileDescriptor(s) => s.auto_close,
            SocketImpl::Engine(s) => s.auto_close,
        }
    }

    /// Add a custom extension to this socket's handshakes
    pub fn register_custom_extension(
        &self,
        extension_type: ExtensionType,
        callbacks: Arc<dyn CustomExtensionCallbacks<SslSocket>>,
    ) {
        self.extensions.register(self.id, extension_type, callbacks);
    }

    /// Registry the handshake machinery dispatches this socket's callbacks from
    #[must_use]
    pub fn extension_registry(&self) -> &Arc<ExtensionRegistry<SslSocket>> {
        &self.extensions
    }
}

impl HandshakeContext for SslSocket {
    const STYLE: ConnectionStyle = ConnectionStyle::Socket;

    fn connection_id(&self) -> ConnectionId {
        self.id
    }
}

impl Drop for SslSocket {
    fn drop(&mut self) {
        self.extensions.unregister_connection(self.id);
    }
}

impl fmt::Debug for SslSocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SslSocket")
            .field("id", &self.id)
            .field("imp", &self.imp)
            .finish_non_exhaustive()
    }
}

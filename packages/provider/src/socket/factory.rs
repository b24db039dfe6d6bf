//! Factory choosing and constructing TLS socket implementations

use std::net::SocketAddr;
use std::sync::Arc;

use tlsprov_common::LoggingTransformer;

use super::imp::{EngineSocket, FileDescriptorSocket, SocketImpl, SocketKind, SslSocket};
use super::plain::PlainSocket;
use super::target::SocketTarget;
use crate::config::ProviderConfig;
use crate::error::{SocketError, SocketResult};
use crate::extension::{ExtensionRegistry, HandshakeContext};
use crate::params::{self, SslParameters};

/// Creates TLS sockets from one parameters template
///
/// Every socket receives its own clone of the template, so changing one
/// socket's parameters never affects another socket or the factory.
///
/// Building the template may fail. [`SslSocketFactory::new`] never fails;
/// instead the failure is kept and returned, unchanged, by every creation
/// method.
#[derive(Debug)]
pub struct SslSocketFactory {
    parameters: Result<SslParameters, tlsprov_common::Error>,
    use_engine_socket: bool,
    extensions: Arc<ExtensionRegistry<SslSocket>>,
}

impl SslSocketFactory {
    /// Create a factory whose template is built from `config`
    #[must_use]
    pub fn new(config: &ProviderConfig) -> Self {
        let parameters = SslParameters::from_config(config).map_err(|e| {
            let err = tlsprov_common::Error::from(e).context("Delayed instantiation exception");
            LoggingTransformer::log_delayed_init_failure("socket factory", &err);
            err
        });
        Self {
            parameters,
            use_engine_socket: config.use_engine_socket_by_default,
            extensions: Arc::new(ExtensionRegistry::new()),
        }
    }

    /// Create a factory around an existing template
    #[must_use]
    pub fn with_parameters(parameters: SslParameters, config: &ProviderConfig) -> Self {
        Self {
            parameters: Ok(parameters),
            use_engine_socket: config.use_engine_socket_by_default,
            extensions: Arc::new(ExtensionRegistry::new()),
        }
    }

    /// Override the configured default for sockets created from now on
    pub fn set_use_engine_socket(&mut self, use_engine_socket: bool) {
        self.use_engine_socket = use_engine_socket;
    }

    /// Whether every socket is engine based
    #[must_use]
    pub fn use_engine_socket(&self) -> bool {
        self.use_engine_socket
    }

    /// Registry shared by every socket this factory creates
    #[must_use]
    pub fn extension_registry(&self) -> &Arc<ExtensionRegistry<SslSocket>> {
        &self.extensions
    }

    /// Cipher suites enabled by the template; empty if it could not be built
    #[must_use]
    pub fn default_cipher_suites(&self) -> Vec<String> {
        match &self.parameters {
            Ok(parameters) => parameters.enabled_cipher_suites().to_vec(),
            Err(_) => Vec::new(),
        }
    }

    /// Every cipher suite the crypto engine supports
    #[must_use]
    pub fn supported_cipher_suites(&self) -> Vec<String> {
        params::supported_cipher_suites()
    }

    /// An unconnected socket
    pub fn create_socket(&self) -> SocketResult<SslSocket> {
        self.create(SocketTarget::Unconnected, true)
    }

    /// A socket that connects to `host:port`
    pub fn create_socket_to_host(&self, host: &str, port: u16) -> SocketResult<SslSocket> {
        self.create(
            SocketTarget::Host {
                host: host.to_string(),
                port,
                local: None,
            },
            true,
        )
    }

    /// A socket that connects to `host:port` from `local`
    pub fn create_socket_to_host_from(
        &self,
        host: &str,
        port: u16,
        local: SocketAddr,
    ) -> SocketResult<SslSocket> {
        self.create(
            SocketTarget::Host {
                host: host.to_string(),
                port,
                local: Some(local),
            },
            true,
        )
    }

    /// A socket that connects to `addr`
    pub fn create_socket_to_address(&self, addr: SocketAddr) -> SocketResult<SslSocket> {
        self.create(SocketTarget::Address { addr, local: None }, true)
    }

    /// A socket that connects to `addr` from `local`
    pub fn create_socket_to_address_from(
        &self,
        addr: SocketAddr,
        local: SocketAddr,
    ) -> SocketResult<SslSocket> {
        self.create(
            SocketTarget::Address {
                addr,
                local: Some(local),
            },
            true,
        )
    }

    /// Start TLS over an already connected plain socket
    ///
    /// The descriptor-based implementation is used when the socket exposes a
    /// native descriptor and engine sockets are not forced; otherwise the
    /// engine-based one wraps the socket as a byte stream.
    pub fn create_layered_socket<S>(
        &self,
        socket: Option<S>,
        hostname: &str,
        port: u16,
        auto_close: bool,
    ) -> SocketResult<SslSocket>
    where
        S: PlainSocket + 'static,
    {
        let socket = socket.ok_or(SocketError::NullArgument("socket"))?;
        if !socket.is_connected() {
            return Err(SocketError::NotConnected);
        }

        let parameters = self.clone_parameters()?;
        let use_descriptor = !self.use_engine_socket && has_file_descriptor(&socket);
        let target = SocketTarget::Layered {
            socket: Box::new(socket),
            hostname: hostname.to_string(),
            port,
        };

        let imp = if use_descriptor {
            LoggingTransformer::log_socket_selection(
                &SocketKind::FileDescriptor.to_string(),
                "layered socket exposes a descriptor",
            );
            SocketImpl::FileDescriptor(FileDescriptorSocket::new(parameters, target, auto_close))
        } else {
            let reason = if self.use_engine_socket {
                "engine sockets forced"
            } else {
                "layered socket has no descriptor"
            };
            LoggingTransformer::log_socket_selection(&SocketKind::Engine.to_string(), reason);
            SocketImpl::Engine(EngineSocket::new(parameters, target, auto_close))
        };
        Ok(SslSocket::new(imp, Arc::clone(&self.extensions)))
    }

    fn create(&self, target: SocketTarget, auto_close: bool) -> SocketResult<SslSocket> {
        let parameters = self.clone_parameters()?;
        let imp = if self.use_engine_socket {
            LoggingTransformer::log_socket_selection(
                &SocketKind::Engine.to_string(),
                "engine sockets forced",
            );
            SocketImpl::Engine(EngineSocket::new(parameters, target, auto_close))
        } else {
            LoggingTransformer::log_socket_selection(
                &SocketKind::FileDescriptor.to_string(),
                "configured default",
            );
            SocketImpl::FileDescriptor(FileDescriptorSocket::new(parameters, target, auto_close))
        };
        Ok(SslSocket::new(imp, Arc::clone(&self.extensions)))
    }

    fn clone_parameters(&self) -> SocketResult<SslParameters> {
        match &self.parameters {
            Ok(parameters) => Ok(parameters.clone()),
            Err(err) => Err(SocketError::DelayedInit(err.clone())),
        }
    }
}

/// Whether the socket exposes a native descriptor; a lookup error counts as "no"
fn has_file_descriptor(socket: &dyn PlainSocket) -> bool {
    match socket.raw_descriptor() {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!("Descriptor lookup failed, falling back to engine socket: {}", e);
            false
        }
    }
}

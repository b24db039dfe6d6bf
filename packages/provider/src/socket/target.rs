//! Where a new TLS socket connects to

use std::net::SocketAddr;

use super::plain::PlainSocket;

/// Addressing a TLS socket was created with
#[derive(Debug)]
pub enum SocketTarget {
    /// Not connected yet; the caller connects later
    Unconnected,
    /// Connect by hostname, optionally from a specific local address
    Host {
        /// Peer hostname
        host: String,
        /// Peer port
        port: u16,
        /// Local address to bind before connecting
        local: Option<SocketAddr>,
    },
    /// Connect to a resolved address, optionally from a specific local address
    Address {
        /// Peer address
        addr: SocketAddr,
        /// Local address to bind before connecting
        local: Option<SocketAddr>,
    },
    /// Run TLS over an already connected plain socket
    Layered {
        /// The connected plain socket
        socket: Box<dyn PlainSocket>,
        /// Peer hostname for SNI
        hostname: String,
        /// Peer port
        port: u16,
    },
}

impl SocketTarget {
    /// Hostname used for SNI and session lookup, if known
    #[must_use]
    pub fn peer_host(&self) -> Option<&str> {
        match self {
            Self::Host { host, .. } => Some(host),
            Self::Layered { hostname, .. } => Some(hostname),
            Self::Unconnected | Self::Address { .. } => None,
        }
    }

    /// Peer port, if known
    #[must_use]
    pub fn peer_port(&self) -> Option<u16> {
        match self {
            Self::Host { port, .. } | Self::Layered { port, .. } => Some(*port),
            Self::Address { addr, .. } => Some(addr.port()),
            Self::Unconnected => None,
        }
    }
}

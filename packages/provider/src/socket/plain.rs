//! Capability queries on plain (non-TLS) sockets

use std::fmt;
use std::io;
use std::net::{SocketAddr, TcpStream};

/// A plain socket a TLS session can be layered over
pub trait PlainSocket: Send + fmt::Debug {
    /// Whether the socket has a connected peer
    fn is_connected(&self) -> bool;

    /// The native descriptor backing this socket
    ///
    /// Sockets that are not backed by a descriptor (in-memory pipes, proxies,
    /// wrapped streams) return an error.
    fn raw_descriptor(&self) -> io::Result<u64>;

    /// Address of the connected peer
    fn peer_addr(&self) -> io::Result<SocketAddr>;
}

impl PlainSocket for TcpStream {
    fn is_connected(&self) -> bool {
        TcpStream::peer_addr(self).is_ok()
    }

    #[cfg(unix)]
    fn raw_descriptor(&self) -> io::Result<u64> {
        use std::os::unix::io::AsRawFd;
        u64::try_from(self.as_raw_fd())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "negative descriptor"))
    }

    #[cfg(windows)]
    fn raw_descriptor(&self) -> io::Result<u64> {
        use std::os::windows::io::AsRawSocket;
        Ok(self.as_raw_socket())
    }

    #[cfg(not(any(unix, windows)))]
    fn raw_descriptor(&self) -> io::Result<u64> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "descriptors are not available on this platform",
        ))
    }

    fn peer_addr(&self) -> io::Result<SocketAddr> {
        TcpStream::peer_addr(self)
    }
}

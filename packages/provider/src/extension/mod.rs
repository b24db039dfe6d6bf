//! Custom TLS extension support
//!
//! External code adds its own extension to a `ClientHello` or `ServerHello` by
//! implementing [`CustomExtensionCallbacks`] and registering it for a
//! connection. The handshake machinery then drives the callbacks through an
//! [`ExtensionRegistry`].

mod callbacks;
mod data;
mod registry;

pub use callbacks::{
    ConnectionId, ConnectionStyle, CustomExtensionCallbacks, HandshakeContext,
};
pub use data::{alert, CustomExtensionData};
pub use registry::{ExtensionRegistry, ExtensionType};

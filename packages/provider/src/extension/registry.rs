//! Registrations of custom extension callbacks per connection

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::callbacks::{ConnectionId, CustomExtensionCallbacks, HandshakeContext};
use super::data::CustomExtensionData;

/// TLS extension type code point
pub type ExtensionType = u16;

type Callbacks<C> = Arc<dyn CustomExtensionCallbacks<C>>;
type Entries<C> = BTreeMap<(ConnectionId, ExtensionType), Callbacks<C>>;

/// Callback registrations for connections of one style
///
/// Each connection holds at most one registration per extension type. The
/// dispatch methods only ever invoke registrations made for the connection
/// they are given. Callbacks run without the registry lock held, so they may
/// register or unregister other callbacks.
pub struct ExtensionRegistry<C: HandshakeContext> {
    entries: RwLock<Entries<C>>,
}

impl<C: HandshakeContext> ExtensionRegistry<C> {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register `callbacks` for one extension type on a connection
    ///
    /// Returns the registration it replaced, if any.
    pub fn register(
        &self,
        connection: ConnectionId,
        extension_type: ExtensionType,
        callbacks: Callbacks<C>,
    ) -> Option<Callbacks<C>> {
        tracing::debug!(
            "Registering custom extension {:#06x} for {} ({:?})",
            extension_type,
            connection,
            C::STYLE
        );
        self.write().insert((connection, extension_type), callbacks)
    }

    /// Remove one registration; returns whether it existed
    pub fn unregister(&self, connection: ConnectionId, extension_type: ExtensionType) -> bool {
        self.write().remove(&(connection, extension_type)).is_some()
    }

    /// Remove every registration of a connection; returns how many were removed
    pub fn unregister_connection(&self, connection: ConnectionId) -> usize {
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|(id, _), _| *id != connection);
        before - entries.len()
    }

    /// Whether an extension type is registered on a connection
    #[must_use]
    pub fn is_registered(&self, connection: ConnectionId, extension_type: ExtensionType) -> bool {
        self.read().contains_key(&(connection, extension_type))
    }

    /// Number of registrations across all connections
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Collect the extensions to add to this connection's `ClientHello`
    ///
    /// Results are ordered by extension type; callbacks returning `None`
    /// contribute nothing.
    pub fn client_hello_extensions(
        &self,
        connection: &C,
    ) -> Vec<(ExtensionType, CustomExtensionData)> {
        self.for_connection(connection)
            .into_iter()
            .filter_map(|(ext, cb)| cb.add_client_custom_extension(connection).map(|d| (ext, d)))
            .collect()
    }

    /// Collect the extensions to add to this connection's `ServerHello`
    pub fn server_hello_extensions(
        &self,
        connection: &C,
    ) -> Vec<(ExtensionType, CustomExtensionData)> {
        self.for_connection(connection)
            .into_iter()
            .filter_map(|(ext, cb)| cb.add_server_custom_extension(connection).map(|d| (ext, d)))
            .collect()
    }

    /// Hand a received extension body to its registrant
    ///
    /// Returns false when nothing is registered for this connection and
    /// extension type.
    pub fn parse_extension(
        &self,
        connection: &C,
        extension_type: ExtensionType,
        data: &[u8],
    ) -> bool {
        let callbacks = self
            .read()
            .get(&(connection.connection_id(), extension_type))
            .cloned();
        match callbacks {
            Some(callbacks) => {
                callbacks.parse_custom_extension(connection, data);
                true
            }
            None => {
                tracing::debug!(
                    "No callbacks for custom extension {:#06x} on {}",
                    extension_type,
                    connection.connection_id()
                );
                false
            }
        }
    }

    fn for_connection(&self, connection: &C) -> Vec<(ExtensionType, Callbacks<C>)> {
        let id = connection.connection_id();
        self.read()
            .range((id, ExtensionType::MIN)..=(id, ExtensionType::MAX))
            .map(|((_, ext), cb)| (*ext, Arc::clone(cb)))
            .collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries<C>> {
        match self.entries.read() {
            Ok(entries) => entries,
            Err(poisoned) => {
                tracing::warn!("Extension registry read lock poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries<C>> {
        match self.entries.write() {
            Ok(entries) => entries,
            Err(poisoned) => {
                tracing::warn!("Extension registry write lock poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}

impl<C: HandshakeContext> Default for ExtensionRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: HandshakeContext> fmt::Debug for ExtensionRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("style", &C::STYLE)
            .field("registrations", &self.len())
            .finish()
    }
}

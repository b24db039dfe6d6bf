//! Dispatch of custom extension callbacks to sockets and engines

use std::sync::{Arc, Mutex};

use tlsprov::extension::alert;
use tlsprov::{
    ConnectionId, ConnectionStyle, CustomExtensionCallbacks, CustomExtensionData,
    ExtensionRegistry, HandshakeContext, ProviderConfig, SslEngine, SslParameters, SslSocket,
    SslSocketFactory,
};

const EXT_A: u16 = 0xFF01;
const EXT_B: u16 = 0xFF02;

/// Answers with a fixed body and records what it was handed
struct Recorder {
    body: Vec<u8>,
    seen: Mutex<Vec<(ConnectionId, Vec<u8>)>>,
}

impl Recorder {
    fn new(body: &[u8]) -> Arc<Self> {
        Arc::new(Self {
            body: body.to_vec(),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn seen(&self) -> Vec<(ConnectionId, Vec<u8>)> {
        self.seen.lock().unwrap().clone()
    }
}

impl<C: HandshakeContext> CustomExtensionCallbacks<C> for Recorder {
    fn add_client_custom_extension(&self, _: &C) -> Option<CustomExtensionData> {
        Some(CustomExtensionData::response(self.body.clone()))
    }

    fn add_server_custom_extension(&self, _: &C) -> Option<CustomExtensionData> {
        None
    }

    fn parse_custom_extension(&self, connection: &C, data: &[u8]) {
        self.seen
            .lock()
            .unwrap()
            .push((connection.connection_id(), data.to_vec()));
    }
}

/// Rejects whatever the peer sends on the next server hello
struct Rejecting;

impl CustomExtensionCallbacks<SslEngine> for Rejecting {
    fn add_client_custom_extension(&self, _: &SslEngine) -> Option<CustomExtensionData> {
        None
    }

    fn add_server_custom_extension(&self, _: &SslEngine) -> Option<CustomExtensionData> {
        Some(CustomExtensionData::alert(alert::UNSUPPORTED_EXTENSION))
    }

    fn parse_custom_extension(&self, _: &SslEngine, _: &[u8]) {}
}

fn engine(registry: &Arc<ExtensionRegistry<SslEngine>>) -> SslEngine {
    let params = SslParameters::default_params().unwrap();
    SslEngine::with_registry(params, Some("example.com".into()), Some(443), registry.clone())
}

#[test]
fn test_connection_styles() {
    assert_eq!(<SslSocket as HandshakeContext>::STYLE, ConnectionStyle::Socket);
    assert_eq!(<SslEngine as HandshakeContext>::STYLE, ConnectionStyle::Engine);
}

#[test]
fn test_callbacks_only_see_their_own_engine() {
    let registry = Arc::new(ExtensionRegistry::new());
    let first = engine(&registry);
    let second = engine(&registry);
    let recorder = Recorder::new(b"first");
    first.register_custom_extension(EXT_A, recorder.clone());

    assert!(registry.parse_extension(&first, EXT_A, b"hello"));
    assert!(!registry.parse_extension(&second, EXT_A, b"ignored"));

    assert_eq!(recorder.seen(), vec![(first.connection_id(), b"hello".to_vec())]);
    assert!(registry.client_hello_extensions(&second).is_empty());
}

#[test]
fn test_client_hello_extensions_are_ordered_by_type() {
    let registry = Arc::new(ExtensionRegistry::new());
    let engine = engine(&registry);
    engine.register_custom_extension(EXT_B, Recorder::new(b"b"));
    engine.register_custom_extension(EXT_A, Recorder::new(b"a"));

    let extensions = registry.client_hello_extensions(&engine);

    assert_eq!(
        extensions,
        vec![
            (EXT_A, CustomExtensionData::response(b"a".to_vec())),
            (EXT_B, CustomExtensionData::response(b"b".to_vec())),
        ]
    );
    // Recorder adds nothing to the server hello
    assert!(registry.server_hello_extensions(&engine).is_empty());
}

#[test]
fn test_alert_from_server_callback() {
    let registry = Arc::new(ExtensionRegistry::new());
    let engine = engine(&registry);
    engine.register_custom_extension(EXT_A, Arc::new(Rejecting));

    let extensions = registry.server_hello_extensions(&engine);

    assert_eq!(extensions.len(), 1);
    assert_eq!(extensions[0].1.alert_code(), Some(110));
}

#[test]
fn test_reregistering_replaces_previous_callbacks() {
    let registry: ExtensionRegistry<SslEngine> = ExtensionRegistry::new();
    let id = ConnectionId::next();

    assert!(registry.register(id, EXT_A, Recorder::new(b"old")).is_none());
    assert!(registry.register(id, EXT_A, Recorder::new(b"new")).is_some());
    assert_eq!(registry.len(), 1);

    assert!(registry.unregister(id, EXT_A));
    assert!(!registry.unregister(id, EXT_A));
    assert!(registry.is_empty());
}

#[test]
fn test_dropping_engine_removes_its_registrations() {
    let registry = Arc::new(ExtensionRegistry::new());
    let kept = engine(&registry);
    kept.register_custom_extension(EXT_A, Recorder::new(b"kept"));
    {
        let dropped = engine(&registry);
        dropped.register_custom_extension(EXT_A, Recorder::new(b"x"));
        dropped.register_custom_extension(EXT_B, Recorder::new(b"y"));
        assert_eq!(registry.len(), 3);
    }

    assert_eq!(registry.len(), 1);
    assert!(registry.is_registered(kept.connection_id(), EXT_A));
}

#[test]
fn test_sockets_dispatch_through_factory_registry() {
    let factory = SslSocketFactory::new(&ProviderConfig::default());
    let socket = factory.create_socket().unwrap();
    let other = factory.create_socket().unwrap();
    let recorder = Recorder::new(b"socket");
    socket.register_custom_extension(EXT_A, recorder.clone());

    let registry = factory.extension_registry();
    assert!(registry.parse_extension(&socket, EXT_A, &[9]));
    assert!(!registry.parse_extension(&other, EXT_A, &[9]));
    assert_eq!(
        registry.client_hello_extensions(&socket),
        vec![(EXT_A, CustomExtensionData::response(b"socket".to_vec()))]
    );
    assert_eq!(recorder.seen(), vec![(socket.connection_id(), vec![9])]);

    drop(socket);
    assert!(registry.is_empty());
}

#[test]
fn test_connection_ids_are_unique() {
    let a = ConnectionId::next();
    let b = ConnectionId::next();

    assert_ne!(a, b);
    assert_eq!(a.to_string(), format!("conn#{}", a.get()));
}

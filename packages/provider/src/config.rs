//! Provider configuration
//!
//! Provides the configuration structure and presets used to build socket
//! factories and their parameters templates.

use serde::{Deserialize, Serialize};

use crate::error::ParamsError;

/// Protocol name for TLS 1.3
pub const TLS_V1_3: &str = "TLSv1.3";
/// Protocol name for TLS 1.2
pub const TLS_V1_2: &str = "TLSv1.2";

/// Configuration for a TLS provider instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Create engine-based sockets unless a factory instance overrides it
    pub use_engine_socket_by_default: bool,
    /// Enabled protocol versions, e.g. `TLSv1.3`
    pub enabled_protocols: Vec<String>,
    /// Enabled cipher suites; `None` enables every supported suite
    pub enabled_cipher_suites: Option<Vec<String>>,
    /// Act as the client side of the handshake
    pub client_mode: bool,
    /// Require client authentication (server mode)
    pub need_client_auth: bool,
    /// Request client authentication (server mode)
    pub want_client_auth: bool,
    /// Allow new sessions to be established
    pub enable_session_creation: bool,
    /// Send server name indication when a hostname is known
    pub use_sni: bool,
    /// ALPN protocols in preference order
    pub application_protocols: Vec<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            use_engine_socket_by_default: false,
            enabled_protocols: vec![TLS_V1_3.to_string(), TLS_V1_2.to_string()],
            enabled_cipher_suites: None,
            client_mode: true,
            need_client_auth: false,
            want_client_auth: false,
            enable_session_creation: true,
            use_sni: true,
            application_protocols: Vec::new(),
        }
    }
}

impl ProviderConfig {
    /// Configuration accepting TLS 1.2 and TLS 1.3 with descriptor-based sockets
    #[must_use]
    pub fn compatible() -> Self {
        Self::default()
    }

    /// TLS 1.3 only configuration that always uses engine-based sockets
    #[must_use]
    pub fn modern() -> Self {
        Self {
            use_engine_socket_by_default: true,
            enabled_protocols: vec![TLS_V1_3.to_string()],
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON; missing fields take default values
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        serde_json::from_str(json).map_err(|e| ParamsError::Config(e.to_string()))
    }
}

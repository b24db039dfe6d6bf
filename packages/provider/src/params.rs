//! Cryptographic parameters template
//!
//! `SslParameters` describes the protocols, cipher suites and handshake options a
//! connection starts with. Factories keep one template and hand every socket
//! its own clone.

use rustls::SupportedCipherSuite;

use crate::config::{ProviderConfig, TLS_V1_2, TLS_V1_3};
use crate::error::ParamsError;

/// Every cipher suite the crypto engine supports, in preference order
#[must_use]
pub fn supported_cipher_suites() -> Vec<String> {
    native_suites().iter().map(suite_name).collect()
}

/// Protocol versions the crypto engine supports
#[must_use]
pub fn supported_protocols() -> Vec<String> {
    vec![TLS_V1_3.to_string(), TLS_V1_2.to_string()]
}

fn native_suites() -> Vec<SupportedCipherSuite> {
    rustls::crypto::ring::default_provider().cipher_suites
}

fn suite_name(suite: &SupportedCipherSuite) -> String {
    format!("{:?}", suite.suite())
}

fn suite_protocol(suite: &SupportedCipherSuite) -> &'static str {
    if suite.tls13().is_some() {
        TLS_V1_3
    } else {
        TLS_V1_2
    }
}

/// Parameters template for new connections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SslParameters {
    enabled_protocols: Vec<String>,
    enabled_cipher_suites: Vec<String>,
    client_mode: bool,
    need_client_auth: bool,
    want_client_auth: bool,
    enable_session_creation: bool,
    use_sni: bool,
    application_protocols: Vec<String>,
}

impl SslParameters {
    /// Build the template described by the default configuration
    pub fn default_params() -> Result<Self, ParamsError> {
        Self::from_config(&ProviderConfig::default())
    }

    /// Build a template from a configuration
    ///
    /// Fails when the configuration names protocols or suites the engine does
    /// not support, or leaves no usable suite for the enabled protocols.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ParamsError> {
        let enabled_protocols = validate_protocols(&config.enabled_protocols)?;
        let enabled_cipher_suites =
            select_cipher_suites(&enabled_protocols, config.enabled_cipher_suites.as_deref())?;

        Ok(Self {
            enabled_protocols,
            enabled_cipher_suites,
            client_mode: config.client_mode,
            need_client_auth: config.need_client_auth,
            want_client_auth: config.want_client_auth,
            enable_session_creation: config.enable_session_creation,
            use_sni: config.use_sni,
            application_protocols: config.application_protocols.clone(),
        })
    }

    /// Enabled protocol versions
    #[must_use]
    pub fn enabled_protocols(&self) -> &[String] {
        &self.enabled_protocols
    }

    /// Enabled cipher suites in preference order
    #[must_use]
    pub fn enabled_cipher_suites(&self) -> &[String] {
        &self.enabled_cipher_suites
    }

    /// Restrict the enabled cipher suites
    pub fn set_enabled_cipher_suites<S: AsRef<str>>(
        &mut self,
        suites: &[S],
    ) -> Result<(), ParamsError> {
        let requested: Vec<String> = suites.iter().map(|s| s.as_ref().to_string()).collect();
        self.enabled_cipher_suites =
            select_cipher_suites(&self.enabled_protocols, Some(requested.as_slice()))?;
        Ok(())
    }

    /// Restrict the enabled protocol versions
    ///
    /// Suites that belong to a protocol no longer enabled are dropped.
    pub fn set_enabled_protocols<S: AsRef<str>>(
        &mut self,
        protocols: &[S],
    ) -> Result<(), ParamsError> {
        let requested: Vec<String> = protocols.iter().map(|p| p.as_ref().to_string()).collect();
        let protocols = validate_protocols(&requested)?;
        let suites =
            select_cipher_suites(&protocols, Some(self.enabled_cipher_suites.as_slice()))?;
        self.enabled_protocols = protocols;
        self.enabled_cipher_suites = suites;
        Ok(())
    }

    /// Whether connections act as the client side
    #[must_use]
    pub fn client_mode(&self) -> bool {
        self.client_mode
    }

    /// Switch between client and server side
    pub fn set_client_mode(&mut self, client_mode: bool) {
        self.client_mode = client_mode;
    }

    /// Whether client authentication is required
    #[must_use]
    pub fn need_client_auth(&self) -> bool {
        self.need_client_auth
    }

    /// Require client authentication; clears the "want" flag
    pub fn set_need_client_auth(&mut self, need: bool) {
        self.need_client_auth = need;
        self.want_client_auth = false;
    }

    /// Whether client authentication is requested
    #[must_use]
    pub fn want_client_auth(&self) -> bool {
        self.want_client_auth
    }

    /// Request client authentication; clears the "need" flag
    pub fn set_want_client_auth(&mut self, want: bool) {
        self.want_client_auth = want;
        self.need_client_auth = false;
    }

    /// Whether new sessions may be created
    #[must_use]
    pub fn enable_session_creation(&self) -> bool {
        self.enable_session_creation
    }

    /// Allow or forbid new sessions
    pub fn set_enable_session_creation(&mut self, enable: bool) {
        self.enable_session_creation = enable;
    }

    /// Whether SNI is sent for known hostnames
    #[must_use]
    pub fn use_sni(&self) -> bool {
        self.use_sni
    }

    /// Enable or disable SNI
    pub fn set_use_sni(&mut self, use_sni: bool) {
        self.use_sni = use_sni;
    }

    /// ALPN protocols in preference order
    #[must_use]
    pub fn application_protocols(&self) -> &[String] {
        &self.application_protocols
    }

    /// Replace the ALPN protocol list
    pub fn set_application_protocols(&mut self, protocols: Vec<String>) {
        self.application_protocols = protocols;
    }
}

fn validate_protocols(requested: &[String]) -> Result<Vec<String>, ParamsError> {
    if requested.is_empty() {
        return Err(ParamsError::NoProtocols);
    }
    let supported = supported_protocols();
    let mut protocols = Vec::with_capacity(requested.len());
    for protocol in requested {
        if !supported.contains(protocol) {
            return Err(ParamsError::UnknownProtocol(protocol.clone()));
        }
        if !protocols.contains(protocol) {
            protocols.push(protocol.clone());
        }
    }
    Ok(protocols)
}

fn select_cipher_suites(
    protocols: &[String],
    requested: Option<&[String]>,
) -> Result<Vec<String>, ParamsError> {
    let native = native_suites();
    let usable: Vec<&SupportedCipherSuite> = native
        .iter()
        .filter(|suite| protocols.iter().any(|p| p == suite_protocol(suite)))
        .collect();

    let suites: Vec<String> = match requested {
        None => usable.iter().map(|suite| suite_name(suite)).collect(),
        Some(requested) => {
            let mut suites = Vec::with_capacity(requested.len());
            for name in requested {
                if !native.iter().any(|suite| &suite_name(suite) == name) {
                    return Err(ParamsError::UnknownCipherSuite(name.clone()));
                }
                if usable.iter().any(|suite| &suite_name(suite) == name) && !suites.contains(name)
                {
                    suites.push(name.clone());
                }
            }
            suites
        }
    };

    if suites.is_empty() {
        return Err(ParamsError::NoCipherSuites);
    }
    Ok(suites)
}

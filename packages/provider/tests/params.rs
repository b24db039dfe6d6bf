//! Parameters templates and provider configuration

use tlsprov::config::{TLS_V1_2, TLS_V1_3};
use tlsprov::params::{supported_cipher_suites, supported_protocols};
use tlsprov::{ParamsError, ProviderConfig, SslParameters};

#[test]
fn test_default_params_enable_every_supported_suite() {
    let params = SslParameters::default_params().unwrap();

    assert_eq!(params.enabled_protocols(), &[TLS_V1_3, TLS_V1_2]);
    assert_eq!(params.enabled_cipher_suites(), supported_cipher_suites().as_slice());
    assert!(params.client_mode());
    assert!(params.enable_session_creation());
    assert!(params.use_sni());
    assert!(params.application_protocols().is_empty());
}

#[test]
fn test_supported_protocols() {
    assert_eq!(supported_protocols(), vec![TLS_V1_3, TLS_V1_2]);
}

#[test]
fn test_restricting_protocols_drops_their_suites() {
    let mut params = SslParameters::default_params().unwrap();

    params.set_enabled_protocols(&[TLS_V1_3]).unwrap();

    assert_eq!(params.enabled_protocols(), &[TLS_V1_3]);
    assert!(!params.enabled_cipher_suites().is_empty());
    assert!(params
        .enabled_cipher_suites()
        .iter()
        .all(|suite| suite.starts_with("TLS13_")));
}

#[test]
fn test_protocol_errors() {
    let mut params = SslParameters::default_params().unwrap();
    let before = params.clone();

    let empty: [&str; 0] = [];
    assert_eq!(params.set_enabled_protocols(&empty), Err(ParamsError::NoProtocols));
    assert_eq!(
        params.set_enabled_protocols(&["SSLv3"]),
        Err(ParamsError::UnknownProtocol("SSLv3".to_string()))
    );
    assert_eq!(params, before);
}

#[test]
fn test_cipher_suite_selection() {
    let mut params = SslParameters::default_params().unwrap();

    params
        .set_enabled_cipher_suites(&["TLS13_AES_128_GCM_SHA256", "TLS13_AES_128_GCM_SHA256"])
        .unwrap();
    assert_eq!(params.enabled_cipher_suites(), &["TLS13_AES_128_GCM_SHA256"]);

    assert_eq!(
        params.set_enabled_cipher_suites(&["TLS_FAKE"]),
        Err(ParamsError::UnknownCipherSuite("TLS_FAKE".to_string()))
    );
}

#[test]
fn test_suites_without_enabled_protocol_leave_nothing() {
    let config = ProviderConfig {
        enabled_protocols: vec![TLS_V1_2.to_string()],
        enabled_cipher_suites: Some(vec!["TLS13_AES_256_GCM_SHA384".to_string()]),
        ..ProviderConfig::default()
    };

    assert_eq!(
        SslParameters::from_config(&config),
        Err(ParamsError::NoCipherSuites)
    );
}

#[test]
fn test_client_auth_flags_are_exclusive() {
    let mut params = SslParameters::default_params().unwrap();

    params.set_want_client_auth(true);
    assert!(params.want_client_auth());
    assert!(!params.need_client_auth());

    params.set_need_client_auth(true);
    assert!(params.need_client_auth());
    assert!(!params.want_client_auth());
}

#[test]
fn test_clones_are_independent() {
    let template = SslParameters::default_params().unwrap();
    let mut copy = template.clone();

    copy.set_use_sni(false);
    copy.set_application_protocols(vec!["h2".to_string()]);

    assert!(template.use_sni());
    assert!(template.application_protocols().is_empty());
    assert_ne!(copy, template);
}

#[test]
fn test_config_presets() {
    assert_eq!(ProviderConfig::compatible(), ProviderConfig::default());

    let modern = ProviderConfig::modern();
    assert!(modern.use_engine_socket_by_default);
    assert_eq!(modern.enabled_protocols, vec![TLS_V1_3.to_string()]);
}

#[test]
fn test_config_from_json() {
    let config = ProviderConfig::from_json(
        r#"{"use_engine_socket_by_default": true, "application_protocols": ["h2", "http/1.1"]}"#,
    )
    .unwrap();

    assert!(config.use_engine_socket_by_default);
    assert_eq!(config.application_protocols, vec!["h2", "http/1.1"]);
    assert_eq!(config.enabled_protocols, ProviderConfig::default().enabled_protocols);

    let params = SslParameters::from_config(&config).unwrap();
    assert_eq!(params.application_protocols(), &["h2", "http/1.1"]);

    assert!(matches!(
        ProviderConfig::from_json("{not json"),
        Err(ParamsError::Config(_))
    ));
}

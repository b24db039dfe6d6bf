//! Result values returned by custom extension callbacks

use std::fmt;

/// TLS alert descriptions commonly sent from custom extension callbacks
pub mod alert {
    /// `handshake_failure`
    pub const HANDSHAKE_FAILURE: u8 = 40;
    /// `illegal_parameter`
    pub const ILLEGAL_PARAMETER: u8 = 47;
    /// `decode_error`
    pub const DECODE_ERROR: u8 = 50;
    /// `internal_error`
    pub const INTERNAL_ERROR: u8 = 80;
    /// `unsupported_extension`
    pub const UNSUPPORTED_EXTENSION: u8 = 110;
}

/// What a custom extension callback wants the handshake to do
///
/// Either abort with a TLS alert or add extension bytes to the hello
/// message, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CustomExtensionData {
    /// Send the TLS alert with this description code
    Alert(u8),
    /// Add these bytes as the extension body
    Response(Vec<u8>),
}

impl CustomExtensionData {
    /// Abort the handshake with the given alert
    #[must_use]
    pub fn alert(code: u8) -> Self {
        Self::Alert(code)
    }

    /// Add `bytes` as the extension body
    #[must_use]
    pub fn response(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Response(bytes.into())
    }

    /// The alert code, if this value requests an alert
    #[must_use]
    pub fn alert_code(&self) -> Option<u8> {
        match self {
            Self::Alert(code) => Some(*code),
            Self::Response(_) => None,
        }
    }

    /// The extension body, if this value carries one
    #[must_use]
    pub fn response_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Alert(_) => None,
            Self::Response(bytes) => Some(bytes),
        }
    }

    /// Whether the callback asked for the handshake to abort
    #[must_use]
    pub fn is_alert(&self) -> bool {
        matches!(self, Self::Alert(_))
    }
}

impl fmt::Display for CustomExtensionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alert(code) => write!(f, "CustomExtensionData{{alert={code}, response=unset}}"),
            Self::Response(bytes) => {
                write!(f, "CustomExtensionData{{alert=unset, response={bytes:?}}}")
            }
        }
    }
}

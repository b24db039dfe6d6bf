//! Arbitrary-precision certificate serial numbers

use std::fmt;

/// Certificate serial number
///
/// Kept as a minimal big-endian two's-complement byte string, so equal
/// integers always compare equal regardless of how they were encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerialNumber(Vec<u8>);

impl SerialNumber {
    /// From big-endian two's-complement bytes, as found in DER `INTEGER`s
    #[must_use]
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self(vec![0]);
        }
        let mut start = 0;
        while start + 1 < bytes.len() {
            let redundant = (bytes[start] == 0x00 && bytes[start + 1] < 0x80)
                || (bytes[start] == 0xFF && bytes[start + 1] >= 0x80);
            if !redundant {
                break;
            }
            start += 1;
        }
        Self(bytes[start..].to_vec())
    }

    /// From a hexadecimal string of a non-negative value, e.g. `"0A1B"`
    pub fn from_hex(hex_str: &str) -> Result<Self, hex::FromHexError> {
        let padded = if hex_str.len() % 2 == 1 {
            format!("0{hex_str}")
        } else {
            hex_str.to_string()
        };
        let mut bytes = hex::decode(padded)?;
        if bytes.first().is_some_and(|b| *b >= 0x80) {
            bytes.insert(0, 0);
        }
        Ok(Self::from_be_bytes(&bytes))
    }

    /// Minimal big-endian two's-complement bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether the two's-complement value is below zero
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.first().is_some_and(|b| *b >= 0x80)
    }
}

impl From<u64> for SerialNumber {
    fn from(value: u64) -> Self {
        let mut bytes = vec![0];
        bytes.extend_from_slice(&value.to_be_bytes());
        Self::from_be_bytes(&bytes)
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(&self.0))
    }
}

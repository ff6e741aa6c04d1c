use std::fmt;
use std::ops::Deref;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;

/// Sensitive raw bytes (derived keys, decrypted plaintext) that are zeroed
/// when dropped. `Debug` is redacted so key material cannot leak into logs.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes(Vec<u8>);

impl SecretBytes {
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hex-encodes the bytes into a [`SecretHex`].
    pub fn to_hex(&self) -> SecretHex {
        SecretHex::new(hex::encode(&self.0))
    }
}

impl Deref for SecretBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for SecretBytes {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for SecretBytes {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

impl fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes([REDACTED; {}])", self.0.len())
    }
}

/// A hex-encoded secret — a private key or password-derived key in the
/// wallet's interchange form. Zeroed when dropped, redacted in `Debug`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretHex(String);

impl SecretHex {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decodes the hex into raw secret bytes.
    pub fn to_bytes(&self) -> Result<SecretBytes, CryptoError> {
        hex::decode(&self.0)
            .map(SecretBytes::new)
            .map_err(|e| CryptoError::InvalidHex(e.to_string()))
    }
}

impl From<String> for SecretHex {
    fn from(hex: String) -> Self {
        Self::new(hex)
    }
}

impl From<&str> for SecretHex {
    fn from(hex: &str) -> Self {
        Self::new(hex.to_owned())
    }
}

impl fmt::Debug for SecretHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretHex([REDACTED; {}])", self.0.len())
    }
}

//! Short-lived sign-time secrets.

use std::fmt;

use crypto_utils::SecretHex;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The password and, once unlocked, the private key for one sensitive
/// operation. Held only as long as the operation runs: the signing layer
/// clears both fields on every exit path, and drop zeroes whatever is
/// left.
#[derive(Default, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    password: Option<String>,
    private_key: Option<SecretHex>,
}

impl Credentials {
    pub fn from_password(password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
            private_key: None,
        }
    }

    pub fn from_private_key(private_key: SecretHex) -> Self {
        Self {
            password: None,
            private_key: Some(private_key),
        }
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    pub fn set_private_key(&mut self, private_key: SecretHex) {
        self.private_key = Some(private_key);
    }

    /// Removes and returns the unlocked key, leaving `None` behind.
    pub fn take_private_key(&mut self) -> Option<SecretHex> {
        self.private_key.take()
    }

    /// Zeroes and drops both fields.
    pub fn clear(&mut self) {
        self.zeroize();
    }

    pub fn is_empty(&self) -> bool {
        self.password.is_none() && self.private_key.is_none()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("private_key", &self.private_key)
            .finish()
    }
}

//! # crypto-utils
//!
//! Key stretching, AES-CBC block encryption, secure random generation, and
//! zeroize-on-drop secret containers for the NEM wallet core.

pub mod cipher;
pub mod error;
pub mod kdf;
pub mod random;
pub mod secret;

pub use error::CryptoError;
pub use secret::{SecretBytes, SecretHex};

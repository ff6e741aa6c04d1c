//! Wallet account management for the NEM crypto-wallet.
//!
//! This crate owns everything above the chain layer: account records and
//! the three key schemes (brain, seed, imported), the password vault
//! that seals private keys, child account derivation from a wallet
//! seed, and the unlock-sign-clear flow that turns credentials plus a
//! built transaction into an announce-ready payload.
//!
//! Key material only ever leaves this crate inside [`SecretHex`] values
//! or signed payloads; credentials are cleared on every signing path.
//!
//! [`SecretHex`]: crypto_utils::SecretHex

pub mod account;
pub mod credentials;
pub mod error;
pub mod hd_derivation;
pub mod key_vault;
pub mod signing;
pub mod wallet_builder;

// Re-export key public types for ergonomic imports.
pub use account::{account_record_json, parse_account_record, Account, KeyScheme};
pub use credentials::Credentials;
pub use error::WalletError;
pub use hd_derivation::{derive_account, DerivedAccount};
pub use key_vault::{decrypt_private_key, encrypt_private_key, EncryptedKeyBlob};
pub use signing::sign_entity;
pub use wallet_builder::{
    create_brain_account, create_keyed_account, create_seed_account, PRIMARY_LABEL,
};

//! Stored account records and unlocking.
//!
//! An account record carries public metadata plus the sealed key halves.
//! Unlocking turns the caller's credentials back into the private key
//! according to the account's scheme, and never returns a key that does
//! not reproduce the stored address.

use serde::{Deserialize, Serialize};

use chain_nem::{check_address, Address, Network};
use crypto_utils::kdf::{stretch, BRAIN_WALLET_ROUNDS};
use crypto_utils::SecretHex;

use crate::credentials::Credentials;
use crate::error::WalletError;
use crate::key_vault::{decrypt_private_key, EncryptedKeyBlob};

/// How an account's private key is produced at unlock time.
///
/// The serialized tags are the historical record format and must not
/// change, or existing wallet files stop unlocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyScheme {
    /// Brain wallet: the key is re-derived from the password alone.
    #[serde(rename = "pass:6k")]
    DirectDerivation,
    /// Seed wallet: child keys come from a stored seed, with the primary
    /// key sealed under the password.
    #[serde(rename = "pass:bip32")]
    Hierarchical,
    /// Imported private key sealed under the password.
    #[serde(rename = "pass:enc")]
    EncryptedKey,
}

impl KeyScheme {
    pub fn tag(self) -> &'static str {
        match self {
            KeyScheme::DirectDerivation => "pass:6k",
            KeyScheme::Hierarchical => "pass:bip32",
            KeyScheme::EncryptedKey => "pass:enc",
        }
    }

    pub fn from_tag(tag: &str) -> Result<Self, WalletError> {
        match tag {
            "pass:6k" => Ok(KeyScheme::DirectDerivation),
            "pass:bip32" => Ok(KeyScheme::Hierarchical),
            "pass:enc" => Ok(KeyScheme::EncryptedKey),
            other => Err(WalletError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// One stored account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub label: String,
    pub address: Address,
    #[serde(rename = "algorithm")]
    pub scheme: KeyScheme,
    /// Hex ciphertext half of the sealed key; empty for brain wallets.
    #[serde(default)]
    pub encrypted: String,
    /// Hex IV half of the sealed key; empty for brain wallets.
    #[serde(default)]
    pub iv: String,
    pub network: Network,
    /// Public key of the first derived child, kept for remote lookups.
    #[serde(default)]
    pub child: String,
}

impl Account {
    pub fn new(label: impl Into<String>, address: Address, scheme: KeyScheme, network: Network) -> Self {
        Self {
            label: label.into(),
            address,
            scheme,
            encrypted: String::new(),
            iv: String::new(),
            network,
            child: String::new(),
        }
    }

    /// The sealed key halves, if any. A record with only one half is
    /// corrupt and refuses to unlock rather than guessing.
    pub fn blob(&self) -> Result<Option<EncryptedKeyBlob>, WalletError> {
        match (self.encrypted.is_empty(), self.iv.is_empty()) {
            (true, true) => Ok(None),
            (false, false) => Ok(Some(EncryptedKeyBlob {
                ciphertext: self.encrypted.clone(),
                iv: self.iv.clone(),
            })),
            _ => Err(WalletError::MissingInput("encrypted key blob half")),
        }
    }

    /// Recovers the private key from `credentials`.
    ///
    /// A blob always wins over re-derivation: a brain wallet that was
    /// later upgraded to carry a sealed key unlocks through the vault.
    /// The recovered key must reproduce the stored address, which is
    /// what turns a wrong password into an error instead of a silently
    /// different key.
    pub fn unlock_private_key(&self, credentials: &Credentials) -> Result<SecretHex, WalletError> {
        let password = credentials
            .password()
            .filter(|p| !p.is_empty())
            .ok_or(WalletError::MissingInput("password"))?;

        let private_key = match (self.scheme, self.blob()?) {
            (_, Some(blob)) => decrypt_private_key(&blob, password)?,
            (KeyScheme::DirectDerivation, None) => SecretHex::new(hex::encode(stretch(
                password.as_bytes(),
                BRAIN_WALLET_ROUNDS,
            ))),
            (KeyScheme::Hierarchical | KeyScheme::EncryptedKey, None) => {
                return Err(WalletError::MissingInput("encrypted key blob"));
            }
        };

        if !check_address(private_key.as_str(), self.network, self.address.as_str()) {
            return Err(WalletError::AddressMismatch(self.address.as_str().to_string()));
        }
        Ok(private_key)
    }
}

/// Parses a stored account record, surfacing an unknown scheme tag as
/// its own error before the shape check.
pub fn parse_account_record(json: &str) -> Result<Account, WalletError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| WalletError::MalformedRecord(e.to_string()))?;
    if let Some(tag) = value.get("algorithm").and_then(|v| v.as_str()) {
        KeyScheme::from_tag(tag)?;
    }
    serde_json::from_value(value).map_err(|e| WalletError::MalformedRecord(e.to_string()))
}

/// Serializes an account record for storage.
pub fn account_record_json(account: &Account) -> Result<String, WalletError> {
    serde_json::to_string(account).map_err(|e| WalletError::MalformedRecord(e.to_string()))
}

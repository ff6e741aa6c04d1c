//! Detached signing over the canonical payload.

use serde::{Deserialize, Serialize};

use crate::error::NemError;
use crate::keypair::KeyPair;
use crate::transaction::Transaction;
use crate::wire::serialize_transaction;

/// Announce-ready form: the hex payload and its detached hex signature,
/// the two fields a NIS node expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub data: String,
    pub signature: String,
}

/// Serializes and signs with an already-unlocked keypair.
pub fn sign_transaction(tx: &Transaction, keypair: &KeyPair) -> SignedTransaction {
    let data = serialize_transaction(tx);
    let signature = keypair.sign(&data);
    SignedTransaction {
        data: hex::encode(data),
        signature: hex::encode(signature),
    }
}

/// Parses a private key, signs, and drops the key material before
/// returning.
pub fn sign_with_hex(tx: &Transaction, private_hex: &str) -> Result<SignedTransaction, NemError> {
    let keypair = KeyPair::from_hex(private_hex)?;
    Ok(sign_transaction(tx, &keypair))
}

/// A node's verdict on an announced transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnounceResult {
    pub code: u32,
    #[serde(default)]
    pub message: String,
}

impl AnnounceResult {
    /// Codes 0 and 1 mean neutral or accepted; everything above is a
    /// rejection.
    pub fn is_accepted(&self) -> bool {
        self.code < 2
    }
}

use curve25519_dalek::Scalar;
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use zeroize::Zeroize;

use crate::address::Address;
use crate::error::NemError;
use crate::network::Network;

/// Normalizes a hex private key to 64 lowercase characters.
///
/// Accepts 64 characters, or 66 where wallets stored a stray leading zero
/// pair: one leading `00` is stripped, the result left-padded with zeros,
/// and the last 64 characters kept.
pub fn normalize_private_key(hex_key: &str) -> Result<String, NemError> {
    let trimmed = hex_key.trim();
    if trimmed.len() != 64 && trimmed.len() != 66 {
        return Err(NemError::InvalidPrivateKey(format!(
            "expected 64 or 66 hex chars, got {}",
            trimmed.len()
        )));
    }
    let stripped = trimmed.strip_prefix("00").unwrap_or(trimmed);
    let padded = format!("{stripped:0>64}");
    let fixed = padded[padded.len() - 64..].to_lowercase();
    if !fixed.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(NemError::InvalidPrivateKey(
            "non-hex characters".to_string(),
        ));
    }
    Ok(fixed)
}

/// Parses a 32-byte hex public key.
pub fn public_key_bytes(hex_key: &str) -> Result<[u8; 32], NemError> {
    let bytes = hex::decode(hex_key.trim())
        .map_err(|e| NemError::InvalidPublicKey(e.to_string()))?;
    bytes
        .try_into()
        .map_err(|_| NemError::InvalidPublicKey("expected 32 bytes".to_string()))
}

/// Parses a hex public key into a verified curve point.
pub fn parse_public_key(hex_key: &str) -> Result<VerifyingKey, NemError> {
    let bytes = public_key_bytes(hex_key)?;
    VerifyingKey::from_bytes(&bytes).map_err(|e| NemError::InvalidPublicKey(e.to_string()))
}

/// An ed25519 signing keypair built from a normalized private key.
pub struct KeyPair {
    signing: SigningKey,
}

impl KeyPair {
    /// Builds a keypair from a 64- or 66-character hex private key.
    pub fn from_hex(private_key_hex: &str) -> Result<Self, NemError> {
        let mut fixed = normalize_private_key(private_key_hex)?;
        let decoded = hex::decode(&fixed);
        fixed.zeroize();
        let mut bytes = decoded.map_err(|e| NemError::InvalidPrivateKey(e.to_string()))?;

        let mut seed = [0u8; 32];
        seed.copy_from_slice(&bytes);
        bytes.zeroize();
        let signing = SigningKey::from_bytes(&seed);
        seed.zeroize();
        Ok(Self { signing })
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.signing.verifying_key().to_bytes()
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key())
    }

    pub fn address(&self, network: Network) -> Address {
        Address::from_public_key(network, &self.public_key())
    }

    /// Signs `data`, returning the detached 64-byte signature.
    pub fn sign(&self, data: &[u8]) -> [u8; 64] {
        self.signing.sign(data).to_bytes()
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing.verifying_key()
    }

    /// Private scalar as used for X25519 shared-secret derivation.
    pub(crate) fn dh_scalar(&self) -> Scalar {
        self.signing.to_scalar()
    }
}

/// True iff `private_key_hex` reproduces `expected` on `network`.
///
/// This is the wrong-password gate, not a parser: malformed keys and
/// malformed addresses return `false` rather than erroring, so callers
/// fail closed.
pub fn check_address(private_key_hex: &str, network: Network, expected: &str) -> bool {
    let expected = match Address::parse(expected) {
        Ok(addr) => addr,
        Err(_) => return false,
    };
    match KeyPair::from_hex(private_key_hex) {
        Ok(keypair) => keypair.address(network) == expected,
        Err(_) => false,
    }
}

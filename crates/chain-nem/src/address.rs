use std::fmt;

use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::error::NemError;
use crate::network::Network;

/// Base32 alphabet used for NEM addresses (RFC 4648, no padding).
const ALPHABET: base32::Alphabet = base32::Alphabet::RFC4648 { padding: false };

/// Length of the base32 address form.
pub const ADDRESS_LEN: usize = 40;

/// Decoded address payload: prefix byte + 20-byte key hash + 4-byte checksum.
const DECODED_LEN: usize = 25;

/// Bytes of the Keccak-256 digest appended as a checksum.
const CHECKSUM_LEN: usize = 4;

/// A NEM account address in plain form: 40 uppercase base32 characters,
/// no hyphens.
///
/// Construction goes through [`Address::from_public_key`] or
/// [`Address::parse`], so a held value is always well-formed. Checksum
/// verification is a separate step ([`Address::verify_checksum`]): parsing
/// accepts any string of the right shape, matching how user input is
/// normalized before a full validity check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Encodes the address of an ed25519 public key on `network`:
    /// `base32(prefix ‖ ripemd160(keccak256(key)) ‖ checksum)` where the
    /// checksum is the first four bytes of Keccak-256 over the preceding 21.
    pub fn from_public_key(network: Network, public_key: &[u8; 32]) -> Self {
        let key_hash: [u8; 32] = Keccak256::digest(public_key).into();
        let ripe = Ripemd160::digest(key_hash);

        let mut payload = [0u8; DECODED_LEN];
        payload[0] = network.address_prefix();
        payload[1..21].copy_from_slice(&ripe);
        let checksum: [u8; 32] = Keccak256::digest(&payload[..21]).into();
        payload[21..].copy_from_slice(&checksum[..CHECKSUM_LEN]);

        Self(base32::encode(ALPHABET, &payload))
    }

    /// Normalizes caller input into plain form: trims, uppercases, strips
    /// hyphens, and checks length and alphabet.
    pub fn parse(input: &str) -> Result<Self, NemError> {
        let plain = input.trim().to_uppercase().replace('-', "");
        if plain.len() != ADDRESS_LEN {
            return Err(NemError::InvalidAddress(format!(
                "expected {} characters, got {}",
                ADDRESS_LEN,
                plain.len()
            )));
        }
        if !plain
            .bytes()
            .all(|b| b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b))
        {
            return Err(NemError::InvalidAddress(
                "characters outside the base32 alphabet".to_string(),
            ));
        }
        Ok(Self(plain))
    }

    /// Full validity check: decodes the payload and recomputes the
    /// embedded checksum.
    pub fn verify_checksum(&self) -> bool {
        let Some(payload) = base32::decode(ALPHABET, &self.0) else {
            return false;
        };
        if payload.len() != DECODED_LEN {
            return false;
        }
        if self.network().is_none() {
            return false;
        }
        let checksum: [u8; 32] = Keccak256::digest(&payload[..21]).into();
        payload[21..] == checksum[..CHECKSUM_LEN]
    }

    /// Network this address belongs to, judged by its prefix byte.
    pub fn network(&self) -> Option<Network> {
        match self.0.as_bytes().first() {
            Some(b'N') => Some(Network::Mainnet),
            Some(b'T') => Some(Network::Testnet),
            Some(b'M') => Some(Network::Mijin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form with a hyphen every six characters.
    pub fn pretty(&self) -> String {
        self.0
            .as_bytes()
            .chunks(6)
            .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

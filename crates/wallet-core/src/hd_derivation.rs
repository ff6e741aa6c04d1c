//! Child account derivation from a wallet seed.
//!
//! The seed's hex form is stretched through 25 000 chained Keccak-256
//! rounds, then mixed with the wallet password through HMAC-Keccak-512.
//! The left half of the digest seeds a BIP32-shaped extended private key
//! tagged with the NEM network version; the right half is its chain
//! code. Child `m/index` keys become NEM ed25519 accounts, so the same
//! seed and password always reproduce the same account ladder.

use bip32::{ChildNumber, ExtendedKey, ExtendedKeyAttrs, Prefix, XPrv};
use hmac::{Hmac, Mac};
use sha3::Keccak512;
use zeroize::Zeroize;

use chain_nem::{Address, KeyPair, Network};
use crypto_utils::kdf::{stretch, SEED_STRETCH_ROUNDS};
use crypto_utils::SecretHex;

use crate::error::WalletError;

type HmacKeccak512 = Hmac<Keccak512>;

/// Depth marker distinguishing wallet roots from ordinary BIP32 nodes.
const DEPTH_SENTINEL: u8 = 99;

/// One derived child account.
#[derive(Debug)]
pub struct DerivedAccount {
    pub address: Address,
    pub private_key: SecretHex,
    pub public_key: String,
    /// The wallet root in extended-key string form, for re-derivation.
    pub extended_seed: String,
}

/// Derives child `index` from a 32-byte hex seed and the wallet
/// password.
pub fn derive_account(
    seed_hex: &str,
    password: &str,
    index: u32,
    network: Network,
) -> Result<DerivedAccount, WalletError> {
    if seed_hex.is_empty() {
        return Err(WalletError::MissingInput("wallet seed"));
    }
    let seed = hex::decode(seed_hex).map_err(|e| WalletError::InvalidSeed(e.to_string()))?;
    if seed.len() != 32 {
        return Err(WalletError::InvalidSeed(format!(
            "expected 32 bytes, got {}",
            seed.len()
        )));
    }

    let mut stretched = stretch(seed_hex.as_bytes(), SEED_STRETCH_ROUNDS);
    let mut mac = HmacKeccak512::new_from_slice(password.as_bytes())
        .map_err(|e| WalletError::DerivationFailed(e.to_string()))?;
    mac.update(&stretched);
    let mut digest = [0u8; 64];
    digest.copy_from_slice(&mac.finalize().into_bytes());
    stretched.zeroize();

    // 33-byte SEC1 form with a zero prefix, as extended keys store it.
    let mut key_bytes = [0u8; 33];
    key_bytes[1..].copy_from_slice(&digest[..32]);
    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&digest[32..]);
    digest.zeroize();

    let prefix = Prefix::from_parts_unchecked("xprv", network.version_tag());
    let root_key = ExtendedKey {
        prefix,
        attrs: ExtendedKeyAttrs {
            depth: DEPTH_SENTINEL,
            parent_fingerprint: [0u8; 4],
            child_number: ChildNumber(0),
            chain_code,
        },
        key_bytes,
    };
    let root = XPrv::try_from(root_key).map_err(|e| WalletError::DerivationFailed(e.to_string()))?;
    key_bytes.zeroize();
    chain_code.zeroize();

    let extended_seed = root.to_extended_key(prefix).to_string();
    let child = root
        .derive_child(ChildNumber(index))
        .map_err(|e| WalletError::DerivationFailed(e.to_string()))?;

    let mut child_bytes: [u8; 32] = child.to_bytes();
    let private_key = SecretHex::new(hex::encode(child_bytes));
    child_bytes.zeroize();

    let keypair = KeyPair::from_hex(private_key.as_str())?;
    Ok(DerivedAccount {
        address: keypair.address(network),
        public_key: keypair.public_key_hex(),
        private_key,
        extended_seed,
    })
}

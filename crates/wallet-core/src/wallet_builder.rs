//! Creating the three account flavors.
//!
//! Every flavor ends up as the same [`Account`] record shape. The
//! address is always computed from the key material here, never taken on
//! trust, so a freshly built record is unlockable by construction.

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use chain_nem::{normalize_private_key, KeyPair, Network};
use crypto_utils::kdf::{stretch, BRAIN_WALLET_ROUNDS};
use crypto_utils::random::draw_bytes;
use crypto_utils::SecretHex;

use crate::account::{Account, KeyScheme};
use crate::error::WalletError;
use crate::hd_derivation::derive_account;
use crate::key_vault::{encrypt_private_key, EncryptedKeyBlob};

/// Label given to the first account of a new wallet.
pub const PRIMARY_LABEL: &str = "Primary";

/// Brain wallet: no stored secrets at all. The key is the 6 000-round
/// stretch of the password, so creation is deterministic.
pub fn create_brain_account(password: &str, network: Network) -> Result<Account, WalletError> {
    if password.is_empty() {
        return Err(WalletError::MissingInput("password"));
    }
    let key = SecretHex::new(hex::encode(stretch(password.as_bytes(), BRAIN_WALLET_ROUNDS)));
    assemble(key, password, KeyScheme::DirectDerivation, None, network)
}

/// Seed wallet: a fresh random 32-byte key sealed under the password.
pub fn create_seed_account<R: RngCore + CryptoRng>(
    password: &str,
    network: Network,
    rng: &mut R,
) -> Result<Account, WalletError> {
    if password.is_empty() {
        return Err(WalletError::MissingInput("password"));
    }
    let mut seed: [u8; 32] = draw_bytes(rng);
    let key = SecretHex::new(hex::encode(seed));
    seed.zeroize();
    let blob = encrypt_private_key(key.as_str(), password, rng)?;
    assemble(key, password, KeyScheme::Hierarchical, Some(blob), network)
}

/// Imported wallet: an existing private key sealed under the password.
pub fn create_keyed_account<R: RngCore + CryptoRng>(
    private_key_hex: &str,
    password: &str,
    network: Network,
    rng: &mut R,
) -> Result<Account, WalletError> {
    if password.is_empty() {
        return Err(WalletError::MissingInput("password"));
    }
    let key = SecretHex::new(normalize_private_key(private_key_hex)?);
    let blob = encrypt_private_key(key.as_str(), password, rng)?;
    assemble(key, password, KeyScheme::EncryptedKey, Some(blob), network)
}

fn assemble(
    key: SecretHex,
    password: &str,
    scheme: KeyScheme,
    blob: Option<EncryptedKeyBlob>,
    network: Network,
) -> Result<Account, WalletError> {
    let keypair = KeyPair::from_hex(key.as_str())?;
    let mut account = Account::new(PRIMARY_LABEL, keypair.address(network), scheme, network);
    account.child = derive_account(key.as_str(), password, 0, network)?.public_key;
    if let Some(blob) = blob {
        account.encrypted = blob.ciphertext;
        account.iv = blob.iv;
    }
    Ok(account)
}

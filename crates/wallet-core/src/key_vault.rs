//! Password-sealed private keys.
//!
//! The wrap key is a short Keccak-256 stretch of the password; the
//! payload is the raw 32 key bytes under AES-256-CBC with a random IV.
//! Both halves are stored as hex in the account record.
//!
//! Decryption with the wrong password does NOT fail here: CBC happily
//! produces garbage bytes. The address check at unlock time is what
//! actually rejects a wrong password.

use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use chain_nem::normalize_private_key;
use crypto_utils::cipher::{decrypt_cbc, encrypt_cbc};
use crypto_utils::kdf::{stretch, WRAP_KEY_ROUNDS};
use crypto_utils::random::draw_bytes;
use crypto_utils::{CryptoError, SecretHex};

use crate::error::WalletError;

/// The two stored halves of a sealed private key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedKeyBlob {
    pub ciphertext: String,
    pub iv: String,
}

/// Seals a private key under `password`. The key is normalized first, so
/// a 66-character form seals to the same blob as its 64-character form.
pub fn encrypt_private_key<R: RngCore + CryptoRng>(
    private_key_hex: &str,
    password: &str,
    rng: &mut R,
) -> Result<EncryptedKeyBlob, WalletError> {
    let normalized = SecretHex::new(normalize_private_key(private_key_hex)?);
    let key_bytes = normalized.to_bytes()?;

    let mut wrap_key = stretch(password.as_bytes(), WRAP_KEY_ROUNDS);
    let iv: [u8; 16] = draw_bytes(rng);
    let ciphertext = encrypt_cbc(&key_bytes, &wrap_key, &iv);
    wrap_key.zeroize();

    Ok(EncryptedKeyBlob {
        ciphertext: hex::encode(ciphertext),
        iv: hex::encode(iv),
    })
}

/// Unseals a blob with `password`, returning the recovered key as hex.
/// Callers must validate the result against the account address.
pub fn decrypt_private_key(
    blob: &EncryptedKeyBlob,
    password: &str,
) -> Result<SecretHex, WalletError> {
    let ciphertext =
        hex::decode(&blob.ciphertext).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
    let iv_bytes = hex::decode(&blob.iv).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
    let iv: [u8; 16] = iv_bytes.as_slice().try_into().map_err(|_| {
        CryptoError::DecryptionFailed(format!("iv must be 16 bytes, got {}", iv_bytes.len()))
    })?;

    let mut wrap_key = stretch(password.as_bytes(), WRAP_KEY_ROUNDS);
    let result = decrypt_cbc(&ciphertext, &wrap_key, &iv);
    wrap_key.zeroize();

    let mut plaintext = result?;
    let recovered = SecretHex::new(hex::encode(&plaintext));
    plaintext.zeroize();
    Ok(recovered)
}

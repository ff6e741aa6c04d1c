use ed25519_dalek::VerifyingKey;
use rand_core::{CryptoRng, RngCore};
use sha3::{Digest, Keccak256};
use zeroize::Zeroize;

use crypto_utils::cipher;
use crypto_utils::random::draw_bytes;

use crate::error::NemError;
use crate::keypair::{parse_public_key, KeyPair};

/// Wire code for a plaintext payload.
const PLAIN_KIND: u32 = 1;
/// Wire code for an encrypted payload.
const ENCRYPTED_KIND: u32 = 2;

const SALT_LEN: usize = 32;
const IV_LEN: usize = 16;

/// A transfer message: absent, plain bytes, or an encrypted blob.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Message {
    #[default]
    None,
    Plain(Vec<u8>),
    Encrypted(Vec<u8>),
}

impl Message {
    /// Plain message from UTF-8 text; empty text means no message.
    pub fn plain(text: &str) -> Self {
        if text.is_empty() {
            Message::None
        } else {
            Message::Plain(text.as_bytes().to_vec())
        }
    }

    /// Plain message whose payload is given as hex (document hashes and
    /// other pre-encoded content travel this way).
    pub fn plain_from_hex(payload_hex: &str) -> Result<Self, NemError> {
        if payload_hex.is_empty() {
            return Ok(Message::None);
        }
        let bytes =
            hex::decode(payload_hex).map_err(|e| NemError::InvalidHex(e.to_string()))?;
        Ok(Message::Plain(bytes))
    }

    pub fn is_empty(&self) -> bool {
        self.payload().is_empty()
    }

    /// Raw payload bytes exactly as serialized.
    pub fn payload(&self) -> &[u8] {
        match self {
            Message::None => &[],
            Message::Plain(bytes) | Message::Encrypted(bytes) => bytes,
        }
    }

    /// Wire kind code. `None` never reaches the wire as a message struct,
    /// so its code is moot; it reports as plain.
    pub fn kind_code(&self) -> u32 {
        match self {
            Message::None | Message::Plain(_) => PLAIN_KIND,
            Message::Encrypted(_) => ENCRYPTED_KIND,
        }
    }
}

/// Symmetric key both parties can compute: Keccak-256 over the X25519
/// shared point XOR'd with the salt.
fn derive_shared_key(keypair: &KeyPair, peer: &VerifyingKey, salt: &[u8; SALT_LEN]) -> [u8; 32] {
    let shared = keypair.dh_scalar() * peer.to_montgomery();
    let mut mixed = shared.to_bytes();
    for (byte, salt_byte) in mixed.iter_mut().zip(salt) {
        *byte ^= salt_byte;
    }
    let key: [u8; 32] = Keccak256::digest(mixed).into();
    mixed.zeroize();
    key
}

/// Encrypts `text` so that only the holder of `recipient_public_hex` (or
/// the sender) can read it. Payload layout: salt(32) ‖ iv(16) ‖ ciphertext.
pub fn encode_message<R: RngCore + CryptoRng>(
    sender_private_hex: &str,
    recipient_public_hex: &str,
    text: &str,
    rng: &mut R,
) -> Result<Message, NemError> {
    if text.is_empty() {
        return Ok(Message::None);
    }
    let keypair = KeyPair::from_hex(sender_private_hex)?;
    let recipient = parse_public_key(recipient_public_hex)?;

    let salt: [u8; SALT_LEN] = draw_bytes(rng);
    let iv: [u8; IV_LEN] = draw_bytes(rng);
    let mut key = derive_shared_key(&keypair, &recipient, &salt);
    let ciphertext = cipher::encrypt_cbc(text.as_bytes(), &key, &iv);
    key.zeroize();

    let mut payload = Vec::with_capacity(SALT_LEN + IV_LEN + ciphertext.len());
    payload.extend_from_slice(&salt);
    payload.extend_from_slice(&iv);
    payload.extend_from_slice(&ciphertext);
    Ok(Message::Encrypted(payload))
}

/// Decrypts an encrypted payload. The underlying DH secret is symmetric,
/// so the recipient opens it with the sender's public key and the sender
/// can re-open their own message with the recipient's.
pub fn decode_message(
    private_hex: &str,
    peer_public_hex: &str,
    payload: &[u8],
) -> Result<Vec<u8>, NemError> {
    if payload.len() < SALT_LEN + IV_LEN + cipher::BLOCK_SIZE {
        return Err(NemError::InvalidMessage(format!(
            "payload too short: {} bytes",
            payload.len()
        )));
    }
    let keypair = KeyPair::from_hex(private_hex)?;
    let peer = parse_public_key(peer_public_hex)?;

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&payload[..SALT_LEN]);
    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(&payload[SALT_LEN..SALT_LEN + IV_LEN]);

    let mut key = derive_shared_key(&keypair, &peer, &salt);
    let plaintext = cipher::decrypt_cbc(&payload[SALT_LEN + IV_LEN..], &key, &iv);
    key.zeroize();
    Ok(plaintext?)
}

use sha3::digest::consts::U32;
use sha3::{Digest, Keccak256};

/// Rounds for deriving a primary signing key straight from a password
/// ("brain wallet").
pub const BRAIN_WALLET_ROUNDS: u32 = 6_000;

/// Rounds for deriving the wrapping key that encrypts a stored private key.
pub const WRAP_KEY_ROUNDS: u32 = 20;

/// Rounds applied to a wallet seed before hierarchical child derivation.
/// Deliberately slow as a brute-force deterrent.
pub const SEED_STRETCH_ROUNDS: u32 = 25_000;

/// Stretches `data` by iterated hashing with a caller-chosen 256-bit digest.
///
/// The digest is applied once to `data`, then re-applied to the previous raw
/// output `rounds - 1` more times. The first application always happens, so
/// `rounds == 0` behaves like `rounds == 1`.
///
/// The digest is a type parameter so tests (and future protocol changes) can
/// swap the hash without touching call sites.
pub fn stretch_with<D>(data: &[u8], rounds: u32) -> [u8; 32]
where
    D: Digest<OutputSize = U32>,
{
    let mut digest: [u8; 32] = D::digest(data).into();
    for _ in 1..rounds {
        digest = D::digest(digest).into();
    }
    digest
}

/// Keccak-256 stretch — the variant every derivation path in this wallet
/// uses. Same `(data, rounds)` always yields the same bytes.
pub fn stretch(data: &[u8], rounds: u32) -> [u8; 32] {
    stretch_with::<Keccak256>(data, rounds)
}

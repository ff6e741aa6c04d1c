use rand::RngCore;
use rand_core::{CryptoRng, OsRng};

/// Generates `len` cryptographically secure random bytes from the OS.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    OsRng.fill_bytes(&mut buf);
    buf
}

/// Generates a fixed-size array of cryptographically secure random bytes.
pub fn random_bytes_fixed<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    OsRng.fill_bytes(&mut buf);
    buf
}

/// Draws a fixed-size array from a caller-supplied RNG.
///
/// Operations that consume randomness (vault IVs, message salts, fresh
/// account keys) take the RNG as a parameter so tests can pass a seeded one;
/// production callers hand in [`OsRng`].
pub fn draw_bytes<const N: usize, R: RngCore + CryptoRng>(rng: &mut R) -> [u8; N] {
    let mut buf = [0u8; N];
    rng.fill_bytes(&mut buf);
    buf
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    #[error("invalid wallet seed: {0}")]
    InvalidSeed(String),

    #[error("key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("address mismatch: unlocked key does not reproduce {0}")]
    AddressMismatch(String),

    #[error("unsupported key scheme: {0}")]
    UnsupportedAlgorithm(String),

    #[error("malformed account record: {0}")]
    MalformedRecord(String),

    #[error(transparent)]
    Chain(#[from] chain_nem::NemError),

    #[error(transparent)]
    Crypto(#[from] crypto_utils::CryptoError),
}

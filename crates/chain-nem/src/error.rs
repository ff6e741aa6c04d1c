use thiserror::Error;

/// Errors surfaced by NEM chain operations.
#[derive(Debug, Error)]
pub enum NemError {
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid message: {0}")]
    InvalidMessage(String),

    #[error("unknown mosaic: {0}")]
    UnknownMosaic(String),

    #[error(transparent)]
    Crypto(#[from] crypto_utils::CryptoError),
}

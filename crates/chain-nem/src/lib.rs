//! NEM (NIS1) chain support for the crypto-wallet.
//!
//! This crate handles NEM address derivation (Keccak-256 + RIPEMD-160
//! over Base32), the dual fee schedule that forked at a testnet block
//! height, typed construction of all eight NIS1 transaction kinds with
//! optional multisig wrapping, and the little-endian length-prefixed
//! wire format NIS expects for signing and announcing.
//!
//! The wire format is implemented by hand: NIS1 predates any common
//! serialization scheme, so every field is written at its documented
//! offset and signed with `ed25519-dalek`.

pub mod address;
pub mod builder;
pub mod error;
pub mod fee;
pub mod keypair;
pub mod message;
pub mod mosaic;
pub mod network;
pub mod signer;
pub mod transaction;
pub mod wire;

// Re-export key public types for ergonomic imports.
pub use address::Address;
pub use builder::{
    build_aggregate_modification, build_importance_transfer, build_mosaic_definition,
    build_mosaic_supply_change, build_multisig_signature, build_provision_namespace,
    build_transfer, sort_modifications, wrap_multisig, SenderKeys,
};
pub use error::NemError;
pub use fee::{FeeRegime, FeeScheduleContext, MICRO_PER_XEM};
pub use keypair::{check_address, normalize_private_key, KeyPair};
pub use message::{decode_message, encode_message, Message};
pub use network::{network_time_now, Network};
pub use signer::{sign_transaction, sign_with_hex, AnnounceResult, SignedTransaction};
pub use transaction::{Transaction, TransactionBody, TransactionKind};
pub use wire::serialize_transaction;

//! Unlock, sign, clear.
//!
//! The one place where credentials, account records, and transactions
//! meet. Credentials are consumed: whatever the outcome, nothing secret
//! survives the call.

use chain_nem::{check_address, sign_with_hex, SignedTransaction, Transaction};

use crate::account::Account;
use crate::credentials::Credentials;
use crate::error::WalletError;

/// Signs `tx` on behalf of `account` using whatever secret `credentials`
/// holds: a pre-unlocked private key if present, the password otherwise.
///
/// The credentials are cleared on every exit path, success or failure.
pub fn sign_entity(
    account: &Account,
    credentials: &mut Credentials,
    tx: &Transaction,
) -> Result<SignedTransaction, WalletError> {
    let outcome = unlock_and_sign(account, credentials, tx);
    credentials.clear();
    outcome
}

fn unlock_and_sign(
    account: &Account,
    credentials: &mut Credentials,
    tx: &Transaction,
) -> Result<SignedTransaction, WalletError> {
    let private_key = match credentials.take_private_key() {
        Some(key) => {
            // A caller-supplied key gets the same gate as an unlocked one.
            if !check_address(key.as_str(), account.network, account.address.as_str()) {
                return Err(WalletError::AddressMismatch(
                    account.address.as_str().to_string(),
                ));
            }
            key
        }
        None => account.unlock_private_key(credentials)?,
    };
    Ok(sign_with_hex(tx, private_key.as_str())?)
}

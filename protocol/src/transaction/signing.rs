//! Transaction signing.
//!
//! Signing is a separate step from header building because the key may not
//! be available at construction time (hardware wallet, remote signer). The
//! signature covers the header bytes exactly as serialized; re-encoding a
//! decoded header is not guaranteed to reproduce them, so the bytes travel
//! with the signature.

use prost::Message;
use tracing::debug;

use super::error::TransactionError;
use crate::crypto::signatures::Signer;
use crate::messages::{Transaction, TransactionHeader};

/// A transaction whose header is signed by the transaction key.
pub type SignedTransaction = Transaction;

/// Signs `header` with `txn_key` and bundles it with its payload.
///
/// # Arguments
///
/// * `header` — Serialized [`TransactionHeader`] bytes.
/// * `payload` — The envelope bytes the header's `payload_sha512` commits to.
/// * `txn_key` — The transaction signer. Its public key must be the one
///   named in the header, or validators will reject the transaction.
pub fn sign_transaction<S>(header: Vec<u8>, payload: Vec<u8>, txn_key: &S) -> Result<SignedTransaction, TransactionError>
where
    S: Signer + ?Sized,
{
    let header_signature = txn_key.sign_hex(&header)?;
    debug!(
        transaction_id = %header_signature,
        header_len = header.len(),
        payload_len = payload.len(),
        "transaction signed"
    );
    Ok(Transaction {
        header,
        header_signature,
        payload,
    })
}

impl Transaction {
    /// The transaction id: its header signature.
    pub fn id(&self) -> &str {
        &self.header_signature
    }

    /// Decodes the signed header bytes.
    pub fn decode_header(&self) -> Result<TransactionHeader, prost::DecodeError> {
        TransactionHeader::decode(self.header.as_slice())
    }
}

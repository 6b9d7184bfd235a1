//! Transaction and batch verification.
//!
//! These are the checks a validator runs before accepting a batch, useful
//! for catching a bad key or a tampered payload before anything leaves the
//! process. Checks run cheapest first: decoding and hashing before any
//! signature verification.

use thiserror::Error;

use crate::crypto::hash::sha512_hex;
use crate::crypto::signatures::{verify, SignatureError};
use crate::messages::{Batch, BatchHeader, Transaction, TransactionHeader};

/// Reasons a transaction or batch fails verification.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// A header's bytes are not a valid record.
    #[error("malformed {record}: {source}")]
    Decode {
        record: &'static str,
        source: prost::DecodeError,
    },

    /// The payload does not hash to the header's `payload_sha512`.
    #[error("payload hash mismatch: header has {expected}, payload hashes to {actual}")]
    PayloadHashMismatch { expected: String, actual: String },

    /// A header signature does not verify against its signer's key.
    #[error("invalid {record} signature {signature}: {source}")]
    BadSignature {
        record: &'static str,
        signature: String,
        source: SignatureError,
    },

    /// The batch header and the batch disagree on how many transactions it holds.
    #[error("batch header lists {listed} transactions, batch carries {carried}")]
    TransactionCountMismatch { listed: usize, carried: usize },

    /// The batch header lists transactions in a different order, or different ones.
    #[error("transaction id #{index} is {listed} in the batch header but {actual} in the batch")]
    TransactionIdMismatch {
        index: usize,
        listed: String,
        actual: String,
    },

    /// A transaction names a different batcher than the key that signed the batch.
    #[error("transaction {transaction_id} expects batcher {expected}, batch is signed by {actual}")]
    BatcherMismatch {
        transaction_id: String,
        expected: String,
        actual: String,
    },
}

/// Verifies a single signed transaction.
///
/// Checks, in order:
/// 1. The header decodes.
/// 2. `payload_sha512` matches the SHA-512 of the payload.
/// 3. The header signature verifies against the header's `signer_public_key`.
///
/// Returns the decoded header on success.
pub fn verify_transaction(transaction: &Transaction) -> Result<TransactionHeader, VerificationError> {
    let header = transaction
        .decode_header()
        .map_err(|source| VerificationError::Decode {
            record: "transaction header",
            source,
        })?;

    let actual = sha512_hex(&transaction.payload);
    if actual != header.payload_sha512 {
        return Err(VerificationError::PayloadHashMismatch {
            expected: header.payload_sha512,
            actual,
        });
    }

    verify(
        &header.signer_public_key,
        &transaction.header,
        &transaction.header_signature,
    )
    .map_err(|source| VerificationError::BadSignature {
        record: "transaction",
        signature: transaction.header_signature.clone(),
        source,
    })?;

    Ok(header)
}

/// Verifies a signed batch and every transaction in it.
///
/// Beyond [`verify_transaction`] for each member, checks that the batch
/// signature verifies, that the header lists exactly the member
/// transactions' ids in order, and that every member names the batch
/// signer as its batcher.
///
/// Returns the decoded batch header on success.
pub fn verify_batch(batch: &Batch) -> Result<BatchHeader, VerificationError> {
    let header = batch
        .decode_header()
        .map_err(|source| VerificationError::Decode {
            record: "batch header",
            source,
        })?;

    if header.transaction_ids.len() != batch.transactions.len() {
        return Err(VerificationError::TransactionCountMismatch {
            listed: header.transaction_ids.len(),
            carried: batch.transactions.len(),
        });
    }

    for (index, (listed, transaction)) in header
        .transaction_ids
        .iter()
        .zip(&batch.transactions)
        .enumerate()
    {
        if listed != &transaction.header_signature {
            return Err(VerificationError::TransactionIdMismatch {
                index,
                listed: listed.clone(),
                actual: transaction.header_signature.clone(),
            });
        }
    }

    verify(&header.signer_public_key, &batch.header, &batch.header_signature).map_err(|source| {
        VerificationError::BadSignature {
            record: "batch",
            signature: batch.header_signature.clone(),
            source,
        }
    })?;

    for transaction in &batch.transactions {
        let txn_header = verify_transaction(transaction)?;
        if txn_header.batcher_public_key != header.signer_public_key {
            return Err(VerificationError::BatcherMismatch {
                transaction_id: transaction.header_signature.clone(),
                expected: txn_header.batcher_public_key,
                actual: header.signer_public_key,
            });
        }
    }

    Ok(header)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Batch assembly.
//!
//! A batch is the unit the ledger accepts: its transactions commit
//! atomically, in order. The batch header lists the transactions' header
//! signatures in that order and is signed by the batch key; that signature
//! is the batch id callers use to track submission status.

use prost::Message;
use tracing::{debug, warn};

use super::error::{encode_record, TransactionError};
use super::signing::SignedTransaction;
use crate::crypto::signatures::Signer;
use crate::messages::{Batch, BatchHeader, BatchList};

/// A signed batch ready for submission.
pub type SignedBatch = Batch;

/// Wraps `transactions` into a batch signed by `batch_key`.
///
/// Returns the batch and its header signature (the batch id). Transaction
/// order is preserved exactly.
///
/// An empty batch is assembled without complaint but is meaningless to the
/// ledger; don't submit one.
pub fn assemble_batch<S>(transactions: Vec<SignedTransaction>, batch_key: &S) -> Result<(SignedBatch, String), TransactionError>
where
    S: Signer + ?Sized,
{
    if transactions.is_empty() {
        warn!("assembling a batch with no transactions");
    }

    let batch_header = BatchHeader {
        signer_public_key: batch_key.public_key_hex(),
        transaction_ids: transactions
            .iter()
            .map(|txn| txn.header_signature.clone())
            .collect(),
    };
    let header = encode_record("batch header", &batch_header)?;
    let header_signature = batch_key.sign_hex(&header)?;

    debug!(
        batch_id = %header_signature,
        transactions = transactions.len(),
        "batch signed"
    );

    let batch = Batch {
        header,
        header_signature: header_signature.clone(),
        transactions,
        trace: false,
    };
    Ok((batch, header_signature))
}

impl Batch {
    /// The batch id: its header signature.
    pub fn id(&self) -> &str {
        &self.header_signature
    }

    /// Decodes the signed batch header bytes.
    pub fn decode_header(&self) -> Result<BatchHeader, prost::DecodeError> {
        BatchHeader::decode(self.header.as_slice())
    }

    /// Wraps this batch in the list record the submission endpoint takes.
    pub fn into_batch_list(self) -> BatchList {
        BatchList {
            batches: vec![self],
        }
    }
}

impl BatchList {
    /// Ids of the contained batches, in order.
    pub fn batch_ids(&self) -> Vec<&str> {
        self.batches.iter().map(Batch::id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::{Ed25519Keypair, Secp256k1Keypair};
    use crate::crypto::signatures::verify;
    use crate::transaction::signing::sign_transaction;

    fn signed(kp: &Secp256k1Keypair, header: &[u8]) -> SignedTransaction {
        sign_transaction(header.to_vec(), vec![], kp).unwrap()
    }

    #[test]
    fn batch_header_preserves_transaction_order() {
        let txn_key = Secp256k1Keypair::generate();
        let batch_key = Ed25519Keypair::generate();
        let txns: Vec<_> = (0u8..5).map(|i| signed(&txn_key, &[i])).collect();
        let expected: Vec<String> = txns.iter().map(|t| t.header_signature.clone()).collect();

        let (batch, batch_id) = assemble_batch(txns, &batch_key).unwrap();
        let header = batch.decode_header().unwrap();

        assert_eq!(header.transaction_ids, expected);
        assert_eq!(header.signer_public_key, batch_key.public_key_hex());
        assert_eq!(batch.id(), batch_id);
        assert!(!batch.trace);
    }

    #[test]
    fn batch_signature_verifies() {
        let key = Secp256k1Keypair::generate();
        let (batch, batch_id) = assemble_batch(vec![signed(&key, b"h")], &key).unwrap();
        assert!(verify(&key.public_key_hex(), &batch.header, &batch_id).is_ok());
    }

    #[test]
    fn empty_batch_is_permitted() {
        let key = Secp256k1Keypair::generate();
        let (batch, _) = assemble_batch(Vec::new(), &key).unwrap();
        assert!(batch.transactions.is_empty());
        assert!(batch.decode_header().unwrap().transaction_ids.is_empty());
    }

    #[test]
    fn batch_list_wraps_single_batch() {
        let key = Secp256k1Keypair::generate();
        let (batch, batch_id) = assemble_batch(vec![signed(&key, b"h")], &key).unwrap();
        let list = batch.into_batch_list();
        assert_eq!(list.batch_ids(), vec![batch_id.as_str()]);
    }
}

//! JSON summaries of verified batches, printed by `inspect`.

use anyhow::{Context, Result};
use serde::Serialize;

use rbac_protocol::messages::{Batch, BatchList, CreateUser, Transaction};
use rbac_protocol::transaction::{decode_create_user, verify_batch};

/// One verified batch.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub batch_id: String,
    pub signer_public_key: String,
    pub transactions: Vec<TransactionSummary>,
}

/// One transaction inside a verified batch.
#[derive(Debug, Serialize)]
pub struct TransactionSummary {
    pub transaction_id: String,
    pub family_name: String,
    pub family_version: String,
    pub signer_public_key: String,
    pub nonce: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub payload_sha512: String,
    /// `None` when the payload is not a create-user message.
    pub create_user: Option<UserSummary>,
}

/// The decoded create-user record.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub user_id: String,
    pub name: String,
    pub metadata: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
}

impl From<CreateUser> for UserSummary {
    fn from(record: CreateUser) -> Self {
        Self {
            user_id: record.user_id,
            name: record.name,
            metadata: record.metadata,
            manager_id: record.manager_id,
        }
    }
}

/// Verifies every batch in `list` and summarizes it.
///
/// Fails on the first batch that does not verify.
pub fn summarize(list: &BatchList) -> Result<Vec<BatchSummary>> {
    list.batches.iter().map(summarize_batch).collect()
}

fn summarize_batch(batch: &Batch) -> Result<BatchSummary> {
    let header = verify_batch(batch).with_context(|| format!("batch {} failed verification", batch.id()))?;

    let transactions = batch
        .transactions
        .iter()
        .map(summarize_transaction)
        .collect::<Result<_>>()?;

    Ok(BatchSummary {
        batch_id: batch.header_signature.clone(),
        signer_public_key: header.signer_public_key,
        transactions,
    })
}

fn summarize_transaction(transaction: &Transaction) -> Result<TransactionSummary> {
    let header = transaction
        .decode_header()
        .with_context(|| format!("transaction {} has a malformed header", transaction.id()))?;
    let create_user = decode_create_user(&transaction.payload)
        .with_context(|| format!("transaction {} has a malformed payload", transaction.id()))?
        .map(UserSummary::from);

    Ok(TransactionSummary {
        transaction_id: transaction.header_signature.clone(),
        family_name: header.family_name,
        family_version: header.family_version,
        signer_public_key: header.signer_public_key,
        nonce: header.nonce,
        inputs: header.inputs,
        outputs: header.outputs,
        payload_sha512: header.payload_sha512,
        create_user,
    })
}

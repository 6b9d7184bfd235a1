//! Error type for transaction assembly.

use prost::Message;
use thiserror::Error;

use crate::crypto::signatures::SigningError;

/// Errors that can occur while assembling a transaction or batch.
///
/// Neither variant is worth retrying: encoding is deterministic, and a
/// signing failure means the key is misconfigured.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// A record could not be serialized.
    #[error("failed to encode {record}: {reason}")]
    Encoding {
        /// Name of the record being encoded.
        record: &'static str,
        /// What the encoder reported.
        reason: String,
    },

    /// The key pair or signing primitive failed.
    #[error("signing failed: {0}")]
    Signing(#[from] SigningError),
}

/// Serializes `message` into a buffer sized up front.
pub(crate) fn encode_record<M: Message>(record: &'static str, message: &M) -> Result<Vec<u8>, TransactionError> {
    let mut buf = Vec::with_capacity(message.encoded_len());
    message
        .encode(&mut buf)
        .map_err(|e| TransactionError::Encoding {
            record,
            reason: e.to_string(),
        })?;
    Ok(buf)
}

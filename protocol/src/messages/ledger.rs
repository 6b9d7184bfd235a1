//! Ledger-level records: the generic transaction and batch containers every
//! transaction family shares.

/// Header of a single transaction. Its serialized bytes are what the
/// transaction signer signs, and that signature becomes the transaction id.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionHeader {
    /// Public key of the batch signer allowed to carry this transaction.
    #[prost(string, tag = "1")]
    pub batcher_public_key: String,
    /// Transaction ids that must be committed before this one.
    #[prost(string, repeated, tag = "2")]
    pub dependencies: Vec<String>,
    #[prost(string, tag = "3")]
    pub family_name: String,
    #[prost(string, tag = "4")]
    pub family_version: String,
    /// Addresses the transaction may read.
    #[prost(string, repeated, tag = "5")]
    pub inputs: Vec<String>,
    /// Makes otherwise identical headers distinct.
    #[prost(string, tag = "6")]
    pub nonce: String,
    /// Addresses the transaction may write.
    #[prost(string, repeated, tag = "7")]
    pub outputs: Vec<String>,
    /// Lowercase hex SHA-512 of `Transaction::payload`.
    #[prost(string, tag = "9")]
    pub payload_sha512: String,
    #[prost(string, tag = "10")]
    pub signer_public_key: String,
}

/// A signed transaction as carried inside a batch.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Transaction {
    /// Serialized [`TransactionHeader`].
    #[prost(bytes = "vec", tag = "1")]
    pub header: Vec<u8>,
    /// Hex signature over `header`; doubles as the transaction id.
    #[prost(string, tag = "2")]
    pub header_signature: String,
    #[prost(bytes = "vec", tag = "3")]
    pub payload: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BatchHeader {
    #[prost(string, tag = "1")]
    pub signer_public_key: String,
    /// Header signatures of the batch's transactions, in batch order.
    #[prost(string, repeated, tag = "2")]
    pub transaction_ids: Vec<String>,
}

/// An atomic unit of submission: all transactions commit or none do.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Batch {
    /// Serialized [`BatchHeader`].
    #[prost(bytes = "vec", tag = "1")]
    pub header: Vec<u8>,
    /// Hex signature over `header`; doubles as the batch id.
    #[prost(string, tag = "2")]
    pub header_signature: String,
    #[prost(message, repeated, tag = "3")]
    pub transactions: Vec<Transaction>,
    /// Asks validators to log this batch's progress at debug level.
    #[prost(bool, tag = "4")]
    pub trace: bool,
}

/// The body accepted by the ledger's batch submission endpoint.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BatchList {
    #[prost(message, repeated, tag = "1")]
    pub batches: Vec<Batch>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn default_fields_are_omitted() {
        assert!(BatchHeader::default().encode_to_vec().is_empty());
        assert!(!Batch::default().trace);
    }

    #[test]
    fn batch_header_field_layout() {
        let header = BatchHeader {
            signer_public_key: "ab".to_string(),
            transaction_ids: vec!["c".to_string(), "d".to_string()],
        };
        // tag 1 (len-delimited) "ab", then tag 2 twice, in element order.
        assert_eq!(
            header.encode_to_vec(),
            vec![0x0a, 2, b'a', b'b', 0x12, 1, b'c', 0x12, 1, b'd']
        );
    }

    #[test]
    fn payload_hash_uses_tag_nine() {
        let header = TransactionHeader {
            payload_sha512: "f".to_string(),
            ..Default::default()
        };
        // Field 9, wire type 2 => key byte (9 << 3) | 2 = 0x4a.
        assert_eq!(header.encode_to_vec(), vec![0x4a, 1, b'f']);
    }

    #[test]
    fn batch_list_decodes_nested_transactions() {
        let list = BatchList {
            batches: vec![Batch {
                header: vec![1, 2, 3],
                header_signature: "sig".to_string(),
                transactions: vec![Transaction {
                    header: vec![4],
                    header_signature: "txn".to_string(),
                    payload: vec![5, 6],
                }],
                trace: true,
            }],
        };
        let decoded = BatchList::decode(list.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.batches[0].transactions[0].payload, vec![5, 6]);
        assert!(decoded.batches[0].trace);
    }
}

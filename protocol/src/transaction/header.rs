//! Transaction header construction via the builder pattern.
//!
//! The header is the part of a transaction that gets signed. It commits to
//! the payload through `payload_sha512`, to the state it may touch through
//! `inputs`/`outputs`, and to who may sign and batch it.
//!
//! Addresses are kept exactly as supplied, duplicates included. The ledger
//! treats inputs and outputs as sets, so a repeated address is harmless,
//! and removing one here would change the signed bytes.

use uuid::Uuid;

use super::error::{encode_record, TransactionError};
use crate::addressing::Address;
use crate::config::{FAMILY_NAME, FAMILY_VERSION};
use crate::crypto::hash::sha512_hex;
use crate::messages::TransactionHeader;

// ---------------------------------------------------------------------------
// Nonce
// ---------------------------------------------------------------------------

/// How the header nonce is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Nonce {
    /// A fresh UUIDv4 in simple hex form for every header. Keeps two
    /// otherwise identical transactions from colliding on the same id.
    #[default]
    Random,
    /// A caller-chosen nonce, for reproducible header bytes.
    Fixed(String),
}

impl Nonce {
    /// Produces the nonce string to embed in a header.
    pub fn resolve(&self) -> String {
        match self {
            Self::Random => Uuid::new_v4().simple().to_string(),
            Self::Fixed(nonce) => nonce.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionHeaderBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`TransactionHeader`] records.
///
/// ```
/// use rbac_protocol::addressing::{AddressDeriver, RbacAddresser};
/// use rbac_protocol::transaction::{Nonce, TransactionHeaderBuilder};
///
/// let address = RbacAddresser::new().derive_user_address("02ab");
/// let header = TransactionHeaderBuilder::new()
///     .input(&address)
///     .output(&address)
///     .payload(b"envelope bytes")
///     .signer_public_key("02aa")
///     .batcher_public_key("03bb")
///     .nonce(Nonce::Fixed("1".into()))
///     .build();
///
/// assert_eq!(header.family_name, "rbac");
/// assert_eq!(header.payload_sha512.len(), 128);
/// ```
///
/// Family name and version default to the RBAC family's.
#[derive(Debug, Clone)]
pub struct TransactionHeaderBuilder {
    inputs: Vec<String>,
    outputs: Vec<String>,
    dependencies: Vec<String>,
    payload_sha512: String,
    signer_public_key: String,
    batcher_public_key: String,
    family_name: String,
    family_version: String,
    nonce: Nonce,
}

impl TransactionHeaderBuilder {
    /// Creates a builder for an RBAC-family header with a random nonce.
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            outputs: Vec::new(),
            dependencies: Vec::new(),
            payload_sha512: String::new(),
            signer_public_key: String::new(),
            batcher_public_key: String::new(),
            family_name: FAMILY_NAME.to_string(),
            family_version: FAMILY_VERSION.to_string(),
            nonce: Nonce::Random,
        }
    }

    /// Appends one input address.
    pub fn input(mut self, address: &Address) -> Self {
        self.inputs.push(address.to_string());
        self
    }

    /// Appends input addresses in order.
    pub fn inputs<'a, I>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = &'a Address>,
    {
        self.inputs.extend(addresses.into_iter().map(Address::to_string));
        self
    }

    /// Appends one output address.
    pub fn output(mut self, address: &Address) -> Self {
        self.outputs.push(address.to_string());
        self
    }

    /// Appends output addresses in order.
    pub fn outputs<'a, I>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = &'a Address>,
    {
        self.outputs.extend(addresses.into_iter().map(Address::to_string));
        self
    }

    /// Declares a transaction id that must commit before this one.
    pub fn dependency(mut self, transaction_id: &str) -> Self {
        self.dependencies.push(transaction_id.to_string());
        self
    }

    /// Sets the payload digest directly (lowercase hex SHA-512).
    pub fn payload_sha512(mut self, digest: &str) -> Self {
        self.payload_sha512 = digest.to_string();
        self
    }

    /// Hashes `payload` and sets the digest.
    pub fn payload(self, payload: &[u8]) -> Self {
        let digest = sha512_hex(payload);
        self.payload_sha512(&digest)
    }

    /// Sets the transaction signer's hex public key.
    pub fn signer_public_key(mut self, public_key: &str) -> Self {
        self.signer_public_key = public_key.to_string();
        self
    }

    /// Sets the batch signer's hex public key.
    pub fn batcher_public_key(mut self, public_key: &str) -> Self {
        self.batcher_public_key = public_key.to_string();
        self
    }

    /// Overrides the transaction family. Only useful for tests.
    pub fn family(mut self, name: &str, version: &str) -> Self {
        self.family_name = name.to_string();
        self.family_version = version.to_string();
        self
    }

    /// Chooses the nonce policy.
    pub fn nonce(mut self, nonce: Nonce) -> Self {
        self.nonce = nonce;
        self
    }

    /// Consumes the builder and produces the header record.
    pub fn build(self) -> TransactionHeader {
        TransactionHeader {
            batcher_public_key: self.batcher_public_key,
            dependencies: self.dependencies,
            family_name: self.family_name,
            family_version: self.family_version,
            inputs: self.inputs,
            nonce: self.nonce.resolve(),
            outputs: self.outputs,
            payload_sha512: self.payload_sha512,
            signer_public_key: self.signer_public_key,
        }
    }

    /// Builds the header and serializes it, returning both.
    pub fn build_encoded(self) -> Result<(TransactionHeader, Vec<u8>), TransactionError> {
        let header = self.build();
        let bytes = encode_header(&header)?;
        Ok((header, bytes))
    }
}

impl Default for TransactionHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes a header into the bytes that get signed.
pub fn encode_header(header: &TransactionHeader) -> Result<Vec<u8>, TransactionError> {
    encode_record("transaction header", header)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

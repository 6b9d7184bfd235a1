//! The create-user pipeline.
//!
//! ```text
//! NewUser ─► encode payload ─► wrap in envelope ─► sha512
//!        └─► derive addresses ───────────────────────┴─► header ─► sign ─► batch ─► sign
//! ```
//!
//! Every stage is a pure function of its inputs except the two signatures.
//! Nothing is persisted, so a failure anywhere leaves nothing to undo.

use tracing::debug;

use super::batch::{assemble_batch, SignedBatch};
use super::error::TransactionError;
use super::header::{Nonce, TransactionHeaderBuilder};
use super::payload::{encode_create_user, EnvelopeEncoder, NewUser, RbacEnvelopeEncoder};
use super::signing::{sign_transaction, SignedTransaction};
use crate::addressing::{Address, AddressDeriver, RbacAddresser};
use crate::crypto::hash::sha512_hex;
use crate::crypto::signatures::Signer;
use crate::messages::MessageType;

/// Assembles create-user transactions from two pluggable pieces: the
/// address layout and the dispatch envelope.
#[derive(Debug, Clone, Default)]
pub struct CreateUserPipeline<A = RbacAddresser, E = RbacEnvelopeEncoder> {
    addresser: A,
    envelope: E,
    nonce: Nonce,
}

impl CreateUserPipeline {
    /// A pipeline using the RBAC family's addressing and envelope.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<A, E> CreateUserPipeline<A, E>
where
    A: AddressDeriver,
    E: EnvelopeEncoder,
{
    /// A pipeline using caller-supplied addressing and envelope encoding.
    pub fn with_components(addresser: A, envelope: E) -> Self {
        Self {
            addresser,
            envelope,
            nonce: Nonce::Random,
        }
    }

    /// Sets the header nonce policy.
    pub fn nonce(mut self, nonce: Nonce) -> Self {
        self.nonce = nonce;
        self
    }

    /// Addresses the transaction reads and writes: the new user's, then one
    /// per manager in the order given.
    ///
    /// Every manager is listed even though only the first is recorded in the
    /// payload. Duplicates (a user managing themself, a repeated manager) are
    /// kept as encountered.
    pub fn state_addresses(&self, user: &NewUser) -> Vec<Address> {
        std::iter::once(user.user_id.as_str())
            .chain(user.manager_ids.iter().map(String::as_str))
            .map(|id| self.addresser.derive_user_address(id))
            .collect()
    }

    /// Encodes the create-user envelope: the bytes stored as the payload.
    pub fn encode_payload(&self, user: &NewUser) -> Result<Vec<u8>, TransactionError> {
        let content = encode_create_user(user)?;
        self.envelope.encode_envelope(MessageType::CreateUser, content)
    }

    /// Builds and signs the create-user transaction, without batching it.
    ///
    /// `batcher_public_key` names the key that will sign the enclosing
    /// batch; validators reject the transaction in any other batch.
    pub fn build_transaction<T>(
        &self,
        user: &NewUser,
        txn_key: &T,
        batcher_public_key: &str,
    ) -> Result<SignedTransaction, TransactionError>
    where
        T: Signer + ?Sized,
    {
        let payload = self.encode_payload(user)?;
        let payload_sha512 = sha512_hex(&payload);
        let addresses = self.state_addresses(user);

        let (_, header) = TransactionHeaderBuilder::new()
            .inputs(&addresses)
            .outputs(&addresses)
            .payload_sha512(&payload_sha512)
            .signer_public_key(&txn_key.public_key_hex())
            .batcher_public_key(batcher_public_key)
            .nonce(self.nonce.clone())
            .build_encoded()?;

        debug!(
            user_id = %user.user_id,
            managers = user.manager_ids.len(),
            addresses = addresses.len(),
            payload_sha512 = %payload_sha512,
            "create-user transaction built"
        );

        sign_transaction(header, payload, txn_key)
    }

    /// Runs the full pipeline: one create-user transaction in a batch
    /// signed by `batch_key`.
    ///
    /// Returns the batch and its id.
    pub fn create_user<T, B>(&self, txn_key: &T, batch_key: &B, user: &NewUser) -> Result<(SignedBatch, String), TransactionError>
    where
        T: Signer + ?Sized,
        B: Signer + ?Sized,
    {
        let transaction = self.build_transaction(user, txn_key, &batch_key.public_key_hex())?;
        assemble_batch(vec![transaction], batch_key)
    }
}

/// Builds a batch holding a single create-user transaction.
///
/// Only `manager_ids[0]` is recorded as the user's manager, while every
/// entry's address is declared in the header. `None` and an empty slice
/// both mean "no manager". Uses the RBAC family's addressing and envelope
/// and a random header nonce; use [`CreateUserPipeline`] to change any of
/// those.
///
/// # Example
///
/// ```
/// use rbac_protocol::crypto::Secp256k1Keypair;
/// use rbac_protocol::transaction::create_user_transaction;
///
/// let txn_key = Secp256k1Keypair::generate();
/// let batch_key = Secp256k1Keypair::generate();
/// let (batch, batch_id) =
///     create_user_transaction(&txn_key, &batch_key, "alice", "02ab", "{}", None).unwrap();
///
/// assert_eq!(batch.transactions.len(), 1);
/// assert_eq!(batch.header_signature, batch_id);
/// ```
pub fn create_user_transaction<T, B>(
    txn_key: &T,
    batch_key: &B,
    user_name: &str,
    user_id: &str,
    metadata: &str,
    manager_ids: Option<&[String]>,
) -> Result<(SignedBatch, String), TransactionError>
where
    T: Signer + ?Sized,
    B: Signer + ?Sized,
{
    let user = NewUser::new(user_name, user_id, metadata).managers(manager_ids.unwrap_or_default().iter().cloned());
    CreateUserPipeline::new().create_user(txn_key, batch_key, &user)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::{Ed25519Keypair, Secp256k1Keypair};
    use crate::messages::RbacPayload;
    use prost::Message;

    /// Addresser that just echoes the identifier, so tests can read headers.
    struct EchoAddresser;

    impl AddressDeriver for EchoAddresser {
        fn derive_user_address(&self, identifier: &str) -> Address {
            Address::new(format!("addr:{}", identifier))
        }
    }

    /// Envelope that prefixes content with the discriminant byte.
    struct TagEnvelope;

    impl EnvelopeEncoder for TagEnvelope {
        fn encode_envelope(&self, message_type: MessageType, content: Vec<u8>) -> Result<Vec<u8>, TransactionError> {
            let mut out = vec![message_type as u8];
            out.extend(content);
            Ok(out)
        }
    }

    fn fake_pipeline() -> CreateUserPipeline<EchoAddresser, TagEnvelope> {
        CreateUserPipeline::with_components(EchoAddresser, TagEnvelope).nonce(Nonce::Fixed("n".to_string()))
    }

    #[test]
    fn addresses_cover_user_then_every_manager() {
        let user = NewUser::new("alice", "u", "{}").managers(["m1", "m2"]);
        let addresses: Vec<String> = fake_pipeline()
            .state_addresses(&user)
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(addresses, vec!["addr:u", "addr:m1", "addr:m2"]);
    }

    #[test]
    fn self_managed_user_keeps_duplicate_address() {
        let user = NewUser::new("alice", "u", "{}").manager("u");
        assert_eq!(fake_pipeline().state_addresses(&user).len(), 2);
    }

    #[test]
    fn fakes_flow_through_header() {
        let key = Ed25519Keypair::from_seed(&[1u8; 32]);
        let user = NewUser::new("alice", "u", "{}").manager("m1");
        let txn = fake_pipeline().build_transaction(&user, &key, "batcher").unwrap();
        let header = txn.decode_header().unwrap();

        assert_eq!(header.inputs, vec!["addr:u", "addr:m1"]);
        assert_eq!(header.outputs, header.inputs);
        assert_eq!(header.batcher_public_key, "batcher");
        assert_eq!(header.payload_sha512, sha512_hex(&txn.payload));
        assert_eq!(txn.payload[0], MessageType::CreateUser as u8);
    }

    #[test]
    fn fixed_nonce_makes_the_whole_batch_reproducible() {
        let txn_key = Secp256k1Keypair::from_hex(&"21".repeat(32)).unwrap();
        let batch_key = Secp256k1Keypair::from_hex(&"42".repeat(32)).unwrap();
        let user = NewUser::new("alice", "02ab", "{}").manager("03cd");
        let pipeline = CreateUserPipeline::new().nonce(Nonce::Fixed("fixed".to_string()));

        let (a, a_id) = pipeline.create_user(&txn_key, &batch_key, &user).unwrap();
        let (b, b_id) = pipeline.create_user(&txn_key, &batch_key, &user).unwrap();
        assert_eq!(a.encode_to_vec(), b.encode_to_vec());
        assert_eq!(a_id, b_id);
    }

    #[test]
    fn random_nonce_gives_distinct_transaction_ids() {
        let key = Ed25519Keypair::generate();
        let user = NewUser::new("alice", "02ab", "{}");
        let pipeline = CreateUserPipeline::new();
        let a = pipeline.build_transaction(&user, &key, "b").unwrap();
        let b = pipeline.build_transaction(&user, &key, "b").unwrap();
        assert_eq!(a.payload, b.payload);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn batch_signer_is_named_in_transaction_header() {
        let txn_key = Secp256k1Keypair::generate();
        let batch_key = Ed25519Keypair::generate();
        let (batch, _) = create_user_transaction(&txn_key, &batch_key, "bob", "02ab", "", None).unwrap();

        let header = batch.transactions[0].decode_header().unwrap();
        assert_eq!(header.signer_public_key, txn_key.public_key_hex());
        assert_eq!(header.batcher_public_key, batch_key.public_key_hex());
    }

    #[test]
    fn empty_manager_slice_means_no_manager() {
        let key = Secp256k1Keypair::generate();
        let none: &[String] = &[];
        let (batch, _) = create_user_transaction(&key, &key, "bob", "02ab", "", Some(none)).unwrap();
        let txn = &batch.transactions[0];

        assert_eq!(txn.decode_header().unwrap().inputs.len(), 1);
        let envelope = RbacPayload::decode(txn.payload.as_slice()).unwrap();
        assert!(!envelope.content.is_empty());
    }
}

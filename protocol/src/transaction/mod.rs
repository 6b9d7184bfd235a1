//! # Transaction Module
//!
//! Assembly of RBAC create-user transactions, from the caller's intent to a
//! signed batch the ledger will accept.
//!
//! ## Architecture
//!
//! ```text
//! payload.rs      — NewUser intent, create-user payload and envelope encoding
//! header.rs       — Fluent TransactionHeaderBuilder and nonce policy
//! signing.rs      — Signing serialized headers into transactions
//! batch.rs        — Assembling and signing batches
//! user.rs         — The create-user pipeline tying the stages together
//! verification.rs — Validator-side checks of hashes, signatures and ordering
//! error.rs        — TransactionError
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Encode** — [`NewUser`] becomes a `CreateUser` record inside an
//!    `RbacPayload` envelope.
//! 2. **Address** — the user's and managers' state addresses are derived.
//! 3. **Header** — [`TransactionHeaderBuilder`] commits to the envelope's
//!    SHA-512, the addresses and both public keys.
//! 4. **Sign** — [`sign_transaction`] signs the header bytes.
//! 5. **Batch** — [`assemble_batch`] lists the transaction ids and signs the
//!    batch header.
//!
//! [`create_user_transaction`] runs all five.
//!
//! ## Design Decisions
//!
//! - Signatures are over serialized bytes, and those bytes travel with the
//!   signature. Nothing is ever re-encoded before verification.
//! - Header and batch signatures are hex strings and double as ids.
//! - Addresses are never deduplicated; the ledger's address sets absorb it.

pub mod batch;
pub mod error;
pub mod header;
pub mod payload;
pub mod signing;
pub mod user;
pub mod verification;

pub use batch::{assemble_batch, SignedBatch};
pub use error::TransactionError;
pub use header::{encode_header, Nonce, TransactionHeaderBuilder};
pub use payload::{decode_create_user, encode_create_user, EnvelopeEncoder, NewUser, RbacEnvelopeEncoder};
pub use signing::{sign_transaction, SignedTransaction};
pub use user::{create_user_transaction, CreateUserPipeline};
pub use verification::{verify_batch, verify_transaction, VerificationError};

// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # RBAC Protocol — Transaction Assembly
//!
//! Builds the signed transactions and batches that create users in a
//! role-based access control ledger. Validators independently re-derive
//! every hash, address and signature, so everything here is byte-exact and
//! deterministic, apart from the nonce and whatever the signature scheme
//! chooses to randomize.
//!
//! ## Architecture
//!
//! - **config** — Family name, address layout and key sizes.
//! - **crypto** — SHA-512, secp256k1 and Ed25519 behind a `Signer` trait.
//! - **addressing** — State addresses for user records.
//! - **messages** — Protobuf records exchanged with the ledger.
//! - **transaction** — The create-user pipeline, batching and verification.
//!
//! ## Example
//!
//! ```
//! use rbac_protocol::crypto::Secp256k1Keypair;
//! use rbac_protocol::transaction::{verify_batch, CreateUserPipeline, NewUser};
//!
//! let txn_key = Secp256k1Keypair::generate();
//! let batch_key = Secp256k1Keypair::generate();
//! let user = NewUser::new("alice", "02ab", "{}").manager("03cd");
//!
//! let (batch, batch_id) = CreateUserPipeline::new()
//!     .create_user(&txn_key, &batch_key, &user)
//!     .unwrap();
//!
//! assert!(verify_batch(&batch).is_ok());
//! assert_eq!(batch.header_signature, batch_id);
//! ```

pub mod addressing;
pub mod config;
pub mod crypto;
pub mod messages;
pub mod transaction;

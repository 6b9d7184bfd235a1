//! # Wire Records
//!
//! Protobuf records exchanged with the ledger. Field numbers match the
//! ledger's published `.proto` definitions; the structs are declared with
//! `prost` derives directly so the crate builds without `protoc`.
//!
//! ```text
//! ledger.rs — TransactionHeader, Transaction, BatchHeader, Batch, BatchList
//! rbac.rs   — RbacPayload envelope, MessageType discriminant, CreateUser
//! ```
//!
//! Protobuf encoding of these records is canonical for our purposes: fields
//! are emitted in tag order, repeated fields in element order, and default
//! scalars are omitted. Identical records always encode to identical bytes.

pub mod ledger;
pub mod rbac;

pub use ledger::{Batch, BatchHeader, BatchList, Transaction, TransactionHeader};
pub use rbac::{CreateUser, MessageType, RbacPayload};

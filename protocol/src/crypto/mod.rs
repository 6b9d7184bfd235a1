//! # Cryptographic Primitives
//!
//! Everything the RBAC pipeline hashes or signs flows through here:
//!
//! - **SHA-512** for payload binding and address derivation.
//! - **secp256k1 ECDSA** for transaction and batch signatures (ledger default).
//! - **Ed25519** for validators configured with it.
//!
//! Everything here is a thin, type-safe wrapper around audited
//! implementations (`sha2`, `k256`, `ed25519-dalek`).

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{sha512, sha512_hex};
pub use keys::{Ed25519Keypair, KeyError, KeyPair, Secp256k1Keypair, SignatureScheme};
pub use signatures::{scheme_for_public_key, verify, SignatureError, Signer, SigningError};

//! # Hashing Utilities
//!
//! SHA-512 is the only hash the RBAC family needs, and it needs it in two
//! places:
//!
//! - **Payload binding** — the transaction header embeds the lowercase hex
//!   SHA-512 of the exact payload bytes. Validators recompute it and reject
//!   the transaction on mismatch.
//! - **Addressing** — the family namespace and every state address are
//!   prefixes of SHA-512 hex digests.
//!
//! Both uses compare hex strings produced by other implementations, so the
//! output must be lowercase hex with no separators. `hex::encode` gives us
//! exactly that.

use sha2::{Digest, Sha512};

/// Compute the SHA-512 hash of the input data.
///
/// # Example
///
/// ```
/// use rbac_protocol::crypto::sha512;
///
/// let hash = sha512(b"rbac");
/// assert_eq!(hash.len(), 64);
/// ```
pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut hasher = Sha512::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 64];
    output.copy_from_slice(&result);
    output
}

/// Compute SHA-512 and render it as 128 lowercase hex characters.
///
/// This is the form embedded in `TransactionHeader::payload_sha512`.
pub fn sha512_hex(data: &[u8]) -> String {
    hex::encode(sha512(data))
}

//! # Protocol Configuration & Constants
//!
//! Every magic number of the RBAC transaction family lives here. The
//! validators re-derive addresses and re-check headers against these exact
//! values, so changing one is a consensus change, not a refactor.

// ---------------------------------------------------------------------------
// Transaction Family
// ---------------------------------------------------------------------------

/// Family name written into every transaction header. Validators route
/// transactions to the RBAC transaction processor by this string.
pub const FAMILY_NAME: &str = "rbac";

/// Family version written into every transaction header.
pub const FAMILY_VERSION: &str = "1.0";

/// Crate version, surfaced by the CLI `version` subcommand.
pub const PROTOCOL_VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// Addressing
// ---------------------------------------------------------------------------

/// Number of hex characters of `sha512(FAMILY_NAME)` that prefix every
/// address owned by the family.
pub const NAMESPACE_LENGTH: usize = 6;

/// Address-space tag for user records, placed right after the namespace.
pub const USER_ADDRESS_SPACE: &str = "00";

/// Total address length in hex characters (35 bytes).
pub const ADDRESS_LENGTH: usize = 70;

/// Hex characters of `sha512(identifier)` kept after namespace and tag.
pub const ADDRESS_HASH_LENGTH: usize = ADDRESS_LENGTH - NAMESPACE_LENGTH - USER_ADDRESS_SPACE.len();

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Content hash embedded in transaction headers.
pub const PAYLOAD_HASH_FUNCTION: &str = "SHA-512";

/// SHA-512 digests are 64 bytes, 128 lowercase hex characters.
pub const PAYLOAD_HASH_HEX_LENGTH: usize = 128;

/// Compressed SEC1 secp256k1 public key length.
pub const SECP256K1_PUBLIC_KEY_LENGTH: usize = 33;

/// Ed25519 public key length.
pub const ED25519_PUBLIC_KEY_LENGTH: usize = 32;

/// Private key length, shared by both supported schemes.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Compact signature length. Both r||s ECDSA and Ed25519 signatures are
/// 64 bytes, so every header signature is 128 hex characters.
pub const SIGNATURE_LENGTH: usize = 64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_layout_adds_up() {
        assert_eq!(
            NAMESPACE_LENGTH + USER_ADDRESS_SPACE.len() + ADDRESS_HASH_LENGTH,
            ADDRESS_LENGTH
        );
        // A SHA-512 hex digest must be long enough to fill the hash part.
        assert!(ADDRESS_HASH_LENGTH <= PAYLOAD_HASH_HEX_LENGTH);
    }

    #[test]
    fn family_identifiers_are_non_empty() {
        assert!(!FAMILY_NAME.is_empty());
        assert!(!FAMILY_VERSION.is_empty());
    }

    #[test]
    fn crypto_parameter_sizes() {
        assert_eq!(SECP256K1_PUBLIC_KEY_LENGTH, 33);
        assert_eq!(ED25519_PUBLIC_KEY_LENGTH, 32);
        assert_eq!(SIGNATURE_LENGTH, 64);
        assert_eq!(PAYLOAD_HASH_HEX_LENGTH, 128);
    }
}

//! # Key Management
//!
//! Key pairs for the two signature schemes the ledger accepts.
//!
//! - **secp256k1** ECDSA is the ledger's native scheme. Public keys travel
//!   as 33-byte compressed SEC1 points (`02..`/`03..` in hex), which is also
//!   the shape RBAC user identifiers take.
//! - **Ed25519** is accepted by validators configured for it.
//!
//! Both key types hold nothing but the signing key and are read-only after
//! construction, so a single key pair can sign for any number of threads.
//!
//! Key bytes are never logged. `Debug` prints the public key only.

use ed25519_dalek::{Signer as _, SigningKey as Ed25519SigningKey};
use k256::ecdsa::{signature::Signer as _, Signature as EcdsaSignature, SigningKey as EcdsaSigningKey};
use rand::rngs::OsRng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::signatures::{Signer, SigningError};
use crate::config::PRIVATE_KEY_LENGTH;

/// Errors that can occur while loading key material.
///
/// Intentionally vague about *why* a key was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or not a valid scalar")]
    InvalidSecretKey,

    #[error("invalid public key bytes: not a valid curve point")]
    InvalidPublicKey,

    #[error("unknown signature scheme: {0}")]
    UnknownScheme(String),
}

// ---------------------------------------------------------------------------
// SignatureScheme
// ---------------------------------------------------------------------------

/// The signature algorithms a key pair can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignatureScheme {
    /// ECDSA over secp256k1 with RFC 6979 nonces. The ledger default.
    #[default]
    Secp256k1,
    /// Ed25519 (RFC 8032).
    Ed25519,
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Secp256k1 => write!(f, "secp256k1"),
            Self::Ed25519 => write!(f, "ed25519"),
        }
    }
}

impl FromStr for SignatureScheme {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "secp256k1" => Ok(Self::Secp256k1),
            "ed25519" => Ok(Self::Ed25519),
            other => Err(KeyError::UnknownScheme(other.to_string())),
        }
    }
}

/// Decodes a hex private key into its fixed-size byte form.
fn decode_secret_hex(hex_str: &str) -> Result<[u8; PRIVATE_KEY_LENGTH], KeyError> {
    let bytes = hex::decode(hex_str.trim()).map_err(|_| KeyError::InvalidSecretKey)?;
    bytes.try_into().map_err(|_| KeyError::InvalidSecretKey)
}

// ---------------------------------------------------------------------------
// Secp256k1Keypair
// ---------------------------------------------------------------------------

/// A secp256k1 ECDSA key pair.
///
/// Signing hashes the message with SHA-256 and uses RFC 6979 deterministic
/// nonces, so the same (key, message) pair always yields the same 64-byte
/// `r || s` signature.
pub struct Secp256k1Keypair {
    signing_key: EcdsaSigningKey,
}

impl Secp256k1Keypair {
    /// Generate a fresh key pair from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: EcdsaSigningKey::random(&mut OsRng),
        }
    }

    /// Reconstruct a key pair from a 32-byte secret scalar.
    ///
    /// Fails for zero and for values not below the curve order.
    pub fn from_bytes(secret_key_bytes: &[u8; PRIVATE_KEY_LENGTH]) -> Result<Self, KeyError> {
        let signing_key =
            EcdsaSigningKey::from_slice(secret_key_bytes).map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self { signing_key })
    }

    /// Reconstruct a key pair from a hex-encoded secret key.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        Self::from_bytes(&decode_secret_hex(hex_str)?)
    }

    /// Compressed SEC1 public key (33 bytes).
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.signing_key
            .verifying_key()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec()
    }

    /// Exports the secret scalar as hex. Handle with care.
    pub fn secret_key_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }
}

impl Signer for Secp256k1Keypair {
    fn scheme(&self) -> SignatureScheme {
        SignatureScheme::Secp256k1
    }

    fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SigningError> {
        let signature: EcdsaSignature = self
            .signing_key
            .try_sign(message)
            .map_err(|e| SigningError::Primitive(e.to_string()))?;
        Ok(signature.to_bytes().to_vec())
    }
}

impl fmt::Debug for Secp256k1Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secp256k1Keypair(pub={})", self.public_key_hex())
    }
}

// ---------------------------------------------------------------------------
// Ed25519Keypair
// ---------------------------------------------------------------------------

/// An Ed25519 key pair.
///
/// Deterministic by construction: no nonce state, no RNG at signing time.
pub struct Ed25519Keypair {
    signing_key: Ed25519SigningKey,
}

impl Ed25519Keypair {
    /// Generate a fresh key pair from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: Ed25519SigningKey::generate(&mut OsRng),
        }
    }

    /// Constructs a key pair from a 32-byte seed. In Ed25519 the seed *is*
    /// the secret key, so every 32-byte value is accepted.
    pub fn from_seed(seed: &[u8; PRIVATE_KEY_LENGTH]) -> Self {
        Self {
            signing_key: Ed25519SigningKey::from_bytes(seed),
        }
    }

    /// Reconstruct a key pair from a hex-encoded secret key.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        Ok(Self::from_seed(&decode_secret_hex(hex_str)?))
    }

    /// Raw 32-byte public key.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Exports the secret seed as hex. Handle with care.
    pub fn secret_key_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }
}

impl Signer for Ed25519Keypair {
    fn scheme(&self) -> SignatureScheme {
        SignatureScheme::Ed25519
    }

    fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SigningError> {
        Ok(self.signing_key.sign(message).to_bytes().to_vec())
    }
}

impl fmt::Debug for Ed25519Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Keypair(pub={})", self.public_key_hex())
    }
}

// ---------------------------------------------------------------------------
// KeyPair
// ---------------------------------------------------------------------------

/// A key pair of either scheme, selected at runtime (e.g. from a CLI flag).
#[derive(Debug)]
pub enum KeyPair {
    Secp256k1(Secp256k1Keypair),
    Ed25519(Ed25519Keypair),
}

impl KeyPair {
    /// Generate a fresh key pair for `scheme`.
    pub fn generate(scheme: SignatureScheme) -> Self {
        match scheme {
            SignatureScheme::Secp256k1 => Self::Secp256k1(Secp256k1Keypair::generate()),
            SignatureScheme::Ed25519 => Self::Ed25519(Ed25519Keypair::generate()),
        }
    }

    /// Load a hex-encoded secret key for `scheme`.
    pub fn from_hex(scheme: SignatureScheme, hex_str: &str) -> Result<Self, KeyError> {
        match scheme {
            SignatureScheme::Secp256k1 => Secp256k1Keypair::from_hex(hex_str).map(Self::Secp256k1),
            SignatureScheme::Ed25519 => Ed25519Keypair::from_hex(hex_str).map(Self::Ed25519),
        }
    }

    /// Exports the secret key as hex.
    pub fn secret_key_hex(&self) -> String {
        match self {
            Self::Secp256k1(kp) => kp.secret_key_hex(),
            Self::Ed25519(kp) => kp.secret_key_hex(),
        }
    }
}

impl Signer for KeyPair {
    fn scheme(&self) -> SignatureScheme {
        match self {
            Self::Secp256k1(kp) => kp.scheme(),
            Self::Ed25519(kp) => kp.scheme(),
        }
    }

    fn public_key_hex(&self) -> String {
        match self {
            Self::Secp256k1(kp) => kp.public_key_hex(),
            Self::Ed25519(kp) => kp.public_key_hex(),
        }
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SigningError> {
        match self {
            Self::Secp256k1(kp) => kp.sign(message),
            Self::Ed25519(kp) => kp.sign(message),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

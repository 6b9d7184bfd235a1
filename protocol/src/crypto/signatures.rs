//! # Digital Signatures
//!
//! The [`Signer`] trait is the seam between transaction assembly and key
//! material. The pipeline only ever asks a signer for two things: its
//! public key (hex, as it appears in headers) and a signature over some
//! bytes. Hardware wallets, remote signers and test fakes all fit behind it.
//!
//! Verification goes the other way: given the hex public key from a header,
//! the scheme is recovered from the key length (33 bytes is compressed
//! secp256k1, 32 bytes is Ed25519) and the signature is checked against the
//! exact bytes that were signed.

use ed25519_dalek::{Signature as Ed25519Signature, Verifier as _, VerifyingKey as Ed25519VerifyingKey};
use k256::ecdsa::{signature::Verifier as _, Signature as EcdsaSignature, VerifyingKey as EcdsaVerifyingKey};
use thiserror::Error;

use super::keys::SignatureScheme;
use crate::config::{ED25519_PUBLIC_KEY_LENGTH, SECP256K1_PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

/// Errors raised while producing a signature.
#[derive(Debug, Error)]
pub enum SigningError {
    /// The key pair cannot sign (malformed or unusable key material).
    #[error("invalid signing key")]
    InvalidKey,

    /// The underlying signing primitive reported a failure.
    #[error("signing primitive failed: {0}")]
    Primitive(String),
}

/// Errors during signature verification.
///
/// Carries no detail about which check failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signature verification failed")]
    VerificationFailed,

    #[error("invalid signature bytes: expected 64 bytes")]
    InvalidSignatureBytes,

    #[error("invalid public key")]
    InvalidPublicKey,
}

/// Anything that can sign ledger headers.
///
/// Implementations must sign the exact bytes they are given; the pipeline
/// never pre-hashes. Any nonce policy is the scheme's own business.
pub trait Signer {
    /// The scheme this signer produces signatures for.
    fn scheme(&self) -> SignatureScheme;

    /// Lowercase hex public key, as embedded in transaction and batch headers.
    fn public_key_hex(&self) -> String;

    /// Sign `message`, returning the raw signature bytes.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SigningError>;

    /// Sign `message` and hex-encode the result. Header signatures are
    /// carried as hex strings and double as transaction and batch ids.
    fn sign_hex(&self, message: &[u8]) -> Result<String, SigningError> {
        self.sign(message).map(hex::encode)
    }
}

/// Infers the signature scheme from a hex public key.
pub fn scheme_for_public_key(public_key_hex: &str) -> Result<SignatureScheme, SignatureError> {
    match public_key_hex.len() / 2 {
        SECP256K1_PUBLIC_KEY_LENGTH => Ok(SignatureScheme::Secp256k1),
        ED25519_PUBLIC_KEY_LENGTH => Ok(SignatureScheme::Ed25519),
        _ => Err(SignatureError::InvalidPublicKey),
    }
}

/// Verify a hex signature over `message` against a hex public key.
///
/// This is the "I got these strings out of a header" variant: both the key
/// and the signature arrive hex-encoded, exactly as the ledger stores them.
pub fn verify(public_key_hex: &str, message: &[u8], signature_hex: &str) -> Result<(), SignatureError> {
    let scheme = scheme_for_public_key(public_key_hex)?;
    let public_key = hex::decode(public_key_hex).map_err(|_| SignatureError::InvalidPublicKey)?;
    let signature = hex::decode(signature_hex).map_err(|_| SignatureError::InvalidSignatureBytes)?;
    if signature.len() != SIGNATURE_LENGTH {
        return Err(SignatureError::InvalidSignatureBytes);
    }

    match scheme {
        SignatureScheme::Secp256k1 => {
            let verifying_key = EcdsaVerifyingKey::from_sec1_bytes(&public_key)
                .map_err(|_| SignatureError::InvalidPublicKey)?;
            let signature = EcdsaSignature::from_slice(&signature)
                .map_err(|_| SignatureError::InvalidSignatureBytes)?;
            verifying_key
                .verify(message, &signature)
                .map_err(|_| SignatureError::VerificationFailed)
        }
        SignatureScheme::Ed25519 => {
            let key_bytes: [u8; ED25519_PUBLIC_KEY_LENGTH] = public_key
                .try_into()
                .map_err(|_| SignatureError::InvalidPublicKey)?;
            let verifying_key = Ed25519VerifyingKey::from_bytes(&key_bytes)
                .map_err(|_| SignatureError::InvalidPublicKey)?;
            let signature = Ed25519Signature::from_slice(&signature)
                .map_err(|_| SignatureError::InvalidSignatureBytes)?;
            verifying_key
                .verify(message, &signature)
                .map_err(|_| SignatureError::VerificationFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::{Ed25519Keypair, KeyPair, Secp256k1Keypair};

    /// A signer whose primitive always fails, standing in for a broken HSM.
    struct FailingSigner;

    impl Signer for FailingSigner {
        fn scheme(&self) -> SignatureScheme {
            SignatureScheme::Secp256k1
        }

        fn public_key_hex(&self) -> String {
            "02".repeat(33)
        }

        fn sign(&self, _message: &[u8]) -> Result<Vec<u8>, SigningError> {
            Err(SigningError::InvalidKey)
        }
    }

    #[test]
    fn test_secp256k1_sign_and_verify() {
        let kp = Secp256k1Keypair::generate();
        let sig = kp.sign_hex(b"hello, ledger").unwrap();
        assert_eq!(sig.len(), 128);
        assert!(verify(&kp.public_key_hex(), b"hello, ledger", &sig).is_ok());
    }

    #[test]
    fn test_ed25519_sign_and_verify() {
        let kp = Ed25519Keypair::generate();
        let sig = kp.sign_hex(b"hello, ledger").unwrap();
        assert!(verify(&kp.public_key_hex(), b"hello, ledger", &sig).is_ok());
    }

    #[test]
    fn test_wrong_message_fails() {
        let kp = Secp256k1Keypair::generate();
        let sig = kp.sign_hex(b"correct message").unwrap();
        assert_eq!(
            verify(&kp.public_key_hex(), b"wrong message", &sig),
            Err(SignatureError::VerificationFailed)
        );
    }

    #[test]
    fn test_wrong_key_fails() {
        let kp1 = KeyPair::generate(SignatureScheme::Ed25519);
        let kp2 = KeyPair::generate(SignatureScheme::Ed25519);
        let sig = kp1.sign_hex(b"test message").unwrap();
        assert!(verify(&kp2.public_key_hex(), b"test message", &sig).is_err());
    }

    #[test]
    fn test_scheme_detection_by_key_length() {
        let secp = Secp256k1Keypair::generate();
        let ed = Ed25519Keypair::generate();
        assert_eq!(
            scheme_for_public_key(&secp.public_key_hex()),
            Ok(SignatureScheme::Secp256k1)
        );
        assert_eq!(
            scheme_for_public_key(&ed.public_key_hex()),
            Ok(SignatureScheme::Ed25519)
        );
        assert_eq!(
            scheme_for_public_key("abcd"),
            Err(SignatureError::InvalidPublicKey)
        );
    }

    #[test]
    fn test_truncated_signature_rejected() {
        let kp = Secp256k1Keypair::generate();
        let sig = kp.sign_hex(b"msg").unwrap();
        assert_eq!(
            verify(&kp.public_key_hex(), b"msg", &sig[..126]),
            Err(SignatureError::InvalidSignatureBytes)
        );
    }

    #[test]
    fn test_non_hex_signature_rejected() {
        let kp = Ed25519Keypair::generate();
        let garbage = "zz".repeat(64);
        assert_eq!(
            verify(&kp.public_key_hex(), b"msg", &garbage),
            Err(SignatureError::InvalidSignatureBytes)
        );
    }

    #[test]
    fn test_failing_signer_surfaces_error() {
        assert!(matches!(
            FailingSigner.sign_hex(b"anything"),
            Err(SigningError::InvalidKey)
        ));
    }
}

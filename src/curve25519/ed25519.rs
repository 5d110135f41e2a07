//! Ed25519 signatures (`spec.md` §4.9, RFC 8032), wrapping
//! `ed25519-dalek`'s sign/verify rather than hand-rolling SHA-512 key
//! expansion and scalar/point encoding.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand_core::{CryptoRng, RngCore};

use crate::config::{CURVE25519_LEN, ED25519_SIGNATURE_LEN};
use crate::error::{CryptoError, Result};

/// An Ed25519 signing keypair.
pub struct Ed25519KeyPair {
    signing_key: SigningKey,
}

impl Ed25519KeyPair {
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self { signing_key: SigningKey::generate(rng) }
    }

    /// Reconstructs a keypair from a 32-byte seed (RFC 8032 §5.1.5's
    /// private key encoding, before SHA-512 expansion).
    pub fn from_seed(seed: [u8; CURVE25519_LEN]) -> Self {
        Self { signing_key: SigningKey::from_bytes(&seed) }
    }

    #[must_use]
    pub fn public_key(&self) -> [u8; CURVE25519_LEN] {
        self.signing_key.verifying_key().to_bytes()
    }

    #[must_use]
    pub fn sign(&self, message: &[u8]) -> [u8; ED25519_SIGNATURE_LEN] {
        self.signing_key.sign(message).to_bytes()
    }
}

/// Verifies an Ed25519 signature against a raw 32-byte public key.
pub fn verify(public_key: &[u8; CURVE25519_LEN], message: &[u8], signature: &[u8; ED25519_SIGNATURE_LEN]) -> Result<()> {
    let verifying_key = VerifyingKey::from_bytes(public_key).map_err(|e| CryptoError::invalid_argument(e.to_string()))?;
    let signature = Signature::from_bytes(signature);
    verifying_key.verify(message, &signature).map_err(|_| CryptoError::AuthenticationFailure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::OsRng;

    #[test]
    fn sign_then_verify_round_trips() {
        let keypair = Ed25519KeyPair::generate(&mut OsRng);
        let message = b"the Noise handshake static key signature payload";
        let signature = keypair.sign(message);
        verify(&keypair.public_key(), message, &signature).unwrap();
    }

    #[test]
    fn tampered_message_fails_verification() {
        let keypair = Ed25519KeyPair::generate(&mut OsRng);
        let signature = keypair.sign(b"original message");
        assert!(matches!(verify(&keypair.public_key(), b"tampered message", &signature), Err(CryptoError::AuthenticationFailure)));
    }

    /// RFC 8032 §7.1 test vector 1.
    #[test]
    fn rfc8032_test_vector_1() {
        let seed: [u8; 32] = [
            0x9d, 0x61, 0xb1, 0x9d, 0xef, 0xfd, 0x5a, 0x60, 0xba, 0x84, 0x4a, 0xf4, 0x92, 0xec, 0x2c, 0xc4, 0x44, 0x49, 0xc5, 0x69, 0x7b, 0x32,
            0x69, 0x19, 0x70, 0x3b, 0xac, 0x03, 0x1c, 0xae, 0x7f, 0x60,
        ];
        let expected_public: [u8; 32] = [
            0xd7, 0x5a, 0x98, 0x01, 0x82, 0xb1, 0x0a, 0xb7, 0xd5, 0x4b, 0xfe, 0xd3, 0xc9, 0x64, 0x07, 0x3a, 0x0e, 0xe1, 0x72, 0xf3, 0xda, 0xa6,
            0x23, 0x25, 0xaf, 0x02, 0x1a, 0x68, 0xf7, 0x07, 0x51, 0x1a,
        ];
        let keypair = Ed25519KeyPair::from_seed(seed);
        assert_eq!(keypair.public_key(), expected_public);

        let signature = keypair.sign(b"");
        let expected_sig: [u8; 64] = [
            0xe5, 0x56, 0x43, 0x00, 0xc3, 0x60, 0xac, 0x72, 0x90, 0x86, 0xe2, 0xcc, 0x80, 0x6e, 0x82, 0x8a, 0x84, 0x87, 0x7f, 0x1e, 0xb8, 0xe5,
            0xd9, 0x74, 0xd8, 0x73, 0xe0, 0x65, 0x22, 0x49, 0x01, 0x55, 0x5f, 0xb8, 0x82, 0x15, 0x90, 0xa3, 0x3b, 0xac, 0xc6, 0x1e, 0x39, 0x70,
            0x1c, 0xf9, 0xb4, 0x6b, 0xd2, 0x5b, 0xf5, 0xf0, 0x59, 0x5b, 0xbe, 0x24, 0x65, 0x51, 0x41, 0x43, 0x8e, 0x7a, 0x10, 0x0b,
        ];
        assert_eq!(signature, expected_sig);
    }
}

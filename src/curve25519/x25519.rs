//! X25519 Diffie-Hellman (`spec.md` §4.9, RFC 7748), wrapping
//! `x25519-dalek`'s Montgomery-ladder scalar multiplication rather than
//! hand-rolling field arithmetic over `2^255 - 19`.

use rand_core::{CryptoRng, RngCore};
use x25519_dalek::{PublicKey, ReusableSecret, StaticSecret};

use crate::config::CURVE25519_LEN;
use crate::error::{CryptoError, Result};
use crate::secret::SecretKeyData;

/// A long-lived X25519 keypair, e.g. a Noise static or semi-static key.
pub struct X25519KeyPair {
    secret: StaticSecret,
    public: PublicKey,
}

impl X25519KeyPair {
    /// Generates a new keypair. The scalar is clamped per RFC 7748 §5 inside
    /// `x25519-dalek` itself.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let secret = StaticSecret::random_from_rng(rng);
        let public = PublicKey::from(&secret);
        Self { secret, public }
    }

    /// Reconstructs a keypair from a 32-byte scalar, e.g. one loaded from
    /// storage.
    pub fn from_bytes(bytes: [u8; CURVE25519_LEN]) -> Self {
        let secret = StaticSecret::from(bytes);
        let public = PublicKey::from(&secret);
        Self { secret, public }
    }

    #[must_use]
    pub fn public_key(&self) -> [u8; CURVE25519_LEN] {
        self.public.to_bytes()
    }

    /// Computes the shared secret `X25519(self.secret, peer_public)`.
    #[must_use]
    pub fn diffie_hellman(&self, peer_public: &[u8; CURVE25519_LEN]) -> SecretKeyData {
        let peer = PublicKey::from(*peer_public);
        let shared = self.secret.diffie_hellman(&peer);
        SecretKeyData::from_slice(shared.as_bytes())
    }
}

/// A single-use X25519 secret, for ephemeral Noise handshake keys (`e` in
/// the message pattern tokens). `ReusableSecret` is used rather than
/// dalek's one-shot `EphemeralSecret` because the same ephemeral key must
/// be Diffie-Hellman'd against more than one peer public key within a
/// single handshake message (e.g. both `ee` and `es` in pattern `X`).
pub struct EphemeralX25519 {
    secret: ReusableSecret,
    public: PublicKey,
}

impl EphemeralX25519 {
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let secret = ReusableSecret::random_from_rng(rng);
        let public = PublicKey::from(&secret);
        Self { secret, public }
    }

    #[must_use]
    pub fn public_key(&self) -> [u8; CURVE25519_LEN] {
        self.public.to_bytes()
    }

    #[must_use]
    pub fn diffie_hellman(&self, peer_public: &[u8; CURVE25519_LEN]) -> SecretKeyData {
        let peer = PublicKey::from(*peer_public);
        let shared = self.secret.diffie_hellman(&peer);
        SecretKeyData::from_slice(shared.as_bytes())
    }
}

/// Validates that `bytes` is a well-formed X25519 public key length. The
/// Montgomery-curve representation accepts all 32-byte strings (small-order
/// points included), so this only checks length, matching `spec.md` §4.9's
/// note that point validation is out of scope for this primitive.
pub fn validate_public_key_len(bytes: &[u8]) -> Result<()> {
    if bytes.len() != CURVE25519_LEN {
        return Err(CryptoError::invalid_argument(format!("X25519 public key must be {CURVE25519_LEN} bytes, got {}", bytes.len())));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::OsRng;

    #[test]
    fn diffie_hellman_is_symmetric() {
        let mut rng = OsRng;
        let alice = X25519KeyPair::generate(&mut rng);
        let bob = X25519KeyPair::generate(&mut rng);

        let alice_shared = alice.diffie_hellman(&bob.public_key());
        let bob_shared = bob.diffie_hellman(&alice.public_key());
        assert_eq!(alice_shared, bob_shared);
    }

    #[test]
    fn ephemeral_key_can_dh_multiple_peers() {
        let mut rng = OsRng;
        let ephemeral = EphemeralX25519::generate(&mut rng);
        let peer_a = X25519KeyPair::generate(&mut rng);
        let peer_b = X25519KeyPair::generate(&mut rng);

        let shared_a = ephemeral.diffie_hellman(&peer_a.public_key());
        let shared_b = ephemeral.diffie_hellman(&peer_b.public_key());
        assert_ne!(shared_a, shared_b);
    }

    /// RFC 7748 §5.2's first X25519 Diffie-Hellman test vector.
    #[test]
    fn rfc7748_known_answer_vector() {
        let scalar: [u8; 32] = hex_literal("a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4");
        let u: [u8; 32] = hex_literal("e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c");
        let expected: [u8; 32] = hex_literal("c3da55379de9c6908e94ea4df28d084f32eccf03491c71f754b4075577a28552");

        let keypair = X25519KeyPair::from_bytes(scalar);
        let shared = keypair.diffie_hellman(&u);
        assert_eq!(shared.as_bytes(), &expected[..]);
    }

    fn hex_literal(hex: &str) -> [u8; 32] {
        hex::decode(hex).unwrap().try_into().unwrap()
    }
}

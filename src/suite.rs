//! Tagged-enum dispatch over the algorithm families this crate implements
//! (`spec.md` §1's supplemental "pick an algorithm by name" surface), and
//! the `KeyPairType` used by callers that store keys polymorphically (e.g.
//! a Noise static identity alongside an unrelated Ed25519 signing key).
//!
//! Mirrors the donor's `types.rs` algorithm-selection enums, generalized
//! from the donor's fixed cipher/compression choice to the full primitive
//! suite.

use rand_core::{CryptoRng, RngCore};

use crate::aead::aes_gcm::AesGcm;
use crate::aead::chacha20_poly1305::ChaCha20Poly1305;
use crate::aead::xchacha20_poly1305::XChaCha20Poly1305;
use crate::config::{AES_GCM_NONCE_LEN, CHACHA20_NONCE_LEN, XCHACHA20_NONCE_LEN};
use crate::error::{CryptoError, Result};
use crate::secret::SecretBox;

/// An AEAD cipher family, used to select the Noise transport cipher
/// (`spec.md` §6) or a standalone AEAD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CipherKind {
    AesGcm,
    ChaCha20Poly1305,
    XChaCha20Poly1305,
    AesCbcHmac,
    AesCtr,
}

impl CipherKind {
    #[must_use]
    pub const fn key_len(self) -> usize {
        match self {
            Self::AesGcm | Self::ChaCha20Poly1305 | Self::XChaCha20Poly1305 | Self::AesCbcHmac | Self::AesCtr => 32,
        }
    }
}

/// A hash function, used to select the Noise handshake hash (`spec.md` §6)
/// or a standalone digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashKind {
    Blake2b,
    Blake2s,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl HashKind {
    /// Digest length in bytes for the default (maximum) output size of
    /// each hash.
    #[must_use]
    pub const fn digest_len(self) -> usize {
        match self {
            Self::Blake2b => 64,
            Self::Blake2s => 32,
            Self::Sha1 => 20,
            Self::Sha224 => 28,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

/// A MAC construction, independent of any particular AEAD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MacKind {
    Hmac,
    Poly1305,
    Blake2Keyed,
}

/// A keypair of a particular asymmetric algorithm, for callers that need
/// to store or pass keys without committing to one concrete type.
///
/// Only X25519 and Ed25519 are represented: `spec.md`'s Open Questions list
/// ECDH-P256/384/521, ECDSA, and RSA-PSS as possible additions, but this
/// crate ships only the Curve25519 family (see DESIGN.md) and never
/// constructs [`CryptoError::Unimplemented`] for the others — they are
/// simply absent from this enum.
pub enum KeyPairType {
    X25519(crate::curve25519::x25519::X25519KeyPair),
    Ed25519(crate::curve25519::ed25519::Ed25519KeyPair),
}

impl KeyPairType {
    #[must_use]
    pub fn public_key_bytes(&self) -> Vec<u8> {
        match self {
            Self::X25519(kp) => kp.public_key().to_vec(),
            Self::Ed25519(kp) => kp.public_key().to_vec(),
        }
    }
}

/// A convenience AEAD bundle selected by [`CipherKind`], mirroring the
/// donor's `cipher::Cipher` struct: one value that owns whichever key the
/// caller asked for and can both seal and open without the caller juggling
/// per-algorithm types. Only the three single-key AEADs are represented —
/// `AesCbcHmac` needs two independent keys (see
/// [`crate::aead::aes_cbc_hmac::AesCbcHmac`]) and `AesCtr` provides no
/// authentication, so neither fits this bundle's single-key `seal`/`open`
/// contract.
pub enum CipherSuite {
    AesGcm(AesGcm),
    ChaCha20Poly1305(ChaCha20Poly1305),
    XChaCha20Poly1305(XChaCha20Poly1305),
}

impl CipherSuite {
    /// Builds a suite from a 32-byte key. `kind` must be one of the three
    /// variants this type represents.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidArgument`] for `AesCbcHmac`/`AesCtr` —
    /// not unimplemented, just the wrong shape for this single-key bundle
    /// (see the type's own doc comment) — and propagates key-length errors
    /// from the underlying AEAD constructor.
    pub fn new(kind: CipherKind, key: &[u8]) -> Result<Self> {
        match kind {
            CipherKind::AesGcm => Ok(Self::AesGcm(AesGcm::new(key)?)),
            CipherKind::ChaCha20Poly1305 => {
                let key: [u8; 32] = key.try_into().map_err(|_| CryptoError::invalid_argument("ChaCha20-Poly1305 key must be 32 bytes"))?;
                Ok(Self::ChaCha20Poly1305(ChaCha20Poly1305::new(key)))
            }
            CipherKind::XChaCha20Poly1305 => {
                let key: [u8; 32] = key.try_into().map_err(|_| CryptoError::invalid_argument("XChaCha20-Poly1305 key must be 32 bytes"))?;
                Ok(Self::XChaCha20Poly1305(XChaCha20Poly1305::new(key)))
            }
            CipherKind::AesCbcHmac | CipherKind::AesCtr => Err(CryptoError::invalid_argument("CipherSuite only bundles single-key AEADs; AesCbcHmac/AesCtr don't fit its seal/open contract")),
        }
    }

    fn nonce_len(&self) -> usize {
        match self {
            Self::AesGcm(_) => AES_GCM_NONCE_LEN,
            Self::ChaCha20Poly1305(_) => CHACHA20_NONCE_LEN,
            Self::XChaCha20Poly1305(_) => XCHACHA20_NONCE_LEN,
        }
    }

    /// Encrypts `plaintext` under a freshly drawn random nonce and returns
    /// the `(cipher_text, nonce, mac)` triple (`spec.md` §3, `SecretBox`).
    pub fn seal<R: RngCore + CryptoRng>(&self, rng: &mut R, aad: &[u8], plaintext: &[u8]) -> Result<SecretBox> {
        let mut nonce = vec![0u8; self.nonce_len()];
        rng.fill_bytes(&mut nonce);
        let mut buf = plaintext.to_vec();
        let mac = match self {
            Self::AesGcm(c) => c.seal(&nonce, aad, &mut buf)?,
            Self::ChaCha20Poly1305(c) => {
                let nonce: &[u8; CHACHA20_NONCE_LEN] = nonce[..].try_into().expect("nonce_len matches CHACHA20_NONCE_LEN");
                c.seal(nonce, aad, &mut buf)?
            }
            Self::XChaCha20Poly1305(c) => {
                let nonce: &[u8; XCHACHA20_NONCE_LEN] = nonce[..].try_into().expect("nonce_len matches XCHACHA20_NONCE_LEN");
                c.seal(nonce, aad, &mut buf)?
            }
        };
        Ok(SecretBox::new(buf, nonce, mac))
    }

    /// Verifies and decrypts a [`SecretBox`] produced by [`Self::seal`].
    ///
    /// # Errors
    /// Returns [`CryptoError::AuthenticationFailure`] if the tag does not
    /// verify, or [`CryptoError::InvalidArgument`] if the box's nonce does
    /// not match this suite's expected nonce length.
    pub fn open(&self, aad: &[u8], secret_box: &SecretBox) -> Result<Vec<u8>> {
        if secret_box.nonce().len() != self.nonce_len() {
            return Err(CryptoError::invalid_argument(format!("expected a {}-byte nonce, got {}", self.nonce_len(), secret_box.nonce().len())));
        }
        let mut buf = secret_box.cipher_text().to_vec();
        match self {
            Self::AesGcm(c) => c.open(secret_box.nonce(), aad, &mut buf, secret_box.mac())?,
            Self::ChaCha20Poly1305(c) => {
                let nonce: &[u8; CHACHA20_NONCE_LEN] = secret_box.nonce().try_into().expect("checked above");
                c.open(nonce, aad, &mut buf, secret_box.mac())?
            }
            Self::XChaCha20Poly1305(c) => {
                let nonce: &[u8; XCHACHA20_NONCE_LEN] = secret_box.nonce().try_into().expect("checked above");
                c.open(nonce, aad, &mut buf, secret_box.mac())?
            }
        }
        Ok(buf)
    }
}

/// Resolves a case-insensitive algorithm name to a [`CipherKind`], for
/// configuration surfaces that accept cipher suite names as strings (e.g.
/// parsing a Noise protocol name per `spec.md` §6).
pub fn parse_cipher_kind(name: &str) -> Result<CipherKind> {
    match name {
        "AESGCM" => Ok(CipherKind::AesGcm),
        "ChaChaPoly" => Ok(CipherKind::ChaCha20Poly1305),
        "XChaChaPoly" => Ok(CipherKind::XChaCha20Poly1305),
        other => Err(CryptoError::invalid_argument(format!("unknown cipher kind: {other}"))),
    }
}

/// Resolves a case-insensitive algorithm name to a [`HashKind`], matching
/// the Noise protocol name tokens `BLAKE2s` and `SHA256`.
pub fn parse_hash_kind(name: &str) -> Result<HashKind> {
    match name {
        "BLAKE2s" => Ok(HashKind::Blake2s),
        "SHA256" => Ok(HashKind::Sha256),
        other => Err(CryptoError::invalid_argument(format!("unknown hash kind: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_noise_protocol_name_tokens() {
        assert_eq!(parse_cipher_kind("ChaChaPoly").unwrap(), CipherKind::ChaCha20Poly1305);
        assert_eq!(parse_hash_kind("BLAKE2s").unwrap(), HashKind::Blake2s);
        assert!(parse_cipher_kind("RC4").is_err());
    }

    #[test]
    fn cipher_suite_round_trips_for_each_kind() {
        use rand_core::OsRng;
        let mut rng = OsRng;
        let key = [0x7au8; 32];

        for kind in [CipherKind::AesGcm, CipherKind::ChaCha20Poly1305, CipherKind::XChaCha20Poly1305] {
            let suite = CipherSuite::new(kind, &key).unwrap();
            let sealed = suite.seal(&mut rng, b"associated data", b"top secret").unwrap();
            let opened = suite.open(b"associated data", &sealed).unwrap();
            assert_eq!(opened, b"top secret".to_vec());
        }
    }

    #[test]
    fn cipher_suite_rejects_tampered_mac() {
        use rand_core::OsRng;
        let mut rng = OsRng;
        let suite = CipherSuite::new(CipherKind::ChaCha20Poly1305, &[0x11u8; 32]).unwrap();
        let mut sealed = suite.seal(&mut rng, b"", b"message").unwrap();
        let (cipher_text, nonce, mut mac) = sealed.clone().into_parts();
        mac[0] ^= 0xff;
        sealed = SecretBox::new(cipher_text, nonce, mac);
        assert!(suite.open(b"", &sealed).is_err());
    }

    #[test]
    fn cipher_suite_rejects_cbc_hmac_and_ctr() {
        assert!(CipherSuite::new(CipherKind::AesCbcHmac, &[0u8; 32]).is_err());
        assert!(CipherSuite::new(CipherKind::AesCtr, &[0u8; 32]).is_err());
    }
}

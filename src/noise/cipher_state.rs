//! The Noise Protocol Framework's own `CipherState` object (`spec.md` §5.1),
//! grounded in `nexus-noise-xk`'s `CipherState` but generalized from its
//! single hardcoded ChaCha20-Poly1305 cipher to either transport cipher
//! `spec.md` §6 allows, and carrying the `rekey()` operation the donor's
//! fixed-pattern implementation never needed.
//!
//! This is a distinct contract from [`crate::aead::cipher_state::CipherState`]:
//! that one is a general bulk-streaming helper with no keyless mode; this
//! one implements the Noise spec's "keyless cipher state encrypts as
//! identity" rule and uses a strictly monotonic per-message nonce rather
//! than one nonce per arbitrary-sized chunk.

use crate::aead::aes_gcm::AesGcm;
use crate::aead::chacha20_poly1305::ChaCha20Poly1305;
use crate::config::NOISE_MAX_NONCE;
use crate::error::{CryptoError, Result};

/// Which AEAD a Noise `CipherState` drives, per `spec.md` §6's two
/// supported transport ciphers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseCipherAlgorithm {
    AesGcm,
    ChaCha20Poly1305,
}

/// Builds the 12-byte nonce for message `n`: 4 zero bytes followed by `n`
/// as a little-endian 64-bit integer, per the Noise spec — unconditionally,
/// the same layout for every cipher `spec.md` §6 allows, including AESGCM
/// (which does *not* get SP 800-38D's own big-endian counter convention
/// here; the Noise spec fixes the nonce format itself, independent of the
/// AEAD's native one).
fn make_nonce(_algorithm: NoiseCipherAlgorithm, n: u64) -> [u8; 12] {
    let mut nonce = [0u8; 12];
    nonce[4..].copy_from_slice(&n.to_le_bytes());
    nonce
}

enum Aead {
    AesGcm(AesGcm),
    ChaCha20Poly1305(ChaCha20Poly1305),
}

/// A Noise `CipherState`: an AEAD cipher, a possibly-absent key (`spec.md`
/// §5.1's "a `CipherState` can be keyless, in which case it behaves as the
/// identity function"), and a strictly increasing nonce counter bounded by
/// `n < 2^64 - 1`.
pub struct CipherState {
    algorithm: NoiseCipherAlgorithm,
    aead: Option<Aead>,
    nonce: u64,
}

impl CipherState {
    #[must_use]
    pub fn new(algorithm: NoiseCipherAlgorithm) -> Self {
        Self { algorithm, aead: None, nonce: 0 }
    }

    /// Sets (or replaces) the 256-bit key and resets the nonce counter to
    /// zero, per the Noise spec's `InitializeKey`.
    pub fn initialize_key(&mut self, key: [u8; 32]) -> Result<()> {
        self.aead = Some(match self.algorithm {
            NoiseCipherAlgorithm::AesGcm => Aead::AesGcm(AesGcm::new(&key)?),
            NoiseCipherAlgorithm::ChaCha20Poly1305 => Aead::ChaCha20Poly1305(ChaCha20Poly1305::new(key)),
        });
        self.nonce = 0;
        Ok(())
    }

    #[must_use]
    pub fn has_key(&self) -> bool {
        self.aead.is_some()
    }

    /// Replaces the key with `ENCRYPT(k, maxnonce, zerolen, zeros)` — the
    /// Noise spec's `Rekey` operation, used by protocols layering their own
    /// periodic rekeying on top of the handshake-derived transport keys.
    pub fn rekey(&mut self) -> Result<()> {
        tracing::debug!(algorithm = ?self.algorithm, "noise cipher state rekey");
        let mut zero_block = [0u8; 32];
        let max_nonce = make_nonce(self.algorithm, NOISE_MAX_NONCE);
        let tag = match self.aead.as_ref().ok_or_else(|| CryptoError::state("rekey on a keyless CipherState"))? {
            Aead::AesGcm(a) => a.seal(&max_nonce, &[], &mut zero_block)?,
            Aead::ChaCha20Poly1305(c) => c.seal(&max_nonce, &[], &mut zero_block)?,
        };
        let _ = tag;
        self.initialize_key(zero_block)
    }

    /// Encrypts `plaintext` in place and appends the 16-byte tag, advancing
    /// the nonce. If keyless, leaves `plaintext` untouched and mixes no
    /// nonce (Noise spec: identity function, nonce does not advance).
    pub fn encrypt_with_ad(&mut self, ad: &[u8], plaintext: &mut Vec<u8>) -> Result<()> {
        let Some(aead) = self.aead.as_ref() else {
            return Ok(());
        };
        if self.nonce >= NOISE_MAX_NONCE {
            return Err(CryptoError::state("Noise CipherState nonce exhausted"));
        }
        let nonce = make_nonce(self.algorithm, self.nonce);
        let tag = match aead {
            Aead::AesGcm(a) => a.seal(&nonce, ad, plaintext)?,
            Aead::ChaCha20Poly1305(c) => c.seal(&nonce, ad, plaintext)?,
        };
        plaintext.extend_from_slice(&tag);
        self.nonce += 1;
        Ok(())
    }

    /// Verifies and decrypts `ciphertext` (which includes the trailing
    /// tag) in place, advancing the nonce. If keyless, returns `ciphertext`
    /// unchanged.
    pub fn decrypt_with_ad(&mut self, ad: &[u8], ciphertext: &mut Vec<u8>) -> Result<()> {
        let Some(aead) = self.aead.as_ref() else {
            return Ok(());
        };
        if self.nonce >= NOISE_MAX_NONCE {
            return Err(CryptoError::state("Noise CipherState nonce exhausted"));
        }
        if ciphertext.len() < 16 {
            return Err(CryptoError::invalid_argument("Noise ciphertext shorter than one tag"));
        }
        let split_at = ciphertext.len() - 16;
        let mut tag = [0u8; 16];
        tag.copy_from_slice(&ciphertext[split_at..]);
        ciphertext.truncate(split_at);

        let nonce = make_nonce(self.algorithm, self.nonce);
        match aead {
            Aead::AesGcm(a) => a.open(&nonce, ad, ciphertext, &tag)?,
            Aead::ChaCha20Poly1305(c) => c.open(&nonce, ad, ciphertext, &tag)?,
        }
        self.nonce += 1;
        Ok(())
    }
}

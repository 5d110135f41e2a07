//! AES-GCM (`spec.md` §4.4, NIST SP 800-38D), composed by hand from
//! [`crate::primitives::aes::AesBlockCipher`] (the CTR-mode keystream) and
//! [`crate::primitives::ghash::GHash128`] (the authentication universal
//! hash), rather than wrapped from the `aes-gcm` crate.
//!
//! The `aes-gcm` crate's `NonceSize` is a compile-time typenum const
//! generic, fixed per concrete cipher type; `spec.md` §4.4 requires nonces
//! of any length >= 4 bytes, decided at runtime, with the arbitrary-length
//! case hashed down to one block via GHASH (SP 800-38D §7.1, step 2). That
//! is only expressible by driving AES and GHASH directly.

use crate::config::{AES_BLOCK_LEN, AES_GCM_NONCE_LEN, TAG_LEN};
use crate::error::{CryptoError, Result};
use crate::primitives::aes::AesBlockCipher;
use crate::primitives::ghash::{length_block, GHash128};

/// An AES-GCM encryption/decryption context bound to one key.
///
/// Not reused across calls to derive `H` once per key: each
/// `seal`/`open` call re-derives `H = E(K, 0^128)` since the `aes` crate's
/// block cipher type has no cheap re-export of its round keys, and a single
/// extra block encryption per call is negligible next to the data-dependent
/// GHASH and CTR-mode passes.
pub struct AesGcm {
    cipher: AesBlockCipher,
}

impl AesGcm {
    /// Builds an AES-GCM context from a 128/192/256-bit key.
    pub fn new(key: &[u8]) -> Result<Self> {
        Ok(Self { cipher: AesBlockCipher::new(key)? })
    }

    fn ghash_key(&self) -> [u8; 16] {
        ghash_key_for(&self.cipher)
    }

    /// Runs AES-CTR keyed by `j0` incremented per SP 800-38D's `inc32`
    /// (32-bit wraparound on the low word only), starting from counter
    /// value 1 relative to `j0` — `j0` itself is reserved for the tag mask.
    fn ctr_xor(&self, j0: &[u8; 16], data: &mut [u8]) {
        let mut counter_block = *j0;
        for chunk in data.chunks_mut(AES_BLOCK_LEN) {
            inc32(&mut counter_block);
            let mut keystream = counter_block;
            self.cipher.encrypt_block(&mut keystream);
            for (b, k) in chunk.iter_mut().zip(keystream.iter()) {
                *b ^= k;
            }
        }
    }

    /// Encrypts `plaintext` in place and returns the authentication tag.
    /// `nonce` may be any non-empty length; `aad` is authenticated but not
    /// encrypted.
    pub fn seal(&self, nonce: &[u8], aad: &[u8], plaintext: &mut [u8]) -> Result<[u8; TAG_LEN]> {
        if nonce.is_empty() {
            return Err(CryptoError::invalid_argument("AES-GCM nonce must be non-empty"));
        }
        let h = self.ghash_key();
        let j0 = derive_j0(&h, nonce);
        self.ctr_xor(&j0, plaintext);

        let mut ghash = GHash128::new(&h);
        ghash.feed_padded(aad);
        ghash.feed_padded(plaintext);
        ghash.feed_block(&length_block(aad.len(), plaintext.len()));
        let s = ghash.finalize();

        let mut tag_mask = j0;
        self.cipher.encrypt_block(&mut tag_mask);
        let mut tag = [0u8; TAG_LEN];
        for i in 0..TAG_LEN {
            tag[i] = s[i] ^ tag_mask[i];
        }
        Ok(tag)
    }

    /// Verifies `tag` against `aad` and `ciphertext`, then decrypts
    /// `ciphertext` in place. Leaves `ciphertext` untouched and returns
    /// [`CryptoError::AuthenticationFailure`] on a tag mismatch, so callers
    /// never observe partially-decrypted data from a tampered message.
    pub fn open(&self, nonce: &[u8], aad: &[u8], ciphertext: &mut [u8], tag: &[u8; TAG_LEN]) -> Result<()> {
        if nonce.is_empty() {
            return Err(CryptoError::invalid_argument("AES-GCM nonce must be non-empty"));
        }
        let h = self.ghash_key();
        let j0 = derive_j0(&h, nonce);

        let mut ghash = GHash128::new(&h);
        ghash.feed_padded(aad);
        ghash.feed_padded(ciphertext);
        ghash.feed_block(&length_block(aad.len(), ciphertext.len()));
        let s = ghash.finalize();

        let mut tag_mask = j0;
        self.cipher.encrypt_block(&mut tag_mask);
        let mut expected = [0u8; TAG_LEN];
        for i in 0..TAG_LEN {
            expected[i] = s[i] ^ tag_mask[i];
        }

        use subtle::ConstantTimeEq;
        if !bool::from(expected.ct_eq(tag)) {
            return Err(CryptoError::AuthenticationFailure);
        }

        self.ctr_xor(&j0, ciphertext);
        Ok(())
    }
}

/// SP 800-38D's `inc32`: increments only the low 32 bits of the block,
/// wrapping on overflow rather than carrying into the nonce portion.
pub(crate) fn inc32(block: &mut [u8; 16]) {
    let mut counter = u32::from_be_bytes([block[12], block[13], block[14], block[15]]);
    counter = counter.wrapping_add(1);
    block[12..].copy_from_slice(&counter.to_be_bytes());
}

/// `H = AES_encrypt(key, 0^128)`, the GHASH universal-hash key. Exposed as a
/// free function (rather than only the private `AesGcm::ghash_key` method)
/// so [`crate::aead::cipher_state`] can derive the same tag-mask/GHASH
/// machinery while driving its own chunk-at-a-time keystream.
pub(crate) fn ghash_key_for(cipher: &AesBlockCipher) -> [u8; 16] {
    let mut h = [0u8; 16];
    cipher.encrypt_block(&mut h);
    h
}

/// Derives `J0`, the pre-counter block (SP 800-38D §7.1).
///
/// For a 12-byte nonce, `J0 = nonce ∥ 0^31 ∥ 1`. For any other length
/// (including the empty nonce, which the spec permits), `J0 = GHASH(H,
/// nonce ∥ zero-pad ∥ len(nonce)_bits as a 64-bit big-endian block)`.
pub(crate) fn derive_j0(h: &[u8; 16], nonce: &[u8]) -> [u8; 16] {
    if nonce.len() == AES_GCM_NONCE_LEN {
        let mut j0 = [0u8; 16];
        j0[..12].copy_from_slice(nonce);
        j0[15] = 1;
        return j0;
    }
    let mut ghash = GHash128::new(h);
    ghash.feed_padded(nonce);
    let mut len_block = [0u8; 16];
    len_block[8..].copy_from_slice(&((nonce.len() as u64) * 8).to_be_bytes());
    ghash.feed_block(&len_block);
    ghash.finalize()
}

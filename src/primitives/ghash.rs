//! GHASH, the GF(2^128) universal hash underlying AES-GCM (`spec.md` §4.4).
//!
//! Thin wrapper over the `ghash` crate's field multiplication (reducing
//! polynomial `x^128 + x^7 + x^2 + x + 1`) that exposes the block-at-a-time
//! feed `aead/aes_gcm.rs` needs to build `J0` and the authentication tag by
//! hand, rather than delegating the whole AEAD to a fixed-nonce-length
//! crate type.

use ghash::universal_hash::{KeyInit, UniversalHash};
use ghash::GHash;

/// An in-progress GHASH computation keyed by `H = AES_encrypt(key, 0^128)`.
pub struct GHash128 {
    inner: GHash,
}

impl GHash128 {
    #[must_use]
    pub fn new(h: &[u8; 16]) -> Self {
        Self { inner: GHash::new(h.into()) }
    }

    /// Feeds a component (AAD or ciphertext), zero-padding it up to the
    /// next 16-byte boundary per GCM's per-component padding rule.
    pub fn feed_padded(&mut self, data: &[u8]) {
        if !data.is_empty() {
            self.inner.update_padded(data);
        }
    }

    /// Feeds an already block-aligned 16-byte value, used for the trailing
    /// `len(AAD)_bits ∥ len(CT)_bits` block.
    pub fn feed_block(&mut self, block: &[u8; 16]) {
        self.inner.update_padded(block);
    }

    #[must_use]
    pub fn finalize(self) -> [u8; 16] {
        let tag = self.inner.finalize();
        let mut out = [0u8; 16];
        out.copy_from_slice(tag.as_slice());
        out
    }
}

/// Builds the trailing GHASH length block: big-endian bit lengths of the
/// AAD and ciphertext, each as a 64-bit field.
#[must_use]
pub fn length_block(aad_len_bytes: usize, ct_len_bytes: usize) -> [u8; 16] {
    let mut block = [0u8; 16];
    block[..8].copy_from_slice(&((aad_len_bytes as u64) * 8).to_be_bytes());
    block[8..].copy_from_slice(&((ct_len_bytes as u64) * 8).to_be_bytes());
    block
}

//! XChaCha20-Poly1305 AEAD (`spec.md` §4.5, RFC 8439 §2.2's extended-nonce
//! construction), built on top of the ordinary
//! [`crate::aead::chacha20_poly1305::ChaCha20Poly1305`] rather than
//! duplicating its MAC/encryption logic: HChaCha20 derives a per-message
//! subkey from the first 16 nonce bytes, after which the remaining 8 bytes
//! plug into the standard 12-byte ChaCha20-Poly1305 construction.

use crate::aead::chacha20_poly1305::ChaCha20Poly1305;
use crate::config::{CHACHA20_KEY_LEN, TAG_LEN, XCHACHA20_NONCE_LEN};
use crate::error::Result;
use crate::primitives::chacha::hchacha20;

/// An XChaCha20-Poly1305 context bound to one 256-bit key.
pub struct XChaCha20Poly1305 {
    key: [u8; CHACHA20_KEY_LEN],
}

impl XChaCha20Poly1305 {
    #[must_use]
    pub fn new(key: [u8; CHACHA20_KEY_LEN]) -> Self {
        Self { key }
    }

    /// Derives the per-message subkey and the inner 12-byte nonce: the
    /// subkey is `HChaCha20(key, nonce[0..16])`; the inner nonce is four
    /// zero bytes followed by `nonce[16..24]`.
    fn derive(&self, nonce: &[u8; XCHACHA20_NONCE_LEN]) -> ([u8; CHACHA20_KEY_LEN], [u8; 12]) {
        let mut hchacha_nonce = [0u8; 16];
        hchacha_nonce.copy_from_slice(&nonce[..16]);
        let subkey = hchacha20(&self.key, &hchacha_nonce);

        let mut inner_nonce = [0u8; 12];
        inner_nonce[4..].copy_from_slice(&nonce[16..]);
        (subkey, inner_nonce)
    }

    pub fn seal(&self, nonce: &[u8; XCHACHA20_NONCE_LEN], aad: &[u8], plaintext: &mut [u8]) -> Result<[u8; TAG_LEN]> {
        let (subkey, inner_nonce) = self.derive(nonce);
        ChaCha20Poly1305::new(subkey).seal(&inner_nonce, aad, plaintext)
    }

    pub fn open(&self, nonce: &[u8; XCHACHA20_NONCE_LEN], aad: &[u8], ciphertext: &mut [u8], tag: &[u8; TAG_LEN]) -> Result<()> {
        let (subkey, inner_nonce) = self.derive(nonce);
        ChaCha20Poly1305::new(subkey).open(&inner_nonce, aad, ciphertext, tag)
    }
}

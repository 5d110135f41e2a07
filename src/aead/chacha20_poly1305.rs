//! ChaCha20-Poly1305 AEAD (`spec.md` §4.5, RFC 7539 §2.8), composed from the
//! [`crate::primitives::chacha`] keystream and the
//! [`crate::primitives::poly1305`] one-time MAC.

use crate::config::{CHACHA20_KEY_LEN, CHACHA20_NONCE_LEN, TAG_LEN};
use crate::error::{CryptoError, Result};
use crate::primitives::chacha::chacha20_xor;
use crate::primitives::poly1305::poly1305_tag;

/// A ChaCha20-Poly1305 context bound to one 256-bit key.
pub struct ChaCha20Poly1305 {
    key: [u8; CHACHA20_KEY_LEN],
}

impl ChaCha20Poly1305 {
    #[must_use]
    pub fn new(key: [u8; CHACHA20_KEY_LEN]) -> Self {
        Self { key }
    }

    /// Derives the one-time Poly1305 key: the first 32 bytes of the ChaCha20
    /// keystream at block counter 0 (RFC 7539 §2.6), leaving block counter 1
    /// onward for the message itself.
    fn one_time_key(&self, nonce: &[u8; CHACHA20_NONCE_LEN]) -> Result<[u8; 32]> {
        one_time_poly1305_key(&self.key, nonce)
    }

    /// Encrypts `plaintext` in place (keystream starting at block counter 1)
    /// and returns the Poly1305 tag over `aad` and the resulting ciphertext.
    pub fn seal(&self, nonce: &[u8; CHACHA20_NONCE_LEN], aad: &[u8], plaintext: &mut [u8]) -> Result<[u8; TAG_LEN]> {
        let one_time_key = self.one_time_key(nonce)?;
        chacha20_xor(&self.key, nonce, 64, plaintext)?;
        poly1305_tag(&one_time_key, &mac_input(aad, plaintext))
    }

    /// Verifies `tag`, then decrypts `ciphertext` in place. Leaves
    /// `ciphertext` untouched on mismatch.
    pub fn open(&self, nonce: &[u8; CHACHA20_NONCE_LEN], aad: &[u8], ciphertext: &mut [u8], tag: &[u8; TAG_LEN]) -> Result<()> {
        let one_time_key = self.one_time_key(nonce)?;
        let expected = poly1305_tag(&one_time_key, &mac_input(aad, ciphertext))?;

        use subtle::ConstantTimeEq;
        if !bool::from(expected.ct_eq(tag)) {
            return Err(CryptoError::AuthenticationFailure);
        }

        chacha20_xor(&self.key, nonce, 64, ciphertext)?;
        Ok(())
    }
}

/// Derives the one-time Poly1305 key for `key`/`nonce` (RFC 7539 §2.6):
/// the first 32 bytes of the ChaCha20 keystream at block counter 0. A free
/// function so [`crate::aead::cipher_state`] can derive it once at
/// initialization without constructing a full [`ChaCha20Poly1305`].
pub(crate) fn one_time_poly1305_key(key: &[u8; CHACHA20_KEY_LEN], nonce: &[u8; CHACHA20_NONCE_LEN]) -> Result<[u8; 32]> {
    let mut block = [0u8; 32];
    chacha20_xor(key, nonce, 0, &mut block)?;
    Ok(block)
}

/// Builds the RFC 7539 §2.8 Poly1305 MAC input: `aad ∥ pad ∥ ciphertext ∥
/// pad ∥ len(aad)_le64 ∥ len(ciphertext)_le64`. A free function so
/// [`crate::aead::cipher_state`] can finalize the same framing over its
/// accumulated ciphertext.
pub(crate) fn mac_input(aad: &[u8], ciphertext: &[u8]) -> Vec<u8> {
    let mut input = Vec::with_capacity(pad16(aad.len()) + pad16(ciphertext.len()) + 16);
    input.extend_from_slice(aad);
    input.resize(input.len() + pad_len(aad.len()), 0);
    input.extend_from_slice(ciphertext);
    input.resize(input.len() + pad_len(ciphertext.len()), 0);
    input.extend_from_slice(&(aad.len() as u64).to_le_bytes());
    input.extend_from_slice(&(ciphertext.len() as u64).to_le_bytes());
    input
}

fn pad_len(len: usize) -> usize {
    (16 - (len % 16)) % 16
}

fn pad16(len: usize) -> usize {
    len + pad_len(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RFC 7539 §2.8.2 test vector.
    #[test]
    fn rfc7539_chacha20_poly1305_vector() {
        let key: [u8; 32] = [
            0x80, 0x81, 0x82, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8a, 0x8b, 0x8c, 0x8d, 0x8e, 0x8f, 0x90, 0x91, 0x92, 0x93, 0x94, 0x95,
            0x96, 0x97, 0x98, 0x99, 0x9a, 0x9b, 0x9c, 0x9d, 0x9e, 0x9f,
        ];
        let nonce: [u8; 12] = [0x07, 0x00, 0x00, 0x00, 0x40, 0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0x47];
        let aad: [u8; 12] = [0x50, 0x51, 0x52, 0x53, 0xc0, 0xc1, 0xc2, 0xc3, 0xc4, 0xc5, 0xc6, 0xc7];
        let plaintext = b"Ladies and Gentlemen of the class of '99: If I could offer you only one tip for the future, sunscreen would be it.";

        let cipher = ChaCha20Poly1305::new(key);
        let mut data = plaintext.to_vec();
        let tag = cipher.seal(&nonce, &aad, &mut data).unwrap();

        let expected_tag: [u8; 16] = [0x1a, 0xe1, 0x0b, 0x59, 0x4f, 0x09, 0xe2, 0x6a, 0x7e, 0x90, 0x2e, 0xcb, 0xd0, 0x60, 0x06, 0x91];
        assert_eq!(tag, expected_tag);

        cipher.open(&nonce, &aad, &mut data, &tag).unwrap();
        assert_eq!(data, plaintext.to_vec());
    }

    #[test]
    fn tamper_detection() {
        let cipher = ChaCha20Poly1305::new([0x11u8; 32]);
        let nonce = [0x22u8; 12];
        let mut data = b"sensitive payload".to_vec();
        let mut tag = cipher.seal(&nonce, b"aad", &mut data).unwrap();
        tag[0] ^= 1;
        assert!(matches!(cipher.open(&nonce, b"aad", &mut data, &tag), Err(CryptoError::AuthenticationFailure)));
    }
}

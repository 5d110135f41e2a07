//! AES-CTR (`spec.md` §4.3): a bare counter-mode keystream with no
//! authentication of its own, used as a building block by higher layers
//! (e.g. AES-CBC-HMAC's CBC mode is a different chaining mode entirely, but
//! the streaming `CipherState` of §4.10 can be parameterized over this).
//!
//! Grounded in the same `AesBlockCipher` primitive as [`crate::aead::aes_gcm`],
//! using the `ctr` crate's counter-increment convention (full 128-bit
//! big-endian counter, wrapping) rather than GCM's 32-bit-only `inc32`.

use ctr::cipher::{KeyIvInit, StreamCipher, StreamCipherSeek};
use ctr::Ctr128BE;

use crate::error::{CryptoError, Result};

enum Inner {
    Aes128(Box<Ctr128BE<aes::Aes128>>),
    Aes192(Box<Ctr128BE<aes::Aes192>>),
    Aes256(Box<Ctr128BE<aes::Aes256>>),
}

/// An AES-CTR keystream generator configured with a full 128-bit
/// big-endian counter block (the initial value doubling as the nonce).
pub struct AesCtr {
    inner: Inner,
}

impl AesCtr {
    /// Builds an AES-CTR context from a 128/192/256-bit key and a 16-byte
    /// initial counter block.
    pub fn new(key: &[u8], initial_counter_block: &[u8; 16]) -> Result<Self> {
        let iv = ctr::cipher::generic_array::GenericArray::from_slice(initial_counter_block);
        let inner = match key.len() {
            16 => Inner::Aes128(Box::new(Ctr128BE::<aes::Aes128>::new(ctr::cipher::generic_array::GenericArray::from_slice(key), iv))),
            24 => Inner::Aes192(Box::new(Ctr128BE::<aes::Aes192>::new(ctr::cipher::generic_array::GenericArray::from_slice(key), iv))),
            32 => Inner::Aes256(Box::new(Ctr128BE::<aes::Aes256>::new(ctr::cipher::generic_array::GenericArray::from_slice(key), iv))),
            other => return Err(CryptoError::invalid_argument(format!("AES key must be 16, 24, or 32 bytes, got {other}"))),
        };
        Ok(Self { inner })
    }

    /// Seeks to `key_stream_index`, the byte offset in the keystream
    /// (`spec.md` §4.3's resume parameter), before the next
    /// [`Self::apply_keystream`] call.
    pub fn seek(&mut self, key_stream_index: u64) -> Result<()> {
        let result = match &mut self.inner {
            Inner::Aes128(c) => c.try_seek(key_stream_index),
            Inner::Aes192(c) => c.try_seek(key_stream_index),
            Inner::Aes256(c) => c.try_seek(key_stream_index),
        };
        result.map_err(|_| CryptoError::invalid_argument("AES-CTR seek overflow"))
    }

    /// XORs `data` in place with the keystream.
    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        match &mut self.inner {
            Inner::Aes128(c) => c.apply_keystream(data),
            Inner::Aes192(c) => c.apply_keystream(data),
            Inner::Aes256(c) => c.apply_keystream(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// NIST SP 800-38A AES-128 CTR test vector (first block only).
    #[test]
    fn sp800_38a_aes128_ctr_first_block() {
        let key: [u8; 16] = [0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c];
        let icb: [u8; 16] = [0xf0, 0xf1, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8, 0xf9, 0xfa, 0xfb, 0xfc, 0xfd, 0xfe, 0xff];
        let plaintext: [u8; 16] = [0x6b, 0xc1, 0xbe, 0xe2, 0x2e, 0x40, 0x9f, 0x96, 0xe9, 0x3d, 0x7e, 0x11, 0x73, 0x93, 0x17, 0x2a];
        let mut ctr = AesCtr::new(&key, &icb).unwrap();
        let mut buf = plaintext;
        ctr.apply_keystream(&mut buf);
        let expected: [u8; 16] = [0x87, 0x4d, 0x61, 0x91, 0xb6, 0x20, 0xe3, 0x26, 0x1b, 0xef, 0x68, 0x64, 0x99, 0x0d, 0xb6, 0xce];
        assert_eq!(buf, expected);
    }

    #[test]
    fn seek_then_apply_resumes_mid_stream() {
        let key = [0x42u8; 32];
        let icb = [0u8; 16];
        let mut full = AesCtr::new(&key, &icb).unwrap();
        let mut full_buf = vec![0u8; 48];
        full.apply_keystream(&mut full_buf);

        let mut resumed = AesCtr::new(&key, &icb).unwrap();
        resumed.seek(32).unwrap();
        let mut tail = vec![0u8; 16];
        resumed.apply_keystream(&mut tail);
        assert_eq!(tail, full_buf[32..48]);
    }

    #[test]
    fn rejects_bad_key_length() {
        assert!(AesCtr::new(&[0u8; 20], &[0u8; 16]).is_err());
    }
}

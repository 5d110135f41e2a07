//! AES block-cipher core shared by the GCM construction (`spec.md` §4.1).
//!
//! Wraps the `aes` crate's fixed-key-size `Aes128`/`Aes192`/`Aes256` types
//! behind one runtime-key-length-dispatched `AesBlockCipher`, rather than
//! hand-rolling FIPS-197's `SubBytes`/`ShiftRows`/`MixColumns`/`AddRoundKey`
//! state machine: the `aes-gcm` crate the donor depends on already sits on
//! top of this exact `aes` crate for its block function. `aead/aes_cbc_hmac.rs`
//! and `aead/aes_ctr.rs` use `aes::Aes128/192/256` directly through the `cbc`
//! and `ctr` crates' generic `BlockCipher` bound; this module exists because
//! `aead/aes_gcm.rs` drives GHASH and the counter keystream block-by-block
//! itself (`spec.md` §4.4) and needs a single type spanning all three key
//! lengths to do so.

use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};
use generic_array::GenericArray;

use crate::config::{AES_128_KEY_LEN, AES_192_KEY_LEN, AES_256_KEY_LEN, AES_BLOCK_LEN};
use crate::error::{CryptoError, Result};

enum Inner {
    Aes128(Box<Aes128>),
    Aes192(Box<Aes192>),
    Aes256(Box<Aes256>),
}

/// A key-schedule-expanded AES block cipher for one of the three standard
/// key lengths (FIPS 197: 10/12/14 rounds for 128/192/256-bit keys).
/// Constructing an `AesBlockCipher` once and reusing it amortizes key
/// expansion across many blocks.
pub struct AesBlockCipher {
    inner: Inner,
}

impl AesBlockCipher {
    /// Expands a key of length 16, 24, or 32 bytes into round keys.
    pub fn new(key: &[u8]) -> Result<Self> {
        let inner = match key.len() {
            AES_128_KEY_LEN => Inner::Aes128(Box::new(Aes128::new(GenericArray::from_slice(key)))),
            AES_192_KEY_LEN => Inner::Aes192(Box::new(Aes192::new(GenericArray::from_slice(key)))),
            AES_256_KEY_LEN => Inner::Aes256(Box::new(Aes256::new(GenericArray::from_slice(key)))),
            other => return Err(CryptoError::invalid_argument(format!("AES key must be 16, 24, or 32 bytes, got {other}"))),
        };
        Ok(Self { inner })
    }

    /// Encrypts one 16-byte block in place.
    pub fn encrypt_block(&self, block: &mut [u8; AES_BLOCK_LEN]) {
        let b = GenericArray::from_mut_slice(block);
        match &self.inner {
            Inner::Aes128(c) => c.encrypt_block(b),
            Inner::Aes192(c) => c.encrypt_block(b),
            Inner::Aes256(c) => c.encrypt_block(b),
        }
    }

    /// Decrypts one 16-byte block in place.
    pub fn decrypt_block(&self, block: &mut [u8; AES_BLOCK_LEN]) {
        let b = GenericArray::from_mut_slice(block);
        match &self.inner {
            Inner::Aes128(c) => c.decrypt_block(b),
            Inner::Aes192(c) => c.decrypt_block(b),
            Inner::Aes256(c) => c.decrypt_block(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// FIPS 197 Appendix B: AES-128 single-block test vector.
    #[test]
    fn fips197_appendix_b_aes128() {
        let key = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f];
        let mut block = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff];
        let cipher = AesBlockCipher::new(&key).unwrap();
        cipher.encrypt_block(&mut block);
        assert_eq!(block, [0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5, 0x5a]);
        cipher.decrypt_block(&mut block);
        assert_eq!(block, [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
    }

    /// FIPS 197 Appendix C.2: AES-192 single-block test vector.
    #[test]
    fn fips197_appendix_c2_aes192() {
        let key = [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15,
            0x16, 0x17,
        ];
        let mut block = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff];
        let cipher = AesBlockCipher::new(&key).unwrap();
        cipher.encrypt_block(&mut block);
        let expected = [0xdd, 0xa9, 0x7c, 0xa4, 0x86, 0x4c, 0xdf, 0xe0, 0x6e, 0xaf, 0x70, 0xa0, 0xec, 0x0d, 0x71, 0x91];
        assert_eq!(block, expected);
        cipher.decrypt_block(&mut block);
        assert_eq!(block, [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
    }

    /// FIPS 197 Appendix C.3: AES-256 single-block test vector.
    #[test]
    fn fips197_appendix_c3_aes256() {
        let key = [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15,
            0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f,
        ];
        let mut block = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff];
        let cipher = AesBlockCipher::new(&key).unwrap();
        cipher.encrypt_block(&mut block);
        let expected = [0x8e, 0xa2, 0xb7, 0xca, 0x51, 0x67, 0x45, 0xbf, 0xea, 0xfc, 0x49, 0x90, 0x4b, 0x49, 0x60, 0x89];
        assert_eq!(block, expected);
        cipher.decrypt_block(&mut block);
        assert_eq!(block, [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
    }

    #[test]
    fn rejects_bad_key_length() {
        assert!(AesBlockCipher::new(&[0u8; 20]).is_err());
    }
}

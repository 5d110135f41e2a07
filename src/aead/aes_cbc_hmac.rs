//! AES-CBC-HMAC (`spec.md` §4.2): Encrypt-then-MAC composition of AES-CBC
//! with PKCS#7 padding and HMAC-SHA256, grounded in the donor crate's own
//! cipher/MAC split (`cipher/aes_gcm.rs`'s sibling construction for the
//! non-AEAD-native cipher, `cipher/mac.rs`'s MAC verification idiom) and its
//! deleted `padding.rs`, reassembled here as [`crate::aead::padding`].
//!
//! The MAC covers `aad ∥ iv ∥ ciphertext ∥ len(aad)_bits as 8 bytes
//! big-endian` — the same associated-data framing JOSE's A128CBC-HS256
//! family uses, since `spec.md` §4.2 requires AAD support that bare CBC has
//! no native way to authenticate.

use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::aead::padding::{pad, unpad};
use crate::config::{AES_BLOCK_LEN, AES_CBC_IV_LEN, HMAC_SHA256_LEN};
use crate::error::{CryptoError, Result};
use crate::mac::hmac::HmacSha256;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;
type Aes192CbcEnc = cbc::Encryptor<aes::Aes192>;
type Aes192CbcDec = cbc::Decryptor<aes::Aes192>;
type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// An AES-CBC-HMAC context. `enc_key` drives AES-CBC; `mac_key` drives
/// HMAC-SHA256. `spec.md` §4.2 treats these as independent keys rather than
/// one key split in half, leaving that derivation to the caller's KDF.
pub struct AesCbcHmac<'a> {
    enc_key: &'a [u8],
    mac_key: &'a [u8],
}

fn mac_input(aad: &[u8], iv: &[u8; AES_CBC_IV_LEN], ciphertext: &[u8]) -> Vec<u8> {
    let mut input = Vec::with_capacity(aad.len() + AES_CBC_IV_LEN + ciphertext.len() + 8);
    input.extend_from_slice(aad);
    input.extend_from_slice(iv);
    input.extend_from_slice(ciphertext);
    input.extend_from_slice(&((aad.len() as u64) * 8).to_be_bytes());
    input
}

impl<'a> AesCbcHmac<'a> {
    #[must_use]
    pub fn new(enc_key: &'a [u8], mac_key: &'a [u8]) -> Self {
        Self { enc_key, mac_key }
    }

    /// Pads `plaintext`, encrypts it under AES-CBC with the given `iv`, and
    /// returns `(ciphertext, mac)` where `mac` authenticates `aad ∥ iv ∥
    /// ciphertext`.
    pub fn seal(&self, iv: &[u8; AES_CBC_IV_LEN], aad: &[u8], plaintext: &[u8]) -> Result<(Vec<u8>, [u8; HMAC_SHA256_LEN])> {
        let padded = pad(plaintext, AES_BLOCK_LEN);
        let mut buf = padded;

        match self.enc_key.len() {
            16 => encrypt_blocks::<Aes128CbcEnc>(self.enc_key, iv, &mut buf)?,
            24 => encrypt_blocks::<Aes192CbcEnc>(self.enc_key, iv, &mut buf)?,
            32 => encrypt_blocks::<Aes256CbcEnc>(self.enc_key, iv, &mut buf)?,
            other => return Err(CryptoError::invalid_argument(format!("AES key must be 16, 24, or 32 bytes, got {other}"))),
        }

        let mut mac = HmacSha256::new(self.mac_key)?;
        mac.update(&mac_input(aad, iv, &buf));
        Ok((buf, mac.finalize()))
    }

    /// Verifies the MAC (Encrypt-then-MAC: this happens before any
    /// decryption is attempted) and, on success, decrypts and unpads
    /// `ciphertext`.
    pub fn open(&self, iv: &[u8; AES_CBC_IV_LEN], aad: &[u8], ciphertext: &[u8], tag: &[u8; HMAC_SHA256_LEN]) -> Result<Vec<u8>> {
        if ciphertext.len() % AES_BLOCK_LEN != 0 || ciphertext.is_empty() {
            return Err(CryptoError::invalid_argument("AES-CBC ciphertext must be a non-empty multiple of the block size"));
        }

        let mut mac = HmacSha256::new(self.mac_key)?;
        mac.update(&mac_input(aad, iv, ciphertext));
        let expected = mac.finalize();

        use subtle::ConstantTimeEq;
        if !bool::from(expected.ct_eq(tag)) {
            return Err(CryptoError::AuthenticationFailure);
        }

        let mut buf = ciphertext.to_vec();
        match self.enc_key.len() {
            16 => decrypt_blocks::<Aes128CbcDec>(self.enc_key, iv, &mut buf)?,
            24 => decrypt_blocks::<Aes192CbcDec>(self.enc_key, iv, &mut buf)?,
            32 => decrypt_blocks::<Aes256CbcDec>(self.enc_key, iv, &mut buf)?,
            other => return Err(CryptoError::invalid_argument(format!("AES key must be 16, 24, or 32 bytes, got {other}"))),
        }

        unpad(&buf, AES_BLOCK_LEN)
    }
}

fn encrypt_blocks<C>(key: &[u8], iv: &[u8; AES_CBC_IV_LEN], buf: &mut [u8]) -> Result<()>
where
    C: KeyIvInit + BlockEncryptMut,
{
    let mut cipher = C::new(cbc::cipher::generic_array::GenericArray::from_slice(key), cbc::cipher::generic_array::GenericArray::from_slice(iv));
    for block in buf.chunks_mut(AES_BLOCK_LEN) {
        cipher.encrypt_block_mut(cbc::cipher::generic_array::GenericArray::from_mut_slice(block));
    }
    Ok(())
}

fn decrypt_blocks<C>(key: &[u8], iv: &[u8; AES_CBC_IV_LEN], buf: &mut [u8]) -> Result<()>
where
    C: KeyIvInit + BlockDecryptMut,
{
    let mut cipher = C::new(cbc::cipher::generic_array::GenericArray::from_slice(key), cbc::cipher::generic_array::GenericArray::from_slice(iv));
    for block in buf.chunks_mut(AES_BLOCK_LEN) {
        cipher.decrypt_block_mut(cbc::cipher::generic_array::GenericArray::from_mut_slice(block));
    }
    Ok(())
}

//! Generic HMAC (`spec.md` §4.7, RFC 2104), parameterized over any hash
//! implementing `digest::Digest` so one implementation serves HMAC-SHA256
//! (AES-CBC-HMAC's MAC layer, HKDF's extract/expand), HMAC-SHA512, and
//! HMAC-SHA1 alike, rather than hand-writing the ipad/opad construction
//! once per hash like the donor's single-purpose `cipher::mac` module does.

use hmac::{Hmac as HmacImpl, Mac as HmacTrait};
use sha2::{Sha256, Sha512};

use crate::error::{CryptoError, Result};

/// A streaming HMAC-SHA256 sink.
pub struct HmacSha256(HmacImpl<Sha256>);

impl HmacSha256 {
    pub fn new(key: &[u8]) -> Result<Self> {
        Ok(Self(HmacImpl::new_from_slice(key).map_err(|e| CryptoError::invalid_argument(e.to_string()))?))
    }

    pub fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    #[must_use]
    pub fn finalize(self) -> [u8; 32] {
        self.0.finalize().into_bytes().into()
    }
}

/// One-shot HMAC-SHA256, used by AES-CBC-HMAC and by HKDF's extract/expand
/// steps.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<[u8; 32]> {
    let mut mac = HmacSha256::new(key)?;
    mac.update(data);
    Ok(mac.finalize())
}

/// A streaming HMAC-SHA512 sink.
pub struct HmacSha512(HmacImpl<Sha512>);

impl HmacSha512 {
    pub fn new(key: &[u8]) -> Result<Self> {
        Ok(Self(HmacImpl::new_from_slice(key).map_err(|e| CryptoError::invalid_argument(e.to_string()))?))
    }

    pub fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    #[must_use]
    pub fn finalize(self) -> [u8; 64] {
        self.0.finalize().into_bytes().into()
    }
}

/// One-shot HMAC-SHA512, used by PBKDF2-HMAC-SHA512 and Ed25519 key
/// expansion's companion constructions.
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<[u8; 64]> {
    let mut mac = HmacSha512::new(key)?;
    mac.update(data);
    Ok(mac.finalize())
}

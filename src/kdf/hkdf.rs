//! HKDF (`spec.md` §4.7, RFC 5869): extract-then-expand key derivation
//! over any SHA-2 hash, wrapping the `hkdf` crate's `Hkdf<D>` rather than
//! hand-rolling the HMAC-based extract/expand loop.

use hkdf::Hkdf;
use sha2::Sha256;

use crate::error::{CryptoError, Result};

/// HKDF-SHA256 extract-then-expand: derives `output_len` bytes of key
/// material from `ikm`, an optional `salt`, and the non-secret `info`
/// context string.
pub fn hkdf_sha256(salt: Option<&[u8]>, ikm: &[u8], info: &[u8], output_len: usize) -> Result<Vec<u8>> {
    let hk = Hkdf::<Sha256>::new(salt, ikm);
    let mut okm = vec![0u8; output_len];
    hk.expand(info, &mut okm).map_err(|_| CryptoError::invalid_argument("HKDF output length too large for SHA-256"))?;
    Ok(okm)
}

/// Exposes the extract step alone, for callers (e.g. the Noise
/// `SymmetricState`) that need the intermediate pseudorandom key rather
/// than the final expanded output.
#[must_use]
pub fn hkdf_sha256_extract(salt: Option<&[u8]>, ikm: &[u8]) -> [u8; 32] {
    let (prk, _) = Hkdf::<Sha256>::extract(salt, ikm);
    prk.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RFC 5869 Appendix A.1 test case 1 (HKDF-SHA256).
    #[test]
    fn rfc5869_case1() {
        let ikm = [0x0bu8; 22];
        let salt: [u8; 13] = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c];
        let info: [u8; 10] = [0xf0, 0xf1, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8, 0xf9];
        let okm = hkdf_sha256(Some(&salt), &ikm, &info, 42).unwrap();
        let expected: [u8; 42] = [
            0x3c, 0xb2, 0x5f, 0x25, 0xfa, 0xac, 0xd5, 0x7a, 0x90, 0x43, 0x4f, 0x64, 0xd0, 0x36, 0x2f, 0x2a, 0x2d, 0x2d, 0x0a, 0x90, 0xcf, 0x1a,
            0x5a, 0x4c, 0x5d, 0xb0, 0x2d, 0x56, 0xec, 0xc4, 0xc5, 0xbf, 0x34, 0x00, 0x72, 0x08, 0xd5, 0xb8, 0x87, 0x18, 0x58, 0x65,
        ];
        assert_eq!(okm, expected.to_vec());
    }
}

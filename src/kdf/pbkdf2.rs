//! PBKDF2-HMAC-SHA256 (`spec.md` §4.7, RFC 8018), wrapping the `pbkdf2`
//! crate's fixed-iteration-count derivation.
//!
//! `PBKDF2_YIELD_EVERY` in [`crate::config`] is a scheduling note for
//! callers driving this from an async or cooperatively-scheduled context —
//! the `pbkdf2` crate itself runs its iterations in a single call with no
//! yield points, so a caller on a cooperative executor wanting to yield
//! periodically must chunk the iteration count itself and call this
//! function once per chunk with the intermediate output fed back in as
//! `password`... which PBKDF2's definition does not support. In practice
//! this crate exposes only the whole-iteration-count entry point and
//! leaves chunked scheduling to a future revision if a caller needs it.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use crate::error::{CryptoError, Result};

/// Derives `output_len` bytes via PBKDF2-HMAC-SHA256 with `iterations`
/// rounds.
pub fn pbkdf2_sha256(password: &[u8], salt: &[u8], iterations: u32, output_len: usize) -> Result<Vec<u8>> {
    if iterations == 0 {
        return Err(CryptoError::invalid_argument("PBKDF2 iteration count must be non-zero"));
    }
    let mut out = vec![0u8; output_len];
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut out);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RFC 7914 Appendix test vector style check: PBKDF2-HMAC-SHA256, 1
    /// iteration, matches the widely reproduced known-answer value.
    #[test]
    fn single_iteration_known_answer() {
        let out = pbkdf2_sha256(b"password", b"salt", 1, 32).unwrap();
        let expected: [u8; 32] = [
            0x12, 0x0f, 0xb6, 0xcf, 0xfc, 0xf8, 0xb3, 0x2c, 0x43, 0xe7, 0x22, 0x52, 0x56, 0xc4, 0xf8, 0x37, 0xa8, 0x65, 0x48, 0xc9, 0x2c, 0xcc,
            0x35, 0x48, 0x08, 0x05, 0x98, 0x7c, 0xb7, 0x0b, 0xe1, 0x7b,
        ];
        assert_eq!(out, expected.to_vec());
    }

    #[test]
    fn rejects_zero_iterations() {
        assert!(pbkdf2_sha256(b"password", b"salt", 0, 32).is_err());
    }
}

//! Poly1305 one-time MAC (RFC 7539 §2.5), exposed as a standalone primitive
//! for callers that need the raw MAC rather than a full AEAD construction
//! (e.g. a `MacKind::Poly1305` dispatch arm).
//!
//! The `poly1305` crate already implements clamping, the `mod 2^130 - 5`
//! accumulator, and the padded block feed exactly as specified; this module
//! only adapts it to the crate's `Result`-based error convention and fixed
//! 32-byte one-time-key / 16-byte tag shapes.

use poly1305::universal_hash::{KeyInit, UniversalHash};
use poly1305::{Key, Poly1305};

use crate::error::{CryptoError, Result};

/// Computes the Poly1305 tag of `data` under the given one-time 32-byte
/// key. Per RFC 7539, this key must never be reused across messages.
pub fn poly1305_tag(one_time_key: &[u8; 32], data: &[u8]) -> Result<[u8; 16]> {
    let key = Key::from_slice(one_time_key);
    let mut mac = Poly1305::new(key);
    mac.update_padded(data);
    let tag = mac.finalize();
    tag.as_slice().try_into().map_err(|_| CryptoError::state("poly1305 produced a malformed tag"))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RFC 7539 §2.5.2 test vector.
    #[test]
    fn rfc7539_poly1305_vector() {
        let key: [u8; 32] = [
            0x85, 0xd6, 0xbe, 0x78, 0x57, 0x55, 0x6d, 0x33, 0x7f, 0x44, 0x52, 0xfe, 0x42, 0xd5, 0x06, 0xa8, 0x01, 0x03, 0x80, 0x8a, 0xfb, 0x0d,
            0xb2, 0xfd, 0x4a, 0xbf, 0xf6, 0xaf, 0x41, 0x49, 0xf5, 0x1b,
        ];
        let data = b"Cryptographic Forum Research Group";
        let tag = poly1305_tag(&key, data).unwrap();
        let expected: [u8; 16] = [0xa8, 0x06, 0x1d, 0xc1, 0x30, 0x51, 0x36, 0xc6, 0xc2, 0x2b, 0x8b, 0xaf, 0x0c, 0x01, 0x27, 0xa9];
        assert_eq!(tag, expected);
    }
}

//! ChaCha20 keystream, HChaCha20 subkey derivation, and the XChaCha20 nonce
//! extension (`spec.md` §4.5, RFC 7539 / RFC 8439 §2.2).
//!
//! Built on the `chacha20` crate's RFC 7539-conformant stream cipher rather
//! than a hand-rolled quarter-round matrix: the only genuinely new logic
//! here is `key_stream_index` seeking (§4.5's "a `key_stream_index`
//! parameter selects an offset in the stream").

use chacha20::cipher::{KeyIvInit, StreamCipher, StreamCipherSeek};
use chacha20::{ChaCha20, XChaCha20, hchacha};
use generic_array::GenericArray;

use crate::config::{CHACHA20_KEY_LEN, CHACHA20_NONCE_LEN, XCHACHA20_NONCE_LEN};
use crate::error::{CryptoError, Result};

/// Applies the ChaCha20 keystream to `data` in place, starting at byte
/// offset `key_stream_index` in the stream (RFC 7539 §2.4's counter is
/// `key_stream_index / 64`; the leading `key_stream_index % 64` bytes of
/// that block are discarded before the first output byte).
pub fn chacha20_xor(key: &[u8; CHACHA20_KEY_LEN], nonce: &[u8; CHACHA20_NONCE_LEN], key_stream_index: u64, data: &mut [u8]) -> Result<()> {
    let mut cipher = ChaCha20::new(GenericArray::from_slice(key), GenericArray::from_slice(nonce));
    cipher.try_seek(key_stream_index).map_err(|_| CryptoError::invalid_argument("chacha20 seek overflow"))?;
    cipher.apply_keystream(data);
    Ok(())
}

/// Applies the XChaCha20 keystream (24-byte nonce) to `data` in place.
pub fn xchacha20_xor(key: &[u8; CHACHA20_KEY_LEN], nonce: &[u8; XCHACHA20_NONCE_LEN], key_stream_index: u64, data: &mut [u8]) -> Result<()> {
    let mut cipher = XChaCha20::new(GenericArray::from_slice(key), GenericArray::from_slice(nonce));
    cipher.try_seek(key_stream_index).map_err(|_| CryptoError::invalid_argument("xchacha20 seek overflow"))?;
    cipher.apply_keystream(data);
    Ok(())
}

/// HChaCha20: runs the 20-round ChaCha20 permutation without the final
/// feed-forward addition and returns the words at positions {0..4, 12..16}
/// as a 256-bit subkey (RFC 8439 §2.2). Used by XChaCha20 to fold the first
/// 16 nonce bytes into the key before running inner ChaCha20.
#[must_use]
pub fn hchacha20(key: &[u8; CHACHA20_KEY_LEN], nonce16: &[u8; 16]) -> [u8; 32] {
    let out = hchacha::<chacha20::R20>(GenericArray::from_slice(key), GenericArray::from_slice(nonce16));
    let mut subkey = [0u8; 32];
    subkey.copy_from_slice(out.as_slice());
    subkey
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RFC 7539 §2.4.2 test vector (counter = 1).
    #[test]
    fn rfc7539_chacha20_block() {
        let key: [u8; 32] = [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15,
            0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f,
        ];
        let nonce: [u8; 12] = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x4a, 0x00, 0x00, 0x00, 0x00];
        let plaintext = b"Ladies and Gentlemen of the class of '99: If I could offer you only one tip for the future, sunscreen would be it.";
        let mut buf = plaintext.to_vec();
        // counter = 1 corresponds to key_stream_index = 64.
        chacha20_xor(&key, &nonce, 64, &mut buf).unwrap();
        let expected: [u8; 16] = [0x6e, 0x2e, 0x35, 0x9a, 0x25, 0x68, 0xf9, 0x80, 0x41, 0xba, 0x07, 0x28, 0xdd, 0x0d, 0x69, 0x81];
        assert_eq!(&buf[..16], &expected[..]);
    }

    /// RFC 8439 Appendix A.2 HChaCha20 test vector.
    #[test]
    fn rfc8439_hchacha20() {
        let key: [u8; 32] = [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15,
            0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f,
        ];
        let nonce: [u8; 16] = [0x00, 0x00, 0x00, 0x09, 0x00, 0x00, 0x00, 0x4a, 0x00, 0x00, 0x00, 0x00, 0x31, 0x41, 0x59, 0x27];
        let subkey = hchacha20(&key, &nonce);
        let expected: [u8; 32] = [
            0x82, 0x41, 0x3b, 0x42, 0x27, 0xb2, 0x7b, 0xfe, 0xd3, 0x0e, 0x42, 0x50, 0x8a, 0x87, 0x7d, 0x73, 0xa0, 0xf9, 0xcb, 0x85, 0x60, 0xd1,
            0xbb, 0xa3, 0xd2, 0xdc, 0xb0, 0x8e, 0x09, 0x3f, 0x5f, 0x8c,
        ];
        assert_eq!(subkey, expected);
    }
}

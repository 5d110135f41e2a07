//! BLAKE2b / BLAKE2s keyed and unkeyed hashing (`spec.md` §4.6), plus the
//! Argon2 variable-length hash `H'` (RFC 9106 §3.3 / the Argon2 paper §3.3).
//!
//! Delegates the compression function, parameter-block IV mixing, and
//! per-variant rotation constants to the `blake2` crate; this module only
//! adds the output-length dispatch and the iterative `H'` construction that
//! sits on top of plain BLAKE2b.

use blake2::Blake2bMac512;
use blake2::digest::{Mac, Update, VariableOutput};
use blake2::{Blake2bVar, Blake2sVar};

use crate::config::{BLAKE2B_MAX_LEN, BLAKE2S_MAX_LEN};
use crate::error::{CryptoError, Result};

/// Unkeyed BLAKE2b with a 1..=64 byte output.
pub fn blake2b(data: &[u8], output_len: usize) -> Result<Vec<u8>> {
    if output_len == 0 || output_len > BLAKE2B_MAX_LEN {
        return Err(CryptoError::invalid_argument(format!("blake2b output length must be 1..=64, got {output_len}")));
    }
    let mut hasher = Blake2bVar::new(output_len).map_err(|e| CryptoError::invalid_argument(e.to_string()))?;
    hasher.update(data);
    let mut out = vec![0u8; output_len];
    hasher.finalize_variable(&mut out).map_err(|e| CryptoError::state(e.to_string()))?;
    Ok(out)
}

/// Unkeyed BLAKE2s with a 1..=32 byte output.
pub fn blake2s(data: &[u8], output_len: usize) -> Result<Vec<u8>> {
    if output_len == 0 || output_len > BLAKE2S_MAX_LEN {
        return Err(CryptoError::invalid_argument(format!("blake2s output length must be 1..=32, got {output_len}")));
    }
    let mut hasher = Blake2sVar::new(output_len).map_err(|e| CryptoError::invalid_argument(e.to_string()))?;
    hasher.update(data);
    let mut out = vec![0u8; output_len];
    hasher.finalize_variable(&mut out).map_err(|e| CryptoError::state(e.to_string()))?;
    Ok(out)
}

/// Keyed BLAKE2b, i.e. BLAKE2 used as a MAC (key length 1..=64 bytes).
pub fn blake2b_keyed(key: &[u8], data: &[u8]) -> Result<[u8; 64]> {
    let mut mac = Blake2bMac512::new_from_slice(key).map_err(|e| CryptoError::invalid_argument(e.to_string()))?;
    mac.update(data);
    let tag = mac.finalize().into_bytes();
    let mut out = [0u8; 64];
    out.copy_from_slice(&tag);
    Ok(out)
}

/// Argon2's variable-length hash `H'(T, input)` (RFC 9106 §3.3 / the
/// Argon2 reference paper): a single BLAKE2b call when `T <= 64`, otherwise
/// an iterated chain of BLAKE2b calls taking 32 bytes per step until the
/// final (<= 64-byte) chunk.
///
/// The `argon2` crate used for the Argon2id construction itself implements
/// this internally; this free function is kept for callers building a
/// custom variable-length KDF directly on top of BLAKE2b.
pub fn argon2_h_prime(output_len: usize, input: &[u8]) -> Result<Vec<u8>> {
    let mut framed = Vec::with_capacity(4 + input.len());
    framed.extend_from_slice(&(output_len as u32).to_le_bytes());
    framed.extend_from_slice(input);

    if output_len <= BLAKE2B_MAX_LEN {
        return blake2b(&framed, output_len);
    }

    let mut out = Vec::with_capacity(output_len);
    let mut v = blake2b(&framed, BLAKE2B_MAX_LEN)?;
    out.extend_from_slice(&v[..32]);
    let mut remaining = output_len - 32;

    while remaining > BLAKE2B_MAX_LEN {
        v = blake2b(&v, BLAKE2B_MAX_LEN)?;
        out.extend_from_slice(&v[..32]);
        remaining -= 32;
    }

    let last = blake2b(&v, remaining)?;
    out.extend_from_slice(&last);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blake2b_matches_empty_input_known_digest() {
        // RFC 7693 Appendix E: BLAKE2b-512("") test vector.
        let out = blake2b(b"", 64).unwrap();
        let expected = hex::decode("786a02f742015903c6c6fd852552d272912f4740e15847618a86e217f71f5419d25e1031afee585313896444934eb04b903a685b1448b755d56f701afe9be8").unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn h_prime_short_output_is_single_blake2b_call() {
        let out = argon2_h_prime(32, b"abc").unwrap();
        assert_eq!(out.len(), 32);
    }

    #[test]
    fn h_prime_long_output_iterates() {
        let out = argon2_h_prime(1024, b"abc").unwrap();
        assert_eq!(out.len(), 1024);
    }
}

//! Optional big-endian length-prefixed framing for Noise messages
//! (`spec.md` §6), for transports (e.g. a raw TCP stream) that don't
//! already delimit messages the way a datagram transport does.
//!
//! Not exercised by `nexus-noise-xk`, whose fixed-size `MSG1_LEN`/
//! `MSG2_LEN`/`MSG3_LEN` constants make framing unnecessary for its single
//! pattern; grounded instead in the general principle (shared by length-
//! prefixed wire formats across the pack) that a length prefix must be
//! validated against a hard maximum before the receiver trusts it enough to
//! allocate a buffer.

use crate::config::NOISE_MAX_MESSAGE_LEN;
use crate::error::{CryptoError, Result};

/// Prefixes `message` with its big-endian `u32` length.
///
/// # Errors
/// Returns [`CryptoError::InvalidArgument`] if `message` exceeds
/// [`NOISE_MAX_MESSAGE_LEN`], the Noise Protocol Framework's own maximum
/// message size.
pub fn frame(message: &[u8]) -> Result<Vec<u8>> {
    if message.len() > NOISE_MAX_MESSAGE_LEN {
        return Err(CryptoError::invalid_argument(format!("Noise message of {} bytes exceeds the {NOISE_MAX_MESSAGE_LEN}-byte maximum", message.len())));
    }
    let mut out = Vec::with_capacity(4 + message.len());
    out.extend_from_slice(&(message.len() as u32).to_be_bytes());
    out.extend_from_slice(message);
    Ok(out)
}

/// Reads one length-prefixed message from the front of `buf`, returning
/// the message and the number of bytes consumed (`4 + message.len()`).
/// Returns `Ok(None)` if `buf` does not yet contain a complete message.
pub fn unframe(buf: &[u8]) -> Result<Option<(&[u8], usize)>> {
    if buf.len() < 4 {
        return Ok(None);
    }
    let len = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
    if len > NOISE_MAX_MESSAGE_LEN {
        return Err(CryptoError::invalid_argument(format!("framed length {len} exceeds the {NOISE_MAX_MESSAGE_LEN}-byte maximum")));
    }
    if buf.len() < 4 + len {
        return Ok(None);
    }
    Ok(Some((&buf[4..4 + len], 4 + len)))
}

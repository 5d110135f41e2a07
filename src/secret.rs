//! Owned secret material and constant-time comparable output types.
//!
//! Three shapes recur across the crate: an arbitrary-length secret that
//! must be zeroized on drop (`SecretKeyData`), a fixed-length MAC or tag
//! whose equality check must not leak timing information (`Mac`), and a
//! fixed-length hash digest with the same constant-time requirement
//! (`Hash`). All three avoid `Debug`-printing their contents.

use core::fmt::{self, Debug, Formatter};

use secrecy::zeroize::Zeroize;
use subtle::ConstantTimeEq;

/// A value that zeroizes its contents on drop and redacts its `Debug`
/// output. Generalizes the donor's `cipher::protected::Protected<T>` beyond
/// heap-allocated buffers to any `Zeroize` type, including fixed-size
/// scalar arrays used by X25519/Ed25519.
#[derive(Clone)]
pub struct Protected<T: Zeroize> {
    data: T,
}

impl<T: Zeroize> Protected<T> {
    pub fn new(value: T) -> Self {
        Self { data: value }
    }

    pub fn expose(&self) -> &T {
        &self.data
    }
}

impl<T: Zeroize> Drop for Protected<T> {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}

impl<T: Zeroize> Debug for Protected<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Owned, variable-length secret key material.
///
/// Equality is constant-time and depends only on length and content, never
/// on the position of the first differing byte (`spec.md` §3,
/// `SecretKeyData`).
#[derive(Clone)]
pub struct SecretKeyData(Protected<Vec<u8>>);

impl SecretKeyData {
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Protected::new(bytes))
    }

    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.expose()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.expose().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.expose().is_empty()
    }
}

impl Debug for SecretKeyData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKeyData([REDACTED])")
    }
}

impl PartialEq for SecretKeyData {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.as_bytes().ct_eq(other.as_bytes()))
    }
}

impl Eq for SecretKeyData {}

/// A fixed-length authentication tag or MAC output.
///
/// Constant-time equality, matching the donor's `cipher::mac::Mac::verify`
/// use of `subtle::ConstantTimeEq`.
#[derive(Clone)]
pub struct Mac<const N: usize>([u8; N]);

impl<const N: usize> Mac<N> {
    #[must_use]
    pub const fn new(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }
}

impl<const N: usize> PartialEq for Mac<N> {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.0.ct_eq(&other.0))
    }
}

impl<const N: usize> Eq for Mac<N> {}

impl<const N: usize> Debug for Mac<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Mac<{N}>([REDACTED])")
    }
}

/// A fixed-length hash digest, constant-time comparable like [`Mac`].
///
/// Hashes are not secret, but comparisons against an attacker-influenced
/// expected value (integrity verification) should still avoid leaking a
/// byte-position oracle, matching the donor's `cipher::hash::Hash::verify`.
#[derive(Clone, PartialEq, Eq)]
pub struct Hash<const N: usize>([u8; N]);

impl<const N: usize> Hash<N> {
    #[must_use]
    pub const fn new(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    #[must_use]
    pub fn ct_eq(&self, other: &[u8; N]) -> bool {
        bool::from(self.0.ct_eq(other))
    }
}

impl<const N: usize> Debug for Hash<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", hex_fmt(&self.0))
    }
}

fn hex_fmt(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// The `(cipher_text, nonce, mac)` triple emitted by every AEAD encrypt
/// operation (`spec.md` §3, `SecretBox`). Bundles the three values an AEAD
/// open needs so callers don't have to thread nonce and tag separately
/// through storage or wire formats.
#[derive(Clone)]
pub struct SecretBox {
    cipher_text: Vec<u8>,
    nonce: Vec<u8>,
    mac: [u8; 16],
}

impl SecretBox {
    #[must_use]
    pub const fn new(cipher_text: Vec<u8>, nonce: Vec<u8>, mac: [u8; 16]) -> Self {
        Self { cipher_text, nonce, mac }
    }

    #[must_use]
    pub fn cipher_text(&self) -> &[u8] {
        &self.cipher_text
    }

    #[must_use]
    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    #[must_use]
    pub const fn mac(&self) -> &[u8; 16] {
        &self.mac
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>, [u8; 16]) {
        (self.cipher_text, self.nonce, self.mac)
    }
}

impl Debug for SecretBox {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretBox").field("cipher_text_len", &self.cipher_text.len()).field("nonce", &hex_fmt(&self.nonce)).field("mac", &hex_fmt(&self.mac)).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_key_data_ct_eq() {
        let a = SecretKeyData::from_slice(b"same-key");
        let b = SecretKeyData::from_slice(b"same-key");
        let c = SecretKeyData::from_slice(b"diff-key");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn mac_ct_eq() {
        let a = Mac::new([1u8; 16]);
        let b = Mac::new([1u8; 16]);
        let c = Mac::new([2u8; 16]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn protected_debug_is_redacted() {
        let p = Protected::new(vec![1u8, 2, 3]);
        assert_eq!(format!("{p:?}"), "[REDACTED]");
    }
}

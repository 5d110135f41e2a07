//! Key derivation functions (`spec.md` §4.7-4.8).
//!
//! HChaCha20 is itself a key-derivation primitive (it derives the XChaCha20
//! subkey) but lives in [`crate::primitives::chacha`] since it operates on
//! fixed 32-byte inputs with no streaming or variable-output-length
//! concerns; it is re-exported here so callers needing "a KDF" don't have
//! to know that implementation detail.

pub mod argon2;
pub mod hkdf;
pub mod pbkdf2;

pub use crate::primitives::chacha::hchacha20;

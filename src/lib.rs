//! A cryptographic primitive suite and Noise Protocol Framework handshake
//! engine:
//! - AEAD: AES-GCM, AES-CBC-HMAC, AES-CTR, ChaCha20-Poly1305,
//!   XChaCha20-Poly1305, plus a generic streaming `CipherState`.
//! - Hashing and MACs: BLAKE2b/BLAKE2s, SHA-1/224/256/384/512, HMAC,
//!   Poly1305.
//! - Key derivation: HKDF, PBKDF2, Argon2id, HChaCha20.
//! - Key exchange and signatures: X25519, Ed25519.
//! - A Noise Protocol Framework handshake engine over nine message
//!   patterns, AES-GCM or ChaCha20-Poly1305 transport, and BLAKE2s or
//!   SHA-256 handshake hashing.

pub mod aead;
pub mod config;
pub mod curve25519;
pub mod error;
pub mod kdf;
pub mod mac;
pub mod noise;
pub mod primitives;
pub mod secret;
pub mod suite;

pub use error::{CryptoError, Result};

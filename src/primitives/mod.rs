//! Leaf-level cryptographic building blocks: block and stream ciphers,
//! universal hashes, and hash functions. Everything above this module
//! (`aead`, `mac`, `kdf`, `curve25519`, `noise`) composes these primitives;
//! nothing here knows about AEAD framing, key derivation, or the Noise
//! state machine.

pub mod aes;
pub mod blake2;
pub mod chacha;
pub mod ghash;
pub mod poly1305;
pub mod sha1;
pub mod sha2;

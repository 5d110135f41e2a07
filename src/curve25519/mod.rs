//! Curve25519 key exchange and signatures (`spec.md` §4.9).

pub mod ed25519;
pub mod x25519;

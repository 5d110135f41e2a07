//! The Noise Protocol Framework handshake engine (`spec.md` §5-§6):
//! patterns, the three layered states (`CipherState`, `SymmetricState`,
//! `HandshakeState`), and optional message framing.
//!
//! Grounded primarily in `examples/open-nexus-OS-open-nexus-OS`'s
//! `nexus-noise-xk` crate, generalized from its single hardcoded XK
//! implementation to a token-driven interpreter over all nine patterns
//! `spec.md` names (see `patterns.rs`'s doc comment for the two deferred
//! patterns' provenance).

pub mod cipher_state;
pub mod framing;
pub mod handshake_state;
pub mod patterns;
pub mod symmetric_state;

//! Error kinds shared by every module in the crate.
//!
//! The taxonomy follows the five kinds a cryptographic primitive suite needs
//! to distinguish: a caller can always tell a bad-parameter mistake apart
//! from a genuine authentication failure, which matters when the caller is
//! deciding whether to retry, log, or treat the event as an attack.

/// The crate-wide result alias.
pub type Result<T> = core::result::Result<T, CryptoError>;

/// Errors produced by primitives, AEAD assemblers, KDFs, and the Noise
/// handshake engine.
///
/// `AuthenticationFailure` and `PaddingFailure` are kept distinct even
/// though both are fatal to the caller: a decrypt path that can tell them
/// apart lets the caller log "corrupted padding" separately from "tampered
/// ciphertext" without ever exposing that distinction to a network peer
/// before the MAC has already been verified.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Wrong key/nonce/salt length, a parameter out of its valid range, or
    /// an unsupported algorithm combination. Always raised before any
    /// cryptographic work is performed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A MAC, AEAD tag, or signature failed to verify.
    #[error("authentication failed")]
    AuthenticationFailure,

    /// PKCS#7 padding was invalid after the MAC had already verified.
    #[error("invalid padding")]
    PaddingFailure,

    /// A sink/state object was reused after being finalized, a caller wrote
    /// when it was the peer's turn, or a counter reached its overflow bound
    /// (`n = 2^64 - 1` in Noise, `counter = 2^47` in the streaming
    /// `CipherState`).
    #[error("invalid state: {0}")]
    StateError(String),

    /// Reserved for algorithm stubs. This crate never constructs this
    /// variant: ECDH-P256/384/521, ECDSA, and RSA-PSS are omitted entirely
    /// rather than shipped as silent no-ops (see DESIGN.md).
    #[error("unimplemented: {0}")]
    Unimplemented(&'static str),
}

impl CryptoError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn state(msg: impl Into<String>) -> Self {
        Self::StateError(msg.into())
    }
}

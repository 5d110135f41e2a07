//! Noise Protocol Framework handshake pattern tables (`spec.md` §5),
//! grounded in the hand-written single-pattern state machine of
//! `nexus-noise-xk`, generalized from one hardcoded XK implementation into
//! a token-driven interpreter that [`crate::noise::handshake_state`] walks
//! for any of the nine supported patterns.
//!
//! Pattern names and token orderings for the fundamental one-way (`N`,
//! `K`, `X`) and interactive (`NK`, `KK`, `IK`, `XX`) patterns follow the
//! Noise Protocol Framework specification directly. `NK1` and `X1X` are
//! *deferred* variants (the spec's "Other handshake patterns" construction,
//! which delays one pattern's DH operation and its accompanying static-key
//! transmission to a later message without changing which DH operations
//! occur overall) — this module's token tables for those two were
//! reconstructed from that general deferral rule rather than transcribed
//! from a canonical table; see DESIGN.md for the specific choice made.

/// One step of a handshake message: either a public key transmission (`E`,
/// `S`) or a Diffie-Hellman mixing operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// Generate (initiator/responder's own turn) or receive (peer's turn)
    /// an ephemeral public key.
    E,
    /// Generate or receive a static public key, transmitted under the
    /// current cipher state (encrypted once a key has been established,
    /// plaintext before).
    S,
    /// `DH(local_ephemeral, remote_ephemeral)`.
    Ee,
    /// `DH(initiator_ephemeral_or_static, responder_static_or_ephemeral)` —
    /// concretely, from the initiator's perspective `DH(e, rs)`; from the
    /// responder's perspective applying the same token, `DH(re, s)`.
    Es,
    /// The mirror of [`Token::Es`]: from the initiator's perspective
    /// `DH(s, re)`; from the responder's, `DH(re... )` — see
    /// `handshake_state.rs` for the exact per-role dispatch.
    Se,
    /// `DH(local_static, remote_static)`.
    Ss,
}

/// Which role (if any) sends a public key before the handshake proper
/// begins, per `spec.md` §5's pre-message convention.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreMessage {
    pub initiator: &'static [Token],
    pub responder: &'static [Token],
}

/// A complete message pattern: optional pre-message knowledge, then an
/// ordered list of per-message token sequences alternating
/// initiator-to-responder, responder-to-initiator, ...
#[derive(Clone, Copy, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub pre_message: PreMessage,
    pub messages: &'static [&'static [Token]],
}

const N: Pattern = Pattern {
    name: "N",
    pre_message: PreMessage { initiator: &[], responder: &[Token::S] },
    messages: &[&[Token::E, Token::Es]],
};

const K: Pattern = Pattern {
    name: "K",
    pre_message: PreMessage { initiator: &[Token::S], responder: &[Token::S] },
    messages: &[&[Token::E, Token::Es, Token::Ss]],
};

const X: Pattern = Pattern {
    name: "X",
    pre_message: PreMessage { initiator: &[], responder: &[Token::S] },
    messages: &[&[Token::E, Token::Es, Token::S, Token::Ss]],
};

const NK: Pattern = Pattern {
    name: "NK",
    pre_message: PreMessage { initiator: &[], responder: &[Token::S] },
    messages: &[&[Token::E, Token::Es], &[Token::E, Token::Ee]],
};

/// Deferred variant of `NK`: the initiator's `es` is pushed from message 1
/// into message 2, alongside the responder's own `e, ee`.
const NK1: Pattern = Pattern {
    name: "NK1",
    pre_message: PreMessage { initiator: &[], responder: &[Token::S] },
    messages: &[&[Token::E], &[Token::E, Token::Ee, Token::Es]],
};

const KK: Pattern = Pattern {
    name: "KK",
    pre_message: PreMessage { initiator: &[Token::S], responder: &[Token::S] },
    messages: &[&[Token::E, Token::Es, Token::Ss], &[Token::E, Token::Ee, Token::Se]],
};

const IK: Pattern = Pattern {
    name: "IK",
    pre_message: PreMessage { initiator: &[], responder: &[Token::S] },
    messages: &[&[Token::E, Token::Es, Token::S, Token::Ss], &[Token::E, Token::Ee, Token::Se]],
};

const XX: Pattern = Pattern {
    name: "XX",
    pre_message: PreMessage { initiator: &[], responder: &[] },
    messages: &[&[Token::E], &[Token::E, Token::Ee, Token::S, Token::Es], &[Token::S, Token::Se]],
};

/// Deferred variant of `XX`: the initiator's final `s, se` (message 3 of
/// `XX`) is split so the raw key bytes are sent in message 3 but the
/// accompanying `se` DH — and the handshake split — waits for a fourth
/// message. See this module's doc comment for why this table is a
/// reconstruction rather than a transcription.
const X1X: Pattern = Pattern {
    name: "X1X",
    pre_message: PreMessage { initiator: &[], responder: &[] },
    messages: &[&[Token::E], &[Token::E, Token::Ee, Token::S, Token::Es], &[Token::S], &[Token::Se]],
};

/// Resolves a pattern name (the second underscore-delimited component of a
/// Noise protocol name, e.g. `"XX"` in `Noise_XX_25519_ChaChaPoly_BLAKE2s`)
/// to its token table.
#[must_use]
pub fn by_name(name: &str) -> Option<Pattern> {
    match name {
        "N" => Some(N),
        "K" => Some(K),
        "X" => Some(X),
        "NK" => Some(NK),
        "NK1" => Some(NK1),
        "KK" => Some(KK),
        "IK" => Some(IK),
        "XX" => Some(XX),
        "X1X" => Some(X1X),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_named_pattern_resolves() {
        for name in ["N", "K", "X", "NK", "NK1", "KK", "IK", "XX", "X1X"] {
            assert!(by_name(name).is_some(), "{name} should resolve");
        }
    }

    #[test]
    fn unknown_pattern_name_is_none() {
        assert!(by_name("ZZ").is_none());
    }
}

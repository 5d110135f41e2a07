//! The Noise Protocol Framework's `HandshakeState` (`spec.md` §5.3): a
//! token-driven interpreter over [`crate::noise::patterns::Pattern`],
//! generalizing `nexus-noise-xk`'s hand-written `XkInitiator`/`XkResponder`
//! pair (which hardcoded the `X`/`K` token sequence for one specific
//! pattern across two structs) into one state machine that walks any of
//! the nine supported patterns for either role.

use rand_core::{CryptoRng, RngCore};

use crate::curve25519::x25519::{EphemeralX25519, X25519KeyPair};
use crate::error::{CryptoError, Result};
use crate::noise::cipher_state::{CipherState, NoiseCipherAlgorithm};
use crate::noise::patterns::{Pattern, Token};
use crate::noise::symmetric_state::{NoiseHashAlgorithm, SymmetricState};

/// Which side of the handshake this state machine plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Initiator,
    Responder,
}

/// Invoked when the peer's static public key is decrypted off the wire
/// (the `S` token on a read), so a caller using a pattern like `X` or `XX`
/// — where the static key is learned during the handshake rather than
/// known in advance — can pin or reject it before the handshake proceeds.
/// Patterns where the remote static key is pre-message knowledge (`N`,
/// `K`, `NK`, `NK1`, `KK`, `IK`) never trigger this callback.
pub type RemoteStaticKeyCallback<'a> = dyn FnMut(&[u8; 32]) -> bool + 'a;

/// A Noise handshake in progress. Constructed once per handshake attempt;
/// [`Self::split`] consumes it once the final message has been processed.
pub struct HandshakeState<'a> {
    role: Role,
    pattern: Pattern,
    cipher_algorithm: NoiseCipherAlgorithm,
    symmetric: SymmetricState,
    local_static: Option<X25519KeyPair>,
    local_ephemeral: Option<EphemeralX25519>,
    remote_static: Option<[u8; 32]>,
    remote_ephemeral: Option<[u8; 32]>,
    message_index: usize,
    on_remote_static: Option<Box<RemoteStaticKeyCallback<'a>>>,
}

impl<'a> HandshakeState<'a> {
    /// Builds the Noise protocol name string (`spec.md` §6), e.g.
    /// `Noise_XX_25519_ChaChaPoly_BLAKE2s`.
    #[must_use]
    pub fn protocol_name(pattern_name: &str, cipher: NoiseCipherAlgorithm, hash: NoiseHashAlgorithm) -> String {
        let cipher_name = match cipher {
            NoiseCipherAlgorithm::AesGcm => "AESGCM",
            NoiseCipherAlgorithm::ChaCha20Poly1305 => "ChaChaPoly",
        };
        let hash_name = match hash {
            NoiseHashAlgorithm::Blake2s => "BLAKE2s",
            NoiseHashAlgorithm::Sha256 => "SHA256",
        };
        format!("Noise_{pattern_name}_25519_{cipher_name}_{hash_name}")
    }

    /// Starts a new handshake.
    ///
    /// `local_static` is required for every pattern except `N`. `remote_static`
    /// must be supplied exactly when the chosen pattern's pre-message gives
    /// the *other* role's static key in advance (e.g. `NK`'s initiator must
    /// already know the responder's static key; `XX`'s initiator must not,
    /// since `XX` has no pre-message at all).
    pub fn initialize(
        role: Role,
        pattern: Pattern,
        cipher_algorithm: NoiseCipherAlgorithm,
        hash_algorithm: NoiseHashAlgorithm,
        local_static: Option<X25519KeyPair>,
        remote_static: Option<[u8; 32]>,
    ) -> Result<Self> {
        let protocol_name = Self::protocol_name(pattern.name, cipher_algorithm, hash_algorithm);
        let mut symmetric = SymmetricState::initialize(hash_algorithm, cipher_algorithm, protocol_name.as_bytes());

        for token in pattern.pre_message.initiator {
            let bytes = match (role, token) {
                (Role::Initiator, Token::S) => {
                    local_static.as_ref().ok_or_else(|| CryptoError::invalid_argument("pattern requires a local static key"))?.public_key()
                }
                (Role::Responder, Token::S) => remote_static.ok_or_else(|| CryptoError::invalid_argument("pattern requires the initiator's static key in advance"))?,
                _ => return Err(CryptoError::invalid_argument("only S tokens are valid in a pre-message")),
            };
            symmetric.mix_hash(&bytes);
        }
        for token in pattern.pre_message.responder {
            let bytes = match (role, token) {
                (Role::Responder, Token::S) => {
                    local_static.as_ref().ok_or_else(|| CryptoError::invalid_argument("pattern requires a local static key"))?.public_key()
                }
                (Role::Initiator, Token::S) => remote_static.ok_or_else(|| CryptoError::invalid_argument("pattern requires the responder's static key in advance"))?,
                _ => return Err(CryptoError::invalid_argument("only S tokens are valid in a pre-message")),
            };
            symmetric.mix_hash(&bytes);
        }

        // A pre-message `S` token names the *sender's* own static key, so it
        // tells the *other* role the key in advance: `pre_message.initiator`
        // informs the responder, `pre_message.responder` informs the
        // initiator. `N`/`X` only populate one side; `K`/`KK` populate both.
        let remote_static = match role {
            Role::Initiator if !pattern.pre_message.responder.is_empty() => remote_static,
            Role::Responder if !pattern.pre_message.initiator.is_empty() => remote_static,
            _ => None,
        };

        Ok(Self {
            role,
            pattern,
            cipher_algorithm,
            symmetric,
            local_static,
            local_ephemeral: None,
            remote_static,
            remote_ephemeral: None,
            message_index: 0,
            on_remote_static: None,
        })
    }

    /// Registers a callback invoked the first time the peer's static key is
    /// learned during the handshake itself (as opposed to known
    /// pre-message). Returning `false` aborts the handshake with
    /// [`CryptoError::AuthenticationFailure`].
    pub fn on_remote_static_key(&mut self, callback: impl FnMut(&[u8; 32]) -> bool + 'a) {
        self.on_remote_static = Some(Box::new(callback));
    }

    fn my_turn_to_write(&self) -> bool {
        let initiator_writes = self.message_index % 2 == 0;
        matches!((self.role, initiator_writes), (Role::Initiator, true) | (Role::Responder, false))
    }

    fn dh(&self, token: Token) -> Result<crate::secret::SecretKeyData> {
        let local_e = self.local_ephemeral.as_ref().ok_or_else(|| CryptoError::state("DH token requires a local ephemeral key"))?;
        let local_s = self.local_static.as_ref().ok_or_else(|| CryptoError::state("DH token requires a local static key"))?;
        let remote_e = self.remote_ephemeral.ok_or_else(|| CryptoError::state("DH token requires the remote ephemeral key"))?;
        let remote_s = self.remote_static.ok_or_else(|| CryptoError::state("DH token requires the remote static key"))?;

        Ok(match (token, self.role) {
            (Token::Ee, _) => local_e.diffie_hellman(&remote_e),
            (Token::Ss, _) => local_s.diffie_hellman(&remote_s),
            (Token::Es, Role::Initiator) | (Token::Se, Role::Responder) => local_e.diffie_hellman(&remote_s),
            (Token::Es, Role::Responder) | (Token::Se, Role::Initiator) => local_s.diffie_hellman(&remote_e),
            (Token::E | Token::S, _) => return Err(CryptoError::invalid_argument("E/S are not DH tokens")),
        })
    }

    /// Writes the next handshake message carrying `payload` (which may be
    /// empty). Returns the complete wire message.
    pub fn write_message<R: RngCore + CryptoRng>(&mut self, payload: &[u8], rng: &mut R) -> Result<Vec<u8>> {
        if !self.my_turn_to_write() {
            return Err(CryptoError::state("it is not this side's turn to write"));
        }
        let tokens = *self.pattern.messages.get(self.message_index).ok_or_else(|| CryptoError::state("handshake already complete"))?;
        let mut out = Vec::new();

        for &token in tokens {
            tracing::trace!(pattern = self.pattern.name, role = ?self.role, message_index = self.message_index, ?token, "writing handshake token");
            match token {
                Token::E => {
                    let ephemeral = EphemeralX25519::generate(rng);
                    let public = ephemeral.public_key();
                    self.local_ephemeral = Some(ephemeral);
                    self.symmetric.mix_hash(&public);
                    out.extend_from_slice(&public);
                }
                Token::S => {
                    let public = self.local_static.as_ref().ok_or_else(|| CryptoError::state("S token requires a local static key"))?.public_key();
                    out.extend_from_slice(&self.symmetric.encrypt_and_hash(&public)?);
                }
                Token::Ee | Token::Es | Token::Se | Token::Ss => {
                    let shared = self.dh(token)?;
                    self.symmetric.mix_key(shared.as_bytes())?;
                }
            }
        }

        out.extend_from_slice(&self.symmetric.encrypt_and_hash(payload)?);
        self.message_index += 1;
        Ok(out)
    }

    /// Reads the next handshake message, returning its decrypted payload.
    pub fn read_message(&mut self, message: &[u8]) -> Result<Vec<u8>> {
        if self.my_turn_to_write() {
            return Err(CryptoError::state("it is this side's turn to write, not read"));
        }
        let tokens = *self.pattern.messages.get(self.message_index).ok_or_else(|| CryptoError::state("handshake already complete"))?;
        let mut cursor = 0usize;

        for &token in tokens {
            tracing::trace!(pattern = self.pattern.name, role = ?self.role, message_index = self.message_index, ?token, "reading handshake token");
            match token {
                Token::E => {
                    let bytes = message.get(cursor..cursor + 32).ok_or_else(|| CryptoError::invalid_argument("message truncated at E token"))?;
                    let mut public = [0u8; 32];
                    public.copy_from_slice(bytes);
                    self.symmetric.mix_hash(&public);
                    self.remote_ephemeral = Some(public);
                    cursor += 32;
                }
                Token::S => {
                    let encrypted_len = if self.symmetric.has_key() { 32 + 16 } else { 32 };
                    let bytes = message.get(cursor..cursor + encrypted_len).ok_or_else(|| CryptoError::invalid_argument("message truncated at S token"))?;
                    let plain = self.symmetric.decrypt_and_hash(bytes)?;
                    let mut public = [0u8; 32];
                    public.copy_from_slice(&plain);
                    if let Some(callback) = self.on_remote_static.as_mut() {
                        if !callback(&public) {
                            return Err(CryptoError::AuthenticationFailure);
                        }
                    }
                    self.remote_static = Some(public);
                    cursor += encrypted_len;
                }
                Token::Ee | Token::Es | Token::Se | Token::Ss => {
                    let shared = self.dh(token)?;
                    self.symmetric.mix_key(shared.as_bytes())?;
                }
            }
        }

        let payload = self.symmetric.decrypt_and_hash(&message[cursor..])?;
        self.message_index += 1;
        Ok(payload)
    }

    /// True once every message in the pattern has been written or read.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.message_index >= self.pattern.messages.len()
    }

    /// `Split`: derives the two transport-direction `CipherState`s. Only
    /// valid once [`Self::is_complete`] is true; consumes `self`.
    ///
    /// Returns `(send, recv)` from this side's own perspective: both roles
    /// call `SymmetricState::split` and get back `(k1, k2)` in the same
    /// protocol order, so whichever side is the responder must swap them to
    /// land on the key the initiator is sending with.
    pub fn split(self) -> Result<(CipherState, CipherState)> {
        if !self.is_complete() {
            return Err(CryptoError::state("handshake is not yet complete"));
        }
        let (k1, k2) = self.symmetric.split();
        let (send_key, recv_key) = match self.role {
            Role::Initiator => (k1, k2),
            Role::Responder => (k2, k1),
        };
        let mut send = CipherState::new(self.cipher_algorithm);
        send.initialize_key(send_key)?;
        let mut recv = CipherState::new(self.cipher_algorithm);
        recv.initialize_key(recv_key)?;
        Ok((send, recv))
    }
}

//! The Noise Protocol Framework's `SymmetricState` (`spec.md` §5.2):
//! chaining key, transcript hash, and an embedded `CipherState`, generalized
//! from `nexus-noise-xk`'s BLAKE2s-only `SymmetricState` to either hash
//! function `spec.md` §6 allows, and extended with `mix_key_and_hash` for
//! pre-shared-key support, which the donor's XK-only implementation never
//! exercised.

use blake2::Blake2s256;
use hmac::{Hmac, Mac as HmacTrait};
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::noise::cipher_state::{CipherState, NoiseCipherAlgorithm};
use crate::primitives::sha2::sha256;

/// Which hash function backs a Noise `SymmetricState`, per `spec.md` §6.
/// Both options happen to produce a 32-byte digest, so `HASHLEN` is fixed
/// at 32 across this module rather than made generic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseHashAlgorithm {
    Blake2s,
    Sha256,
}

fn hash(kind: NoiseHashAlgorithm, data: &[u8]) -> [u8; 32] {
    match kind {
        NoiseHashAlgorithm::Blake2s => {
            let mut hasher = Blake2s256::new();
            hasher.update(data);
            hasher.finalize().into()
        }
        NoiseHashAlgorithm::Sha256 => sha256(data),
    }
}

fn hmac_hash(kind: NoiseHashAlgorithm, key: &[u8], data: &[u8]) -> [u8; 32] {
    match kind {
        NoiseHashAlgorithm::Blake2s => {
            let mut mac = Hmac::<Blake2s256>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().into()
        }
        NoiseHashAlgorithm::Sha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().into()
        }
    }
}

/// `HKDF(chaining_key, input_key_material, 2)`, the Noise spec's own HKDF
/// definition (distinct from, but structurally identical to, RFC 5869 —
/// see `spec.md` §5.2's note that Noise re-derives HKDF from HMAC directly
/// rather than depending on a generic HKDF construction, so the two
/// outputs stay this module's own function rather than a call into
/// `crate::kdf::hkdf`).
fn hkdf2(kind: NoiseHashAlgorithm, chaining_key: &[u8; 32], ikm: &[u8]) -> ([u8; 32], [u8; 32]) {
    let prk = hmac_hash(kind, chaining_key, ikm);
    let t1 = hmac_hash(kind, &prk, &[0x01]);
    let mut t1_2 = Vec::with_capacity(33);
    t1_2.extend_from_slice(&t1);
    t1_2.push(0x02);
    let t2 = hmac_hash(kind, &prk, &t1_2);
    (t1, t2)
}

/// `HKDF(chaining_key, input_key_material, 3)`, used by `mix_key_and_hash`
/// for pre-shared-key tokens.
fn hkdf3(kind: NoiseHashAlgorithm, chaining_key: &[u8; 32], ikm: &[u8]) -> ([u8; 32], [u8; 32], [u8; 32]) {
    let prk = hmac_hash(kind, chaining_key, ikm);
    let t1 = hmac_hash(kind, &prk, &[0x01]);
    let mut t1_2 = Vec::with_capacity(33);
    t1_2.extend_from_slice(&t1);
    t1_2.push(0x02);
    let t2 = hmac_hash(kind, &prk, &t1_2);
    let mut t2_3 = Vec::with_capacity(33);
    t2_3.extend_from_slice(&t2);
    t2_3.push(0x03);
    let t3 = hmac_hash(kind, &prk, &t2_3);
    (t1, t2, t3)
}

/// The Noise `SymmetricState`: chaining key `ck`, transcript hash `h`, and
/// an embedded [`CipherState`].
pub struct SymmetricState {
    hash_kind: NoiseHashAlgorithm,
    ck: [u8; 32],
    h: [u8; 32],
    cipher: CipherState,
}

impl SymmetricState {
    /// `InitializeSymmetric`: seeds `h` (and `ck`) from the protocol name,
    /// hashing it down if longer than 32 bytes and zero-padding it
    /// otherwise.
    pub fn initialize(hash_kind: NoiseHashAlgorithm, cipher_algorithm: NoiseCipherAlgorithm, protocol_name: &[u8]) -> Self {
        let mut h = [0u8; 32];
        if protocol_name.len() <= 32 {
            h[..protocol_name.len()].copy_from_slice(protocol_name);
        } else {
            h = hash(hash_kind, protocol_name);
        }
        Self { hash_kind, ck: h, h, cipher: CipherState::new(cipher_algorithm) }
    }

    pub fn mix_hash(&mut self, data: &[u8]) {
        let mut input = Vec::with_capacity(32 + data.len());
        input.extend_from_slice(&self.h);
        input.extend_from_slice(data);
        self.h = hash(self.hash_kind, &input);
    }

    /// `MixKey`: derives a new chaining key and transport key from `ikm`
    /// (a DH output), discarding the old chaining key.
    pub fn mix_key(&mut self, ikm: &[u8]) -> Result<()> {
        let (ck, temp_k) = hkdf2(self.hash_kind, &self.ck, ikm);
        self.ck = ck;
        self.cipher.initialize_key(temp_k)
    }

    /// `MixKeyAndHash`: the pre-shared-key variant of `MixKey`, additionally
    /// folding an intermediate value into `h`.
    pub fn mix_key_and_hash(&mut self, ikm: &[u8]) -> Result<()> {
        let (ck, temp_h, temp_k) = hkdf3(self.hash_kind, &self.ck, ikm);
        self.ck = ck;
        self.mix_hash(&temp_h);
        self.cipher.initialize_key(temp_k)
    }

    /// `EncryptAndHash`: encrypts `plaintext` under `h` as associated data
    /// (or passes it through unchanged if the cipher is still keyless),
    /// then mixes the result into `h`.
    pub fn encrypt_and_hash(&mut self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut buf = plaintext.to_vec();
        self.cipher.encrypt_with_ad(&self.h, &mut buf)?;
        self.mix_hash(&buf);
        Ok(buf)
    }

    /// `DecryptAndHash`: the inverse of [`Self::encrypt_and_hash`].
    pub fn decrypt_and_hash(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let mut buf = ciphertext.to_vec();
        self.cipher.decrypt_with_ad(&self.h, &mut buf)?;
        self.mix_hash(ciphertext);
        Ok(buf)
    }

    /// `Split`: derives the two transport direction keys from the final
    /// chaining key. Consumes `self` since a `SymmetricState` has no
    /// further use once the handshake's last message is processed.
    #[must_use]
    pub fn split(self) -> ([u8; 32], [u8; 32]) {
        hkdf2(self.hash_kind, &self.ck, &[])
    }

    #[must_use]
    pub fn transcript_hash(&self) -> [u8; 32] {
        self.h
    }

    #[must_use]
    pub fn has_key(&self) -> bool {
        self.cipher.has_key()
    }
}

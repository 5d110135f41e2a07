//! SHA-224/256/384/512 streaming hash sinks (`spec.md` §4.7's hash family),
//! wrapping the `sha2` crate's `Digest` implementations.

use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

/// A streaming SHA-2 sink. Owned exclusively by its caller; consumed by
/// [`Sha2::finalize`] (`spec.md` §3: "reuse after finalization is a
/// programming error").
pub enum Sha2 {
    Sha224(Box<Sha224>),
    Sha256(Box<Sha256>),
    Sha384(Box<Sha384>),
    Sha512(Box<Sha512>),
}

impl Sha2 {
    #[must_use]
    pub fn sha224() -> Self {
        Self::Sha224(Box::new(Sha224::new()))
    }

    #[must_use]
    pub fn sha256() -> Self {
        Self::Sha256(Box::new(Sha256::new()))
    }

    #[must_use]
    pub fn sha384() -> Self {
        Self::Sha384(Box::new(Sha384::new()))
    }

    #[must_use]
    pub fn sha512() -> Self {
        Self::Sha512(Box::new(Sha512::new()))
    }

    pub fn update(&mut self, data: &[u8]) {
        match self {
            Self::Sha224(h) => h.update(data),
            Self::Sha256(h) => h.update(data),
            Self::Sha384(h) => h.update(data),
            Self::Sha512(h) => h.update(data),
        }
    }

    #[must_use]
    pub fn finalize(self) -> Vec<u8> {
        match self {
            Self::Sha224(h) => h.finalize().to_vec(),
            Self::Sha256(h) => h.finalize().to_vec(),
            Self::Sha384(h) => h.finalize().to_vec(),
            Self::Sha512(h) => h.finalize().to_vec(),
        }
    }
}

/// One-shot SHA-256, used throughout the Noise and HKDF code paths.
#[must_use]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut h = Sha256::new();
    h.update(data);
    h.finalize().into()
}

/// One-shot SHA-512, used by Ed25519 key expansion and signing.
#[must_use]
pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut h = Sha512::new();
    h.update(data);
    h.finalize().into()
}

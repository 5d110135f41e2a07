//! SHA-1 streaming hash sink (`spec.md` §4.7), kept for interoperability
//! with legacy wire formats. Not used by any Noise cipher suite or AEAD in
//! this crate; exposed purely as a primitive.

use sha1::{Digest, Sha1};

pub struct Sha1Sink(Box<Sha1>);

impl Sha1Sink {
    #[must_use]
    pub fn new() -> Self {
        Self(Box::new(Sha1::new()))
    }

    pub fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    #[must_use]
    pub fn finalize(self) -> [u8; 20] {
        (*self.0).finalize().into()
    }
}

impl Default for Sha1Sink {
    fn default() -> Self {
        Self::new()
    }
}

#[must_use]
pub fn sha1(data: &[u8]) -> [u8; 20] {
    let mut sink = Sha1Sink::new();
    sink.update(data);
    sink.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha1_abc_known_digest() {
        let digest = sha1(b"abc");
        let expected: [u8; 20] = [0xa9, 0x99, 0x3e, 0x36, 0x47, 0x06, 0x81, 0x6a, 0xba, 0x3e, 0x25, 0x71, 0x78, 0x50, 0xc2, 0x6c, 0x9c, 0xd0, 0xd8, 0x9d];
        assert_eq!(digest, expected);
    }
}

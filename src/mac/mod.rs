//! Message authentication codes exposed independently of any AEAD
//! construction (`spec.md` §4.7): HMAC here; Poly1305 and keyed BLAKE2 live
//! in [`crate::primitives`] since both are also AEAD building blocks.

pub mod hmac;

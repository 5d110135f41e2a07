//! Cryptographic constants shared across the primitive suite and the Noise
//! engine.
//!
//! Mirrors the donor crate's `config.rs`: a single source of truth for
//! lengths and default parameters, rather than scattering magic numbers
//! through each module.

/// AES-256 key length in bytes.
pub const AES_256_KEY_LEN: usize = 32;
/// AES-192 key length in bytes.
pub const AES_192_KEY_LEN: usize = 24;
/// AES-128 key length in bytes.
pub const AES_128_KEY_LEN: usize = 16;
/// AES block size in bytes (same for all key lengths).
pub const AES_BLOCK_LEN: usize = 16;

/// AES-GCM nonce length in bytes (NIST SP 800-38D recommended default).
pub const AES_GCM_NONCE_LEN: usize = 12;
/// AES-GCM / Poly1305 authentication tag length in bytes.
pub const TAG_LEN: usize = 16;
/// AES-CBC IV length in bytes (one block).
pub const AES_CBC_IV_LEN: usize = 16;

/// ChaCha20 / ChaCha20-Poly1305 nonce length in bytes (RFC 7539).
pub const CHACHA20_NONCE_LEN: usize = 12;
/// XChaCha20 extended nonce length in bytes.
pub const XCHACHA20_NONCE_LEN: usize = 24;
/// ChaCha20 family key length in bytes.
pub const CHACHA20_KEY_LEN: usize = 32;

/// HMAC-SHA256 tag length in bytes, used by the AES-CBC-HMAC construction.
pub const HMAC_SHA256_LEN: usize = 32;

/// BLAKE2b maximum digest length in bytes.
pub const BLAKE2B_MAX_LEN: usize = 64;
/// BLAKE2s maximum digest length in bytes.
pub const BLAKE2S_MAX_LEN: usize = 32;

/// SHA-1 digest length in bytes.
pub const SHA1_LEN: usize = 20;
/// SHA-224 digest length in bytes.
pub const SHA224_LEN: usize = 28;
/// SHA-256 digest length in bytes.
pub const SHA256_LEN: usize = 32;
/// SHA-384 digest length in bytes.
pub const SHA384_LEN: usize = 48;
/// SHA-512 digest length in bytes.
pub const SHA512_LEN: usize = 64;

/// Argon2 version byte mandated by RFC 9106 (`0x13`).
pub const ARGON2_VERSION: u32 = 0x13;
/// Interactive-use Argon2id memory cost in KiB (64 MiB), matching the
/// donor's `ARGON_MEMORY` default.
pub const ARGON2_DEFAULT_MEMORY_KIB: u32 = 64 * 1024;
/// Interactive-use Argon2id time cost, matching the donor's `ARGON_TIME`.
pub const ARGON2_DEFAULT_TIME: u32 = 3;
/// Interactive-use Argon2id parallelism, matching the donor's
/// `ARGON_THREADS`.
pub const ARGON2_DEFAULT_PARALLELISM: u32 = 4;
/// Recommended salt length for Argon2id in bytes.
pub const ARGON2_SALT_LEN: usize = 16;

/// PBKDF2 yields cooperatively every this many inner iterations. This is a
/// scheduling policy, not part of the PBKDF2 protocol (RFC 8018 defines no
/// such boundary).
pub const PBKDF2_YIELD_EVERY: u32 = 2000;

/// X25519 / Ed25519 key and shared-secret length in bytes.
pub const CURVE25519_LEN: usize = 32;
/// Ed25519 signature length in bytes (`R ∥ S`).
pub const ED25519_SIGNATURE_LEN: usize = 64;

/// Noise `CipherState` rekey/counter ceiling (`n < 2^64 - 1`).
pub const NOISE_MAX_NONCE: u64 = u64::MAX - 1;
/// The streaming `CipherState`'s own counter ceiling, distinct from the
/// Noise counter (`spec.md` §3: "counter < 2^47").
pub const STREAMING_MAX_COUNTER: u64 = 1 << 47;

/// Maximum Noise message length per the Noise Protocol Framework spec.
pub const NOISE_MAX_MESSAGE_LEN: usize = 65535;

//! Fixed widths and tuning constants for the nonce search.

/// Width of an encoded nonce in bytes (big-endian counter).
pub const NONCE_LEN: usize = 32;

/// Width of a SHA-256 digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Number of bits in a digest, and so the largest satisfiable difficulty.
pub const DIGEST_BITS: u32 = (DIGEST_LEN * 8) as u32;

/// Difficulty above which a search is expected to take uncomfortably long.
///
/// 20 trailing zero bits needs about a million hashes on average. The core
/// accepts anything up to `DIGEST_BITS`; drivers use this to warn callers.
pub const PRACTICAL_DIFFICULTY_LIMIT: u32 = 20;

/// Nonces scanned per batch by the unbounded search loops.
pub const DEFAULT_BATCH_SIZE: u32 = 65_536;

//! SHA256 digests over block contents and trailing-zero counting.

use sha2::{Digest, Sha256};

use crate::nonce::Nonce;
use crate::params::{DIGEST_BITS, DIGEST_LEN};

/// Single SHA256 hash.
#[inline]
pub fn sha256(data: &[u8]) -> [u8; DIGEST_LEN] {
    let hash = Sha256::digest(data);
    let mut result = [0u8; DIGEST_LEN];
    result.copy_from_slice(&hash);
    result
}

/// Digest of `prev_hash ∥ transactions ∥ nonce`.
///
/// Transactions are fed as their UTF-8 bytes, in the order given, with no
/// separators. An empty transaction list hashes `prev_hash ∥ nonce` alone.
pub fn block_digest<T: AsRef<str>>(
    prev_hash: &[u8],
    transactions: &[T],
    nonce: &Nonce,
) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(prev_hash);
    for tx in transactions {
        hasher.update(tx.as_ref().as_bytes());
    }
    hasher.update(nonce.as_bytes());

    let mut result = [0u8; DIGEST_LEN];
    result.copy_from_slice(&hasher.finalize());
    result
}

/// Count trailing zero bits of a digest.
///
/// The digest is read as one bit string, most significant bit first within
/// each byte and bytes in order, so the trailing bits are the low bits of the
/// last byte, then the byte before it, and so on.
pub fn count_trailing_zeros(hash: &[u8; DIGEST_LEN]) -> u32 {
    let mut zeros = 0u32;
    for byte in hash.iter().rev() {
        if *byte == 0 {
            zeros += 8;
        } else {
            zeros += byte.trailing_zeros();
            break;
        }
    }
    debug_assert!(zeros <= DIGEST_BITS);
    zeros
}

/// Convert a digest to lowercase hex, in byte order.
pub fn hash_to_hex(hash: &[u8; DIGEST_LEN]) -> alloc::string::String {
    hex::encode(hash)
}

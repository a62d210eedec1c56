//! Brute-force nonce search.
//!
//! Counters are scanned in strictly increasing order from the starting point,
//! so the first hit is always the smallest satisfying nonce. Batches let a
//! caller interleave the search with other work and resume exactly where the
//! previous batch stopped.

use crate::difficulty::Difficulty;
use crate::error::MineError;
use crate::hash::block_digest;
use crate::nonce::Nonce;
use crate::params::{DEFAULT_BATCH_SIZE, DIGEST_LEN};

/// Result of a mining batch operation.
#[derive(Debug, Clone)]
pub struct MiningResult {
    /// The nonce that met the difficulty (if found).
    pub nonce: Option<Nonce>,
    /// The resulting digest (if found).
    pub hash: Option<[u8; DIGEST_LEN]>,
    /// Number of hashes computed in this batch.
    pub hashes_computed: u64,
    /// First counter this batch did not try, or the winning nonce when found.
    pub next: Nonce,
}

impl MiningResult {
    /// Create a result indicating no match found.
    pub fn not_found(hashes: u64, next: Nonce) -> Self {
        MiningResult {
            nonce: None,
            hash: None,
            hashes_computed: hashes,
            next,
        }
    }

    /// Create a result for a satisfying nonce.
    pub fn found(nonce: Nonce, hash: [u8; DIGEST_LEN], hashes: u64) -> Self {
        MiningResult {
            nonce: Some(nonce),
            hash: Some(hash),
            hashes_computed: hashes,
            next: nonce,
        }
    }

    /// Whether this batch found a nonce.
    pub fn is_found(&self) -> bool {
        self.nonce.is_some()
    }
}

/// A completed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Smallest satisfying nonce.
    pub nonce: Nonce,
    /// Digest produced by `nonce`.
    pub hash: [u8; DIGEST_LEN],
    /// Total digests computed, including the winning one.
    pub attempts: u64,
}

/// The immutable inputs of one search.
#[derive(Debug, Clone)]
pub struct SearchJob<'a, T> {
    difficulty: Difficulty,
    prev_hash: &'a [u8],
    transactions: &'a [T],
}

impl<'a, T: AsRef<str>> SearchJob<'a, T> {
    /// Bind a difficulty, previous hash and ordered transactions.
    pub fn new(difficulty: Difficulty, prev_hash: &'a [u8], transactions: &'a [T]) -> Self {
        SearchJob {
            difficulty,
            prev_hash,
            transactions,
        }
    }

    /// Required trailing zero bits.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Digest for a candidate nonce.
    #[inline]
    pub fn digest(&self, nonce: &Nonce) -> [u8; DIGEST_LEN] {
        block_digest(self.prev_hash, self.transactions, nonce)
    }

    /// Check whether `nonce` meets the difficulty for these inputs.
    pub fn verify(&self, nonce: &Nonce) -> bool {
        self.difficulty.is_met_by(&self.digest(nonce))
    }

    /// Try `count` consecutive counters starting at `start`.
    ///
    /// Stops at the first hit. Fails with `CounterOverflow` only when the
    /// last encodable counter was tried without success.
    pub fn mine_batch(&self, start: Nonce, count: u32) -> Result<MiningResult, MineError> {
        let mut nonce = start;
        let mut hashes = 0u64;

        for _ in 0..count {
            let hash = self.digest(&nonce);
            hashes += 1;

            if self.difficulty.is_met_by(&hash) {
                return Ok(MiningResult::found(nonce, hash, hashes));
            }

            nonce = nonce.checked_increment().ok_or(MineError::CounterOverflow)?;
        }

        Ok(MiningResult::not_found(hashes, nonce))
    }

    /// Search from counter 0 until a nonce is found.
    ///
    /// Runs unbounded; the only way out without a nonce is `CounterOverflow`.
    pub fn mine(&self) -> Result<Solution, MineError> {
        self.search(None)
    }

    /// Search from counter 0, giving up after `max_attempts` digests.
    pub fn mine_bounded(&self, max_attempts: u64) -> Result<Solution, MineError> {
        self.search(Some(max_attempts))
    }

    fn search(&self, max_attempts: Option<u64>) -> Result<Solution, MineError> {
        let mut start = Nonce::ZERO;
        let mut attempts = 0u64;

        loop {
            let batch = match max_attempts {
                Some(max) => {
                    let remaining = max - attempts;
                    if remaining == 0 {
                        return Err(MineError::AttemptsExhausted { attempts: max });
                    }
                    remaining.min(DEFAULT_BATCH_SIZE as u64) as u32
                }
                None => DEFAULT_BATCH_SIZE,
            };

            let result = self.mine_batch(start, batch)?;
            attempts += result.hashes_computed;

            if let (Some(nonce), Some(hash)) = (result.nonce, result.hash) {
                return Ok(Solution {
                    nonce,
                    hash,
                    attempts,
                });
            }
            start = result.next;
        }
    }
}

/// Find the smallest nonce whose block digest has `k` trailing zero bits.
///
/// `k` is validated before any hashing: negative values fail with
/// `InvalidDifficulty`, values past the digest width with
/// `UnsatisfiableDifficulty`.
pub fn mine_block<T: AsRef<str>>(
    k: i64,
    prev_hash: &[u8],
    transactions: &[T],
) -> Result<Nonce, MineError> {
    let difficulty = Difficulty::new(k)?;
    let solution = SearchJob::new(difficulty, prev_hash, transactions).mine()?;
    Ok(solution.nonce)
}

/// Check a nonce previously returned by `mine_block`.
pub fn verify_nonce<T: AsRef<str>>(
    k: i64,
    prev_hash: &[u8],
    transactions: &[T],
    nonce: &Nonce,
) -> Result<bool, MineError> {
    let difficulty = Difficulty::new(k)?;
    Ok(SearchJob::new(difficulty, prev_hash, transactions).verify(nonce))
}

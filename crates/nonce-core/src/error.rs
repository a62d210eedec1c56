//! Error type for nonce search operations.

use crate::params::DIGEST_BITS;

/// Reasons a nonce search can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MineError {
    /// Difficulty is negative or not an integer.
    InvalidDifficulty,
    /// Difficulty asks for more zero bits than a digest has.
    UnsatisfiableDifficulty(u32),
    /// The 32-byte counter ran past its maximum value.
    CounterOverflow,
    /// A bounded search gave up before finding a nonce.
    AttemptsExhausted { attempts: u64 },
}

impl core::fmt::Display for MineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MineError::InvalidDifficulty => {
                write!(f, "mine_block expects a non-negative integer difficulty")
            }
            MineError::UnsatisfiableDifficulty(k) => write!(
                f,
                "Difficulty {} exceeds the {} bits of a digest",
                k, DIGEST_BITS
            ),
            MineError::CounterOverflow => write!(f, "Nonce counter exhausted its 32-byte range"),
            MineError::AttemptsExhausted { attempts } => {
                write!(f, "No nonce found after {} attempts", attempts)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MineError {}

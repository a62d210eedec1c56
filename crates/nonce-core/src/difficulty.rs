//! Trailing-zero difficulty and related utilities.

use crate::error::MineError;
use crate::hash::count_trailing_zeros;
use crate::params::{DIGEST_BITS, DIGEST_LEN, PRACTICAL_DIFFICULTY_LIMIT};

/// Required number of trailing zero bits in a block digest.
///
/// Always within `0..=DIGEST_BITS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Difficulty(u32);

impl Difficulty {
    /// Difficulty 0, met by every digest.
    pub const ZERO: Difficulty = Difficulty(0);

    /// Validate a caller-supplied difficulty.
    pub fn new(k: i64) -> Result<Self, MineError> {
        if k < 0 {
            return Err(MineError::InvalidDifficulty);
        }
        if k > DIGEST_BITS as i64 {
            return Err(MineError::UnsatisfiableDifficulty(
                k.min(u32::MAX as i64) as u32,
            ));
        }
        Ok(Difficulty(k as u32))
    }

    /// Number of trailing zero bits required.
    #[inline]
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Check whether a digest carries at least `k` trailing zero bits.
    #[inline]
    pub fn is_met_by(&self, hash: &[u8; DIGEST_LEN]) -> bool {
        self.0 == 0 || count_trailing_zeros(hash) >= self.0
    }

    /// Average number of hashes needed to meet this difficulty, 2^k.
    pub fn expected_hashes(&self) -> f64 {
        // Build 2^k straight from the IEEE-754 exponent; k <= 256 is in range.
        f64::from_bits((1023 + self.0 as u64) << 52)
    }

    /// Whether this difficulty is past the point drivers should warn about.
    pub fn exceeds_practical_limit(&self) -> bool {
        self.0 > PRACTICAL_DIFFICULTY_LIMIT
    }
}

impl TryFrom<i64> for Difficulty {
    type Error = MineError;

    fn try_from(k: i64) -> Result<Self, Self::Error> {
        Difficulty::new(k)
    }
}

impl TryFrom<f64> for Difficulty {
    type Error = MineError;

    /// Accepts only finite, non-negative, integral values.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value < 0.0 {
            return Err(MineError::InvalidDifficulty);
        }
        if value > DIGEST_BITS as f64 {
            if value < u32::MAX as f64 && (value as u32) as f64 != value {
                return Err(MineError::InvalidDifficulty);
            }
            return Err(MineError::UnsatisfiableDifficulty(
                value.min(u32::MAX as f64) as u32,
            ));
        }
        let k = value as i64;
        if k as f64 != value {
            return Err(MineError::InvalidDifficulty);
        }
        Difficulty::new(k)
    }
}

impl core::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} bits", self.0)
    }
}

/// Format a hash count for display (e.g., "1.05M").
pub fn format_hash_count(count: f64) -> alloc::string::String {
    if count >= 1e15 {
        alloc::format!("{:.2}P", count / 1e15)
    } else if count >= 1e12 {
        alloc::format!("{:.2}T", count / 1e12)
    } else if count >= 1e9 {
        alloc::format!("{:.2}G", count / 1e9)
    } else if count >= 1e6 {
        alloc::format!("{:.2}M", count / 1e6)
    } else if count >= 1e3 {
        alloc::format!("{:.2}K", count / 1e3)
    } else {
        alloc::format!("{:.0}", count)
    }
}

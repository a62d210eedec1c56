//! Fixed-width nonce counter.
//!
//! A nonce is the 32-byte big-endian encoding of a non-negative counter. The
//! width never depends on the counter's magnitude, so a given counter always
//! hashes identically.

use alloc::string::String;

use crate::params::NONCE_LEN;

/// 32-byte big-endian nonce.
///
/// Ordering follows the counter value since the bytes are big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    /// Counter value 0.
    pub const ZERO: Nonce = Nonce([0u8; NONCE_LEN]);

    /// Largest encodable counter (all bytes 0xFF).
    pub const MAX: Nonce = Nonce([0xFF; NONCE_LEN]);

    /// Wrap raw nonce bytes.
    pub const fn from_bytes(bytes: [u8; NONCE_LEN]) -> Self {
        Nonce(bytes)
    }

    /// Encode a counter into the low 16 bytes of the nonce.
    pub fn from_counter(counter: u128) -> Self {
        let mut bytes = [0u8; NONCE_LEN];
        bytes[NONCE_LEN - 16..].copy_from_slice(&counter.to_be_bytes());
        Nonce(bytes)
    }

    /// Parse a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; NONCE_LEN];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Nonce(bytes))
    }

    /// The encoded bytes, as fed to the hasher.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }

    /// Counter value, if it fits in 128 bits.
    pub fn to_counter(&self) -> Option<u128> {
        let (high, low) = self.0.split_at(NONCE_LEN - 16);
        if high.iter().any(|b| *b != 0) {
            return None;
        }
        let mut buf = [0u8; 16];
        buf.copy_from_slice(low);
        Some(u128::from_be_bytes(buf))
    }

    /// Next counter value, or `None` once the 32 bytes are exhausted.
    #[inline]
    pub fn checked_increment(&self) -> Option<Nonce> {
        let mut bytes = self.0;
        // Add one from the least significant byte, carrying upward.
        for byte in bytes.iter_mut().rev() {
            if *byte == 0xFF {
                *byte = 0;
            } else {
                *byte += 1;
                return Some(Nonce(bytes));
            }
        }
        None
    }

    /// Counter plus `n`, or `None` on overflow past 32 bytes.
    pub fn checked_add(&self, n: u64) -> Option<Nonce> {
        let mut bytes = self.0;
        let mut carry = n as u128;
        for byte in bytes.iter_mut().rev() {
            if carry == 0 {
                break;
            }
            let sum = *byte as u128 + (carry & 0xFF);
            *byte = sum as u8;
            carry = (carry >> 8) + (sum >> 8);
        }
        if carry != 0 {
            return None;
        }
        Some(Nonce(bytes))
    }

    /// Lowercase hex encoding of the nonce bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; NONCE_LEN]> for Nonce {
    fn from(bytes: [u8; NONCE_LEN]) -> Self {
        Nonce(bytes)
    }
}

impl AsRef<[u8]> for Nonce {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl core::fmt::Display for Nonce {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

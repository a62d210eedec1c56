//! Trailing-zero proof-of-work nonce search.
//!
//! This crate provides pure Rust implementations of:
//! - Fixed-width 32-byte big-endian nonce counters
//! - SHA256 digests over a previous hash, ordered transactions and a nonce
//! - Trailing-zero difficulty validation and checking
//! - Sequential and batched searches for the smallest satisfying nonce

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod difficulty;
pub mod error;
pub mod hash;
pub mod miner;
pub mod nonce;
pub mod params;

pub use difficulty::{format_hash_count, Difficulty};
pub use error::MineError;
pub use hash::{block_digest, count_trailing_zeros, hash_to_hex, sha256};
pub use miner::{mine_block, verify_nonce, MiningResult, SearchJob, Solution};
pub use nonce::Nonce;

//! WebAssembly bindings for the trailing-zero nonce miner.
//!
//! This crate provides JavaScript-accessible APIs for:
//! - One-shot nonce search and verification
//! - Incremental, batched mining with statistics
//! - Sampling transactions from newline-separated text

use nonce_core::{Nonce, SearchJob};
use wasm_bindgen::prelude::*;

pub mod error;
pub mod lines;
pub mod miner;
pub mod state;

// Re-export main types for JS access
pub use error::BindingError;
pub use lines::random_lines;
pub use miner::Miner;

use miner::{parse_difficulty, parse_prev_hash};

/// Initialize the WASM module with better panic messages.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Find the smallest nonce meeting `difficulty`, returned as 64-char hex.
///
/// Blocks until a nonce is found; use `Miner` to search in batches.
#[wasm_bindgen]
pub fn mine_block(
    difficulty: f64,
    prev_hash: &str,
    transactions: Vec<String>,
) -> Result<String, JsValue> {
    Ok(mine_hex(difficulty, prev_hash, &transactions)?)
}

/// Check a hex nonce against the given inputs.
#[wasm_bindgen]
pub fn verify_nonce(
    difficulty: f64,
    prev_hash: &str,
    transactions: Vec<String>,
    nonce: &str,
) -> Result<bool, JsValue> {
    Ok(verify_hex(difficulty, prev_hash, &transactions, nonce)?)
}

/// Log to the browser console.
#[wasm_bindgen]
pub fn console_log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

pub fn mine_hex(
    difficulty: f64,
    prev_hash: &str,
    transactions: &[String],
) -> Result<String, BindingError> {
    let difficulty = parse_difficulty(difficulty)?;
    let prev_hash = parse_prev_hash(prev_hash)?;
    let solution = SearchJob::new(difficulty, &prev_hash, transactions).mine()?;
    Ok(solution.nonce.to_hex())
}

pub fn verify_hex(
    difficulty: f64,
    prev_hash: &str,
    transactions: &[String],
    nonce: &str,
) -> Result<bool, BindingError> {
    let difficulty = parse_difficulty(difficulty)?;
    let prev_hash = parse_prev_hash(prev_hash)?;
    let nonce = Nonce::from_hex(nonce.trim()).map_err(|reason| BindingError::InvalidHex {
        field: "nonce",
        reason,
    })?;
    Ok(SearchJob::new(difficulty, &prev_hash, transactions).verify(&nonce))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txs() -> Vec<String> {
        vec![String::from("tx1"), String::from("tx2")]
    }

    #[test]
    fn test_mine_hex() {
        let nonce = mine_hex(8.0, &"00".repeat(32), &txs()).unwrap();
        assert_eq!(nonce, format!("{}01cf", "0".repeat(60)));
        assert!(verify_hex(8.0, &"00".repeat(32), &txs(), &nonce).unwrap());
        assert!(!verify_hex(8.0, &"00".repeat(32), &txs(), &"00".repeat(32)).unwrap());
    }

    #[test]
    fn test_mine_hex_rejects_bad_input() {
        assert!(matches!(
            mine_hex(-2.0, &"00".repeat(32), &txs()),
            Err(BindingError::InvalidDifficulty(_))
        ));
        assert!(matches!(
            mine_hex(3.25, &"00".repeat(32), &txs()),
            Err(BindingError::InvalidDifficulty(_))
        ));
        assert!(matches!(
            mine_hex(4.0, "not hex", &txs()),
            Err(BindingError::InvalidHex { .. })
        ));
        assert!(matches!(
            verify_hex(4.0, "", &txs(), "01cf"),
            Err(BindingError::InvalidHex { field: "nonce", .. })
        ));
    }

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}

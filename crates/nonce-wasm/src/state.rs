//! Search state handed to JavaScript.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Mining statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MiningStats {
    /// Total hashes computed.
    pub total_hashes: u64,
    /// Current hash rate (hashes per second).
    pub hash_rate: f64,
    /// Number of batches run.
    pub batches: u64,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: f64,
    /// Next counter to try, as nonce hex.
    pub current_nonce: String,
    /// Winning nonce hex, once found.
    pub nonce_found: Option<String>,
    /// Trailing zero bits of the winning digest.
    pub trailing_zeros: u32,
}

impl MiningStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update hash rate based on elapsed time.
    pub fn update_hash_rate(&mut self) {
        if self.elapsed_ms > 0.0 {
            self.hash_rate = (self.total_hashes as f64) / (self.elapsed_ms / 1000.0);
        }
    }

    /// Format hash rate for display.
    pub fn format_hash_rate(&self) -> String {
        if self.hash_rate >= 1_000_000_000.0 {
            format!("{:.2} GH/s", self.hash_rate / 1_000_000_000.0)
        } else if self.hash_rate >= 1_000_000.0 {
            format!("{:.2} MH/s", self.hash_rate / 1_000_000.0)
        } else if self.hash_rate >= 1_000.0 {
            format!("{:.2} KH/s", self.hash_rate / 1_000.0)
        } else {
            format!("{:.2} H/s", self.hash_rate)
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Convert to JS value.
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {:?}", e)))
    }
}

/// Parameters of the current search, for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchInfo {
    /// Required trailing zero bits.
    pub difficulty: u32,
    /// Previous block hash hex.
    pub prev_hash: String,
    /// Number of transactions in the block.
    pub transactions: usize,
    /// Average hashes needed, 2^difficulty.
    pub expected_hashes: f64,
    /// Formatted expected hash count.
    pub expected_hashes_display: String,
    /// Whether the difficulty is past the practical limit.
    pub slow: bool,
}

impl SearchInfo {
    /// Convert to JS value.
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {:?}", e)))
    }
}

/// Result of a mining batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MiningResultInfo {
    /// Whether a nonce has been found.
    pub found: bool,
    /// The winning nonce hex (if found).
    pub nonce: Option<String>,
    /// The winning digest hex (if found).
    pub hash: Option<String>,
    /// Trailing zero bits of the winning digest.
    pub trailing_zeros: u32,
    /// Hashes computed in this batch.
    pub hashes_computed: u64,
    /// Next counter the following batch will try.
    pub next_nonce: String,
}

impl MiningResultInfo {
    /// Convert to JS value.
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_rate() {
        let mut stats = MiningStats::new();
        stats.total_hashes = 5_000;
        stats.update_hash_rate();
        assert_eq!(stats.hash_rate, 0.0);

        stats.elapsed_ms = 2_000.0;
        stats.update_hash_rate();
        assert_eq!(stats.hash_rate, 2_500.0);
        assert_eq!(stats.format_hash_rate(), "2.50 KH/s");

        stats.hash_rate = 12.0;
        assert_eq!(stats.format_hash_rate(), "12.00 H/s");
        stats.hash_rate = 3_400_000.0;
        assert_eq!(stats.format_hash_rate(), "3.40 MH/s");
    }

    #[test]
    fn test_stats_json() {
        let stats = MiningStats {
            total_hashes: 464,
            nonce_found: Some(format!("{}01cf", "00".repeat(30))),
            ..MiningStats::default()
        };
        let json = stats.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_hashes"], 464);
        assert_eq!(value["trailing_zeros"], 0);
        assert!(value["nonce_found"].is_string());
    }
}

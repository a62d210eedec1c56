//! Incremental mining controller for the WASM miner.
//!
//! The browser cannot block on an unbounded search, so the controller runs it
//! in batches. Each batch resumes at the first untried counter, which keeps
//! the final nonce identical to a one-shot search.

use nonce_core::{count_trailing_zeros, format_hash_count, Difficulty, MineError, Nonce, SearchJob};
use wasm_bindgen::prelude::*;

use crate::console_log;
use crate::error::BindingError;
use crate::state::{MiningResultInfo, MiningStats, SearchInfo};

/// Validate a JS number as a difficulty.
pub fn parse_difficulty(value: f64) -> Result<Difficulty, BindingError> {
    Difficulty::try_from(value).map_err(|e| match e {
        MineError::InvalidDifficulty => BindingError::InvalidDifficulty(value),
        other => BindingError::Mine(other),
    })
}

/// Decode the previous block hash. Any length is accepted.
pub fn parse_prev_hash(prev_hash: &str) -> Result<Vec<u8>, BindingError> {
    hex::decode(prev_hash.trim()).map_err(|reason| BindingError::InvalidHex {
        field: "previous hash",
        reason,
    })
}

/// The main mining controller.
#[wasm_bindgen]
pub struct Miner {
    /// Required trailing zero bits.
    difficulty: Difficulty,
    /// Previous block hash bytes.
    prev_hash: Vec<u8>,
    /// Ordered transactions.
    transactions: Vec<String>,
    /// Mining statistics.
    stats: MiningStats,
    /// Start time of mining.
    start_time: f64,
    /// Whether mining is active.
    is_mining: bool,
    /// First counter not yet tried.
    next_nonce: Nonce,
    /// Winning batch, once found.
    found: Option<MiningResultInfo>,
}

impl Miner {
    /// Build a controller from JS-shaped inputs.
    pub fn create(
        difficulty: f64,
        prev_hash: &str,
        transactions: Vec<String>,
    ) -> Result<Miner, BindingError> {
        let difficulty = parse_difficulty(difficulty)?;
        let prev_hash = parse_prev_hash(prev_hash)?;

        let mut stats = MiningStats::new();
        stats.current_nonce = Nonce::ZERO.to_hex();

        Ok(Miner {
            difficulty,
            prev_hash,
            transactions,
            stats,
            start_time: 0.0,
            is_mining: false,
            next_nonce: Nonce::ZERO,
            found: None,
        })
    }

    /// Scan the next `batch_size` counters.
    ///
    /// Once a nonce is found, further calls repeat it without hashing.
    pub fn run_batch(&mut self, batch_size: u32) -> Result<MiningResultInfo, BindingError> {
        if let Some(found) = &self.found {
            return Ok(MiningResultInfo {
                hashes_computed: 0,
                ..found.clone()
            });
        }

        let job = SearchJob::new(self.difficulty, &self.prev_hash, &self.transactions);
        let result = job.mine_batch(self.next_nonce, batch_size)?;

        self.stats.total_hashes += result.hashes_computed;
        self.stats.batches = self.stats.batches.saturating_add(1);
        self.next_nonce = result.next;
        self.stats.current_nonce = result.next.to_hex();

        let mut info = MiningResultInfo {
            hashes_computed: result.hashes_computed,
            next_nonce: result.next.to_hex(),
            ..MiningResultInfo::default()
        };

        if let (Some(nonce), Some(hash)) = (result.nonce, result.hash) {
            let trailing_zeros = count_trailing_zeros(&hash);
            info.found = true;
            info.nonce = Some(nonce.to_hex());
            info.hash = Some(hex::encode(hash));
            info.trailing_zeros = trailing_zeros;

            self.stats.nonce_found = info.nonce.clone();
            self.stats.trailing_zeros = trailing_zeros;
            self.is_mining = false;
            self.found = Some(info.clone());
        }

        Ok(info)
    }

    /// Describe the search parameters.
    pub fn info(&self) -> SearchInfo {
        let expected = self.difficulty.expected_hashes();
        SearchInfo {
            difficulty: self.difficulty.bits(),
            prev_hash: hex::encode(&self.prev_hash),
            transactions: self.transactions.len(),
            expected_hashes: expected,
            expected_hashes_display: format_hash_count(expected),
            slow: self.difficulty.exceeds_practical_limit(),
        }
    }

    /// Winning nonce, once found.
    pub fn found_nonce(&self) -> Option<String> {
        self.found.as_ref().and_then(|f| f.nonce.clone())
    }

    fn clear(&mut self) {
        self.stats = MiningStats::new();
        self.stats.current_nonce = Nonce::ZERO.to_hex();
        self.next_nonce = Nonce::ZERO;
        self.start_time = 0.0;
        self.is_mining = false;
        self.found = None;
    }
}

#[wasm_bindgen]
impl Miner {
    /// Create a new miner instance.
    ///
    /// # Arguments
    /// * `difficulty` - Required trailing zero bits (a non-negative integer)
    /// * `prev_hash` - Previous block hash as hex
    /// * `transactions` - Ordered transaction strings
    #[wasm_bindgen(constructor)]
    pub fn new(
        difficulty: f64,
        prev_hash: &str,
        transactions: Vec<String>,
    ) -> Result<Miner, JsValue> {
        let miner = Miner::create(difficulty, prev_hash, transactions)?;

        let info = miner.info();
        if info.slow {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "Difficulty {} needs about {} hashes; expect a long search",
                info.difficulty, info.expected_hashes_display
            )));
        }

        Ok(miner)
    }

    /// Mine a batch of nonces.
    ///
    /// # Arguments
    /// * `batch_size` - Number of nonces to try in this batch
    ///
    /// # Returns
    /// Batch result with the nonce if one was found.
    #[wasm_bindgen]
    pub fn mine_batch(&mut self, batch_size: u32) -> Result<JsValue, JsValue> {
        let was_found = self.found.is_some();
        let info = self.run_batch(batch_size)?;

        // Update elapsed time
        if self.start_time > 0.0 {
            let now = js_sys::Date::now();
            self.stats.elapsed_ms = now - self.start_time;
            self.stats.update_hash_rate();
        }

        if info.found && !was_found {
            console_log(&format!(
                "Nonce {} found after {} hashes ({} trailing zero bits)",
                info.nonce.as_deref().unwrap_or_default(),
                self.stats.total_hashes,
                info.trailing_zeros
            ));
        }

        info.to_js()
    }

    /// Start mining.
    #[wasm_bindgen]
    pub fn start_mining(&mut self) {
        self.is_mining = true;
        self.start_time = js_sys::Date::now();
    }

    /// Stop mining.
    #[wasm_bindgen]
    pub fn stop_mining(&mut self) {
        self.is_mining = false;
    }

    /// Check if mining is active.
    #[wasm_bindgen(getter)]
    pub fn is_mining(&self) -> bool {
        self.is_mining
    }

    /// Get current mining statistics.
    #[wasm_bindgen]
    pub fn get_stats(&self) -> Result<JsValue, JsValue> {
        self.stats.to_js()
    }

    /// Get current mining statistics as JSON.
    #[wasm_bindgen]
    pub fn get_stats_json(&self) -> Result<String, JsValue> {
        self.stats
            .to_json()
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Get the formatted hash rate.
    #[wasm_bindgen]
    pub fn get_hash_rate_display(&self) -> String {
        self.stats.format_hash_rate()
    }

    /// Get the search parameters.
    #[wasm_bindgen]
    pub fn search_info(&self) -> Result<JsValue, JsValue> {
        self.info().to_js()
    }

    /// The winning nonce as hex, if found.
    #[wasm_bindgen(getter)]
    pub fn nonce(&self) -> Option<String> {
        self.found_nonce()
    }

    /// Restart the search from counter 0.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_prev() -> String {
        "00".repeat(32)
    }

    fn txs() -> Vec<String> {
        vec![String::from("tx1"), String::from("tx2")]
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!(parse_difficulty(8.0).unwrap().bits(), 8);
        assert!(matches!(
            parse_difficulty(-1.0),
            Err(BindingError::InvalidDifficulty(_))
        ));
        assert!(matches!(
            parse_difficulty(1.5),
            Err(BindingError::InvalidDifficulty(_))
        ));
        assert!(matches!(
            parse_difficulty(f64::NAN),
            Err(BindingError::InvalidDifficulty(_))
        ));
        assert!(matches!(
            parse_difficulty(512.0),
            Err(BindingError::Mine(MineError::UnsatisfiableDifficulty(512)))
        ));
    }

    #[test]
    fn test_parse_prev_hash() {
        assert_eq!(parse_prev_hash(&zero_prev()).unwrap(), vec![0u8; 32]);
        assert_eq!(parse_prev_hash("abcd").unwrap(), vec![0xab, 0xcd]);
        assert!(parse_prev_hash("").unwrap().is_empty());
        assert!(matches!(
            parse_prev_hash("xyz"),
            Err(BindingError::InvalidHex { .. })
        ));
    }

    #[test]
    fn test_batches_reach_smallest_nonce() {
        let mut miner = Miner::create(8.0, &zero_prev(), txs()).unwrap();

        let mut batches = 0;
        let info = loop {
            let info = miner.run_batch(50).unwrap();
            batches += 1;
            if info.found {
                break info;
            }
        };

        // Counter 463 is the tenth batch of 50.
        assert_eq!(batches, 10);
        assert_eq!(info.hashes_computed, 14);
        assert!(info.nonce.as_deref().unwrap().ends_with("01cf"));
        assert!(info.hash.as_deref().unwrap().ends_with("00"));
        assert!(info.trailing_zeros >= 8);
        assert_eq!(miner.stats.total_hashes, 464);
        assert_eq!(miner.stats.batches, 10);
        assert_eq!(miner.found_nonce(), info.nonce);
    }

    #[test]
    fn test_found_result_is_sticky() {
        let mut miner = Miner::create(0.0, &zero_prev(), txs()).unwrap();
        let first = miner.run_batch(10).unwrap();
        assert!(first.found);
        assert_eq!(first.nonce.as_deref(), Some(Nonce::ZERO.to_hex().as_str()));

        let again = miner.run_batch(10).unwrap();
        assert!(again.found);
        assert_eq!(again.hashes_computed, 0);
        assert_eq!(again.nonce, first.nonce);
        assert_eq!(miner.stats.total_hashes, 1);
    }

    #[test]
    fn test_batch_counter_saturates() {
        let mut miner = Miner::create(8.0, &zero_prev(), txs()).unwrap();
        miner.stats.batches = u64::MAX;
        miner.run_batch(10).unwrap();
        assert_eq!(miner.stats.batches, u64::MAX);
        assert_eq!(miner.stats.total_hashes, 10);
    }

    #[test]
    fn test_reset_restarts_search() {
        let mut miner = Miner::create(4.0, &zero_prev(), txs()).unwrap();
        while !miner.run_batch(5).unwrap().found {}
        assert!(miner.found_nonce().is_some());

        miner.clear();
        assert!(miner.found_nonce().is_none());
        assert_eq!(miner.stats.total_hashes, 0);
        assert_eq!(miner.next_nonce, Nonce::ZERO);
    }

    #[test]
    fn test_info() {
        let miner = Miner::create(21.0, &zero_prev(), txs()).unwrap();
        let info = miner.info();
        assert_eq!(info.difficulty, 21);
        assert_eq!(info.transactions, 2);
        assert_eq!(info.expected_hashes, 2_097_152.0);
        assert_eq!(info.expected_hashes_display, "2.10M");
        assert!(info.slow);
    }
}

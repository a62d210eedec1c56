//! Browser-side checks of the JS-facing API.

#![cfg(target_arch = "wasm32")]

use nonce_wasm::{mine_block, random_lines, verify_nonce, Miner};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn txs() -> Vec<String> {
    vec!["tx1".to_string(), "tx2".to_string()]
}

#[wasm_bindgen_test]
fn mines_sample_scenario() {
    let prev = "00".repeat(32);
    let nonce = mine_block(8.0, &prev, txs()).unwrap();
    assert!(nonce.ends_with("01cf"));
    assert!(verify_nonce(8.0, &prev, txs(), &nonce).unwrap());
}

#[wasm_bindgen_test]
fn invalid_difficulty_is_an_error() {
    let err = mine_block(-1.0, &"00".repeat(32), txs()).unwrap_err();
    let message = err.as_string().unwrap();
    assert!(message.contains("non-negative integer"));
}

#[wasm_bindgen_test]
fn miner_reports_stats() {
    let mut miner = Miner::new(4.0, &"00".repeat(32), txs()).unwrap();
    miner.start_mining();
    let mut result = JsValue::NULL;
    while miner.nonce().is_none() {
        result = miner.mine_batch(8).unwrap();
    }
    assert!(result.is_object());
    assert!(!miner.is_mining());
    assert!(miner.get_stats_json().unwrap().contains("\"total_hashes\":24"));
}

#[wasm_bindgen_test]
fn samples_lines() {
    let picked = random_lines("a\nb\nc", 5).unwrap();
    assert_eq!(picked.len(), 5);
}

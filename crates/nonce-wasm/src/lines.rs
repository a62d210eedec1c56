//! Transaction line supplier.
//!
//! Turns a block of text into candidate transactions and draws a random
//! selection of them for a block.

use rand::seq::SliceRandom;
use wasm_bindgen::prelude::*;

use crate::error::BindingError;

/// Split text into transactions, one per line, with surrounding whitespace
/// removed. Blank lines are kept as empty transactions.
pub fn parse_lines(text: &str) -> Vec<String> {
    text.lines().map(|line| line.trim().to_string()).collect()
}

/// Draw `quantity` lines uniformly at random, with replacement.
pub fn sample_lines(lines: &[String], quantity: usize) -> Result<Vec<String>, BindingError> {
    if quantity == 0 {
        return Ok(Vec::new());
    }
    if lines.is_empty() {
        return Err(BindingError::EmptySource);
    }

    let mut rng = rand::thread_rng();
    let picked = (0..quantity)
        .filter_map(|_| lines.choose(&mut rng).cloned())
        .collect();
    Ok(picked)
}

/// Pick `quantity` random transactions from newline-separated text.
#[wasm_bindgen]
pub fn random_lines(text: &str, quantity: usize) -> Result<Vec<String>, JsValue> {
    let lines = parse_lines(text);
    Ok(sample_lines(&lines, quantity)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines_strips() {
        let lines = parse_lines("  alice pays bob 5 \n\tcarol pays dave 2\r\n\nlast");
        assert_eq!(
            lines,
            vec!["alice pays bob 5", "carol pays dave 2", "", "last"]
        );
    }

    #[test]
    fn test_parse_lines_empty() {
        assert!(parse_lines("").is_empty());
    }

    #[test]
    fn test_sample_lines_draws_from_source() {
        let lines = parse_lines("a\nb\nc\nd");
        let picked = sample_lines(&lines, 50).unwrap();
        assert_eq!(picked.len(), 50);
        assert!(picked.iter().all(|p| lines.contains(p)));
    }

    #[test]
    fn test_sample_lines_single_source() {
        let lines = vec![String::from("only")];
        assert_eq!(sample_lines(&lines, 3).unwrap(), vec!["only"; 3]);
    }

    #[test]
    fn test_sample_lines_edge_cases() {
        assert!(sample_lines(&[], 0).unwrap().is_empty());
        assert!(matches!(sample_lines(&[], 1), Err(BindingError::EmptySource)));
    }

    #[test]
    fn test_sample_lines_stays_in_range() {
        for len in [1usize, 2, 7, 1000] {
            let lines: Vec<String> = (0..len).map(|i| i.to_string()).collect();
            let picked = sample_lines(&lines, 100).unwrap();
            assert_eq!(picked.len(), 100);
            for p in &picked {
                assert!(p.parse::<usize>().unwrap() < len);
            }
        }
    }
}

//! Errors raised by the bindings before they reach JavaScript.

use nonce_core::MineError;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure in a JS-facing call.
#[derive(Debug, Error)]
pub enum BindingError {
    #[error("Invalid {field} hex: {reason}")]
    InvalidHex {
        field: &'static str,
        reason: hex::FromHexError,
    },

    #[error("mine_block expects a non-negative integer difficulty, got {0}")]
    InvalidDifficulty(f64),

    #[error("{0}")]
    Mine(MineError),

    #[error("No lines to sample from")]
    EmptySource,
}

impl From<MineError> for BindingError {
    fn from(err: MineError) -> Self {
        BindingError::Mine(err)
    }
}

impl From<BindingError> for JsValue {
    fn from(err: BindingError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

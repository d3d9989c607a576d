//! Saved `fetch_transactions` responses.
//!
//! Accepts the backend envelope `{ "transactions": [...] }` or a bare array of records.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::types::{RawTransaction, TransactionResponse};

/// Parse a response body into raw records
pub fn parse_response_json(text: &str) -> Result<TransactionResponse> {
    if text.trim_start().starts_with('[') {
        let transactions: Vec<RawTransaction> =
            serde_json::from_str(text).context("parsing transaction array")?;
        return Ok(TransactionResponse { transactions });
    }
    serde_json::from_str(text).context("parsing transaction response")
}

pub fn read_response_json(path: impl AsRef<Path>) -> Result<TransactionResponse> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_response_json(&text).with_context(|| format!("in {}", path.display()))
}

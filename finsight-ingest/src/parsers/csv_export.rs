//! CSV exports of raw transaction records.
//!
//! The header row names the backend fields, with or without the leading
//! underscore and in any case:
//!   _type,_mode,_amount,_currentBalance,_transactionTimestamp,_valueDate,_narration,_reference,_transactionCategory
//! `balance`, `timestamp` and `category` are accepted as short forms.
//! Empty cells are treated as missing values.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::types::RawTransaction;

#[derive(Debug, Default)]
struct Columns {
    kind: Option<usize>,
    mode: Option<usize>,
    amount: Option<usize>,
    balance: Option<usize>,
    timestamp: Option<usize>,
    value_date: Option<usize>,
    narration: Option<usize>,
    reference: Option<usize>,
    category: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut cols = Columns::default();
        for (i, header) in headers.iter().enumerate() {
            let key: String = header
                .trim()
                .trim_start_matches('_')
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_ascii_lowercase();
            let slot = match key.as_str() {
                "type" => &mut cols.kind,
                "mode" => &mut cols.mode,
                "amount" => &mut cols.amount,
                "currentbalance" | "balance" => &mut cols.balance,
                "transactiontimestamp" | "timestamp" => &mut cols.timestamp,
                "valuedate" => &mut cols.value_date,
                "narration" => &mut cols.narration,
                "reference" => &mut cols.reference,
                "transactioncategory" | "category" => &mut cols.category,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(i);
            }
        }
        cols
    }
}

fn cell(record: &csv::StringRecord, col: Option<usize>) -> Option<String> {
    col.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse CSV text from any reader into raw records
pub fn parse_raw_csv<R: Read>(reader: R) -> Result<Vec<RawTransaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers().context("reading CSV header")?.clone();
    let cols = Columns::from_headers(&headers);
    if cols.kind.is_none() || cols.amount.is_none() {
        anyhow::bail!("CSV header must name at least the type and amount columns");
    }

    let mut out = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("reading CSV row {}", line + 1))?;
        if record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        out.push(RawTransaction {
            kind: cell(&record, cols.kind),
            mode: cell(&record, cols.mode),
            amount: cell(&record, cols.amount),
            current_balance: cell(&record, cols.balance),
            transaction_timestamp: cell(&record, cols.timestamp),
            value_date: cell(&record, cols.value_date),
            narration: cell(&record, cols.narration),
            reference: cell(&record, cols.reference),
            category: cell(&record, cols.category),
        });
    }

    Ok(out)
}

pub fn read_raw_csv(path: impl AsRef<Path>) -> Result<Vec<RawTransaction>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_raw_csv(file).with_context(|| format!("in {}", path.display()))
}

//! Transaction record normalizer.
//!
//! Coerces raw backend records into typed [`Transaction`] values. A record that
//! cannot be coerced is set aside with its reason; the rest of the batch is
//! unaffected and keeps its original order.

use std::str::FromStr;

use finsight_core::{Category, DayPolicy, Error, MAX_AMOUNT, Result, Transaction, TransactionKind};
use rust_decimal::Decimal;

use crate::types::RawTransaction;

/// A raw record that was excluded from aggregation
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    /// Position in the input sequence
    pub index: usize,
    pub error: Error,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    pub transactions: Vec<Transaction>,
    pub rejected: Vec<Rejected>,
}

impl NormalizedBatch {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    policy: DayPolicy,
}

impl Normalizer {
    pub fn new(policy: DayPolicy) -> Self {
        Self { policy }
    }

    /// Normalize a whole batch, never failing as a whole
    pub fn normalize(&self, records: &[RawTransaction]) -> NormalizedBatch {
        let mut batch = NormalizedBatch::default();
        for (index, raw) in records.iter().enumerate() {
            match self.normalize_record(raw) {
                Ok(txn) => batch.transactions.push(txn),
                Err(error) => batch.rejected.push(Rejected { index, error }),
            }
        }
        batch
    }

    /// Normalize one record.
    ///
    /// Fails only on a missing/unknown kind or a missing, non-numeric or
    /// negative amount. Everything else degrades to a default.
    pub fn normalize_record(&self, raw: &RawTransaction) -> Result<Transaction> {
        let kind_raw = non_empty(raw.kind.as_deref())
            .ok_or_else(|| Error::malformed("kind", "is missing"))?;
        let kind = TransactionKind::parse(kind_raw)
            .ok_or_else(|| Error::malformed("kind", format!("is not DEBIT or CREDIT: {kind_raw:?}")))?;

        let amount_raw = non_empty(raw.amount.as_deref())
            .ok_or_else(|| Error::malformed("amount", "is missing"))?;
        let amount = parse_decimal(amount_raw)
            .ok_or_else(|| Error::malformed("amount", format!("is not numeric: {amount_raw:?}")))?;

        let category = non_empty(raw.category.as_deref())
            .and_then(Category::from_label)
            .unwrap_or(Category::Uncategorized);

        let narration = raw.narration.as_deref().unwrap_or("").to_string();

        let mut txn = Transaction::new(kind, amount, narration, category)?;
        txn.balance_after = non_empty(raw.current_balance.as_deref())
            .and_then(parse_decimal)
            .filter(|b| b.abs() <= MAX_AMOUNT);
        txn.timestamp = non_empty(raw.transaction_timestamp.as_deref())
            .and_then(|s| self.policy.parse_datetime(s));
        txn.value_date = non_empty(raw.value_date.as_deref())
            .and_then(|s| self.policy.parse_date(s))
            .or_else(|| txn.timestamp.map(|t| t.date()));
        txn.mode = non_empty(raw.mode.as_deref()).map(str::to_string);
        txn.reference = non_empty(raw.reference.as_deref()).map(str::to_string);

        Ok(txn)
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Plain or scientific decimal notation
fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

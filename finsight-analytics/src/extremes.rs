//! Single-transaction extremes for the dashboard's "highest expense" card.

use chrono::NaiveDate;
use finsight_core::{Category, Transaction, TransactionKind};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub narration: String,
    pub value_date: Option<NaiveDate>,
    pub category: Category,
}

impl From<&Transaction> for TransactionSummary {
    fn from(txn: &Transaction) -> Self {
        Self {
            kind: txn.kind,
            amount: txn.amount,
            narration: txn.narration.clone(),
            value_date: txn.bucket_date(),
            category: txn.category,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionExtremes {
    /// Largest single debit
    pub highest_expense: Option<TransactionSummary>,
    /// Smallest single transaction of either kind
    pub lowest_transaction: Option<TransactionSummary>,
}

/// First-encountered wins ties in both directions
pub fn find_extremes(txns: &[Transaction]) -> TransactionExtremes {
    let mut highest: Option<&Transaction> = None;
    let mut lowest: Option<&Transaction> = None;

    for txn in txns {
        if txn.is_debit() && highest.is_none_or(|h| txn.amount > h.amount) {
            highest = Some(txn);
        }
        if lowest.is_none_or(|l| txn.amount < l.amount) {
            lowest = Some(txn);
        }
    }

    TransactionExtremes {
        highest_expense: highest.map(TransactionSummary::from),
        lowest_transaction: lowest.map(TransactionSummary::from),
    }
}

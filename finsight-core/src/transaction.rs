//! Normalized transaction types shared by ingest and analytics

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Direction of money movement. Amounts are always non-negative; the sign lives here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Debit,
    Credit,
}

impl TransactionKind {
    /// Case-insensitive parse of "DEBIT" / "CREDIT"
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("DEBIT") {
            Some(TransactionKind::Debit)
        } else if label.eq_ignore_ascii_case("CREDIT") {
            Some(TransactionKind::Credit)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Debit => "DEBIT",
            TransactionKind::Credit => "CREDIT",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spending categories assigned by the account backend.
///
/// Declaration order is the catalog order used for every per-category output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Entertainment,
    Food,
    Lifestyle,
    Education,
    Shopping,
    Ecommerce,
    Travel,
    Utilities,
    Services,
    General,
    Uncategorized,
}

impl Category {
    /// The fixed catalog, in display order
    pub const ALL: [Category; 11] = [
        Category::Entertainment,
        Category::Food,
        Category::Lifestyle,
        Category::Education,
        Category::Shopping,
        Category::Ecommerce,
        Category::Travel,
        Category::Utilities,
        Category::Services,
        Category::General,
        Category::Uncategorized,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Entertainment => "ENTERTAINMENT",
            Category::Food => "FOOD",
            Category::Lifestyle => "LIFESTYLE",
            Category::Education => "EDUCATION",
            Category::Shopping => "SHOPPING",
            Category::Ecommerce => "ECOMMERCE",
            Category::Travel => "TRAVEL",
            Category::Utilities => "UTILITIES",
            Category::Services => "SERVICES",
            Category::General => "GENERAL",
            Category::Uncategorized => "UNCATEGORIZED",
        }
    }

    /// Case-insensitive lookup of a backend category label
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Largest amount or balance magnitude a transaction may carry (10^15).
///
/// Aggregates add amounts with plain `Decimal` arithmetic; with every entry at
/// or below this ceiling a batch needs ~10^13 entries before a sum can overflow.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// One ledger entry after normalization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub kind: TransactionKind,
    /// Non-negative amount in the account currency
    pub amount: Decimal,
    /// Running balance right after this entry, when the source supplied one
    pub balance_after: Option<Decimal>,
    /// Execution time, in the reporting timezone
    pub timestamp: Option<NaiveDateTime>,
    /// Calendar day the entry is value-dated, in the reporting timezone
    pub value_date: Option<NaiveDate>,
    /// Counterparty / description text, used verbatim as a grouping key
    pub narration: String,
    pub category: Category,
    /// Payment mode reported by the bank (UPI, CARD, ...)
    pub mode: Option<String>,
    pub reference: Option<String>,
}

impl Transaction {
    /// Create a transaction, rejecting negative amounts and amounts above [`MAX_AMOUNT`]
    pub fn new(
        kind: TransactionKind,
        amount: Decimal,
        narration: impl Into<String>,
        category: Category,
    ) -> Result<Self> {
        if amount < Decimal::ZERO {
            return Err(Error::malformed("amount", format!("is negative: {amount}")));
        }
        if amount > MAX_AMOUNT {
            return Err(Error::malformed(
                "amount",
                format!("exceeds the supported maximum of {MAX_AMOUNT}: {amount}"),
            ));
        }
        Ok(Self {
            kind,
            amount,
            balance_after: None,
            timestamp: None,
            value_date: None,
            narration: narration.into(),
            category,
            mode: None,
            reference: None,
        })
    }

    pub fn with_value_date(mut self, date: NaiveDate) -> Self {
        self.value_date = Some(date);
        self
    }

    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance_after = Some(balance);
        self
    }

    pub fn is_debit(&self) -> bool {
        self.kind == TransactionKind::Debit
    }

    pub fn is_credit(&self) -> bool {
        self.kind == TransactionKind::Credit
    }

    /// Day used for time bucketing: the value date, else the timestamp's date
    pub fn bucket_date(&self) -> Option<NaiveDate> {
        self.value_date.or_else(|| self.timestamp.map(|t| t.date()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_creation() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let txn = Transaction::new(
            TransactionKind::Debit,
            Decimal::from(450),
            "SWIGGY ORDER",
            Category::Food,
        )
        .unwrap()
        .with_value_date(date)
        .with_balance(Decimal::from(12_000));

        assert!(txn.is_debit());
        assert!(!txn.is_credit());
        assert_eq!(txn.bucket_date(), Some(date));
        assert_eq!(txn.balance_after, Some(Decimal::from(12_000)));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = Transaction::new(
            TransactionKind::Credit,
            Decimal::from(-1),
            "REFUND",
            Category::General,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { field: "amount", .. }));
    }

    #[test]
    fn test_amount_ceiling() {
        assert_eq!(MAX_AMOUNT, Decimal::from(1_000_000_000_000_000i64));
        assert!(Transaction::new(TransactionKind::Debit, MAX_AMOUNT, "X", Category::General).is_ok());

        let err = Transaction::new(
            TransactionKind::Debit,
            MAX_AMOUNT + Decimal::ONE,
            "X",
            Category::General,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { field: "amount", .. }));
    }

    #[test]
    fn test_bucket_date_falls_back_to_timestamp() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        let txn = Transaction::new(TransactionKind::Credit, Decimal::ONE, "X", Category::General)
            .unwrap()
            .with_timestamp(ts);
        assert_eq!(txn.bucket_date(), Some(ts.date()));
    }

    #[test]
    fn test_kind_and_category_labels() {
        assert_eq!(TransactionKind::parse(" debit "), Some(TransactionKind::Debit));
        assert_eq!(TransactionKind::parse("CREDIT"), Some(TransactionKind::Credit));
        assert_eq!(TransactionKind::parse("REVERSAL"), None);

        assert_eq!(Category::from_label("ecommerce"), Some(Category::Ecommerce));
        assert_eq!(Category::from_label("CRYPTO"), None);
        assert_eq!(Category::ALL.len(), 11);
    }

    #[test]
    fn test_serialized_shape() {
        let txn = Transaction::new(TransactionKind::Credit, Decimal::from(50_000), "SALARY", Category::General)
            .unwrap();
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["kind"], "CREDIT");
        assert_eq!(json["category"], "GENERAL");
        assert_eq!(json["narration"], "SALARY");
        assert!(json.get("balanceAfter").is_some());
    }
}

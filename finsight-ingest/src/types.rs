use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of the backend's `fetch_transactions` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionResponse {
    #[serde(default)]
    pub transactions: Vec<RawTransaction>,
}

/// A transaction exactly as the backend sends it: every field optional, mostly strings.
///
/// Numeric and boolean JSON values are accepted and kept as their textual form;
/// coercion happens in the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(rename = "_type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(rename = "_mode", default, deserialize_with = "lenient_string")]
    pub mode: Option<String>,
    #[serde(rename = "_amount", default, deserialize_with = "lenient_string")]
    pub amount: Option<String>,
    #[serde(rename = "_currentBalance", default, deserialize_with = "lenient_string")]
    pub current_balance: Option<String>,
    #[serde(rename = "_transactionTimestamp", default, deserialize_with = "lenient_string")]
    pub transaction_timestamp: Option<String>,
    #[serde(rename = "_valueDate", default, deserialize_with = "lenient_string")]
    pub value_date: Option<String>,
    #[serde(rename = "_narration", default, deserialize_with = "lenient_string")]
    pub narration: Option<String>,
    #[serde(rename = "_reference", default, deserialize_with = "lenient_string")]
    pub reference: Option<String>,
    #[serde(rename = "_transactionCategory", default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let json = r#"{
            "_type": "DEBIT",
            "_mode": "UPI",
            "_amount": "450.00",
            "_currentBalance": "12000.50",
            "_transactionTimestamp": "2024-01-05T10:15:00+05:30",
            "_valueDate": "2024-01-05",
            "_narration": "SWIGGY",
            "_reference": "0042",
            "_transactionCategory": "FOOD"
        }"#;
        let raw: RawTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(raw.kind.as_deref(), Some("DEBIT"));
        assert_eq!(raw.amount.as_deref(), Some("450.00"));
        assert_eq!(raw.current_balance.as_deref(), Some("12000.50"));
        assert_eq!(raw.reference.as_deref(), Some("0042"));
        assert_eq!(raw.category.as_deref(), Some("FOOD"));
    }

    #[test]
    fn test_numbers_and_nulls_are_tolerated() {
        let raw: RawTransaction =
            serde_json::from_str(r#"{"_type": "CREDIT", "_amount": 2500, "_narration": null}"#)
                .unwrap();
        assert_eq!(raw.amount.as_deref(), Some("2500"));
        assert_eq!(raw.narration, None);
        assert_eq!(raw.value_date, None);
    }

    #[test]
    fn test_missing_transactions_key_is_empty() {
        let resp: TransactionResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.transactions.is_empty());
    }
}

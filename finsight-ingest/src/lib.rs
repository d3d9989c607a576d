//! finsight-ingest: raw transaction records from the account backend, readers for
//! saved responses and CSV exports, and the record normalizer.

pub mod normalize;
pub mod parsers;
pub mod types;

pub use normalize::{NormalizedBatch, Normalizer, Rejected};
pub use parsers::{parse_raw_csv, parse_response_json, read_raw_csv, read_response_json};
pub use types::{RawTransaction, TransactionResponse};

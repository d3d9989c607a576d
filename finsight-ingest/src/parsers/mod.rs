//! Readers for raw transaction records saved to disk.

pub mod csv_export;
pub mod json_response;

pub use csv_export::{parse_raw_csv, read_raw_csv};
pub use json_response::{parse_response_json, read_response_json};

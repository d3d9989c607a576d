//! finsight-core: transaction model, benchmark table, errors and the day-label policy

pub mod benchmark;
pub mod error;
pub mod time;
pub mod transaction;

pub use benchmark::BenchmarkTable;
pub use error::{Error, Result};
pub use time::{DEFAULT_TIMEZONE, DayPolicy, day_label};
pub use transaction::{Category, MAX_AMOUNT, Transaction, TransactionKind};

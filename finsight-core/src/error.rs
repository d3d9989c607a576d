//! Error types for finsight

use rust_decimal::Decimal;
use thiserror::Error;

use crate::transaction::Category;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Malformed record: {field} {reason}")]
    MalformedRecord { field: &'static str, reason: String },

    #[error(
        "Monthly savings of {monthly_savings} leave no room for a goal: expenses meet or exceed income"
    )]
    UnsustainableBudget { monthly_savings: Decimal },

    #[error("Goal target must be positive, got {0}")]
    InvalidGoalTarget(Decimal),

    #[error("Benchmark average for {category} is zero")]
    DivisionByZeroBenchmark { category: Category },

    #[error("Percentage against the {category} benchmark is out of range")]
    PercentageOutOfRange { category: Category },

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

impl Error {
    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

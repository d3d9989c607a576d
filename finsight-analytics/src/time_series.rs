//! Per-day buckets for the balance, spend and inflow trend charts.
//!
//! Buckets remember the order in which days were first populated, so "the last
//! N days" means the last N days inserted, independent of any map ordering.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use finsight_core::{Transaction, day_label};
use rust_decimal::Decimal;
use serde::Serialize;

/// Insertion-ordered day -> value accumulator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayBuckets {
    entries: Vec<(NaiveDate, Decimal)>,
    index: HashMap<NaiveDate, usize>,
}

impl DayBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the day's value (last write wins). A new day goes to the end.
    pub fn set(&mut self, day: NaiveDate, value: Decimal) {
        *self.slot(day) = value;
    }

    /// Add to the day's value
    pub fn add(&mut self, day: NaiveDate, value: Decimal) {
        *self.slot(day) += value;
    }

    pub fn get(&self, day: NaiveDate) -> Option<Decimal> {
        self.index.get(&day).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The last `n` days by first insertion, oldest first
    pub fn last(&self, n: usize) -> Series {
        let start = self.entries.len().saturating_sub(n);
        Series::from_entries(&self.entries[start..])
    }

    fn slot(&mut self, day: NaiveDate) -> &mut Decimal {
        let i = match self.index.get(&day) {
            Some(&i) => i,
            None => {
                self.entries.push((day, Decimal::ZERO));
                let i = self.entries.len() - 1;
                self.index.insert(day, i);
                i
            }
        };
        &mut self.entries[i].1
    }
}

/// Aligned day/label/value sequences ready for a line or bar chart
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Series {
    dates: Vec<NaiveDate>,
    labels: Vec<String>,
    values: Vec<Decimal>,
}

impl Series {
    fn from_entries(entries: &[(NaiveDate, Decimal)]) -> Self {
        Self {
            dates: entries.iter().map(|(d, _)| *d).collect(),
            labels: entries.iter().map(|(d, _)| day_label(*d)).collect(),
            values: entries.iter().map(|(_, v)| *v).collect(),
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[Decimal] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// (label, value) pairs, oldest first
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> + '_ {
        self.labels.iter().map(String::as_str).zip(self.values.iter().copied())
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    /// Closing balance of each day
    pub balance: Series,
    /// Summed debits per day
    pub spending: Series,
    /// Summed credits per day
    pub inflow: Series,
}

/// Bucket transactions by calendar day and keep the most recent `window` days of each series.
///
/// Transactions without any date are skipped.
pub fn build_time_series(txns: &[Transaction], window: usize) -> TimeSeries {
    let mut balance = DayBuckets::new();
    let mut spending = DayBuckets::new();
    let mut inflow = DayBuckets::new();

    for txn in txns {
        let Some(day) = txn.bucket_date() else {
            continue;
        };

        if let Some(b) = txn.balance_after {
            balance.set(day, b);
        }
        if txn.is_debit() {
            spending.add(day, txn.amount);
        } else {
            inflow.add(day, txn.amount);
        }
    }

    TimeSeries {
        balance: balance.last(window),
        spending: spending.last(window),
        inflow: inflow.last(window),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeekdayTotal {
    pub weekday: Weekday,
    pub spend: Decimal,
}

/// Debit spend per weekday, Monday first; all seven days are always present
pub fn weekday_pattern(txns: &[Transaction]) -> Vec<WeekdayTotal> {
    let mut totals = [Decimal::ZERO; 7];
    for txn in txns.iter().filter(|t| t.is_debit()) {
        if let Some(day) = txn.bucket_date() {
            totals[day.weekday().num_days_from_monday() as usize] += txn.amount;
        }
    }

    let mut weekday = Weekday::Mon;
    totals
        .into_iter()
        .map(|spend| {
            let entry = WeekdayTotal { weekday, spend };
            weekday = weekday.succ();
            entry
        })
        .collect()
}

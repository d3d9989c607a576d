//! Reference monthly spend per category, used to flag overspending.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction::Category;

/// Expected monthly spend per category (INR).
///
/// Built once and passed to the aggregators; categories without an entry
/// have a benchmark of zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct BenchmarkTable {
    averages: BTreeMap<Category, Decimal>,
}

impl BenchmarkTable {
    /// A table with no entries (every benchmark is zero)
    pub fn empty() -> Self {
        Self {
            averages: BTreeMap::new(),
        }
    }

    /// Builder-style override of one category
    pub fn with(mut self, category: Category, average: Decimal) -> Self {
        self.averages.insert(category, average);
        self
    }

    /// Apply overrides on top of this table
    pub fn with_overrides(mut self, overrides: &BTreeMap<Category, Decimal>) -> Self {
        for (category, average) in overrides {
            self.averages.insert(*category, *average);
        }
        self
    }

    pub fn average(&self, category: Category) -> Decimal {
        self.averages.get(&category).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        self.averages.iter().map(|(c, a)| (*c, *a))
    }

    pub fn len(&self) -> usize {
        self.averages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }
}

impl Default for BenchmarkTable {
    /// Average Indian household monthly spend per category
    fn default() -> Self {
        let averages = [
            (Category::Entertainment, 1500),
            (Category::Food, 8000),
            (Category::Lifestyle, 3000),
            (Category::Education, 5000),
            (Category::Shopping, 3500),
            (Category::Ecommerce, 2500),
            (Category::Travel, 2000),
            (Category::Utilities, 4000),
            (Category::Services, 2000),
            (Category::General, 3000),
            (Category::Uncategorized, 1000),
        ]
        .into_iter()
        .map(|(c, a)| (c, Decimal::from(a)))
        .collect();

        Self { averages }
    }
}

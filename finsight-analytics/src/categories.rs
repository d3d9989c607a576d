//! Categorical spend aggregation against the benchmark table.

use finsight_core::{BenchmarkTable, Category, Error, Result, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::rounding::percentage;

/// Debit spend in one category compared with its benchmark
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpend {
    pub category: Category,
    pub total: Decimal,
    pub benchmark_average: Decimal,
    /// `total - benchmark_average`; positive means overspending
    pub difference_vs_benchmark: Decimal,
    pub overspending: bool,
    /// `difference / benchmark * 100` to one decimal; `None` for a zero benchmark
    /// or a ratio too large to represent
    pub percentage_vs_benchmark: Option<Decimal>,
    pub transaction_count: usize,
}

impl CategorySpend {
    fn new(category: Category, total: Decimal, benchmark_average: Decimal, count: usize) -> Self {
        let difference = total - benchmark_average;
        Self {
            category,
            total,
            benchmark_average,
            difference_vs_benchmark: difference,
            overspending: difference > Decimal::ZERO,
            percentage_vs_benchmark: percentage(difference, benchmark_average),
            transaction_count: count,
        }
    }

    /// Overspend as a percentage of the benchmark
    pub fn overspend_percentage(&self) -> Result<Decimal> {
        if self.benchmark_average.is_zero() {
            return Err(Error::DivisionByZeroBenchmark {
                category: self.category,
            });
        }
        self.percentage_vs_benchmark
            .ok_or(Error::PercentageOutOfRange {
                category: self.category,
            })
    }

    /// What cutting back to the benchmark would save; never negative
    pub fn potential_saving(&self) -> Decimal {
        self.difference_vs_benchmark.max(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    /// One entry per catalog category, in catalog order
    pub categories: Vec<CategorySpend>,
    pub total_spend: Decimal,
    pub total_potential_savings: Decimal,
}

impl CategoryBreakdown {
    pub fn get(&self, category: Category) -> Option<&CategorySpend> {
        self.categories.iter().find(|c| c.category == category)
    }

    pub fn overspending(&self) -> impl Iterator<Item = &CategorySpend> {
        self.categories.iter().filter(|c| c.overspending)
    }
}

/// Sum debit amounts per category and compare each with its benchmark.
///
/// Every catalog category is present in the result, even with no activity.
pub fn aggregate_categories(txns: &[Transaction], benchmarks: &BenchmarkTable) -> CategoryBreakdown {
    let mut totals = [Decimal::ZERO; Category::ALL.len()];
    let mut counts = [0usize; Category::ALL.len()];

    for txn in txns.iter().filter(|t| t.is_debit()) {
        let slot = txn.category as usize;
        totals[slot] += txn.amount;
        counts[slot] += 1;
    }

    let categories: Vec<CategorySpend> = Category::ALL
        .into_iter()
        .map(|c| {
            let slot = c as usize;
            CategorySpend::new(c, totals[slot], benchmarks.average(c), counts[slot])
        })
        .collect();

    let total_spend = categories.iter().map(|c| c.total).sum();
    let total_potential_savings = categories.iter().map(CategorySpend::potential_saving).sum();

    CategoryBreakdown {
        categories,
        total_spend,
        total_potential_savings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsight_core::TransactionKind;

    fn debit(amount: i64, category: Category) -> Transaction {
        Transaction::new(TransactionKind::Debit, Decimal::from(amount), "X", category).unwrap()
    }

    fn credit(amount: i64, category: Category) -> Transaction {
        Transaction::new(TransactionKind::Credit, Decimal::from(amount), "X", category).unwrap()
    }

    #[test]
    fn test_food_overspend() {
        let txns = vec![debit(9000, Category::Food), debit(1000, Category::Food)];
        let breakdown = aggregate_categories(&txns, &BenchmarkTable::default());

        let food = breakdown.get(Category::Food).unwrap();
        assert_eq!(food.total, Decimal::from(10_000));
        assert_eq!(food.difference_vs_benchmark, Decimal::from(2000));
        assert!(food.overspending);
        assert_eq!(food.transaction_count, 2);
        assert_eq!(food.overspend_percentage().unwrap(), Decimal::from(25));
        assert_eq!(breakdown.total_potential_savings, Decimal::from(2000));
        assert_eq!(breakdown.overspending().count(), 1);
    }

    #[test]
    fn test_every_category_present() {
        let breakdown = aggregate_categories(&[], &BenchmarkTable::default());
        let cats: Vec<Category> = breakdown.categories.iter().map(|c| c.category).collect();
        assert_eq!(cats, Category::ALL.to_vec());
        assert!(breakdown.categories.iter().all(|c| c.total.is_zero()));
        assert_eq!(breakdown.total_spend, Decimal::ZERO);
        assert_eq!(breakdown.total_potential_savings, Decimal::ZERO);
    }

    #[test]
    fn test_credits_are_not_spend() {
        let txns = vec![credit(5000, Category::Shopping), debit(100, Category::Shopping)];
        let breakdown = aggregate_categories(&txns, &BenchmarkTable::default());
        let shopping = breakdown.get(Category::Shopping).unwrap();
        assert_eq!(shopping.total, Decimal::from(100));
        assert_eq!(shopping.transaction_count, 1);
        assert!(!shopping.overspending);
    }

    #[test]
    fn test_under_benchmark_never_reduces_savings() {
        // Travel under by 1900, food over by 500: savings only count the overspend.
        let txns = vec![debit(100, Category::Travel), debit(8500, Category::Food)];
        let breakdown = aggregate_categories(&txns, &BenchmarkTable::default());
        assert_eq!(breakdown.total_potential_savings, Decimal::from(500));
        let travel = breakdown.get(Category::Travel).unwrap();
        assert_eq!(travel.difference_vs_benchmark, Decimal::from(-1900));
        assert_eq!(travel.potential_saving(), Decimal::ZERO);
        assert_eq!(travel.overspend_percentage().unwrap(), Decimal::from(-95));
    }

    #[test]
    fn test_zero_benchmark_is_guarded() {
        let table = BenchmarkTable::empty().with(Category::Food, Decimal::from(100));
        let txns = vec![debit(40, Category::Travel)];
        let breakdown = aggregate_categories(&txns, &table);

        let travel = breakdown.get(Category::Travel).unwrap();
        assert_eq!(travel.percentage_vs_benchmark, None);
        assert_eq!(
            travel.overspend_percentage().unwrap_err(),
            Error::DivisionByZeroBenchmark {
                category: Category::Travel
            }
        );
        assert_eq!(breakdown.total_potential_savings, Decimal::from(40));
        assert_eq!(breakdown.categories.len(), Category::ALL.len());
    }

    #[test]
    fn test_tiny_benchmark_is_not_reported_as_zero() {
        let table = BenchmarkTable::default().with(Category::Food, Decimal::new(1, 26));
        let txns = vec![debit(1_000_000, Category::Food)];
        let breakdown = aggregate_categories(&txns, &table);

        let food = breakdown.get(Category::Food).unwrap();
        assert!(food.overspending);
        assert_eq!(food.percentage_vs_benchmark, None);
        assert_eq!(
            food.overspend_percentage().unwrap_err(),
            Error::PercentageOutOfRange {
                category: Category::Food
            }
        );
    }
}

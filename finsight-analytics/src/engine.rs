//! One call from normalized transactions to everything the dashboards render.

use finsight_core::{BenchmarkTable, Result, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::cash_flow::{CashFlow, summarize_cash_flow};
use crate::categories::{CategoryBreakdown, aggregate_categories};
use crate::counterparty::{Counterparties, aggregate_counterparties};
use crate::extremes::{TransactionExtremes, find_extremes};
use crate::goal::GoalProjection;
use crate::time_series::{TimeSeries, WeekdayTotal, build_time_series, weekday_pattern};

/// Days kept in each trend series
pub const DEFAULT_SERIES_WINDOW: usize = 7;
/// Transactions listed under "recent activity"
pub const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub benchmarks: BenchmarkTable,
    pub series_window: usize,
    pub recent_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            benchmarks: BenchmarkTable::default(),
            series_window: DEFAULT_SERIES_WINDOW,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

/// Everything derived from one batch of transactions
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    pub transaction_count: usize,
    pub categories: CategoryBreakdown,
    pub cash_flow: CashFlow,
    pub time_series: TimeSeries,
    pub weekday_spend: Vec<WeekdayTotal>,
    pub counterparties: Counterparties,
    pub extremes: TransactionExtremes,
    /// The first transactions as supplied
    pub recent: Vec<Transaction>,
    /// Only filled by [`Engine::analyze_with_goal`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<GoalProjection>,
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run every aggregator over the batch. Empty input gives zero/empty results.
    pub fn analyze(&self, txns: &[Transaction]) -> AggregationResult {
        let categories = aggregate_categories(txns, &self.config.benchmarks);
        let cash_flow = summarize_cash_flow(txns);
        let time_series = build_time_series(txns, self.config.series_window);
        let weekday_spend = weekday_pattern(txns);
        let counterparties = aggregate_counterparties(txns);
        let extremes = find_extremes(txns);
        let recent = txns.iter().take(self.config.recent_limit).cloned().collect();

        debug!(
            transactions = txns.len(),
            overspending = categories.overspending().count(),
            net_savings = %cash_flow.net_savings,
            days = time_series.spending.len(),
            "analysis complete"
        );

        AggregationResult {
            transaction_count: txns.len(),
            categories,
            cash_flow,
            time_series,
            weekday_spend,
            counterparties,
            extremes,
            recent,
            goal: None,
        }
    }

    /// [`Engine::analyze`] plus a goal projection at the batch's signed net savings.
    ///
    /// Fails only for a non-positive target.
    pub fn analyze_with_goal(&self, txns: &[Transaction], target: Decimal) -> Result<AggregationResult> {
        let mut result = self.analyze(txns);
        result.goal = Some(GoalProjection::evaluate(target, result.cash_flow.net_savings)?);
        Ok(result)
    }
}

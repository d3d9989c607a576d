//! finsight-analytics: category spend vs. benchmarks, cash flow, daily series,
//! counterparty totals and savings-goal projection over normalized transactions.
//!
//! Every aggregator is a pure function of its input slice. None of them share
//! state, so they can run side by side on the same batch.

pub mod cash_flow;
pub mod categories;
pub mod counterparty;
pub mod engine;
pub mod extremes;
pub mod goal;
pub mod time_series;

pub(crate) mod rounding;

pub use cash_flow::{CashFlow, summarize_cash_flow};
pub use categories::{CategoryBreakdown, CategorySpend, aggregate_categories};
pub use counterparty::{Counterparties, NarrationTotal, TopSource, aggregate_counterparties};
pub use engine::{AggregationResult, Engine, EngineConfig};
pub use extremes::{TransactionExtremes, TransactionSummary, find_extremes};
pub use goal::{GoalOutcome, GoalProjection, GoalStatus, project_goal};
pub use time_series::{
    DayBuckets, Series, TimeSeries, WeekdayTotal, build_time_series, weekday_pattern,
};

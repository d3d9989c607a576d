//! Savings-goal projection: how many months of the current net savings reach a target.

use finsight_core::{Error, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalOutcome {
    /// One month of savings already covers the target
    AchievableNow,
    MonthsRequired(u64),
}

/// Project months to reach `target` at `monthly_savings` per month.
///
/// `monthly_savings` is the signed net figure, not the display value clamped at
/// zero. A non-positive rate fails with [`Error::UnsustainableBudget`].
pub fn project_goal(target: Decimal, monthly_savings: Decimal) -> Result<GoalOutcome> {
    if target <= Decimal::ZERO {
        return Err(Error::InvalidGoalTarget(target));
    }
    if monthly_savings <= Decimal::ZERO {
        return Err(Error::UnsustainableBudget { monthly_savings });
    }
    if target <= monthly_savings {
        return Ok(GoalOutcome::AchievableNow);
    }

    // A quotient too large for u64 months is as good as unreachable.
    target
        .checked_div(monthly_savings)
        .and_then(|months| months.ceil().to_u64())
        .map(GoalOutcome::MonthsRequired)
        .ok_or(Error::UnsustainableBudget { monthly_savings })
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum GoalStatus {
    AchievableNow,
    MonthsRequired { months: u64 },
    Unreachable,
}

/// Goal projection as reported alongside the rest of an analysis
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProjection {
    pub target_amount: Decimal,
    pub monthly_savings_rate: Decimal,
    #[serde(flatten)]
    pub status: GoalStatus,
}

impl GoalProjection {
    /// Run the projection, turning an unsustainable budget into the `Unreachable` status.
    ///
    /// Only an invalid target is an error.
    pub fn evaluate(target: Decimal, monthly_savings: Decimal) -> Result<Self> {
        let status = match project_goal(target, monthly_savings) {
            Ok(GoalOutcome::AchievableNow) => GoalStatus::AchievableNow,
            Ok(GoalOutcome::MonthsRequired(months)) => GoalStatus::MonthsRequired { months },
            Err(Error::UnsustainableBudget { .. }) => GoalStatus::Unreachable,
            Err(e) => return Err(e),
        };
        Ok(Self {
            target_amount: target,
            monthly_savings_rate: monthly_savings,
            status,
        })
    }

    /// User-facing guidance for this projection
    pub fn guidance(&self) -> String {
        match self.status {
            GoalStatus::AchievableNow => {
                "You can achieve this goal immediately with your current savings rate!".to_string()
            }
            GoalStatus::MonthsRequired { months } => format!(
                "You'll need approximately {} {} at your current savings rate.",
                months,
                if months == 1 { "month" } else { "months" }
            ),
            GoalStatus::Unreachable => {
                "Your monthly expenses exceed your income. Consider reviewing your budget.".to_string()
            }
        }
    }
}

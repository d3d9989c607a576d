//! Inflow/outflow totals and savings.

use finsight_core::Transaction;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::rounding::{percentage, round_half_up};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CashFlow {
    pub total_inflow: Decimal,
    pub total_outflow: Decimal,
    /// Signed `total_inflow - total_outflow`
    pub net_savings: Decimal,
    /// `net_savings` clamped at zero, as shown on the savings card
    pub displayed_savings: Decimal,
    /// Net savings as a percentage of inflow; `None` without inflow
    pub savings_ratio: Option<Decimal>,
    pub average_transaction_size: Decimal,
    pub transaction_count: usize,
}

pub fn summarize_cash_flow(txns: &[Transaction]) -> CashFlow {
    let mut total_inflow = Decimal::ZERO;
    let mut total_outflow = Decimal::ZERO;

    for txn in txns {
        if txn.is_credit() {
            total_inflow += txn.amount;
        } else {
            total_outflow += txn.amount;
        }
    }

    let net_savings = total_inflow - total_outflow;
    let average_transaction_size = if txns.is_empty() {
        Decimal::ZERO
    } else {
        round_half_up(
            (total_inflow + total_outflow) / Decimal::from(txns.len()),
            2,
        )
    };

    CashFlow {
        total_inflow,
        total_outflow,
        net_savings,
        displayed_savings: net_savings.max(Decimal::ZERO),
        savings_ratio: percentage(net_savings, total_inflow),
        average_transaction_size,
        transaction_count: txns.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsight_core::{Category, TransactionKind};

    fn txn(kind: TransactionKind, amount: i64) -> Transaction {
        Transaction::new(kind, Decimal::from(amount), "X", Category::General).unwrap()
    }

    #[test]
    fn test_salary_and_rent() {
        let txns = vec![
            txn(TransactionKind::Credit, 50_000),
            txn(TransactionKind::Debit, 30_000),
        ];
        let flow = summarize_cash_flow(&txns);
        assert_eq!(flow.total_inflow, Decimal::from(50_000));
        assert_eq!(flow.total_outflow, Decimal::from(30_000));
        assert_eq!(flow.net_savings, Decimal::from(20_000));
        assert_eq!(flow.displayed_savings, Decimal::from(20_000));
        assert_eq!(flow.savings_ratio, Some(Decimal::from(40)));
        assert_eq!(flow.average_transaction_size, Decimal::from(40_000));
        assert_eq!(flow.transaction_count, 2);
    }

    #[test]
    fn test_negative_savings_displayed_as_zero() {
        let txns = vec![
            txn(TransactionKind::Credit, 10_000),
            txn(TransactionKind::Debit, 15_000),
        ];
        let flow = summarize_cash_flow(&txns);
        assert_eq!(flow.net_savings, Decimal::from(-5000));
        assert_eq!(flow.displayed_savings, Decimal::ZERO);
        assert_eq!(flow.savings_ratio, Some(Decimal::from(-50)));
    }

    #[test]
    fn test_empty_input() {
        let flow = summarize_cash_flow(&[]);
        assert_eq!(flow.total_inflow, Decimal::ZERO);
        assert_eq!(flow.total_outflow, Decimal::ZERO);
        assert_eq!(flow.net_savings, Decimal::ZERO);
        assert_eq!(flow.savings_ratio, None);
        assert_eq!(flow.average_transaction_size, Decimal::ZERO);
    }

    #[test]
    fn test_conservation_with_fractions() {
        let txns = vec![
            Transaction::new(TransactionKind::Credit, Decimal::new(1001, 2), "A", Category::General).unwrap(),
            Transaction::new(TransactionKind::Debit, Decimal::new(333, 2), "B", Category::Food).unwrap(),
            Transaction::new(TransactionKind::Debit, Decimal::new(1, 1), "C", Category::Food).unwrap(),
        ];
        let flow = summarize_cash_flow(&txns);
        assert_eq!(flow.total_inflow - flow.total_outflow, flow.net_savings);
        assert_eq!(flow.net_savings, Decimal::new(658, 2));
    }
}

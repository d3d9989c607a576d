//! Per-narration totals: top income/expense sources and repeated payees.
//!
//! "Recurring" here only means a narration that shows up more than once in the
//! outflow table. There is no interval or frequency detection.

use std::collections::HashMap;

use finsight_core::Transaction;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NarrationTotal {
    pub narration: String,
    pub total: Decimal,
    pub occurrences: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopSource {
    pub narration: String,
    pub amount: Decimal,
}

/// Narration totals in first-appearance order
#[derive(Debug, Default)]
struct NarrationLedger {
    entries: Vec<NarrationTotal>,
    index: HashMap<String, usize>,
}

impl NarrationLedger {
    fn add(&mut self, narration: &str, amount: Decimal) {
        match self.index.get(narration) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                entry.total += amount;
                entry.occurrences += 1;
            }
            None => {
                self.index.insert(narration.to_string(), self.entries.len());
                self.entries.push(NarrationTotal {
                    narration: narration.to_string(),
                    total: amount,
                    occurrences: 1,
                });
            }
        }
    }

    /// Largest positive total; the earliest narration wins a tie
    fn top(&self) -> Option<TopSource> {
        let mut best: Option<&NarrationTotal> = None;
        for entry in &self.entries {
            let current = best.map_or(Decimal::ZERO, |b| b.total);
            if entry.total > current {
                best = Some(entry);
            }
        }
        best.map(|b| TopSource {
            narration: b.narration.clone(),
            amount: b.total,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Counterparties {
    /// Narration with the highest summed inflow ("highest income")
    pub top_inflow: Option<TopSource>,
    /// Narration with the highest summed outflow ("highest expense")
    pub top_outflow: Option<TopSource>,
    pub inflow_totals: Vec<NarrationTotal>,
    pub outflow_totals: Vec<NarrationTotal>,
    /// Outflow narrations seen at least twice
    pub recurring: Vec<NarrationTotal>,
}

pub fn aggregate_counterparties(txns: &[Transaction]) -> Counterparties {
    let mut inflow = NarrationLedger::default();
    let mut outflow = NarrationLedger::default();

    for txn in txns {
        if txn.is_credit() {
            inflow.add(&txn.narration, txn.amount);
        } else {
            outflow.add(&txn.narration, txn.amount);
        }
    }

    let recurring = outflow
        .entries
        .iter()
        .filter(|e| e.occurrences >= 2)
        .cloned()
        .collect();

    Counterparties {
        top_inflow: inflow.top(),
        top_outflow: outflow.top(),
        inflow_totals: inflow.entries,
        outflow_totals: outflow.entries,
        recurring,
    }
}

//! Plain-text rendering of an analysis for the terminal.

use finsight_analytics::{AggregationResult, GoalProjection, Series, TopSource};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Whole-rupee amount with Indian digit grouping, e.g. "₹12,34,567"
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut out = String::new();
        for (i, c) in head.chars().enumerate() {
            if i > 0 && (head.len() - i) % 2 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out.push(',');
        out.push_str(tail);
        out
    };

    if rounded < Decimal::ZERO {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

pub fn render_goal(goal: &GoalProjection) -> String {
    format!(
        "Goal {} at {} / month: {}",
        format_inr(goal.target_amount),
        format_inr(goal.monthly_savings_rate),
        goal.guidance()
    )
}

pub fn render(result: &AggregationResult) -> String {
    Report(result).to_string()
}

/// Terminal report over one analysis, section by section
struct Report<'a>(&'a AggregationResult);

impl Report<'_> {
    fn summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let flow = &result.cash_flow;

        writeln!(f, "# Summary ({} transactions)\n", result.transaction_count)?;
        writeln!(f, "Inflow:            {}", format_inr(flow.total_inflow))?;
        writeln!(f, "Outflow:           {}", format_inr(flow.total_outflow))?;
        writeln!(f, "Your savings:      {}", format_inr(flow.displayed_savings))?;
        if let Some(ratio) = flow.savings_ratio {
            writeln!(f, "Savings ratio:     {ratio}%")?;
        }
        writeln!(f, "Avg transaction:   {}", format_inr(flow.average_transaction_size))?;
        writeln!(
            f,
            "Potential savings: {}\n",
            format_inr(result.categories.total_potential_savings)
        )
    }

    fn categories(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Spending vs. average\n")?;
        for c in &self.0.categories.categories {
            let pct = match c.percentage_vs_benchmark {
                Some(p) if p > Decimal::ZERO => format!("+{p}%"),
                Some(p) => format!("{p}%"),
                None => "n/a".to_string(),
            };
            writeln!(
                f,
                "{:<14} {:>12} / {:>10}  {:>8}{}",
                c.category.as_str(),
                format_inr(c.total),
                format_inr(c.benchmark_average),
                pct,
                if c.overspending { "  over" } else { "" }
            )?;
        }
        Ok(())
    }

    fn trend(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let series = &self.0.time_series;
        writeln!(f, "\n# Daily trend\n")?;
        for (title, s) in [
            ("Balance", &series.balance),
            ("Spending", &series.spending),
            ("Inflow", &series.inflow),
        ] {
            write_series(f, title, s)?;
        }
        Ok(())
    }

    fn insights(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cp = &self.0.counterparties;
        writeln!(f, "\n# Insights\n")?;
        write_top(f, "Highest income: ", cp.top_inflow.as_ref())?;
        write_top(f, "Highest expense:", cp.top_outflow.as_ref())?;
        if let Some(big) = &self.0.extremes.highest_expense {
            writeln!(f, "Largest debit:   {} ({})", big.narration, format_inr(big.amount))?;
        }
        if !cp.recurring.is_empty() {
            writeln!(f, "Repeated payees:")?;
            for r in &cp.recurring {
                writeln!(f, "  {} x{} = {}", r.narration, r.occurrences, format_inr(r.total))?;
            }
        }
        Ok(())
    }

    fn recent(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.recent.is_empty() {
            return Ok(());
        }
        writeln!(f, "\n# Recent\n")?;
        for t in &self.0.recent {
            let sign = if t.is_debit() { "-" } else { "+" };
            let date = t
                .bucket_date()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "----------".to_string());
            writeln!(f, "{date}  {sign}{:<12} {}", format_inr(t.amount), t.narration)?;
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.summary(f)?;
        self.categories(f)?;
        self.trend(f)?;
        self.insights(f)?;
        self.recent(f)?;
        if let Some(goal) = &self.0.goal {
            writeln!(f, "\n# Goal\n\n{}", render_goal(goal))?;
        }
        Ok(())
    }
}

fn write_series(f: &mut fmt::Formatter<'_>, title: &str, series: &Series) -> fmt::Result {
    writeln!(f, "  {title}:")?;
    if series.is_empty() {
        return writeln!(f, "    (no data)");
    }
    for (label, value) in series.iter() {
        writeln!(f, "    {label:<7} {}", format_inr(value))?;
    }
    Ok(())
}

fn write_top(f: &mut fmt::Formatter<'_>, title: &str, top: Option<&TopSource>) -> fmt::Result {
    match top {
        Some(top) => writeln!(f, "{title} {} ({})", top.narration, format_inr(top.amount)),
        None => writeln!(f, "{title} none"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsight_analytics::Engine;
    use finsight_core::{Category, Transaction, TransactionKind};

    #[test]
    fn test_format_inr_grouping() {
        assert_eq!(format_inr(Decimal::ZERO), "₹0");
        assert_eq!(format_inr(Decimal::from(999)), "₹999");
        assert_eq!(format_inr(Decimal::from(1000)), "₹1,000");
        assert_eq!(format_inr(Decimal::from(123_456)), "₹1,23,456");
        assert_eq!(format_inr(Decimal::from(1_234_567)), "₹12,34,567");
        assert_eq!(format_inr(Decimal::new(449950, 2)), "₹4,500");
        assert_eq!(format_inr(Decimal::from(-5000)), "-₹5,000");
    }

    #[test]
    fn test_render_sections() {
        let txns = vec![
            Transaction::new(TransactionKind::Credit, Decimal::from(50_000), "SALARY", Category::General).unwrap(),
            Transaction::new(TransactionKind::Debit, Decimal::from(9_000), "SWIGGY", Category::Food).unwrap(),
        ];
        let result = Engine::default()
            .analyze_with_goal(&txns, Decimal::from(100_000))
            .unwrap();
        let text = render(&result);

        assert!(text.contains("Inflow:            ₹50,000"));
        assert!(text.contains("Your savings:      ₹41,000"));
        assert!(text.contains("Highest expense: SWIGGY (₹9,000)"));
        assert!(text.contains("FOOD"));
        assert!(text.contains("You'll need approximately 3 months"));
    }

    #[test]
    fn test_render_empty() {
        let text = render(&Engine::default().analyze(&[]));
        assert!(text.contains("(0 transactions)"));
        assert!(text.contains("Highest income:  none"));
        assert!(text.contains("(no data)"));
    }

    #[test]
    fn test_sections_in_order() {
        let txn = Transaction::new(TransactionKind::Debit, Decimal::from(100), "TEA", Category::Food)
            .unwrap();
        let result = Engine::default()
            .analyze_with_goal(&[txn], Decimal::from(1000))
            .unwrap();
        let text = render(&result);

        let positions: Vec<usize> = [
            "# Summary", "# Spending vs. average", "# Daily trend", "# Insights", "# Recent", "# Goal",
        ]
        .iter()
        .map(|h| text.find(h).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.contains("FOOD"));
        assert!(text.contains("-98.8%"));
        assert!(text.ends_with("Consider reviewing your budget.\n"));
    }
}

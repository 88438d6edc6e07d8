use serde::{Deserialize, Serialize};

use super::{Amount, Record, safe_div};

/// Overall figures for a filtered record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: Amount,
    pub count: i64,
    pub average: Amount,
    pub highest: Amount,
    pub lowest: Amount,
    /// Percentage change vs the previous period, when one was available
    pub growth: Option<f64>,
}

/// Percentage change between a current and a previous total.
///
/// The zero-baseline convention is deliberately asymmetric: 100 when the
/// previous total was 0 and the current one is positive, 0 otherwise.
pub fn growth_percentage(current: Amount, previous: Amount) -> f64 {
    if previous == 0.0 {
        if current > 0.0 { 100.0 } else { 0.0 }
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Compute total/count/average/highest/lowest over the filtered records,
/// plus growth when the previous period's total is known.
pub fn summarize(records: &[Record], previous_total: Option<Amount>) -> Summary {
    let count = records.len() as i64;
    let total: Amount = records.iter().map(|r| r.amount()).sum();

    let mut highest: Amount = 0.0;
    let mut lowest: Amount = 0.0;
    for (i, record) in records.iter().enumerate() {
        let amount = record.amount();
        if i == 0 {
            highest = amount;
            lowest = amount;
        } else {
            highest = highest.max(amount);
            lowest = lowest.min(amount);
        }
    }

    Summary {
        total,
        count,
        average: safe_div(total, count as f64),
        highest,
        lowest,
        growth: previous_total.map(|previous| growth_percentage(total, previous)),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::Earning;

    fn earnings(amounts: &[f64]) -> Vec<Record> {
        amounts
            .iter()
            .map(|&a| Earning::new(Utc::now(), a).into())
            .collect()
    }

    #[test]
    fn test_summary_basic_figures() {
        let summary = summarize(&earnings(&[10.0, 50.0, 5.0]), None);
        assert_eq!(summary.total, 65.0);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.highest, 50.0);
        assert_eq!(summary.lowest, 5.0);
        assert!(summary.growth.is_none());
    }

    #[test]
    fn test_summary_empty_is_all_zero() {
        let summary = summarize(&[], None);
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.highest, 0.0);
        assert_eq!(summary.lowest, 0.0);
    }

    #[test]
    fn test_growth_conventions() {
        assert_eq!(growth_percentage(0.0, 0.0), 0.0);
        assert_eq!(growth_percentage(50.0, 0.0), 100.0);
        assert_eq!(growth_percentage(150.0, 100.0), 50.0);
        assert_eq!(growth_percentage(50.0, 100.0), -50.0);
    }

    #[test]
    fn test_summary_growth_vs_previous() {
        let summary = summarize(&earnings(&[100.0, 50.0]), Some(100.0));
        assert_eq!(summary.growth, Some(50.0));
    }
}

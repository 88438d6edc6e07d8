use serde::{Deserialize, Serialize};

use crate::domain::{Amount, ChartPoint, Period, Summary, TimeSeriesPoint};

/// Aggregated breakdown of one record set along one dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownReport {
    pub period: Period,
    pub group_by: String,
    pub rows: Vec<ChartPoint>,
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub period: Period,
    pub total: Amount,
    pub count: i64,
}

/// Current period vs the window of the same length immediately before it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodComparisonReport {
    pub current: PeriodTotals,
    pub previous: PeriodTotals,
    pub change: Amount,
    pub growth: f64,
}

/// Tracked time over a period, collapsed to a per-day series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeReport {
    pub period: Period,
    pub days: Vec<TimeSeriesPoint>,
    pub entry_count: i64,
    pub total_hours: f64,
    pub billable_total: Amount,
    /// Billable total over tracked hours; 0 when nothing was tracked
    pub hourly_rate: f64,
}

/// The landing-page view: this period's earnings and expenses side by side,
/// with growth vs the previous period and the top clients by earnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub period: Period,
    pub earnings: Summary,
    pub expenses: Summary,
    pub net: Amount,
    pub top_clients: Vec<ChartPoint>,
}

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Amount, Bucket, GroupBy, TimeEntry, day_key, safe_div};

/// One chart row. The literal shape bar/pie/radar datasets and CSV exports
/// are built from; no business logic lives here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: Amount,
    pub count: i64,
    pub average: Amount,
}

/// One point of a daily time-tracking series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: String,
    pub amount: Amount,
    pub hours: f64,
}

fn parse_day_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%m/%d/%Y").ok()
}

/// Reshape a bucket map into ordered chart rows. Calendar-derived keys are
/// ordered chronologically; categorical keys by descending total, ties
/// broken by name so the output is stable.
pub fn chart_points(buckets: &HashMap<String, Bucket>, group_by: GroupBy) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = buckets
        .iter()
        .map(|(name, bucket)| ChartPoint {
            name: name.clone(),
            value: bucket.total,
            count: bucket.count,
            average: bucket.average,
        })
        .collect();

    match group_by {
        GroupBy::Day | GroupBy::Week => {
            points.sort_by_key(|p| parse_day_key(&p.name));
        }
        GroupBy::Hour => {
            points.sort_by_key(|p| p.name.parse::<u32>().unwrap_or(0));
        }
        // "YYYY-MM" keys sort lexicographically
        GroupBy::Month => points.sort_by(|a, b| a.name.cmp(&b.name)),
        GroupBy::Client | GroupBy::Platform | GroupBy::Category => {
            points.sort_by(|a, b| {
                b.value
                    .partial_cmp(&a.value)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.name.cmp(&b.name))
            });
        }
    }

    points
}

/// Collapse time entries into a chronological per-day series of billed
/// amount and tracked hours.
pub fn time_series(entries: &[TimeEntry]) -> Vec<TimeSeriesPoint> {
    let mut days: HashMap<String, (Amount, f64)> = HashMap::new();

    for entry in entries {
        let day = days.entry(day_key(entry.start_time)).or_insert((0.0, 0.0));
        day.0 += entry.total_amount.unwrap_or(0.0);
        day.1 += entry.hours();
    }

    let mut points: Vec<TimeSeriesPoint> = days
        .into_iter()
        .map(|(date, (amount, hours))| TimeSeriesPoint {
            date,
            amount,
            hours,
        })
        .collect();
    points.sort_by_key(|p| parse_day_key(&p.date));
    points
}

/// Effective hourly rate over a set of entries; 0 when nothing was tracked.
pub fn hourly_rate(total_amount: Amount, total_hours: f64) -> f64 {
    safe_div(total_amount, total_hours)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::domain::{Earning, NameIndex, Record, aggregate};

    fn date(s: &str) -> chrono::DateTime<Utc> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_day_points_are_chronological() {
        let records: Vec<Record> = vec![
            Earning::new(date("2024-03-12"), 10.0).into(),
            Earning::new(date("2024-02-28"), 20.0).into(),
            Earning::new(date("2024-03-02"), 30.0).into(),
        ];
        let buckets = aggregate(&records, GroupBy::Day, &NameIndex::default());

        let points = chart_points(&buckets, GroupBy::Day);
        let names: Vec<&str> = points.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["2/28/2024", "3/2/2024", "3/12/2024"]);
    }

    #[test]
    fn test_category_points_sorted_by_total_descending() {
        let records: Vec<Record> = vec![
            Earning::new(date("2024-03-01"), 10.0).with_category("writing").into(),
            Earning::new(date("2024-03-02"), 90.0).with_category("consulting").into(),
            Earning::new(date("2024-03-03"), 50.0).with_category("design").into(),
        ];
        let buckets = aggregate(&records, GroupBy::Category, &NameIndex::default());

        let points = chart_points(&buckets, GroupBy::Category);
        let names: Vec<&str> = points.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["consulting", "design", "writing"]);
    }

    #[test]
    fn test_time_series_groups_by_day() {
        let entries = vec![
            TimeEntry::new(date("2024-03-01"), 3600).with_total_amount(40.0),
            TimeEntry::new(date("2024-03-01"), 1800).with_total_amount(20.0),
            TimeEntry::new(date("2024-03-05"), 7200),
        ];

        let series = time_series(&entries);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, "3/1/2024");
        assert_eq!(series[0].amount, 60.0);
        assert_eq!(series[0].hours, 1.5);
        assert_eq!(series[1].date, "3/5/2024");
        assert_eq!(series[1].amount, 0.0);
        assert_eq!(series[1].hours, 2.0);
    }

    #[test]
    fn test_hourly_rate_guards_zero_hours() {
        assert_eq!(hourly_rate(100.0, 4.0), 25.0);
        assert_eq!(hourly_rate(100.0, 0.0), 0.0);
    }
}

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::{Amount, Client, ClientId, Platform, PlatformId, Record, safe_div};

/// Fallback label for a missing or dangling client/platform reference.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Fallback label for records without a category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Dimension records are bucketed along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Day,
    Week,
    Month,
    Client,
    Platform,
    Category,
    Hour,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Day => "day",
            GroupBy::Week => "week",
            GroupBy::Month => "month",
            GroupBy::Client => "client",
            GroupBy::Platform => "platform",
            GroupBy::Category => "category",
            GroupBy::Hour => "hour",
        }
    }

    /// True for dimensions whose keys are calendar-derived and therefore
    /// ordered chronologically rather than by total.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            GroupBy::Day | GroupBy::Week | GroupBy::Month | GroupBy::Hour
        )
    }
}

impl std::str::FromStr for GroupBy {
    type Err = ParseGroupByError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(GroupBy::Day),
            "week" => Ok(GroupBy::Week),
            "month" => Ok(GroupBy::Month),
            "client" => Ok(GroupBy::Client),
            "platform" => Ok(GroupBy::Platform),
            "category" => Ok(GroupBy::Category),
            "hour" => Ok(GroupBy::Hour),
            other => Err(ParseGroupByError(other.to_string())),
        }
    }
}

impl std::fmt::Display for GroupBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGroupByError(pub String);

impl std::fmt::Display for ParseGroupByError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown group-by '{}' (expected day, week, month, client, platform, category or hour)",
            self.0
        )
    }
}

impl std::error::Error for ParseGroupByError {}

/// Per-bucket aggregate. Derived fresh on every computation, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub total: Amount,
    pub count: i64,
    pub average: Amount,
}

/// Name lookups for client/platform bucketing. Built once per report from
/// the loaded client/platform lists; dangling ids resolve to "Unknown"
/// instead of failing.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    clients: HashMap<ClientId, String>,
    platforms: HashMap<PlatformId, String>,
}

impl NameIndex {
    pub fn new(clients: &[Client], platforms: &[Platform]) -> Self {
        Self {
            clients: clients.iter().map(|c| (c.id, c.name.clone())).collect(),
            platforms: platforms.iter().map(|p| (p.id, p.name.clone())).collect(),
        }
    }

    pub fn client_name(&self, id: Option<ClientId>) -> String {
        id.and_then(|id| self.clients.get(&id).cloned())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
    }

    pub fn platform_name(&self, id: Option<PlatformId>) -> String {
        id.and_then(|id| self.platforms.get(&id).cloned())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
    }
}

/// Key for the day bucket of an instant, e.g. "3/1/2024".
pub fn day_key(instant: DateTime<Utc>) -> String {
    format!("{}/{}/{}", instant.month(), instant.day(), instant.year())
}

/// Key for the week bucket: the day key of the week's Monday.
pub fn week_key(instant: DateTime<Utc>) -> String {
    let monday = instant - Duration::days(instant.weekday().num_days_from_monday() as i64);
    day_key(monday)
}

/// Key for the month bucket, e.g. "2024-01".
pub fn month_key(instant: DateTime<Utc>) -> String {
    format!("{}-{:02}", instant.year(), instant.month())
}

fn bucket_key(record: &Record, group_by: GroupBy, names: &NameIndex) -> String {
    match group_by {
        GroupBy::Day => day_key(record.date()),
        GroupBy::Week => week_key(record.date()),
        GroupBy::Month => month_key(record.date()),
        GroupBy::Hour => record.date().hour().to_string(),
        GroupBy::Client => names.client_name(record.client_id()),
        GroupBy::Platform => names.platform_name(record.platform_id()),
        GroupBy::Category => record
            .category()
            .unwrap_or(UNCATEGORIZED_LABEL)
            .to_string(),
    }
}

/// Bucket records along the given dimension and compute per-bucket
/// total/count/average. Totals and counts are accumulated first; averages
/// are filled in as a second pass, so the result is deterministic
/// regardless of input order.
pub fn aggregate(
    records: &[Record],
    group_by: GroupBy,
    names: &NameIndex,
) -> HashMap<String, Bucket> {
    let mut buckets: HashMap<String, Bucket> = HashMap::new();

    for record in records {
        let key = bucket_key(record, group_by, names);
        let bucket = buckets.entry(key).or_insert(Bucket {
            total: 0.0,
            count: 0,
            average: 0.0,
        });
        bucket.total += record.amount();
        bucket.count += 1;
    }

    for bucket in buckets.values_mut() {
        bucket.average = safe_div(bucket.total, bucket.count as f64);
    }

    buckets
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{Earning, Expense};

    fn date(s: &str) -> DateTime<Utc> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_day_key_format() {
        assert_eq!(day_key(date("2024-03-01")), "3/1/2024");
        assert_eq!(day_key(date("2024-12-25")), "12/25/2024");
    }

    #[test]
    fn test_week_key_truncates_to_monday() {
        // 2024-03-15 is a Friday; that week's Monday is 2024-03-11
        assert_eq!(week_key(date("2024-03-15")), "3/11/2024");
        assert_eq!(week_key(date("2024-03-11")), "3/11/2024");
    }

    #[test]
    fn test_month_key_format() {
        assert_eq!(month_key(date("2024-01-05")), "2024-01");
        assert_eq!(month_key(date("2024-11-30")), "2024-11");
    }

    #[test]
    fn test_month_grouping_merges_same_month() {
        let records: Vec<Record> = vec![
            Earning::new(date("2024-01-05"), 100.0).into(),
            Earning::new(date("2024-01-28"), 50.0).into(),
        ];

        let buckets = aggregate(&records, GroupBy::Month, &NameIndex::default());
        assert_eq!(buckets.len(), 1);
        let bucket = &buckets["2024-01"];
        assert_eq!(bucket.count, 2);
        assert_eq!(bucket.total, 150.0);
        assert_eq!(bucket.average, 75.0);
    }

    #[test]
    fn test_average_equals_total_over_count() {
        let records: Vec<Record> = vec![
            Expense::new(date("2024-03-01"), 10.0, "tools").into(),
            Expense::new(date("2024-03-02"), 20.0, "tools").into(),
            Expense::new(date("2024-03-03"), 40.0, "tools").into(),
        ];

        let buckets = aggregate(&records, GroupBy::Category, &NameIndex::default());
        for bucket in buckets.values() {
            assert_eq!(bucket.average, bucket.total / bucket.count as f64);
        }
    }

    #[test]
    fn test_category_fallback_is_uncategorized() {
        let records: Vec<Record> = vec![Earning::new(date("2024-03-01"), 100.0).into()];
        let buckets = aggregate(&records, GroupBy::Category, &NameIndex::default());
        assert!(buckets.contains_key(UNCATEGORIZED_LABEL));
    }

    #[test]
    fn test_dangling_client_resolves_to_unknown() {
        let records: Vec<Record> = vec![
            Earning::new(date("2024-03-01"), 100.0)
                .with_client(uuid::Uuid::new_v4())
                .into(),
        ];
        let buckets = aggregate(&records, GroupBy::Client, &NameIndex::default());
        assert!(buckets.contains_key(UNKNOWN_LABEL));
    }

    #[test]
    fn test_aggregation_is_order_independent() {
        let mut records: Vec<Record> = vec![
            Earning::new(date("2024-03-01"), 100.0).into(),
            Earning::new(date("2024-03-01"), 50.0).into(),
            Earning::new(date("2024-03-02"), 25.0).into(),
        ];

        let forward = aggregate(&records, GroupBy::Day, &NameIndex::default());
        records.reverse();
        let backward = aggregate(&records, GroupBy::Day, &NameIndex::default());
        assert_eq!(forward, backward);
    }
}

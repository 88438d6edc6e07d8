use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// A concrete calendar window used to filter records for a report view.
/// Value object only; recomputed per view, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    pub fn new(label: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }

    /// The window of the same length immediately preceding this one.
    /// Used as the baseline for growth percentages.
    pub fn previous(&self) -> Period {
        let length = self.end - self.start;
        Period::new(format!("previous {}", self.label), self.start - length, self.start)
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        // Boundary instants are part of the period
        self.start <= instant && instant <= self.end
    }
}

/// Symbolic period selector. Unrecognized selector strings are rejected at
/// the parsing boundary, so resolution itself has no failure path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodRange {
    Today,
    Week,
    Month,
    Quarter,
    Year,
}

impl PeriodRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodRange::Today => "today",
            PeriodRange::Week => "week",
            PeriodRange::Month => "month",
            PeriodRange::Quarter => "quarter",
            PeriodRange::Year => "year",
        }
    }

    /// Resolve the symbolic range against "now" into a concrete window.
    /// "today" runs from midnight to now; the rolling ranges run from
    /// now minus 7 days / 1 month / 3 months / 1 year to now.
    pub fn resolve(&self, now: DateTime<Utc>) -> Period {
        let start = match self {
            PeriodRange::Today => now.date_naive().and_hms_opt(0, 0, 0).unwrap().and_utc(),
            PeriodRange::Week => now - Duration::days(7),
            PeriodRange::Month => now - Months::new(1),
            PeriodRange::Quarter => now - Months::new(3),
            PeriodRange::Year => now - Months::new(12),
        };
        Period::new(self.as_str(), start, now)
    }
}

impl std::str::FromStr for PeriodRange {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" => Ok(PeriodRange::Today),
            "week" => Ok(PeriodRange::Week),
            "month" => Ok(PeriodRange::Month),
            "quarter" => Ok(PeriodRange::Quarter),
            "year" => Ok(PeriodRange::Year),
            other => Err(ParsePeriodError(other.to_string())),
        }
    }
}

impl std::fmt::Display for PeriodRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePeriodError(pub String);

impl std::fmt::Display for ParsePeriodError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown period '{}' (expected today, week, month, quarter or year)",
            self.0
        )
    }
}

impl std::error::Error for ParsePeriodError {}

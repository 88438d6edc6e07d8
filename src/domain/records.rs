use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Amount;

pub type EarningId = Uuid;
pub type ExpenseId = Uuid;
pub type TimeEntryId = Uuid;
pub type ClientId = Uuid;
pub type PlatformId = Uuid;

/// Money earned from freelance work. Immutable once written; corrections are
/// made by deleting and re-adding the entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Earning {
    pub id: EarningId,
    pub date: DateTime<Utc>,
    pub amount: Amount,
    /// Marketplace/platform the work came through (e.g. a job board)
    pub platform_id: Option<PlatformId>,
    pub client_id: Option<ClientId>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl Earning {
    pub fn new(date: DateTime<Utc>, amount: Amount) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount,
            platform_id: None,
            client_id: None,
            category: None,
            description: None,
        }
    }

    pub fn with_platform(mut self, platform_id: PlatformId) -> Self {
        self.platform_id = Some(platform_id);
        self
    }

    pub fn with_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A business expense. Category is mandatory here, unlike earnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub date: DateTime<Utc>,
    pub amount: Amount,
    pub category: String,
    pub description: Option<String>,
}

impl Expense {
    pub fn new(date: DateTime<Utc>, amount: Amount, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount,
            category: category.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A tracked work session. `duration_seconds` is authoritative; `end_time`
/// is absent for sessions that were never stopped cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: TimeEntryId,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_seconds: i64,
    /// Billable value of the session, when known
    pub total_amount: Option<Amount>,
    pub client_id: Option<ClientId>,
}

impl TimeEntry {
    pub fn new(start_time: DateTime<Utc>, duration_seconds: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_time,
            end_time: None,
            duration_seconds: duration_seconds.max(0),
            total_amount: None,
            client_id: None,
        }
    }

    pub fn with_end_time(mut self, end_time: DateTime<Utc>) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn with_total_amount(mut self, total_amount: Amount) -> Self {
        self.total_amount = Some(total_amount);
        self
    }

    pub fn with_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn hours(&self) -> f64 {
        self.duration_seconds as f64 / 3600.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    Active,
    Archived,
}

impl ClientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Active => "active",
            ClientStatus::Archived => "archived",
        }
    }
}

impl std::fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub status: ClientStatus,
}

impl Client {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: ClientStatus::Active,
        }
    }

    pub fn is_archived(&self) -> bool {
        self.status == ClientStatus::Archived
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: PlatformId,
    pub name: String,
}

impl Platform {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Discriminated union over the record kinds the aggregation pipeline
/// consumes. Resolved once at the data-loading boundary, so the pipeline
/// never probes field presence to figure out what it is holding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    Earning(Earning),
    Expense(Expense),
    Time(TimeEntry),
}

impl Record {
    /// The calendar instant used for period filtering and date bucketing.
    /// Time entries bucket by when the session started.
    pub fn date(&self) -> DateTime<Utc> {
        match self {
            Record::Earning(e) => e.date,
            Record::Expense(e) => e.date,
            Record::Time(t) => t.start_time,
        }
    }

    /// The monetary value aggregated into bucket totals. Time entries with
    /// no billable amount contribute 0.
    pub fn amount(&self) -> Amount {
        match self {
            Record::Earning(e) => e.amount,
            Record::Expense(e) => e.amount,
            Record::Time(t) => t.total_amount.unwrap_or(0.0),
        }
    }

    pub fn client_id(&self) -> Option<ClientId> {
        match self {
            Record::Earning(e) => e.client_id,
            Record::Expense(_) => None,
            Record::Time(t) => t.client_id,
        }
    }

    pub fn platform_id(&self) -> Option<PlatformId> {
        match self {
            Record::Earning(e) => e.platform_id,
            Record::Expense(_) | Record::Time(_) => None,
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            Record::Earning(e) => e.category.as_deref(),
            Record::Expense(e) => Some(e.category.as_str()),
            Record::Time(_) => None,
        }
    }

    /// Tracked hours; 0 for money-only records.
    pub fn hours(&self) -> f64 {
        match self {
            Record::Time(t) => t.hours(),
            _ => 0.0,
        }
    }
}

impl From<Earning> for Record {
    fn from(e: Earning) -> Self {
        Record::Earning(e)
    }
}

impl From<Expense> for Record {
    fn from(e: Expense) -> Self {
        Record::Expense(e)
    }
}

impl From<TimeEntry> for Record {
    fn from(t: TimeEntry) -> Self {
        Record::Time(t)
    }
}

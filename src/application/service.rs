use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{
    Client, ClientId, Earning, EarningId, Expense, ExpenseId, GroupBy, NameIndex, Period,
    Platform, PlatformId, Record, RecordFilter, Summary, TimeEntry, TimeEntryId, aggregate,
    chart_points, filter_records, growth_percentage, hourly_rate, summarize, time_series,
};
use crate::storage::RecordStore;

use super::{
    AppError, BreakdownReport, DashboardReport, PeriodComparisonReport, PeriodTotals, TimeReport,
};

/// Which record collection a report runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Earnings,
    Expenses,
    Time,
}

impl Dataset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Earnings => "earnings",
            Dataset::Expenses => "expenses",
            Dataset::Time => "time",
        }
    }
}

impl std::str::FromStr for Dataset {
    type Err = ParseDatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "earnings" => Ok(Dataset::Earnings),
            "expenses" => Ok(Dataset::Expenses),
            "time" => Ok(Dataset::Time),
            other => Err(ParseDatasetError(other.to_string())),
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDatasetError(pub String);

impl std::fmt::Display for ParseDatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown record set '{}' (expected earnings, expenses or time)",
            self.0
        )
    }
}

impl std::error::Error for ParseDatasetError {}

/// Application service running the reporting pipeline over an injected
/// record store. This is the primary interface for any client (CLI, API,
/// TUI, etc.).
pub struct ReportService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> ReportService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // ========================
    // Record loading
    // ========================

    /// Load one collection and resolve it into the tagged record union.
    /// This is the only place shapes are decided; the pipeline stages never
    /// probe what they are holding.
    pub fn load_records(&self, dataset: Dataset) -> Result<Vec<Record>, AppError> {
        let records: Vec<Record> = match dataset {
            Dataset::Earnings => self
                .store
                .list_earnings()?
                .into_iter()
                .map(Record::from)
                .collect(),
            Dataset::Expenses => self
                .store
                .list_expenses()?
                .into_iter()
                .map(Record::from)
                .collect(),
            Dataset::Time => self
                .store
                .list_time_entries()?
                .into_iter()
                .map(Record::from)
                .collect(),
        };
        debug!(dataset = dataset.as_str(), count = records.len(), "loaded records");
        Ok(records)
    }

    fn name_index(&self) -> Result<NameIndex, AppError> {
        let clients = self.store.list_clients()?;
        let platforms = self.store.list_platforms()?;
        Ok(NameIndex::new(&clients, &platforms))
    }

    // ========================
    // Reports
    // ========================

    /// Run the full pipeline: filter the record set to the period, bucket it
    /// along the dimension, summarize, and reshape into chart rows. The
    /// summary carries growth vs the preceding window of the same length.
    pub fn breakdown(
        &self,
        dataset: Dataset,
        period: &Period,
        group_by: GroupBy,
        filter: &RecordFilter,
    ) -> Result<BreakdownReport, AppError> {
        let records = self.load_records(dataset)?;
        let names = self.name_index()?;

        let current = filter_records(&records, period, filter);
        let previous = filter_records(&records, &period.previous(), filter);
        let previous_total = previous.iter().map(|r| r.amount()).sum();

        let buckets = aggregate(&current, group_by, &names);
        let summary = summarize(&current, Some(previous_total));

        Ok(BreakdownReport {
            period: period.clone(),
            group_by: group_by.as_str().to_string(),
            rows: chart_points(&buckets, group_by),
            summary,
        })
    }

    /// Plain summary of a record set over a period, no bucketing.
    pub fn summary(
        &self,
        dataset: Dataset,
        period: &Period,
        filter: &RecordFilter,
    ) -> Result<Summary, AppError> {
        let records = self.load_records(dataset)?;
        let current = filter_records(&records, period, filter);
        let previous = filter_records(&records, &period.previous(), filter);
        let previous_total = previous.iter().map(|r| r.amount()).sum();
        Ok(summarize(&current, Some(previous_total)))
    }

    /// Compare a record set's totals against the preceding window of the
    /// same length.
    pub fn compare(
        &self,
        dataset: Dataset,
        period: &Period,
    ) -> Result<PeriodComparisonReport, AppError> {
        let records = self.load_records(dataset)?;
        let previous_period = period.previous();

        let current = filter_records(&records, period, &RecordFilter::default());
        let previous = filter_records(&records, &previous_period, &RecordFilter::default());

        let current_total: f64 = current.iter().map(|r| r.amount()).sum();
        let previous_total: f64 = previous.iter().map(|r| r.amount()).sum();

        Ok(PeriodComparisonReport {
            current: PeriodTotals {
                period: period.clone(),
                total: current_total,
                count: current.len() as i64,
            },
            previous: PeriodTotals {
                period: previous_period,
                total: previous_total,
                count: previous.len() as i64,
            },
            change: current_total - previous_total,
            growth: growth_percentage(current_total, previous_total),
        })
    }

    /// Tracked time over a period: per-day series, totals and the effective
    /// hourly rate.
    pub fn time_report(&self, period: &Period) -> Result<TimeReport, AppError> {
        let entries: Vec<TimeEntry> = self
            .store
            .list_time_entries()?
            .into_iter()
            .filter(|t| period.contains(t.start_time))
            .collect();

        let total_hours: f64 = entries.iter().map(|t| t.hours()).sum();
        let billable_total: f64 = entries.iter().filter_map(|t| t.total_amount).sum();

        Ok(TimeReport {
            period: period.clone(),
            days: time_series(&entries),
            entry_count: entries.len() as i64,
            total_hours,
            billable_total,
            hourly_rate: hourly_rate(billable_total, total_hours),
        })
    }

    /// The landing-page report: this period's earnings and expenses with
    /// growth vs the previous one, plus the top clients by earnings.
    pub fn dashboard(&self, period: &Period) -> Result<DashboardReport, AppError> {
        let no_filter = RecordFilter::default();
        let earnings = self.summary(Dataset::Earnings, period, &no_filter)?;
        let expenses = self.summary(Dataset::Expenses, period, &no_filter)?;
        let net = earnings.total - expenses.total;

        let records = self.load_records(Dataset::Earnings)?;
        let names = self.name_index()?;
        let current = filter_records(&records, period, &no_filter);
        let buckets = aggregate(&current, GroupBy::Client, &names);
        let mut top_clients = chart_points(&buckets, GroupBy::Client);
        top_clients.truncate(5);

        Ok(DashboardReport {
            period: period.clone(),
            earnings,
            expenses,
            net,
            top_clients,
        })
    }

    // ========================
    // Client operations
    // ========================

    /// Register a new client. Names must be unique.
    pub fn create_client(&mut self, name: String) -> Result<Client, AppError> {
        if self.find_client(&name)?.is_some() {
            return Err(AppError::ClientAlreadyExists(name));
        }
        let client = Client::new(name);
        self.store.save_client(&client)?;
        Ok(client)
    }

    /// Look up a client by name (case-insensitive).
    pub fn find_client(&self, name: &str) -> Result<Option<Client>, AppError> {
        Ok(self
            .store
            .list_clients()?
            .into_iter()
            .find(|c| c.name.eq_ignore_ascii_case(name)))
    }

    pub fn get_client(&self, name: &str) -> Result<Client, AppError> {
        self.find_client(name)?
            .ok_or_else(|| AppError::ClientNotFound(name.to_string()))
    }

    pub fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        Ok(self.store.list_clients()?)
    }

    fn resolve_client_id(&self, name: Option<&str>) -> Result<Option<ClientId>, AppError> {
        match name {
            Some(name) => Ok(Some(self.get_client(name)?.id)),
            None => Ok(None),
        }
    }

    fn resolve_platform_id(&self, name: Option<&str>) -> Result<Option<PlatformId>, AppError> {
        match name {
            Some(name) => Ok(Some(self.get_platform(name)?.id)),
            None => Ok(None),
        }
    }

    /// Register a platform, creating it only if the name is new.
    pub fn create_platform(&mut self, name: String) -> Result<Platform, AppError> {
        if let Some(existing) = self
            .store
            .list_platforms()?
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(&name))
        {
            return Ok(existing);
        }
        let platform = Platform::new(name);
        self.store.save_platform(&platform)?;
        Ok(platform)
    }

    /// Look up a platform by name (case-insensitive).
    pub fn get_platform(&self, name: &str) -> Result<Platform, AppError> {
        self.store
            .list_platforms()?
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| AppError::PlatformNotFound(name.to_string()))
    }

    pub fn list_platforms(&self) -> Result<Vec<Platform>, AppError> {
        Ok(self.store.list_platforms()?)
    }

    // ========================
    // Record entry
    // ========================

    /// Record an earning. Client and platform are referenced by name and
    /// must already exist.
    pub fn record_earning(
        &mut self,
        date: DateTime<Utc>,
        amount: f64,
        client: Option<&str>,
        platform: Option<&str>,
        category: Option<String>,
        description: Option<String>,
    ) -> Result<Earning, AppError> {
        if !amount.is_finite() {
            return Err(AppError::InvalidAmount("Amount must be a number".into()));
        }

        let mut earning = Earning::new(date, amount);
        if let Some(client_id) = self.resolve_client_id(client)? {
            earning = earning.with_client(client_id);
        }
        if let Some(platform_id) = self.resolve_platform_id(platform)? {
            earning = earning.with_platform(platform_id);
        }
        if let Some(category) = category {
            earning = earning.with_category(category);
        }
        if let Some(description) = description {
            earning = earning.with_description(description);
        }

        self.store.save_earning(&earning)?;
        Ok(earning)
    }

    pub fn record_expense(
        &mut self,
        date: DateTime<Utc>,
        amount: f64,
        category: String,
        description: Option<String>,
    ) -> Result<Expense, AppError> {
        if !amount.is_finite() {
            return Err(AppError::InvalidAmount("Amount must be a number".into()));
        }

        let mut expense = Expense::new(date, amount, category);
        if let Some(description) = description {
            expense = expense.with_description(description);
        }

        self.store.save_expense(&expense)?;
        Ok(expense)
    }

    /// Record a finished work session. End time is derived from start and
    /// duration.
    pub fn record_time_entry(
        &mut self,
        start_time: DateTime<Utc>,
        duration_seconds: i64,
        total_amount: Option<f64>,
        client: Option<&str>,
    ) -> Result<TimeEntry, AppError> {
        let mut entry = TimeEntry::new(start_time, duration_seconds)
            .with_end_time(start_time + chrono::Duration::seconds(duration_seconds.max(0)));
        if let Some(total_amount) = total_amount {
            entry = entry.with_total_amount(total_amount);
        }
        if let Some(client_id) = self.resolve_client_id(client)? {
            entry = entry.with_client(client_id);
        }

        self.store.save_time_entry(&entry)?;
        Ok(entry)
    }

    pub fn list_earnings(&self) -> Result<Vec<Earning>, AppError> {
        Ok(self.store.list_earnings()?)
    }

    pub fn list_expenses(&self) -> Result<Vec<Expense>, AppError> {
        Ok(self.store.list_expenses()?)
    }

    pub fn list_time_entries(&self) -> Result<Vec<TimeEntry>, AppError> {
        Ok(self.store.list_time_entries()?)
    }

    pub fn delete_earning(&mut self, id: EarningId) -> Result<(), AppError> {
        if !self.store.delete_earning(id)? {
            return Err(AppError::RecordNotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn delete_expense(&mut self, id: ExpenseId) -> Result<(), AppError> {
        if !self.store.delete_expense(id)? {
            return Err(AppError::RecordNotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn delete_time_entry(&mut self, id: TimeEntryId) -> Result<(), AppError> {
        if !self.store.delete_time_entry(id)? {
            return Err(AppError::RecordNotFound(id.to_string()));
        }
        Ok(())
    }
}

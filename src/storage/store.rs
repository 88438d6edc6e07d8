use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::{
    Client, ClientId, Earning, EarningId, Expense, ExpenseId, Platform, TimeEntry, TimeEntryId,
};

/// Collection keys, one JSON array per key.
pub const EARNINGS_KEY: &str = "earnings";
pub const EXPENSES_KEY: &str = "expenses";
pub const TIME_ENTRIES_KEY: &str = "time_entries";
pub const CLIENTS_KEY: &str = "clients";
pub const PLATFORMS_KEY: &str = "platforms";

/// Read/write access to the raw record collections. The reporting service is
/// generic over this trait, so reports can run against fixtures as easily as
/// against files on disk.
pub trait RecordStore {
    fn list_earnings(&self) -> Result<Vec<Earning>>;
    fn list_expenses(&self) -> Result<Vec<Expense>>;
    fn list_time_entries(&self) -> Result<Vec<TimeEntry>>;
    fn list_clients(&self) -> Result<Vec<Client>>;
    fn list_platforms(&self) -> Result<Vec<Platform>>;

    fn save_earning(&mut self, earning: &Earning) -> Result<()>;
    fn save_expense(&mut self, expense: &Expense) -> Result<()>;
    fn save_time_entry(&mut self, entry: &TimeEntry) -> Result<()>;
    fn save_client(&mut self, client: &Client) -> Result<()>;
    fn save_platform(&mut self, platform: &Platform) -> Result<()>;

    /// Delete by id. Returns false when no record matched.
    fn delete_earning(&mut self, id: EarningId) -> Result<bool>;
    fn delete_expense(&mut self, id: ExpenseId) -> Result<bool>;
    fn delete_time_entry(&mut self, id: TimeEntryId) -> Result<bool>;
    fn delete_client(&mut self, id: ClientId) -> Result<bool>;
}

/// File-backed store: one `<key>.json` file per collection under a data
/// directory. Reads recover silently from missing or malformed files by
/// returning an empty collection; writes rewrite the whole file, so the
/// last writer wins.
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    /// Open a store rooted at the given directory, creating it if needed.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;
        Ok(Self { data_dir })
    }

    fn collection_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let path = self.collection_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(key, %err, "malformed collection file, treating as empty");
                Vec::new()
            }
        }
    }

    fn store<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let path = self.collection_path(key);
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write collection {}", path.display()))?;
        Ok(())
    }

    fn append<T: Serialize + DeserializeOwned + Clone>(&self, key: &str, record: &T) -> Result<()> {
        let mut records: Vec<T> = self.load(key);
        records.push(record.clone());
        self.store(key, &records)
    }

    fn remove<T, F>(&self, key: &str, matches: F) -> Result<bool>
    where
        T: Serialize + DeserializeOwned,
        F: Fn(&T) -> bool,
    {
        let mut records: Vec<T> = self.load(key);
        let before = records.len();
        records.retain(|r| !matches(r));
        if records.len() == before {
            return Ok(false);
        }
        self.store(key, &records)?;
        Ok(true)
    }
}

impl RecordStore for JsonStore {
    fn list_earnings(&self) -> Result<Vec<Earning>> {
        Ok(self.load(EARNINGS_KEY))
    }

    fn list_expenses(&self) -> Result<Vec<Expense>> {
        Ok(self.load(EXPENSES_KEY))
    }

    fn list_time_entries(&self) -> Result<Vec<TimeEntry>> {
        Ok(self.load(TIME_ENTRIES_KEY))
    }

    fn list_clients(&self) -> Result<Vec<Client>> {
        Ok(self.load(CLIENTS_KEY))
    }

    fn list_platforms(&self) -> Result<Vec<Platform>> {
        Ok(self.load(PLATFORMS_KEY))
    }

    fn save_earning(&mut self, earning: &Earning) -> Result<()> {
        self.append(EARNINGS_KEY, earning)
    }

    fn save_expense(&mut self, expense: &Expense) -> Result<()> {
        self.append(EXPENSES_KEY, expense)
    }

    fn save_time_entry(&mut self, entry: &TimeEntry) -> Result<()> {
        self.append(TIME_ENTRIES_KEY, entry)
    }

    fn save_client(&mut self, client: &Client) -> Result<()> {
        self.append(CLIENTS_KEY, client)
    }

    fn save_platform(&mut self, platform: &Platform) -> Result<()> {
        self.append(PLATFORMS_KEY, platform)
    }

    fn delete_earning(&mut self, id: EarningId) -> Result<bool> {
        self.remove(EARNINGS_KEY, |e: &Earning| e.id == id)
    }

    fn delete_expense(&mut self, id: ExpenseId) -> Result<bool> {
        self.remove(EXPENSES_KEY, |e: &Expense| e.id == id)
    }

    fn delete_time_entry(&mut self, id: TimeEntryId) -> Result<bool> {
        self.remove(TIME_ENTRIES_KEY, |t: &TimeEntry| t.id == id)
    }

    fn delete_client(&mut self, id: ClientId) -> Result<bool> {
        self.remove(CLIENTS_KEY, |c: &Client| c.id == id)
    }
}

/// In-memory store for tests and fixtures.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub earnings: Vec<Earning>,
    pub expenses: Vec<Expense>,
    pub time_entries: Vec<TimeEntry>,
    pub clients: Vec<Client>,
    pub platforms: Vec<Platform>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn list_earnings(&self) -> Result<Vec<Earning>> {
        Ok(self.earnings.clone())
    }

    fn list_expenses(&self) -> Result<Vec<Expense>> {
        Ok(self.expenses.clone())
    }

    fn list_time_entries(&self) -> Result<Vec<TimeEntry>> {
        Ok(self.time_entries.clone())
    }

    fn list_clients(&self) -> Result<Vec<Client>> {
        Ok(self.clients.clone())
    }

    fn list_platforms(&self) -> Result<Vec<Platform>> {
        Ok(self.platforms.clone())
    }

    fn save_earning(&mut self, earning: &Earning) -> Result<()> {
        self.earnings.push(earning.clone());
        Ok(())
    }

    fn save_expense(&mut self, expense: &Expense) -> Result<()> {
        self.expenses.push(expense.clone());
        Ok(())
    }

    fn save_time_entry(&mut self, entry: &TimeEntry) -> Result<()> {
        self.time_entries.push(entry.clone());
        Ok(())
    }

    fn save_client(&mut self, client: &Client) -> Result<()> {
        self.clients.push(client.clone());
        Ok(())
    }

    fn save_platform(&mut self, platform: &Platform) -> Result<()> {
        self.platforms.push(platform.clone());
        Ok(())
    }

    fn delete_earning(&mut self, id: EarningId) -> Result<bool> {
        let before = self.earnings.len();
        self.earnings.retain(|e| e.id != id);
        Ok(self.earnings.len() != before)
    }

    fn delete_expense(&mut self, id: ExpenseId) -> Result<bool> {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        Ok(self.expenses.len() != before)
    }

    fn delete_time_entry(&mut self, id: TimeEntryId) -> Result<bool> {
        let before = self.time_entries.len();
        self.time_entries.retain(|t| t.id != id);
        Ok(self.time_entries.len() != before)
    }

    fn delete_client(&mut self, id: ClientId) -> Result<bool> {
        let before = self.clients.len();
        self.clients.retain(|c| c.id != id);
        Ok(self.clients.len() != before)
    }
}

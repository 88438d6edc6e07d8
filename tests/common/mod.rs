// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use gigbook::application::ReportService;
use gigbook::domain::Period;
use gigbook::{JsonStore, MemoryStore};
use tempfile::TempDir;

/// Helper to create a test service backed by an in-memory store
pub fn memory_service() -> ReportService<MemoryStore> {
    ReportService::new(MemoryStore::new())
}

/// Helper to create a test service backed by a temporary data directory
pub fn file_service() -> Result<(ReportService<JsonStore>, TempDir)> {
    let temp_dir = TempDir::new()?;
    let store = JsonStore::open(temp_dir.path())?;
    Ok((ReportService::new(store), temp_dir))
}

/// Helper to parse a date string into DateTime<Utc>
pub fn parse_date(date_str: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

/// A period covering all of March 2024, boundaries included
pub fn march_2024() -> Period {
    Period::new("custom", parse_date("2024-03-01"), parse_date("2024-03-31"))
}

/// A period covering all of February 2024
pub fn february_2024() -> Period {
    Period::new("custom", parse_date("2024-02-01"), parse_date("2024-02-29"))
}

/// Test fixture: a small book of freelance records
pub struct StandardBook;

impl StandardBook {
    /// Two clients and a platform
    pub fn create_contacts<S: gigbook::RecordStore>(service: &mut ReportService<S>) -> Result<()> {
        service.create_client("Acme Corp".into())?;
        service.create_client("Globex".into())?;
        service.create_platform("Upwork".into())?;
        Ok(())
    }

    /// A March of earnings across both clients plus some expenses
    pub fn fill_march<S: gigbook::RecordStore>(service: &mut ReportService<S>) -> Result<()> {
        Self::create_contacts(service)?;

        service.record_earning(
            parse_date("2024-03-01"),
            100.0,
            Some("Acme Corp"),
            None,
            Some("consulting".into()),
            None,
        )?;
        service.record_earning(
            parse_date("2024-03-02"),
            200.0,
            Some("Globex"),
            Some("Upwork"),
            Some("design".into()),
            None,
        )?;
        service.record_earning(parse_date("2024-03-15"), 50.0, None, None, None, None)?;

        service.record_expense(
            parse_date("2024-03-10"),
            30.0,
            "software".into(),
            Some("IDE license".into()),
        )?;
        service.record_expense(parse_date("2024-03-20"), 70.0, "hardware".into(), None)?;

        Ok(())
    }
}

mod common;

use anyhow::Result;
use common::{march_2024, memory_service, parse_date};

#[test]
fn test_time_report_collapses_entries_per_day() -> Result<()> {
    let mut service = memory_service();
    service.create_client("Acme Corp".into())?;

    service.record_time_entry(parse_date("2024-03-04"), 7200, Some(80.0), Some("Acme Corp"))?;
    service.record_time_entry(parse_date("2024-03-04"), 3600, Some(40.0), None)?;
    service.record_time_entry(parse_date("2024-03-06"), 1800, None, None)?;

    let report = service.time_report(&march_2024())?;

    assert_eq!(report.entry_count, 3);
    assert_eq!(report.total_hours, 3.5);
    assert_eq!(report.billable_total, 120.0);

    assert_eq!(report.days.len(), 2);
    assert_eq!(report.days[0].date, "3/4/2024");
    assert_eq!(report.days[0].hours, 3.0);
    assert_eq!(report.days[0].amount, 120.0);
    assert_eq!(report.days[1].date, "3/6/2024");
    assert_eq!(report.days[1].hours, 0.5);

    Ok(())
}

#[test]
fn test_hourly_rate_over_tracked_hours() -> Result<()> {
    let mut service = memory_service();
    service.record_time_entry(parse_date("2024-03-04"), 4 * 3600, Some(100.0), None)?;

    let report = service.time_report(&march_2024())?;
    assert_eq!(report.hourly_rate, 25.0);

    Ok(())
}

#[test]
fn test_hourly_rate_is_zero_when_nothing_tracked() -> Result<()> {
    let service = memory_service();
    let report = service.time_report(&march_2024())?;

    assert_eq!(report.entry_count, 0);
    assert_eq!(report.total_hours, 0.0);
    assert_eq!(report.hourly_rate, 0.0);
    assert!(report.days.is_empty());

    Ok(())
}

#[test]
fn test_entries_outside_the_period_are_ignored() -> Result<()> {
    let mut service = memory_service();
    service.record_time_entry(parse_date("2024-02-15"), 3600, Some(50.0), None)?;
    service.record_time_entry(parse_date("2024-03-15"), 3600, Some(60.0), None)?;

    let report = service.time_report(&march_2024())?;
    assert_eq!(report.entry_count, 1);
    assert_eq!(report.billable_total, 60.0);

    Ok(())
}

#[test]
fn test_recorded_entry_derives_end_time() -> Result<()> {
    let mut service = memory_service();
    let entry = service.record_time_entry(parse_date("2024-03-04"), 5400, None, None)?;

    assert_eq!(entry.duration_seconds, 5400);
    assert_eq!(
        entry.end_time,
        Some(parse_date("2024-03-04") + chrono::Duration::seconds(5400))
    );

    Ok(())
}

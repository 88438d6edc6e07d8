mod common;

use anyhow::Result;
use common::{StandardBook, march_2024, memory_service, parse_date};
use gigbook::application::Dataset;
use gigbook::domain::{GroupBy, Period, RecordFilter};

#[test]
fn test_daily_breakdown_of_march_earnings() -> Result<()> {
    let mut service = memory_service();
    service.record_earning(parse_date("2024-03-01"), 100.0, None, None, None, None)?;
    service.record_earning(parse_date("2024-03-02"), 200.0, None, None, None, None)?;

    let report = service.breakdown(
        Dataset::Earnings,
        &march_2024(),
        GroupBy::Day,
        &RecordFilter::default(),
    )?;

    assert_eq!(report.rows.len(), 2);

    let first = &report.rows[0];
    assert_eq!(first.name, "3/1/2024");
    assert_eq!(first.value, 100.0);
    assert_eq!(first.count, 1);
    assert_eq!(first.average, 100.0);

    let second = &report.rows[1];
    assert_eq!(second.name, "3/2/2024");
    assert_eq!(second.value, 200.0);
    assert_eq!(second.count, 1);
    assert_eq!(second.average, 200.0);

    assert_eq!(report.summary.total, 300.0);
    assert_eq!(report.summary.count, 2);
    assert_eq!(report.summary.average, 150.0);

    Ok(())
}

#[test]
fn test_monthly_grouping_merges_records_of_the_same_month() -> Result<()> {
    let mut service = memory_service();
    service.record_earning(parse_date("2024-01-05"), 100.0, None, None, None, None)?;
    service.record_earning(parse_date("2024-01-28"), 40.0, None, None, None, None)?;

    let january = Period::new("custom", parse_date("2024-01-01"), parse_date("2024-01-31"));
    let report = service.breakdown(
        Dataset::Earnings,
        &january,
        GroupBy::Month,
        &RecordFilter::default(),
    )?;

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].name, "2024-01");
    assert_eq!(report.rows[0].count, 2);
    assert_eq!(report.rows[0].value, 140.0);

    Ok(())
}

#[test]
fn test_client_breakdown_resolves_names_and_unknowns() -> Result<()> {
    let mut service = memory_service();
    StandardBook::fill_march(&mut service)?;

    let report = service.breakdown(
        Dataset::Earnings,
        &march_2024(),
        GroupBy::Client,
        &RecordFilter::default(),
    )?;

    // Sorted by total descending
    assert_eq!(report.rows[0].name, "Globex");
    assert_eq!(report.rows[0].value, 200.0);

    let names: Vec<&str> = report.rows.iter().map(|r| r.name.as_str()).collect();
    assert!(names.contains(&"Acme Corp"));
    assert!(names.contains(&"Unknown"));

    Ok(())
}

#[test]
fn test_period_boundaries_are_inclusive() -> Result<()> {
    let mut service = memory_service();
    service.record_earning(parse_date("2024-02-29"), 1.0, None, None, None, None)?;
    service.record_earning(parse_date("2024-03-01"), 10.0, None, None, None, None)?;
    service.record_earning(parse_date("2024-03-31"), 20.0, None, None, None, None)?;
    service.record_earning(parse_date("2024-04-01"), 2.0, None, None, None, None)?;

    let summary = service.summary(Dataset::Earnings, &march_2024(), &RecordFilter::default())?;
    assert_eq!(summary.total, 30.0);
    assert_eq!(summary.count, 2);

    Ok(())
}

#[test]
fn test_summary_highest_and_lowest() -> Result<()> {
    let mut service = memory_service();
    for amount in [10.0, 50.0, 5.0] {
        service.record_earning(parse_date("2024-03-10"), amount, None, None, None, None)?;
    }

    let summary = service.summary(Dataset::Earnings, &march_2024(), &RecordFilter::default())?;
    assert_eq!(summary.highest, 50.0);
    assert_eq!(summary.lowest, 5.0);

    Ok(())
}

#[test]
fn test_growth_conventions_through_comparison() -> Result<()> {
    // Nothing in either window: growth is 0
    let service = memory_service();
    let report = service.compare(Dataset::Earnings, &march_2024())?;
    assert_eq!(report.growth, 0.0);

    // Empty previous window, non-empty current: growth is pinned to 100
    let mut service = memory_service();
    service.record_earning(parse_date("2024-03-10"), 50.0, None, None, None, None)?;
    let report = service.compare(Dataset::Earnings, &march_2024())?;
    assert_eq!(report.growth, 100.0);
    assert_eq!(report.change, 50.0);

    // 100 before, 150 now: 50% growth
    let mut service = memory_service();
    service.record_earning(parse_date("2024-02-10"), 100.0, None, None, None, None)?;
    service.record_earning(parse_date("2024-03-10"), 150.0, None, None, None, None)?;
    let report = service.compare(Dataset::Earnings, &march_2024())?;
    assert_eq!(report.growth, 50.0);

    Ok(())
}

#[test]
fn test_breakdown_with_amount_and_category_filters() -> Result<()> {
    let mut service = memory_service();
    StandardBook::fill_march(&mut service)?;

    let filter = RecordFilter {
        min_amount: Some(100.0),
        ..Default::default()
    };
    let report = service.breakdown(Dataset::Earnings, &march_2024(), GroupBy::Day, &filter)?;
    assert_eq!(report.summary.count, 2); // 100 and 200, the 50 is filtered out

    let filter = RecordFilter {
        category: Some("design".into()),
        ..Default::default()
    };
    let report = service.breakdown(Dataset::Earnings, &march_2024(), GroupBy::Day, &filter)?;
    assert_eq!(report.summary.total, 200.0);

    let filter = RecordFilter {
        platform_id: Some(service.list_platforms()?[0].id),
        ..Default::default()
    };
    let report = service.breakdown(Dataset::Earnings, &march_2024(), GroupBy::Day, &filter)?;
    assert_eq!(report.summary.total, 200.0); // Only the Upwork earning

    Ok(())
}

#[test]
fn test_expense_breakdown_by_category() -> Result<()> {
    let mut service = memory_service();
    StandardBook::fill_march(&mut service)?;

    let report = service.breakdown(
        Dataset::Expenses,
        &march_2024(),
        GroupBy::Category,
        &RecordFilter::default(),
    )?;

    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].name, "hardware");
    assert_eq!(report.rows[0].value, 70.0);
    assert_eq!(report.rows[1].name, "software");
    assert_eq!(report.rows[1].value, 30.0);

    Ok(())
}

#[test]
fn test_pipeline_is_idempotent() -> Result<()> {
    let mut service = memory_service();
    StandardBook::fill_march(&mut service)?;

    let first = service.breakdown(
        Dataset::Earnings,
        &march_2024(),
        GroupBy::Day,
        &RecordFilter::default(),
    )?;
    let second = service.breakdown(
        Dataset::Earnings,
        &march_2024(),
        GroupBy::Day,
        &RecordFilter::default(),
    )?;

    assert_eq!(first.rows, second.rows);
    assert_eq!(first.summary, second.summary);

    Ok(())
}

#[test]
fn test_dashboard_nets_earnings_against_expenses() -> Result<()> {
    let mut service = memory_service();
    StandardBook::fill_march(&mut service)?;

    let report = service.dashboard(&march_2024())?;
    assert_eq!(report.earnings.total, 350.0);
    assert_eq!(report.expenses.total, 100.0);
    assert_eq!(report.net, 250.0);

    // Top clients sorted by earnings
    assert_eq!(report.top_clients[0].name, "Globex");

    Ok(())
}

#[test]
fn test_empty_store_yields_empty_report_not_error() -> Result<()> {
    let service = memory_service();
    let report = service.breakdown(
        Dataset::Earnings,
        &march_2024(),
        GroupBy::Day,
        &RecordFilter::default(),
    )?;

    assert!(report.rows.is_empty());
    assert_eq!(report.summary.total, 0.0);
    assert_eq!(report.summary.average, 0.0);

    Ok(())
}

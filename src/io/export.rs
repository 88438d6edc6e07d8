use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::application::{BreakdownReport, ReportService, TimeReport};
use crate::domain::format_amount;
use crate::storage::RecordStore;

/// Exporter for converting records and reports to download-ready formats:
/// CSV with a header row, or pretty-printed JSON.
pub struct Exporter<'a, S: RecordStore> {
    service: &'a ReportService<S>,
}

impl<'a, S: RecordStore> Exporter<'a, S> {
    pub fn new(service: &'a ReportService<S>) -> Self {
        Self { service }
    }

    /// Export raw earnings to CSV. Client/platform columns carry resolved
    /// names where the reference is intact, empty otherwise.
    pub fn export_earnings_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let earnings = self.service.list_earnings()?;
        let clients = self.service.list_clients()?;
        let platforms = self.service.list_platforms()?;

        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record([
            "id",
            "date",
            "amount",
            "client",
            "platform",
            "category",
            "description",
        ])?;

        let mut count = 0;
        for earning in &earnings {
            let client = earning
                .client_id
                .and_then(|id| clients.iter().find(|c| c.id == id))
                .map(|c| c.name.clone())
                .unwrap_or_default();
            let platform = earning
                .platform_id
                .and_then(|id| platforms.iter().find(|p| p.id == id))
                .map(|p| p.name.clone())
                .unwrap_or_default();

            csv_writer.write_record([
                earning.id.to_string(),
                earning.date.to_rfc3339(),
                format_amount(earning.amount),
                client,
                platform,
                earning.category.clone().unwrap_or_default(),
                earning.description.clone().unwrap_or_default(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    pub fn export_expenses_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let expenses = self.service.list_expenses()?;
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["id", "date", "amount", "category", "description"])?;

        let mut count = 0;
        for expense in &expenses {
            csv_writer.write_record([
                expense.id.to_string(),
                expense.date.to_rfc3339(),
                format_amount(expense.amount),
                expense.category.clone(),
                expense.description.clone().unwrap_or_default(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    pub fn export_time_entries_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let entries = self.service.list_time_entries()?;
        let clients = self.service.list_clients()?;

        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record([
            "id",
            "start_time",
            "end_time",
            "duration_seconds",
            "hours",
            "total_amount",
            "client",
        ])?;

        let mut count = 0;
        for entry in &entries {
            let client = entry
                .client_id
                .and_then(|id| clients.iter().find(|c| c.id == id))
                .map(|c| c.name.clone())
                .unwrap_or_default();

            csv_writer.write_record([
                entry.id.to_string(),
                entry.start_time.to_rfc3339(),
                entry.end_time.map(|t| t.to_rfc3339()).unwrap_or_default(),
                entry.duration_seconds.to_string(),
                format!("{:.2}", entry.hours()),
                entry.total_amount.map(format_amount).unwrap_or_default(),
                client,
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    pub fn export_clients_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let clients = self.service.list_clients()?;
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["id", "name", "status"])?;

        let mut count = 0;
        for client in &clients {
            csv_writer.write_record([
                client.id.to_string(),
                client.name.clone(),
                client.status.to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export a breakdown report's rows to CSV.
    pub fn export_breakdown_csv<W: Write>(
        &self,
        report: &BreakdownReport,
        writer: W,
    ) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record([report.group_by.as_str(), "total", "count", "average"])?;

        let mut count = 0;
        for row in &report.rows {
            csv_writer.write_record([
                row.name.clone(),
                format_amount(row.value),
                row.count.to_string(),
                format_amount(row.average),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export a time report's daily series to CSV.
    pub fn export_time_report_csv<W: Write>(
        &self,
        report: &TimeReport,
        writer: W,
    ) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["date", "amount", "hours"])?;

        let mut count = 0;
        for day in &report.days {
            csv_writer.write_record([
                day.date.clone(),
                format_amount(day.amount),
                format!("{:.2}", day.hours),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export anything serializable as pretty-printed JSON.
    pub fn export_json<W: Write, T: Serialize>(&self, value: &T, mut writer: W) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

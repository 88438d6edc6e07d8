use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{Write, stdout};
use uuid::Uuid;

use crate::application::{Dataset, ReportService};
use crate::domain::{
    GroupBy, Period, PeriodRange, RecordFilter, Summary, format_amount, parse_amount,
};
use crate::io::Exporter;
use crate::storage::JsonStore;

/// Gigbook - Freelance Finance Tracker
#[derive(Parser)]
#[command(name = "gigbook")]
#[command(about = "A local-first finance tracker for freelancers: earnings, expenses, time and reports")]
#[command(version)]
pub struct Cli {
    /// Data directory holding the JSON record collections
    #[arg(short, long, default_value = "gigbook_data")]
    pub data_dir: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Earning management commands
    #[command(subcommand)]
    Earning(EarningCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Time entry management commands
    #[command(subcommand)]
    Time(TimeCommands),

    /// Client management commands
    #[command(subcommand)]
    Client(ClientCommands),

    /// Platform management commands
    #[command(subcommand)]
    Platform(PlatformCommands),

    /// Generate reports and analytics
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export records to CSV or JSON
    Export {
        /// What to export: earnings, expenses, time, clients
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json (default: csv)
        #[arg(short, long, default_value = "csv")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum EarningCommands {
    /// Record an earning
    Add {
        /// Amount earned (e.g., "150.00" or "150")
        amount: String,

        /// Date of the earning (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Client name (must exist)
        #[arg(long)]
        client: Option<String>,

        /// Platform name (must exist)
        #[arg(long)]
        platform: Option<String>,

        /// Category (e.g., "consulting", "design")
        #[arg(short, long)]
        category: Option<String>,

        /// Description
        #[arg(short = 'D', long)]
        description: Option<String>,
    },

    /// List recorded earnings
    List {
        /// Maximum number of earnings to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Delete an earning by id
    Delete {
        /// Earning ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Amount spent (e.g., "29.99")
        amount: String,

        /// Category (e.g., "software", "hardware")
        #[arg(short, long)]
        category: String,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Description
        #[arg(short = 'D', long)]
        description: Option<String>,
    },

    /// List recorded expenses
    List {
        /// Maximum number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Delete an expense by id
    Delete {
        /// Expense ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum TimeCommands {
    /// Record a finished work session
    Add {
        /// Tracked hours (e.g., "2.5")
        hours: String,

        /// Session start (YYYY-MM-DD or "YYYY-MM-DD HH:MM", defaults to now)
        #[arg(long)]
        start: Option<String>,

        /// Billable amount for the session
        #[arg(short, long)]
        amount: Option<String>,

        /// Client name (must exist)
        #[arg(long)]
        client: Option<String>,
    },

    /// List recorded time entries
    List {
        /// Maximum number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Delete a time entry by id
    Delete {
        /// Time entry ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ClientCommands {
    /// Register a new client
    Add {
        /// Client name (must be unique)
        name: String,
    },

    /// List clients
    List,
}

#[derive(Subcommand)]
pub enum PlatformCommands {
    /// Register a new platform
    Add {
        /// Platform name
        name: String,
    },

    /// List platforms
    List,
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Bucketed breakdown of a record set
    Breakdown {
        /// Record set: earnings, expenses, time
        #[arg(long, default_value = "earnings")]
        records: String,

        /// Dimension: day, week, month, client, platform, category, hour
        #[arg(short, long, default_value = "day")]
        group_by: String,

        /// Period: today, week, month, quarter, year
        #[arg(short, long, default_value = "month")]
        period: String,

        /// Custom start date (YYYY-MM-DD, overrides --period)
        #[arg(long)]
        from: Option<String>,

        /// Custom end date (YYYY-MM-DD, defaults to now)
        #[arg(long)]
        to: Option<String>,

        /// Keep only records with amount >= this
        #[arg(long)]
        min_amount: Option<String>,

        /// Keep only records with amount <= this
        #[arg(long)]
        max_amount: Option<String>,

        /// Keep only records for this client
        #[arg(long)]
        client: Option<String>,

        /// Keep only records from this platform
        #[arg(long)]
        platform: Option<String>,

        /// Keep only records in this category
        #[arg(long)]
        category: Option<String>,

        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Overall totals for a record set
    Summary {
        /// Record set: earnings, expenses, time
        #[arg(long, default_value = "earnings")]
        records: String,

        /// Period: today, week, month, quarter, year
        #[arg(short, long, default_value = "month")]
        period: String,

        /// Custom start date (YYYY-MM-DD, overrides --period)
        #[arg(long)]
        from: Option<String>,

        /// Custom end date (YYYY-MM-DD, defaults to now)
        #[arg(long)]
        to: Option<String>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Compare current period to the previous one
    Compare {
        /// Record set: earnings, expenses, time
        #[arg(long, default_value = "earnings")]
        records: String,

        /// Period: today, week, month, quarter, year
        #[arg(short, long, default_value = "month")]
        period: String,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Tracked time over a period
    Time {
        /// Period: today, week, month, quarter, year
        #[arg(short, long, default_value = "month")]
        period: String,

        /// Custom start date (YYYY-MM-DD, overrides --period)
        #[arg(long)]
        from: Option<String>,

        /// Custom end date (YYYY-MM-DD, defaults to now)
        #[arg(long)]
        to: Option<String>,

        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Current month at a glance
    Dashboard {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let store = JsonStore::open(&self.data_dir)?;
        let mut service = ReportService::new(store);

        match self.command {
            Commands::Earning(cmd) => run_earning_command(&mut service, cmd)?,
            Commands::Expense(cmd) => run_expense_command(&mut service, cmd)?,
            Commands::Time(cmd) => run_time_command(&mut service, cmd)?,
            Commands::Client(cmd) => run_client_command(&mut service, cmd)?,
            Commands::Platform(cmd) => run_platform_command(&mut service, cmd)?,
            Commands::Report(cmd) => run_report_command(&service, cmd)?,
            Commands::Export {
                export_type,
                output,
                format,
            } => run_export_command(&service, &export_type, output, &format)?,
        }

        Ok(())
    }
}

// ========================
// Parsing helpers
// ========================

fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap().and_utc());
    }
    if let Ok(datetime) = chrono::NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        return Ok(datetime.and_utc());
    }
    bail!("Invalid date '{}'. Use YYYY-MM-DD or 'YYYY-MM-DD HH:MM'", input)
}

fn parse_date_or_now(input: Option<&str>) -> Result<DateTime<Utc>> {
    match input {
        Some(input) => parse_date(input),
        None => Ok(Utc::now()),
    }
}

/// A custom --from/--to pair beats the symbolic --period selector.
fn resolve_period(period: &str, from: Option<String>, to: Option<String>) -> Result<Period> {
    if let Some(from) = from {
        let start = parse_date(&from)?;
        let end = match to {
            Some(to) => {
                // A bare end date means "through that whole day"
                parse_date(&to)? + chrono::Duration::days(1) - chrono::Duration::seconds(1)
            }
            None => Utc::now(),
        };
        if start > end {
            bail!(
                "Invalid date range: start {} is after end {}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            );
        }
        return Ok(Period::new("custom", start, end));
    }

    let range: PeriodRange = period.parse()?;
    Ok(range.resolve(Utc::now()))
}

fn parse_uuid(input: &str) -> Result<Uuid> {
    Uuid::parse_str(input).with_context(|| format!("Invalid id '{}'", input))
}

fn parse_amount_arg(input: &str) -> Result<f64> {
    parse_amount(input).with_context(|| format!("Invalid amount '{}'. Use '50.00' or '50'", input))
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}

// ========================
// Record commands
// ========================

fn run_earning_command(
    service: &mut ReportService<JsonStore>,
    cmd: EarningCommands,
) -> Result<()> {
    match cmd {
        EarningCommands::Add {
            amount,
            date,
            client,
            platform,
            category,
            description,
        } => {
            let amount = parse_amount_arg(&amount)?;
            let date = parse_date_or_now(date.as_deref())?;
            let earning = service.record_earning(
                date,
                amount,
                client.as_deref(),
                platform.as_deref(),
                category,
                description,
            )?;
            println!(
                "Recorded earning of {} on {} ({})",
                format_amount(earning.amount),
                earning.date.format("%Y-%m-%d"),
                earning.id
            );
        }

        EarningCommands::List { limit } => {
            let mut earnings = service.list_earnings()?;
            earnings.sort_by_key(|e| std::cmp::Reverse(e.date));
            if let Some(limit) = limit {
                earnings.truncate(limit);
            }

            if earnings.is_empty() {
                println!("No earnings recorded.");
                return Ok(());
            }

            println!(
                "{:<36} {:<12} {:>12} {:<20}",
                "ID", "DATE", "AMOUNT", "CATEGORY"
            );
            println!("{}", "-".repeat(84));
            for earning in &earnings {
                println!(
                    "{:<36} {:<12} {:>12} {:<20}",
                    earning.id,
                    earning.date.format("%Y-%m-%d"),
                    format_amount(earning.amount),
                    truncate(earning.category.as_deref().unwrap_or("-"), 20)
                );
            }
        }

        EarningCommands::Delete { id } => {
            let id = parse_uuid(&id)?;
            service.delete_earning(id)?;
            println!("Deleted earning {}", id);
        }
    }
    Ok(())
}

fn run_expense_command(
    service: &mut ReportService<JsonStore>,
    cmd: ExpenseCommands,
) -> Result<()> {
    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            description,
        } => {
            let amount = parse_amount_arg(&amount)?;
            let date = parse_date_or_now(date.as_deref())?;
            let expense = service.record_expense(date, amount, category, description)?;
            println!(
                "Recorded expense of {} on {} ({})",
                format_amount(expense.amount),
                expense.date.format("%Y-%m-%d"),
                expense.id
            );
        }

        ExpenseCommands::List { limit } => {
            let mut expenses = service.list_expenses()?;
            expenses.sort_by_key(|e| std::cmp::Reverse(e.date));
            if let Some(limit) = limit {
                expenses.truncate(limit);
            }

            if expenses.is_empty() {
                println!("No expenses recorded.");
                return Ok(());
            }

            println!(
                "{:<36} {:<12} {:>12} {:<20}",
                "ID", "DATE", "AMOUNT", "CATEGORY"
            );
            println!("{}", "-".repeat(84));
            for expense in &expenses {
                println!(
                    "{:<36} {:<12} {:>12} {:<20}",
                    expense.id,
                    expense.date.format("%Y-%m-%d"),
                    format_amount(expense.amount),
                    truncate(&expense.category, 20)
                );
            }
        }

        ExpenseCommands::Delete { id } => {
            let id = parse_uuid(&id)?;
            service.delete_expense(id)?;
            println!("Deleted expense {}", id);
        }
    }
    Ok(())
}

fn run_time_command(service: &mut ReportService<JsonStore>, cmd: TimeCommands) -> Result<()> {
    match cmd {
        TimeCommands::Add {
            hours,
            start,
            amount,
            client,
        } => {
            let hours: f64 = hours
                .parse()
                .with_context(|| format!("Invalid hours '{}'. Use e.g. '2.5'", hours))?;
            let start = parse_date_or_now(start.as_deref())?;
            let amount = amount.as_deref().map(parse_amount_arg).transpose()?;

            let entry = service.record_time_entry(
                start,
                (hours * 3600.0).round() as i64,
                amount,
                client.as_deref(),
            )?;
            println!(
                "Recorded {:.2}h starting {} ({})",
                entry.hours(),
                entry.start_time.format("%Y-%m-%d %H:%M"),
                entry.id
            );
        }

        TimeCommands::List { limit } => {
            let mut entries = service.list_time_entries()?;
            entries.sort_by_key(|e| std::cmp::Reverse(e.start_time));
            if let Some(limit) = limit {
                entries.truncate(limit);
            }

            if entries.is_empty() {
                println!("No time entries recorded.");
                return Ok(());
            }

            println!(
                "{:<36} {:<17} {:>8} {:>12}",
                "ID", "START", "HOURS", "AMOUNT"
            );
            println!("{}", "-".repeat(77));
            for entry in &entries {
                println!(
                    "{:<36} {:<17} {:>8.2} {:>12}",
                    entry.id,
                    entry.start_time.format("%Y-%m-%d %H:%M"),
                    entry.hours(),
                    entry.total_amount.map(format_amount).unwrap_or_else(|| "-".into())
                );
            }
        }

        TimeCommands::Delete { id } => {
            let id = parse_uuid(&id)?;
            service.delete_time_entry(id)?;
            println!("Deleted time entry {}", id);
        }
    }
    Ok(())
}

fn run_client_command(service: &mut ReportService<JsonStore>, cmd: ClientCommands) -> Result<()> {
    match cmd {
        ClientCommands::Add { name } => {
            let client = service.create_client(name)?;
            println!("Registered client '{}' ({})", client.name, client.id);
        }

        ClientCommands::List => {
            let clients = service.list_clients()?;
            if clients.is_empty() {
                println!("No clients registered.");
                return Ok(());
            }

            println!("{:<36} {:<30} {:<10}", "ID", "NAME", "STATUS");
            println!("{}", "-".repeat(78));
            for client in &clients {
                println!(
                    "{:<36} {:<30} {:<10}",
                    client.id,
                    truncate(&client.name, 30),
                    client.status
                );
            }
        }
    }
    Ok(())
}

fn run_platform_command(
    service: &mut ReportService<JsonStore>,
    cmd: PlatformCommands,
) -> Result<()> {
    match cmd {
        PlatformCommands::Add { name } => {
            let platform = service.create_platform(name)?;
            println!("Registered platform '{}' ({})", platform.name, platform.id);
        }

        PlatformCommands::List => {
            let platforms = service.list_platforms()?;
            if platforms.is_empty() {
                println!("No platforms registered.");
                return Ok(());
            }

            println!("{:<36} {:<30}", "ID", "NAME");
            println!("{}", "-".repeat(67));
            for platform in &platforms {
                println!("{:<36} {:<30}", platform.id, truncate(&platform.name, 30));
            }
        }
    }
    Ok(())
}

// ========================
// Report commands
// ========================

fn print_summary_table(summary: &Summary) {
    println!("Total:    {:>12}", format_amount(summary.total));
    println!("Count:    {:>12}", summary.count);
    println!("Average:  {:>12}", format_amount(summary.average));
    println!("Highest:  {:>12}", format_amount(summary.highest));
    println!("Lowest:   {:>12}", format_amount(summary.lowest));
    if let Some(growth) = summary.growth {
        println!("Growth:   {:>11.1}%", growth);
    }
}

fn run_report_command(service: &ReportService<JsonStore>, cmd: ReportCommands) -> Result<()> {
    match cmd {
        ReportCommands::Breakdown {
            records,
            group_by,
            period,
            from,
            to,
            min_amount,
            max_amount,
            client,
            platform,
            category,
            format,
        } => {
            let dataset: Dataset = records.parse()?;
            let group_by: GroupBy = group_by.parse()?;
            let period = resolve_period(&period, from, to)?;

            let filter = RecordFilter {
                min_amount: min_amount.as_deref().map(parse_amount_arg).transpose()?,
                max_amount: max_amount.as_deref().map(parse_amount_arg).transpose()?,
                client_id: client
                    .as_deref()
                    .map(|name| service.get_client(name).map(|c| c.id))
                    .transpose()?,
                platform_id: platform
                    .as_deref()
                    .map(|name| service.get_platform(name).map(|p| p.id))
                    .transpose()?,
                category,
            };

            let report = service.breakdown(dataset, &period, group_by, &filter)?;

            match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                "csv" => {
                    let exporter = Exporter::new(service);
                    exporter.export_breakdown_csv(&report, stdout())?;
                }
                _ => {
                    println!("{} by {}", dataset, report.group_by);
                    println!(
                        "Period: {} to {}",
                        report.period.start.format("%Y-%m-%d"),
                        report.period.end.format("%Y-%m-%d")
                    );
                    println!();
                    println!(
                        "{:<20} {:>12} {:>8} {:>12}",
                        report.group_by.to_uppercase(),
                        "TOTAL",
                        "COUNT",
                        "AVERAGE"
                    );
                    println!("{}", "-".repeat(56));
                    for row in &report.rows {
                        println!(
                            "{:<20} {:>12} {:>8} {:>12}",
                            truncate(&row.name, 20),
                            format_amount(row.value),
                            row.count,
                            format_amount(row.average)
                        );
                    }
                    println!("{}", "-".repeat(56));
                    print_summary_table(&report.summary);
                }
            }
        }

        ReportCommands::Summary {
            records,
            period,
            from,
            to,
            format,
        } => {
            let dataset: Dataset = records.parse()?;
            let period = resolve_period(&period, from, to)?;
            let summary = service.summary(dataset, &period, &RecordFilter::default())?;

            match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
                _ => {
                    println!("{} summary ({})", dataset, period.label);
                    println!(
                        "Period: {} to {}",
                        period.start.format("%Y-%m-%d"),
                        period.end.format("%Y-%m-%d")
                    );
                    println!();
                    print_summary_table(&summary);
                }
            }
        }

        ReportCommands::Compare {
            records,
            period,
            format,
        } => {
            let dataset: Dataset = records.parse()?;
            let range: PeriodRange = period.parse()?;
            let period = range.resolve(Utc::now());
            let report = service.compare(dataset, &period)?;

            match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                _ => {
                    println!("{} comparison ({})", dataset, report.current.period.label);
                    println!();
                    println!(
                        "Current:  {} to {}  total {:>12}  ({} records)",
                        report.current.period.start.format("%Y-%m-%d"),
                        report.current.period.end.format("%Y-%m-%d"),
                        format_amount(report.current.total),
                        report.current.count
                    );
                    println!(
                        "Previous: {} to {}  total {:>12}  ({} records)",
                        report.previous.period.start.format("%Y-%m-%d"),
                        report.previous.period.end.format("%Y-%m-%d"),
                        format_amount(report.previous.total),
                        report.previous.count
                    );
                    println!("{}", "-".repeat(60));
                    println!(
                        "Change:   {:>12}  ({:+.1}%)",
                        format_amount(report.change),
                        report.growth
                    );
                }
            }
        }

        ReportCommands::Time {
            period,
            from,
            to,
            format,
        } => {
            let period = resolve_period(&period, from, to)?;
            let report = service.time_report(&period)?;

            match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                "csv" => {
                    let exporter = Exporter::new(service);
                    exporter.export_time_report_csv(&report, stdout())?;
                }
                _ => {
                    println!("Time report ({})", report.period.label);
                    println!(
                        "Period: {} to {}",
                        report.period.start.format("%Y-%m-%d"),
                        report.period.end.format("%Y-%m-%d")
                    );
                    println!();
                    println!("{:<12} {:>10} {:>12}", "DATE", "HOURS", "AMOUNT");
                    println!("{}", "-".repeat(37));
                    for day in &report.days {
                        println!(
                            "{:<12} {:>10.2} {:>12}",
                            day.date,
                            day.hours,
                            format_amount(day.amount)
                        );
                    }
                    println!("{}", "-".repeat(37));
                    println!("Entries:       {:>8}", report.entry_count);
                    println!("Total hours:   {:>8.2}", report.total_hours);
                    println!(
                        "Billable:      {:>8}",
                        format_amount(report.billable_total)
                    );
                    println!(
                        "Hourly rate:   {:>8}",
                        format_amount(report.hourly_rate)
                    );
                }
            }
        }

        ReportCommands::Dashboard { format } => {
            let period = PeriodRange::Month.resolve(Utc::now());
            let report = service.dashboard(&period)?;

            match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                _ => {
                    println!("Dashboard (last month)");
                    println!(
                        "Period: {} to {}",
                        report.period.start.format("%Y-%m-%d"),
                        report.period.end.format("%Y-%m-%d")
                    );
                    println!();
                    println!(
                        "Earnings: {:>12}  ({} records{})",
                        format_amount(report.earnings.total),
                        report.earnings.count,
                        report
                            .earnings
                            .growth
                            .map(|g| format!(", {:+.1}%", g))
                            .unwrap_or_default()
                    );
                    println!(
                        "Expenses: {:>12}  ({} records{})",
                        format_amount(report.expenses.total),
                        report.expenses.count,
                        report
                            .expenses
                            .growth
                            .map(|g| format!(", {:+.1}%", g))
                            .unwrap_or_default()
                    );
                    println!("{}", "-".repeat(40));
                    println!("Net:      {:>12}", format_amount(report.net));

                    if !report.top_clients.is_empty() {
                        println!();
                        println!("Top clients:");
                        for (i, row) in report.top_clients.iter().enumerate() {
                            println!(
                                "  {}. {:<24} {:>12}",
                                i + 1,
                                truncate(&row.name, 24),
                                format_amount(row.value)
                            );
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

// ========================
// Export command
// ========================

fn run_export_command(
    service: &ReportService<JsonStore>,
    export_type: &str,
    output: Option<String>,
    format: &str,
) -> Result<()> {
    let exporter = Exporter::new(service);

    let mut writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create file {}", path))?,
        ),
        None => Box::new(stdout()),
    };

    let count = match (export_type, format) {
        ("earnings", "csv") => exporter.export_earnings_csv(&mut writer)?,
        ("expenses", "csv") => exporter.export_expenses_csv(&mut writer)?,
        ("time", "csv") => exporter.export_time_entries_csv(&mut writer)?,
        ("clients", "csv") => exporter.export_clients_csv(&mut writer)?,
        ("earnings", "json") => {
            let earnings = service.list_earnings()?;
            exporter.export_json(&earnings, &mut writer)?;
            earnings.len()
        }
        ("expenses", "json") => {
            let expenses = service.list_expenses()?;
            exporter.export_json(&expenses, &mut writer)?;
            expenses.len()
        }
        ("time", "json") => {
            let entries = service.list_time_entries()?;
            exporter.export_json(&entries, &mut writer)?;
            entries.len()
        }
        ("clients", "json") => {
            let clients = service.list_clients()?;
            exporter.export_json(&clients, &mut writer)?;
            clients.len()
        }
        ("earnings" | "expenses" | "time" | "clients", other) => {
            bail!("Unknown format '{}'. Valid: csv, json", other)
        }
        (other, _) => {
            bail!(
                "Unknown export type '{}'. Valid: earnings, expenses, time, clients",
                other
            )
        }
    };

    if let Some(path) = output {
        eprintln!("Exported {} record(s) to {}", count, path);
    }

    Ok(())
}

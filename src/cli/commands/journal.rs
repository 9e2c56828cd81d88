//! Journal command implementation.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use daytrader_config::AppConfig;
use daytrader_journal::{Journal, JournalSummary, TradeRecord};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::info;

use crate::cli::{JournalAddArgs, JournalCommand};

pub async fn run(command: JournalCommand, config: &AppConfig) -> Result<()> {
    let journal = Journal::open(&config.journal.path);

    match command {
        JournalCommand::Add(args) => add(&journal, args),
        JournalCommand::List { output } => list(&journal, &output),
        JournalCommand::Summary => {
            let records = load(&journal)?;
            println!("{}", JournalSummary::from_records(&records));
            Ok(())
        }
    }
}

fn add(journal: &Journal, args: JournalAddArgs) -> Result<()> {
    let date = match &args.date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .with_context(|| format!("Invalid date {d:?}, expected YYYY-MM-DD"))?,
        None => Local::now().date_naive(),
    };

    let record = TradeRecord::new(
        date,
        &args.symbol,
        decimal("entry", &args.entry)?,
        decimal("exit", &args.exit)?,
        decimal("qty", &args.qty)?,
    )?
    .with_setup(args.setup)
    .with_note(args.note);

    journal
        .append(&record)
        .with_context(|| format!("Failed to write {}", journal.path().display()))?;
    info!(symbol = %record.symbol, pnl = %record.pnl, "Trade recorded");
    println!(
        "Recorded {} {}: P/L {} ({:.2}%)",
        record.date,
        record.symbol,
        record.pnl,
        record.return_pct()
    );
    Ok(())
}

fn list(journal: &Journal, output: &str) -> Result<()> {
    let records = load(journal)?;

    if output == "json" {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }
    if records.is_empty() {
        println!("No trades recorded in {}", journal.path().display());
        return Ok(());
    }

    println!(
        "{:<10}  {:<10}  {:>10}  {:>10}  {:>8}  {:>10}  Setup",
        "Date", "Symbol", "Entry", "Exit", "Qty", "P/L"
    );
    for r in &records {
        println!(
            "{:<10}  {:<10}  {:>10}  {:>10}  {:>8}  {:>10}  {}",
            r.date.to_string(),
            r.symbol,
            r.entry_price.to_string(),
            r.exit_price.to_string(),
            r.quantity.to_string(),
            r.pnl.to_string(),
            r.setup
        );
    }
    Ok(())
}

fn load(journal: &Journal) -> Result<Vec<TradeRecord>> {
    journal
        .load()
        .with_context(|| format!("Failed to read {}", journal.path().display()))
}

fn decimal(field: &str, value: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim().replace(',', ".").as_str())
        .with_context(|| format!("Invalid {field} value {value:?}"))
}

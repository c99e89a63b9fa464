mod actors;
mod engine;
mod models;
mod normalizer;
mod sources;
mod storage;
mod types;

use std::io::{stderr, stdout, Write};
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::{RetrievalConfig, RetrievalOrchestrator, RetrievalSummary};
use crate::sources::{DirectoryPageSource, HttpPageSource, PageSource};
use crate::storage::AccountStorage;
use crate::types::Monetary;

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: A richer CLI would justify clap, three positional arguments do not
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: ledger-harvest [base_url|directory] [keyword:optional] [log_level:optional] > [report].csv");
        eprintln!("Pages are read from [base_url]/[n].json or [directory]/[n].json");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        eprintln!("Retries are tuned with LEDGER_HARVEST_MAX_ATTEMPTS, LEDGER_HARVEST_FETCH_TIMEOUT_MS, LEDGER_HARVEST_RETRY_BACKOFF_MS");
        exit(1);
    }

    let location = &args[1];
    let keyword = args.get(2).filter(|keyword| !keyword.trim().is_empty());
    let log_level = args.get(3)
        .map(|s| parse_log_level(s)).unwrap_or_else(|| LevelFilter::ERROR);

    setup_logging(log_level);

    let storage = Arc::new(AccountStorage::new());
    let config = RetrievalConfig::from_env();

    let timer = Instant::now();
    let summary = if location.starts_with("http://") || location.starts_with("https://") {
        retrieve(HttpPageSource::new(location.as_str()), storage.clone(), config).await?
    } else {
        retrieve(DirectoryPageSource::new(location.as_str()), storage.clone(), config).await?
    };
    let duration = timer.elapsed();

    info!("Retrieved [{}] records in: {duration:?}", summary.records_seen);

    write_report_to_stdout(&storage, keyword.map(String::as_str), Local::now().date_naive())?;

    Ok(())
}

async fn retrieve<P: PageSource>(source: P, storage: Arc<AccountStorage>, config: RetrievalConfig) -> Result<RetrievalSummary> {
    Ok(RetrievalOrchestrator::new(source, storage).with_config(config).run().await?)
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the report, logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

/// Balances first, then either the keyword matches or the per-account category summary.
fn write_report_to_stdout(storage: &AccountStorage, keyword: Option<&str>, today: NaiveDate) -> Result<()> {
    let names = storage.account_names();
    let mut output = csv::Writer::from_writer(stdout().lock());

    output.write_record(["account", "balance", "accepted", "rejected"])?;

    for name in &names {
        let balance = storage.balance_as_of(name, today).unwrap_or_default();

        let Some(account) = storage.get(name) else {
            continue;
        };

        output.write_record([
            name.as_str(),
            balance.to_string().as_str(),
            account.accepted().len().to_string().as_str(),
            account.rejected().len().to_string().as_str()
        ])?;
    }

    let mut output = output.into_inner().map_err(|error| error.into_error())?;
    writeln!(output)?;

    let mut output = csv::Writer::from_writer(output);

    match keyword {
        Some(keyword) => {
            output.write_record(["account", "date", "amount", "card", "ledger"])?;

            for name in &names {
                for transaction in storage.transactions_by_keyword(name, keyword) {
                    output.write_record([
                        name.as_str(),
                        transaction.date().to_string().as_str(),
                        transaction.amount().to_string().as_str(),
                        transaction.card_suffix().unwrap_or_default(),
                        transaction.raw_ledger_text()
                    ])?;
                }
            }
        },
        None => {
            output.write_record(["account", "keyword", "transactions", "total"])?;

            for name in &names {
                for (category, transactions) in storage.categories(name) {
                    let mut total = Monetary::new();

                    for transaction in &transactions {
                        total += transaction.amount();
                    }

                    output.write_record([
                        name.as_str(),
                        category.as_str(),
                        transactions.len().to_string().as_str(),
                        total.to_string().as_str()
                    ])?;
                }
            }
        }
    }

    output.flush()?;

    Ok(())
}

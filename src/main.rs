// Entry point for the economics report CLI
// It reads already-fetched node/explorer JSON and prints the derived figures
use chain_economics::core::{
    burned_by_day, format_amount, total_fees_wei, BlockRecord, ChainEvent, Denomination,
    EventKind, IssuanceSummary, UncleRecord,
};
use chain_economics::utils::{load_raw_records, RawRecord};
use chain_economics::{Command, Config, Opt, Result};
use clap::Parser;
use log::{error, info, warn};
use std::path::Path;
use std::process;

fn main() {
    let opt = Opt::parse();

    // The config decides the log level, so load it before the logger exists
    let config = match &opt.config {
        Some(path) => Config::load(path),
        None => Config::from_env(),
    };

    let level = config
        .as_ref()
        .ok()
        .and_then(|c| c.log_level_filter().ok())
        .unwrap_or(log::LevelFilter::Info);
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    let result = config.and_then(|config| run_command(opt.command, &config));
    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run_command(command: Command, config: &Config) -> Result<()> {
    let schedule = config.fork_schedule()?;

    match command {
        Command::Schedule => {
            print!("{schedule}");
        }
        Command::Block { path } => {
            for block in load_blocks(&path)? {
                println!("Block {} ({})", block.get_number(), block.get_hash());
                println!("  Era: {}", block.era(&schedule));
                println!(
                    "  Base issuance: {}",
                    format_amount(&block.base_issuance(&schedule), Denomination::Ether)
                );
                println!(
                    "  Burned: {}",
                    format_amount(&block.burned_wei(), Denomination::Ether)
                );
                println!("  Day (UTC): {}", block.day().format("%Y-%m-%d"));
                println!("  Hour (UTC): {}", block.hour().format("%Y-%m-%d %H:00"));
            }
        }
        Command::Uncle { path, included_in } => {
            for uncle in load_uncles(&path, included_in)? {
                println!(
                    "Uncle {} at height {} (index {}, depth {})",
                    uncle.get_hash(),
                    uncle.get_number(),
                    uncle.get_uncle_index(),
                    uncle.depth()
                );
                println!(
                    "  Reward: {}",
                    format_amount(&uncle.uncle_reward(&schedule), Denomination::Ether)
                );
            }
        }
        Command::Events { path, kind } => {
            let events = load_events(&path, kind)?;
            for event in &events {
                let base = event.base();
                let fee = match event.fee_wei() {
                    Some(fee) => format_amount(&fee, Denomination::Ether),
                    None => "n/a".to_string(),
                };
                println!(
                    "{} block {} {} -> {}  fee {fee}",
                    base.get_hash(),
                    base.get_block_number(),
                    base.get_from_address(),
                    base.get_to_address().unwrap_or("(contract creation)")
                );
                if let Some(value) = event.value_wei() {
                    println!("  Value: {}", format_amount(value, Denomination::Ether));
                }
            }
            println!(
                "Total fees over {} {kind} event(s): {}",
                events.len(),
                format_amount(&total_fees_wei(&events), Denomination::Ether)
            );
        }
        Command::Summary {
            blocks,
            uncles,
            included_in,
        } => {
            let blocks = load_blocks(&blocks)?;
            let uncles = match (uncles, included_in) {
                (Some(path), Some(height)) => load_uncles(&path, height)?,
                _ => Vec::new(),
            };

            let summary = IssuanceSummary::from_records(&blocks, &uncles, &schedule);
            info!(
                "Summarized {} block(s) and {} uncle(s)",
                summary.block_count, summary.uncle_count
            );
            print!("{summary}");

            for (day, burned) in burned_by_day(&blocks) {
                println!(
                    "  {}: burned {}",
                    day.format("%Y-%m-%d"),
                    format_amount(&burned, Denomination::Ether)
                );
            }
        }
    }
    Ok(())
}

// Malformed records are logged and skipped; the rest of the batch still counts
fn parse_each<T, F>(records: Vec<RawRecord>, what: &str, mut parse: F) -> Vec<T>
where
    F: FnMut(usize, &RawRecord) -> Result<T>,
{
    let mut parsed = Vec::with_capacity(records.len());
    for (index, raw) in records.iter().enumerate() {
        match parse(index, raw) {
            Ok(record) => parsed.push(record),
            Err(e) => warn!("Skipping {what} #{index}: {e}"),
        }
    }
    parsed
}

fn load_blocks(path: &Path) -> Result<Vec<BlockRecord>> {
    let records = load_raw_records(path)?;
    Ok(parse_each(records, "block", |_, raw| BlockRecord::from_raw(raw)))
}

fn load_uncles(path: &Path, included_in: u64) -> Result<Vec<UncleRecord>> {
    let records = load_raw_records(path)?;
    Ok(parse_each(records, "uncle", |index, raw| {
        UncleRecord::from_raw(raw, included_in, index)
    }))
}

fn load_events(path: &Path, kind: EventKind) -> Result<Vec<ChainEvent>> {
    let records = load_raw_records(path)?;
    Ok(parse_each(records, "event", |_, raw| ChainEvent::from_raw(kind, raw)))
}

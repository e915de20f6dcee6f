use std::process::ExitCode;

use clap::Args;
use jsonbatch_runtime::journal::{Journal, Outcome};
use log::{error, info};

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Number of entries to display
    #[arg(long, short = 'n', default_value = "20")]
    pub limit: usize,

    /// Clear the dispatch journal
    #[arg(long)]
    pub clear: bool,
}

pub fn run(args: HistoryArgs) -> ExitCode {
    let journal = match Journal::new() {
        Some(j) => j,
        None => {
            info!("Dispatch journal is currently disabled");
            println!("Dispatch journal is disabled.");
            return ExitCode::from(0);
        }
    };

    if args.clear {
        match journal.clear() {
            Ok(_) => {
                println!("History cleared");
                return ExitCode::from(0);
            }
            Err(e) => {
                error!("Failed to clear dispatch journal: {}", e);
                eprintln!("[error] Failed to clear history: {e}");
                return ExitCode::from(1);
            }
        }
    }

    let batches = journal.recent(args.limit);

    if batches.is_empty() {
        println!("No history yet.");
        return ExitCode::from(0);
    }

    println!(
        "{:<20}  {:<6}  {:>5}  {:>7}  {:>9}  {:<8}  DESTINATION",
        "TIMESTAMP", "SINK", "BATCH", "RECORDS", "KB", "OUTCOME"
    );
    println!("{}", "-".repeat(88));

    for batch in batches {
        let ts = batch.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
        let outcome = match &batch.outcome {
            Outcome::Sent => "sent".to_string(),
            Outcome::Failed(reason) => format!("failed: {reason}"),
        };

        println!(
            "{:<20}  {:<6}  {:>5}  {:>7}  {:>9.2}  {:<8}  {}",
            ts, batch.sink, batch.batch, batch.records, batch.size_kb, outcome, batch.destination
        );
    }

    let total = journal.count();
    if total > args.limit {
        println!(
            "\n({} more entries, use --limit to show more)",
            total - args.limit
        );
    }

    ExitCode::from(0)
}

pub mod dispatch;
pub mod history;
pub mod plan;
pub mod size;
pub mod validate;

use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use jsonbatch_core::{LimitProfile, SortOrder, sort_by_size};
use jsonbatch_sinks::SinkKind;
use serde_json::Value;

pub use dispatch::DispatchArgs;
pub use history::HistoryArgs;
pub use plan::PlanArgs;
pub use size::{SizeArgs, SortArgs};
pub use validate::ValidateArgs;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the input is a sequence of JSON objects.
    Validate(ValidateArgs),

    /// Show the measured size of every record.
    Size(SizeArgs),

    /// List records ordered by size.
    Sort(SortArgs),

    /// Show how the records would be split into batches.
    ///
    /// Example:
    ///   jsonbatch plan events.ndjson --sink stream
    ///   jsonbatch plan events.json --sink queue --max-records 5 --json
    Plan(PlanArgs),

    /// Build sink requests for every batch and write them as JSON lines.
    ///
    /// Example:
    ///   jsonbatch dispatch events.ndjson --sink topic --destination arn:aws:sns:...:events
    Dispatch(DispatchArgs),

    /// Show recently dispatched batches.
    History(HistoryArgs),
}

/// Input file argument shared by every data command.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// JSON array or newline-delimited JSON objects; `-` reads stdin
    pub input: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SinkArg {
    Queue,
    Topic,
    Stream,
}

impl From<SinkArg> for SinkKind {
    fn from(arg: SinkArg) -> Self {
        match arg {
            SinkArg::Queue => SinkKind::Queue,
            SinkArg::Topic => SinkKind::Topic,
            SinkArg::Stream => SinkKind::Stream,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Asc,
    Desc,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Asc => SortOrder::Ascending,
            SortArg::Desc => SortOrder::Descending,
        }
    }
}

/// Overrides on top of the sink kind's default limits.
#[derive(Debug, Default, Args)]
pub struct LimitArgs {
    /// Minimum records per batch
    #[arg(long)]
    pub min_records: Option<usize>,

    /// Maximum records per batch
    #[arg(long)]
    pub max_records: Option<usize>,

    /// Maximum total batch size in KB
    #[arg(long, value_name = "KB")]
    pub max_batch_kb: Option<f64>,

    /// Maximum single record size in KB
    #[arg(long, value_name = "KB")]
    pub max_record_kb: Option<f64>,
}

impl LimitArgs {
    pub fn resolve(&self, kind: SinkKind) -> Result<LimitProfile> {
        let mut limits = kind.default_limits();
        if let Some(v) = self.min_records {
            limits.min_records_per_batch = v;
        }
        if let Some(v) = self.max_records {
            limits.max_records_per_batch = v;
        }
        if let Some(v) = self.max_batch_kb {
            limits.max_batch_kb = v;
        }
        if let Some(v) = self.max_record_kb {
            limits.max_record_kb = v;
        }
        limits.check()?;
        Ok(limits)
    }
}

/// Records in dispatch order: as given, or sorted by size.
pub fn arrange(records: &[Value], sort: Option<SortArg>) -> Result<Vec<&Value>> {
    Ok(match sort {
        Some(order) => sort_by_size(records, order.into())?
            .into_iter()
            .map(|(record, _)| record)
            .collect(),
        None => records.iter().collect(),
    })
}

/// Shared error reporting for command handlers.
pub fn finish(label: &str, result: Result<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            log::error!("[{label}] {e:#}");
            eprintln!("[error] {e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

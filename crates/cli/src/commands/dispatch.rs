use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Args;
use jsonbatch_core::{LimitProfile, SizeKb};
use jsonbatch_runtime::journal::Journal;
use jsonbatch_sinks::{
    Dispatcher, Queue, SinkFormat, SinkKind, Stream, Topic, writer::WriterSink,
};
use log::info;
use serde_json::Value;

use crate::commands::{InputArgs, LimitArgs, SinkArg, SortArg, arrange, finish};
use crate::input::load_dataset;

#[derive(Debug, Args)]
pub struct DispatchArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Destination kind
    #[arg(long, value_enum)]
    pub sink: SinkArg,

    /// Queue URL, topic ARN or delivery stream name
    #[arg(long)]
    pub destination: String,

    /// Write requests to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Send every record in its own request
    #[arg(long)]
    pub single: bool,

    #[command(flatten)]
    pub limits: LimitArgs,

    /// Order records by size before partitioning
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Do not record batches in the dispatch journal
    #[arg(long)]
    pub no_journal: bool,
}

/// What one dispatch run sent.
#[derive(Debug, PartialEq, Eq)]
struct Sent {
    requests: usize,
    records: usize,
    size: Option<SizeKb>,
}

pub fn run(args: DispatchArgs) -> ExitCode {
    finish("dispatch", execute(&args))
}

fn execute(args: &DispatchArgs) -> Result<ExitCode> {
    let records = load_dataset(&args.input.input)?;
    let kind = SinkKind::from(args.sink);
    let limits = args.limits.resolve(kind)?;
    let ordered = arrange(&records, args.sort)?;

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("failed to create output file {}", path.display())
        })?)),
        None => Box::new(io::stdout()),
    };
    let sink = WriterSink::new(out);

    let journal = if args.no_journal { None } else { Journal::new() };

    let sent = match kind {
        SinkKind::Queue => send::<Queue>(sink, args, journal, &ordered, &limits),
        SinkKind::Topic => send::<Topic>(sink, args, journal, &ordered, &limits),
        SinkKind::Stream => send::<Stream>(sink, args, journal, &ordered, &limits),
    }
    .with_context(|| format!("dispatch to {kind} {} failed", args.destination))?;

    let size = sent.size.map(|s| format!(", {s} KB")).unwrap_or_default();
    eprintln!(
        "[dispatch] {} records in {} requests to {} {}{}",
        sent.records, sent.requests, kind, args.destination, size
    );

    Ok(ExitCode::SUCCESS)
}

fn send<F: SinkFormat>(
    sink: WriterSink<Box<dyn Write>>,
    args: &DispatchArgs,
    journal: Option<Journal>,
    records: &[&Value],
    limits: &LimitProfile,
) -> Result<Sent> {
    let mut dispatcher =
        Dispatcher::<_, F>::new(sink, args.destination.as_str()).with_journal(journal);

    if args.single {
        let responses = dispatcher.dispatch_each(records)?;
        info!("sent {} single requests", responses.len());
        return Ok(Sent {
            requests: responses.len(),
            records: responses.len(),
            size: None,
        });
    }

    let summary = dispatcher.dispatch_batched(records, limits)?;
    Ok(Sent {
        requests: summary.batches,
        records: summary.records,
        size: Some(summary.size),
    })
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use jsonbatch_core::{SizeKb, SortOrder, measure, rank_by_size};
use serde_json::Value;

use crate::commands::{InputArgs, finish};
use crate::input::load_dataset;
use crate::printer::{OutputFormat, PrintContext, Printer, Row, make_printer};

#[derive(Debug, Args)]
pub struct SizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output rows as NDJSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct SortArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Largest records first
    #[arg(long)]
    pub desc: bool,

    /// Output rows as NDJSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SizeArgs) -> ExitCode {
    finish("size", execute(args))
}

pub fn run_sort(args: SortArgs) -> ExitCode {
    finish("sort", execute_sort(args))
}

fn execute(args: SizeArgs) -> Result<ExitCode> {
    let records = load_dataset(&args.input.input)?;
    let sized = records
        .iter()
        .enumerate()
        .map(|(i, r)| Ok((i, r, measure(r)?)))
        .collect::<Result<Vec<_>>>()?;

    print_records("size", &sized, OutputFormat::from_flag(args.json))?;
    Ok(ExitCode::SUCCESS)
}

fn execute_sort(args: SortArgs) -> Result<ExitCode> {
    let records = load_dataset(&args.input.input)?;
    let order = if args.desc {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };

    let sized = sorted_rows(&records, order)?;
    print_records("sort", &sized, OutputFormat::from_flag(args.json))?;
    Ok(ExitCode::SUCCESS)
}

/// Records in size order, each tagged with its input position.
fn sorted_rows(records: &[Value], order: SortOrder) -> Result<Vec<(usize, &Value, SizeKb)>> {
    Ok(rank_by_size(records, order)?
        .into_iter()
        .map(|(index, size)| (index, &records[index], size))
        .collect())
}

fn print_records(
    kind: &str,
    sized: &[(usize, &Value, SizeKb)],
    format: OutputFormat,
) -> Result<()> {
    let ctx = PrintContext {
        kind,
        records: sized.len(),
        batches: None,
        total_size: sized.iter().map(|&(_, _, size)| size).sum(),
    };

    let mut printer = make_printer(format);
    printer.begin(&ctx)?;
    for &(index, record, size) in sized {
        printer.print_row(&Row::Record { index, size, record }, &ctx)?;
    }
    printer.finish(&ctx)?;
    Ok(())
}

#[cfg(test)]
#[path = "size_tests.rs"]
mod tests;

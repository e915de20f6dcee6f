use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::commands::{InputArgs, LimitArgs, SinkArg, SortArg, arrange, finish};
use crate::input::load_dataset;
use crate::printer::{OutputFormat, PrintContext, Printer, Row, make_printer};

#[derive(Debug, Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Destination kind whose limits apply
    #[arg(long, value_enum)]
    pub sink: SinkArg,

    #[command(flatten)]
    pub limits: LimitArgs,

    /// Order records by size before partitioning; offsets then refer to
    /// the sorted order
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Output rows as NDJSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlanArgs) -> ExitCode {
    finish("plan", execute(args))
}

fn execute(args: PlanArgs) -> Result<ExitCode> {
    let records = load_dataset(&args.input.input)?;
    let limits = args.limits.resolve(args.sink.into())?;
    let ordered = arrange(&records, args.sort)?;

    let plan = jsonbatch_core::plan(&ordered, &limits)?;

    let ctx = PrintContext {
        kind: "plan",
        records: plan.record_count(),
        batches: Some(plan.len()),
        total_size: plan.total_size(),
    };

    let mut printer = make_printer(OutputFormat::from_flag(args.json));
    printer.begin(&ctx)?;
    for (index, batch) in plan.iter().enumerate() {
        let row = Row::Batch {
            index,
            offset: batch.range.start,
            records: batch.len(),
            size: batch.size,
        };
        printer.print_row(&row, &ctx)?;
    }
    printer.finish(&ctx)?;

    Ok(ExitCode::SUCCESS)
}

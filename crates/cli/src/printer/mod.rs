use std::io::{self, Write};

use jsonbatch_core::SizeKb;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable columns.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Human }
    }
}

/// Static context about a print run.
#[derive(Debug)]
pub struct PrintContext<'a> {
    /// Label for this command, e.g. `plan`.
    pub kind: &'a str,
    pub records: usize,
    /// Number of batches, for commands that partition.
    pub batches: Option<usize>,
    pub total_size: SizeKb,
}

/// One row in the output stream.
#[derive(Debug)]
pub enum Row<'a> {
    /// A measured record; `index` is its position in the input.
    Record {
        index: usize,
        size: SizeKb,
        record: &'a Value,
    },
    /// A planned batch covering `offset..offset + records` of the input.
    Batch {
        index: usize,
        offset: usize,
        records: usize,
        size: SizeKb,
    },
}

/// Receives a stream of rows plus context and formats them.
pub trait Printer {
    /// Called once before any rows are printed.
    fn begin(&mut self, ctx: &PrintContext) -> io::Result<()>;

    fn print_row(&mut self, row: &Row<'_>, ctx: &PrintContext) -> io::Result<()>;

    /// Called once after all rows, for the summary line.
    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()>;
}

pub fn make_printer(format: OutputFormat) -> Box<dyn Printer> {
    match format {
        OutputFormat::Human => Box::new(HumanPrinter::new(io::stdout(), io::stderr())),
        OutputFormat::Json => Box::new(JsonPrinter::new(io::stdout(), io::stderr())),
    }
}

pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self { out, err }
    }
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self { out, err }
    }
}

impl<W: Write, E: Write> Printer for HumanPrinter<W, E> {
    fn begin(&mut self, ctx: &PrintContext) -> io::Result<()> {
        if ctx.batches.is_some() {
            writeln!(self.out, "{:>6}  {:>13}  {:>7}  {:>10}", "BATCH", "RECORDS", "COUNT", "KB")
        } else {
            writeln!(self.out, "{:>6}  {:>10}  RECORD", "INDEX", "KB")
        }
    }

    fn print_row(&mut self, row: &Row<'_>, _ctx: &PrintContext) -> io::Result<()> {
        match row {
            Row::Record {
                index,
                size,
                record,
            } => writeln!(self.out, "{:>6}  {:>10}  {}", index, size.to_string(), record),
            Row::Batch {
                index,
                offset,
                records,
                size,
            } => writeln!(
                self.out,
                "{:>6}  {:>13}  {:>7}  {:>10}",
                index,
                format!("{}..{}", offset, offset + records),
                records,
                size.to_string()
            ),
        }
    }

    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()> {
        match ctx.batches {
            Some(batches) => writeln!(
                self.err,
                "\n[{}] {} records in {} batches, {} KB",
                ctx.kind, ctx.records, batches, ctx.total_size
            ),
            None => writeln!(
                self.err,
                "\n[{}] {} records, {} KB",
                ctx.kind, ctx.records, ctx.total_size
            ),
        }
    }
}

impl<W: Write, E: Write> Printer for JsonPrinter<W, E> {
    fn begin(&mut self, _ctx: &PrintContext) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, row: &Row<'_>, ctx: &PrintContext) -> io::Result<()> {
        let obj = match row {
            Row::Record {
                index,
                size,
                record,
            } => serde_json::json!({
                "kind": ctx.kind,
                "index": index,
                "size_kb": size.as_kb(),
                "record": record,
            }),
            Row::Batch {
                index,
                offset,
                records,
                size,
            } => serde_json::json!({
                "kind": ctx.kind,
                "batch": index,
                "offset": offset,
                "records": records,
                "size_kb": size.as_kb(),
            }),
        };
        writeln!(self.out, "{}", obj)
    }

    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()> {
        let obj = serde_json::json!({
            "type": "summary",
            "kind": ctx.kind,
            "records": ctx.records,
            "batches": ctx.batches,
            "size_kb": ctx.total_size.as_kb(),
        });
        writeln!(self.err, "{}", obj)
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;

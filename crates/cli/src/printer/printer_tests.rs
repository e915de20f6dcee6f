use super::*;
use serde_json::json;

fn batch_ctx() -> PrintContext<'static> {
    PrintContext {
        kind: "plan",
        records: 25,
        batches: Some(3),
        total_size: SizeKb::from_kb(1.5),
    }
}

fn print_batches<P: Printer>(printer: &mut P, ctx: &PrintContext) {
    printer.begin(ctx).expect("begin");
    for (index, offset, records) in [(0, 0, 10), (1, 10, 10), (2, 20, 5)] {
        let row = Row::Batch {
            index,
            offset,
            records,
            size: SizeKb::from_kb(0.6),
        };
        printer.print_row(&row, ctx).expect("row");
    }
    printer.finish(ctx).expect("finish");
}

#[test]
fn human_printer_lists_batches_and_summary() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let ctx = batch_ctx();

    print_batches(&mut HumanPrinter::new(&mut out, &mut err), &ctx);

    let out = String::from_utf8(out).expect("utf8");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4, "output: {out}");
    assert!(lines[0].contains("BATCH"));
    assert!(lines[3].contains("20..25"), "{}", lines[3]);
    assert!(lines[3].trim_end().ends_with("0.60"), "{}", lines[3]);

    let err = String::from_utf8(err).expect("utf8");
    assert_eq!(err.trim(), "[plan] 25 records in 3 batches, 1.50 KB");
}

#[test]
fn json_printer_emits_one_object_per_row() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let ctx = batch_ctx();

    print_batches(&mut JsonPrinter::new(&mut out, &mut err), &ctx);

    let out = String::from_utf8(out).expect("utf8");
    let rows: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).expect("json row"))
        .collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[2],
        json!({"kind": "plan", "batch": 2, "offset": 20, "records": 5, "size_kb": 0.6})
    );

    let summary: serde_json::Value =
        serde_json::from_str(String::from_utf8(err).expect("utf8").trim()).expect("summary");
    assert_eq!(summary["type"], "summary");
    assert_eq!(summary["batches"], 3);
    assert_eq!(summary["size_kb"], 1.5);
}

#[test]
fn record_rows_show_size_and_content() {
    let record = json!({"a": 1});
    let ctx = PrintContext {
        kind: "size",
        records: 1,
        batches: None,
        total_size: SizeKb::from_kb(0.06),
    };

    let mut out = Vec::new();
    let mut err = Vec::new();
    {
        let mut printer = HumanPrinter::new(&mut out, &mut err);
        let row = Row::Record {
            index: 0,
            size: SizeKb::from_kb(0.06),
            record: &record,
        };
        printer.begin(&ctx).expect("begin");
        printer.print_row(&row, &ctx).expect("row");
        printer.finish(&ctx).expect("finish");
    }

    let out = String::from_utf8(out).expect("utf8");
    assert!(out.lines().nth(1).is_some_and(|l| l.ends_with("0.06  {\"a\":1}")), "{out}");
    assert!(String::from_utf8(err).expect("utf8").contains("[size] 1 records, 0.06 KB"));
}

#[test]
fn output_format_from_flag() {
    assert_eq!(OutputFormat::from_flag(true), OutputFormat::Json);
    assert_eq!(OutputFormat::from_flag(false), OutputFormat::Human);
}

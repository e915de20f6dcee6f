use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use jsonbatch_core::{into_records, is_record};
use serde_json::Value;

use crate::commands::{InputArgs, finish};
use crate::input::load_records;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

pub fn run(args: ValidateArgs) -> ExitCode {
    finish("validate", execute(args))
}

fn execute(args: ValidateArgs) -> Result<ExitCode> {
    let values = load_records(&args.input.input)?;

    match report(values) {
        Ok(line) => {
            println!("[validate] {line}");
            Ok(ExitCode::SUCCESS)
        }
        Err(line) => {
            // Invalid data is a "soft" failure, distinct from unreadable input.
            eprintln!("[validate] {line}");
            Ok(ExitCode::from(1))
        }
    }
}

/// One-line verdict on a loaded dataset.
fn report(values: Vec<Value>) -> std::result::Result<String, String> {
    let total = values.len();
    let objects = values.iter().filter(|v| is_record(v)).count();

    match into_records(values) {
        Ok(records) => {
            let keys: usize = records.iter().map(|r| r.len()).sum();
            Ok(format!("{} records OK, {keys} top-level keys", records.len()))
        }
        Err(e) => Err(format!("{e} ({objects} of {total} elements are objects)")),
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;

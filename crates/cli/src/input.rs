use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result};
use serde_json::Value;

/// Read records from a file, or stdin when `path` is `-`.
///
/// Accepts either one JSON array or a stream of whitespace-separated JSON
/// values (e.g. newline-delimited objects). Shape is not checked here.
pub fn load_records(path: &Path) -> Result<Vec<Value>> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read records from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read records from {}", path.display()))?
    };

    parse_records(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Load records and check that every element is a JSON object.
pub fn load_dataset(path: &Path) -> Result<Vec<Value>> {
    let records = load_records(path)?;
    jsonbatch_core::validate(&records)?;
    Ok(records)
}

pub fn parse_records(text: &str) -> Result<Vec<Value>> {
    let mut values = serde_json::Deserializer::from_str(text)
        .into_iter::<Value>()
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() == 1
        && values[0].is_array()
        && let Some(Value::Array(items)) = values.pop()
    {
        return Ok(items);
    }
    Ok(values)
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;

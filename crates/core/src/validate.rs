use serde_json::Value;

use crate::{Error, Record, Result};

/// The single shape check: a record is a JSON object.
pub fn is_record(value: &Value) -> bool {
    value.is_object()
}

/// Check that every element is a JSON object and hand the input back.
///
/// Only the top level is inspected; nested values may be anything.
pub fn validate(data: &[Value]) -> Result<&[Value]> {
    if let Some(index) = data.iter().position(|v| !is_record(v)) {
        return Err(Error::InvalidDataset {
            index: Some(index),
            found: type_name(&data[index]),
        });
    }
    Ok(data)
}

/// Validate a whole JSON document, which must be an array of objects.
pub fn validate_value(data: &Value) -> Result<&[Value]> {
    match data {
        Value::Array(items) => validate(items),
        other => Err(Error::InvalidDataset {
            index: None,
            found: type_name(other),
        }),
    }
}

/// Validate and unwrap the objects.
pub fn into_records(data: Vec<Value>) -> Result<Vec<Record>> {
    validate(&data)?;
    Ok(data
        .into_iter()
        .filter_map(|v| match v {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;

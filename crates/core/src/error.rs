use thiserror::Error;

use crate::SizeKb;

/// Errors raised while measuring, validating or partitioning records.
#[derive(Debug, Error)]
pub enum Error {
    /// The record could not be encoded as JSON.
    #[error("record could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The input is not a sequence of JSON objects.
    ///
    /// `index` is `None` when the top-level value itself is not an array.
    #[error("{}", invalid_dataset_message(.index, .found))]
    InvalidDataset { index: Option<usize>, found: &'static str },

    /// A single record exceeds what any batch can hold.
    #[error("record {index} is {size} KB, over the {limit} KB limit")]
    RecordTooLarge {
        index: usize,
        size: SizeKb,
        limit: SizeKb,
    },

    /// A batch would hold fewer records than the destination accepts.
    #[error("batch starting at record {start} holds {count} records, minimum is {min}")]
    BatchTooSmall {
        start: usize,
        count: usize,
        min: usize,
    },

    /// The limit profile can never be satisfied.
    #[error("invalid limit profile: {0}")]
    InvalidLimits(String),
}

fn invalid_dataset_message(index: &Option<usize>, found: &str) -> String {
    match index {
        Some(i) => format!("invalid dataset: element {i} is {found}, expected an object"),
        None => format!("invalid dataset: expected an array of objects, found {found}"),
    }
}

pub type Result<T> = std::result::Result<T, Error>;

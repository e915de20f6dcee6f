//! Batch partitioning and validation for JSON record sinks.
//!
//! Records are measured with [`size_kb`], optionally ordered with
//! [`sort_by_size`], checked with [`validate`] and split into
//! limit-respecting batches with [`partition`].

mod error;
mod limits;
mod partition;
mod size;
mod sort;
mod validate;

pub use error::{Error, Result};
pub use limits::{DEFAULT_MAX_BATCH_KB, LimitProfile};
pub use partition::{Batch, BatchPlan, PlannedBatch, Partition, partition, plan};
pub use size::{ENVELOPE_OVERHEAD_BYTES, SizeKb, measure, size_kb};
pub use sort::{SortOrder, rank_by_size, sort_by_size};
pub use validate::{into_records, is_record, validate, validate_value};

/// A JSON object record. The partitioner only groups records, it never
/// changes their content.
pub type Record = serde_json::Map<String, serde_json::Value>;

use std::{fmt, ops::Range};

use log::debug;
use serde::Serialize;

use crate::{Error, LimitProfile, Result, SizeKb, measure};

/// Split point of one batch: which slice of the input it covers and its
/// total size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedBatch {
    pub range: Range<usize>,
    pub size: SizeKb,
}

impl PlannedBatch {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Every split point of a partitioning run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchPlan {
    batches: Vec<PlannedBatch>,
    records: usize,
}

impl BatchPlan {
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Number of input records the plan covers.
    pub fn record_count(&self) -> usize {
        self.records
    }

    pub fn total_size(&self) -> SizeKb {
        self.batches.iter().map(|b| b.size).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlannedBatch> {
        self.batches.iter()
    }
}

impl<'p> IntoIterator for &'p BatchPlan {
    type Item = &'p PlannedBatch;
    type IntoIter = std::slice::Iter<'p, PlannedBatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A view over one batch of the input records.
pub struct Batch<'a, T> {
    records: &'a [T],
    index: usize,
    offset: usize,
    size: SizeKb,
}

impl<'a, T> Batch<'a, T> {
    pub fn records(&self) -> &'a [T] {
        self.records
    }

    /// Position of this batch in the partitioning, starting at 0.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Position of the first record of this batch in the input.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn size(&self) -> SizeKb {
        self.size
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.records.iter()
    }
}

impl<T> Clone for Batch<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Batch<'_, T> {}

impl<T> fmt::Debug for Batch<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Batch")
            .field("index", &self.index)
            .field("offset", &self.offset)
            .field("len", &self.records.len())
            .field("size", &self.size)
            .finish()
    }
}

/// Lazy sequence of batches produced by [`partition`].
///
/// Every limit has already been checked when this value exists, so
/// iterating it cannot fail.
pub struct Partition<'a, T> {
    records: &'a [T],
    plan: BatchPlan,
    next: usize,
}

impl<'a, T> Partition<'a, T> {
    pub fn plan(&self) -> &BatchPlan {
        &self.plan
    }

    pub fn into_plan(self) -> BatchPlan {
        self.plan
    }
}

impl<T> fmt::Debug for Partition<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Partition")
            .field("plan", &self.plan)
            .field("next", &self.next)
            .finish()
    }
}

impl<T> Clone for Partition<'_, T> {
    fn clone(&self) -> Self {
        Self {
            records: self.records,
            plan: self.plan.clone(),
            next: self.next,
        }
    }
}

impl<'a, T> Iterator for Partition<'a, T> {
    type Item = Batch<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let records: &'a [T] = self.records;
        let planned = self.plan.batches.get(self.next)?;
        let batch = Batch {
            records: &records[planned.range.clone()],
            index: self.next,
            offset: planned.range.start,
            size: planned.size,
        };
        self.next += 1;
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.plan.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Partition<'_, T> {}

/// Split `records` into batches that satisfy `limits`.
///
/// All records are measured and all limits checked before the first batch is
/// handed out, so an error means nothing was produced.
pub fn partition<'a, T: Serialize>(
    records: &'a [T],
    limits: &LimitProfile,
) -> Result<Partition<'a, T>> {
    let plan = plan(records, limits)?;
    Ok(Partition {
        records,
        plan,
        next: 0,
    })
}

/// Compute the split points for `records` under `limits`.
///
/// Greedy, single pass in input order: a batch is closed as soon as the next
/// record would push it past the size or count limit.
pub fn plan<T: Serialize>(records: &[T], limits: &LimitProfile) -> Result<BatchPlan> {
    limits.check()?;

    if records.is_empty() {
        return Ok(BatchPlan::default());
    }

    let min = limits.min_records_per_batch;
    if records.len() < min {
        return Err(Error::BatchTooSmall {
            start: 0,
            count: records.len(),
            min,
        });
    }

    let batch_limit = limits.batch_limit();
    let record_limit = limits.record_limit();

    let mut batches = Vec::new();
    let mut start = 0;
    let mut current = SizeKb::ZERO;

    for (index, record) in records.iter().enumerate() {
        let size = measure(record)?;

        // A record over the batch limit would not fit even in a batch of its own.
        for limit in [record_limit, batch_limit] {
            if size > limit {
                return Err(Error::RecordTooLarge { index, size, limit });
            }
        }

        let count = index - start;
        if count > 0
            && (current + size > batch_limit || count + 1 > limits.max_records_per_batch)
        {
            batches.push(close_batch(start..index, current, min)?);
            start = index;
            current = SizeKb::ZERO;
        }

        current = current + size;
    }

    batches.push(close_batch(start..records.len(), current, min)?);

    debug!(
        "partitioned {} records into {} batches (max {} records, {} KB per batch)",
        records.len(),
        batches.len(),
        limits.max_records_per_batch,
        batch_limit
    );

    Ok(BatchPlan {
        batches,
        records: records.len(),
    })
}

fn close_batch(range: Range<usize>, size: SizeKb, min: usize) -> Result<PlannedBatch> {
    if range.len() < min {
        return Err(Error::BatchTooSmall {
            start: range.start,
            count: range.len(),
            min,
        });
    }
    Ok(PlannedBatch { range, size })
}

#[cfg(test)]
#[path = "partition_tests.rs"]
mod tests;

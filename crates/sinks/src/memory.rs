//! In-memory sink
//!
//! Keeps every request it receives, in order. With [`MemorySink::with_limits`]
//! it also enforces hard limits the way a real destination would, measuring
//! the payload bytes it was actually given.

use std::collections::HashMap;

use anyhow::{anyhow, bail};
use jsonbatch_core::LimitProfile;

use crate::{BatchRequest, BatchSink, FailedEntry, SingleRequest, SinkRequest, SinkResponse};

const BYTES_PER_KB: f64 = 1024.0;

/// Scripted misbehaviour for one batch call.
#[derive(Debug, Clone)]
pub enum Failure {
    /// The call itself fails with this message.
    Error(String),
    /// The call succeeds but every entry is refused with this reason.
    Reject(String),
}

#[derive(Debug, Default)]
pub struct MemorySink {
    requests: Vec<SinkRequest>,
    limits: Option<LimitProfile>,
    failures: HashMap<usize, Failure>,
    batch_calls: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse requests outside `limits`.
    pub fn with_limits(limits: LimitProfile) -> Self {
        Self {
            limits: Some(limits),
            ..Self::default()
        }
    }

    /// Misbehave on the `call`-th batch call, counting from 0.
    pub fn fail_batch(mut self, call: usize, failure: Failure) -> Self {
        self.failures.insert(call, failure);
        self
    }

    /// Every accepted request, in arrival order.
    pub fn requests(&self) -> &[SinkRequest] {
        &self.requests
    }

    pub fn batches(&self) -> impl Iterator<Item = &BatchRequest> {
        self.requests.iter().filter_map(|r| match r {
            SinkRequest::Batch(b) => Some(b),
            SinkRequest::Single(_) => None,
        })
    }

    pub fn singles(&self) -> impl Iterator<Item = &SingleRequest> {
        self.requests.iter().filter_map(|r| match r {
            SinkRequest::Single(s) => Some(s),
            SinkRequest::Batch(_) => None,
        })
    }

    /// Every payload accepted through batch calls, in order.
    pub fn batch_payloads(&self) -> Vec<&str> {
        self.batches().flat_map(|b| b.payloads()).collect()
    }

    /// Forget every request and scripted failure. Limits are kept.
    pub fn clear(&mut self) {
        self.requests.clear();
        self.failures.clear();
        self.batch_calls = 0;
    }

    fn check_record(&self, position: usize, payload: &str) -> anyhow::Result<()> {
        if let Some(limits) = &self.limits {
            let max = limits.max_record_kb * BYTES_PER_KB;
            if payload.len() as f64 > max {
                bail!(
                    "record {position} is {} bytes, over the {max} byte limit",
                    payload.len()
                );
            }
        }
        Ok(())
    }

    fn check_batch(&self, request: &BatchRequest) -> anyhow::Result<()> {
        let Some(limits) = &self.limits else {
            return Ok(());
        };

        let count = request.len();
        if count < limits.min_records_per_batch.max(1) || count > limits.max_records_per_batch {
            bail!(
                "batch holds {count} records, allowed {}..={}",
                limits.min_records_per_batch,
                limits.max_records_per_batch
            );
        }

        for (position, payload) in request.payloads().into_iter().enumerate() {
            self.check_record(position, payload)?;
        }

        let max = limits.max_batch_kb * BYTES_PER_KB;
        let bytes = request.payload_bytes();
        if bytes as f64 > max {
            bail!("batch payload is {bytes} bytes, over the {max} byte limit");
        }
        Ok(())
    }
}

impl BatchSink for MemorySink {
    fn send_single(&mut self, request: &SingleRequest) -> anyhow::Result<SinkResponse> {
        self.check_record(0, request.payload())?;
        self.requests.push(SinkRequest::Single(request.clone()));
        Ok(SinkResponse {
            accepted: 1,
            failed: Vec::new(),
            request_id: Some(self.requests.len().to_string()),
        })
    }

    fn send_batch(&mut self, request: &BatchRequest) -> anyhow::Result<SinkResponse> {
        let call = self.batch_calls;
        self.batch_calls += 1;

        match self.failures.get(&call) {
            Some(Failure::Error(msg)) => return Err(anyhow!("{msg}")),
            Some(Failure::Reject(reason)) => {
                return Ok(SinkResponse {
                    accepted: 0,
                    failed: (0..request.len())
                        .map(|i| FailedEntry {
                            id: request.entry_id(i),
                            reason: reason.clone(),
                        })
                        .collect(),
                    request_id: None,
                });
            }
            None => {}
        }

        self.check_batch(request)?;
        self.requests.push(SinkRequest::Batch(request.clone()));
        Ok(SinkResponse {
            accepted: request.len(),
            failed: Vec::new(),
            request_id: Some(self.requests.len().to_string()),
        })
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;

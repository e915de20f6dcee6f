use std::marker::PhantomData;

use jsonbatch_core::{Batch, LimitProfile, SizeKb, partition};
use jsonbatch_runtime::journal::{BatchEvent, Journal, Outcome};
use log::{info, warn};
use serde::Serialize;

use crate::{
    BatchSink, DispatchError, Queue, SinkFormat, SinkResponse, Stream, Topic, error::Result,
};

pub type QueueDispatcher<S> = Dispatcher<S, Queue>;
pub type TopicDispatcher<S> = Dispatcher<S, Topic>;
pub type StreamDispatcher<S> = Dispatcher<S, Stream>;

/// Totals of a completed batched dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub batches: usize,
    pub records: usize,
    pub size: SizeKb,
}

/// Adapter between the partitioner and one destination.
///
/// Batches go out one at a time, in order, and the first failure stops the
/// run. Batches sent before the failure stay sent; attach a [`Journal`] to
/// find out which ones.
pub struct Dispatcher<S, F> {
    sink: S,
    destination: String,
    journal: Option<Journal>,
    _format: PhantomData<F>,
}

impl<S: BatchSink, F: SinkFormat> Dispatcher<S, F> {
    pub fn new(sink: S, destination: impl Into<String>) -> Self {
        Self {
            sink,
            destination: destination.into(),
            journal: None,
            _format: PhantomData,
        }
    }

    pub fn with_journal(mut self, journal: Option<Journal>) -> Self {
        self.journal = journal;
        self
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Representative limits for this adapter's sink kind.
    pub fn default_limits(&self) -> LimitProfile {
        F::KIND.default_limits()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Send exactly one record, without any size checks of our own.
    pub fn dispatch_single<T: Serialize + ?Sized>(&mut self, record: &T) -> Result<SinkResponse> {
        let request = F::single(&self.destination, encode::<F, T>(record)?);
        let response = self.sink.send_single(&request)?;

        if let Some(reason) = response.failure_reason() {
            return Err(DispatchError::Rejected { batch: 0, reason });
        }
        Ok(response)
    }

    /// Send every record on its own, in order, stopping at the first failure.
    pub fn dispatch_each<T: Serialize>(&mut self, records: &[T]) -> Result<Vec<SinkResponse>> {
        records.iter().map(|r| self.dispatch_single(r)).collect()
    }

    /// Partition `records` under `limits` and send every batch in order.
    ///
    /// Nothing is sent when partitioning fails.
    pub fn dispatch_batched<T: Serialize>(
        &mut self,
        records: &[T],
        limits: &LimitProfile,
    ) -> Result<DispatchSummary> {
        let batches = partition(records, limits)?;
        let total = batches.len();
        let mut summary = DispatchSummary::default();

        for batch in batches {
            self.send(&batch, total)?;
            summary.batches += 1;
            summary.records += batch.len();
            summary.size = summary.size + batch.size();
        }

        Ok(summary)
    }

    fn send<T: Serialize>(&mut self, batch: &Batch<'_, T>, total: usize) -> Result<()> {
        let payloads = batch
            .iter()
            .map(encode::<F, T>)
            .collect::<Result<Vec<_>>>()?;
        let request = F::batch(&self.destination, payloads);

        let outcome = match self.sink.send_batch(&request) {
            Ok(response) => match response.failure_reason() {
                None => Ok(()),
                Some(reason) => Err(DispatchError::Rejected {
                    batch: batch.index(),
                    reason,
                }),
            },
            Err(e) => Err(DispatchError::Sink(e)),
        };

        match &outcome {
            Ok(()) => info!(
                "sent batch {}/{} to {} {}: {} records, {} KB",
                batch.index() + 1,
                total,
                F::KIND,
                self.destination,
                batch.len(),
                batch.size()
            ),
            Err(e) => warn!(
                "batch {}/{} to {} {} failed: {e}",
                batch.index() + 1,
                total,
                F::KIND,
                self.destination
            ),
        }

        if let Some(journal) = &self.journal {
            let result = match &outcome {
                Ok(()) => Outcome::Sent,
                Err(e) => Outcome::Failed(e.to_string()),
            };
            journal.log_batch(BatchEvent::new(
                F::KIND.as_str(),
                self.destination.as_str(),
                batch.index(),
                batch.len(),
                batch.size().as_kb(),
                result,
            ));
        }

        outcome
    }
}

fn encode<F: SinkFormat, T: Serialize + ?Sized>(record: &T) -> Result<String> {
    let json = serde_json::to_string(record).map_err(jsonbatch_core::Error::from)?;
    Ok(F::encode(json))
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;

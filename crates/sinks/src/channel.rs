//! Crossbeam channel sink
//!
//! Hands each request to a consumer thread. The send blocks while a bounded
//! channel is full, so dispatch order is kept.

use anyhow::anyhow;
use crossbeam::channel::{self, Receiver, Sender};

use crate::{BatchRequest, BatchSink, SingleRequest, SinkRequest, SinkResponse};

#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<SinkRequest>,
}

impl ChannelSink {
    pub fn new(tx: Sender<SinkRequest>) -> Self {
        Self { tx }
    }

    pub fn bounded(capacity: usize) -> (Self, Receiver<SinkRequest>) {
        let (tx, rx) = channel::bounded(capacity);
        (Self::new(tx), rx)
    }

    pub fn unbounded() -> (Self, Receiver<SinkRequest>) {
        let (tx, rx) = channel::unbounded();
        (Self::new(tx), rx)
    }

    fn forward(&self, request: SinkRequest, records: usize) -> anyhow::Result<SinkResponse> {
        self.tx
            .send(request)
            .map_err(|_| anyhow!("channel sink receiver was dropped"))?;
        Ok(SinkResponse::accepted(records))
    }
}

impl BatchSink for ChannelSink {
    fn send_single(&mut self, request: &SingleRequest) -> anyhow::Result<SinkResponse> {
        self.forward(SinkRequest::Single(request.clone()), 1)
    }

    fn send_batch(&mut self, request: &BatchRequest) -> anyhow::Result<SinkResponse> {
        self.forward(SinkRequest::Batch(request.clone()), request.len())
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;

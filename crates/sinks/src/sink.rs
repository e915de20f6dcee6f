use crate::{BatchRequest, SingleRequest, SinkResponse};

/// Transport for prepared requests.
///
/// Implementations own the connection to a destination and are the final
/// authority on its limits: a request the destination refuses comes back as
/// an error, or as a response listing the failed entries.
pub trait BatchSink {
    /// Send one record.
    fn send_single(&mut self, request: &SingleRequest) -> anyhow::Result<SinkResponse>;

    /// Send one pre-built batch.
    fn send_batch(&mut self, request: &BatchRequest) -> anyhow::Result<SinkResponse>;
}

impl<S: BatchSink + ?Sized> BatchSink for &mut S {
    fn send_single(&mut self, request: &SingleRequest) -> anyhow::Result<SinkResponse> {
        (**self).send_single(request)
    }

    fn send_batch(&mut self, request: &BatchRequest) -> anyhow::Result<SinkResponse> {
        (**self).send_batch(request)
    }
}

impl<S: BatchSink + ?Sized> BatchSink for Box<S> {
    fn send_single(&mut self, request: &SingleRequest) -> anyhow::Result<SinkResponse> {
        (**self).send_single(request)
    }

    fn send_batch(&mut self, request: &BatchRequest) -> anyhow::Result<SinkResponse> {
        (**self).send_batch(request)
    }
}

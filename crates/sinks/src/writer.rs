//! JSON-lines sink
//!
//! Writes every request as one line of JSON. Useful for dry runs and for
//! handing requests to an external uploader.

use std::io::{self, Write};

use serde::Serialize;

use crate::{BatchRequest, BatchSink, SingleRequest, SinkResponse};

pub struct WriterSink<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Number of requests written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line<T: Serialize>(
        &mut self,
        request: &T,
        records: usize,
    ) -> anyhow::Result<SinkResponse> {
        serde_json::to_writer(&mut self.out, request)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        self.written += 1;

        Ok(SinkResponse {
            accepted: records,
            failed: Vec::new(),
            request_id: Some(self.written.to_string()),
        })
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> BatchSink for WriterSink<W> {
    fn send_single(&mut self, request: &SingleRequest) -> anyhow::Result<SinkResponse> {
        self.write_line(request, 1)
    }

    fn send_batch(&mut self, request: &BatchRequest) -> anyhow::Result<SinkResponse> {
        self.write_line(request, request.len())
    }
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;

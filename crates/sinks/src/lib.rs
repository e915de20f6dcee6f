//! Dispatch of partitioned JSON records to queue, topic and stream sinks.
//!
//! # Architecture
//!
//! ```text
//! [records] --partition--> [Batch] --SinkFormat--> [BatchRequest] --> [BatchSink]
//! ```
//!
//! A [`Dispatcher`] owns a concrete [`BatchSink`] and a destination. The
//! [`SinkFormat`] type parameter picks the request shape, which gives the
//! three adapters [`QueueDispatcher`], [`TopicDispatcher`] and
//! [`StreamDispatcher`].
//!
//! # Available Sinks
//!
//! | Sink | Purpose |
//! |------|---------|
//! | `memory` | Keeps every request; optional hard limits (tests, dry runs) |
//! | `writer` | One JSON line per request to any `io::Write` |
//! | `channel` | Hands requests to another thread over crossbeam |

mod dispatch;
mod error;
mod kind;
mod request;
mod sink;

/// In-memory sink that records every request
pub mod memory;

/// JSON-lines sink over any writer
pub mod writer;

/// Crossbeam channel sink
pub mod channel;

pub use dispatch::{
    DispatchSummary, Dispatcher, QueueDispatcher, StreamDispatcher, TopicDispatcher,
};
pub use error::DispatchError;
pub use kind::{Queue, SinkFormat, SinkKind, Stream, Topic};
pub use request::{
    BatchRequest, FailedEntry, QueueBatch, QueueEntry, QueueMessage, SingleRequest,
    SinkRequest, SinkResponse, StreamBatch, StreamPut, StreamRecord, TopicBatch, TopicEntry,
    TopicMessage,
};
pub use sink::BatchSink;

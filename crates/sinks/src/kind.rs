use std::{fmt, str::FromStr};

use jsonbatch_core::{DEFAULT_MAX_BATCH_KB, LimitProfile};
use serde::{Deserialize, Serialize};

use crate::{
    BatchRequest, QueueBatch, QueueEntry, QueueMessage, SingleRequest, StreamBatch, StreamPut,
    StreamRecord, TopicBatch, TopicEntry, TopicMessage,
};

/// Destination families the adapters can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Point-to-point queue
    Queue,
    /// Pub/sub topic
    Topic,
    /// Streaming delivery endpoint
    Stream,
}

impl SinkKind {
    pub const ALL: [SinkKind; 3] = [SinkKind::Queue, SinkKind::Topic, SinkKind::Stream];

    pub fn as_str(self) -> &'static str {
        match self {
            SinkKind::Queue => "queue",
            SinkKind::Topic => "topic",
            SinkKind::Stream => "stream",
        }
    }

    /// Representative limits of this destination family.
    pub fn default_limits(self) -> LimitProfile {
        match self {
            SinkKind::Queue | SinkKind::Topic => LimitProfile {
                min_records_per_batch: 1,
                max_records_per_batch: 10,
                max_batch_kb: DEFAULT_MAX_BATCH_KB,
                max_record_kb: DEFAULT_MAX_BATCH_KB,
            },
            SinkKind::Stream => LimitProfile {
                min_records_per_batch: 10,
                max_records_per_batch: 500,
                max_batch_kb: DEFAULT_MAX_BATCH_KB,
                max_record_kb: 1000.0,
            },
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SinkKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown sink kind '{s}', expected queue, topic or stream"))
    }
}

/// Builds the request shapes of one sink kind from encoded records.
pub trait SinkFormat {
    const KIND: SinkKind;

    /// Wire text for one record.
    fn encode(json: String) -> String {
        json
    }

    fn single(destination: &str, payload: String) -> SingleRequest;

    fn batch(destination: &str, payloads: Vec<String>) -> BatchRequest;
}

/// Queue request shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Queue;

/// Topic request shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Topic;

/// Delivery stream request shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stream;

impl SinkFormat for Queue {
    const KIND: SinkKind = SinkKind::Queue;

    fn single(destination: &str, payload: String) -> SingleRequest {
        SingleRequest::SendMessage(QueueMessage {
            queue_url: destination.to_owned(),
            message_body: payload,
        })
    }

    fn batch(destination: &str, payloads: Vec<String>) -> BatchRequest {
        BatchRequest::SendMessageBatch(QueueBatch {
            queue_url: destination.to_owned(),
            entries: payloads
                .into_iter()
                .enumerate()
                .map(|(i, message_body)| QueueEntry {
                    id: i.to_string(),
                    message_body,
                })
                .collect(),
        })
    }
}

impl SinkFormat for Topic {
    const KIND: SinkKind = SinkKind::Topic;

    fn single(destination: &str, payload: String) -> SingleRequest {
        SingleRequest::Publish(TopicMessage {
            topic_arn: destination.to_owned(),
            message: payload,
        })
    }

    fn batch(destination: &str, payloads: Vec<String>) -> BatchRequest {
        BatchRequest::PublishBatch(TopicBatch {
            topic_arn: destination.to_owned(),
            entries: payloads
                .into_iter()
                .enumerate()
                .map(|(i, message)| TopicEntry {
                    id: i.to_string(),
                    message,
                })
                .collect(),
        })
    }
}

impl SinkFormat for Stream {
    const KIND: SinkKind = SinkKind::Stream;

    // Newline-delimited so the delivered objects stay splittable.
    fn encode(mut json: String) -> String {
        json.push('\n');
        json
    }

    fn single(destination: &str, payload: String) -> SingleRequest {
        SingleRequest::PutRecord(StreamPut {
            delivery_stream_name: destination.to_owned(),
            record: StreamRecord { data: payload },
        })
    }

    fn batch(destination: &str, payloads: Vec<String>) -> BatchRequest {
        BatchRequest::PutRecordBatch(StreamBatch {
            delivery_stream_name: destination.to_owned(),
            records: payloads
                .into_iter()
                .map(|data| StreamRecord { data })
                .collect(),
        })
    }
}

#[cfg(test)]
#[path = "kind_tests.rs"]
mod tests;

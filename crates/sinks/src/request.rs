use serde::{Deserialize, Serialize};

use crate::SinkKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueueMessage {
    pub queue_url: String,
    pub message_body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueueEntry {
    pub id: String,
    pub message_body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueueBatch {
    pub queue_url: String,
    pub entries: Vec<QueueEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TopicMessage {
    pub topic_arn: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TopicEntry {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TopicBatch {
    pub topic_arn: String,
    #[serde(rename = "PublishBatchRequestEntries")]
    pub entries: Vec<TopicEntry>,
}

/// Delivery stream record. `data` is newline-terminated JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamRecord {
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamPut {
    pub delivery_stream_name: String,
    pub record: StreamRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamBatch {
    pub delivery_stream_name: String,
    pub records: Vec<StreamRecord>,
}

/// Request carrying exactly one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Action")]
pub enum SingleRequest {
    SendMessage(QueueMessage),
    Publish(TopicMessage),
    PutRecord(StreamPut),
}

impl SingleRequest {
    pub fn kind(&self) -> SinkKind {
        match self {
            Self::SendMessage(_) => SinkKind::Queue,
            Self::Publish(_) => SinkKind::Topic,
            Self::PutRecord(_) => SinkKind::Stream,
        }
    }

    pub fn destination(&self) -> &str {
        match self {
            Self::SendMessage(m) => &m.queue_url,
            Self::Publish(m) => &m.topic_arn,
            Self::PutRecord(p) => &p.delivery_stream_name,
        }
    }

    pub fn payload(&self) -> &str {
        match self {
            Self::SendMessage(m) => &m.message_body,
            Self::Publish(m) => &m.message,
            Self::PutRecord(p) => &p.record.data,
        }
    }
}

/// Request carrying one batch of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Action")]
pub enum BatchRequest {
    SendMessageBatch(QueueBatch),
    PublishBatch(TopicBatch),
    PutRecordBatch(StreamBatch),
}

impl BatchRequest {
    pub fn kind(&self) -> SinkKind {
        match self {
            Self::SendMessageBatch(_) => SinkKind::Queue,
            Self::PublishBatch(_) => SinkKind::Topic,
            Self::PutRecordBatch(_) => SinkKind::Stream,
        }
    }

    pub fn destination(&self) -> &str {
        match self {
            Self::SendMessageBatch(b) => &b.queue_url,
            Self::PublishBatch(b) => &b.topic_arn,
            Self::PutRecordBatch(b) => &b.delivery_stream_name,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::SendMessageBatch(b) => b.entries.len(),
            Self::PublishBatch(b) => b.entries.len(),
            Self::PutRecordBatch(b) => b.records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Payload of every entry, in batch order.
    pub fn payloads(&self) -> Vec<&str> {
        match self {
            Self::SendMessageBatch(b) => {
                b.entries.iter().map(|e| e.message_body.as_str()).collect()
            }
            Self::PublishBatch(b) => b.entries.iter().map(|e| e.message.as_str()).collect(),
            Self::PutRecordBatch(b) => b.records.iter().map(|r| r.data.as_str()).collect(),
        }
    }

    /// Entry ids as the destination reports them back. Stream records carry
    /// no id, so their position is used.
    pub fn entry_id(&self, position: usize) -> String {
        let id = match self {
            Self::SendMessageBatch(b) => b.entries.get(position).map(|e| e.id.clone()),
            Self::PublishBatch(b) => b.entries.get(position).map(|e| e.id.clone()),
            Self::PutRecordBatch(_) => None,
        };
        id.unwrap_or_else(|| position.to_string())
    }

    pub fn payload_bytes(&self) -> usize {
        self.payloads().iter().map(|p| p.len()).sum()
    }
}

/// Either request shape, for sinks that keep or forward both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SinkRequest {
    Single(SingleRequest),
    Batch(BatchRequest),
}

/// An entry the sink refused while accepting the rest of the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedEntry {
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkResponse {
    /// Number of records the sink took.
    pub accepted: usize,
    pub failed: Vec<FailedEntry>,
    pub request_id: Option<String>,
}

impl SinkResponse {
    pub fn accepted(accepted: usize) -> Self {
        Self {
            accepted,
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// All failure reasons joined into one line.
    pub fn failure_reason(&self) -> Option<String> {
        if self.failed.is_empty() {
            return None;
        }
        Some(
            self.failed
                .iter()
                .map(|f| format!("{}: {}", f.id, f.reason))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

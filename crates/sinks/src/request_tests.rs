use super::*;
use serde_json::json;

fn queue_batch() -> BatchRequest {
    BatchRequest::SendMessageBatch(QueueBatch {
        queue_url: "queue-url".into(),
        entries: vec![
            QueueEntry {
                id: "0".into(),
                message_body: "{\"a\":1}".into(),
            },
            QueueEntry {
                id: "1".into(),
                message_body: "{\"b\":22}".into(),
            },
        ],
    })
}

#[test]
fn batch_request_serializes_with_wire_names() {
    let value = serde_json::to_value(queue_batch()).expect("serialize");
    assert_eq!(
        value,
        json!({
            "Action": "SendMessageBatch",
            "QueueUrl": "queue-url",
            "Entries": [
                {"Id": "0", "MessageBody": "{\"a\":1}"},
                {"Id": "1", "MessageBody": "{\"b\":22}"},
            ]
        })
    );

    let topic = BatchRequest::PublishBatch(TopicBatch {
        topic_arn: "arn".into(),
        entries: vec![TopicEntry {
            id: "0".into(),
            message: "{}".into(),
        }],
    });
    let value = serde_json::to_value(&topic).expect("serialize");
    assert_eq!(value["PublishBatchRequestEntries"][0]["Message"], "{}");

    let put = SingleRequest::PutRecord(StreamPut {
        delivery_stream_name: "s".into(),
        record: StreamRecord { data: "{}\n".into() },
    });
    let value = serde_json::to_value(&put).expect("serialize");
    assert_eq!(
        value,
        json!({"Action": "PutRecord", "DeliveryStreamName": "s", "Record": {"Data": "{}\n"}})
    );
}

#[test]
fn sink_request_deserializes_either_shape() {
    let batch = SinkRequest::Batch(queue_batch());
    let text = serde_json::to_string(&batch).expect("serialize");
    let back: SinkRequest = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(back, batch);

    let single = SinkRequest::Single(SingleRequest::Publish(TopicMessage {
        topic_arn: "arn".into(),
        message: "{}".into(),
    }));
    let text = serde_json::to_string(&single).expect("serialize");
    let back: SinkRequest = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(back, single);
}

#[test]
fn batch_request_accessors() {
    let batch = queue_batch();
    assert_eq!(batch.kind(), SinkKind::Queue);
    assert_eq!(batch.destination(), "queue-url");
    assert_eq!(batch.len(), 2);
    assert!(!batch.is_empty());
    assert_eq!(batch.payloads(), vec!["{\"a\":1}", "{\"b\":22}"]);
    assert_eq!(batch.payload_bytes(), 15);
    assert_eq!(batch.entry_id(1), "1");
    assert_eq!(batch.entry_id(9), "9");

    let stream = BatchRequest::PutRecordBatch(StreamBatch {
        delivery_stream_name: "s".into(),
        records: vec![StreamRecord { data: "{}\n".into() }],
    });
    assert_eq!(stream.entry_id(0), "0");
}

#[test]
fn response_failure_reason_joins_entries() {
    assert_eq!(SinkResponse::accepted(3).failure_reason(), None);
    assert!(SinkResponse::accepted(3).is_success());

    let response = SinkResponse {
        accepted: 0,
        failed: vec![
            FailedEntry {
                id: "0".into(),
                reason: "too big".into(),
            },
            FailedEntry {
                id: "1".into(),
                reason: "throttled".into(),
            },
        ],
        request_id: None,
    };
    assert!(!response.is_success());
    assert_eq!(
        response.failure_reason().as_deref(),
        Some("0: too big; 1: throttled")
    );
}

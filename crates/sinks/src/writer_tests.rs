use super::*;
use crate::{SinkFormat, SinkRequest, Stream, Topic};

#[test]
fn writes_one_json_line_per_request() {
    let mut sink = WriterSink::new(Vec::new());

    let response = sink
        .send_batch(&Topic::batch("arn", vec!["{\"a\":1}".into(), "{}".into()]))
        .expect("batch");
    assert_eq!(response.accepted, 2);
    assert_eq!(response.request_id.as_deref(), Some("1"));

    sink.send_single(&Stream::single("s", "{}\n".into()))
        .expect("single");
    assert_eq!(sink.written(), 2);

    let out = String::from_utf8(sink.into_inner()).expect("utf8");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2, "output: {out}");

    let first: SinkRequest = serde_json::from_str(lines[0]).expect("parse first line");
    match first {
        SinkRequest::Batch(b) => {
            assert_eq!(b.destination(), "arn");
            assert_eq!(b.payloads(), vec!["{\"a\":1}", "{}"]);
        }
        other => panic!("unexpected request {other:?}"),
    }

    let second: SinkRequest = serde_json::from_str(lines[1]).expect("parse second line");
    assert!(matches!(second, SinkRequest::Single(SingleRequest::PutRecord(_))));
}

#[test]
fn write_errors_surface_as_sink_errors() {
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let mut sink = WriterSink::new(Broken);
    let err = sink
        .send_batch(&Topic::batch("arn", vec!["{}".into()]))
        .expect_err("write must fail");
    assert!(err.to_string().contains("disk full"), "{err}");
    assert_eq!(sink.written(), 0);
}

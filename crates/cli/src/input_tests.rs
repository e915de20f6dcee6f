use super::*;
use serde_json::json;
use std::io::Write as _;

#[test]
fn parse_records_accepts_array_and_lines() {
    let cases: &[(&str, Vec<Value>)] = &[
        (r#"[{"a": 1}, {"b": 2}]"#, vec![json!({"a": 1}), json!({"b": 2})]),
        ("{\"a\": 1}\n{\"b\": 2}\n", vec![json!({"a": 1}), json!({"b": 2})]),
        ("{\"a\": 1} {\"b\": 2}", vec![json!({"a": 1}), json!({"b": 2})]),
        ("[]", vec![]),
        ("", vec![]),
        // Shape is checked later; a bare scalar is passed through.
        ("5", vec![json!(5)]),
        // Two arrays are two (invalid) records, not one dataset.
        ("[1] [2]", vec![json!([1]), json!([2])]),
    ];

    for (text, expected) in cases {
        let got = parse_records(text).expect("parse");
        assert_eq!(&got, expected, "input: {text:?}");
    }
}

#[test]
fn parse_records_rejects_malformed_json() {
    assert!(parse_records("{\"a\": 1}\n{oops").is_err());
}

#[test]
fn load_records_reads_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "{{\"id\": 1}}").expect("write");
    writeln!(file, "{{\"id\": 2}}").expect("write");

    let records = load_records(file.path()).expect("load");
    assert_eq!(records, vec![json!({"id": 1}), json!({"id": 2})]);
}

#[test]
fn load_records_reports_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("nope.json");

    let err = load_records(&missing).expect_err("missing file");
    assert!(err.to_string().contains("nope.json"), "{err}");
}

use super::*;
use serde_json::json;
use std::collections::HashMap;

fn canonical(value: &serde_json::Value) -> String {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, CanonicalFormatter);
    value.serialize(&mut ser).expect("serialize");
    String::from_utf8(out).expect("utf8")
}

#[test]
fn size_kb_matches_reference_records() {
    let cases = [
        (json!({"a": 1}), 0.06),
        (json!({"b": 1234567891011u64}), 0.07),
        (json!({}), 0.05),
    ];

    for (record, expected) in &cases {
        let got = size_kb(record).expect("size");
        assert_eq!(got, *expected, "size_kb({record}) should be {expected}, got {got}");
    }
}

#[test]
fn size_kb_is_deterministic() {
    let record = json!({"field": "value".repeat(100), "nested": {"list": [1, 2, 3]}});
    let first = size_kb(&record).expect("size");
    let second = size_kb(&record).expect("size");
    assert_eq!(first, second);
}

#[test]
fn canonical_text_uses_spaced_separators() {
    let cases = [
        (json!({"a": 1}), r#"{"a": 1}"#),
        (json!([1, 2, 3]), "[1, 2, 3]"),
        (json!({"a": [true, null], "b": "x"}), r#"{"a": [true, null], "b": "x"}"#),
        (json!("tab\there"), r#""tab\there""#),
    ];

    for (value, expected) in &cases {
        assert_eq!(canonical(value), *expected, "value: {value}");
    }
}

#[test]
fn canonical_text_escapes_non_ascii() {
    let cases = [
        (json!("é"), r#""\u00e9""#),
        (json!("a→b"), r#""a\u2192b""#),
        (json!("😀"), r#""\ud83d\ude00""#),
    ];

    for (value, expected) in &cases {
        assert_eq!(canonical(value), *expected, "value: {value}");
    }
}

#[test]
fn measure_counts_escaped_bytes() {
    // `"é"` is 8 bytes, plus the envelope overhead.
    let size = measure(&json!("é")).expect("measure");
    assert_eq!(size, SizeKb::from_bytes(8 + ENVELOPE_OVERHEAD_BYTES));
}

#[test]
fn measure_accepts_integer_map_keys() {
    let mut record = HashMap::new();
    record.insert(7u32, 8u32);
    // {"7": 8} is 8 bytes, same as {"a": 1}.
    assert_eq!(size_kb(&record).expect("size"), 0.06);
}

#[test]
fn measure_rejects_unencodable_keys() {
    let mut record = HashMap::new();
    record.insert((1u8, 2u8), "tuple keys are not JSON");

    match measure(&record) {
        Err(crate::Error::Serialization(_)) => {}
        other => panic!("expected serialization error, got {other:?}"),
    }
}

#[test]
fn size_kb_from_bytes_rounds_half_away_from_zero() {
    let cases: &[(u64, u64)] = &[
        (0, 0),
        (5, 0),
        // half a hundredth is 5.12 bytes
        (6, 1),
        (57, 6),
        (69, 7),
        (1024, 100),
        (1024 * 256, 25600),
    ];

    for (bytes, hundredths) in cases {
        let got = SizeKb::from_bytes(*bytes).hundredths();
        assert_eq!(got, *hundredths, "from_bytes({bytes})");
    }
}

#[test]
fn size_kb_from_kb_and_display() {
    let cases: &[(f64, u64, &str)] = &[
        (0.0, 0, "0.00"),
        (0.06, 6, "0.06"),
        (256.0, 25600, "256.00"),
        (1.234, 123, "1.23"),
        (0.125, 13, "0.13"),
        (-3.0, 0, "0.00"),
        (f64::NAN, 0, "0.00"),
    ];

    for (kb, hundredths, shown) in cases {
        let size = SizeKb::from_kb(*kb);
        assert_eq!(size.hundredths(), *hundredths, "from_kb({kb})");
        assert_eq!(size.to_string(), *shown, "display of from_kb({kb})");
    }
}

#[test]
fn size_kb_sums_exactly() {
    let total: SizeKb = [0.1, 0.2, 0.3]
        .into_iter()
        .map(SizeKb::from_kb)
        .sum();
    assert_eq!(total, SizeKb::from_kb(0.6));
    assert_eq!(total.as_kb(), 0.6);
}

use super::*;
use serde_json::json;

#[test]
fn sorted_rows_keep_input_positions() {
    let same = json!({"id": 1});
    let records = vec![
        json!({"big": "x".repeat(800)}),
        same.clone(),
        json!({"mid": "x".repeat(200)}),
        same,
    ];

    let asc = sorted_rows(&records, SortOrder::Ascending).expect("sort");
    let positions: Vec<usize> = asc.iter().map(|&(i, _, _)| i).collect();
    assert_eq!(positions, vec![1, 3, 2, 0]);
    for &(index, record, _) in &asc {
        assert_eq!(record, &records[index], "row for input {index}");
    }

    let desc = sorted_rows(&records, SortOrder::Descending).expect("sort");
    let positions: Vec<usize> = desc.iter().map(|&(i, _, _)| i).collect();
    assert_eq!(positions, vec![0, 2, 1, 3]);
}

#[test]
fn sorted_rows_carry_measured_sizes() {
    let records = vec![json!({"b": 1234567891011u64}), json!({"a": 1})];

    let rows = sorted_rows(&records, SortOrder::Ascending).expect("sort");
    let sizes: Vec<f64> = rows.iter().map(|&(_, _, s)| s.as_kb()).collect();
    assert_eq!(sizes, vec![0.06, 0.07]);
    assert_eq!(rows[0].0, 1);
}

//! JSONL round-trip test for vector series persistence.

use kt_core::vec3;
use kt_series::{Series, load_series, save_series};

#[test]
fn series_jsonl_round_trip() {
    let mut series = Series::new();
    for i in 0..25 {
        let t = i as f64 * 0.01;
        series
            .append(t, vec3(t.sin(), t.cos(), -t))
            .expect("monotonic append");
    }

    let dir = std::env::temp_dir().join("kt_series_store_test");
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join("force_log.jsonl");

    save_series(&path, &series).expect("save");
    let loaded = load_series(&path).expect("load");

    assert_eq!(loaded.len(), series.len());
    for (a, b) in series.iter().zip(loaded.iter()) {
        assert_eq!(a.t, b.t);
        assert_eq!(a.value, b.value);
    }

    std::fs::remove_file(&path).ok();
}

#[test]
fn load_skips_blank_lines() {
    let dir = std::env::temp_dir().join("kt_series_store_test");
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join("sparse.jsonl");

    let content = r#"{"t":0.0,"value":[1.0,2.0,3.0]}

{"t":1.0,"value":[4.0,5.0,6.0]}
"#;
    std::fs::write(&path, content).expect("write");

    let loaded = load_series(&path).expect("load");
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.get(1).unwrap().value, vec3(4.0, 5.0, 6.0));

    std::fs::remove_file(&path).ok();
}

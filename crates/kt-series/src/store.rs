//! JSONL persistence for vector time series.
//!
//! One sample per line, so long force logs can be streamed or tailed by
//! external tooling without loading the whole file.

use crate::error::SeriesResult;
use crate::series::{Sample, Series};
use kt_core::Vec3;
use std::fs;
use std::path::Path;

/// Write a vector series to `path` as JSONL (one sample per line).
pub fn save_series(path: &Path, series: &Series<Vec3>) -> SeriesResult<()> {
    let mut content = String::new();
    for sample in series.iter() {
        let line = serde_json::to_string(sample)?;
        content.push_str(&line);
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(())
}

/// Load a vector series from a JSONL file written by [`save_series`].
pub fn load_series(path: &Path) -> SeriesResult<Series<Vec3>> {
    let content = fs::read_to_string(path)?;
    let mut series = Series::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let sample: Sample<Vec3> = serde_json::from_str(line)?;
        series.append(sample.t, sample.value)?;
    }
    Ok(series)
}

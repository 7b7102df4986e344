//! Tabular input readers.
//!
//! Spreadsheets are exported ahead of time as either CSV (first row is the
//! header) or a JSON array of row objects. Empty cells are left out of the
//! record so they read the same as missing columns.

use anyhow::{bail, Context, Result};
use cidian_core::{Cell, RawRecord};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read every row of `path`, choosing the format from its extension.
pub fn read_rows(path: &Path) -> Result<Vec<RawRecord>> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "csv" => read_csv(path),
        "json" => read_json(path),
        _ => bail!("unsupported input format: {} (expected .csv or .json)", path.display()),
    }
}

pub fn read_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("read header of {}", path.display()))?
        .clone();

    let mut rows = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("{}: row {}", path.display(), line + 2))?;
        let row = headers
            .iter()
            .zip(record.iter())
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (key.to_string(), Cell::from(value)))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

pub fn read_json(path: &Path) -> Result<Vec<RawRecord>> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let value: Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {}", path.display()))?;
    rows_from_json(value).with_context(|| format!("read rows of {}", path.display()))
}

fn rows_from_json(value: Value) -> Result<Vec<RawRecord>> {
    let Value::Array(items) = value else {
        bail!("expected a JSON array of row objects");
    };
    let mut rows = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let Value::Object(fields) = item else {
            bail!("row {i} is not an object");
        };
        let row = fields
            .into_iter()
            .filter_map(|(key, value)| json_cell(value).map(|cell| (key, cell)))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn json_cell(value: Value) -> Option<Cell> {
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(Cell::Text(s)),
        Value::Number(n) => n.as_f64().map(Cell::Number),
        Value::Bool(b) => Some(Cell::Text(b.to_string())),
        Value::Null => None,
        // nested values are not produced by spreadsheet exports
        other => Some(Cell::Text(other.to_string())),
    }
}

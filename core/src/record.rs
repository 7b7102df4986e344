//! Tabular source rows.
//!
//! A spreadsheet row arrives as a mapping from column header to cell value.
//! Column names are dataset specific (and mostly Chinese), so the raw shape is
//! a plain ordered map; `dataset` turns it into a typed schema afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    /// Render the cell as text. Integral numbers print without a fraction.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => match integral(*n) {
                Some(i) => i.to_string(),
                None => n.to_string(),
            },
        }
    }

    /// Interpret the cell as an integer.
    ///
    /// Numbers must have no fractional part; text must parse as `i64` once
    /// trimmed. Anything else (including empty text) is `None`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Cell::Number(n) => integral(*n),
            Cell::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }
}

fn integral(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

/// One source row as read from the tabular file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: BTreeMap<String, Cell>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with<K: Into<String>, V: Into<Cell>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert<K: Into<String>, V: Into<Cell>>(&mut self, key: K, value: V) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Cell> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn into_fields(self) -> BTreeMap<String, Cell> {
        self.fields
    }
}

impl FromIterator<(String, Cell)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (String, Cell)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// A row after [`FieldNormalizer`](crate::normalize::FieldNormalizer) ran.
///
/// Same shape as [`RawRecord`]; every text cell is trimmed and the multi-line
/// gloss field holds only non-empty lines. Only the normalizer constructs it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRecord {
    fields: BTreeMap<String, Cell>,
}

impl NormalizedRecord {
    pub(crate) fn from_fields(fields: BTreeMap<String, Cell>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Cell> {
        self.fields.get(key)
    }

    /// Text of a field, `None` when absent or empty. Numbers are rendered.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.fields.get(key) {
            Some(Cell::Text(s)) if s.is_empty() => None,
            Some(cell) => Some(cell.to_text()),
            None => None,
        }
    }

    /// Like [`text`](Self::text) but missing values become the empty string.
    pub fn text_or_empty(&self, key: &str) -> String {
        self.text(key).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// View the normalized row as a raw one again (used to re-normalize).
    pub fn to_raw(&self) -> RawRecord {
        self.fields.clone().into_iter().collect()
    }
}

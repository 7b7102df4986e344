//! Ordered collection of numbered sense fields (`釋義1`, `釋義2`, ...).
//!
//! The numbered columns form a sparse array where the first gap marks the
//! end: `釋義1`, `釋義2`, `釋義4` yields two senses, not three.

use crate::record::NormalizedRecord;

/// Upper bound on numbered sense columns in the cross-strait lexicon.
pub const MAX_SENSES: usize = 30;

/// Ordered gloss strings, at most [`MAX_SENSES`] long.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SenseList(Vec<String>);

impl SenseList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a SenseList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Scan `prefix1..=prefix{max}` and stop at the first absent or empty field.
///
/// `max` is clamped to [`MAX_SENSES`].
pub fn collect(record: &NormalizedRecord, prefix: &str, max: usize) -> SenseList {
    let mut senses = Vec::new();
    for i in 1..=max.min(MAX_SENSES) {
        let key = format!("{prefix}{i}");
        match record.text(&key) {
            Some(text) if !text.trim().is_empty() => senses.push(text.trim().to_string()),
            _ => break,
        }
    }
    SenseList(senses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::FieldNormalizer;
    use crate::record::RawRecord;

    fn normalized(rec: RawRecord) -> NormalizedRecord {
        FieldNormalizer::new().normalize(rec)
    }

    #[test]
    fn test_collect_stops_at_first_gap() {
        let rec = normalized(
            RawRecord::new()
                .with("釋義1", "一")
                .with("釋義2", "二")
                .with("釋義4", "四"),
        );
        let senses = collect(&rec, "釋義", MAX_SENSES);
        assert_eq!(senses.len(), 2);
        assert_eq!(senses.as_slice(), ["一", "二"]);
    }

    #[test]
    fn test_empty_field_is_a_gap() {
        let rec = normalized(
            RawRecord::new()
                .with("釋義1", "一")
                .with("釋義2", "   ")
                .with("釋義3", "三"),
        );
        assert_eq!(collect(&rec, "釋義", MAX_SENSES).len(), 1);
    }

    #[test]
    fn test_no_senses() {
        let rec = normalized(RawRecord::new().with("釋義2", "二"));
        assert!(collect(&rec, "釋義", MAX_SENSES).is_empty());
    }

    #[test]
    fn test_bounded_by_max() {
        let mut rec = RawRecord::new();
        for i in 1..=35 {
            rec.insert(format!("釋義{i}"), format!("sense {i}"));
        }
        let rec = normalized(rec);
        assert_eq!(collect(&rec, "釋義", MAX_SENSES).len(), 30);
        assert_eq!(collect(&rec, "釋義", 3).len(), 3);
        assert_eq!(collect(&rec, "釋義", 100).len(), 30);
    }

    #[test]
    fn test_numeric_sense_cells_count() {
        let rec = normalized(RawRecord::new().with("釋義1", 5.0).with("釋義2", "二"));
        assert_eq!(collect(&rec, "釋義", MAX_SENSES).as_slice(), ["5", "二"]);
    }
}

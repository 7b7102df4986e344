//! Field cleaning applied to every source row before anything else looks at it.
//!
//! Rules:
//! - multi-line gloss fields: split into lines, trim each, drop blank lines,
//!   join with a single `\n` (enumeration markers like `1.` are untouched);
//! - placeholder fields: replace a vertical-text glyph with its horizontal
//!   counterpart, then trim;
//! - every other text field: trim;
//! - numbers pass through, absent fields stay absent.

use crate::record::{Cell, NormalizedRecord, RawRecord};

/// The vertical-text stand-in the cross-strait lexicon uses for `ㄧ`.
pub const VERTICAL_YI: char = '丨';
/// Horizontal bopomofo `ㄧ`.
pub const BOPOMOFO_YI: char = 'ㄧ';

/// Literal character substitution restricted to a set of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderRule {
    pub from: char,
    pub to: char,
    /// Fields matched by exact name
    pub fields: Vec<String>,
    /// Fields matched as `<prefix><digits>` (numbered gloss fields)
    pub numbered_prefix: Option<String>,
}

impl PlaceholderRule {
    /// `丨` → `ㄧ` on the given pronunciation fields and numbered gloss fields.
    pub fn vertical_yi(fields: &[&str], numbered_prefix: &str) -> Self {
        Self {
            from: VERTICAL_YI,
            to: BOPOMOFO_YI,
            fields: fields.iter().map(|f| f.to_string()).collect(),
            numbered_prefix: Some(numbered_prefix.to_string()),
        }
    }

    pub fn applies_to(&self, key: &str) -> bool {
        if self.fields.iter().any(|f| f == key) {
            return true;
        }
        match &self.numbered_prefix {
            Some(prefix) => is_numbered_field(key, prefix),
            None => false,
        }
    }
}

/// `釋義12` is a numbered field of prefix `釋義`; `釋義` alone is not.
pub fn is_numbered_field(key: &str, prefix: &str) -> bool {
    match key.strip_prefix(prefix) {
        Some(rest) => !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldNormalizer {
    multiline_fields: Vec<String>,
    placeholder: Option<PlaceholderRule>,
}

impl FieldNormalizer {
    /// A normalizer that only trims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `field` as a multi-line gloss field.
    pub fn with_multiline_field<S: Into<String>>(mut self, field: S) -> Self {
        self.multiline_fields.push(field.into());
        self
    }

    pub fn with_placeholder(mut self, rule: PlaceholderRule) -> Self {
        self.placeholder = Some(rule);
        self
    }

    pub fn normalize(&self, record: RawRecord) -> NormalizedRecord {
        let fields = record
            .into_fields()
            .into_iter()
            .map(|(key, cell)| {
                let cell = self.normalize_cell(&key, cell);
                (key, cell)
            })
            .collect();
        NormalizedRecord::from_fields(fields)
    }

    fn normalize_cell(&self, key: &str, cell: Cell) -> Cell {
        let text = match cell {
            Cell::Text(text) => text,
            number => return number,
        };

        let text = match &self.placeholder {
            Some(rule) if rule.applies_to(key) => text.replace(rule.from, &rule.to.to_string()),
            _ => text,
        };

        if self.multiline_fields.iter().any(|f| f == key) {
            Cell::Text(collapse_lines(&text))
        } else {
            Cell::Text(text.trim().to_string())
        }
    }
}

/// Trim every line, drop the empty ones, rejoin with `\n`.
pub fn collapse_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moe_normalizer() -> FieldNormalizer {
        FieldNormalizer::new().with_multiline_field("釋義")
    }

    fn liangan_normalizer() -> FieldNormalizer {
        FieldNormalizer::new()
            .with_placeholder(PlaceholderRule::vertical_yi(&["臺灣音讀", "大陸音讀"], "釋義"))
    }

    #[test]
    fn test_collapse_lines() {
        let raw = "  1.招牌\n\n   \n 2.商標 \r\n";
        assert_eq!(collapse_lines(raw), "1.招牌\n2.商標");
        assert_eq!(collapse_lines(""), "");
    }

    #[test]
    fn test_trims_text_and_keeps_numbers() {
        let rec = RawRecord::new()
            .with("部首字", "片 ")
            .with("總筆畫數", 12.0)
            .with("釋義", "\n 1.揭示。 \n\n2.商標。\n");
        let out = moe_normalizer().normalize(rec);
        assert_eq!(out.get("部首字"), Some(&Cell::from("片")));
        assert_eq!(out.get("總筆畫數"), Some(&Cell::Number(12.0)));
        assert_eq!(out.get("釋義"), Some(&Cell::from("1.揭示。\n2.商標。")));
        assert_eq!(out.get("相似詞"), None);
    }

    #[test]
    fn test_vertical_placeholder_only_on_selected_fields() {
        let rec = RawRecord::new()
            .with("臺灣音讀", "丨ˋ　ㄕˊ　ㄌ丨ㄤˇ ")
            .with("釋義1", "丨")
            .with("正體字形", "一丨");
        let out = liangan_normalizer().normalize(rec);
        assert_eq!(out.text("臺灣音讀").as_deref(), Some("ㄧˋ　ㄕˊ　ㄌㄧㄤˇ"));
        assert_eq!(out.text("釋義1").as_deref(), Some("ㄧ"));
        assert_eq!(out.text("正體字形").as_deref(), Some("一丨"));
    }

    #[test]
    fn test_numbered_field_detection() {
        assert!(is_numbered_field("釋義1", "釋義"));
        assert!(is_numbered_field("釋義30", "釋義"));
        assert!(!is_numbered_field("釋義", "釋義"));
        assert!(!is_numbered_field("釋義a", "釋義"));
        assert!(!is_numbered_field("相似詞1", "釋義"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let rec = RawRecord::new()
            .with("釋義", " a \n\n b ")
            .with("大陸音讀", " 丨 ")
            .with("x", "  y");
        let n = FieldNormalizer::new()
            .with_multiline_field("釋義")
            .with_placeholder(PlaceholderRule::vertical_yi(&["大陸音讀"], "釋義"));
        let once = n.normalize(rec);
        let twice = n.normalize(once.to_raw());
        assert_eq!(once, twice);
    }
}

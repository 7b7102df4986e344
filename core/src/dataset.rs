//! Per-dataset schemas and processing profiles.
//!
//! Three datasets share one pipeline:
//! - MOE concised (國語辭典簡編本), with illustrations;
//! - MOE revised (重編國語辭典修訂本);
//! - the cross-strait lexicon (兩岸詞典) with numbered sense columns.

use crate::normalize::{FieldNormalizer, PlaceholderRule};
use crate::record::{Cell, NormalizedRecord};
use crate::senses::{self, SenseList, MAX_SENSES};
use crate::term::ReadingSystem;

/// Column names of the two MOE spreadsheets.
pub mod moe_fields {
    pub const HEADWORD: &str = "字詞名";
    pub const ENTRY_ID: &str = "字詞號";
    pub const ZHUYIN: &str = "注音一式";
    pub const ALT_ZHUYIN: &str = "變體注音";
    pub const PINYIN: &str = "漢語拼音";
    pub const ALT_PINYIN: &str = "變體漢語拼音";
    pub const GLOSS: &str = "釋義";
    pub const SYNONYMS: &str = "相似詞";
    pub const ANTONYMS: &str = "相反詞";
    pub const POLYPHONE_ORDER: &str = "多音排序";
}

/// Column names of the cross-strait lexicon spreadsheet.
pub mod liangan_fields {
    pub const TRADITIONAL: &str = "正體字形";
    pub const SIMPLIFIED: &str = "簡化字形";
    pub const ORDER: &str = "音序";
    /// Marker for terms used only on one side (★ Mainland, ▲ Taiwan)
    pub const REGION_TERM: &str = "臺／陸特有詞";
    /// Marker for readings used only on one side
    pub const REGION_READING: &str = "臺／陸特有音";
    pub const TW_ZHUYIN: &str = "臺灣音讀";
    pub const TW_PINYIN: &str = "臺灣漢拼";
    pub const CN_ZHUYIN: &str = "大陸音讀";
    pub const CN_PINYIN: &str = "大陸漢拼";
    pub const GLOSS_PREFIX: &str = "釋義";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    MoeConcised,
    MoeRevised,
    LiangAn,
}

impl DatasetKind {
    /// Prefix of output dictionary names, e.g. `moe-concised-zhuyin`.
    pub fn slug(self) -> &'static str {
        match self {
            DatasetKind::MoeConcised => "moe-concised",
            DatasetKind::MoeRevised => "moe-revised",
            DatasetKind::LiangAn => "liangancidian",
        }
    }

    pub fn is_moe(self) -> bool {
        matches!(self, DatasetKind::MoeConcised | DatasetKind::MoeRevised)
    }
}

/// How one dataset is wired through the shared pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetProfile {
    pub kind: DatasetKind,
    /// MOE: add synonym/antonym lines. Cross-strait: add region markers.
    pub include_cross_references: bool,
    /// Prefix synonym/antonym lines with `[似]` / `[反]`.
    pub label_cross_references: bool,
    /// Column holding an explicit ordering for popularity ranking.
    pub order_field: Option<String>,
    /// Emit structured definitions with illustration nodes.
    pub attach_images: bool,
}

impl DatasetProfile {
    pub fn moe_concised() -> Self {
        Self {
            kind: DatasetKind::MoeConcised,
            include_cross_references: true,
            label_cross_references: false,
            order_field: Some(moe_fields::POLYPHONE_ORDER.to_string()),
            attach_images: true,
        }
    }

    pub fn moe_revised() -> Self {
        Self {
            kind: DatasetKind::MoeRevised,
            include_cross_references: true,
            label_cross_references: true,
            order_field: Some(moe_fields::POLYPHONE_ORDER.to_string()),
            attach_images: false,
        }
    }

    pub fn liangan() -> Self {
        Self {
            kind: DatasetKind::LiangAn,
            include_cross_references: true,
            label_cross_references: false,
            order_field: Some(liangan_fields::ORDER.to_string()),
            attach_images: false,
        }
    }

    pub fn for_kind(kind: DatasetKind) -> Self {
        match kind {
            DatasetKind::MoeConcised => Self::moe_concised(),
            DatasetKind::MoeRevised => Self::moe_revised(),
            DatasetKind::LiangAn => Self::liangan(),
        }
    }

    /// Field cleaning rules for this dataset.
    pub fn normalizer(&self) -> FieldNormalizer {
        match self.kind {
            DatasetKind::MoeConcised | DatasetKind::MoeRevised => {
                FieldNormalizer::new().with_multiline_field(moe_fields::GLOSS)
            }
            DatasetKind::LiangAn => FieldNormalizer::new().with_placeholder(
                PlaceholderRule::vertical_yi(
                    &[liangan_fields::TW_ZHUYIN, liangan_fields::CN_ZHUYIN],
                    liangan_fields::GLOSS_PREFIX,
                ),
            ),
        }
    }

    /// Pull the typed schema out of a normalized row.
    pub fn extract(&self, record: &NormalizedRecord) -> DatasetEntry {
        let order = self
            .order_field
            .as_deref()
            .and_then(|f| record.get(f))
            .cloned();
        match self.kind {
            DatasetKind::MoeConcised | DatasetKind::MoeRevised => {
                DatasetEntry::Moe(MoeEntry::from_record(record, order))
            }
            DatasetKind::LiangAn => DatasetEntry::LiangAn(LiangAnEntry::from_record(record, order)),
        }
    }
}

/// A row of either MOE dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoeEntry {
    pub headword: String,
    pub entry_id: String,
    pub zhuyin: String,
    pub alt_zhuyin: Option<String>,
    pub pinyin: String,
    pub alt_pinyin: Option<String>,
    /// Normalized multi-line gloss
    pub gloss: String,
    pub synonyms: Option<String>,
    pub antonyms: Option<String>,
    pub order: Option<Cell>,
}

impl MoeEntry {
    pub fn from_record(record: &NormalizedRecord, order: Option<Cell>) -> Self {
        use moe_fields::*;
        Self {
            headword: record.text_or_empty(HEADWORD),
            entry_id: record.text_or_empty(ENTRY_ID),
            zhuyin: record.text_or_empty(ZHUYIN),
            alt_zhuyin: record.text(ALT_ZHUYIN),
            pinyin: record.text_or_empty(PINYIN),
            alt_pinyin: record.text(ALT_PINYIN),
            gloss: record.text_or_empty(GLOSS),
            synonyms: record.text(SYNONYMS),
            antonyms: record.text(ANTONYMS),
            order,
        }
    }

    pub fn reading(&self, system: ReadingSystem) -> &str {
        match system {
            ReadingSystem::Zhuyin => &self.zhuyin,
            ReadingSystem::Pinyin => &self.pinyin,
        }
    }

    pub fn alternate_reading(&self, system: ReadingSystem) -> Option<&str> {
        match system {
            ReadingSystem::Zhuyin => self.alt_zhuyin.as_deref(),
            ReadingSystem::Pinyin => self.alt_pinyin.as_deref(),
        }
    }
}

/// A row of the cross-strait lexicon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiangAnEntry {
    pub traditional: String,
    pub simplified: Option<String>,
    pub tw_zhuyin: String,
    pub tw_pinyin: String,
    pub cn_zhuyin: Option<String>,
    pub cn_pinyin: Option<String>,
    pub region_term: Option<String>,
    pub region_reading: Option<String>,
    pub order: Option<Cell>,
    pub senses: SenseList,
}

impl LiangAnEntry {
    pub fn from_record(record: &NormalizedRecord, order: Option<Cell>) -> Self {
        use liangan_fields::*;
        Self {
            traditional: record.text_or_empty(TRADITIONAL),
            simplified: record.text(SIMPLIFIED),
            tw_zhuyin: record.text_or_empty(TW_ZHUYIN),
            tw_pinyin: record.text_or_empty(TW_PINYIN),
            cn_zhuyin: record.text(CN_ZHUYIN),
            cn_pinyin: record.text(CN_PINYIN),
            region_term: record.text(REGION_TERM),
            region_reading: record.text(REGION_READING),
            order,
            senses: senses::collect(record, GLOSS_PREFIX, MAX_SENSES),
        }
    }

    /// Taiwan reading, the primary one.
    pub fn reading(&self, system: ReadingSystem) -> &str {
        match system {
            ReadingSystem::Zhuyin => &self.tw_zhuyin,
            ReadingSystem::Pinyin => &self.tw_pinyin,
        }
    }

    /// Mainland reading, only when it differs from the Taiwan one.
    pub fn alternate_reading(&self, system: ReadingSystem) -> Option<&str> {
        let mainland = match system {
            ReadingSystem::Zhuyin => self.cn_zhuyin.as_deref(),
            ReadingSystem::Pinyin => self.cn_pinyin.as_deref(),
        };
        mainland.filter(|m| *m != self.reading(system))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatasetEntry {
    Moe(MoeEntry),
    LiangAn(LiangAnEntry),
}

impl DatasetEntry {
    pub fn headword(&self) -> &str {
        match self {
            DatasetEntry::Moe(e) => &e.headword,
            DatasetEntry::LiangAn(e) => &e.traditional,
        }
    }

    pub fn order(&self) -> Option<&Cell> {
        match self {
            DatasetEntry::Moe(e) => e.order.as_ref(),
            DatasetEntry::LiangAn(e) => e.order.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawRecord;

    #[test]
    fn test_moe_extraction() {
        let profile = DatasetProfile::moe_concised();
        let raw = RawRecord::new()
            .with(moe_fields::HEADWORD, " 牌 ")
            .with(moe_fields::ZHUYIN, "ㄆㄞˊ")
            .with(moe_fields::ALT_ZHUYIN, "  ")
            .with(moe_fields::GLOSS, "1.招牌\n\n 2.商標")
            .with(moe_fields::POLYPHONE_ORDER, 1.0);
        let entry = match profile.extract(&profile.normalizer().normalize(raw)) {
            DatasetEntry::Moe(e) => e,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(entry.headword, "牌");
        assert_eq!(entry.reading(ReadingSystem::Zhuyin), "ㄆㄞˊ");
        assert_eq!(entry.reading(ReadingSystem::Pinyin), "");
        assert_eq!(entry.alternate_reading(ReadingSystem::Zhuyin), None);
        assert_eq!(entry.gloss, "1.招牌\n2.商標");
        assert_eq!(entry.order, Some(Cell::Number(1.0)));
    }

    #[test]
    fn test_liangan_extraction() {
        let profile = DatasetProfile::liangan();
        let raw = RawRecord::new()
            .with(liangan_fields::TRADITIONAL, "一石兩鳥")
            .with(liangan_fields::SIMPLIFIED, "一石两鸟")
            .with(liangan_fields::TW_ZHUYIN, "丨ˋ　ㄕˊ")
            .with(liangan_fields::CN_ZHUYIN, "丨ˋ　ㄕˊ")
            .with(liangan_fields::CN_PINYIN, "yīshí")
            .with(liangan_fields::TW_PINYIN, "yìshí")
            .with(liangan_fields::ORDER, 2.0)
            .with("釋義1", "比喻做一件事得到兩種收穫。")
            .with("釋義3", "ignored");
        let entry = match profile.extract(&profile.normalizer().normalize(raw)) {
            DatasetEntry::LiangAn(e) => e,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(entry.tw_zhuyin, "ㄧˋ　ㄕˊ");
        assert_eq!(entry.alternate_reading(ReadingSystem::Zhuyin), None);
        assert_eq!(entry.alternate_reading(ReadingSystem::Pinyin), Some("yīshí"));
        assert_eq!(entry.senses.len(), 1);
        assert_eq!(entry.order, Some(Cell::Number(2.0)));
    }
}

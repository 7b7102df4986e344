//! Definition body composition and script-variant emission.
//!
//! For every row and every reading system the composer builds one body:
//!
//! ```text
//! 【trad】 【simp】<alternate reading><cross references><glosses>
//! ```
//!
//! and emits it under the traditional headword, plus a second entry under the
//! simplified headword when the two differ.

use crate::dataset::{DatasetEntry, DatasetKind, DatasetProfile, LiangAnEntry, MoeEntry};
use crate::images::ImageEntry;
use crate::script::VariantResolver;
use crate::term::{ContentNode, Definition, ReadingSystem, StructuredContent, TermVariant};

/// Label of the alternate-reading annotation for a dataset and reading system.
pub fn alternate_reading_label(kind: DatasetKind, system: ReadingSystem) -> &'static str {
    match (kind.is_moe(), system) {
        (true, ReadingSystem::Zhuyin) => "變體注音",
        (true, ReadingSystem::Pinyin) => "變體漢語拼音",
        (false, ReadingSystem::Zhuyin) => "大陸音讀",
        (false, ReadingSystem::Pinyin) => "大陸漢拼",
    }
}

/// Variants produced for one row, grouped by reading system.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposedEntry {
    pub zhuyin: Vec<TermVariant>,
    pub pinyin: Vec<TermVariant>,
}

impl ComposedEntry {
    pub fn variants(&self, system: ReadingSystem) -> &[TermVariant] {
        match system {
            ReadingSystem::Zhuyin => &self.zhuyin,
            ReadingSystem::Pinyin => &self.pinyin,
        }
    }

    /// Attach the same relevance weight to every variant.
    pub fn with_score(self, score: i64) -> Self {
        let rescore = |v: Vec<TermVariant>| -> Vec<TermVariant> {
            v.into_iter().map(|t| t.with_score(score)).collect()
        };
        Self {
            zhuyin: rescore(self.zhuyin),
            pinyin: rescore(self.pinyin),
        }
    }

    pub fn len(&self) -> usize {
        self.zhuyin.len() + self.pinyin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zhuyin.is_empty() && self.pinyin.is_empty()
    }
}

pub struct EntryComposer<'a> {
    profile: &'a DatasetProfile,
    resolver: &'a VariantResolver,
}

impl<'a> EntryComposer<'a> {
    pub fn new(profile: &'a DatasetProfile, resolver: &'a VariantResolver) -> Self {
        Self { profile, resolver }
    }

    /// Compose the variants of one row. `images` is ignored unless the
    /// profile attaches illustrations.
    pub fn compose(&self, entry: &DatasetEntry, images: &[ImageEntry]) -> ComposedEntry {
        let (traditional, simplified) = self.script_forms(entry);
        let header = header(&traditional, &simplified);

        let mut composed = ComposedEntry::default();
        for system in ReadingSystem::ALL {
            let (text, reading) = match entry {
                DatasetEntry::Moe(e) => (self.moe_body(&header, e, system), e.reading(system)),
                DatasetEntry::LiangAn(e) => (self.liangan_body(&header, e, system), e.reading(system)),
            };
            let definition = self.definition(text, images);
            let variants = emit(&traditional, &simplified, reading, definition);
            match system {
                ReadingSystem::Zhuyin => composed.zhuyin = variants,
                ReadingSystem::Pinyin => composed.pinyin = variants,
            }
        }
        composed
    }

    fn script_forms(&self, entry: &DatasetEntry) -> (String, String) {
        let traditional = entry.headword().to_string();
        let explicit = match entry {
            DatasetEntry::LiangAn(e) => e.simplified.clone(),
            DatasetEntry::Moe(_) => None,
        };
        let simplified = explicit.unwrap_or_else(|| self.resolver.resolve(&traditional));
        (traditional, simplified)
    }

    fn moe_body(&self, header: &str, entry: &MoeEntry, system: ReadingSystem) -> String {
        let mut out = String::from(header);
        if let Some(alt) = entry.alternate_reading(system) {
            let label = alternate_reading_label(self.profile.kind, system);
            out.push_str(&format!("{label}: 【{alt}】"));
        }
        out.push('\n');
        if self.profile.include_cross_references {
            out.push_str(&self.moe_cross_references(entry));
        }
        out.push_str(&entry.gloss);
        out
    }

    /// Synonym and antonym lines, each ending in `\n`. Empty when neither exists.
    fn moe_cross_references(&self, entry: &MoeEntry) -> String {
        let labelled = self.profile.label_cross_references;
        let lines: Vec<String> = [("[似]", &entry.synonyms), ("[反]", &entry.antonyms)]
            .into_iter()
            .filter_map(|(label, text)| {
                text.as_deref().map(|t| {
                    if labelled {
                        format!("{label}{t}")
                    } else {
                        t.to_string()
                    }
                })
            })
            .collect();
        if lines.is_empty() {
            String::new()
        } else {
            format!("{}\n", lines.join("\n"))
        }
    }

    fn liangan_body(&self, header: &str, entry: &LiangAnEntry, system: ReadingSystem) -> String {
        let mut out = String::from(header);
        if let Some(alt) = entry.alternate_reading(system) {
            let label = alternate_reading_label(self.profile.kind, system);
            out.push_str(&format!("{label}: 【{alt}】"));
        }
        if self.profile.include_cross_references {
            out.push_str(&region_distinctions(entry));
        }
        for sense in &entry.senses {
            out.push('\n');
            out.push_str(sense);
        }
        out
    }

    fn definition(&self, text: String, images: &[ImageEntry]) -> Definition {
        if !self.profile.attach_images {
            return Definition::Text(text);
        }
        let mut content = vec![ContentNode::Text(text)];
        content.extend(
            images
                .iter()
                .map(|img| ContentNode::illustration(&img.caption, &img.archive_path())),
        );
        Definition::Structured(StructuredContent { content })
    }
}

/// `【trad】`, followed by ` 【simp】` when the forms differ.
fn header(traditional: &str, simplified: &str) -> String {
    if simplified.is_empty() || simplified == traditional {
        format!("【{traditional}】")
    } else {
        format!("【{traditional}】 【{simplified}】")
    }
}

/// ` 詞: <marker> 音: <marker>` for terms or readings unique to one side.
fn region_distinctions(entry: &LiangAnEntry) -> String {
    let mut info = String::new();
    if let Some(term) = &entry.region_term {
        info.push_str(&format!("詞: {term} "));
    }
    if let Some(reading) = &entry.region_reading {
        info.push_str(&format!("音: {reading}"));
    }
    if info.is_empty() {
        info
    } else {
        format!(" {info}")
    }
}

/// Traditional variant always; simplified variant only when it differs.
fn emit(traditional: &str, simplified: &str, reading: &str, definition: Definition) -> Vec<TermVariant> {
    if simplified.is_empty() || simplified == traditional {
        vec![TermVariant::new(traditional, reading, definition)]
    } else {
        vec![
            TermVariant::new(traditional, reading, definition.clone()),
            TermVariant::new(simplified, reading, definition),
        ]
    }
}

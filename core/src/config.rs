//! Build configuration, loadable from TOML.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```toml
//! revision = "2.2"
//! popularity_boost = 50
//!
//! [liangan]
//! title = "兩岸詞典"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::dataset::{moe_fields, DatasetKind, DatasetProfile};
use crate::images::DEFAULT_COLLATION_LOCALE;
use crate::rank::{PopularityRanker, DEFAULT_POPULARITY_BOOST};
use crate::term::ReadingSystem;
use crate::term_bank::DictionaryIndex;

/// Dictionary revision written to every `index.json`.
pub const DEFAULT_REVISION: &str = "2.1";

/// Title and credits shared by the zhuyin and pinyin builds of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatasetMeta {
    /// Base title; the reading system (`注音` / `拼音`) is appended
    pub title: String,
    pub attribution: String,
    pub description: String,
}

impl DatasetMeta {
    fn new(title: &str, attribution: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            attribution: attribution.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildConfig {
    pub revision: String,
    pub author: String,
    /// Boost used by the popularity ranker (`boost - order`)
    pub popularity_boost: i64,
    /// MOE: add synonym/antonym lines
    pub add_synonyms_antonyms: bool,
    /// Cross-strait: add Taiwan/Mainland-only markers
    pub add_region_distinctions: bool,
    /// BCP-47 locale for ordering illustration captions
    pub collation_locale: String,
    /// Ordering column of the MOE dictionaries; empty disables ranking
    pub moe_order_field: String,
    pub concised: DatasetMeta,
    pub revised: DatasetMeta,
    pub liangan: DatasetMeta,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            revision: DEFAULT_REVISION.to_string(),
            author: "shadow".to_string(),
            popularity_boost: DEFAULT_POPULARITY_BOOST,
            add_synonyms_antonyms: true,
            add_region_distinctions: true,
            collation_locale: DEFAULT_COLLATION_LOCALE.to_string(),
            moe_order_field: moe_fields::POLYPHONE_ORDER.to_string(),
            concised: DatasetMeta::new(
                "國語辭典簡編本",
                "國語辭典簡編本 (2014)",
                "A monolingual dictionary made for learners of Mandarin Chinese. 主要適用對象：國中、小學生及學習華語人士。",
            ),
            revised: DatasetMeta::new(
                "重編國語辭典修訂本",
                "重編國語辭典修訂本 (2015)",
                "A monolingual dictionary made for Mandarin Chinese. 主要適用對象：對歷史語言有興趣的研究者。",
            ),
            liangan: DatasetMeta::new(
                "兩岸詞典",
                "兩岸詞典 (2015)",
                "A monolingual dictionary of Mandarin Chinese.",
            ),
        }
    }
}

impl BuildConfig {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn meta(&self, kind: DatasetKind) -> &DatasetMeta {
        match kind {
            DatasetKind::MoeConcised => &self.concised,
            DatasetKind::MoeRevised => &self.revised,
            DatasetKind::LiangAn => &self.liangan,
        }
    }

    /// Dataset profile with this config's switches applied.
    pub fn profile(&self, kind: DatasetKind) -> DatasetProfile {
        let mut profile = DatasetProfile::for_kind(kind);
        if kind.is_moe() {
            profile.include_cross_references = self.add_synonyms_antonyms;
            profile.order_field = Some(self.moe_order_field.clone()).filter(|f| !f.is_empty());
        } else {
            profile.include_cross_references = self.add_region_distinctions;
        }
        profile
    }

    pub fn ranker(&self) -> PopularityRanker {
        PopularityRanker::new(self.popularity_boost)
    }

    /// `index.json` contents for one dataset in one reading system.
    pub fn index(&self, kind: DatasetKind, system: ReadingSystem) -> DictionaryIndex {
        let meta = self.meta(kind);
        DictionaryIndex {
            title: format!("{} {}", meta.title, system.title_suffix()),
            revision: self.revision.clone(),
            format: 3,
            author: self.author.clone(),
            attribution: meta.attribution.clone(),
            description: meta.description.clone(),
        }
    }

    /// Output directory name, e.g. `moe-concised-zhuyin`.
    pub fn output_name(kind: DatasetKind, system: ReadingSystem) -> String {
        format!("{}-{}", kind.slug(), system.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = BuildConfig::default();
        assert_eq!(cfg.popularity_boost, 100);
        let idx = cfg.index(DatasetKind::MoeConcised, ReadingSystem::Zhuyin);
        assert_eq!(idx.title, "國語辭典簡編本 注音");
        assert_eq!(idx.revision, "2.1");
        assert_eq!(
            BuildConfig::output_name(DatasetKind::LiangAn, ReadingSystem::Pinyin),
            "liangancidian-pinyin"
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg = BuildConfig::from_toml_str(
            r#"
popularity_boost = 50
add_synonyms_antonyms = false

[liangan]
title = "兩岸"
"#,
        )
        .unwrap();
        assert_eq!(cfg.popularity_boost, 50);
        assert_eq!(cfg.liangan.title, "兩岸");
        assert_eq!(cfg.liangan.attribution, "");
        assert_eq!(cfg.revision, DEFAULT_REVISION);
        assert!(!cfg.profile(DatasetKind::MoeRevised).include_cross_references);
        assert!(cfg.profile(DatasetKind::LiangAn).include_cross_references);
        assert!(cfg.profile(DatasetKind::MoeRevised).label_cross_references);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut cfg = BuildConfig::default();
        cfg.popularity_boost = 10;
        let text = cfg.to_toml_string().unwrap();
        assert_eq!(BuildConfig::from_toml_str(&text).unwrap(), cfg);
        assert_eq!(cfg.ranker().boost(), 10);
    }

    #[test]
    fn test_moe_order_field() {
        let cfg = BuildConfig::default();
        assert_eq!(
            cfg.profile(DatasetKind::MoeConcised).order_field.as_deref(),
            Some("多音排序")
        );
        let cfg = BuildConfig::from_toml_str("moe_order_field = \"\"").unwrap();
        assert_eq!(cfg.profile(DatasetKind::MoeRevised).order_field, None);
        assert_eq!(
            cfg.profile(DatasetKind::LiangAn).order_field.as_deref(),
            Some("音序")
        );
    }
}

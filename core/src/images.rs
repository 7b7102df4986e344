//! Illustration index for the MOE concised dictionary.
//!
//! The picture table lists `(字詞號, 圖片題名, 檔案名稱)` rows. They are grouped
//! by entry identifier and each group is ordered by caption with a Chinese
//! collator, so illustration order does not depend on row order.

use ahash::AHashMap;
use anyhow::{anyhow, Result};
use icu::collator::options::CollatorOptions;
use icu::collator::{Collator, CollatorBorrowed};
use icu::locale::Locale;
use std::cmp::Ordering;

use crate::record::RawRecord;

/// Column names of the picture index table.
pub mod fields {
    pub const ENTRY_ID: &str = "字詞號";
    pub const CAPTION: &str = "圖片題名";
    pub const FILE_NAME: &str = "檔案名稱";
}

/// Folder inside the dictionary archive holding the pictures.
pub const IMAGE_DIR: &str = "img";

/// Zhuyin ordering; falls back to the `zh` default when that tailoring is absent.
pub const DEFAULT_COLLATION_LOCALE: &str = "zh-u-co-zhuyin";

/// One illustration attached to an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub caption: String,
    pub file_name: String,
}

impl ImageEntry {
    /// Path of the picture inside the dictionary archive.
    pub fn archive_path(&self) -> String {
        format!("{IMAGE_DIR}/{}", self.file_name)
    }
}

/// A row of the picture index table, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRow {
    pub entry_id: String,
    pub caption: String,
    pub file_name: String,
}

impl ImageRow {
    pub fn new(entry_id: &str, caption: &str, file_name: &str) -> Self {
        Self {
            entry_id: entry_id.trim().to_string(),
            caption: caption.trim().to_string(),
            file_name: file_name.trim().to_string(),
        }
    }

    pub fn from_record(record: &RawRecord) -> Self {
        let field = |key: &str| record.get(key).map(|c| c.to_text()).unwrap_or_default();
        Self::new(
            &field(fields::ENTRY_ID),
            &field(fields::CAPTION),
            &field(fields::FILE_NAME),
        )
    }
}

/// Caption comparison under a Chinese collation.
pub struct CaptionCollator {
    collator: CollatorBorrowed<'static>,
}

impl CaptionCollator {
    /// Build a collator for a BCP-47 locale such as `zh-u-co-zhuyin`.
    pub fn new(locale: &str) -> Result<Self> {
        let locale: Locale = locale
            .parse()
            .map_err(|e| anyhow!("invalid collation locale '{locale}': {e:?}"))?;
        let collator = Collator::try_new(locale.into(), CollatorOptions::default())
            .map_err(|e| anyhow!("no collation data for locale: {e:?}"))?;
        Ok(Self { collator })
    }

    pub fn traditional_chinese() -> Result<Self> {
        Self::new(DEFAULT_COLLATION_LOCALE)
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }
}

impl std::fmt::Debug for CaptionCollator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionCollator").finish_non_exhaustive()
    }
}

/// Entry identifier → illustrations sorted by caption.
#[derive(Debug, Clone, Default)]
pub struct ImageIndex {
    groups: AHashMap<String, Vec<ImageEntry>>,
}

impl ImageIndex {
    /// Group rows by identifier and sort every group by caption.
    ///
    /// Rows with a blank identifier are dropped. The sort is stable, so equal
    /// captions keep their table order.
    pub fn build<I>(rows: I, collator: &CaptionCollator) -> Self
    where
        I: IntoIterator<Item = ImageRow>,
    {
        let mut groups: AHashMap<String, Vec<ImageEntry>> = AHashMap::new();
        for row in rows {
            if row.entry_id.is_empty() {
                continue;
            }
            groups.entry(row.entry_id).or_default().push(ImageEntry {
                caption: row.caption,
                file_name: row.file_name,
            });
        }
        for entries in groups.values_mut() {
            entries.sort_by(|a, b| collator.compare(&a.caption, &b.caption));
        }
        tracing::debug!(groups = groups.len(), "built image index");
        Self { groups }
    }

    /// Illustrations for an entry, empty when it has none.
    pub fn get(&self, entry_id: &str) -> &[ImageEntry] {
        self.groups.get(entry_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of entries that have at least one illustration.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

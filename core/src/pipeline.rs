//! Per-dataset batch processing.
//!
//! One sequential pass: normalize → schema → compose → rank → emit. The image
//! index must be complete before the first row is composed; rows never look
//! at each other otherwise.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::compose::{ComposedEntry, EntryComposer};
use crate::dataset::{DatasetEntry, DatasetProfile};
use crate::images::{ImageEntry, ImageIndex, IMAGE_DIR};
use crate::normalize::FieldNormalizer;
use crate::rank::PopularityRanker;
use crate::record::RawRecord;
use crate::script::VariantResolver;
use crate::sink::ReadingSinks;
use crate::term::ReadingSystem;

/// Rows between progress log lines.
pub const PROGRESS_INTERVAL: usize = 10_000;

/// Counters returned by [`Pipeline::process`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Source rows consumed
    pub rows: usize,
    /// Term variants emitted across both reading systems
    pub terms: usize,
}

pub struct Pipeline<'a> {
    profile: DatasetProfile,
    normalizer: FieldNormalizer,
    resolver: &'a VariantResolver,
    ranker: PopularityRanker,
}

impl<'a> Pipeline<'a> {
    pub fn new(profile: DatasetProfile, resolver: &'a VariantResolver, ranker: PopularityRanker) -> Self {
        let normalizer = profile.normalizer();
        Self {
            profile,
            normalizer,
            resolver,
            ranker,
        }
    }

    /// Turn one raw row into its ranked variants.
    pub fn compose_record(&self, record: RawRecord, images: &ImageIndex) -> ComposedEntry {
        let normalized = self.normalizer.normalize(record);
        let entry = self.profile.extract(&normalized);
        let illustrations: &[ImageEntry] = match &entry {
            DatasetEntry::Moe(e) if self.profile.attach_images && !e.entry_id.is_empty() => {
                images.get(&e.entry_id)
            }
            _ => &[],
        };
        let composed = EntryComposer::new(&self.profile, self.resolver).compose(&entry, illustrations);
        composed.with_score(self.ranker.rank(entry.order()))
    }

    /// Process every row in order, sending each reading system's variants to
    /// its sink. Sink errors abort the batch.
    pub fn process<I>(&self, rows: I, images: &ImageIndex, sinks: &mut ReadingSinks<'_>) -> Result<BatchStats>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut stats = BatchStats::default();
        for record in rows {
            let composed = self.compose_record(record, images);
            for system in ReadingSystem::ALL {
                for variant in composed.variants(system) {
                    sinks
                        .get(system)
                        .add_term(variant.clone())
                        .with_context(|| format!("add term '{}'", variant.term))?;
                }
            }
            stats.rows += 1;
            stats.terms += composed.len();
            if stats.rows % PROGRESS_INTERVAL == 0 {
                tracing::info!(dataset = self.profile.kind.slug(), rows = stats.rows, "processed entries");
            }
        }
        tracing::debug!(
            dataset = self.profile.kind.slug(),
            rows = stats.rows,
            terms = stats.terms,
            "dataset done"
        );
        Ok(stats)
    }
}

/// Register every file of the picture folder under `img/<name>` in both sinks.
pub fn attach_image_files(dir: &Path, sinks: &mut ReadingSinks<'_>) -> Result<usize> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read picture dir {}", dir.display()))? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort();

    let mut attached = 0;
    for path in &paths {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => {
                tracing::warn!(path = %path.display(), "skipping picture with non-UTF-8 name");
                continue;
            }
        };
        let archive_path = format!("{IMAGE_DIR}/{name}");
        for system in ReadingSystem::ALL {
            sinks.get(system).add_file(path, &archive_path)?;
        }
        attached += 1;
    }
    tracing::info!(count = attached, dir = %dir.display(), "attached pictures");
    Ok(attached)
}

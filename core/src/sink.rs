//! Destination of composed terms.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::term::{ReadingSystem, TermVariant};

/// Receives terms and media files; owns the on-disk format.
pub trait DictionarySink {
    fn add_term(&mut self, term: TermVariant) -> Result<()>;

    /// Register a media file under `archive_path` inside the dictionary.
    fn add_file(&mut self, source: &Path, archive_path: &str) -> Result<()>;

    /// Flush anything buffered.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Keeps everything in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub terms: Vec<TermVariant>,
    pub files: Vec<(PathBuf, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DictionarySink for MemorySink {
    fn add_term(&mut self, term: TermVariant) -> Result<()> {
        self.terms.push(term);
        Ok(())
    }

    fn add_file(&mut self, source: &Path, archive_path: &str) -> Result<()> {
        self.files.push((source.to_path_buf(), archive_path.to_string()));
        Ok(())
    }
}

/// The pair of sinks a dataset writes to, one per reading system.
pub struct ReadingSinks<'a> {
    pub zhuyin: &'a mut dyn DictionarySink,
    pub pinyin: &'a mut dyn DictionarySink,
}

impl<'a> ReadingSinks<'a> {
    pub fn new(zhuyin: &'a mut dyn DictionarySink, pinyin: &'a mut dyn DictionarySink) -> Self {
        Self { zhuyin, pinyin }
    }

    pub fn get(&mut self, system: ReadingSystem) -> &mut dyn DictionarySink {
        match system {
            ReadingSystem::Zhuyin => &mut *self.zhuyin,
            ReadingSystem::Pinyin => &mut *self.pinyin,
        }
    }

    pub fn finish(&mut self) -> Result<()> {
        self.zhuyin.finish()?;
        self.pinyin.finish()
    }
}

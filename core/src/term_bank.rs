//! Yomitan dictionary directory writer.
//!
//! Layout:
//! - `index.json` with the dictionary metadata;
//! - `term_bank_<n>.json`, each holding at most `bank_size` rows;
//! - media files copied to their archive path (e.g. `img/0323.jpg`).
//!
//! Zipping the directory is left to the caller.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::sink::DictionarySink;
use crate::term::TermVariant;

/// Rows per term bank file.
pub const DEFAULT_BANK_SIZE: usize = 10_000;

/// Contents of `index.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryIndex {
    pub title: String,
    pub revision: String,
    pub format: u8,
    pub author: String,
    pub attribution: String,
    pub description: String,
}

impl DictionaryIndex {
    pub fn new<S: Into<String>>(title: S, revision: S) -> Self {
        Self {
            title: title.into(),
            revision: revision.into(),
            format: 3,
            author: String::new(),
            attribution: String::new(),
            description: String::new(),
        }
    }
}

pub struct TermBankWriter {
    out_dir: PathBuf,
    bank_size: usize,
    pending: Vec<TermVariant>,
    banks_written: usize,
    terms_written: usize,
}

impl TermBankWriter {
    /// Create `out_dir` and write its `index.json`.
    pub fn create<P: AsRef<Path>>(out_dir: P, index: &DictionaryIndex) -> Result<Self> {
        let out_dir = out_dir.as_ref().to_path_buf();
        fs::create_dir_all(&out_dir)
            .with_context(|| format!("create dictionary dir {}", out_dir.display()))?;
        write_json(&out_dir.join("index.json"), index)?;
        tracing::debug!(dir = %out_dir.display(), title = %index.title, "created dictionary");
        Ok(Self {
            out_dir,
            bank_size: DEFAULT_BANK_SIZE,
            pending: Vec::new(),
            banks_written: 0,
            terms_written: 0,
        })
    }

    pub fn with_bank_size(mut self, bank_size: usize) -> Self {
        self.bank_size = bank_size.max(1);
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn terms_written(&self) -> usize {
        self.terms_written
    }

    pub fn banks_written(&self) -> usize {
        self.banks_written
    }

    fn flush_bank(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let path = self
            .out_dir
            .join(format!("term_bank_{}.json", self.banks_written + 1));
        let rows: Vec<_> = self.pending.iter().map(TermVariant::bank_row).collect();
        write_json(&path, &rows)?;
        self.banks_written += 1;
        self.terms_written += self.pending.len();
        self.pending.clear();
        Ok(())
    }
}

impl DictionarySink for TermBankWriter {
    fn add_term(&mut self, term: TermVariant) -> Result<()> {
        self.pending.push(term);
        if self.pending.len() >= self.bank_size {
            self.flush_bank()?;
        }
        Ok(())
    }

    fn add_file(&mut self, source: &Path, archive_path: &str) -> Result<()> {
        let dest = self.out_dir.join(archive_path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create media dir {}", parent.display()))?;
        }
        fs::copy(source, &dest).with_context(|| {
            format!("copy {} to {}", source.display(), dest.display())
        })?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.flush_bank()?;
        tracing::info!(
            dir = %self.out_dir.display(),
            terms = self.terms_written,
            banks = self.banks_written,
            "dictionary written"
        );
        Ok(())
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer(&mut w, value).with_context(|| format!("write {}", path.display()))?;
    w.flush().with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

//! cidian-core
//!
//! Converts rows of the MOE Mandarin dictionaries (concised and revised) and
//! the cross-strait dictionary (兩岸詞典) into Yomitan term entries, one
//! dictionary per reading system (zhuyin and pinyin).
//!
//! Public API:
//! - `FieldNormalizer` - Trims cells, collapses multi-line text, repairs 丨/ㄧ
//! - `VariantResolver` - Traditional → simplified headword via OpenCC
//! - `senses::collect` - Ordered numbered-field collection (`釋義1`..`釋義30`)
//! - `EntryComposer` - Builds the definition body and term variants
//! - `PopularityRanker` - Score from the source's ordering column
//! - `ImageIndex` - Entry id → collated illustrations
//! - `DictionarySink` - Output abstraction; `TermBankWriter` writes Yomitan banks
//! - `Pipeline` - Runs one dataset end to end
//! - `BuildConfig` - Titles, credits and feature switches
pub mod record;
pub use record::{Cell, NormalizedRecord, RawRecord};

pub mod normalize;
pub use normalize::{FieldNormalizer, PlaceholderRule};

pub mod senses;
pub use senses::{SenseList, MAX_SENSES};

pub mod script;
pub use script::{OpenCcConverter, ScriptConverter, VariantResolver};

pub mod rank;
pub use rank::{PopularityRanker, DEFAULT_POPULARITY_BOOST};

pub mod images;
pub use images::{CaptionCollator, ImageEntry, ImageIndex, ImageRow};

pub mod term;
pub use term::{ContentNode, Definition, Element, ReadingSystem, StructuredContent, TermVariant};

pub mod dataset;
pub use dataset::{DatasetEntry, DatasetKind, DatasetProfile, LiangAnEntry, MoeEntry};

pub mod compose;
pub use compose::{ComposedEntry, EntryComposer};

pub mod sink;
pub use sink::{DictionarySink, MemorySink, ReadingSinks};

pub mod term_bank;
pub use term_bank::{DictionaryIndex, TermBankWriter};

pub mod pipeline;
pub use pipeline::{attach_image_files, BatchStats, Pipeline};

pub mod config;
pub use config::{BuildConfig, DatasetMeta};

mod input;

use anyhow::{bail, Result};
use cidian_core::term_bank::DEFAULT_BANK_SIZE;
use cidian_core::{
    attach_image_files, BatchStats, BuildConfig, CaptionCollator, DatasetKind, ImageIndex, ImageRow,
    Pipeline, ReadingSinks, ReadingSystem, TermBankWriter, VariantResolver,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Build Yomitan dictionaries from the MOE and cross-strait lexicons.
#[derive(Parser)]
#[command(name = "build_dicts")]
struct Args {
    /// TOML file overriding titles, credits and feature switches
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// One sub-directory per dictionary is created here
    #[arg(long, global = true, default_value = "build")]
    out_dir: PathBuf,

    #[arg(long, global = true, default_value_t = DEFAULT_BANK_SIZE)]
    bank_size: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 國語辭典簡編本 and 重編國語辭典修訂本
    Moe {
        #[arg(long)]
        concised: Option<PathBuf>,
        #[arg(long)]
        revised: Option<PathBuf>,
        /// Picture table of the concised dictionary (字詞號, 圖片題名, 檔案名稱)
        #[arg(long, requires = "concised")]
        pics_index: Option<PathBuf>,
        /// Folder holding the picture files
        #[arg(long, requires = "concised")]
        pics_dir: Option<PathBuf>,
    },
    /// 兩岸詞典
    Liangan {
        #[arg(long)]
        input: PathBuf,
    },
}

/// Where one dataset is read from and written to.
struct Job<'a> {
    kind: DatasetKind,
    input: &'a Path,
    images: &'a ImageIndex,
    pics_dir: Option<&'a Path>,
}

struct Builder<'a> {
    config: &'a BuildConfig,
    resolver: &'a VariantResolver,
    out_dir: &'a Path,
    bank_size: usize,
}

impl Builder<'_> {
    fn writer(&self, kind: DatasetKind, system: ReadingSystem) -> Result<TermBankWriter> {
        let dir = self.out_dir.join(BuildConfig::output_name(kind, system));
        Ok(TermBankWriter::create(dir, &self.config.index(kind, system))?.with_bank_size(self.bank_size))
    }

    fn build(&self, job: Job<'_>) -> Result<BatchStats> {
        let rows = input::read_rows(job.input)?;
        tracing::info!(
            dataset = job.kind.slug(),
            rows = rows.len(),
            input = %job.input.display(),
            "loaded rows"
        );

        let mut zhuyin = self.writer(job.kind, ReadingSystem::Zhuyin)?;
        let mut pinyin = self.writer(job.kind, ReadingSystem::Pinyin)?;
        let mut sinks = ReadingSinks::new(&mut zhuyin, &mut pinyin);
        if let Some(dir) = job.pics_dir {
            attach_image_files(dir, &mut sinks)?;
        }

        let pipeline = Pipeline::new(self.config.profile(job.kind), self.resolver, self.config.ranker());
        let stats = pipeline.process(rows, job.images, &mut sinks)?;
        sinks.finish()?;
        tracing::info!(
            dataset = job.kind.slug(),
            rows = stats.rows,
            terms = stats.terms,
            "dataset finished"
        );
        Ok(stats)
    }
}

fn load_image_index(path: &Path, config: &BuildConfig) -> Result<ImageIndex> {
    let collator = CaptionCollator::new(&config.collation_locale)?;
    let rows = input::read_rows(path)?;
    let index = ImageIndex::build(rows.iter().map(ImageRow::from_record), &collator);
    tracing::info!(entries = index.len(), "loaded picture index");
    Ok(index)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => BuildConfig::load_toml(path)?,
        None => BuildConfig::default(),
    };
    let resolver = VariantResolver::opencc();
    let builder = Builder {
        config: &config,
        resolver: &resolver,
        out_dir: &args.out_dir,
        bank_size: args.bank_size,
    };

    match &args.command {
        Command::Moe {
            concised,
            revised,
            pics_index,
            pics_dir,
        } => {
            if concised.is_none() && revised.is_none() {
                bail!("nothing to build: pass --concised and/or --revised");
            }
            if let Some(input) = concised {
                let images = match pics_index {
                    Some(path) => load_image_index(path, &config)?,
                    None => ImageIndex::default(),
                };
                builder.build(Job {
                    kind: DatasetKind::MoeConcised,
                    input,
                    images: &images,
                    pics_dir: pics_dir.as_deref(),
                })?;
            }
            if let Some(input) = revised {
                builder.build(Job {
                    kind: DatasetKind::MoeRevised,
                    input,
                    images: &ImageIndex::default(),
                    pics_dir: None,
                })?;
            }
        }
        Command::Liangan { input } => {
            builder.build(Job {
                kind: DatasetKind::LiangAn,
                input,
                images: &ImageIndex::default(),
                pics_dir: None,
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cidian_core::ScriptConverter;
    use serde_json::Value;
    use std::fs;

    struct Table;

    impl ScriptConverter for Table {
        fn to_simplified(&self, text: &str) -> String {
            text.replace('劃', "划")
        }
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_build_concised_with_pictures() {
        let work = tempfile::tempdir().unwrap();
        let input = work.path().join("concised.csv");
        fs::write(
            &input,
            "字詞名,字詞號,注音一式,漢語拼音,釋義\n劃,0001,ㄏㄨㄚˋ,huà,1.分開\n",
        )
        .unwrap();
        let pics = work.path().join("pics");
        fs::create_dir(&pics).unwrap();
        fs::write(pics.join("0001.jpg"), b"jpg").unwrap();
        let pics_index = work.path().join("pics.csv");
        fs::write(&pics_index, "字詞號,圖片題名,檔案名稱\n0001,刀,0001.jpg\n").unwrap();

        let config = BuildConfig::default();
        let resolver = VariantResolver::new(Table);
        let out = work.path().join("out");
        let builder = Builder {
            config: &config,
            resolver: &resolver,
            out_dir: &out,
            bank_size: DEFAULT_BANK_SIZE,
        };
        let images = load_image_index(&pics_index, &config).unwrap();
        let stats = builder
            .build(Job {
                kind: DatasetKind::MoeConcised,
                input: &input,
                images: &images,
                pics_dir: Some(&pics),
            })
            .unwrap();
        assert_eq!(stats, BatchStats { rows: 1, terms: 4 });

        let zhuyin = out.join("moe-concised-zhuyin");
        assert_eq!(read_json(&zhuyin.join("index.json"))["title"], "國語辭典簡編本 注音");
        assert!(zhuyin.join("img/0001.jpg").is_file());
        assert!(out.join("moe-concised-pinyin/img/0001.jpg").is_file());

        let bank = read_json(&zhuyin.join("term_bank_1.json"));
        let rows = bank.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "劃");
        assert_eq!(rows[1][0], "划");
        assert_eq!(rows[0][1], "ㄏㄨㄚˋ");
        assert_eq!(rows[0][5][0]["type"], "structured-content");
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let args = Args::try_parse_from(["build_dicts", "liangan", "--input", "a.csv", "--out-dir", "x"]).unwrap();
        assert_eq!(args.out_dir, PathBuf::from("x"));
        assert!(matches!(args.command, Command::Liangan { .. }));

        assert!(Args::try_parse_from(["build_dicts", "moe", "--pics-dir", "p"]).is_err());
    }
}

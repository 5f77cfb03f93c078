//! url-cache: replay an ADD/CONTAINS command file through the URL Bloom cache.
//!
//! Every command appends one trace line to the output file.
//!
//! ## Usage
//!
//! ```bash
//! # Reference run: inputPS03.txt -> outputPS03.txt, m = 5000, k = 3
//! url-cache
//!
//! # Larger filter with the rolling hash trio
//! url-cache --input urls.txt --output trace.txt --size-bits 20000 --strategy rolling
//!
//! # More logging
//! RUST_LOG=debug url-cache
//! ```

mod config;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url_bloom_cache::{
    CommandHandler, FileTraceSink, FilterConfig, HashStrategy, RunSummary, UrlCacheService,
};

use config::{load_config, FlagOverrides};

/// Bloom-filter backed URL membership cache
#[derive(Parser, Debug)]
#[command(name = "url-cache")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Command file, one `ADD <url>` or `CONTAINS <url>` per line
    #[arg(long, default_value = "inputPS03.txt")]
    input: PathBuf,

    /// Trace file, appended to
    #[arg(long, default_value = "outputPS03.txt")]
    output: PathBuf,

    /// Bit-array size (m) [default: 5000]
    #[arg(long)]
    size_bits: Option<usize>,

    /// Number of hash functions (k) [default: 3]
    #[arg(long)]
    hash_count: Option<usize>,

    /// Hash bank: standard, rolling or double-hashing [default: standard]
    #[arg(long)]
    strategy: Option<HashStrategy>,

    /// JSON file with `size_bits`, `hash_count` and `hash_strategy`
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> FlagOverrides {
        FlagOverrides {
            size_bits: self.size_bits,
            hash_count: self.hash_count,
            strategy: self.strategy,
        }
    }
}

fn init_logging() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

/// Process the whole input file against a fresh cache
fn run(args: &Args, config: &FilterConfig) -> Result<RunSummary> {
    if !args.input.is_file() {
        bail!("Input file {} does not exist", args.input.display());
    }

    let input = File::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;
    let sink = FileTraceSink::open(&args.output)
        .with_context(|| format!("failed to open {}", args.output.display()))?;
    let mut cache = UrlCacheService::from_config(config, sink)?;

    let summary = CommandHandler::new().run(BufReader::new(input), &mut cache)?;

    let filter = cache.filter();
    info!(
        lines = summary.lines,
        added = summary.added,
        checked = summary.checked,
        positives = summary.positives,
        skipped = summary.ignored + summary.malformed,
        "Processed command file"
    );
    let metrics = cache.metrics();
    info!(
        avg_insert = ?metrics.inserts().mean(),
        avg_lookup = ?metrics.lookups().mean(),
        observed_positive_rate = metrics.observed_positive_rate(),
        "Operation timings"
    );
    info!(
        bits_set = filter.bits_set(),
        estimated_elements = filter.estimated_elements(),
        false_positive_rate = filter.false_positive_rate(),
        "Filter state"
    );

    Ok(summary)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    let config = load_config(
        args.config.as_deref(),
        |key| std::env::var(key).ok(),
        &args.overrides(),
    )?;
    info!(
        size_bits = config.size_bits,
        hash_count = config.hash_count,
        strategy = %config.hash_strategy,
        "Starting URL cache"
    );

    run(&args, &config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn args_for(dir: &std::path::Path) -> Args {
        Args::parse_from([
            "url-cache",
            "--input",
            dir.join("in.txt").to_str().unwrap(),
            "--output",
            dir.join("out.txt").to_str().unwrap(),
        ])
    }

    #[test]
    fn test_defaults_match_reference_files() {
        let args = Args::parse_from(["url-cache"]);
        assert_eq!(args.input, PathBuf::from("inputPS03.txt"));
        assert_eq!(args.output, PathBuf::from("outputPS03.txt"));
        assert!(args.size_bits.is_none());
        assert!(args.strategy.is_none());
    }

    #[test]
    fn test_strategy_flag_parses() {
        let args = Args::parse_from(["url-cache", "--strategy", "double-hashing"]);
        assert_eq!(args.strategy, Some(HashStrategy::DoubleHashing));
        assert!(Args::try_parse_from(["url-cache", "--strategy", "cuckoo"]).is_err());
    }

    #[test]
    fn test_run_writes_trace() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("in.txt"),
            "ADD https://example1.com/page1\nCONTAINS https://example1.com/page1\nCONTAINS https://totally-unseen-url.test\n",
        )
        .unwrap();

        let summary = run(&args_for(dir.path()), &FilterConfig::default()).unwrap();

        assert_eq!(summary.positives, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("out.txt")).unwrap(),
            "Added: https://example1.com/page1\n\
             URL Existence Check for https://example1.com/page1: True\n\
             URL Existence Check for https://totally-unseen-url.test: False\n"
        );
    }

    #[test]
    fn test_missing_input_is_fatal_before_output_is_created() {
        let dir = tempfile::tempdir().unwrap();

        let err = run(&args_for(dir.path()), &FilterConfig::default()).unwrap_err();

        assert!(err.to_string().contains("does not exist"));
        assert!(!dir.path().join("out.txt").exists());
    }
}

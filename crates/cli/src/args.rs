use clap::{Args, ValueEnum};
use gametraits_codec::{CodecStrategy, Trait};
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

#[derive(Args, Debug)]
pub struct BenchArgs {
    /// JSON file with benchmark settings (flags below override it)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Timed encode/decode rounds per strategy
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,

    /// Untimed rounds run before timing starts
    #[arg(long)]
    pub warmup: Option<usize>,

    /// Strategy to measure (repeatable; default: all)
    #[arg(short, long)]
    pub strategy: Vec<CodecStrategy>,

    /// Traits set on the measured sample, comma separated
    /// (default: p_linux,p_windows,p_osx,has_demo,can_be_bought)
    #[arg(long, value_delimiter = ',')]
    pub sample: Option<Vec<Trait>>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Write results to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

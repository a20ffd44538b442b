mod args;
mod commands;
mod config;
pub mod defaults;
mod printing;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gametraits_codec::{CodecStrategy, Trait};
use tracing_subscriber::EnvFilter;

use args::{BenchArgs, OutputFormat};
use commands::{bench, codec, verify};

/// gametraits: encode game trait flags as compact JSON tag arrays
///
/// Converts between trait flags and arrays such as `["p_windows","has_demo"]`
/// with any of the available strategies, and measures how they compare.
#[derive(Parser, Debug)]
#[command(name = "gametraits")]
#[command(author, version, about = "Encodes game trait flags as JSON tag arrays and benchmarks the strategies", long_about = None)]
struct Cli {
    /// Number of threads used by `verify`
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a set of traits as a JSON array.
    Encode {
        /// Tags of the traits to set (e.g. p_windows has_demo)
        traits: Vec<Trait>,

        /// Encoding strategy
        #[arg(short, long, default_value = defaults::STRATEGY)]
        strategy: CodecStrategy,
    },

    /// Decode a JSON array of tags and show which traits are set.
    Decode {
        /// JSON array to decode, or `-` to read stdin
        input: String,

        /// Decoding strategy (handrolled and unrolled are permissive)
        #[arg(short, long, default_value = defaults::STRATEGY)]
        strategy: CodecStrategy,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// List the available strategies and their decode policy.
    Strategies,

    /// Benchmark encode/decode round trips per strategy.
    Bench(Box<BenchArgs>),

    /// Check strategies against every subset of traits.
    ///
    /// Exits with an error if any strategy fails.
    Verify {
        /// Strategy to check (repeatable; default: all)
        #[arg(short, long)]
        strategy: Vec<CodecStrategy>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        defaults::VERBOSE_LOG_FILTER
    } else {
        defaults::LOG_FILTER
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    match cli.command {
        Commands::Encode { traits, strategy } => {
            codec::encode_traits(&traits, strategy)?;
        }
        Commands::Decode {
            input,
            strategy,
            format,
        } => {
            codec::decode_traits(&input, strategy, format)?;
        }
        Commands::Strategies => {
            printing::print_strategies();
        }
        Commands::Bench(args) => {
            bench::run_bench(&args)?;
        }
        Commands::Verify { strategy, format } => {
            verify::verify_strategies(&strategy, format)?;
        }
    }

    Ok(())
}

//! Shared default values for benchmark configuration.
//! Used both as clap defaults and as the fallback when no config file is given.

pub const STRATEGY: &str = "cached";

pub const ITERATIONS: usize = 100_000;
pub const WARMUP: usize = 1_000;

/// Filter applied when `RUST_LOG` is unset.
pub const LOG_FILTER: &str = "warn";
pub const VERBOSE_LOG_FILTER: &str = "debug";

/// Failures listed per strategy by `verify` before eliding the rest.
pub const MAX_LISTED_FAILURES: usize = 5;

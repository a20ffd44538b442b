use anyhow::{Context, Result};
use gametraits_codec::harness::{canonical_sample, RunConfig};
use gametraits_codec::{CodecStrategy, Trait, TraitSet};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::args::BenchArgs;
use crate::defaults;

/// Benchmark settings, loadable from a JSON file.
///
/// Missing fields take their defaults; unknown fields and unknown trait tags
/// are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    pub iterations: usize,
    pub warmup: usize,
    pub strategies: Vec<CodecStrategy>,
    pub sample: Vec<Trait>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::ITERATIONS,
            warmup: defaults::WARMUP,
            strategies: CodecStrategy::ALL.to_vec(),
            sample: canonical_sample().iter().collect(),
        }
    }
}

impl BenchConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded benchmark config");
        Ok(config)
    }

    /// Start from the config file if one was given, then apply flag overrides.
    pub fn from_args(args: &BenchArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(args);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, args: &BenchArgs) {
        if let Some(iterations) = args.iterations {
            self.iterations = iterations;
        }
        if let Some(warmup) = args.warmup {
            self.warmup = warmup;
        }
        if !args.strategy.is_empty() {
            self.strategies = args.strategy.clone();
        }
        if let Some(sample) = &args.sample {
            self.sample = sample.clone();
        }
    }

    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            iterations: self.iterations,
            warmup: self.warmup,
        }
    }

    pub fn sample_set(&self) -> TraitSet {
        TraitSet::from_traits(self.sample.iter().copied())
    }
}

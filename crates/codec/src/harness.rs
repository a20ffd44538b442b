//! Timed encode/decode loops for comparing strategies.
//!
//! Each round encodes a sample set, decodes the bytes into a fresh set and
//! checks that exactly the sample's traits came back. A run is a number of
//! untimed warmup rounds followed by the timed ones.

use std::hint::black_box;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, MismatchKind};
use crate::trait_set::{Trait, TraitSet};
use crate::traits::DecodePolicy;
use crate::CodecStrategy;

/// Loop sizes for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub iterations: usize,
    pub warmup: usize,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.iterations == 0 {
            return Err(CodecError::Config("iterations must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: 100_000,
            warmup: 1_000,
        }
    }
}

/// Result of one timed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub strategy: CodecStrategy,
    pub policy: DecodePolicy,
    pub iterations: usize,
    pub total_ns: u64,
    pub ns_per_op: f64,
    /// Size of the encoded sample in bytes.
    pub encoded_len: usize,
}

/// `{p_linux, p_windows, p_osx, has_demo, can_be_bought}`: the set every
/// strategy is measured on by default.
pub fn canonical_sample() -> TraitSet {
    TraitSet::from_traits([
        Trait::PlatformLinux,
        Trait::PlatformWindows,
        Trait::PlatformOsx,
        Trait::HasDemo,
        Trait::CanBeBought,
    ])
}

/// Compare a decoded set against the one that was encoded.
///
/// Missing traits are reported before extra ones.
pub fn verify_round_trip(expected: &TraitSet, actual: &TraitSet) -> Result<(), CodecError> {
    let missing: Vec<&str> = expected
        .iter()
        .filter(|t| !actual.contains(*t))
        .map(Trait::tag)
        .collect();
    if !missing.is_empty() {
        return Err(CodecError::Mismatch {
            kind: MismatchKind::Missing,
            traits: missing.join(","),
        });
    }
    let extra: Vec<&str> = actual
        .iter()
        .filter(|t| !expected.contains(*t))
        .map(Trait::tag)
        .collect();
    if !extra.is_empty() {
        return Err(CodecError::Mismatch {
            kind: MismatchKind::Extra,
            traits: extra.join(","),
        });
    }
    Ok(())
}

/// One encode + decode + verify round. Returns the encoded length.
pub fn round_trip(strategy: CodecStrategy, sample: &TraitSet) -> Result<usize, CodecError> {
    let data = strategy.encode(black_box(sample))?;
    let decoded = strategy.decode(black_box(&data))?;
    verify_round_trip(sample, &decoded)?;
    Ok(data.len())
}

pub fn run(
    strategy: CodecStrategy,
    sample: &TraitSet,
    config: &RunConfig,
) -> Result<RunReport, CodecError> {
    config.validate()?;

    for _ in 0..config.warmup {
        round_trip(strategy, sample)?;
    }

    let mut encoded_len = 0;
    let start = Instant::now();
    for _ in 0..config.iterations {
        encoded_len = round_trip(strategy, sample)?;
    }
    let elapsed = start.elapsed();

    let total_ns = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
    let ns_per_op = total_ns as f64 / config.iterations as f64;
    tracing::debug!(
        %strategy,
        iterations = config.iterations,
        ns_per_op,
        "benchmark run finished"
    );

    Ok(RunReport {
        strategy,
        policy: strategy.policy(),
        iterations: config.iterations,
        total_ns,
        ns_per_op,
        encoded_len,
    })
}

/// Run each strategy in turn. Strategies never run concurrently so their
/// timings do not interfere.
pub fn run_all(
    strategies: &[CodecStrategy],
    sample: &TraitSet,
    config: &RunConfig,
) -> Result<Vec<RunReport>, CodecError> {
    strategies
        .iter()
        .map(|&strategy| run(strategy, sample, config))
        .collect()
}

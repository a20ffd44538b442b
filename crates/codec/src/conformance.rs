//! Exhaustive behavioural checks over every subset of traits.
//!
//! With seven traits there are only 128 subsets, so each strategy is checked
//! against all of them rather than a sample.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::harness::verify_round_trip;
use crate::trait_set::{Trait, TraitSet};
use crate::CodecStrategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Check {
    /// Encoding is a well-formed array naming each set trait exactly once.
    WellFormed,
    /// Decoding the encoding gives back the same set.
    RoundTrip,
    /// Decoding the same bytes twice into one set equals decoding once.
    Idempotence,
    /// Decoding into a populated set adds flags and never clears them.
    Merge,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Failure {
    pub check: Check,
    pub subset: TraitSet,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    pub strategy: CodecStrategy,
    /// Number of subsets checked.
    pub checked: usize,
    pub failures: Vec<Failure>,
}

impl ConformanceReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Every subset of [`Trait::ALL`], starting from the empty set.
pub fn all_subsets() -> impl Iterator<Item = TraitSet> {
    (0..1u32 << Trait::COUNT).map(TraitSet::from_bits)
}

fn fail(check: Check, subset: TraitSet, detail: impl Into<String>) -> Failure {
    Failure {
        check,
        subset,
        detail: detail.into(),
    }
}

/// Run every check for one subset, returning the ones that failed.
pub fn check_subset(strategy: CodecStrategy, subset: TraitSet) -> Vec<Failure> {
    let mut failures = Vec::new();

    let encoded = match strategy.encode(&subset) {
        Ok(data) => data,
        Err(e) => {
            failures.push(fail(Check::RoundTrip, subset, e.to_string()));
            return failures;
        }
    };

    match serde_json::from_slice::<Vec<String>>(&encoded) {
        Ok(mut tags) => {
            tags.sort();
            let mut expected: Vec<String> = subset.iter().map(|t| t.tag().to_string()).collect();
            expected.sort();
            if tags != expected {
                failures.push(fail(
                    Check::WellFormed,
                    subset,
                    format!("encoded tags {tags:?}, expected {expected:?}"),
                ));
            }
        }
        Err(e) => failures.push(fail(Check::WellFormed, subset, e.to_string())),
    }

    match strategy.decode(&encoded) {
        Ok(decoded) => {
            if let Err(e) = verify_round_trip(&subset, &decoded) {
                failures.push(fail(Check::RoundTrip, subset, e.to_string()));
            }
        }
        Err(e) => failures.push(fail(Check::RoundTrip, subset, e.to_string())),
    }

    let mut twice = TraitSet::new();
    let idempotent = strategy
        .decode_into(&encoded, &mut twice)
        .and_then(|()| strategy.decode_into(&encoded, &mut twice));
    match idempotent {
        Ok(()) if twice == subset => {}
        Ok(()) => failures.push(fail(
            Check::Idempotence,
            subset,
            format!("decoding twice gave {twice}"),
        )),
        Err(e) => failures.push(fail(Check::Idempotence, subset, e.to_string())),
    }

    // Start from the complement: the merged result must be the full set.
    let mut merged = TraitSet::from_bits(!subset.bits());
    match strategy.decode_into(&encoded, &mut merged) {
        Ok(()) if merged == TraitSet::full() => {}
        Ok(()) => failures.push(fail(
            Check::Merge,
            subset,
            format!("merging into the complement gave {merged}"),
        )),
        Err(e) => failures.push(fail(Check::Merge, subset, e.to_string())),
    }

    failures
}

/// Check one strategy against all subsets, spreading subsets over the rayon pool.
pub fn check(strategy: CodecStrategy) -> ConformanceReport {
    let subsets: Vec<TraitSet> = all_subsets().collect();
    let failures: Vec<Failure> = subsets
        .par_iter()
        .flat_map_iter(|&subset| check_subset(strategy, subset))
        .collect();

    if failures.is_empty() {
        tracing::debug!(%strategy, checked = subsets.len(), "conformance passed");
    } else {
        tracing::warn!(%strategy, failures = failures.len(), "conformance failed");
    }

    ConformanceReport {
        strategy,
        checked: subsets.len(),
        failures,
    }
}

pub fn check_all(strategies: &[CodecStrategy]) -> Vec<ConformanceReport> {
    strategies.par_iter().map(|&s| check(s)).collect()
}

//! Trait-flag JSON codecs.
//!
//! A game's boolean traits travel as a JSON array holding the tag of every
//! flag that is set, e.g. `["p_windows","p_linux","has_demo"]`. This crate
//! provides several interchangeable strategies for producing and consuming
//! that array, plus the harness and conformance checks used to compare them.

mod error;
mod strategies;
mod table;
mod trait_set;
mod traits;
mod utils;

pub mod conformance;
pub mod harness;

pub use error::CodecError as Error;
pub use error::{CodecError, MismatchKind};
pub use strategies::{CachedTable, FieldWalk, HandRolled, MapSimplest, Unrolled};
pub use table::{table, TagTable};
pub use trait_set::{Trait, TraitSet};
pub use traits::{Codec, DecodePolicy};

use serde::{Deserialize, Serialize};

/// Strategies for encoding trait sets.
///
/// `Map`, `Walk` and `Cached` are strict; `HandRolled` and `Unrolled` are
/// permissive fast modes that must be picked explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodecStrategy {
    /// Per-call hash map + serde_json.
    Map,
    /// Per-call walk over every trait + serde_json.
    Walk,
    /// Shared tag table + serde_json.
    Cached,
    /// Shared tag table + hand-rolled writer/scanner.
    #[serde(rename = "handrolled")]
    HandRolled,
    /// One literal branch per trait + hand-rolled writer/scanner.
    Unrolled,
}

impl CodecStrategy {
    pub const ALL: [CodecStrategy; 5] = [
        Self::Map,
        Self::Walk,
        Self::Cached,
        Self::HandRolled,
        Self::Unrolled,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Map => "map",
            Self::Walk => "walk",
            Self::Cached => "cached",
            Self::HandRolled => "handrolled",
            Self::Unrolled => "unrolled",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Map => "per-call hash map + serde_json",
            Self::Walk => "per-call walk over every trait + serde_json",
            Self::Cached => "shared tag table + serde_json",
            Self::HandRolled => "shared tag table + hand-rolled writer/scanner",
            Self::Unrolled => "one branch per tag + hand-rolled writer/scanner",
        }
    }

    pub fn policy(&self) -> DecodePolicy {
        match self {
            Self::Map => MapSimplest.policy(),
            Self::Walk => FieldWalk.policy(),
            Self::Cached => CachedTable.policy(),
            Self::HandRolled => HandRolled.policy(),
            Self::Unrolled => Unrolled.policy(),
        }
    }

    /// Encode using the selected strategy.
    pub fn encode(&self, traits: &TraitSet) -> Result<Vec<u8>, CodecError> {
        match self {
            Self::Map => MapSimplest.encode(traits),
            Self::Walk => FieldWalk.encode(traits),
            Self::Cached => CachedTable.encode(traits),
            Self::HandRolled => HandRolled.encode(traits),
            Self::Unrolled => Unrolled.encode(traits),
        }
    }

    /// Decode into `traits` using the selected strategy, merging with what is
    /// already set.
    pub fn decode_into(&self, data: &[u8], traits: &mut TraitSet) -> Result<(), CodecError> {
        match self {
            Self::Map => MapSimplest.decode_into(data, traits),
            Self::Walk => FieldWalk.decode_into(data, traits),
            Self::Cached => CachedTable.decode_into(data, traits),
            Self::HandRolled => HandRolled.decode_into(data, traits),
            Self::Unrolled => Unrolled.decode_into(data, traits),
        }
    }

    /// Decode into a fresh set using the selected strategy.
    pub fn decode(&self, data: &[u8]) -> Result<TraitSet, CodecError> {
        let mut traits = TraitSet::new();
        self.decode_into(data, &mut traits)?;
        Ok(traits)
    }
}

impl Default for CodecStrategy {
    fn default() -> Self {
        Self::Cached
    }
}

impl std::fmt::Display for CodecStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for CodecStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "map" => Ok(Self::Map),
            "walk" => Ok(Self::Walk),
            "cached" => Ok(Self::Cached),
            "handrolled" | "hand-rolled" => Ok(Self::HandRolled),
            "unrolled" => Ok(Self::Unrolled),
            _ => Err(format!(
                "Unknown codec strategy: {s}. Available: map, walk, cached, handrolled, unrolled"
            )),
        }
    }
}

impl Codec for CodecStrategy {
    fn policy(&self) -> DecodePolicy {
        CodecStrategy::policy(self)
    }

    fn encode(&self, traits: &TraitSet) -> Result<Vec<u8>, CodecError> {
        CodecStrategy::encode(self, traits)
    }

    fn decode_into(&self, data: &[u8], traits: &mut TraitSet) -> Result<(), CodecError> {
        CodecStrategy::decode_into(self, data, traits)
    }
}

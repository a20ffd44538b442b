use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::trait_set::TraitSet;

/// How a decoder treats input that is not a well-formed JSON array of strings.
///
/// Unknown tags are ignored under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Input is fully parsed as JSON; anything else fails with
    /// [`CodecError::MalformedInput`] and leaves the target untouched.
    Strict,
    /// Input is trusted. Bytes outside strings are skipped without being
    /// interpreted and a missing closing `]` is accepted. An unterminated
    /// string still fails, possibly after earlier tags were applied.
    Permissive,
}

impl fmt::Display for DecodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Permissive => write!(f, "permissive"),
        }
    }
}

/// Core trait for trait-set codecs.
///
/// Every strategy produces the same wire format: a JSON array with the tag of
/// each set flag. Decoding merges into the target: flags not named in the
/// input keep whatever value they had.
pub trait Codec {
    fn policy(&self) -> DecodePolicy;

    fn encode(&self, traits: &TraitSet) -> Result<Vec<u8>, CodecError>;

    fn decode_into(&self, data: &[u8], traits: &mut TraitSet) -> Result<(), CodecError>;

    /// Decode into a fresh, all-false set.
    fn decode(&self, data: &[u8]) -> Result<TraitSet, CodecError> {
        let mut traits = TraitSet::new();
        self.decode_into(data, &mut traits)?;
        Ok(traits)
    }
}

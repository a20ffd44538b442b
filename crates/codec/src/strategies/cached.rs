use serde::de::DeserializeSeed;

use crate::error::CodecError;
use crate::table::table;
use crate::trait_set::{MergeTags, TraitSet};
use crate::traits::{Codec, DecodePolicy};

/// Strategy: shared tag <-> index table + serde_json.
///
/// The default strategy. Tags are resolved through the table built once per
/// process, and the JSON is still produced and checked by serde_json.
/// Decoding goes through a scratch copy so a failed decode leaves the target
/// unchanged.
pub struct CachedTable;

impl Codec for CachedTable {
    fn policy(&self) -> DecodePolicy {
        DecodePolicy::Strict
    }

    fn encode(&self, traits: &TraitSet) -> Result<Vec<u8>, CodecError> {
        let tags: Vec<&str> = table()
            .tags()
            .iter()
            .zip(traits.flags())
            .filter_map(|(tag, &on)| on.then_some(*tag))
            .collect();
        serde_json::to_vec(&tags).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode_into(&self, data: &[u8], traits: &mut TraitSet) -> Result<(), CodecError> {
        let mut scratch = *traits;
        let mut de = serde_json::Deserializer::from_slice(data);
        MergeTags(&mut scratch)
            .deserialize(&mut de)
            .map_err(CodecError::malformed)?;
        de.end().map_err(CodecError::malformed)?;
        *traits = scratch;
        Ok(())
    }
}

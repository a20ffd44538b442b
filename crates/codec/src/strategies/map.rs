use std::collections::HashMap;

use crate::error::CodecError;
use crate::trait_set::{Trait, TraitSet};
use crate::traits::{Codec, DecodePolicy};
use crate::utils::parse_tag_array;

/// Strategy: tag-keyed hash map built on every call + serde_json.
///
/// The slowest baseline. Each encode copies the flags into a
/// `HashMap<&str, bool>` and serializes the keys that are true, so output
/// order follows the map's iteration order and is not stable between calls.
pub struct MapSimplest;

impl Codec for MapSimplest {
    fn policy(&self) -> DecodePolicy {
        DecodePolicy::Strict
    }

    fn encode(&self, traits: &TraitSet) -> Result<Vec<u8>, CodecError> {
        let map: HashMap<&'static str, bool> =
            Trait::ALL.iter().map(|t| (t.tag(), traits.get(*t))).collect();
        let tags: Vec<&str> = map
            .into_iter()
            .filter_map(|(tag, on)| on.then_some(tag))
            .collect();
        serde_json::to_vec(&tags).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode_into(&self, data: &[u8], traits: &mut TraitSet) -> Result<(), CodecError> {
        let mut map: HashMap<String, bool> = HashMap::new();
        for tag in parse_tag_array(data)? {
            map.insert(tag, true);
        }
        for t in Trait::ALL {
            if map.get(t.tag()).copied().unwrap_or(false) {
                traits.insert(t);
            }
        }
        Ok(())
    }
}

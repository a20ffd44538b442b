use crate::error::CodecError;
use crate::trait_set::{Trait, TraitSet};
use crate::traits::{Codec, DecodePolicy};
use crate::utils::parse_tag_array;

/// Strategy: walk every trait on each call + serde_json.
///
/// Nothing is precomputed. Encoding visits each trait and asks for its tag;
/// decoding compares every incoming tag against every trait's tag in turn.
pub struct FieldWalk;

impl Codec for FieldWalk {
    fn policy(&self) -> DecodePolicy {
        DecodePolicy::Strict
    }

    fn encode(&self, traits: &TraitSet) -> Result<Vec<u8>, CodecError> {
        let mut tags = Vec::new();
        for t in Trait::ALL {
            if traits.get(t) {
                tags.push(t.tag());
            }
        }
        serde_json::to_vec(&tags).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode_into(&self, data: &[u8], traits: &mut TraitSet) -> Result<(), CodecError> {
        for tag in parse_tag_array(data)? {
            for t in Trait::ALL {
                if t.tag() == tag {
                    traits.insert(t);
                }
            }
        }
        Ok(())
    }
}

use crate::error::CodecError;
use crate::table::table;
use crate::trait_set::TraitSet;
use crate::traits::{Codec, DecodePolicy};
use crate::utils::{scan_tags, write_tag_array};

/// Strategy: shared tag <-> index table + hand-rolled byte writer and scanner.
///
/// The fast path. No JSON library is involved: the writer emits tags in
/// declaration order and the scanner only looks at quotes and the closing
/// bracket, so it trusts its input (see [`DecodePolicy::Permissive`]).
pub struct HandRolled;

impl Codec for HandRolled {
    fn policy(&self) -> DecodePolicy {
        DecodePolicy::Permissive
    }

    fn encode(&self, traits: &TraitSet) -> Result<Vec<u8>, CodecError> {
        let tags = table().tags();
        Ok(write_tag_array(
            traits
                .flags()
                .iter()
                .enumerate()
                .filter_map(|(i, &on)| on.then_some(tags[i])),
        ))
    }

    fn decode_into(&self, data: &[u8], traits: &mut TraitSet) -> Result<(), CodecError> {
        let table = table();
        let flags = traits.flags_mut();
        scan_tags(data, |tag| {
            if let Some(idx) = table.index_of_bytes(tag) {
                flags[idx] = true;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trait_set::Trait;

    #[test]
    fn test_encode_empty() {
        assert_eq!(HandRolled.encode(&TraitSet::new()).unwrap(), b"[]");
    }

    #[test]
    fn test_encode_full() {
        assert_eq!(
            HandRolled.encode(&TraitSet::full()).unwrap(),
            br#"["p_windows","p_linux","p_osx","p_android","can_be_bought","has_demo","in_press_system"]"#
        );
    }

    #[test]
    fn test_decode_ignores_unknown() {
        assert!(HandRolled.decode(br#"["not_a_real_tag"]"#).unwrap().is_empty());
    }

    #[test]
    fn test_decode_without_closing_bracket() {
        let decoded = HandRolled.decode(br#"["p_linux","has_demo""#).unwrap();
        assert_eq!(
            decoded,
            TraitSet::from_traits([Trait::PlatformLinux, Trait::HasDemo])
        );
    }

    #[test]
    fn test_decode_unterminated_string_keeps_earlier_tags() {
        let mut set = TraitSet::new();
        let err = HandRolled
            .decode_into(br#"["p_linux","has_de"#, &mut set)
            .unwrap_err();
        assert!(matches!(err, CodecError::MalformedInput(_)));
        assert_eq!(set, TraitSet::from_traits([Trait::PlatformLinux]));
    }

    #[test]
    fn test_decode_does_not_unescape() {
        // An escaped tag is never a known tag, so it is dropped.
        assert!(HandRolled.decode(br#"["p\u005fosx"]"#).unwrap().is_empty());
    }
}

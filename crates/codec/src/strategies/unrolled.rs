use crate::error::CodecError;
use crate::trait_set::{Trait, TraitSet};
use crate::traits::{Codec, DecodePolicy};
use crate::utils::scan_tags;

/// Strategy: one branch per trait, no table at all.
///
/// Every tag is spelled out as a literal. Encoding uses a fixed order that
/// differs from declaration order:
/// `p_android, p_windows, p_linux, p_osx, has_demo, can_be_bought, in_press_system`.
/// Decoding matches the raw tag bytes directly and shares the permissive
/// scanner with [`HandRolled`](super::HandRolled).
pub struct Unrolled;

#[inline(always)]
fn push_quoted(out: &mut Vec<u8>, first: &mut bool, quoted: &[u8]) {
    if *first {
        *first = false;
    } else {
        out.push(b',');
    }
    out.extend_from_slice(quoted);
}

impl Codec for Unrolled {
    fn policy(&self) -> DecodePolicy {
        DecodePolicy::Permissive
    }

    fn encode(&self, traits: &TraitSet) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(96);
        let mut first = true;
        out.push(b'[');
        if traits.get(Trait::PlatformAndroid) {
            push_quoted(&mut out, &mut first, b"\"p_android\"");
        }
        if traits.get(Trait::PlatformWindows) {
            push_quoted(&mut out, &mut first, b"\"p_windows\"");
        }
        if traits.get(Trait::PlatformLinux) {
            push_quoted(&mut out, &mut first, b"\"p_linux\"");
        }
        if traits.get(Trait::PlatformOsx) {
            push_quoted(&mut out, &mut first, b"\"p_osx\"");
        }
        if traits.get(Trait::HasDemo) {
            push_quoted(&mut out, &mut first, b"\"has_demo\"");
        }
        if traits.get(Trait::CanBeBought) {
            push_quoted(&mut out, &mut first, b"\"can_be_bought\"");
        }
        if traits.get(Trait::InPressSystem) {
            push_quoted(&mut out, &mut first, b"\"in_press_system\"");
        }
        out.push(b']');
        Ok(out)
    }

    fn decode_into(&self, data: &[u8], traits: &mut TraitSet) -> Result<(), CodecError> {
        scan_tags(data, |tag| match tag {
            b"p_windows" => traits.insert(Trait::PlatformWindows),
            b"p_linux" => traits.insert(Trait::PlatformLinux),
            b"p_osx" => traits.insert(Trait::PlatformOsx),
            b"p_android" => traits.insert(Trait::PlatformAndroid),
            b"has_demo" => traits.insert(Trait::HasDemo),
            b"can_be_bought" => traits.insert(Trait::CanBeBought),
            b"in_press_system" => traits.insert(Trait::InPressSystem),
            _ => {}
        })
    }
}

use core::fmt;
use std::str::FromStr;

use serde::de::{self, DeserializeSeed, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CodecError;
use crate::table::table;

/// A named boolean attribute of a game.
///
/// The discriminant doubles as the flag's slot in a [`TraitSet`]; it is stable
/// and matches the order of [`Trait::ALL`]. Each variant serializes as its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Trait {
    #[serde(rename = "p_windows")]
    PlatformWindows = 0,
    #[serde(rename = "p_linux")]
    PlatformLinux = 1,
    #[serde(rename = "p_osx")]
    PlatformOsx = 2,
    #[serde(rename = "p_android")]
    PlatformAndroid = 3,
    #[serde(rename = "can_be_bought")]
    CanBeBought = 4,
    #[serde(rename = "has_demo")]
    HasDemo = 5,
    #[serde(rename = "in_press_system")]
    InPressSystem = 6,
}

impl Trait {
    pub const COUNT: usize = 7;

    pub const ALL: [Trait; Self::COUNT] = [
        Self::PlatformWindows,
        Self::PlatformLinux,
        Self::PlatformOsx,
        Self::PlatformAndroid,
        Self::CanBeBought,
        Self::HasDemo,
        Self::InPressSystem,
    ];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(Self::PlatformWindows),
            1 => Some(Self::PlatformLinux),
            2 => Some(Self::PlatformOsx),
            3 => Some(Self::PlatformAndroid),
            4 => Some(Self::CanBeBought),
            5 => Some(Self::HasDemo),
            6 => Some(Self::InPressSystem),
            _ => None,
        }
    }

    /// External JSON representation of this trait.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::PlatformWindows => "p_windows",
            Self::PlatformLinux => "p_linux",
            Self::PlatformOsx => "p_osx",
            Self::PlatformAndroid => "p_android",
            Self::CanBeBought => "can_be_bought",
            Self::HasDemo => "has_demo",
            Self::InPressSystem => "in_press_system",
        }
    }

    /// Look up a trait by tag through the shared table.
    #[inline]
    pub fn from_tag(tag: &str) -> Option<Self> {
        table().index_of(tag).and_then(Self::from_index)
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Trait {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| CodecError::UnknownTag(s.to_string()))
    }
}

/// The full set of trait flags for one game, all false by default.
///
/// Serializes as a JSON array holding the tag of every set flag, in
/// declaration order. Deserializing is strict about JSON shape and ignores
/// tags it does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TraitSet {
    flags: [bool; Trait::COUNT],
}

impl TraitSet {
    pub const fn new() -> Self {
        Self {
            flags: [false; Trait::COUNT],
        }
    }

    /// Every trait set.
    pub const fn full() -> Self {
        Self {
            flags: [true; Trait::COUNT],
        }
    }

    pub fn from_traits<I: IntoIterator<Item = Trait>>(traits: I) -> Self {
        traits.into_iter().collect()
    }

    /// Build a set from a bitmask where bit `i` is the flag of `Trait::ALL[i]`.
    /// Bits above `Trait::COUNT` are ignored.
    pub fn from_bits(bits: u32) -> Self {
        let mut set = Self::new();
        for (i, flag) in set.flags.iter_mut().enumerate() {
            *flag = bits & (1 << i) != 0;
        }
        set
    }

    pub fn bits(&self) -> u32 {
        self.iter().fold(0, |acc, t| acc | (1 << t.index()))
    }

    #[inline]
    pub fn get(&self, t: Trait) -> bool {
        self.flags[t.index()]
    }

    #[inline]
    pub fn contains(&self, t: Trait) -> bool {
        self.get(t)
    }

    #[inline]
    pub fn set(&mut self, t: Trait, value: bool) {
        self.flags[t.index()] = value;
    }

    #[inline]
    pub fn insert(&mut self, t: Trait) {
        self.set(t, true);
    }

    #[inline]
    pub fn remove(&mut self, t: Trait) {
        self.set(t, false);
    }

    /// Set every flag that is set in `other`. Never clears a flag.
    pub fn merge(&mut self, other: &TraitSet) {
        for (mine, theirs) in self.flags.iter_mut().zip(other.flags) {
            *mine |= theirs;
        }
    }

    /// Set traits, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Trait> + '_ {
        Trait::ALL.into_iter().filter(|t| self.get(*t))
    }

    pub fn len(&self) -> usize {
        self.flags.iter().filter(|on| **on).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.flags.iter().any(|on| *on)
    }

    /// Raw flag slots, indexed by [`Trait::index`].
    #[inline]
    pub(crate) fn flags(&self) -> &[bool; Trait::COUNT] {
        &self.flags
    }

    #[inline]
    pub(crate) fn flags_mut(&mut self) -> &mut [bool; Trait::COUNT] {
        &mut self.flags
    }
}

impl FromIterator<Trait> for TraitSet {
    fn from_iter<I: IntoIterator<Item = Trait>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<Trait> for TraitSet {
    fn extend<I: IntoIterator<Item = Trait>>(&mut self, iter: I) {
        for t in iter {
            self.insert(t);
        }
    }
}

impl fmt::Display for TraitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, t) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(t.tag())?;
        }
        f.write_str("}")
    }
}

impl Serialize for TraitSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tags = table().tags();
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for (i, &on) in self.flags.iter().enumerate() {
            if on {
                seq.serialize_element(tags[i])?;
            }
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for TraitSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut set = TraitSet::new();
        MergeTags(&mut set).deserialize(deserializer)?;
        Ok(set)
    }
}

/// Deserializes a JSON array of tags into an existing set, setting the flag
/// of every known tag and leaving the others untouched.
pub(crate) struct MergeTags<'a>(pub &'a mut TraitSet);

impl<'de> DeserializeSeed<'de> for MergeTags<'_> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_seq(self)
    }
}

impl<'de> Visitor<'de> for MergeTags<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of trait tags")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<(), A::Error> {
        while seq.next_element_seed(SetTag(&mut *self.0))?.is_some() {}
        Ok(())
    }
}

struct SetTag<'a>(&'a mut TraitSet);

impl<'de> DeserializeSeed<'de> for SetTag<'_> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_str(self)
    }
}

impl<'de> Visitor<'de> for SetTag<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a trait tag string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<(), E> {
        if let Some(idx) = table().index_of(v) {
            self.0.flags[idx] = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, t) in Trait::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
            assert_eq!(Trait::from_index(i), Some(*t));
        }
        assert_eq!(Trait::from_index(Trait::COUNT), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("p_osx".parse::<Trait>().unwrap(), Trait::PlatformOsx);
        assert_eq!(
            "in_press_system".parse::<Trait>().unwrap(),
            Trait::InPressSystem
        );
        let err = "p_beos".parse::<Trait>().unwrap_err();
        assert!(matches!(err, CodecError::UnknownTag(ref t) if t == "p_beos"));
    }

    #[test]
    fn test_trait_serde_uses_tag() {
        assert_eq!(
            serde_json::to_string(&Trait::CanBeBought).unwrap(),
            "\"can_be_bought\""
        );
        let t: Trait = serde_json::from_str("\"p_android\"").unwrap();
        assert_eq!(t, Trait::PlatformAndroid);
    }

    #[test]
    fn test_default_is_empty() {
        let set = TraitSet::default();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set, TraitSet::new());
        assert!(Trait::ALL.iter().all(|t| !set.get(*t)));
    }

    #[test]
    fn test_set_and_remove() {
        let mut set = TraitSet::new();
        set.insert(Trait::HasDemo);
        set.set(Trait::PlatformLinux, true);
        assert!(set.contains(Trait::HasDemo));
        assert_eq!(set.len(), 2);
        set.remove(Trait::HasDemo);
        assert!(!set.contains(Trait::HasDemo));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Trait::PlatformLinux]);
    }

    #[test]
    fn test_bits() {
        let set = TraitSet::from_traits([Trait::PlatformWindows, Trait::InPressSystem]);
        assert_eq!(set.bits(), 0b100_0001);
        assert_eq!(TraitSet::from_bits(0b100_0001), set);
        assert_eq!(TraitSet::from_bits(u32::MAX), TraitSet::full());
    }

    #[test]
    fn test_merge_never_clears() {
        let mut a = TraitSet::from_traits([Trait::PlatformWindows]);
        let b = TraitSet::from_traits([Trait::HasDemo]);
        a.merge(&b);
        assert_eq!(
            a,
            TraitSet::from_traits([Trait::PlatformWindows, Trait::HasDemo])
        );
        a.merge(&TraitSet::new());
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_iter_declaration_order() {
        let set = TraitSet::from_traits([Trait::InPressSystem, Trait::PlatformWindows, Trait::HasDemo]);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Trait::PlatformWindows, Trait::HasDemo, Trait::InPressSystem]
        );
        assert_eq!(set.to_string(), "{p_windows, has_demo, in_press_system}");
    }

    #[test]
    fn test_serialize_set() {
        let set = TraitSet::from_traits([Trait::HasDemo, Trait::PlatformOsx]);
        assert_eq!(
            serde_json::to_string(&set).unwrap(),
            r#"["p_osx","has_demo"]"#
        );
        assert_eq!(serde_json::to_string(&TraitSet::new()).unwrap(), "[]");
    }

    #[test]
    fn test_deserialize_set() {
        let set: TraitSet =
            serde_json::from_str(r#" [ "p_linux" , "not_a_real_tag", "has_demo" ] "#).unwrap();
        assert_eq!(
            set,
            TraitSet::from_traits([Trait::PlatformLinux, Trait::HasDemo])
        );
    }

    #[test]
    fn test_deserialize_rejects_malformed() {
        assert!(serde_json::from_str::<TraitSet>(r#"["p_linux""#).is_err());
        assert!(serde_json::from_str::<TraitSet>(r#"["p_linux]"#).is_err());
        assert!(serde_json::from_str::<TraitSet>(r#"[1, 2]"#).is_err());
        assert!(serde_json::from_str::<TraitSet>(r#"{"p_linux": true}"#).is_err());
    }
}

//! Static tag <-> index registry.
//!
//! The table is built once on first use and shared read-only afterwards, so
//! lookups from any number of threads need no synchronization beyond the
//! one-time initialization done by [`OnceLock`].

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::trait_set::Trait;

static TABLE: OnceLock<TagTable> = OnceLock::new();

/// Ordered list of tags plus the reverse tag -> flag index map.
#[derive(Debug)]
pub struct TagTable {
    tags: [&'static str; Trait::COUNT],
    index: HashMap<&'static [u8], usize>,
}

/// The process-wide table, initializing it on first call.
pub fn table() -> &'static TagTable {
    TABLE.get_or_init(TagTable::build)
}

impl TagTable {
    fn build() -> Self {
        let tags = Trait::ALL.map(Trait::tag);
        let index = tags
            .iter()
            .enumerate()
            .map(|(i, tag)| (tag.as_bytes(), i))
            .collect::<HashMap<_, _>>();
        tracing::trace!(entries = index.len(), "built trait tag table");
        Self { tags, index }
    }

    /// Tags in declaration order; position `i` is the tag of flag `i`.
    #[inline]
    pub fn tags(&self) -> &[&'static str; Trait::COUNT] {
        &self.tags
    }

    #[inline]
    pub fn tag(&self, index: usize) -> Option<&'static str> {
        self.tags.get(index).copied()
    }

    #[inline]
    pub fn index_of(&self, tag: &str) -> Option<usize> {
        self.index_of_bytes(tag.as_bytes())
    }

    /// Resolve a raw tag slice, as cut out of an input buffer, to its flag index.
    #[inline]
    pub fn index_of_bytes(&self, tag: &[u8]) -> Option<usize> {
        self.index.get(tag).copied()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

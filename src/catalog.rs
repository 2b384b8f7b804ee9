//! Normalization and the two derived catalogs.
//!
//! A raw extraction is unordered, may repeat names, and may carry
//! `@version` suffixes. [`normalize`] reduces it to the canonical
//! sequence both catalogs are built from; because the sequence is sorted
//! and duplicate-free, the index catalog's ordinals are exactly each
//! name's lexicographic rank, and the set catalog holds the same names
//! with no values.

use std::collections::BTreeSet;
use tracing::debug;

/// Reduce a raw symbol sequence to its canonical form: version suffixes
/// stripped (everything from the first `@`), empty names dropped,
/// duplicates removed, byte-wise lexicographic order.
///
/// Deterministic: any permutation of the same raw input yields the
/// identical sequence. An empty input yields an empty sequence.
pub fn normalize<I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut names = BTreeSet::new();
    for name in raw {
        let stripped = match name.split_once('@') {
            Some((base, _version)) => base,
            None => name.as_str(),
        };
        if !stripped.is_empty() {
            names.insert(stripped.to_string());
        }
    }
    debug!("normalized to {} distinct names", names.len());
    names.into_iter().collect()
}

/// Ordered mapping from symbol name to its rank in the canonical
/// sequence.
///
/// Ordinals are positional: `0..N` in sorted order, no duplicates, no
/// gaps. They are stable across regenerations only while the library's
/// export set is unchanged; adding or removing any export shifts the
/// ranks of unrelated names. Consumers embedding these indices must
/// regenerate in lockstep with library upgrades.
pub struct IndexCatalog {
    entries: Vec<(String, usize)>,
}

impl IndexCatalog {
    /// Build from a canonical (sorted, deduplicated) sequence.
    pub fn from_names(canonical: Vec<String>) -> Self {
        let entries = canonical
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name, i))
            .collect();
        Self { entries }
    }

    /// Entries in ascending name order; entry `i` carries index `i`.
    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    /// Look up the ordinal assigned to a name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries
            .binary_search_by(|(n, _)| n.as_str().cmp(name))
            .ok()
            .map(|pos| self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Membership set over the canonical sequence; same names as the index
/// catalog, no associated values.
pub struct SetCatalog {
    names: Vec<String>,
}

impl SetCatalog {
    /// Build from a canonical (sorted, deduplicated) sequence.
    pub fn from_names(canonical: Vec<String>) -> Self {
        Self { names: canonical }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.binary_search_by(|n| n.as_str().cmp(name)).is_ok()
    }

    /// Names in ascending order, for reproducible emission.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

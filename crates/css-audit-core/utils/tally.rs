//! Insertion-ordered occurrence counter
//!
//! Reports list identifiers in the order they were first seen in the source,
//! so counting cannot use a plain hash map. `Tally` keeps entries in a `Vec`
//! and an `ahash` index beside it.

use super::hashers::{create_hash_map, HashMap};

/// Name → occurrence count, iterated in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl Tally {
    /// Create an empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: create_hash_map(),
        }
    }

    /// Record one occurrence of `name`.
    pub fn record(&mut self, name: &str) {
        self.record_n(name, 1);
    }

    /// Record `count` occurrences of `name`.
    pub fn record_n(&mut self, name: &str, count: usize) {
        if let Some(&slot) = self.index.get(name) {
            self.entries[slot].1 += count;
        } else {
            self.index.insert(name.to_string(), self.entries.len());
            self.entries.push((name.to_string(), count));
        }
    }

    /// Occurrence count of `name`, zero when absent.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.index.get(name).map_or(0, |&slot| self.entries[slot].1)
    }

    /// Whether `name` has been recorded.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Iterate `(name, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.entries
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
    }

    /// Iterate names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Fold another tally into this one, appending unseen names in their order.
    pub fn absorb(&mut self, other: &Self) {
        for (name, count) in other.iter() {
            self.record_n(name, count);
        }
    }
}

impl PartialEq for Tally {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Tally {}

impl<'s> FromIterator<&'s str> for Tally {
    fn from_iter<I: IntoIterator<Item = &'s str>>(iter: I) -> Self {
        let mut tally = Self::new();
        for name in iter {
            tally.record(name);
        }
        tally
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Tally {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, count) in &self.entries {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

//! Hash map constructors backed by `ahash`
//!
//! Lookup indexes (selector → output slot, name → tally slot) use these so
//! hashing cost stays flat on large stylesheets. Iteration order of these maps
//! is never observable in reports; ordered output always comes from a `Vec`
//! or `BTreeMap` alongside.

use ahash::RandomState;

/// `HashMap` with the crate's default hasher.
pub type HashMap<K, V> = std::collections::HashMap<K, V, RandomState>;

/// Create a new `HashMap` with the `ahash` hasher.
///
/// # Example
///
/// ```rust
/// use css_audit_core::utils::hashers::create_hash_map;
///
/// let mut map = create_hash_map::<String, usize>();
/// map.insert(".card".to_string(), 0);
/// ```
#[must_use]
pub fn create_hash_map<K, V>() -> HashMap<K, V> {
    HashMap::with_hasher(RandomState::new())
}

/// Create a new `HashMap` with pre-allocated capacity.
#[must_use]
pub fn create_hash_map_with_capacity<K, V>(capacity: usize) -> HashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, RandomState::new())
}

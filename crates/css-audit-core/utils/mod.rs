//! Utility types shared by the parser, merger and analysis modules
//!
//! Contains the crate-wide error type, `ahash`-backed map constructors and
//! [`Tally`], the insertion-ordered occurrence counter every identifier
//! category is built on.

pub mod errors;
pub mod hashers;
pub mod tally;

pub use errors::CoreError;
pub use hashers::{create_hash_map, create_hash_map_with_capacity, HashMap};
pub use tally::Tally;

/// Compute the 1-based line number of a byte offset within `text`.
///
/// Offsets past the end of `text` resolve to the last line.
#[must_use]
pub fn line_at(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

//! Merge conflict records and non-fatal merge warnings

use core::fmt;

use crate::parser::SourceId;

/// A selector defined by more than one input layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConflictRecord {
    /// Normalized selector
    pub selector: String,
    /// Source that first defined the selector
    pub losing_source: SourceId,
    /// Source whose body ended up in the output
    pub winning_source: SourceId,
    /// Every source overridden along the way, oldest first
    pub displaced: Vec<SourceId>,
    /// The winning body repeats the definition it displaced, after trimming.
    ///
    /// Identical redefinitions are harmless duplication rather than a real
    /// cascade override.
    pub identical: bool,
}

impl ConflictRecord {
    pub(crate) fn new(
        selector: &str,
        losing: SourceId,
        winning: SourceId,
        identical: bool,
    ) -> Self {
        Self {
            selector: selector.to_string(),
            losing_source: losing,
            winning_source: winning,
            displaced: vec![losing],
            identical,
        }
    }

    pub(crate) fn override_with(&mut self, displaced: SourceId, winning: SourceId, identical: bool) {
        if self.displaced.last() != Some(&displaced) {
            self.displaced.push(displaced);
        }
        self.winning_source = winning;
        self.identical = identical;
    }
}

impl fmt::Display for ConflictRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} overridden by {}",
            self.selector, self.losing_source, self.winning_source
        )?;
        if self.identical {
            write!(f, " (identical)")?;
        }
        Ok(())
    }
}

/// Something the merge did that deserves a second look.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MergeWarning {
    /// A higher layer replaced a rule with an empty body
    ValuelessOverride {
        /// Normalized selector
        selector: String,
        /// Source holding the empty body
        source: SourceId,
        /// Source whose content was replaced
        replaced: SourceId,
    },
}

impl MergeWarning {
    /// Selector the warning is about.
    #[must_use]
    pub fn selector(&self) -> &str {
        match self {
            Self::ValuelessOverride { selector, .. } => selector,
        }
    }
}

impl fmt::Display for MergeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValuelessOverride {
                selector,
                source,
                replaced,
            } => write!(
                f,
                "'{selector}' from {replaced} replaced by an empty body from {source}"
            ),
        }
    }
}

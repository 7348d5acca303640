//! Identifier extraction and per-category occurrence counts
//!
//! An [`IdentifierSet`] counts class, id, custom property, keyframe and
//! animation-reference names with provenance for every occurrence. Sets are
//! built per source and combined with [`IdentifierSet::reduce`].
//!
//! Stylesheet-derived sets are exact for what they cover. Script-derived sets
//! come from a fixed pattern catalog matched against raw text and are
//! advisory: they can both over- and under-count.

use core::fmt;

use crate::{parser::SourceId, utils::Tally};

#[cfg(feature = "script")]
pub mod script;
pub mod stylesheet;

#[cfg(feature = "script")]
pub use script::ScriptScanner;
pub use stylesheet::{extract_stylesheet, selector_identifiers};

/// Identifier category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Category {
    /// `.name` in selectors
    Class,
    /// `#name` in selectors
    Id,
    /// `--name` custom properties
    Variable,
    /// `@keyframes name` definitions
    Keyframe,
    /// Names referenced by `animation` / `animation-name`
    AnimationRef,
}

impl Category {
    /// Every category in report order.
    pub const ALL: [Self; 5] = [
        Self::Class,
        Self::Id,
        Self::Variable,
        Self::Keyframe,
        Self::AnimationRef,
    ];

    /// Lowercase name used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Id => "id",
            Self::Variable => "variable",
            Self::Keyframe => "keyframe",
            Self::AnimationRef => "animation-ref",
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags::bitflags! {
    /// Selection of identifier categories.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CategorySet: u8 {
        /// Class names.
        const CLASS = 1 << 0;
        /// Id names.
        const ID = 1 << 1;
        /// Custom properties.
        const VARIABLE = 1 << 2;
        /// Keyframe definitions.
        const KEYFRAME = 1 << 3;
        /// Animation references.
        const ANIMATION_REF = 1 << 4;
    }
}

impl CategorySet {
    /// Whether `category` is selected.
    #[must_use]
    pub fn includes(self, category: Category) -> bool {
        self.contains(Self::from(category))
    }

    /// Selected categories in report order.
    pub fn categories(self) -> impl Iterator<Item = Category> {
        Category::ALL
            .into_iter()
            .filter(move |&category| self.includes(category))
    }
}

impl From<Category> for CategorySet {
    fn from(category: Category) -> Self {
        match category {
            Category::Class => Self::CLASS,
            Category::Id => Self::ID,
            Category::Variable => Self::VARIABLE,
            Category::Keyframe => Self::KEYFRAME,
            Category::AnimationRef => Self::ANIMATION_REF,
        }
    }
}

/// Where an identifier set was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Origin {
    /// Parsed stylesheet rules
    Stylesheet,
    /// Heuristic script pattern matches
    Script,
}

/// Location of one identifier occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Provenance {
    pub category: Category,
    pub name: String,
    pub source: SourceId,
    /// 1-based line
    pub line: usize,
    /// Selector, declaration or pattern id the name was found in
    pub context: String,
}

/// Per-category identifier counts with provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierSet {
    origin: Origin,
    tallies: [Tally; 5],
    provenance: Vec<Provenance>,
}

impl IdentifierSet {
    /// Create an empty set.
    #[must_use]
    pub fn new(origin: Origin) -> Self {
        Self {
            origin,
            tallies: Default::default(),
            provenance: Vec::new(),
        }
    }

    /// Record one occurrence.
    pub fn record(
        &mut self,
        category: Category,
        name: &str,
        source: SourceId,
        line: usize,
        context: &str,
    ) {
        self.tallies[category.slot()].record(name);
        self.provenance.push(Provenance {
            category,
            name: name.to_string(),
            source,
            line,
            context: context.to_string(),
        });
    }

    #[must_use]
    pub const fn origin(&self) -> Origin {
        self.origin
    }

    /// Script-derived counts are approximations.
    #[must_use]
    pub fn is_advisory(&self) -> bool {
        self.origin == Origin::Script
    }

    /// Name → count map for one category, in first-seen order.
    #[must_use]
    pub fn tally(&self, category: Category) -> &Tally {
        &self.tallies[category.slot()]
    }

    #[must_use]
    pub fn count(&self, category: Category, name: &str) -> usize {
        self.tally(category).count(name)
    }

    #[must_use]
    pub fn contains(&self, category: Category, name: &str) -> bool {
        self.tally(category).contains(name)
    }

    /// Every recorded occurrence in extraction order.
    #[must_use]
    pub fn provenance(&self) -> &[Provenance] {
        &self.provenance
    }

    /// Occurrences of `name` in `category`.
    pub fn occurrences<'s>(
        &'s self,
        category: Category,
        name: &'s str,
    ) -> impl Iterator<Item = &'s Provenance> + 's {
        self.provenance
            .iter()
            .filter(move |p| p.category == category && p.name == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tallies.iter().all(Tally::is_empty)
    }

    /// Combine per-source sets into one.
    ///
    /// Counts add up, first-seen order follows input order and provenance is
    /// concatenated. The result is advisory if any input is.
    #[must_use]
    pub fn reduce<'s>(sets: impl IntoIterator<Item = &'s Self>) -> Self {
        let mut combined = Self::new(Origin::Stylesheet);
        for set in sets {
            if set.is_advisory() {
                combined.origin = Origin::Script;
            }
            for (mine, theirs) in combined.tallies.iter_mut().zip(&set.tallies) {
                mine.absorb(theirs);
            }
            combined.provenance.extend(set.provenance.iter().cloned());
        }
        combined
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for IdentifierSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("IdentifierSet", 7)?;
        state.serialize_field("origin", &self.origin)?;
        state.serialize_field("class", self.tally(Category::Class))?;
        state.serialize_field("id", self.tally(Category::Id))?;
        state.serialize_field("variable", self.tally(Category::Variable))?;
        state.serialize_field("keyframe", self.tally(Category::Keyframe))?;
        state.serialize_field("animation_ref", self.tally(Category::AnimationRef))?;
        state.serialize_field("provenance", &self.provenance)?;
        state.end()
    }
}

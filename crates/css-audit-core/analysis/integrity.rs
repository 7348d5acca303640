//! Identifier preservation between a reference and a current set
//!
//! For each selected category the comparator splits names into preserved,
//! missing and extra, and scores the share of reference names still present.
//! A category with no reference names has no score rather than a division by
//! zero.
//!
//! # Example
//!
//! ```rust
//! use css_audit_core::analysis::{compare, Category, CategorySet, IdentifierSet, Origin, Score};
//! use css_audit_core::SourceId;
//!
//! let mut reference = IdentifierSet::new(Origin::Stylesheet);
//! reference.record(Category::Class, "btn", SourceId(0), 1, ".btn");
//! reference.record(Category::Class, "card", SourceId(0), 2, ".card");
//! let mut current = IdentifierSet::new(Origin::Stylesheet);
//! current.record(Category::Class, "btn", SourceId(1), 1, ".btn");
//!
//! let report = compare(&reference, &current, CategorySet::CLASS);
//! assert_eq!(report.aggregate(), Score::Percent(50.0));
//! ```

use core::fmt;

use super::identifiers::{Category, CategorySet, IdentifierSet};

/// Preservation percentage or the "no data" sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Score {
    /// Percentage rounded to one decimal place
    Percent(f64),
    /// Nothing to compare against
    NoData,
}

impl Score {
    /// `preserved / total * 100`, or [`Score::NoData`] when `total` is zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_counts(preserved: usize, total: usize) -> Self {
        if total == 0 {
            return Self::NoData;
        }
        let percent = preserved as f64 / total as f64 * 100.0;
        Self::Percent((percent * 10.0).round() / 10.0)
    }

    /// Percentage, if there was data.
    #[must_use]
    pub const fn percent(self) -> Option<f64> {
        match self {
            Self::Percent(value) => Some(value),
            Self::NoData => None,
        }
    }

    /// Qualitative grade for the score.
    #[must_use]
    pub fn grade(self) -> IntegrityGrade {
        match self {
            Self::NoData => IntegrityGrade::NoData,
            Self::Percent(p) if p >= 95.0 => IntegrityGrade::Excellent,
            Self::Percent(p) if p >= 85.0 => IntegrityGrade::Good,
            Self::Percent(p) if p >= 70.0 => IntegrityGrade::Fair,
            Self::Percent(_) => IntegrityGrade::Poor,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(value) => write!(f, "{value:.1}%"),
            Self::NoData => write!(f, "n/a"),
        }
    }
}

/// Qualitative preservation grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IntegrityGrade {
    /// 95% or more
    Excellent,
    /// 85% or more
    Good,
    /// 70% or more
    Fair,
    /// Below 70%
    Poor,
    /// No reference identifiers
    NoData,
}

impl fmt::Display for IntegrityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Good => write!(f, "good"),
            Self::Fair => write!(f, "fair"),
            Self::Poor => write!(f, "poor"),
            Self::NoData => write!(f, "no data"),
        }
    }
}

/// Name found in both sets.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PreservedIdentifier {
    pub name: String,
    pub reference_count: usize,
    pub current_count: usize,
}

/// Name found in only one set.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UnpairedIdentifier {
    pub name: String,
    pub count: usize,
}

/// Comparison of one category.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CategoryReport {
    pub category: Category,
    /// In reference first-seen order
    pub preserved: Vec<PreservedIdentifier>,
    /// Reference names absent from current, in reference order
    pub missing: Vec<UnpairedIdentifier>,
    /// Current names absent from reference, in current order
    pub extra: Vec<UnpairedIdentifier>,
    pub score: Score,
}

impl CategoryReport {
    fn compute(category: Category, reference: &IdentifierSet, current: &IdentifierSet) -> Self {
        let ref_tally = reference.tally(category);
        let cur_tally = current.tally(category);

        let mut preserved = Vec::new();
        let mut missing = Vec::new();
        for (name, reference_count) in ref_tally.iter() {
            match cur_tally.count(name) {
                0 => missing.push(UnpairedIdentifier {
                    name: name.to_string(),
                    count: reference_count,
                }),
                current_count => preserved.push(PreservedIdentifier {
                    name: name.to_string(),
                    reference_count,
                    current_count,
                }),
            }
        }
        let extra = cur_tally
            .iter()
            .filter(|(name, _)| !ref_tally.contains(name))
            .map(|(name, count)| UnpairedIdentifier {
                name: name.to_string(),
                count,
            })
            .collect();

        let score = Score::from_counts(preserved.len(), preserved.len() + missing.len());
        Self {
            category,
            preserved,
            missing,
            extra,
            score,
        }
    }

    /// Preserved names whose occurrence counts differ.
    pub fn count_changes(&self) -> impl Iterator<Item = &PreservedIdentifier> + '_ {
        self.preserved
            .iter()
            .filter(|p| p.reference_count != p.current_count)
    }

    /// Distinct reference names.
    #[must_use]
    pub fn reference_total(&self) -> usize {
        self.preserved.len() + self.missing.len()
    }
}

/// Per-category preservation with an aggregate score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PreservationReport {
    categories: Vec<CategoryReport>,
    aggregate: Score,
    advisory: bool,
}

impl PreservationReport {
    /// Report for one category, if it was selected.
    #[must_use]
    pub fn category(&self, category: Category) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Selected categories in report order.
    #[must_use]
    pub fn categories(&self) -> &[CategoryReport] {
        &self.categories
    }

    /// `Σ preserved / Σ reference` over all selected categories.
    #[must_use]
    pub const fn aggregate(&self) -> Score {
        self.aggregate
    }

    #[must_use]
    pub fn grade(&self) -> IntegrityGrade {
        self.aggregate.grade()
    }

    /// Either side came from script heuristics.
    #[must_use]
    pub const fn is_advisory(&self) -> bool {
        self.advisory
    }

    #[must_use]
    pub fn total_missing(&self) -> usize {
        self.categories.iter().map(|c| c.missing.len()).sum()
    }
}

/// Compare `current` against `reference` for the selected categories.
#[must_use]
pub fn compare(
    reference: &IdentifierSet,
    current: &IdentifierSet,
    categories: CategorySet,
) -> PreservationReport {
    let categories: Vec<CategoryReport> = categories
        .categories()
        .map(|category| CategoryReport::compute(category, reference, current))
        .collect();

    let preserved: usize = categories.iter().map(|c| c.preserved.len()).sum();
    let total: usize = categories.iter().map(CategoryReport::reference_total).sum();
    let aggregate = Score::from_counts(preserved, total);
    log::debug!("integrity {aggregate} over {total} reference identifier(s)");

    PreservationReport {
        categories,
        aggregate,
        advisory: reference.is_advisory() || current.is_advisory(),
    }
}

/// Check that script references are defined by stylesheets.
///
/// The script set is the reference: a missing entry is a name the scripts
/// use that no stylesheet defines. Keyframe categories are not compared.
#[must_use]
pub fn coverage(script_refs: &IdentifierSet, stylesheet_defs: &IdentifierSet) -> PreservationReport {
    compare(
        script_refs,
        stylesheet_defs,
        CategorySet::CLASS | CategorySet::ID | CategorySet::VARIABLE,
    )
}

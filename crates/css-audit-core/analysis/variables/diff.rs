//! Reference/current comparison of scope variable maps

use super::ScopeVariableMap;
use crate::analysis::integrity::Score;

/// Variable present in both scopes with different trimmed values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChangedVariable {
    pub name: String,
    pub reference: String,
    pub current: String,
}

/// Comparison of one reference scope.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScopeDiff {
    /// Scope key, e.g. `:root`
    pub scope: String,
    /// Reference variables absent from the current scope, sorted
    pub missing: Vec<String>,
    /// Current variables absent from the reference scope, sorted
    pub extra: Vec<String>,
    /// Variables whose values differ, sorted by name
    pub changed: Vec<ChangedVariable>,
    /// Reference variables present in the current scope
    pub preserved: usize,
    /// The current map has no such scope at all
    pub scope_absent: bool,
}

impl ScopeDiff {
    /// Nothing missing, extra or changed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.changed.is_empty()
    }

    /// Share of reference variables still present.
    ///
    /// An absent scope scores 0; an empty reference scope has no data.
    #[must_use]
    pub fn score(&self) -> Score {
        Score::from_counts(self.preserved, self.preserved + self.missing.len())
    }
}

/// Per-scope differences between a reference and a current map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VariableDiff {
    scopes: Vec<ScopeDiff>,
    unmatched_current: Vec<String>,
}

impl VariableDiff {
    /// Compare every reference scope against `current`.
    ///
    /// A reference scope missing from `current` is reported with all of its
    /// variables missing; it is not an error.
    #[must_use]
    pub fn compute(reference: &ScopeVariableMap, current: &ScopeVariableMap) -> Self {
        let mut scopes = Vec::new();

        for (key, ref_vars) in reference.scopes() {
            let Some(cur_vars) = current.scope(key) else {
                log::debug!("scope {key} absent from current stylesheets");
                scopes.push(ScopeDiff {
                    scope: key.to_string(),
                    missing: ref_vars.keys().cloned().collect(),
                    extra: Vec::new(),
                    changed: Vec::new(),
                    preserved: 0,
                    scope_absent: true,
                });
                continue;
            };

            let mut diff = ScopeDiff {
                scope: key.to_string(),
                missing: Vec::new(),
                extra: Vec::new(),
                changed: Vec::new(),
                preserved: 0,
                scope_absent: false,
            };
            for (name, ref_value) in ref_vars {
                match cur_vars.get(name) {
                    None => diff.missing.push(name.clone()),
                    Some(cur_value) => {
                        diff.preserved += 1;
                        if cur_value.trim() != ref_value.trim() {
                            diff.changed.push(ChangedVariable {
                                name: name.clone(),
                                reference: ref_value.clone(),
                                current: cur_value.clone(),
                            });
                        }
                    }
                }
            }
            diff.extra = cur_vars
                .keys()
                .filter(|name| !ref_vars.contains_key(*name))
                .cloned()
                .collect();
            scopes.push(diff);
        }

        let unmatched_current = current
            .scope_keys()
            .filter(|key| reference.scope(key).is_none())
            .map(str::to_string)
            .collect();

        Self {
            scopes,
            unmatched_current,
        }
    }

    /// One entry per reference scope, in scope key order.
    #[must_use]
    pub fn scopes(&self) -> &[ScopeDiff] {
        &self.scopes
    }

    #[must_use]
    pub fn scope(&self, key: &str) -> Option<&ScopeDiff> {
        self.scopes.iter().find(|diff| diff.scope == key)
    }

    /// Current scopes the reference does not have.
    #[must_use]
    pub fn unmatched_current_scopes(&self) -> &[String] {
        &self.unmatched_current
    }

    /// `(scope, name)` for every missing variable.
    pub fn all_missing(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.scopes.iter().flat_map(|diff| {
            diff.missing
                .iter()
                .map(move |name| (diff.scope.as_str(), name.as_str()))
        })
    }

    /// `(scope, change)` for every changed variable.
    pub fn all_changed(&self) -> impl Iterator<Item = (&str, &ChangedVariable)> + '_ {
        self.scopes.iter().flat_map(|diff| {
            diff.changed
                .iter()
                .map(move |change| (diff.scope.as_str(), change))
        })
    }

    #[must_use]
    pub fn total_missing(&self) -> usize {
        self.scopes.iter().map(|diff| diff.missing.len()).sum()
    }

    #[must_use]
    pub fn total_changed(&self) -> usize {
        self.scopes.iter().map(|diff| diff.changed.len()).sum()
    }

    /// Every reference scope matches and no current scope is unexpected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unmatched_current.is_empty() && self.scopes.iter().all(ScopeDiff::is_clean)
    }
}

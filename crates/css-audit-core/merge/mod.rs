//! Precedence-ordered cascade merge
//!
//! Layers are given lowest precedence first. The first occurrence of a
//! selector fixes its position in the output; later occurrences replace the
//! stored body in place. Merging is a pure transformation over rule lists.
//!
//! # Example
//!
//! ```rust
//! use css_audit_core::{merge::CascadeMerger, SourceId, Stylesheet};
//!
//! let base = Stylesheet::parse(SourceId(0), ".a { x: 1; } .b { y: 2; }");
//! let page = Stylesheet::parse(SourceId(1), ".c { z: 3; } .a { x: 9; }");
//!
//! let merged = CascadeMerger::new().merge([base.rules(), page.rules()]);
//! let order: Vec<_> = merged.rules().iter().map(|r| r.selector()).collect();
//! assert_eq!(order, [".a", ".b", ".c"]);
//! assert_eq!(merged.rules()[0].body(), "x: 9;");
//! assert_eq!(merged.conflicts()[0].winning_source, SourceId(1));
//! ```

mod conflict;

pub use conflict::{ConflictRecord, MergeWarning};

use crate::{
    parser::{to_css, Rule, Stylesheet},
    utils::{create_hash_map, create_hash_map_with_capacity, HashMap},
};

/// Merges precedence-ordered rule lists into one deduplicated list.
#[derive(Debug, Clone, Copy, Default)]
pub struct CascadeMerger;

impl CascadeMerger {
    /// Create a merger.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Merge layers, index 0 being the lowest precedence.
    #[must_use]
    pub fn merge<I, L>(&self, layers: I) -> MergedStylesheet
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[Rule]>,
    {
        let mut layers = layers.into_iter().peekable();
        let capacity = layers.peek().map_or(0, |rules| rules.as_ref().len());
        let mut state = MergeState::with_capacity(capacity);
        for (layer, rules) in layers.enumerate() {
            for rule in rules.as_ref() {
                state.apply(layer, rule);
            }
        }

        log::debug!(
            "merged into {} rule(s) with {} conflict(s)",
            state.rules.len(),
            state.conflicts.len()
        );

        MergedStylesheet {
            rules: state.rules,
            conflicts: state.conflicts,
            warnings: state.warnings,
        }
    }

    /// Merge parsed stylesheets in the given precedence order.
    #[must_use]
    pub fn merge_stylesheets(&self, sheets: &[Stylesheet]) -> MergedStylesheet {
        self.merge(sheets.iter().map(Stylesheet::rules))
    }
}

#[derive(Debug)]
struct MergeState {
    rules: Vec<Rule>,
    layers: Vec<usize>,
    index: HashMap<String, usize>,
    conflicts: Vec<ConflictRecord>,
    /// Body each conflict's current winner displaced from a lower layer
    displaced_bodies: Vec<String>,
    conflict_index: HashMap<String, usize>,
    warnings: Vec<MergeWarning>,
}

impl MergeState {
    /// Sized for the lowest layer, which seeds most of the output.
    fn with_capacity(capacity: usize) -> Self {
        Self {
            rules: Vec::with_capacity(capacity),
            layers: Vec::with_capacity(capacity),
            index: create_hash_map_with_capacity(capacity),
            conflicts: Vec::new(),
            displaced_bodies: Vec::new(),
            conflict_index: create_hash_map(),
            warnings: Vec::new(),
        }
    }

    fn apply(&mut self, layer: usize, rule: &Rule) {
        let Some(&slot) = self.index.get(rule.selector()) else {
            let slot = self.rules.len();
            self.index.insert(rule.selector().to_string(), slot);
            self.rules.push(rule.rebased(rule.body(), rule.source(), slot));
            self.layers.push(layer);
            return;
        };

        let previous = self.rules[slot].source();
        if rule.body().is_empty() {
            log::warn!(
                "'{}' from {previous} overridden with an empty body from {}",
                rule.selector(),
                rule.source()
            );
            self.warnings.push(MergeWarning::ValuelessOverride {
                selector: rule.selector().to_string(),
                source: rule.source(),
                replaced: previous,
            });
        }

        let body = rule.body().trim();
        if self.layers[slot] != layer {
            let displaced = self.rules[slot].body().trim().to_string();
            let identical = displaced == body;
            if let Some(&record) = self.conflict_index.get(rule.selector()) {
                self.conflicts[record].override_with(previous, rule.source(), identical);
                self.displaced_bodies[record] = displaced;
            } else {
                self.conflict_index
                    .insert(rule.selector().to_string(), self.conflicts.len());
                self.conflicts.push(ConflictRecord::new(
                    rule.selector(),
                    previous,
                    rule.source(),
                    identical,
                ));
                self.displaced_bodies.push(displaced);
            }
        } else if let Some(&record) = self.conflict_index.get(rule.selector()) {
            let conflict = &mut self.conflicts[record];
            conflict.winning_source = rule.source();
            conflict.identical = self.displaced_bodies[record] == body;
        }

        self.rules[slot] = self.rules[slot].rebased(rule.body(), rule.source(), slot);
        self.layers[slot] = layer;
    }
}

/// Result of a cascade merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MergedStylesheet {
    rules: Vec<Rule>,
    conflicts: Vec<ConflictRecord>,
    warnings: Vec<MergeWarning>,
}

impl MergedStylesheet {
    /// Unique-selector rules in first-occurrence order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    /// One record per selector defined in more than one layer.
    #[must_use]
    pub fn conflicts(&self) -> &[ConflictRecord] {
        &self.conflicts
    }

    #[must_use]
    pub fn warnings(&self) -> &[MergeWarning] {
        &self.warnings
    }

    /// Conflict record for `selector`, if it was overridden across layers.
    #[must_use]
    pub fn conflict_for(&self, selector: &str) -> Option<&ConflictRecord> {
        self.conflicts.iter().find(|c| c.selector == selector)
    }

    /// Render the merged rules as stylesheet text.
    #[must_use]
    pub fn to_css(&self) -> String {
        to_css(&self.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SourceId;
    use pretty_assertions::assert_eq;

    fn sheet(id: u32, text: &str) -> Stylesheet {
        Stylesheet::parse(SourceId(id), text)
    }

    fn pairs(merged: &MergedStylesheet) -> Vec<(&str, &str)> {
        merged
            .rules()
            .iter()
            .map(|rule| (rule.selector(), rule.body()))
            .collect()
    }

    #[test]
    fn first_occurrence_order_highest_precedence_content() {
        let merged = CascadeMerger::new().merge_stylesheets(&[
            sheet(0, ".a { x: 1; } .b { y: 1; }"),
            sheet(1, ".c { z: 2; } .b { y: 2; }"),
            sheet(2, ".a { x: 3; }"),
        ]);

        assert_eq!(
            pairs(&merged),
            vec![(".a", "x: 3;"), (".b", "y: 2;"), (".c", "z: 2;")]
        );
        assert_eq!(merged.rules()[0].source(), SourceId(2));
        assert_eq!(merged.rules()[2].sequence_index(), 2);
        assert_eq!(merged.conflicts().len(), 2);

        let a = merged.conflict_for(".a").map(|c| (c.losing_source, c.winning_source));
        assert_eq!(a, Some((SourceId(0), SourceId(2))));
    }

    #[test]
    fn repeated_overrides_track_displaced_sources() {
        let merged = CascadeMerger::new().merge_stylesheets(&[
            sheet(0, ".a { x: 0; }"),
            sheet(1, ".a { x: 1; }"),
            sheet(2, ".a { x: 2; }"),
        ]);
        assert_eq!(merged.conflicts().len(), 1);
        let record = &merged.conflicts()[0];
        assert_eq!(record.losing_source, SourceId(0));
        assert_eq!(record.winning_source, SourceId(2));
        assert_eq!(record.displaced, vec![SourceId(0), SourceId(1)]);
    }

    #[test]
    fn identical_redefinitions_are_told_apart_from_overrides() {
        let merged = CascadeMerger::new().merge_stylesheets(&[
            sheet(0, ".same { color: red; }\n.diff { color: red; }"),
            sheet(1, ".same {\n  color: red;\n}\n.diff { color: blue; }"),
        ]);

        let flags: Vec<_> = merged
            .conflicts()
            .iter()
            .map(|c| (c.selector.as_str(), c.identical))
            .collect();
        assert_eq!(flags, vec![(".same", true), (".diff", false)]);
    }

    #[test]
    fn identical_flag_follows_the_final_winner() {
        let merged = CascadeMerger::new().merge_stylesheets(&[
            sheet(0, ".a { x: 1; }"),
            sheet(1, ".a { x: 2; } .a { x: 1; }"),
            sheet(2, ".b { y: 0; }"),
        ]);
        let record = merged.conflict_for(".a");
        assert_eq!(record.map(|c| c.identical), Some(true));

        let merged = CascadeMerger::new().merge_stylesheets(&[
            sheet(0, ".a { x: 1; }"),
            sheet(1, ".a { x: 1; }"),
            sheet(2, ".a { x: 3; }"),
        ]);
        let record = merged.conflict_for(".a");
        assert_eq!(record.map(|c| c.identical), Some(false));
    }

    #[test]
    fn duplicates_within_one_layer_are_not_conflicts() {
        let merged = CascadeMerger::new().merge_stylesheets(&[sheet(
            0,
            ".a { x: 1; } .b { y: 1; } .a { x: 2; }",
        )]);
        assert_eq!(pairs(&merged), vec![(".a", "x: 2;"), (".b", "y: 1;")]);
        assert!(merged.conflicts().is_empty());
    }

    #[test]
    fn empty_override_replaces_and_warns() {
        let base = vec![Rule::new(".a", "color: red;", SourceId(0), 0)];
        let theme = vec![Rule::new(".a", "", SourceId(1), 0)];
        let merged = CascadeMerger::new().merge([base, theme]);

        assert_eq!(merged.rules()[0].body(), "");
        assert_eq!(
            merged.warnings(),
            &[MergeWarning::ValuelessOverride {
                selector: ".a".to_string(),
                source: SourceId(1),
                replaced: SourceId(0),
            }]
        );
        assert_eq!(merged.conflicts().len(), 1);
    }

    #[test]
    fn empty_layers_are_identity() {
        let a = sheet(0, ".a { x: 1; } @media print { .a { x: 2; } }");
        let empty: &[Rule] = &[];

        let left = CascadeMerger::new().merge([a.rules(), empty]);
        let right = CascadeMerger::new().merge([empty, a.rules()]);
        assert_eq!(pairs(&left), pairs(&right));
        assert_eq!(left.rules(), a.rules());
        assert!(left.conflicts().is_empty());
    }

    #[test]
    fn renders_merged_css() {
        let merged = CascadeMerger::new().merge_stylesheets(&[sheet(
            0,
            ".a { color: red; margin: 0; }\n.b {\n  padding: 1px;\n}",
        )]);
        assert_eq!(
            merged.to_css(),
            ".a {\n    color: red; margin: 0;\n}\n\n.b {\n    padding: 1px;\n}\n"
        );
    }
}

//! Identifier, variable and animation analysis over a set of stylesheets
//!
//! [`StylesheetAnalysis`] runs every extractor over one analysis scope (the
//! stylesheets passed together) and keeps the per-file identifier sets next
//! to the combined one. Results are immutable values; combining per-file
//! results happens in a single reduction step.
//!
//! # Example
//!
//! ```rust
//! use css_audit_core::{
//!     analysis::{audit::{audit, AuditConfig}, AnalysisConfig, Category, StylesheetAnalysis},
//!     SourceId, Stylesheet,
//! };
//!
//! let sheets = [
//!     Stylesheet::parse(SourceId(0), ":root { --gap: 4px; }\n.card { animation: pop 1s; }"),
//!     Stylesheet::parse(SourceId(1), "@keyframes fade { to { opacity: 0; } }"),
//! ];
//! let analysis = StylesheetAnalysis::analyze(&sheets, &AnalysisConfig::default());
//!
//! assert_eq!(analysis.identifiers().count(Category::Class, "card"), 1);
//! assert_eq!(analysis.bindings().missing(), ["pop".to_string()]);
//! assert_eq!(analysis.variables().get(":root", "--gap"), Some("4px"));
//!
//! let issues = audit(&analysis, &AuditConfig::default());
//! assert_eq!(issues.len(), 2);
//! ```

pub mod animations;
pub mod audit;
pub mod identifiers;
pub mod integrity;
pub mod variables;

pub use animations::{AnimationNameRule, BindingFinding, BindingReport};
pub use identifiers::{
    extract_stylesheet, Category, CategorySet, IdentifierSet, Origin, Provenance,
};
pub use integrity::{compare, coverage, CategoryReport, IntegrityGrade, PreservationReport, Score};
pub use variables::{ScopeConfig, ScopeVariableMap, VariableDiff};

#[cfg(feature = "script")]
pub use identifiers::ScriptScanner;

use crate::{
    merge::{MergeWarning, MergedStylesheet},
    parser::{ParseError, ParserConfig, SourceId, Stylesheet},
    utils::{create_hash_map, HashMap},
};

/// Settings shared by every analyzer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Parser settings used when grouping blocks are re-parsed
    pub parser: ParserConfig,
    /// Scoped variable detection
    pub scope: ScopeConfig,
    /// Keywords to treat as reserved on top of the built-in list
    pub extra_reserved_keywords: Vec<String>,
}

impl AnalysisConfig {
    #[must_use]
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: ScopeConfig) -> Self {
        self.scope = scope;
        self
    }

    /// Add a keyword that never names an animation.
    #[must_use]
    pub fn with_reserved_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.extra_reserved_keywords.push(keyword.into());
        self
    }

    /// Animation name rule for this configuration.
    #[must_use]
    pub fn animation_names(&self) -> AnimationNameRule {
        AnimationNameRule::new(&self.extra_reserved_keywords)
    }
}

/// Selector defined more than once within one stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DuplicateSelector {
    pub source: SourceId,
    pub selector: String,
    /// Selector line of every definition, in document order
    pub lines: Vec<usize>,
}

/// Analysis results for one analysis scope.
#[derive(Debug, Clone)]
pub struct StylesheetAnalysis {
    per_file: Vec<IdentifierSet>,
    identifiers: IdentifierSet,
    variables: ScopeVariableMap,
    bindings: BindingReport,
    faults: Vec<(SourceId, ParseError)>,
    duplicates: Vec<DuplicateSelector>,
    merge_warnings: Vec<MergeWarning>,
}

impl StylesheetAnalysis {
    /// Analyze stylesheets that form one scope.
    #[must_use]
    pub fn analyze(sheets: &[Stylesheet], config: &AnalysisConfig) -> Self {
        let names = config.animation_names();
        let per_file: Vec<IdentifierSet> = sheets
            .iter()
            .map(|sheet| extract_stylesheet(sheet, &config.parser, &names))
            .collect();
        Self::from_parts(sheets, per_file, config)
    }

    /// Build the analysis from identifier sets extracted elsewhere.
    ///
    /// `per_file` must line up with `sheets`. Lets callers run extraction in
    /// parallel and still get a deterministic result.
    #[must_use]
    pub fn from_parts(
        sheets: &[Stylesheet],
        per_file: Vec<IdentifierSet>,
        config: &AnalysisConfig,
    ) -> Self {
        let identifiers = IdentifierSet::reduce(&per_file);
        let bindings = BindingReport::from_identifiers(&identifiers);
        let variables = ScopeVariableMap::extract(sheets, &config.scope);

        let faults = sheets
            .iter()
            .filter_map(|sheet| sheet.fault().map(|fault| (sheet.source(), fault.clone())))
            .collect();
        let duplicates = sheets.iter().flat_map(find_duplicates).collect();

        Self {
            per_file,
            identifiers,
            variables,
            bindings,
            faults,
            duplicates,
            merge_warnings: Vec::new(),
        }
    }

    /// Attach the warnings of a merge over the same stylesheets.
    #[must_use]
    pub fn with_merge(mut self, merged: &MergedStylesheet) -> Self {
        self.merge_warnings = merged.warnings().to_vec();
        self
    }

    /// Identifiers of the whole scope.
    #[must_use]
    pub const fn identifiers(&self) -> &IdentifierSet {
        &self.identifiers
    }

    /// Identifier sets in stylesheet order.
    #[must_use]
    pub fn per_file(&self) -> &[IdentifierSet] {
        &self.per_file
    }

    #[must_use]
    pub const fn variables(&self) -> &ScopeVariableMap {
        &self.variables
    }

    #[must_use]
    pub const fn bindings(&self) -> &BindingReport {
        &self.bindings
    }

    /// Stylesheets that were only partially parsed.
    #[must_use]
    pub fn faults(&self) -> &[(SourceId, ParseError)] {
        &self.faults
    }

    #[must_use]
    pub fn duplicates(&self) -> &[DuplicateSelector] {
        &self.duplicates
    }

    #[must_use]
    pub fn merge_warnings(&self) -> &[MergeWarning] {
        &self.merge_warnings
    }
}

fn find_duplicates(sheet: &Stylesheet) -> Vec<DuplicateSelector> {
    let mut order: Vec<&str> = Vec::new();
    let mut lines: HashMap<&str, Vec<usize>> = create_hash_map();
    for rule in sheet.rules() {
        lines
            .entry(rule.selector())
            .or_insert_with(|| {
                order.push(rule.selector());
                Vec::new()
            })
            .push(rule.line());
    }

    order
        .into_iter()
        .filter_map(|selector| {
            let lines = lines.remove(selector)?;
            (lines.len() > 1).then(|| DuplicateSelector {
                source: sheet.source(),
                selector: selector.to_string(),
                lines,
            })
        })
        .collect()
}

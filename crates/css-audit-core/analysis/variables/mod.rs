//! Scoped custom property maps
//!
//! Collects `--name: value` declarations from the global scope (`:root`) and
//! from theme attribute scopes (`[data-theme="dark"]`) into a
//! [`ScopeVariableMap`], and diffs two such maps.
//!
//! Only rules whose selector is exactly a scope selector contribute;
//! `[data-theme="dark"] .card` is an ordinary rule. Theme keys are normalized
//! to `[data-theme="<name>"]` whatever quoting the source used, and repeated
//! scopes merge in document order with later values winning.

mod color;
pub mod diff;

use std::collections::BTreeMap;

pub use color::hex_to_triplet;
pub use diff::{ChangedVariable, ScopeDiff, VariableDiff};

use crate::parser::{declarations, Rule, Stylesheet, DEFAULT_THEME_ATTRIBUTE};

/// Key of the global scope.
pub const ROOT_SCOPE: &str = ":root";

/// Scope detection and value normalization settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeConfig {
    /// Attribute that names theme scopes
    pub theme_attribute: String,
    /// Convert whole-value hex colors to decimal triplets
    pub normalize_hex_colors: bool,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            theme_attribute: DEFAULT_THEME_ATTRIBUTE.to_string(),
            normalize_hex_colors: false,
        }
    }
}

impl ScopeConfig {
    #[must_use]
    pub fn with_theme_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.theme_attribute = attribute.into();
        self
    }

    #[must_use]
    pub const fn with_hex_normalization(mut self, enabled: bool) -> Self {
        self.normalize_hex_colors = enabled;
        self
    }
}

/// Scope key for a selector, or `None` if it is not a scope selector.
///
/// ```rust
/// use css_audit_core::analysis::variables::scope_key;
///
/// assert_eq!(scope_key(":root", "data-theme").as_deref(), Some(":root"));
/// assert_eq!(
///     scope_key("[data-theme='dark']", "data-theme").as_deref(),
///     Some("[data-theme=\"dark\"]")
/// );
/// assert_eq!(scope_key("[data-theme=dark] .btn", "data-theme"), None);
/// ```
#[must_use]
pub fn scope_key(selector: &str, theme_attribute: &str) -> Option<String> {
    let selector = selector.trim();
    if selector == ROOT_SCOPE {
        return Some(ROOT_SCOPE.to_string());
    }

    let inner = selector.strip_prefix('[')?.strip_suffix(']')?;
    let (attribute, value) = inner.split_once('=')?;
    if attribute.trim() != theme_attribute {
        return None;
    }

    let value = value.trim();
    let name = ['"', '\'']
        .iter()
        .find_map(|&q| value.strip_prefix(q)?.strip_suffix(q))
        .unwrap_or(value);
    let valid = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    valid.then(|| format!("[{theme_attribute}=\"{name}\"]"))
}

/// Scope key → property name → raw value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ScopeVariableMap {
    scopes: BTreeMap<String, BTreeMap<String, String>>,
}

impl ScopeVariableMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect scoped variables from stylesheets in order.
    #[must_use]
    pub fn extract(sheets: &[Stylesheet], config: &ScopeConfig) -> Self {
        let mut map = Self::new();
        for sheet in sheets {
            map.extend_from_rules(sheet.rules(), config);
        }
        log::debug!(
            "{} scope(s), {} variable(s)",
            map.scopes.len(),
            map.variable_count()
        );
        map
    }

    /// Add the scoped variables of `rules`, later values overriding.
    pub fn extend_from_rules(&mut self, rules: &[Rule], config: &ScopeConfig) {
        for rule in rules {
            let Some(key) = scope_key(rule.selector(), &config.theme_attribute) else {
                continue;
            };
            for declaration in declarations(rule.body()) {
                if !declaration.is_custom_property() {
                    continue;
                }
                let value = if config.normalize_hex_colors {
                    hex_to_triplet(declaration.value)
                        .unwrap_or_else(|| declaration.value.to_string())
                } else {
                    declaration.value.to_string()
                };
                self.insert(&key, declaration.property, value);
            }
        }
    }

    /// Set one variable, creating the scope if needed.
    pub fn insert(&mut self, scope: &str, name: &str, value: impl Into<String>) {
        self.scopes
            .entry(scope.to_string())
            .or_default()
            .insert(name.to_string(), value.into());
    }

    /// Variables of one scope.
    #[must_use]
    pub fn scope(&self, key: &str) -> Option<&BTreeMap<String, String>> {
        self.scopes.get(key)
    }

    /// Value of `name` in `scope`.
    #[must_use]
    pub fn get(&self, scope: &str, name: &str) -> Option<&str> {
        self.scope(scope)?.get(name).map(String::as_str)
    }

    /// Scope keys in sorted order (`:root` first).
    pub fn scope_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.scopes.keys().map(String::as_str)
    }

    /// `(scope, variables)` pairs in sorted order.
    pub fn scopes(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, String>)> + '_ {
        self.scopes.iter().map(|(key, vars)| (key.as_str(), vars))
    }

    /// Names of theme scopes, without the attribute syntax.
    pub fn theme_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.scopes.keys().filter_map(|key| {
            let (_, value) = key.split_once("=\"")?;
            value.strip_suffix("\"]")
        })
    }

    /// Variables across all scopes.
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.scopes.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Compare against `current`, treating `self` as the reference.
    #[must_use]
    pub fn diff(&self, current: &Self) -> VariableDiff {
        VariableDiff::compute(self, current)
    }
}

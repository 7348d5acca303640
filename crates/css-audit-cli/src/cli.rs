use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use css_audit_core::{analysis::audit::AuditSeverity, parser::DEFAULT_THEME_ATTRIBUTE};

/// Structural analysis, cascade merging and integrity checks for stylesheets.
#[derive(Parser, Debug)]
#[command(name = "css-audit", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Attribute naming theme scopes.
    #[arg(long = "theme-attr", global = true, default_value = DEFAULT_THEME_ATTRIBUTE)]
    pub theme_attribute: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge stylesheets given in ascending precedence.
    Merge(MergeArgs),

    /// Diff scoped custom properties against reference stylesheets.
    Vars(VarsArgs),

    /// Cross-check animation references against @keyframes.
    Animations(FilesArg),

    /// Compare identifiers against reference stylesheets.
    Integrity(CompareArgs),

    /// Check script references against stylesheet definitions.
    Coverage(FilesArg),

    /// Run the built-in audit rules.
    Audit(AuditArgs),

    /// Split a stylesheet into base rules and one file per theme.
    Split(SplitArgs),
}

#[derive(Args, Debug)]
pub struct FilesArg {
    /// Input files.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    #[command(flatten)]
    pub inputs: FilesArg,

    /// Write the merged stylesheet here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Reference stylesheet, repeatable.
    #[arg(long = "reference", required = true)]
    pub references: Vec<PathBuf>,

    #[command(flatten)]
    pub inputs: FilesArg,
}

#[derive(Args, Debug)]
pub struct VarsArgs {
    #[command(flatten)]
    pub compare: CompareArgs,

    /// Normalize hex colors to decimal triplets before comparing.
    #[arg(long, default_value_t = false)]
    pub hex: bool,
}

#[derive(Args, Debug)]
pub struct AuditArgs {
    #[command(flatten)]
    pub inputs: FilesArg,

    /// Lowest severity to report.
    #[arg(long, value_enum)]
    pub min_severity: Option<Severity>,

    /// Stop after this many issues.
    #[arg(long)]
    pub max_issues: Option<usize>,

    /// Disable an audit rule by id, repeatable.
    #[arg(long = "disable")]
    pub disabled_rules: Vec<String>,
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Stylesheet to split.
    pub file: PathBuf,

    /// Directory receiving `base.css` and `theme-<name>.css`.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

/// Audit severity as accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Severity {
    Info,
    Hint,
    Warning,
    Error,
}

impl From<Severity> for AuditSeverity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Info => Self::Info,
            Severity::Hint => Self::Hint,
            Severity::Warning => Self::Warning,
            Severity::Error => Self::Error,
        }
    }
}
